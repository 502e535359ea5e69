//! Text measurement and the height-filling font scale used by the text glyphs.

/// Size of a run of text at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

pub trait TextMeasure {
    fn measure(&self, text: &str, size: f32) -> TextExtent;
}

impl TextMeasure for fontdue::Font {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        TextExtent {
            width: measure_text(self, text, size),
            height: text_height(self, size),
        }
    }
}

/// Text rescaled to fill an available height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedText {
    pub scale: f32,
    pub size: f32,
    pub extent: TextExtent,
}

/// Measure at `base_size`, scale so the line height fills `available_height`, re-measure.
pub fn fit_text(measure: &dyn TextMeasure, text: &str, base_size: f32, available_height: f32) -> Option<FittedText> {
    if text.is_empty() {
        return None;
    }
    let natural = measure.measure(text, base_size);
    if natural.height <= 0.0 {
        return None;
    }
    let scale = available_height / natural.height;
    let size = base_size * scale;
    if !(size > 0.0 && size.is_finite()) {
        return None;
    }
    Some(FittedText { scale, size, extent: measure.measure(text, size) })
}

/// Height of the font em-box (ascent - descent).
pub fn text_height(font: &fontdue::Font, size: f32) -> f32 {
    font.horizontal_line_metrics(size)
        .map(|lm| lm.ascent - lm.descent)
        .unwrap_or(size)
}

pub fn measure_text(font: &fontdue::Font, text: &str, size: f32) -> f32 {
    text.chars().map(|ch| font.metrics(ch, size).advance_width).sum()
}

pub fn load_font(path: &std::path::Path) -> Result<fontdue::Font, String> {
    let data = std::fs::read(path).map_err(|e| format!("read font {}: {e}", path.display()))?;
    fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
        .map_err(|e| format!("parse font {}: {e}", path.display()))
}

/// Fixed-advance measurer for tests: every char is half the size wide, lines are 1.2x tall.
#[cfg(test)]
pub(crate) struct FixedMeasure;

#[cfg(test)]
impl TextMeasure for FixedMeasure {
    fn measure(&self, text: &str, size: f32) -> TextExtent {
        TextExtent {
            width: text.chars().count() as f32 * size * 0.5,
            height: size * 1.2,
        }
    }
}
