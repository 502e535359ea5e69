//! tiny-skia backend for panel draw commands.
//!
//! Every paint object (paints, strokes, paths, rasterized glyphs) is a local
//! of the call that uses it and is dropped on return.

use tiny_skia::{Paint, PathBuilder, Pixmap, Shader, Stroke, Transform};

use crate::bitmap::{Bitmap, ColorRemap};
use crate::color::Color;
use crate::glyph::DrawCommand;
use crate::layout::{Point, Rect};
use crate::panel::DrawnPanel;
use crate::text::{load_font, TextMeasure};
use crate::theme::Theme;

pub struct Renderer {
    font: Option<fontdue::Font>,
}

impl Renderer {
    /// Without a font the text glyphs draw nothing.
    pub fn new(font: Option<fontdue::Font>) -> Self {
        Renderer { font }
    }

    pub fn from_theme(theme: &Theme) -> Self {
        let font = theme.font_path.as_deref().and_then(|path| match load_font(path) {
            Ok(font) => {
                log::info!("loaded font {}", path.display());
                Some(font)
            }
            Err(e) => {
                log::warn!("{e}, text glyphs disabled");
                None
            }
        });
        Renderer::new(font)
    }

    pub fn font(&self) -> Option<&fontdue::Font> {
        self.font.as_ref()
    }

    /// Paint a panel onto a fresh pixmap cleared to its background color.
    /// `None` for a zero-sized panel.
    pub fn render_panel(&self, panel: &DrawnPanel) -> Option<Pixmap> {
        let (w, h) = panel.size();
        let mut pixmap = Pixmap::new(w, h)?;
        let back = panel.back_color();
        pixmap.fill(tiny_skia::Color::from_rgba8(back.r, back.g, back.b, back.a));

        let measure = self.font.as_ref().map(|f| f as &dyn TextMeasure);
        self.execute(&mut pixmap, &panel.paint(measure));
        Some(pixmap)
    }

    pub fn execute(&self, pixmap: &mut Pixmap, cmds: &[DrawCommand]) {
        for cmd in cmds {
            match cmd {
                DrawCommand::Line { from, to, width, color } => draw_line(pixmap, *from, *to, *width, *color),
                DrawCommand::FillRect { rect, color, anti_alias } => fill_rect(pixmap, *rect, *color, *anti_alias),
                DrawCommand::Text { text, size, origin, color } => match &self.font {
                    Some(font) => rasterize_text(pixmap, text, font, *size, origin.x as f32, origin.y as f32, *color),
                    None => log::warn!("no font loaded, skipping text {text:?}"),
                },
                DrawCommand::Image { bitmap, remap, origin } => {
                    blit_bitmap(pixmap, bitmap, remap.as_deref(), *origin)
                }
            }
        }
    }
}

fn solid_paint(c: Color, anti_alias: bool) -> Paint<'static> {
    Paint {
        shader: Shader::SolidColor(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)),
        anti_alias,
        ..Paint::default()
    }
}

/// Stroke through pixel centres so integer endpoints land on whole pixels.
fn draw_line(pixmap: &mut Pixmap, from: Point, to: Point, width: f32, c: Color) {
    if c.a == 0 { return; }
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32 + 0.5, from.y as f32 + 0.5);
    pb.line_to(to.x as f32 + 0.5, to.y as f32 + 0.5);
    let Some(path) = pb.finish() else { return };
    let stroke = Stroke {
        width,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &solid_paint(c, true), &stroke, Transform::identity(), None);
}

fn fill_rect(pixmap: &mut Pixmap, r: Rect, c: Color, anti_alias: bool) {
    if c.a == 0 { return; }
    let Some(rect) = tiny_skia::Rect::from_xywh(r.x as f32, r.y as f32, r.w as f32, r.h as f32) else {
        return;
    };
    pixmap.fill_rect(rect, &solid_paint(c, anti_alias), Transform::identity(), None);
}

/// Source-over of one straight-alpha pixel into premultiplied RGBA data.
fn blend_pixel(data: &mut [u8], idx: usize, c: Color, alpha: u8) {
    let a = alpha as u32;
    let inv = 255 - a;
    data[idx] = ((c.r as u32 * a + data[idx] as u32 * inv) / 255) as u8;
    data[idx + 1] = ((c.g as u32 * a + data[idx + 1] as u32 * inv) / 255) as u8;
    data[idx + 2] = ((c.b as u32 * a + data[idx + 2] as u32 * inv) / 255) as u8;
    data[idx + 3] = (a + data[idx + 3] as u32 * inv / 255).min(255) as u8;
}

/// Draw at natural size from `origin`, clipped, substituting colors through `remap`.
fn blit_bitmap(pixmap: &mut Pixmap, bitmap: &Bitmap, remap: Option<&ColorRemap>, origin: Point) {
    let pw = pixmap.width() as i32;
    let ph = pixmap.height() as i32;
    let data = pixmap.data_mut();

    for sy in 0..bitmap.height {
        for sx in 0..bitmap.width {
            let px = origin.x + sx as i32;
            let py = origin.y + sy as i32;
            if px < 0 || py < 0 || px >= pw || py >= ph { continue; }
            let Some(src) = bitmap.pixel(sx, sy) else { continue };
            let c = remap.map_or(src, |r| r.remap(src));
            if c.a == 0 { continue; }
            let idx = ((py * pw + px) * 4) as usize;
            blend_pixel(data, idx, c, c.a);
        }
    }
}

/// Rasterize text with y = top of text em-box (not baseline).
fn rasterize_text(pixmap: &mut Pixmap, text: &str, font: &fontdue::Font, size: f32, x: f32, y: f32, c: Color) {
    if c.a == 0 { return; }
    let pw = pixmap.width() as i32;
    let ph = pixmap.height() as i32;
    let data = pixmap.data_mut();

    let ascent = font.horizontal_line_metrics(size)
        .map(|lm| lm.ascent)
        .unwrap_or(size * 0.8);
    let baseline_y = y + ascent;

    let mut cursor_x = x;
    for ch in text.chars() {
        let (metrics, bitmap) = font.rasterize(ch, size);
        let gx = cursor_x as i32 + metrics.xmin;
        let gy = baseline_y as i32 - metrics.ymin - metrics.height as i32;

        for row in 0..metrics.height {
            for col in 0..metrics.width {
                let px = gx + col as i32;
                let py = gy + row as i32;
                if px < 0 || py < 0 || px >= pw || py >= ph { continue; }
                let coverage = bitmap[row * metrics.width + col];
                if coverage == 0 { continue; }
                let alpha = ((coverage as u32 * c.a as u32) / 255) as u8;
                let idx = ((py * pw + px) * 4) as usize;
                blend_pixel(data, idx, c, alpha);
            }
        }
        cursor_x += metrics.advance_width;
    }
}

pub fn pixmap_to_argb(pixmap: &Pixmap) -> Vec<u32> {
    let data = pixmap.data();
    let mut argb = Vec::with_capacity(data.len() / 4);
    for chunk in data.chunks_exact(4) {
        argb.push((chunk[3] as u32) << 24 | (chunk[0] as u32) << 16 | (chunk[1] as u32) << 8 | chunk[2] as u32);
    }
    argb
}

/// Straight-alpha RGBA, ready for PNG encoding.
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::ColorMap;
    use crate::glyph::Glyph;
    use std::rc::Rc;

    fn rgb_at(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap().demultiply();
        (p.red(), p.green(), p.blue())
    }

    #[test]
    fn close_strokes_cross_the_panel() {
        let mut panel = DrawnPanel::new(24, 24);
        panel.set_margin(0);
        let pixmap = Renderer::new(None).render_panel(&panel).unwrap();

        let (r, g, b) = rgb_at(&pixmap, 10, 10);
        assert!(r < 64 && g < 64 && b < 64, "diagonal should be near black, got {:?}", (r, g, b));
        assert_eq!(rgb_at(&pixmap, 0, 23), (240, 240, 240));
    }

    #[test]
    fn game_glyph_a_fills_the_inset() {
        let mut panel = DrawnPanel::new(24, 24);
        panel.set_glyph(Glyph::GameGlyphA);
        panel.set_margin(4);
        let pixmap = Renderer::new(None).render_panel(&panel).unwrap();

        assert_eq!(rgb_at(&pixmap, 5, 5), (0, 0, 0));
        assert_eq!(rgb_at(&pixmap, 2, 2), (240, 240, 240));
    }

    #[test]
    fn image_is_remapped_at_natural_size() {
        let mut panel = DrawnPanel::new(4, 4);
        panel.set_glyph(Glyph::None);
        let black = vec![0, 0, 0, 255].repeat(4);
        panel.set_background(Some(Rc::new(Bitmap::from_rgba(black, 2, 2).unwrap())));
        panel.set_remap_table(vec![ColorMap { old: Color::BLACK, new: Color::rgb(255, 0, 0) }]);
        let pixmap = Renderer::new(None).render_panel(&panel).unwrap();

        assert_eq!(rgb_at(&pixmap, 0, 0), (255, 0, 0));
        assert_eq!(rgb_at(&pixmap, 1, 1), (255, 0, 0));
        assert_eq!(rgb_at(&pixmap, 2, 2), (240, 240, 240));
    }

    #[test]
    fn zero_sized_panel_renders_nothing() {
        let panel = DrawnPanel::new(0, 10);
        assert!(Renderer::new(None).render_panel(&panel).is_none());
    }

    #[test]
    fn argb_and_rgba_conversions_agree() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(10, 20, 30, 255));
        assert_eq!(pixmap_to_argb(&pixmap), vec![0xFF0A141E]);
        assert_eq!(pixmap_to_rgba(&pixmap), vec![10, 20, 30, 255]);
    }
}
