//! Background bitmaps and the color substitution table applied when compositing them.

use std::path::Path;

use crate::color::Color;

/// Straight-alpha RGBA pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl Bitmap {
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, String> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(format!("bitmap {width}x{height} needs {expected} bytes, got {}", rgba.len()));
        }
        Ok(Bitmap { rgba, width, height })
    }

    /// Load a PNG, or an SVG rasterized at its natural size.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        let bitmap = if is_svg {
            Self::from_svg_bytes(&data)
        } else {
            Self::from_png_bytes(&data)
        }
        .map_err(|e| format!("{}: {e}", path.display()))?;
        log::info!("loaded bitmap {} ({}x{})", path.display(), bitmap.width, bitmap.height);
        Ok(bitmap)
    }

    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, String> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(bytes));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(|e| format!("png header: {e}"))?;
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(|e| format!("png data: {e}"))?;
        if info.bit_depth != png::BitDepth::Eight {
            return Err(format!("unsupported png bit depth {:?}", info.bit_depth));
        }

        let pixels = (info.width * info.height) as usize;
        let src = &buf[..info.buffer_size()];
        let rgba = match info.color_type {
            png::ColorType::Rgba => src.to_vec(),
            png::ColorType::Rgb => {
                let mut out = Vec::with_capacity(pixels * 4);
                for px in src.chunks_exact(3) {
                    out.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
                out
            }
            png::ColorType::GrayscaleAlpha => {
                let mut out = Vec::with_capacity(pixels * 4);
                for px in src.chunks_exact(2) {
                    out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
                }
                out
            }
            png::ColorType::Grayscale => {
                let mut out = Vec::with_capacity(pixels * 4);
                for &v in src {
                    out.extend_from_slice(&[v, v, v, 255]);
                }
                out
            }
            other => return Err(format!("unsupported png color type {other:?}")),
        };
        Self::from_rgba(rgba, info.width, info.height)
    }

    pub fn from_svg_bytes(bytes: &[u8]) -> Result<Self, String> {
        let opts = resvg::usvg::Options::default();
        let tree = resvg::usvg::Tree::from_data(bytes, &opts).map_err(|e| format!("svg: {e}"))?;
        let size = tree.size().to_int_size();
        let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
            .ok_or_else(|| format!("svg has empty size {}x{}", size.width(), size.height()))?;
        resvg::render(&tree, resvg::tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        // tiny-skia stores premultiplied pixels
        let rgba = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Self::from_rgba(rgba, size.width(), size.height())
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        Some(Color::rgba(self.rgba[i], self.rgba[i + 1], self.rgba[i + 2], self.rgba[i + 3]))
    }
}

/// One substitution: pixels exactly matching `old` are drawn as `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorMap {
    pub old: Color,
    pub new: Color,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorRemap {
    maps: Vec<ColorMap>,
}

impl ColorRemap {
    pub fn new(maps: Vec<ColorMap>) -> Self {
        ColorRemap { maps }
    }

    pub fn maps(&self) -> &[ColorMap] {
        &self.maps
    }

    /// First matching entry wins; unmatched colors pass through.
    pub fn remap(&self, c: Color) -> Color {
        self.maps.iter().find(|m| m.old == c).map_or(c, |m| m.new)
    }
}
