//! Integer pixel geometry shared by every glyph.

/// Inset around a glyph.
///
/// The integer form used in config is `0` = auto, negative = none, positive = literal pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarginPolicy {
    /// One sixth of the panel height.
    Auto,
    None,
    Fixed(u32),
}

impl Default for MarginPolicy {
    fn default() -> Self {
        MarginPolicy::Fixed(4)
    }
}

impl From<i32> for MarginPolicy {
    fn from(v: i32) -> Self {
        match v {
            0 => MarginPolicy::Auto,
            v if v < 0 => MarginPolicy::None,
            v => MarginPolicy::Fixed(v as u32),
        }
    }
}

impl MarginPolicy {
    pub fn resolve(self, height: u32) -> i32 {
        match self {
            MarginPolicy::Auto => (height / 6) as i32,
            MarginPolicy::None => 0,
            MarginPolicy::Fixed(k) => k as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Anchor coordinates derived from the client size and resolved margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub margin: i32,
    pub right: i32,
    pub bottom: i32,
    pub centre_h: i32,
    pub centre_v: i32,
    pub left_margin: i32,
    pub right_margin: i32,
    pub top_margin: i32,
    pub bottom_margin: i32,
}

impl Layout {
    pub fn new(width: u32, height: u32, margin: MarginPolicy) -> Self {
        let m = margin.resolve(height);
        let width = width as i32;
        let height = height as i32;
        let right = width - 1;
        let bottom = height - 1;
        Layout {
            width,
            height,
            margin: m,
            right,
            bottom,
            centre_h: right / 2,
            centre_v: bottom / 2,
            left_margin: m,
            right_margin: right - m,
            top_margin: m,
            bottom_margin: bottom - m,
        }
    }

    /// The margin-inset rectangle.
    pub fn inset(&self) -> Rect {
        Rect {
            x: self.left_margin,
            y: self.top_margin,
            w: self.width - 2 * self.margin,
            h: self.height - 2 * self.margin,
        }
    }
}
