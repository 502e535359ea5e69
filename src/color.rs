//! RGBA color type and the channel arithmetic used for state colors.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    /// Default control face color.
    pub const CONTROL: Color = Color::rgb(240, 240, 240);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    pub fn as_argb_u32(&self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

/// Clamp into a channel. `as` saturates, so negatives land on 0.
fn limit(v: f32) -> u8 {
    if v > 255.0 { 255 } else { v as u8 }
}

/// Per-channel blend: `weight` of `c1` plus `1 - weight` of `c2`, alpha included.
pub fn average(c1: Color, c2: Color, weight: f32) -> Color {
    let inv = 1.0 - weight;
    let mix = |a: u8, b: u8| limit(a as f32 * weight + b as f32 * inv);
    Color {
        r: mix(c1.r, c2.r),
        g: mix(c1.g, c2.g),
        b: mix(c1.b, c2.b),
        a: mix(c1.a, c2.a),
    }
}

/// Scale the color channels by `factor`. Alpha is left alone.
pub fn multiply(color: Color, factor: f32) -> Color {
    Color {
        r: limit(color.r as f32 * factor),
        g: limit(color.g as f32 * factor),
        b: limit(color.b as f32 * factor),
        a: color.a,
    }
}
