//! Themed, procedurally drawn panel widget.
//!
//! [`panel::DrawnPanel`] holds the widget state and turns a paint request into
//! [`glyph::DrawCommand`]s; [`renderer::Renderer`] executes them with tiny-skia.

pub mod bitmap;
pub mod color;
pub mod config;
pub mod glyph;
pub mod layout;
pub mod panel;
pub mod renderer;
pub mod text;
pub mod theme;
