//! Drawn panel widget: interaction state machine plus paint.
//!
//! The host toolkit forwards mouse enter/leave/down/up and polls
//! [`DrawnPanel::is_dirty`] to schedule a repaint, then calls
//! [`DrawnPanel::paint`] and hands the commands to a backend.

use std::rc::Rc;

use crate::bitmap::{Bitmap, ColorMap, ColorRemap};
use crate::color::{average, Color};
use crate::glyph::{render_glyph, DrawCommand, Glyph, GlyphContext};
use crate::layout::{Layout, MarginPolicy, Point};
use crate::text::TextMeasure;

/// Weight of the foreground when dimming a disabled panel.
const DISABLED_FORE_WEIGHT: f32 = 0.25;
const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Effective interaction state, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Captured,
    Pressed,
    Hovered,
    Idle,
}

#[derive(Debug)]
pub struct DrawnPanel {
    glyph: Glyph,
    background: Option<Rc<Bitmap>>,
    remap: Option<Rc<ColorRemap>>,
    text: Option<String>,
    margin: MarginPolicy,
    fore: Color,
    back: Color,
    hover_color: Color,
    selected_color: Color,
    font_size: f32,
    width: u32,
    height: u32,
    enabled: bool,
    themed: bool,
    hovered: bool,
    pressed: bool,
    captured: bool,
    dirty: bool,
}

impl Default for DrawnPanel {
    fn default() -> Self {
        DrawnPanel::new(24, 24)
    }
}

impl DrawnPanel {
    pub fn new(width: u32, height: u32) -> Self {
        DrawnPanel {
            glyph: Glyph::Close,
            background: None,
            remap: None,
            text: None,
            margin: MarginPolicy::default(),
            fore: Color::BLACK,
            back: Color::CONTROL,
            hover_color: Color::WHITE,
            selected_color: Color::GREEN,
            font_size: DEFAULT_FONT_SIZE,
            width,
            height,
            enabled: true,
            themed: true,
            hovered: false,
            pressed: false,
            captured: false,
            dirty: true,
        }
    }

    /// A panel the theme pass leaves alone. Otherwise identical.
    pub fn no_theme(width: u32, height: u32) -> Self {
        DrawnPanel { themed: false, ..DrawnPanel::new(width, height) }
    }

    // ── Mouse ───────────────────────────────────────────────

    /// Enter starts a new interaction, so any press or capture is over.
    pub fn mouse_enter(&mut self) {
        self.hovered = true;
        self.pressed = false;
        self.captured = false;
        log::debug!("panel {:?}: mouse enter", self.glyph);
        self.invalidate();
    }

    pub fn mouse_leave(&mut self) {
        self.hovered = false;
        self.pressed = false;
        log::debug!("panel {:?}: mouse leave", self.glyph);
        self.invalidate();
    }

    pub fn mouse_down(&mut self) {
        self.pressed = true;
        log::debug!("panel {:?}: mouse down", self.glyph);
        self.invalidate();
    }

    pub fn mouse_up(&mut self) {
        self.pressed = false;
        log::debug!("panel {:?}: mouse up", self.glyph);
        self.invalidate();
    }

    /// Show the pressed look while a host drag/move runs on this panel.
    pub fn captured(&mut self) {
        self.captured = true;
        log::debug!("panel {:?}: captured", self.glyph);
        self.invalidate();
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn interaction(&self) -> InteractionState {
        if self.captured {
            InteractionState::Captured
        } else if self.pressed {
            InteractionState::Pressed
        } else if self.hovered {
            InteractionState::Hovered
        } else {
            InteractionState::Idle
        }
    }

    /// Color for this paint. Disabled wins over every interaction flag.
    pub fn draw_color(&self) -> Color {
        if !self.enabled {
            average(self.fore, self.back, DISABLED_FORE_WEIGHT)
        } else if self.pressed || self.captured {
            self.selected_color
        } else if self.hovered {
            self.hover_color
        } else {
            self.fore
        }
    }

    // ── Repaint requests ────────────────────────────────────

    fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    // ── Paint ───────────────────────────────────────────────

    /// Background image first, then the glyph.
    ///
    /// `measure` is only consulted by the text glyphs; without it they draw nothing.
    pub fn paint(&self, measure: Option<&dyn TextMeasure>) -> Vec<DrawCommand> {
        let mut cmds = Vec::new();
        if let Some(bitmap) = &self.background {
            cmds.push(DrawCommand::Image {
                bitmap: Rc::clone(bitmap),
                remap: self.remap.clone(),
                origin: Point::new(0, 0),
            });
        }

        let ctx = GlyphContext {
            layout: self.layout(),
            color: self.draw_color(),
            fore: self.fore,
            back: self.back,
            text: self.text.as_deref(),
            font_size: self.font_size,
            measure,
        };
        cmds.extend(render_glyph(self.glyph, &ctx));
        cmds
    }

    pub fn layout(&self) -> Layout {
        Layout::new(self.width, self.height, self.margin)
    }

    // ── Properties ──────────────────────────────────────────

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn set_glyph(&mut self, glyph: Glyph) {
        self.glyph = glyph;
        self.invalidate();
    }

    pub fn set_background(&mut self, bitmap: Option<Rc<Bitmap>>) {
        self.background = bitmap;
        self.invalidate();
    }

    pub fn background(&self) -> Option<&Rc<Bitmap>> {
        self.background.as_ref()
    }

    /// Share an existing remap table.
    pub fn set_remap(&mut self, remap: Option<Rc<ColorRemap>>) {
        self.remap = remap;
        self.invalidate();
    }

    /// Build and install a table owned by this panel.
    pub fn set_remap_table(&mut self, maps: Vec<ColorMap>) {
        self.set_remap(Some(Rc::new(ColorRemap::new(maps))));
    }

    pub fn remap(&self) -> Option<&Rc<ColorRemap>> {
        self.remap.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
        self.invalidate();
    }

    pub fn margin(&self) -> MarginPolicy {
        self.margin
    }

    pub fn set_margin(&mut self, margin: impl Into<MarginPolicy>) {
        self.margin = margin.into();
        self.invalidate();
    }

    pub fn fore_color(&self) -> Color {
        self.fore
    }

    pub fn set_fore_color(&mut self, c: Color) {
        self.fore = c;
        self.invalidate();
    }

    pub fn back_color(&self) -> Color {
        self.back
    }

    pub fn set_back_color(&mut self, c: Color) {
        self.back = c;
        self.invalidate();
    }

    pub fn hover_color(&self) -> Color {
        self.hover_color
    }

    pub fn set_hover_color(&mut self, c: Color) {
        self.hover_color = c;
        self.invalidate();
    }

    pub fn selected_color(&self) -> Color {
        self.selected_color
    }

    pub fn set_selected_color(&mut self, c: Color) {
        self.selected_color = c;
        self.invalidate();
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
        self.invalidate();
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.invalidate();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.invalidate();
    }

    pub fn is_themed(&self) -> bool {
        self.themed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedMeasure;

    fn panel() -> DrawnPanel {
        let mut p = DrawnPanel::new(100, 60);
        p.set_fore_color(Color::BLACK);
        p.set_back_color(Color::WHITE);
        p.set_hover_color(Color::rgb(0, 0, 255));
        p.set_selected_color(Color::rgb(255, 0, 0));
        p.clear_dirty();
        p
    }

    #[test]
    fn hover_press_release_leave() {
        let mut p = panel();
        assert_eq!(p.interaction(), InteractionState::Idle);
        assert_eq!(p.draw_color(), Color::BLACK);

        p.mouse_enter();
        assert_eq!(p.interaction(), InteractionState::Hovered);
        assert_eq!(p.draw_color(), Color::rgb(0, 0, 255));

        p.mouse_down();
        assert_eq!(p.interaction(), InteractionState::Pressed);
        assert_eq!(p.draw_color(), Color::rgb(255, 0, 0));

        p.mouse_up();
        assert_eq!(p.interaction(), InteractionState::Hovered);

        p.mouse_leave();
        assert_eq!(p.interaction(), InteractionState::Idle);
    }

    #[test]
    fn leave_while_pressed_drops_press() {
        let mut p = panel();
        p.mouse_enter();
        p.mouse_down();
        p.mouse_leave();
        assert_eq!(p.interaction(), InteractionState::Idle);
    }

    #[test]
    fn enter_clears_capture_and_press() {
        let mut p = panel();
        p.mouse_down();
        p.captured();
        assert!(p.is_captured());
        assert_eq!(p.draw_color(), Color::rgb(255, 0, 0));

        p.mouse_enter();
        assert!(!p.is_captured());
        assert_eq!(p.interaction(), InteractionState::Hovered);
    }

    #[test]
    fn capture_survives_leave() {
        let mut p = panel();
        p.captured();
        p.mouse_leave();
        assert_eq!(p.interaction(), InteractionState::Captured);
        assert_eq!(p.draw_color(), Color::rgb(255, 0, 0));
    }

    #[test]
    fn disabled_color_ignores_interaction() {
        let mut p = panel();
        p.set_enabled(false);
        let dimmed = Color::rgb(191, 191, 191);
        assert_eq!(p.draw_color(), dimmed);
        p.mouse_enter();
        assert_eq!(p.draw_color(), dimmed);
        p.mouse_down();
        assert_eq!(p.draw_color(), dimmed);
        p.captured();
        assert_eq!(p.draw_color(), dimmed);
    }

    #[test]
    fn every_transition_requests_repaint() {
        let mut p = panel();
        let steps: [fn(&mut DrawnPanel); 5] = [
            DrawnPanel::mouse_enter,
            DrawnPanel::mouse_down,
            DrawnPanel::mouse_up,
            DrawnPanel::mouse_leave,
            DrawnPanel::captured,
        ];
        for step in steps {
            assert!(!p.is_dirty());
            step(&mut p);
            assert!(p.is_dirty());
            p.clear_dirty();
        }
    }

    #[test]
    fn close_scenario() {
        let mut p = panel();
        p.set_glyph(Glyph::Close);
        p.set_margin(0);
        let cmds = p.paint(None);
        assert_eq!(
            cmds,
            vec![
                DrawCommand::Line { from: Point::new(10, 10), to: Point::new(89, 49), width: 2.0, color: Color::BLACK },
                DrawCommand::Line { from: Point::new(10, 49), to: Point::new(89, 10), width: 2.0, color: Color::BLACK },
            ]
        );
    }

    #[test]
    fn background_composites_under_glyph_with_remap() {
        let mut p = panel();
        let bitmap = Rc::new(Bitmap::from_rgba(vec![0, 0, 0, 255], 1, 1).unwrap());
        p.set_background(Some(Rc::clone(&bitmap)));
        p.set_remap_table(vec![ColorMap { old: Color::BLACK, new: Color::WHITE }]);
        p.set_glyph(Glyph::Minimize);

        let cmds = p.paint(None);
        assert_eq!(cmds.len(), 2);
        match &cmds[0] {
            DrawCommand::Image { bitmap: b, remap, origin } => {
                assert!(Rc::ptr_eq(b, &bitmap));
                assert_eq!(remap.as_ref().map(|r| r.maps().len()), Some(1));
                assert_eq!(*origin, Point::new(0, 0));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(cmds[1], DrawCommand::Line { .. }));
    }

    #[test]
    fn none_glyph_only_draws_background() {
        let mut p = panel();
        p.set_glyph(Glyph::None);
        assert!(p.paint(None).is_empty());
        p.set_background(Some(Rc::new(Bitmap::from_rgba(vec![0; 4], 1, 1).unwrap())));
        let cmds = p.paint(None);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], DrawCommand::Image { remap: None, .. }));
    }

    #[test]
    fn text_uses_fore_not_state_color() {
        let mut p = panel();
        p.set_glyph(Glyph::Text);
        p.set_text(Some("SRV".into()));
        p.mouse_enter();
        let cmds = p.paint(Some(&FixedMeasure));
        assert!(matches!(&cmds[0], DrawCommand::Text { color, .. } if *color == Color::BLACK));
    }

    #[test]
    fn no_theme_marker_only_changes_theming() {
        let a = DrawnPanel::new(16, 16);
        let b = DrawnPanel::no_theme(16, 16);
        assert!(a.is_themed());
        assert!(!b.is_themed());
        assert_eq!(a.paint(None), b.paint(None));
    }
}
