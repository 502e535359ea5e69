//! Procedural glyphs.
//!
//! Each glyph is a pure function from a [`GlyphContext`] to a list of
//! [`DrawCommand`]s. Nothing here touches pixels; a backend such as
//! [`crate::renderer::Renderer`] executes the commands.

use std::rc::Rc;

use crate::bitmap::{Bitmap, ColorRemap};
use crate::color::Color;
use crate::layout::{Layout, Point, Rect};
use crate::text::{fit_text, TextMeasure};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Glyph {
    Close,
    Minimize,
    Gripper,
    /// Filled block with a letter carved out in the background color.
    GameGlyphA,
    /// Two heavy strokes forming a hooked corner.
    GameGlyphB,
    InverseText,
    Move,
    Text,
    None,
}

impl Glyph {
    pub const ALL: [Glyph; 9] = [
        Glyph::Close,
        Glyph::Minimize,
        Glyph::Gripper,
        Glyph::GameGlyphA,
        Glyph::GameGlyphB,
        Glyph::InverseText,
        Glyph::Move,
        Glyph::Text,
        Glyph::None,
    ];

    /// Parse from config name (case-insensitive).
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "close" => Some(Glyph::Close),
            "minimize" | "minimise" => Some(Glyph::Minimize),
            "gripper" => Some(Glyph::Gripper),
            "game_glyph_a" | "eddb" => Some(Glyph::GameGlyphA),
            "game_glyph_b" | "ross" => Some(Glyph::GameGlyphB),
            "inverse_text" => Some(Glyph::InverseText),
            "move" => Some(Glyph::Move),
            "text" => Some(Glyph::Text),
            "none" => Some(Glyph::None),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Glyph::Close => "close",
            Glyph::Minimize => "minimize",
            Glyph::Gripper => "gripper",
            Glyph::GameGlyphA => "game_glyph_a",
            Glyph::GameGlyphB => "game_glyph_b",
            Glyph::InverseText => "inverse_text",
            Glyph::Move => "move",
            Glyph::Text => "text",
            Glyph::None => "none",
        }
    }

    /// Drawing routine for this glyph. `None` draws nothing.
    pub fn painter(self) -> Option<GlyphPainter> {
        match self {
            Glyph::Close => Some(paint_close),
            Glyph::Minimize => Some(paint_minimize),
            Glyph::Gripper => Some(paint_gripper),
            Glyph::GameGlyphA => Some(paint_game_glyph_a),
            Glyph::GameGlyphB => Some(paint_game_glyph_b),
            Glyph::InverseText => Some(paint_inverse_text),
            Glyph::Move => Some(paint_move),
            Glyph::Text => Some(paint_text),
            Glyph::None => None,
        }
    }
}

/// One primitive for a drawing backend. Lines are always antialiased.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line { from: Point, to: Point, width: f32, color: Color },
    FillRect { rect: Rect, color: Color, anti_alias: bool },
    /// `origin` is the top of the em-box.
    Text { text: String, size: f32, origin: Point, color: Color },
    /// Drawn at natural size.
    Image { bitmap: Rc<Bitmap>, remap: Option<Rc<ColorRemap>>, origin: Point },
}

/// Everything a glyph needs for one paint.
pub struct GlyphContext<'a> {
    pub layout: Layout,
    /// State color picked for this paint.
    pub color: Color,
    pub fore: Color,
    pub back: Color,
    pub text: Option<&'a str>,
    pub font_size: f32,
    pub measure: Option<&'a dyn TextMeasure>,
}

pub type GlyphPainter = fn(&GlyphContext<'_>, &mut Vec<DrawCommand>);

pub fn render_glyph(glyph: Glyph, ctx: &GlyphContext<'_>) -> Vec<DrawCommand> {
    let mut out = Vec::new();
    if let Some(paint) = glyph.painter() {
        paint(ctx, &mut out);
    }
    out
}

const THIN: f32 = 1.0;
const THICK: f32 = 2.0;
const HEAVY: f32 = 3.0;

fn line(out: &mut Vec<DrawCommand>, from: (i32, i32), to: (i32, i32), width: f32, color: Color) {
    out.push(DrawCommand::Line {
        from: Point::new(from.0, from.1),
        to: Point::new(to.0, to.1),
        width,
        color,
    });
}

fn paint_close(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    line(out, (l.left_margin, l.top_margin), (l.right_margin, l.bottom_margin), THICK, ctx.color);
    line(out, (l.left_margin, l.bottom_margin), (l.right_margin, l.top_margin), THICK, ctx.color);
}

fn paint_minimize(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    line(out, (l.left_margin, l.bottom_margin), (l.right_margin, l.bottom_margin), THICK, ctx.color);
}

fn paint_gripper(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    for i in 0..3 {
        let step = i * l.margin;
        line(out, (l.right_margin - step, l.bottom), (l.right, l.bottom_margin - step), THIN, ctx.color);
    }
}

fn paint_game_glyph_a(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    let m = l.margin;
    out.push(DrawCommand::FillRect { rect: l.inset(), color: ctx.color, anti_alias: true });

    let stem_x = l.centre_h - 1;
    let base_y = l.bottom_margin - m;
    let top_y = l.top_margin + m;
    line(out, (l.right_margin, base_y), (stem_x, base_y), THICK, ctx.back);
    line(out, (stem_x, base_y), (stem_x, top_y), THICK, ctx.back);
    line(out, (stem_x - m, top_y + 2), (stem_x + m, top_y + 2), THICK, ctx.back);
}

fn paint_game_glyph_b(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    let x = l.left_margin + 2;
    let y = l.top_margin + 4;
    line(out, (x, l.bottom_margin), (x, y), HEAVY, ctx.color);
    line(out, (x, y), (l.centre_h + 2, y), HEAVY, ctx.color);
}

/// Text scaled to fill the height between the margins, centred horizontally.
fn push_fitted_text(ctx: &GlyphContext<'_>, color: Color, out: &mut Vec<DrawCommand>) {
    let (Some(text), Some(measure)) = (ctx.text, ctx.measure) else {
        return;
    };
    let l = &ctx.layout;
    let available = (l.height - l.top_margin * 2) as f32;
    let Some(fitted) = fit_text(measure, text, ctx.font_size, available) else {
        return;
    };
    out.push(DrawCommand::Text {
        text: text.to_string(),
        size: fitted.size,
        origin: Point::new(l.centre_h - (fitted.extent.width / 2.0) as i32, l.top_margin),
        color,
    });
}

fn paint_inverse_text(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    if ctx.text.map_or(true, str::is_empty) || ctx.measure.is_none() {
        return;
    }
    // hard edges, the text sits on it
    out.push(DrawCommand::FillRect { rect: ctx.layout.inset(), color: ctx.color, anti_alias: false });
    push_fitted_text(ctx, ctx.back, out);
}

fn paint_text(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    push_fitted_text(ctx, ctx.fore, out);
}

fn paint_move(ctx: &GlyphContext<'_>, out: &mut Vec<DrawCommand>) {
    let l = &ctx.layout;
    let c = ctx.color;
    let ch = l.centre_h + 1;
    let cv = l.centre_v + 1;
    let o = l.width / 8;

    line(out, (ch, l.bottom), (ch, l.top_margin), THICK, c);
    line(out, (ch - o, l.bottom - o), (ch, l.bottom), THIN, c);
    line(out, (ch + o, l.bottom - o), (ch, l.bottom), THIN, c);
    line(out, (ch - o, l.top_margin + o), (ch, l.top_margin), THIN, c);
    line(out, (ch + o, l.top_margin + o), (ch, l.top_margin), THIN, c);

    line(out, (l.left_margin, cv), (l.right_margin, cv), THICK, c);
    line(out, (l.left_margin + o, cv - o), (l.left_margin, cv), THIN, c);
    line(out, (l.left_margin + o, cv + o), (l.left_margin, cv), THIN, c);
    line(out, (l.right_margin - o, cv - o), (l.right_margin, cv), THIN, c);
    line(out, (l.right_margin - o, cv + o), (l.right_margin, cv), THIN, c);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::MarginPolicy;
    use crate::text::FixedMeasure;

    const PC: Color = Color::rgb(200, 0, 0);
    const FORE: Color = Color::BLACK;
    const BACK: Color = Color::WHITE;

    fn ctx<'a>(w: u32, h: u32, margin: MarginPolicy, text: Option<&'a str>) -> GlyphContext<'a> {
        GlyphContext {
            layout: Layout::new(w, h, margin),
            color: PC,
            fore: FORE,
            back: BACK,
            text,
            font_size: 10.0,
            measure: Some(&FixedMeasure),
        }
    }

    fn lines(cmds: &[DrawCommand]) -> Vec<((i32, i32), (i32, i32), f32)> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, width, .. } => Some(((from.x, from.y), (to.x, to.y), *width)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn names_round_trip_and_aliases() {
        for g in Glyph::ALL {
            assert_eq!(Glyph::from_name(g.name()), Some(g));
        }
        assert_eq!(Glyph::from_name("EDDB"), Some(Glyph::GameGlyphA));
        assert_eq!(Glyph::from_name("Ross"), Some(Glyph::GameGlyphB));
        assert_eq!(Glyph::from_name("sparkle"), None);
    }

    #[test]
    fn close_on_100_by_60_auto_margin() {
        let cmds = render_glyph(Glyph::Close, &ctx(100, 60, MarginPolicy::Auto, None));
        assert_eq!(
            lines(&cmds),
            vec![((10, 10), (89, 49), 2.0), ((10, 49), (89, 10), 2.0)]
        );
        assert!(cmds.iter().all(|c| matches!(c, DrawCommand::Line { color, .. } if *color == PC)));
    }

    #[test]
    fn minimize_runs_along_bottom_margin() {
        let cmds = render_glyph(Glyph::Minimize, &ctx(24, 24, MarginPolicy::Fixed(4), None));
        assert_eq!(lines(&cmds), vec![((4, 19), (19, 19), 2.0)]);
    }

    #[test]
    fn gripper_fans_from_bottom_right() {
        let cmds = render_glyph(Glyph::Gripper, &ctx(24, 24, MarginPolicy::Fixed(4), None));
        assert_eq!(
            lines(&cmds),
            vec![
                ((19, 23), (23, 19), 1.0),
                ((15, 23), (23, 15), 1.0),
                ((11, 23), (23, 11), 1.0),
            ]
        );
    }

    #[test]
    fn game_glyph_a_carves_background_strokes() {
        let cmds = render_glyph(Glyph::GameGlyphA, &ctx(24, 24, MarginPolicy::Fixed(4), None));
        assert_eq!(
            cmds[0],
            DrawCommand::FillRect { rect: Rect { x: 4, y: 4, w: 16, h: 16 }, color: PC, anti_alias: true }
        );
        assert_eq!(
            lines(&cmds),
            vec![
                ((19, 15), (10, 15), 2.0),
                ((10, 15), (10, 8), 2.0),
                ((6, 10), (14, 10), 2.0),
            ]
        );
        assert!(cmds[1..].iter().all(|c| matches!(c, DrawCommand::Line { color, .. } if *color == BACK)));
    }

    #[test]
    fn game_glyph_b_is_two_heavy_strokes() {
        let cmds = render_glyph(Glyph::GameGlyphB, &ctx(24, 24, MarginPolicy::Fixed(4), None));
        assert_eq!(lines(&cmds), vec![((6, 19), (6, 8), 3.0), ((6, 8), (13, 8), 3.0)]);
    }

    #[test]
    fn move_cross_has_two_shafts_and_eight_heads() {
        let cmds = render_glyph(Glyph::Move, &ctx(32, 32, MarginPolicy::Fixed(4), None));
        let ls = lines(&cmds);
        assert_eq!(ls.len(), 10);
        // centre 15 + 1, arrowhead offset 32 / 8
        assert_eq!(ls[0], ((16, 31), (16, 4), 2.0));
        assert_eq!(ls[1], ((12, 27), (16, 31), 1.0));
        assert_eq!(ls[5], ((4, 16), (27, 16), 2.0));
        assert_eq!(ls[9], ((23, 20), (27, 16), 1.0));
        assert_eq!(ls.iter().filter(|l| l.2 == 1.0).count(), 8);
    }

    #[test]
    fn text_fills_height_and_centres() {
        // available 40 - 2*5 = 30, natural height 12 -> scale 2.5 -> size 25, width 3*12.5
        let cmds = render_glyph(Glyph::Text, &ctx(100, 40, MarginPolicy::Fixed(5), Some("SRV")));
        assert_eq!(cmds.len(), 1);
        match &cmds[0] {
            DrawCommand::Text { text, size, origin, color } => {
                assert_eq!(text, "SRV");
                assert!((size - 25.0).abs() < 1e-3);
                assert_eq!(*origin, Point::new(49 - 18, 5));
                assert_eq!(*color, FORE);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn inverse_text_fills_then_draws_in_background() {
        let cmds = render_glyph(Glyph::InverseText, &ctx(100, 40, MarginPolicy::Fixed(5), Some("SRV")));
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[0],
            DrawCommand::FillRect { rect: Rect { x: 5, y: 5, w: 90, h: 30 }, color: PC, anti_alias: false }
        );
        assert!(matches!(&cmds[1], DrawCommand::Text { color, .. } if *color == BACK));
    }

    #[test]
    fn text_glyphs_skip_without_text_or_font() {
        assert!(render_glyph(Glyph::Text, &ctx(100, 40, MarginPolicy::Auto, None)).is_empty());
        assert!(render_glyph(Glyph::InverseText, &ctx(100, 40, MarginPolicy::Auto, Some(""))).is_empty());
        let mut no_font = ctx(100, 40, MarginPolicy::Auto, Some("SRV"));
        no_font.measure = None;
        assert!(render_glyph(Glyph::InverseText, &no_font).is_empty());
    }

    #[test]
    fn none_draws_nothing() {
        assert!(Glyph::None.painter().is_none());
        assert!(render_glyph(Glyph::None, &ctx(10, 10, MarginPolicy::Auto, Some("x"))).is_empty());
    }
}
