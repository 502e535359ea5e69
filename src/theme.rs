//! Theme colors and font, and the pass that pushes them into panels.

use std::path::PathBuf;

use crate::color::Color;
use crate::config::ThemeConfig;
use crate::panel::DrawnPanel;

#[derive(Debug, Clone)]
pub struct Theme {
    pub fore: Color,
    pub back: Color,
    pub mouse_over: Color,
    pub mouse_selected: Color,
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            fore: Color::BLACK,
            back: Color::CONTROL,
            mouse_over: Color::WHITE,
            mouse_selected: Color::GREEN,
            font_path: None,
            font_size: 12.0,
        }
    }
}

impl Theme {
    /// Unparseable colors fall back to the defaults with a warning.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        let defaults = Theme::default();
        let get_color = |key: &str, value: &str, default: Color| -> Color {
            Color::from_hex(value).unwrap_or_else(|| {
                log::warn!("theme {key}: bad color {value:?}, using {default}");
                default
            })
        };

        Theme {
            fore: get_color("fore", &cfg.fore, defaults.fore),
            back: get_color("back", &cfg.back, defaults.back),
            mouse_over: get_color("mouse_over", &cfg.mouse_over, defaults.mouse_over),
            mouse_selected: get_color("mouse_selected", &cfg.mouse_selected, defaults.mouse_selected),
            font_path: cfg.font.as_ref().map(PathBuf::from),
            font_size: cfg.font_size,
        }
    }

    /// Push theme colors into a panel. Panels built with [`DrawnPanel::no_theme`] are skipped.
    pub fn apply(&self, panel: &mut DrawnPanel) -> bool {
        if !panel.is_themed() {
            return false;
        }
        panel.set_fore_color(self.fore);
        panel.set_back_color(self.back);
        panel.set_hover_color(self.mouse_over);
        panel.set_selected_color(self.mouse_selected);
        panel.set_font_size(self.font_size);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark() -> Theme {
        Theme {
            fore: Color::rgb(255, 140, 0),
            back: Color::rgb(10, 10, 10),
            mouse_over: Color::rgb(255, 200, 0),
            mouse_selected: Color::rgb(0, 200, 255),
            font_path: None,
            font_size: 9.0,
        }
    }

    #[test]
    fn apply_sets_colors_on_themed_panel() {
        let mut p = DrawnPanel::new(20, 20);
        assert!(dark().apply(&mut p));
        assert_eq!(p.fore_color(), Color::rgb(255, 140, 0));
        assert_eq!(p.back_color(), Color::rgb(10, 10, 10));
        assert_eq!(p.hover_color(), Color::rgb(255, 200, 0));
        assert_eq!(p.selected_color(), Color::rgb(0, 200, 255));
        assert_eq!(p.font_size(), 9.0);
    }

    #[test]
    fn apply_skips_no_theme_panel() {
        let mut p = DrawnPanel::no_theme(20, 20);
        assert!(!dark().apply(&mut p));
        assert_eq!(p.fore_color(), Color::BLACK);
        assert_eq!(p.selected_color(), Color::GREEN);
    }

    #[test]
    fn bad_config_colors_fall_back() {
        let cfg = ThemeConfig { fore: "nope".into(), ..ThemeConfig::default() };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.fore, Color::BLACK);
        assert_eq!(theme.mouse_selected, Color::GREEN);
    }
}
