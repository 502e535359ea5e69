//! TOML configuration: theme plus a list of panels to build.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{info, warn};

use crate::bitmap::{Bitmap, ColorMap};
use crate::color::Color;
use crate::glyph::Glyph;
use crate::panel::DrawnPanel;
use crate::theme::Theme;

#[derive(Debug, Deserialize)]
pub struct PanelsConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub panels: Vec<PanelConfig>,
    /// Directory relative asset paths resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_fore")]
    pub fore: String,
    #[serde(default = "default_back")]
    pub back: String,
    #[serde(default = "default_mouse_over")]
    pub mouse_over: String,
    #[serde(default = "default_mouse_selected")]
    pub mouse_selected: String,
    pub font: Option<String>,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            fore: default_fore(),
            back: default_back(),
            mouse_over: default_mouse_over(),
            mouse_selected: default_mouse_selected(),
            font: None,
            font_size: default_font_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    pub id: String,
    #[serde(default = "default_glyph")]
    pub glyph: String,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    /// 0 = auto (height / 6), negative = none, positive = pixels.
    #[serde(default = "default_margin")]
    pub margin: i32,
    pub text: Option<String>,
    /// Background image (PNG or SVG).
    pub image: Option<String>,
    #[serde(default)]
    pub remap: Vec<RemapEntry>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// false opts the panel out of theming.
    #[serde(default = "default_true")]
    pub themed: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemapEntry {
    pub from: String,
    pub to: String,
}

fn default_fore() -> String { "000000".into() }
fn default_back() -> String { "F0F0F0".into() }
fn default_mouse_over() -> String { "FFFFFF".into() }
fn default_mouse_selected() -> String { "008000".into() }
fn default_font_size() -> f32 { 12.0 }
fn default_glyph() -> String { "close".into() }
fn default_size() -> u32 { 24 }
fn default_margin() -> i32 { 4 }
fn default_true() -> bool { true }

impl PanelsConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        let mut config: PanelsConfig =
            toml::from_str(&content).map_err(|e| format!("parse {}: {e}", path.display()))?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    /// Load config with fallback chain:
    /// 1. $DRAWN_PANEL_CONFIG env var
    /// 2. ./panels.toml
    /// 3. Built-in defaults
    pub fn find_and_load() -> Self {
        let candidates: Vec<PathBuf> = vec![
            std::env::var("DRAWN_PANEL_CONFIG").ok().map(PathBuf::from),
            Some(PathBuf::from("panels.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        for path in &candidates {
            if path.exists() {
                match Self::load(path) {
                    Ok(config) => {
                        info!("Loaded panel config from {}", path.display());
                        return config;
                    }
                    Err(e) => warn!("Failed to load {}: {e}", path.display()),
                }
            }
        }

        info!("Using built-in default panel config");
        Self::builtin_default()
    }

    pub fn builtin_default() -> Self {
        let panel = |id: &str, glyph: &str, width: u32, height: u32, margin: i32, text: Option<&str>| PanelConfig {
            id: id.into(),
            glyph: glyph.into(),
            width,
            height,
            margin,
            text: text.map(String::from),
            image: None,
            remap: Vec::new(),
            enabled: true,
            themed: true,
        };
        PanelsConfig {
            theme: ThemeConfig::default(),
            panels: vec![
                panel("close", "close", 24, 24, 0, None),
                panel("minimize", "minimize", 24, 24, 0, None),
                panel("gripper", "gripper", 24, 24, 4, None),
                panel("eddb", "game_glyph_a", 24, 24, 3, None),
                panel("ross", "game_glyph_b", 24, 24, 3, None),
                panel("inverse", "inverse_text", 48, 24, 2, Some("SRV")),
                panel("move", "move", 32, 32, 4, None),
                panel("label", "text", 48, 24, 2, Some("SRV")),
                panel("blank", "none", 24, 24, 4, None),
            ],
            base_dir: PathBuf::new(),
        }
    }
}

impl PanelConfig {
    /// Build a themed panel. Bad glyph names, colors and images are logged and skipped.
    pub fn build(&self, theme: &Theme, base_dir: &Path) -> DrawnPanel {
        let mut panel = if self.themed {
            DrawnPanel::new(self.width, self.height)
        } else {
            DrawnPanel::no_theme(self.width, self.height)
        };
        theme.apply(&mut panel);

        let glyph = Glyph::from_name(&self.glyph).unwrap_or_else(|| {
            warn!("panel {}: unknown glyph {:?}, using close", self.id, self.glyph);
            Glyph::Close
        });
        panel.set_glyph(glyph);
        panel.set_margin(self.margin);
        panel.set_text(self.text.clone());
        panel.set_enabled(self.enabled);

        if let Some(image) = &self.image {
            match Bitmap::load(&base_dir.join(image)) {
                Ok(bitmap) => panel.set_background(Some(Rc::new(bitmap))),
                Err(e) => warn!("panel {}: {e}", self.id),
            }
        }

        if !self.remap.is_empty() {
            let maps = self
                .remap
                .iter()
                .filter_map(|entry| match (Color::from_hex(&entry.from), Color::from_hex(&entry.to)) {
                    (Some(old), Some(new)) => Some(ColorMap { old, new }),
                    _ => {
                        warn!("panel {}: bad remap {} -> {}", self.id, entry.from, entry.to);
                        None
                    }
                })
                .collect();
            panel.set_remap_table(maps);
        }

        panel
    }
}
