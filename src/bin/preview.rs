//! Local preview tool - renders every configured panel in each interaction
//! state to PNG files + atlas. No window system needed.
//!
//! Usage: cargo run --bin preview [-- --config PATH] [-- --scale N]
//!
//! Outputs:
//!   preview-output/<panel>-<state>.png   - one panel in one state
//!   preview-output/atlas.png             - rows of panels, columns of states

use std::path::{Path, PathBuf};

use drawn_panel::config::PanelsConfig;
use drawn_panel::panel::DrawnPanel;
use drawn_panel::renderer::{pixmap_to_rgba, Renderer};
use drawn_panel::theme::Theme;

const STATES: [&str; 5] = ["idle", "hover", "pressed", "captured", "disabled"];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match arg_value("--config") {
        Some(path) => PanelsConfig::load(Path::new(&path)).unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(1);
        }),
        None => PanelsConfig::find_and_load(),
    };
    let scale: u32 = arg_value("--scale").and_then(|s| s.parse().ok()).unwrap_or(4).max(1);

    let theme = Theme::from_config(&config.theme);
    let rend = Renderer::from_theme(&theme);
    if rend.font().is_none() {
        println!("no font configured, text panels will be blank");
    }

    let out = PathBuf::from("preview-output");
    if let Err(e) = std::fs::create_dir_all(&out) {
        eprintln!("create {}: {e}", out.display());
        std::process::exit(1);
    }

    // rows of (label, rgba, w, h), one row per panel
    let mut rows: Vec<Vec<(String, Vec<u8>, u32, u32)>> = Vec::new();

    for panel_cfg in &config.panels {
        let mut row = Vec::new();
        for state in STATES {
            let mut panel = panel_cfg.build(&theme, &config.base_dir);
            set_state(&mut panel, state);
            let Some(pixmap) = rend.render_panel(&panel) else {
                log::warn!("panel {} has zero size, skipped", panel_cfg.id);
                continue;
            };
            let (w, h) = (pixmap.width(), pixmap.height());
            let rgba = upscale(&pixmap_to_rgba(&pixmap), w, h, scale);
            let label = format!("{}-{}", panel_cfg.id, state);
            save_rgba_png(&out.join(format!("{label}.png")), w * scale, h * scale, &rgba);
            row.push((label, rgba, w * scale, h * scale));
        }
        rows.push(row);
    }

    let frames: usize = rows.iter().map(Vec::len).sum();
    println!("rendered {} frames for {} panels", frames, rows.len());

    // ── Build atlas ─────────────────────────────────────────
    let pad = 8_u32;
    let cell_w = rows.iter().flatten().map(|f| f.2).max().unwrap_or(0);
    let cell_h = rows.iter().flatten().map(|f| f.3).max().unwrap_or(0);
    let atlas_w = STATES.len() as u32 * (cell_w + pad) + pad;
    let atlas_h = rows.len() as u32 * (cell_h + pad) + pad;

    let mut atlas: Vec<u8> = [30u8, 30, 46, 255].repeat((atlas_w * atlas_h) as usize);
    for (r, row) in rows.iter().enumerate() {
        for (c, (_label, rgba, fw, fh)) in row.iter().enumerate() {
            let ox = pad + c as u32 * (cell_w + pad);
            let oy = pad + r as u32 * (cell_h + pad);
            for y in 0..*fh {
                let src = (y * fw * 4) as usize;
                let dst = (((oy + y) * atlas_w + ox) * 4) as usize;
                let len = (fw * 4) as usize;
                atlas[dst..dst + len].copy_from_slice(&rgba[src..src + len]);
            }
        }
    }

    let atlas_path = out.join("atlas.png");
    save_rgba_png(&atlas_path, atlas_w, atlas_h, &atlas);
    println!("\natlas: {} ({}x{})", atlas_path.display(), atlas_w, atlas_h);
    println!("individual frames in {}/", out.display());
}

fn arg_value(flag: &str) -> Option<String> {
    std::env::args().skip_while(|a| a != flag).nth(1)
}

fn set_state(panel: &mut DrawnPanel, state: &str) {
    match state {
        "hover" => panel.mouse_enter(),
        "pressed" => {
            panel.mouse_enter();
            panel.mouse_down();
        }
        "captured" => panel.captured(),
        "disabled" => {
            panel.mouse_enter();
            panel.set_enabled(false);
        }
        _ => {}
    }
}

/// Nearest-neighbour upscale so 24px glyphs are inspectable.
fn upscale(rgba: &[u8], w: u32, h: u32, scale: u32) -> Vec<u8> {
    let ow = w * scale;
    let mut out = Vec::with_capacity((ow * h * scale * 4) as usize);
    for y in 0..h * scale {
        for x in 0..ow {
            let si = (((y / scale) * w + x / scale) * 4) as usize;
            out.extend_from_slice(&rgba[si..si + 4]);
        }
    }
    out
}

fn save_rgba_png(path: &Path, w: u32, h: u32, rgba: &[u8]) {
    let file = std::fs::File::create(path).expect("create png");
    let buf = std::io::BufWriter::new(file);
    let mut encoder = png::Encoder::new(buf, w, h);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("png header");
    writer.write_image_data(rgba).expect("png data");
}
