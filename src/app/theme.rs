// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::state::PanelStatus;
use anyhow::Context;
use config::{Config, File, FileFormat};
use egui::Color32;
use serde::Deserialize;
use std::path::Path;

/// Optional style sheet. Every key may be omitted.
///
/// ```toml
/// accent = "#2d6db9"
/// running = "#3c965a"
/// font_size = 15.0
/// ```
#[derive(Debug, Default, Deserialize)]
struct ThemeFile {
    accent: Option<String>,
    window_fill: Option<String>,
    panel_fill: Option<String>,
    text: Option<String>,
    running: Option<String>,
    stopped: Option<String>,
    unknown: Option<String>,
    font_size: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PanelTheme {
    pub accent: Color32,
    pub window_fill: Color32,
    pub panel_fill: Color32,
    pub text: Color32,
    pub running: Color32,
    pub stopped: Color32,
    pub unknown: Color32,
    pub font_size: Option<f32>,
}

impl Default for PanelTheme {
    fn default() -> Self {
        Self {
            accent: Color32::from_rgb(45, 109, 185),
            window_fill: Color32::from_rgb(10, 16, 24),
            panel_fill: Color32::from_rgb(12, 20, 30),
            text: Color32::from_rgb(224, 232, 242),
            running: Color32::from_rgb(60, 150, 90),
            stopped: Color32::from_rgb(150, 70, 70),
            unknown: Color32::from_rgb(185, 140, 60),
            font_size: None,
        }
    }
}

impl PanelTheme {
    /// Load the style file if present. A missing or broken file never stops
    /// the panel; it just keeps the built-in look.
    pub fn load(path: &str) -> Self {
        match try_load(Path::new(path)) {
            Ok(Some(theme)) => {
                tracing::debug!(target: "theme", path, "style loaded");
                theme
            }
            Ok(None) => {
                tracing::debug!(target: "theme", path, "no style file; using defaults");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(target: "theme", path, error = %format!("{e:#}"), "style ignored");
                Self::default()
            }
        }
    }

    pub fn status_color(&self, status: PanelStatus) -> Color32 {
        match status {
            PanelStatus::Running => self.running,
            PanelStatus::Stopped => self.stopped,
            PanelStatus::Unknown => self.unknown,
        }
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = self.window_fill;
        visuals.panel_fill = self.panel_fill;
        visuals.extreme_bg_color = Color32::from_rgb(8, 13, 20);
        visuals.override_text_color = Some(self.text);
        visuals.widgets.inactive.bg_fill = Color32::from_rgb(23, 35, 49);
        visuals.widgets.hovered.bg_fill = Color32::from_rgb(34, 53, 72);
        visuals.widgets.active.bg_fill = Color32::from_rgb(40, 63, 88);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(16, 24, 35);
        visuals.selection.bg_fill = self.accent;
        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.window_margin = egui::Margin::same(16);
        style.visuals.window_stroke = egui::Stroke::new(1.0, Color32::from_rgb(30, 50, 72));
        if let Some(size) = self.font_size {
            for font in style.text_styles.values_mut() {
                font.size = font.size * size / 14.0;
            }
        }
        ctx.set_style(style);
    }
}

fn try_load(path: &Path) -> anyhow::Result<Option<PanelTheme>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = path
        .to_str()
        .with_context(|| format!("non UTF-8 style path {}", path.display()))?;
    let file: ThemeFile = Config::builder()
        .add_source(File::new(raw, FileFormat::Toml))
        .build()
        .with_context(|| format!("reading {raw}"))?
        .try_deserialize()
        .with_context(|| format!("parsing {raw}"))?;

    let mut theme = PanelTheme::default();
    let slots = [
        ("accent", file.accent, &mut theme.accent),
        ("window_fill", file.window_fill, &mut theme.window_fill),
        ("panel_fill", file.panel_fill, &mut theme.panel_fill),
        ("text", file.text, &mut theme.text),
        ("running", file.running, &mut theme.running),
        ("stopped", file.stopped, &mut theme.stopped),
        ("unknown", file.unknown, &mut theme.unknown),
    ];
    for (key, value, slot) in slots {
        if let Some(value) = value {
            *slot = parse_hex(&value).with_context(|| format!("{key}: invalid colour {value:?}"))?;
        }
    }
    if let Some(size) = file.font_size {
        anyhow::ensure!(size > 4.0 && size < 64.0, "font_size out of range: {size}");
        theme.font_size = Some(size);
    }
    Ok(Some(theme))
}

/// `#rrggbb` or `rrggbb`.
pub fn parse_hex(value: &str) -> Option<Color32> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_file(tag: &str, body: &str) -> std::path::PathBuf {
        let tmp = std::env::temp_dir().join(format!(
            "scx-panel-style-{}-{}-{}.toml",
            tag,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::write(&tmp, body).expect("write style");
        tmp
    }

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_hex("#ff8000"), Some(Color32::from_rgb(255, 128, 0)));
        assert_eq!(parse_hex("0a0B0c"), Some(Color32::from_rgb(10, 11, 12)));
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#gg0000"), None);
    }

    #[test]
    fn missing_style_file_keeps_defaults() {
        assert_eq!(
            PanelTheme::load("/nonexistent/scx-pardus-gui/style.toml"),
            PanelTheme::default()
        );
    }

    #[test]
    fn style_file_overrides_selected_colours() {
        let path = style_file("ok", "running = \"#00ff00\"\nfont_size = 16.0\n");
        let theme = PanelTheme::load(path.to_str().expect("utf8 path"));
        std::fs::remove_file(&path).ok();

        assert_eq!(theme.running, Color32::from_rgb(0, 255, 0));
        assert_eq!(theme.stopped, PanelTheme::default().stopped);
        assert_eq!(theme.font_size, Some(16.0));
        assert_eq!(theme.status_color(PanelStatus::Running), theme.running);
    }

    #[test]
    fn broken_style_file_falls_back() {
        let path = style_file("bad", "accent = \"blue\"\n");
        let theme = PanelTheme::load(path.to_str().expect("utf8 path"));
        std::fs::remove_file(&path).ok();
        assert_eq!(theme, PanelTheme::default());
    }
}
