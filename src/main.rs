// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use clap::Parser;
use eframe::egui;
use scx_pardus_panel::app::config::{BackendKind, PanelSettings};
use scx_pardus_panel::app::locale::Locale;
use scx_pardus_panel::app::logging::setup_logging;
use scx_pardus_panel::app::panel::ControlPanelApp;
use scx_pardus_panel::domain::constants::APP_ID;
use scx_pardus_panel::domain::error::AppError;

#[derive(Parser, Debug)]
#[command(author, version, about = "SCX-Pardus scheduler control panel")]
struct Cli {
    /// Path to config file (default: ./config.toml, then /etc/scx-pardus-gui/config.toml)
    #[arg(long)]
    config: Option<String>,

    /// How the scheduler is supervised (overrides config/env)
    #[arg(long, value_enum)]
    backend: Option<BackendKind>,

    /// Scheduler binary for the direct backend
    #[arg(long)]
    binary: Option<String>,

    /// Log filter: a level or full tracing directives
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// UI language
    #[arg(long, value_enum)]
    language: Option<Locale>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut settings = PanelSettings::load_with_path(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    if let Some(binary) = cli.binary {
        settings.binary_path = binary;
    }
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    if let Some(language) = cli.language {
        settings.language = language;
    }
    settings.validate()?;
    setup_logging(&settings.log_level, cli.json_logs);

    let (size, min_size) = match settings.backend {
        BackendKind::Service => ([520.0, 360.0], [420.0, 300.0]),
        BackendKind::Direct => ([420.0, 320.0], [360.0, 260.0]),
    };
    let title = settings.language.strings().window_title;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_app_id(APP_ID)
            .with_inner_size(size)
            .with_min_inner_size(min_size),
        ..Default::default()
    };

    tracing::info!(
        target: "panel",
        backend = ?settings.backend,
        language = %settings.language,
        "starting control panel"
    );
    eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(ControlPanelApp::new(cc, settings)))),
    )?;
    Ok(())
}
