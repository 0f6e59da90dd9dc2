// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Quieter defaults for the windowing and rendering stack.
const NOISY_MODULES: &str = "eframe=warn,egui=warn,egui_winit=warn,egui_glow=warn,winit=warn,wgpu=warn,naga=warn,calloop=warn";

pub fn filter_spec(log_level: &str) -> String {
    // If user passes a bare level (e.g. "debug"), apply sane noisy-module defaults.
    // Custom directive strings (with ',' or '=') are respected as-is.
    let normalized = log_level.trim();
    if normalized.is_empty() {
        return format!("info,{NOISY_MODULES}");
    }
    if normalized.contains(',') || normalized.contains('=') {
        normalized.to_string()
    } else {
        format!("{normalized},{NOISY_MODULES}")
    }
}

pub fn setup_logging(log_level: &str, json_format: bool) {
    let filter_spec = filter_spec(log_level);
    let filter = EnvFilter::from_str(&filter_spec).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = if json_format {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(false);
        subscriber.with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .compact();
        subscriber.with(fmt_layer).try_init()
    };
    if installed.is_err() {
        // A subscriber was already set (tests, embedding); keep it.
        return;
    }

    let base = filter_spec
        .split(',')
        .map(str::trim)
        .find(|part| !part.is_empty())
        .unwrap_or("info");
    tracing::info!(
        "Logging initialized\n  base: {base}\n  format: {}",
        if json_format { "json" } else { "compact" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_gets_quiet_gui_defaults() {
        let spec = filter_spec("debug");
        assert!(spec.starts_with("debug,"));
        assert!(spec.contains("winit=warn"));
        assert!(EnvFilter::from_str(&spec).is_ok());
    }

    #[test]
    fn custom_directives_are_kept() {
        assert_eq!(filter_spec("scx_pardus_panel=trace,warn"), "scx_pardus_panel=trace,warn");
    }

    #[test]
    fn blank_level_falls_back_to_info() {
        assert!(filter_spec("  ").starts_with("info,"));
    }

    #[test]
    fn repeated_setup_does_not_panic() {
        setup_logging("info", false);
        setup_logging("debug", true);
    }
}
