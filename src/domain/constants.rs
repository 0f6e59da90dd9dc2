// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use std::time::Duration;

// =============================================================================
// PACKAGING
// =============================================================================

pub const APP_ID: &str = "com.scx.pardus.gui";
pub const SERVICE_NAME: &str = "scx-pardus.service";

/// Root helper invoked through the elevation wrapper: `<helper> start|stop|logs`.
pub const HELPER_PATH: &str = "/usr/libexec/scx-pardus-ctl";

/// Scheduler binary as produced by a workspace release build.
pub const DEFAULT_BINARY_PATH: &str = "./target/release/scx_pardus";

pub const STYLE_PATH: &str = "/usr/share/scx-pardus-gui/style.toml";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/scx-pardus-gui/config.toml";
pub const LOCAL_CONFIG_PATH: &str = "config.toml";

pub const ENV_PREFIX: &str = "SCX_PANEL";

// =============================================================================
// HELPER SUBCOMMANDS
// =============================================================================

pub const HELPER_START: &str = "start";
pub const HELPER_STOP: &str = "stop";
pub const HELPER_LOGS: &str = "logs";

// =============================================================================
// TIMING
// =============================================================================

pub const DEFAULT_TAIL_STOP_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_STOP_TIMEOUT_MS: u64 = 5_000;

/// Interval between `try_wait` polls while waiting for a child to exit.
pub const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Fallback repaint cadence so exits are noticed without input events.
pub const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// pkexec exit code when the authentication dialog is dismissed or denied.
pub const PKEXEC_DISMISSED: i32 = 126;
