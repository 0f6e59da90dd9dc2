// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::app::locale::Locale;
use crate::common::paths::first_existing;
use crate::domain::constants;
use crate::domain::error::AppError;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Privileged helper driving the system service manager.
    #[default]
    Service,
    /// Elevated scheduler child in its own process group.
    Direct,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelSettings {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_helper_path")]
    pub helper_path: String,
    #[serde(default = "default_binary_path")]
    pub binary_path: String,
    /// argv prefix used to elevate; `None` picks pkexec/sudo by backend.
    pub elevation: Option<Vec<String>>,
    #[serde(default = "default_systemctl_path")]
    pub systemctl_path: String,
    #[serde(default = "default_style_path")]
    pub style_path: String,
    #[serde(default = "default_tail_stop_timeout_ms")]
    pub tail_stop_timeout_ms: u64,
    #[serde(default = "default_stop_timeout_ms")]
    pub stop_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub stop_on_quit: bool,
    #[serde(default)]
    pub language: Locale,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Defaults
fn default_service_name() -> String {
    constants::SERVICE_NAME.to_string()
}
fn default_helper_path() -> String {
    constants::HELPER_PATH.to_string()
}
fn default_binary_path() -> String {
    constants::DEFAULT_BINARY_PATH.to_string()
}
fn default_systemctl_path() -> String {
    "systemctl".to_string()
}
fn default_style_path() -> String {
    constants::STYLE_PATH.to_string()
}
fn default_tail_stop_timeout_ms() -> u64 {
    constants::DEFAULT_TAIL_STOP_TIMEOUT_MS
}
fn default_stop_timeout_ms() -> u64 {
    constants::DEFAULT_STOP_TIMEOUT_MS
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            service_name: default_service_name(),
            helper_path: default_helper_path(),
            binary_path: default_binary_path(),
            elevation: None,
            systemctl_path: default_systemctl_path(),
            style_path: default_style_path(),
            tail_stop_timeout_ms: default_tail_stop_timeout_ms(),
            stop_timeout_ms: default_stop_timeout_ms(),
            stop_on_quit: default_true(),
            language: Locale::default(),
            log_level: default_log_level(),
        }
    }
}

impl PanelSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        match resolve_config_path(path) {
            Some(selected) => {
                builder = builder.add_source(File::from(Path::new(&selected)).required(true));
            }
            None => {
                tracing::debug!(target: "config", "no config file found; using defaults");
            }
        }
        // Precedence: CLI (in main) > env/.env > selected file.
        builder = builder.add_source(
            Environment::with_prefix(constants::ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("elevation"),
        );

        let settings: PanelSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.tail_stop_timeout_ms == 0 {
            return Err(AppError::Config(
                "tail_stop_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.stop_timeout_ms == 0 {
            return Err(AppError::Config(
                "stop_timeout_ms must be greater than 0".to_string(),
            ));
        }
        match self.backend {
            BackendKind::Service => {
                if self.service_name.trim().is_empty() {
                    return Err(AppError::Config("service_name is missing".to_string()));
                }
                if self.helper_path.trim().is_empty() {
                    return Err(AppError::Config("helper_path is missing".to_string()));
                }
            }
            BackendKind::Direct => {
                // An empty binary path is a preflight failure shown in the window.
            }
        }
        Ok(())
    }

    /// Elevation argv prefix with blank entries removed.
    pub fn elevation_prefix(&self) -> Vec<String> {
        match &self.elevation {
            Some(list) => list
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => match self.backend {
                BackendKind::Service => vec!["pkexec".to_string()],
                BackendKind::Direct => vec!["sudo".to_string()],
            },
        }
    }

    pub fn tail_stop_timeout(&self) -> Duration {
        Duration::from_millis(self.tail_stop_timeout_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

fn resolve_config_path(path: Option<&str>) -> Option<String> {
    if let Some(path) = path {
        return Some(path.to_string());
    }
    first_existing(&[constants::LOCAL_CONFIG_PATH, constants::SYSTEM_CONFIG_PATH])
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn temp_config(tag: &str, body: &str) -> std::path::PathBuf {
        let tmp = std::env::temp_dir().join(format!(
            "scx-panel-{}-{}-{}.toml",
            tag,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::write(&tmp, body).expect("write temp config");
        tmp
    }

    #[test]
    fn defaults_match_packaged_layout() {
        let settings = PanelSettings::default();
        assert_eq!(settings.backend, BackendKind::Service);
        assert_eq!(settings.service_name, "scx-pardus.service");
        assert_eq!(settings.helper_path, "/usr/libexec/scx-pardus-ctl");
        assert_eq!(settings.tail_stop_timeout(), Duration::from_secs(2));
        assert_eq!(settings.stop_timeout(), Duration::from_secs(5));
        assert!(settings.stop_on_quit);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn elevation_defaults_follow_backend() {
        let mut settings = PanelSettings::default();
        assert_eq!(settings.elevation_prefix(), vec!["pkexec"]);
        settings.backend = BackendKind::Direct;
        assert_eq!(settings.elevation_prefix(), vec!["sudo"]);
        settings.elevation = Some(vec!["".to_string(), " doas ".to_string()]);
        assert_eq!(settings.elevation_prefix(), vec!["doas"]);
        settings.elevation = Some(Vec::new());
        assert!(settings.elevation_prefix().is_empty());
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        let settings = PanelSettings {
            stop_timeout_ms: 0,
            ..PanelSettings::default()
        };
        assert!(matches!(settings.validate(), Err(AppError::Config(msg)) if msg.contains("stop_timeout_ms")));
    }

    #[test]
    fn explicit_config_path_wins_over_discovery() {
        let resolved = resolve_config_path(Some("custom-panel.toml"));
        assert_eq!(resolved.as_deref(), Some("custom-panel.toml"));
    }

    #[test]
    fn loads_direct_backend_from_file() {
        let _env_lock = env_lock_guard();
        let tmp = temp_config(
            "direct",
            r#"
backend = "direct"
binary_path = "/opt/scx/scx_pardus"
elevation = ["sudo", "-n"]
language = "en"
stop_timeout_ms = 1500
"#,
        );
        let loaded = PanelSettings::load_with_path(Some(tmp.to_str().expect("utf8 path")))
            .expect("load settings");
        std::fs::remove_file(&tmp).ok();

        assert_eq!(loaded.backend, BackendKind::Direct);
        assert_eq!(loaded.binary_path, "/opt/scx/scx_pardus");
        assert_eq!(loaded.elevation_prefix(), vec!["sudo", "-n"]);
        assert_eq!(loaded.language, Locale::En);
        assert_eq!(loaded.stop_timeout(), Duration::from_millis(1500));
        assert_eq!(loaded.service_name, "scx-pardus.service");
    }

    #[test]
    fn env_overrides_selected_file_values() {
        let _env_lock = env_lock_guard();
        let tmp = temp_config("env-override", "backend = \"service\"\nservice_name = \"from-file.service\"\n");
        let old = std::env::var("SCX_PANEL_SERVICE_NAME").ok();
        unsafe {
            std::env::set_var("SCX_PANEL_SERVICE_NAME", "from-env.service");
        }

        let loaded = PanelSettings::load_with_path(Some(tmp.to_str().expect("utf8 path")))
            .expect("load settings");
        assert_eq!(loaded.service_name, "from-env.service");

        std::fs::remove_file(&tmp).ok();
        if let Some(v) = old {
            unsafe { std::env::set_var("SCX_PANEL_SERVICE_NAME", v) };
        } else {
            unsafe { std::env::remove_var("SCX_PANEL_SERVICE_NAME") };
        }
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let _env_lock = env_lock_guard();
        let err = PanelSettings::load_with_path(Some("/nonexistent/scx-panel.toml"))
            .expect_err("required file");
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn invalid_backend_is_rejected() {
        let _env_lock = env_lock_guard();
        let tmp = temp_config("bad-backend", "backend = \"launchd\"\n");
        let result = PanelSettings::load_with_path(Some(tmp.to_str().expect("utf8 path")));
        std::fs::remove_file(&tmp).ok();
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
