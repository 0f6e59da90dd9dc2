// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authorization denied while running {command}")]
    Elevation { command: String },

    #[error("Executable not found: {0}")]
    MissingExecutable(String),

    #[error("Service status query failed: {0}")]
    StatusQuery(String),

    #[error("Failed to spawn {command}: {reason}")]
    Spawn { command: String, reason: String },

    #[error("{command} exited with code {code}")]
    CommandFailed { command: String, code: String },

    #[error("Log stream read failed: {0}")]
    StreamRead(String),

    #[error("Termination failed: {0}")]
    Termination(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl AppError {
    /// Classify a failed `Command::spawn`, keeping the OS reason text.
    pub fn from_spawn(command: &str, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => AppError::MissingExecutable(command.to_string()),
            std::io::ErrorKind::PermissionDenied => AppError::Elevation {
                command: command.to_string(),
            },
            _ => AppError::Spawn {
                command: command.to_string(),
                reason: err.to_string(),
            },
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<eframe::Error> for AppError {
    fn from(err: eframe::Error) -> Self {
        AppError::Ui(err.to_string())
    }
}
