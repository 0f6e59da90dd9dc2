// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::error::AppError;
use std::process::{Command, Stdio};

/// Read-only `systemctl is-active --quiet <unit>`; exit 0 means active.
/// Needs no elevation.
pub fn is_active(systemctl: &str, unit: &str) -> Result<bool, AppError> {
    let status = Command::new(systemctl)
        .args(["is-active", "--quiet", unit])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| AppError::StatusQuery(format!("{systemctl}: {e}")))?;
    tracing::debug!(target: "service", unit, code = ?status.code(), "is-active queried");
    Ok(status.success())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_is_active() {
        assert!(is_active("true", "scx-pardus.service").expect("query"));
    }

    #[test]
    fn non_zero_exit_is_inactive() {
        assert!(!is_active("false", "scx-pardus.service").expect("query"));
    }

    #[test]
    fn missing_service_manager_is_a_query_error() {
        let err = is_active("/nonexistent/systemctl", "scx-pardus.service")
            .expect_err("query must fail");
        assert!(matches!(err, AppError::StatusQuery(msg) if msg.contains("/nonexistent/systemctl")));
    }
}
