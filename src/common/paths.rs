// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::error::AppError;
use nix::unistd::{AccessFlags, access};
use std::path::{Path, PathBuf};

pub fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

/// Resolve a scheduler binary path the way the panel launches it:
/// relative paths are taken from the working directory, and the file must
/// exist, be a regular file and carry an execute bit for this user.
pub fn resolve_executable(raw_path: &str) -> Result<PathBuf, AppError> {
    let trimmed = raw_path.trim();
    if trimmed.is_empty() {
        return Err(AppError::MissingExecutable("<empty path>".to_string()));
    }
    let resolved = absolute(PathBuf::from(trimmed));
    if !resolved.is_file() || !is_executable(&resolved) {
        return Err(AppError::MissingExecutable(
            resolved.to_string_lossy().to_string(),
        ));
    }
    Ok(resolved)
}

fn is_executable(path: &Path) -> bool {
    access(path, AccessFlags::X_OK).is_ok()
}

/// First candidate that exists on disk.
pub fn first_existing<'a>(candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| Path::new(candidate).exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "scx-panel-paths-{}-{}-{}",
            name,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn relative_paths_become_absolute() {
        let resolved = absolute(PathBuf::from("target/release/scx_pardus"));
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("target/release/scx_pardus"));
    }

    #[test]
    fn missing_binary_is_reported_with_resolved_path() {
        let path = scratch("missing");
        let err = resolve_executable(path.to_str().expect("utf8 path"))
            .expect_err("missing file must not resolve");
        assert!(matches!(err, AppError::MissingExecutable(p) if p.contains("scx-panel-paths-missing")));
    }

    #[test]
    fn non_executable_file_is_rejected() {
        let path = scratch("noexec");
        std::fs::write(&path, "#!/bin/sh\n").expect("write fixture");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644))
            .expect("chmod fixture");

        let result = resolve_executable(path.to_str().expect("utf8 path"));
        std::fs::remove_file(&path).ok();
        // root passes access(X_OK) only if some execute bit is set, so 0o644 fails for everyone.
        assert!(matches!(result, Err(AppError::MissingExecutable(_))));
    }

    #[test]
    fn executable_file_resolves() {
        let path = scratch("exec");
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").expect("write fixture");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod fixture");

        let resolved = resolve_executable(path.to_str().expect("utf8 path"));
        std::fs::remove_file(&path).ok();
        assert_eq!(resolved.expect("resolves"), path);
    }

    #[test]
    fn directories_are_not_executables() {
        let dir = std::env::temp_dir();
        assert!(resolve_executable(dir.to_str().expect("utf8 path")).is_err());
    }

    #[test]
    fn first_existing_skips_missing_candidates() {
        let tmp = std::env::temp_dir();
        let tmp = tmp.to_str().expect("utf8 path");
        assert_eq!(first_existing(&["/definitely/not/here", tmp]), Some(tmp));
        assert_eq!(first_existing(&["/definitely/not/here"]), None);
    }
}
