// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::PKEXEC_DISMISSED;
use crate::domain::error::AppError;
use std::ffi::OsStr;
use std::io::{self, PipeReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};

/// A command line wrapped in an optional elevation prefix (`pkexec`, `sudo`).
#[derive(Clone, Debug)]
pub struct Invocation {
    argv: Vec<String>,
    elevated: bool,
}

impl Invocation {
    pub fn new(elevation: &[String], program: &Path, args: &[&str]) -> Self {
        let mut argv: Vec<String> = elevation
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        let elevated = !argv.is_empty();
        argv.push(program.to_string_lossy().to_string());
        argv.extend(args.iter().map(|a| a.to_string()));
        Self { argv, elevated }
    }

    pub fn is_elevated(&self) -> bool {
        self.elevated
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn display(&self) -> String {
        self.argv.join(" ")
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(OsStr::new(&self.argv[0]));
        cmd.args(&self.argv[1..]);
        cmd
    }
}

#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub text: String,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code_label(&self) -> String {
        self.status
            .code()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Non-empty output lines, verbatim apart from the terminators.
    pub fn lines(&self) -> Vec<String> {
        let trimmed = self.text.trim_end_matches(['\n', '\r']);
        if trimmed.trim().is_empty() {
            return Vec::new();
        }
        trimmed
            .lines()
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect()
    }

    /// Convert a non-zero exit into the error taxonomy.
    ///
    /// Only 126 is read as a refused authorization. pkexec also returns 127
    /// when the target could not be run, so that stays a plain failure.
    pub fn into_error(self, invocation: &Invocation) -> AppError {
        if invocation.is_elevated() && self.status.code() == Some(PKEXEC_DISMISSED) {
            return AppError::Elevation {
                command: invocation.display(),
            };
        }
        AppError::CommandFailed {
            command: invocation.display(),
            code: self.code_label(),
        }
    }
}

/// Spawn `cmd` with stdout and stderr sharing one pipe.
///
/// The command is consumed so the parent's copies of the write end are closed
/// before this returns; the reader sees EOF once the child (and anything it
/// forked that kept the descriptors) exits.
pub fn spawn_combined(mut cmd: Command) -> io::Result<(Child, PipeReader)> {
    let (reader, writer) = io::pipe()?;
    let writer_err = writer.try_clone()?;
    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .stderr(Stdio::from(writer_err));
    let child = cmd.spawn()?;
    drop(cmd);
    Ok((child, reader))
}

/// Run to completion and return the merged output.
pub fn run_captured(invocation: &Invocation) -> Result<CapturedOutput, AppError> {
    tracing::debug!(target: "command", command = %invocation.display(), "running");
    let (mut child, mut reader) = spawn_combined(invocation.command())
        .map_err(|e| AppError::from_spawn(invocation.program(), &e))?;

    let mut raw = Vec::new();
    let read_result = reader.read_to_end(&mut raw);
    let status = child.wait().map_err(|e| AppError::Spawn {
        command: invocation.display(),
        reason: e.to_string(),
    })?;
    if let Err(e) = read_result {
        return Err(AppError::StreamRead(e.to_string()));
    }

    let text = String::from_utf8_lossy(&raw).into_owned();
    tracing::debug!(
        target: "command",
        command = %invocation.display(),
        code = ?status.code(),
        bytes = raw.len(),
        "finished"
    );
    Ok(CapturedOutput { status, text })
}
