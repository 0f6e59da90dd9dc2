// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::app::config::{BackendKind, PanelSettings};
use crate::common::paths::resolve_executable;
use crate::domain::error::AppError;
use crate::infrastructure::command::Invocation;
use crate::infrastructure::process::{ProcessExit, ProcessSupervisor, Termination};
use crate::infrastructure::relay::EventSink;
use crate::services::backend::{ProcessBackend, Started, StopOutcome, TailOutcome};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct DirectOptions {
    pub binary_path: String,
    pub elevation: Vec<String>,
    pub stop_timeout: Duration,
    pub stop_on_quit: bool,
}

/// Runs the scheduler binary as our own elevated child and stops it with
/// SIGINT to its process group.
pub struct DirectBackend {
    options: DirectOptions,
    binary: Option<PathBuf>,
    supervisor: ProcessSupervisor,
}

impl DirectBackend {
    pub fn new(options: DirectOptions, sink: EventSink) -> Self {
        Self {
            options,
            binary: None,
            supervisor: ProcessSupervisor::new(sink),
        }
    }

    pub fn from_settings(settings: &PanelSettings, sink: EventSink) -> Self {
        Self::new(
            DirectOptions {
                binary_path: settings.binary_path.clone(),
                elevation: settings.elevation_prefix(),
                stop_timeout: settings.stop_timeout(),
                stop_on_quit: settings.stop_on_quit,
            },
            sink,
        )
    }

    fn binary(&mut self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.binary {
            return Ok(path.clone());
        }
        let resolved = resolve_executable(&self.options.binary_path)?;
        self.binary = Some(resolved.clone());
        Ok(resolved)
    }

    fn interrupt(&mut self) -> Result<StopOutcome, AppError> {
        match self.supervisor.terminate(self.options.stop_timeout)? {
            Termination::Exited(code) => Ok(StopOutcome::Exited(code)),
            Termination::NotRunning => Ok(StopOutcome::NotRunning),
            Termination::TimedOut => Ok(StopOutcome::TimedOut),
        }
    }
}

impl ProcessBackend for DirectBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Direct
    }

    fn preflight(&mut self) -> Result<Option<String>, AppError> {
        let path = self.binary()?;
        Ok(Some(path.to_string_lossy().to_string()))
    }

    fn query_active(&mut self) -> Result<bool, AppError> {
        Ok(self.supervisor.is_live())
    }

    fn start(&mut self, _transcript: &mut Vec<String>) -> Result<Started, AppError> {
        let binary = self.binary()?;
        let invocation = Invocation::new(&self.options.elevation, &binary, &[]);
        let pid = self.supervisor.spawn_direct(&invocation)?;
        Ok(Started { pid: Some(pid) })
    }

    fn begin_tail(&mut self) -> Result<TailOutcome, AppError> {
        Ok(TailOutcome::Attached)
    }

    fn end_tail(&mut self) -> bool {
        false
    }

    fn stop(&mut self, _transcript: &mut Vec<String>) -> Result<StopOutcome, AppError> {
        self.interrupt()
    }

    fn reap(&mut self) -> Option<ProcessExit> {
        self.supervisor.reap()
    }

    fn shutdown(&mut self) -> Option<Result<StopOutcome, AppError>> {
        if !self.options.stop_on_quit || !self.supervisor.is_live() {
            return None;
        }
        tracing::info!(target: "panel", "stopping scheduler before exit");
        Some(self.interrupt())
    }
}
