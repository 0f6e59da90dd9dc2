// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::app::config::{BackendKind, PanelSettings};
use crate::domain::constants::{HELPER_LOGS, HELPER_START, HELPER_STOP};
use crate::domain::error::AppError;
use crate::infrastructure::command::{Invocation, run_captured};
use crate::infrastructure::process::{ProcessExit, ProcessSupervisor, TailSpawn};
use crate::infrastructure::relay::EventSink;
use crate::infrastructure::service_manager;
use crate::services::backend::{ProcessBackend, Started, StopOutcome, TailOutcome};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ServiceOptions {
    pub service_name: String,
    pub helper_path: PathBuf,
    pub systemctl_path: String,
    pub elevation: Vec<String>,
    pub tail_stop_timeout: Duration,
}

/// Drives the scheduler through the privileged helper; the only process we
/// own is the `logs` tail.
pub struct ServiceBackend {
    options: ServiceOptions,
    supervisor: ProcessSupervisor,
}

impl ServiceBackend {
    pub fn new(options: ServiceOptions, sink: EventSink) -> Self {
        Self {
            options,
            supervisor: ProcessSupervisor::new(sink),
        }
    }

    pub fn from_settings(settings: &PanelSettings, sink: EventSink) -> Self {
        Self::new(
            ServiceOptions {
                service_name: settings.service_name.clone(),
                helper_path: PathBuf::from(settings.helper_path.trim()),
                systemctl_path: settings.systemctl_path.clone(),
                elevation: settings.elevation_prefix(),
                tail_stop_timeout: settings.tail_stop_timeout(),
            },
            sink,
        )
    }

    fn helper(&self, subcommand: &str) -> Invocation {
        Invocation::new(&self.options.elevation, &self.options.helper_path, &[subcommand])
    }

    fn run_helper(&self, subcommand: &str, transcript: &mut Vec<String>) -> Result<(), AppError> {
        let invocation = self.helper(subcommand);
        let output = run_captured(&invocation)?;
        transcript.extend(output.lines());
        if output.success() {
            Ok(())
        } else {
            Err(output.into_error(&invocation))
        }
    }
}

impl ProcessBackend for ServiceBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Service
    }

    fn preflight(&mut self) -> Result<Option<String>, AppError> {
        Ok(Some(self.options.service_name.clone()))
    }

    fn query_active(&mut self) -> Result<bool, AppError> {
        service_manager::is_active(&self.options.systemctl_path, &self.options.service_name)
    }

    fn start(&mut self, transcript: &mut Vec<String>) -> Result<Started, AppError> {
        self.run_helper(HELPER_START, transcript)?;
        Ok(Started { pid: None })
    }

    fn begin_tail(&mut self) -> Result<TailOutcome, AppError> {
        match self.supervisor.spawn_tail(&self.helper(HELPER_LOGS))? {
            TailSpawn::Spawned(_) => Ok(TailOutcome::Spawned),
            TailSpawn::AlreadyRunning => Ok(TailOutcome::AlreadyRunning),
        }
    }

    fn end_tail(&mut self) -> bool {
        if self.supervisor.pid().is_none() {
            return false;
        }
        // Best effort: the tail is disposable.
        if let Err(e) = self.supervisor.terminate(self.options.tail_stop_timeout) {
            tracing::debug!(target: "service", error = %e, "log tail termination failed");
        }
        true
    }

    fn stop(&mut self, transcript: &mut Vec<String>) -> Result<StopOutcome, AppError> {
        self.run_helper(HELPER_STOP, transcript)?;
        Ok(StopOutcome::Acknowledged)
    }

    fn reap(&mut self) -> Option<ProcessExit> {
        self.supervisor.reap()
    }

    fn reconcile_after_start(&self) -> bool {
        true
    }

    fn shutdown(&mut self) -> Option<Result<StopOutcome, AppError>> {
        // The service outlives the window; only our tail goes away.
        self.end_tail();
        None
    }
}
