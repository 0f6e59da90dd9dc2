// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::app::config::{BackendKind, PanelSettings};
use crate::domain::error::AppError;
use crate::infrastructure::process::ProcessExit;
use crate::infrastructure::relay::EventSink;
use crate::services::direct::DirectBackend;
use crate::services::service::ServiceBackend;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Started {
    pub pid: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailOutcome {
    Spawned,
    AlreadyRunning,
    /// Output already flows from the started process itself.
    Attached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopOutcome {
    /// The stop command reported success.
    Acknowledged,
    Exited(Option<i32>),
    /// Signalled, but still alive when the wait ran out.
    TimedOut,
    NotRunning,
}

/// Process-control capability behind the panel.
///
/// The dispatcher and window only see this trait; whether the scheduler runs
/// under the service manager or as our own child is decided once, from
/// configuration. Output lines produced synchronously by an action are pushed
/// onto `transcript` in order; streamed output arrives through the relay.
pub trait ProcessBackend {
    fn kind(&self) -> BackendKind;

    /// Checks run once at startup. `Ok(Some(text))` is an info line for the
    /// window; an error locks the panel.
    fn preflight(&mut self) -> Result<Option<String>, AppError> {
        Ok(None)
    }

    fn query_active(&mut self) -> Result<bool, AppError>;

    fn start(&mut self, transcript: &mut Vec<String>) -> Result<Started, AppError>;

    fn begin_tail(&mut self) -> Result<TailOutcome, AppError>;

    /// Close the log tail, if any. Returns whether one was running.
    fn end_tail(&mut self) -> bool;

    fn stop(&mut self, transcript: &mut Vec<String>) -> Result<StopOutcome, AppError>;

    /// Collect a managed process that exited on its own.
    fn reap(&mut self) -> Option<ProcessExit>;

    /// Whether to re-query status after a start attempt.
    fn reconcile_after_start(&self) -> bool {
        false
    }

    /// Called once when the window closes. `Some` when something was stopped.
    fn shutdown(&mut self) -> Option<Result<StopOutcome, AppError>>;
}

pub fn build_backend(settings: &PanelSettings, sink: EventSink) -> Box<dyn ProcessBackend> {
    match settings.backend {
        BackendKind::Service => Box::new(ServiceBackend::from_settings(settings, sink)),
        BackendKind::Direct => Box::new(DirectBackend::from_settings(settings, sink)),
    }
}
