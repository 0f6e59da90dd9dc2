// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::app::config::BackendKind;
use crate::app::locale::Strings;
use crate::domain::error::AppError;
use crate::domain::state::{LogBuffer, PanelState};
use crate::infrastructure::process::{ProcessExit, ProcessRole};
use crate::infrastructure::relay::RelayEvent;
use crate::services::backend::{ProcessBackend, StopOutcome, TailOutcome};
use std::sync::mpsc::Receiver;

/// Turns button presses into backend calls and keeps `PanelState` and the
/// log in step with what happened. Lives on the UI thread; every failure ends
/// up as a log line plus a button rollback.
pub struct Dispatcher {
    backend: Box<dyn ProcessBackend>,
    events: Receiver<RelayEvent>,
    strings: &'static Strings,
    state: PanelState,
    log: LogBuffer,
    target: Option<String>,
    closed: bool,
}

impl Dispatcher {
    pub fn new(
        backend: Box<dyn ProcessBackend>,
        events: Receiver<RelayEvent>,
        strings: &'static Strings,
    ) -> Self {
        let mut dispatcher = Self {
            backend,
            events,
            strings,
            state: PanelState::default(),
            log: LogBuffer::default(),
            target: None,
            closed: false,
        };
        match dispatcher.backend.preflight() {
            Ok(target) => dispatcher.target = target,
            Err(e) => {
                tracing::warn!(target: "panel", error = %e, "backend preflight failed");
                dispatcher.state.lock();
                dispatcher
                    .log
                    .push(format!("{} ({})", strings.binary_missing, e));
            }
        }
        dispatcher
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn strings(&self) -> &'static Strings {
        self.strings
    }

    pub fn kind(&self) -> BackendKind {
        self.backend.kind()
    }

    /// Binary path or unit name confirmed by the preflight.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn refresh_status(&mut self) {
        if self.closed {
            return;
        }
        let active = match self.backend.query_active() {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(target: "panel", error = %e, "status query failed; assuming stopped");
                false
            }
        };
        self.state.apply_active(active);
        tracing::debug!(target: "panel", status = ?self.state.status(), "status refreshed");
    }

    pub fn start(&mut self) {
        if self.closed || !self.state.start_enabled() {
            return;
        }
        self.drain_events();
        self.state.begin_start();
        self.log.push(match self.backend.kind() {
            BackendKind::Service => self.strings.starting_service,
            BackendKind::Direct => self.strings.starting_binary,
        });
        tracing::info!(target: "panel", backend = ?self.backend.kind(), "start requested");

        let mut transcript = Vec::new();
        let result = self.backend.start(&mut transcript);
        self.append_transcript(transcript);
        match result {
            Ok(started) => {
                match started.pid {
                    Some(pid) => self.log.push(format!("{} {}", self.strings.started_pid, pid)),
                    None => self.log.push(self.strings.start_sent),
                }
                self.state.mark_running();
                self.begin_tail();
            }
            Err(e) => {
                tracing::warn!(target: "panel", error = %e, "start failed");
                self.log.push(format!("{}: {}", self.strings.start_failed, e));
                self.state.mark_stopped();
            }
        }

        if self.backend.reconcile_after_start() {
            self.refresh_status();
        }
    }

    fn begin_tail(&mut self) {
        match self.backend.begin_tail() {
            Ok(TailOutcome::Spawned) => self.log.push(self.strings.tail_started),
            Ok(TailOutcome::AlreadyRunning) | Ok(TailOutcome::Attached) => {}
            Err(e) => {
                tracing::warn!(target: "panel", error = %e, "log tail failed to start");
                self.log.push(format!("{}: {}", self.strings.tail_failed, e));
            }
        }
    }

    pub fn stop(&mut self) {
        if self.closed || !self.state.stop_enabled() {
            return;
        }
        self.drain_events();
        self.state.begin_stop();
        self.log.push(match self.backend.kind() {
            BackendKind::Service => self.strings.stopping_service,
            BackendKind::Direct => self.strings.stopping_binary,
        });
        tracing::info!(target: "panel", backend = ?self.backend.kind(), "stop requested");

        if self.backend.end_tail() {
            self.log.push(self.strings.tail_closing);
        }

        let mut transcript = Vec::new();
        let result = self.backend.stop(&mut transcript);
        self.append_transcript(transcript);
        self.report_stop(result);
        self.state.mark_stopped();
    }

    fn report_stop(&mut self, result: Result<StopOutcome, AppError>) {
        match result {
            Ok(StopOutcome::Acknowledged) => self.log.push(self.strings.stop_sent),
            Ok(StopOutcome::Exited(code)) => {
                tracing::info!(target: "panel", code = ?code, "scheduler stopped");
                self.log.push(self.strings.scheduler_stopped);
            }
            Ok(StopOutcome::TimedOut) => {
                tracing::warn!(target: "panel", "scheduler ignored SIGINT within the timeout");
                self.log.push(self.strings.stop_timed_out);
            }
            Ok(StopOutcome::NotRunning) => {}
            Err(e) => {
                tracing::warn!(target: "panel", error = %e, "stop failed");
                self.log.push(format!("{}: {}", self.strings.stop_failed, e));
            }
        }
    }

    /// Close the panel. Runs the backend's shutdown path once; later calls
    /// and button presses are ignored.
    pub fn quit(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        tracing::info!(target: "panel", "quit requested");
        if let Some(result) = self.backend.shutdown() {
            self.log.push(self.strings.stopping_binary);
            self.report_stop(result);
        }
        self.state.freeze();
    }

    /// Move relay output into the log and notice processes that exited on
    /// their own. Called once per frame. Returns the number of new lines.
    pub fn pump(&mut self) -> usize {
        let mut appended = self.drain_events();
        if let Some(exit) = self.backend.reap() {
            appended += self.handle_exit(exit);
        }
        appended
    }

    fn drain_events(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                RelayEvent::Line(line) => {
                    self.log.push(line);
                    appended += 1;
                }
                RelayEvent::ReadError(e) => {
                    self.log.push(format!("{}: {}", self.strings.read_error, e));
                    appended += 1;
                }
                RelayEvent::Closed => {
                    tracing::debug!(target: "panel", "relay stream closed");
                }
            }
        }
        appended
    }

    fn handle_exit(&mut self, exit: ProcessExit) -> usize {
        match exit.role {
            ProcessRole::Scheduler => {
                let code = exit
                    .code
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::info!(target: "panel", pid = exit.pid, code = %code, "scheduler exited");
                self.log
                    .push(format!("{} {}", self.strings.process_exited, code));
                if !self.closed {
                    self.state.mark_stopped();
                }
                1
            }
            ProcessRole::Tail => {
                tracing::debug!(target: "panel", pid = exit.pid, code = ?exit.code, "log tail exited");
                0
            }
        }
    }

    fn append_transcript(&mut self, transcript: Vec<String>) {
        for line in transcript {
            self.log.push(line);
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.quit();
    }
}
