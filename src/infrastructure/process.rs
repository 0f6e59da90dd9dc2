// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::domain::constants::WAIT_POLL_INTERVAL;
use crate::domain::error::AppError;
use crate::infrastructure::command::{Invocation, spawn_combined};
use crate::infrastructure::relay::{EventSink, spawn_relay};
use nix::sys::signal::{Signal, kill, killpg};
use nix::unistd::{Pid, getpgid};
use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, ExitStatus};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessRole {
    /// Helper streaming the service journal (`<helper> logs`).
    Tail,
    /// The scheduler binary itself, leader of its own process group.
    Scheduler,
}

impl ProcessRole {
    fn label(self) -> &'static str {
        match self {
            ProcessRole::Tail => "tail",
            ProcessRole::Scheduler => "scheduler",
        }
    }
}

struct ManagedProcess {
    child: Child,
    role: ProcessRole,
    group: Option<Pid>,
}

impl ManagedProcess {
    fn pid(&self) -> Pid {
        Pid::from_raw(self.child.id() as i32)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TailSpawn {
    Spawned(u32),
    AlreadyRunning,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Termination {
    Exited(Option<i32>),
    TimedOut,
    NotRunning,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ProcessExit {
    pub role: ProcessRole,
    pub pid: u32,
    pub code: Option<i32>,
}

/// Owner of the single managed child process.
///
/// Spawning while a live process is held is rejected (or a no-op for the
/// tail); every termination path clears the handle.
pub struct ProcessSupervisor {
    current: Option<ManagedProcess>,
    sink: EventSink,
}

impl ProcessSupervisor {
    pub fn new(sink: EventSink) -> Self {
        Self {
            current: None,
            sink,
        }
    }

    pub fn pid(&self) -> Option<u32> {
        self.current.as_ref().map(|p| p.child.id())
    }

    pub fn is_live(&mut self) -> bool {
        match self.current.as_mut() {
            Some(process) => matches!(process.child.try_wait(), Ok(None)),
            None => false,
        }
    }

    pub fn spawn_tail(&mut self, invocation: &Invocation) -> Result<TailSpawn, AppError> {
        if self.is_live() {
            return Ok(TailSpawn::AlreadyRunning);
        }
        self.discard_exited();
        let pid = self.spawn(invocation, ProcessRole::Tail)?;
        Ok(TailSpawn::Spawned(pid))
    }

    pub fn spawn_direct(&mut self, invocation: &Invocation) -> Result<u32, AppError> {
        if self.is_live() {
            return Err(AppError::Spawn {
                command: invocation.display(),
                reason: format!(
                    "a managed process is already running (pid {})",
                    self.pid().unwrap_or_default()
                ),
            });
        }
        self.discard_exited();
        self.spawn(invocation, ProcessRole::Scheduler)
    }

    fn spawn(&mut self, invocation: &Invocation, role: ProcessRole) -> Result<u32, AppError> {
        let mut cmd = invocation.command();
        if role == ProcessRole::Scheduler {
            // New group led by the child so SIGINT reaches it and its descendants.
            cmd.process_group(0);
        }
        let (mut child, reader) =
            spawn_combined(cmd).map_err(|e| AppError::from_spawn(invocation.program(), &e))?;
        let pid = child.id();

        if let Err(e) = spawn_relay(role.label(), reader, self.sink.clone()) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::Spawn {
                command: invocation.display(),
                reason: format!("could not start log relay: {e}"),
            });
        }

        let group = match role {
            ProcessRole::Scheduler => Some(
                getpgid(Some(Pid::from_raw(pid as i32))).unwrap_or(Pid::from_raw(pid as i32)),
            ),
            ProcessRole::Tail => None,
        };
        tracing::info!(
            target: "supervisor",
            pid,
            role = role.label(),
            command = %invocation.display(),
            "managed process spawned"
        );
        self.current = Some(ManagedProcess { child, role, group });
        Ok(pid)
    }

    /// Stop the managed process and forget it.
    ///
    /// Tail: SIGTERM to the process. Scheduler: SIGINT to its whole group.
    /// A process that outlives `timeout` is handed to a reaper thread so it
    /// does not linger as a zombie.
    pub fn terminate(&mut self, timeout: Duration) -> Result<Termination, AppError> {
        let Some(mut process) = self.current.take() else {
            return Ok(Termination::NotRunning);
        };

        if let Ok(Some(status)) = process.child.try_wait() {
            return Ok(Termination::Exited(status.code()));
        }

        let signalled = match (process.role, process.group) {
            (ProcessRole::Scheduler, Some(group)) => killpg(group, Signal::SIGINT),
            _ => kill(process.pid(), Signal::SIGTERM),
        };
        if let Err(errno) = signalled {
            let pid = process.pid();
            tracing::warn!(
                target: "supervisor",
                pid = pid.as_raw(),
                error = %errno,
                "signal delivery failed"
            );
            detach_reaper(process.child);
            return Err(AppError::Termination(format!(
                "could not signal pid {}: {}",
                pid,
                errno.desc()
            )));
        }

        match wait_timeout(&mut process.child, timeout) {
            Ok(Some(status)) => {
                tracing::info!(
                    target: "supervisor",
                    pid = process.child.id(),
                    code = ?status.code(),
                    "managed process exited"
                );
                Ok(Termination::Exited(status.code()))
            }
            Ok(None) => {
                tracing::warn!(
                    target: "supervisor",
                    pid = process.child.id(),
                    timeout_ms = timeout.as_millis() as u64,
                    "managed process did not exit in time"
                );
                detach_reaper(process.child);
                Ok(Termination::TimedOut)
            }
            Err(e) => {
                detach_reaper(process.child);
                Err(AppError::Termination(format!("wait failed: {e}")))
            }
        }
    }

    /// Collect a process that exited on its own.
    pub fn reap(&mut self) -> Option<ProcessExit> {
        let process = self.current.as_mut()?;
        match process.child.try_wait() {
            Ok(Some(status)) => {
                let exit = ProcessExit {
                    role: process.role,
                    pid: process.child.id(),
                    code: status.code(),
                };
                self.current = None;
                Some(exit)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(target: "supervisor", error = %e, "failed to inspect process state");
                None
            }
        }
    }

    fn discard_exited(&mut self) {
        if let Some(exit) = self.reap() {
            tracing::debug!(target: "supervisor", pid = exit.pid, code = ?exit.code, "cleared exited process");
        }
    }
}

pub fn wait_timeout(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        std::thread::sleep(WAIT_POLL_INTERVAL);
    }
}

fn detach_reaper(mut child: Child) {
    let spawned = std::thread::Builder::new()
        .name("reaper".to_string())
        .spawn(move || {
            let _ = child.wait();
        });
    if let Err(e) = spawned {
        tracing::warn!(target: "supervisor", error = %e, "could not start reaper thread");
    }
}
