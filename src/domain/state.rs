// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelStatus {
    Unknown,
    Running,
    Stopped,
}

/// Status label plus button enablement.
///
/// Start and Stop are never enabled together. A locked panel (backend failed
/// its preflight) keeps both disabled for the rest of its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelState {
    status: PanelStatus,
    start_enabled: bool,
    stop_enabled: bool,
    locked: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            status: PanelStatus::Unknown,
            start_enabled: true,
            stop_enabled: false,
            locked: false,
        }
    }
}

impl PanelState {
    pub fn status(&self) -> PanelStatus {
        self.status
    }

    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    pub fn stop_enabled(&self) -> bool {
        self.stop_enabled
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.locked = true;
        self.status = PanelStatus::Stopped;
        self.start_enabled = false;
        self.stop_enabled = false;
    }

    /// Window is closing; nothing stays actionable. Status is left as is.
    pub fn freeze(&mut self) {
        self.locked = true;
        self.start_enabled = false;
        self.stop_enabled = false;
    }

    /// Start was clicked; block a second dispatch while the action is in flight.
    pub fn begin_start(&mut self) {
        self.start_enabled = false;
    }

    pub fn begin_stop(&mut self) {
        self.stop_enabled = false;
    }

    pub fn mark_running(&mut self) {
        self.status = PanelStatus::Running;
        self.start_enabled = false;
        self.stop_enabled = !self.locked;
    }

    pub fn mark_stopped(&mut self) {
        self.status = PanelStatus::Stopped;
        self.start_enabled = !self.locked;
        self.stop_enabled = false;
    }

    pub fn apply_active(&mut self, active: bool) {
        if active {
            self.mark_running();
        } else {
            self.mark_stopped();
        }
    }

    pub fn is_consistent(&self) -> bool {
        !(self.start_enabled && self.stop_enabled)
    }
}

/// Append-only text shown in the log pane.
#[derive(Clone, Debug, Default)]
pub struct LogBuffer {
    lines: Vec<String>,
}

impl LogBuffer {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unknown_with_only_start_enabled() {
        let state = PanelState::default();
        assert_eq!(state.status(), PanelStatus::Unknown);
        assert!(state.start_enabled());
        assert!(!state.stop_enabled());
    }

    #[test]
    fn running_and_stopped_flip_buttons() {
        let mut state = PanelState::default();
        state.begin_start();
        assert!(!state.start_enabled() && !state.stop_enabled());
        state.mark_running();
        assert_eq!(state.status(), PanelStatus::Running);
        assert!(state.stop_enabled() && !state.start_enabled());
        state.begin_stop();
        state.mark_stopped();
        assert_eq!(state.status(), PanelStatus::Stopped);
        assert!(state.start_enabled() && !state.stop_enabled());
    }

    #[test]
    fn locked_panel_never_enables_buttons() {
        let mut state = PanelState::default();
        state.lock();
        state.apply_active(true);
        assert_eq!(state.status(), PanelStatus::Running);
        assert!(!state.start_enabled() && !state.stop_enabled());
        state.apply_active(false);
        assert!(!state.start_enabled() && !state.stop_enabled());
    }

    #[test]
    fn every_transition_keeps_buttons_exclusive() {
        type Step = fn(&mut PanelState);
        let steps: [Step; 7] = [
            PanelState::begin_start,
            PanelState::begin_stop,
            PanelState::mark_running,
            PanelState::mark_stopped,
            PanelState::freeze,
            |s| s.apply_active(true),
            |s| s.apply_active(false),
        ];
        // All sequences of length 4 over the transition set.
        let n = steps.len();
        for code in 0..n.pow(4) {
            let mut state = PanelState::default();
            let mut rest = code;
            for _ in 0..4 {
                steps[rest % n](&mut state);
                rest /= n;
                assert!(state.is_consistent(), "both buttons enabled: {state:?}");
            }
        }
    }

    #[test]
    fn log_buffer_keeps_insertion_order() {
        let mut log = LogBuffer::default();
        assert!(log.is_empty());
        log.push("first");
        log.push(String::from("second"));
        assert_eq!(log.lines(), ["first", "second"]);
        assert_eq!(log.last(), Some("second"));
        assert_eq!(log.len(), 2);
    }
}
