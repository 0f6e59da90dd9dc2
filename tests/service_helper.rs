// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>
//
// Exercises the service backend with a fake privileged helper and a fake
// `systemctl`. Both share a marker file standing in for the unit state;
// `MARKER` in a start body is replaced with its path.

use scx_pardus_panel::app::locale::EN;
use scx_pardus_panel::domain::state::PanelStatus;
use scx_pardus_panel::infrastructure::relay::{channel, no_wake};
use scx_pardus_panel::services::dispatcher::Dispatcher;
use scx_pardus_panel::services::service::{ServiceBackend, ServiceOptions};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

struct Fixture {
    dir: PathBuf,
    helper: PathBuf,
    systemctl: PathBuf,
}

impl Fixture {
    fn new(tag: &str, start_body: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "scx-panel-service-{}-{}-{}",
            tag,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).expect("fixture dir");
        let marker = dir.join("active");
        let start_body = start_body.replace("MARKER", &marker.display().to_string());

        let helper = dir.join("scx-pardus-ctl");
        std::fs::write(
            &helper,
            format!(
                "#!/bin/sh\n\
                 case \"$1\" in\n\
                 start) {start_body} ;;\n\
                 stop) echo 'helper: unit stopped'; rm -f '{m}'; exit 0 ;;\n\
                 logs) echo 'journal: scx_pardus attached'; while :; do sleep 0.05; done ;;\n\
                 *) exit 2 ;;\n\
                 esac\n",
                m = marker.display()
            ),
        )
        .expect("write helper");

        let systemctl = dir.join("systemctl");
        std::fs::write(
            &systemctl,
            format!("#!/bin/sh\n[ -f '{}' ]\n", marker.display()),
        )
        .expect("write systemctl");
        std::fs::set_permissions(&systemctl, std::fs::Permissions::from_mode(0o755))
            .expect("chmod systemctl");
        // Let any sibling test's fork drop its inherited write handle before
        // the script is exec'd.
        std::thread::sleep(Duration::from_millis(50));

        Self {
            dir,
            helper,
            systemctl,
        }
    }

    fn marker(&self) -> PathBuf {
        self.dir.join("active")
    }

    fn panel(&self, helper: &Path, elevation: Vec<String>) -> Dispatcher {
        let (sink, events) = channel(no_wake());
        let backend = ServiceBackend::new(
            ServiceOptions {
                service_name: "scx-pardus.service".to_string(),
                helper_path: helper.to_path_buf(),
                systemctl_path: self.systemctl.display().to_string(),
                elevation,
                tail_stop_timeout: Duration::from_secs(2),
            },
            sink,
        );
        Dispatcher::new(Box::new(backend), events, &EN)
    }

    fn sh_panel(&self) -> Dispatcher {
        self.panel(&self.helper, vec!["/bin/sh".to_string()])
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.dir).ok();
    }
}

fn pump_until(d: &mut Dispatcher, what: &str, done: impl Fn(&Dispatcher) -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        d.pump();
        if done(d) {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {what}; log: {:?}",
            d.log().lines()
        );
        std::thread::sleep(Duration::from_millis(20));
    }
}

fn position(d: &Dispatcher, line: &str) -> Option<usize> {
    d.log().lines().iter().position(|l| l == line)
}

fn failure_lines(d: &Dispatcher) -> usize {
    d.log().lines().iter().filter(|l| l.starts_with("❌")).count()
}

#[test]
fn start_tail_and_stop_through_the_helper() {
    let fx = Fixture::new("ok", "echo 'helper: unit started'; touch 'MARKER'; exit 0");
    let mut d = fx.sh_panel();
    assert_eq!(d.target(), Some("scx-pardus.service"));
    d.refresh_status();
    assert_eq!(d.state().status(), PanelStatus::Stopped);

    d.start();
    assert_eq!(d.state().status(), PanelStatus::Running);
    assert!(d.state().stop_enabled() && !d.state().start_enabled());
    let started = position(&d, "helper: unit started").expect("helper output");
    let sent = position(&d, EN.start_sent).expect("start line");
    let tail = position(&d, EN.tail_started).expect("tail line");
    assert!(position(&d, EN.starting_service) < Some(started));
    assert!(started < sent && sent < tail);

    pump_until(&mut d, "journal output", |d| {
        position(d, "journal: scx_pardus attached").is_some()
    });

    d.refresh_status();
    assert_eq!(d.state().status(), PanelStatus::Running);

    d.stop();
    assert_eq!(d.state().status(), PanelStatus::Stopped);
    assert!(d.state().start_enabled() && !d.state().stop_enabled());
    let closing = position(&d, EN.tail_closing).expect("closing line");
    let stopped = position(&d, "helper: unit stopped").expect("helper output");
    let sent = position(&d, EN.stop_sent).expect("stop line");
    assert!(closing < stopped && stopped < sent);
    assert!(!fx.marker().exists());
    assert_eq!(failure_lines(&d), 0);

    d.refresh_status();
    assert_eq!(d.state().status(), PanelStatus::Stopped);
}

#[test]
fn failing_start_reports_once_and_rolls_back() {
    let fx = Fixture::new("deny", "echo 'polkit: request dismissed' 1>&2; exit 1");
    let mut d = fx.sh_panel();
    d.refresh_status();

    d.start();
    assert_eq!(d.state().status(), PanelStatus::Stopped);
    assert!(d.state().start_enabled() && !d.state().stop_enabled());
    assert_eq!(failure_lines(&d), 1);
    assert!(position(&d, "polkit: request dismissed").is_some());
    assert!(position(&d, EN.tail_started).is_none());
    assert!(
        d.log()
            .last()
            .unwrap_or_default()
            .starts_with(EN.start_failed)
    );
}

#[test]
fn dismissed_authorization_is_an_elevation_failure() {
    let fx = Fixture::new("dismiss", "exit 126");
    let mut d = fx.sh_panel();
    d.start();

    assert_eq!(failure_lines(&d), 1);
    let last = d.log().last().unwrap_or_default().to_string();
    assert!(last.contains("Authorization denied"), "{last}");
    assert_eq!(d.state().status(), PanelStatus::Stopped);
}

#[test]
fn missing_helper_is_one_failure_line() {
    let fx = Fixture::new("missing", "exit 0");
    let mut d = fx.panel(&fx.dir.join("no-such-helper"), Vec::new());
    d.refresh_status();

    d.start();
    assert_eq!(failure_lines(&d), 1);
    assert!(d.log().last().unwrap_or_default().contains("no-such-helper"));
    assert!(d.state().start_enabled());
}

#[test]
fn quit_ends_the_tail_but_leaves_the_service_running() {
    let fx = Fixture::new("quit", "touch 'MARKER'; exit 0");
    let mut d = fx.sh_panel();

    d.start();
    pump_until(&mut d, "journal output", |d| {
        position(d, "journal: scx_pardus attached").is_some()
    });
    d.quit();

    assert!(d.is_closed());
    assert_eq!(d.state().status(), PanelStatus::Running);
    assert!(!d.state().start_enabled() && !d.state().stop_enabled());
    assert!(fx.marker().exists());
}
