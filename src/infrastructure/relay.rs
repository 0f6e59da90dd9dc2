// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

//! Background line reader for a managed process's combined output.
//!
//! The worker never touches panel state. Every line travels through an
//! `mpsc` channel that the UI thread drains once per frame; the `Wake`
//! callback only asks the event loop to run that frame soon.

use std::io::{self, BufRead, BufReader, Read};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RelayEvent {
    Line(String),
    ReadError(String),
    Closed,
}

pub type Wake = Arc<dyn Fn() + Send + Sync>;

pub fn no_wake() -> Wake {
    Arc::new(|| {})
}

#[derive(Clone)]
pub struct EventSink {
    tx: Sender<RelayEvent>,
    wake: Wake,
}

impl EventSink {
    /// Returns false once the receiving side is gone.
    pub fn send(&self, event: RelayEvent) -> bool {
        let delivered = self.tx.send(event).is_ok();
        if delivered {
            (self.wake)();
        }
        delivered
    }
}

pub fn channel(wake: Wake) -> (EventSink, Receiver<RelayEvent>) {
    let (tx, rx) = mpsc::channel();
    (EventSink { tx, wake }, rx)
}

/// Start one reader thread for `stream`. It ends on EOF, on a read error, or
/// when the panel has dropped its receiver.
pub fn spawn_relay<R>(label: &str, stream: R, sink: EventSink) -> io::Result<JoinHandle<()>>
where
    R: Read + Send + 'static,
{
    let name = format!("relay-{label}");
    std::thread::Builder::new().name(name).spawn(move || {
        let reader = BufReader::new(stream);
        relay_lines(reader, &sink);
    })
}

pub(crate) fn relay_lines<B: BufRead>(mut reader: B, sink: &EventSink) {
    let mut raw = Vec::with_capacity(256);
    loop {
        raw.clear();
        match reader.read_until(b'\n', &mut raw) {
            Ok(0) => {
                tracing::debug!(target: "relay", "output stream closed");
                sink.send(RelayEvent::Closed);
                return;
            }
            Ok(_) => {
                let line = decode_line(&raw);
                if !sink.send(RelayEvent::Line(line)) {
                    tracing::debug!(target: "relay", "panel gone; dropping stream");
                    return;
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(target: "relay", error = %e, "output stream read failed");
                sink.send(RelayEvent::ReadError(e.to_string()));
                return;
            }
        }
    }
}

/// Strip the line terminator only; everything else is shown verbatim.
fn decode_line(raw: &[u8]) -> String {
    let mut end = raw.len();
    if end > 0 && raw[end - 1] == b'\n' {
        end -= 1;
        if end > 0 && raw[end - 1] == b'\r' {
            end -= 1;
        }
    }
    String::from_utf8_lossy(&raw[..end]).into_owned()
}
