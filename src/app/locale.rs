// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use serde::Deserialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub fn strings(self) -> &'static Strings {
        match self {
            Locale::Tr => &TR,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        })
    }
}

/// Labels and log lines shown by the panel.
pub struct Strings {
    pub window_title: &'static str,
    pub heading: &'static str,
    pub status_prefix: &'static str,
    pub status_unknown: &'static str,
    pub status_running: &'static str,
    pub status_stopped: &'static str,
    pub start: &'static str,
    pub stop: &'static str,
    pub refresh: &'static str,
    pub quit: &'static str,
    pub auto_scroll: &'static str,
    pub binary_prefix: &'static str,

    pub starting_service: &'static str,
    pub starting_binary: &'static str,
    pub start_sent: &'static str,
    pub start_failed: &'static str,
    pub started_pid: &'static str,
    pub stopping_service: &'static str,
    pub stopping_binary: &'static str,
    pub stop_sent: &'static str,
    pub scheduler_stopped: &'static str,
    pub stop_failed: &'static str,
    pub stop_timed_out: &'static str,
    pub tail_started: &'static str,
    pub tail_failed: &'static str,
    pub tail_closing: &'static str,
    pub read_error: &'static str,
    pub binary_missing: &'static str,
    pub process_exited: &'static str,
}

impl Strings {
    pub fn status_label(&self, status: crate::domain::state::PanelStatus) -> String {
        use crate::domain::state::PanelStatus;
        let word = match status {
            PanelStatus::Unknown => self.status_unknown,
            PanelStatus::Running => self.status_running,
            PanelStatus::Stopped => self.status_stopped,
        };
        format!("{}: {}", self.status_prefix, word)
    }
}

pub static TR: Strings = Strings {
    window_title: "SCX-Pardus Zamanlayıcısı",
    heading: "SCX-Pardus Zamanlayıcısı Kontrol Paneli",
    status_prefix: "Durum",
    status_unknown: "Bilinmiyor",
    status_running: "Çalışıyor",
    status_stopped: "Durduruldu",
    start: "Başlat",
    stop: "Durdur",
    refresh: "Durum Yenile",
    quit: "Çıkış",
    auto_scroll: "Otomatik kaydır",
    binary_prefix: "Binary",

    starting_service: ">>> Servis başlatılıyor...",
    starting_binary: ">>> Scheduler başlatılıyor...",
    start_sent: "✅ Başlatma komutu gönderildi.",
    start_failed: "❌ Başlatma başarısız",
    started_pid: "✅ Başlatıldı, PID",
    stopping_service: ">>> Servis durduruluyor...",
    stopping_binary: ">>> Ctrl+C (SIGINT) gönderiliyor...",
    stop_sent: "✅ Durdurma komutu gönderildi.",
    scheduler_stopped: "✅ Scheduler durduruldu",
    stop_failed: "❌ Durdurma başarısız",
    stop_timed_out: "❌ Süre aşımı, süreç kapanmadı",
    tail_started: ">>> Loglar izleniyor...",
    tail_failed: "❌ Log başlatılamadı",
    tail_closing: ">>> Log izleme kapatılıyor...",
    read_error: "❌ Log okuma hatası",
    binary_missing: "❌ scx_pardus binary bulunamadı",
    process_exited: "Scheduler sonlandı, çıkış kodu",
};

pub static EN: Strings = Strings {
    window_title: "SCX-Pardus Scheduler",
    heading: "SCX-Pardus Scheduler Control Panel",
    status_prefix: "Status",
    status_unknown: "Unknown",
    status_running: "Running",
    status_stopped: "Stopped",
    start: "Start",
    stop: "Stop",
    refresh: "Refresh Status",
    quit: "Quit",
    auto_scroll: "Auto-scroll",
    binary_prefix: "Binary",

    starting_service: ">>> Starting service...",
    starting_binary: ">>> Starting scheduler...",
    start_sent: "✅ Start command sent.",
    start_failed: "❌ Start failed",
    started_pid: "✅ Started with PID",
    stopping_service: ">>> Stopping service...",
    stopping_binary: ">>> Sending Ctrl+C (SIGINT)...",
    stop_sent: "✅ Stop command sent.",
    scheduler_stopped: "✅ Scheduler stopped",
    stop_failed: "❌ Stop failed",
    stop_timed_out: "❌ Timed out waiting for the process to exit",
    tail_started: ">>> Following logs...",
    tail_failed: "❌ Could not start log tail",
    tail_closing: ">>> Closing log tail...",
    read_error: "❌ Log read error",
    binary_missing: "❌ scx_pardus binary not found",
    process_exited: "Scheduler exited with code",
};
