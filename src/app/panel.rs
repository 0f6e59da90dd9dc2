// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::app::config::{BackendKind, PanelSettings};
use crate::app::theme::PanelTheme;
use crate::domain::constants::REPAINT_INTERVAL;
use crate::infrastructure::relay::{self, Wake};
use crate::services::backend::build_backend;
use crate::services::dispatcher::Dispatcher;
use eframe::egui;
use egui::{Color32, RichText};
use std::sync::Arc;

pub struct ControlPanelApp {
    dispatcher: Dispatcher,
    theme: PanelTheme,
    auto_scroll_logs: bool,
}

impl ControlPanelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: PanelSettings) -> Self {
        let theme = PanelTheme::load(&settings.style_path);
        theme.apply(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let wake: Wake = Arc::new(move || ctx.request_repaint());
        let (sink, events) = relay::channel(wake);
        let backend = build_backend(&settings, sink);
        let mut dispatcher = Dispatcher::new(backend, events, settings.language.strings());
        dispatcher.refresh_status();

        tracing::info!(
            target: "panel",
            backend = ?settings.backend,
            target_name = dispatcher.target().unwrap_or("-"),
            "control panel ready"
        );

        Self {
            dispatcher,
            theme,
            auto_scroll_logs: true,
        }
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        let strings = self.dispatcher.strings();
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(strings.heading).size(22.0).strong());
        });
        ui.add_space(4.0);

        let status = self.dispatcher.state().status();
        let color = self.theme.status_color(status);
        ui.vertical_centered(|ui| {
            ui.colored_label(
                color,
                RichText::new(format!("  {}  ", strings.status_label(status)))
                    .strong()
                    .background_color(Color32::from_rgba_unmultiplied(
                        color.r(),
                        color.g(),
                        color.b(),
                        40,
                    )),
            );
        });

        if self.dispatcher.kind() == BackendKind::Direct
            && let Some(binary) = self.dispatcher.target()
        {
            ui.vertical_centered(|ui| {
                ui.monospace(format!("{}: {}", strings.binary_prefix, binary));
            });
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let strings = self.dispatcher.strings();
        let state = self.dispatcher.state();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    state.start_enabled(),
                    egui::Button::new(RichText::new(strings.start).strong())
                        .fill(Color32::from_rgb(35, 104, 78)),
                )
                .clicked()
            {
                self.dispatcher.start();
            }

            if ui
                .add_enabled(
                    state.stop_enabled(),
                    egui::Button::new(RichText::new(strings.stop).strong())
                        .fill(Color32::from_rgb(120, 56, 56)),
                )
                .clicked()
            {
                self.dispatcher.stop();
            }

            if ui
                .add_enabled(
                    !self.dispatcher.is_closed(),
                    egui::Button::new(strings.refresh).fill(Color32::from_rgb(66, 85, 120)),
                )
                .clicked()
            {
                self.dispatcher.refresh_status();
            }
        });

        if ui
            .add_sized([ui.available_width(), 28.0], egui::Button::new(strings.quit))
            .clicked()
        {
            self.dispatcher.quit();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn show_logs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.auto_scroll_logs, self.dispatcher.strings().auto_scroll);
        });

        egui::Frame::default()
            .fill(Color32::from_rgb(8, 13, 20))
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(35, 58, 84)))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                egui::ScrollArea::vertical()
                    .stick_to_bottom(self.auto_scroll_logs)
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        for line in self.dispatcher.log().lines() {
                            ui.add(
                                egui::Label::new(RichText::new(line).monospace().color(line_color(line)))
                                    .wrap(),
                            );
                        }
                    });
            });
    }
}

impl eframe::App for ControlPanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.dispatcher.pump();

        if ctx.input(|i| i.viewport().close_requested()) {
            // Window manager close goes through the same stop-on-quit path.
            self.dispatcher.quit();
        }

        egui::TopBottomPanel::top("top_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.show_header(ui);
                ui.add_space(6.0);
                self.show_controls(ui, ctx);
                ui.add_space(6.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_logs(ui);
        });

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.dispatcher.quit();
    }
}

fn line_color(line: &str) -> Color32 {
    if line.starts_with('❌') {
        Color32::from_rgb(232, 99, 99)
    } else if line.starts_with('✅') {
        Color32::from_rgb(94, 208, 160)
    } else if line.starts_with(">>>") {
        Color32::from_rgb(132, 168, 206)
    } else {
        Color32::from_rgb(210, 214, 220)
    }
}
