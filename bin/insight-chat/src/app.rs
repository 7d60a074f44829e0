// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use crate::chart;
use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use vizier::error::ClientError;
use vizier::{ChatResponse, ConversationTurn, InsightClient, Role, Session};

pub struct InsightApp {
    session: Session,
    message_input: String,
    status_message: String,
    show_table: bool,

    client: Arc<InsightClient>,
    runtime: tokio::runtime::Runtime,
    from_worker: mpsc::UnboundedReceiver<AppMessage>,
    from_worker_sender: mpsc::UnboundedSender<AppMessage>,
}

enum AppMessage {
    Answered(Box<ChatResponse>),
    Failed(ClientError),
}

impl InsightApp {
    pub fn new(backend_url: &str) -> Self {
        let (from_worker_sender, from_worker) = mpsc::unbounded_channel();
        Self {
            session: Session::new(),
            message_input: String::new(),
            status_message: format!("Backend: {backend_url}"),
            show_table: true,
            client: Arc::new(InsightClient::new(backend_url)),
            runtime: tokio::runtime::Runtime::new().expect("tokio rt"),
            from_worker,
            from_worker_sender,
        }
    }

    fn send_question(&mut self) {
        let text = self.message_input.clone();
        if !self.session.begin_question(&text) {
            return;
        }
        let client = self.client.clone();
        let sender = self.from_worker_sender.clone();
        let question = text.trim().to_string();
        debug!(chars = question.len(), "dispatching question");
        self.runtime.spawn(async move {
            match client.ask(&question).await {
                Ok(response) => {
                    let _ = sender.send(AppMessage::Answered(Box::new(response)));
                }
                Err(e) => {
                    let _ = sender.send(AppMessage::Failed(e));
                }
            }
        });
    }

    fn handle_worker_messages(&mut self) {
        while let Ok(msg) = self.from_worker.try_recv() {
            match msg {
                AppMessage::Answered(response) => {
                    self.session.apply_response(&response);
                    // The input only clears on success, as a failed question
                    // is likely to be edited and resent.
                    self.message_input.clear();
                    self.status_message = "Ready".to_string();
                }
                AppMessage::Failed(error) => {
                    warn!(%error, "request failed");
                    self.session.apply_failure(&error);
                    self.status_message = "Request failed".to_string();
                }
            }
        }
    }

    fn render_turn(&self, ui: &mut egui::Ui, turn: &ConversationTurn) {
        ui.label(
            RichText::new(turn.role.label())
                .small()
                .color(Color32::GRAY),
        );
        match turn.role {
            Role::User => {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                    ui.group(|ui| {
                        ui.set_max_width(ui.available_width() * 0.85);
                        ui.label(&turn.content);
                    });
                });
            }
            Role::Assistant => {
                ui.group(|ui| {
                    ui.set_max_width(ui.available_width() * 0.85);
                    ui.label(&turn.content);
                });
            }
        }
        ui.add_space(4.0);
    }

    fn render_chat_panel(&mut self, ui: &mut egui::Ui) {
        let available_height = ui.available_height();
        ui.heading("Conversation");
        ScrollArea::vertical()
            .stick_to_bottom(true)
            .max_height(available_height - 110.0)
            .show(ui, |ui| {
                for turn in self.session.transcript().turns() {
                    self.render_turn(ui, turn);
                }
            });
        ui.separator();
        ui.horizontal(|ui| {
            let response = ui.add(
                TextEdit::singleline(&mut self.message_input)
                    .hint_text("Ask a question about Northwind data…")
                    .desired_width(ui.available_width() - 90.0),
            );
            let loading = self.session.is_loading();
            let label = if loading { "Thinking…" } else { "Send" };
            let send_clicked = ui.add_enabled(!loading, egui::Button::new(label)).clicked();
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if send_clicked || (enter_pressed && !loading) {
                self.send_question();
            }
        });

        if let Some(sql) = self
            .session
            .result()
            .and_then(|r| r.sql.clone())
            .filter(|s| !s.is_empty())
        {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.monospace(&sql);
                if ui.button("Copy SQL").clicked() {
                    ui.ctx().copy_text(sql.clone());
                    self.status_message = "SQL copied to clipboard".to_string();
                }
            });
        }
    }
}

impl eframe::App for InsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_worker_messages();
        if self.session.is_loading() {
            // Keep draining worker messages while a request is in flight.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Sales Insights");
                ui.separator();
                if self.session.is_loading() {
                    ui.spinner();
                }
                ui.label(RichText::new(&self.status_message).color(Color32::GRAY));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available_height = ui.available_height();
            ui.horizontal(|ui| {
                ui.allocate_ui_with_layout(
                    egui::Vec2::new(ui.available_width() * 0.38, available_height),
                    egui::Layout::top_down(egui::Align::LEFT),
                    |ui| self.render_chat_panel(ui),
                );
                ui.separator();
                ui.allocate_ui_with_layout(
                    egui::Vec2::new(ui.available_width(), available_height),
                    egui::Layout::top_down(egui::Align::LEFT),
                    |ui| {
                        let mut exported = None;
                        if let Some(result) = self.session.result_mut() {
                            exported = chart::show(ui, result, &mut self.show_table);
                        } else {
                            ui.group(|ui| {
                                ui.colored_label(
                                    Color32::GRAY,
                                    "Ask a question to see charts and data here.",
                                );
                            });
                        }
                        if let Some(outcome) = exported {
                            self.status_message = outcome;
                        }
                    },
                );
            });
        });
    }
}
