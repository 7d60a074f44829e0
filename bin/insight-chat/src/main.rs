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

mod app;
mod args;
mod chart;

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = args::Args::parse();
    tracing::info!(backend_url = %args.backend_url, "starting insight-chat");
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Sales Insights"),
        ..Default::default()
    };
    eframe::run_native(
        "Sales Insights",
        options,
        Box::new(move |_cc| Ok(Box::new(app::InsightApp::new(&args.backend_url)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))
}
