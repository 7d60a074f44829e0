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

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke, Vec2};
use vizier::result_set::cell_display;
use vizier::session::QueryResult;
use vizier::viz::ChartKind;
use vizier::Row;

const CHART_HEIGHT: f32 = 380.0;
const TABLE_HEIGHT: f32 = 260.0;

const PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2b),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xed, 0xc9, 0x48),
    Color32::from_rgb(0xb0, 0x7a, 0xa1),
    Color32::from_rgb(0x9c, 0x75, 0x5f),
];

/// Renders the chart/table surface for the current result. Returns a status
/// line when the user exported a CSV.
pub fn show(ui: &mut egui::Ui, result: &mut QueryResult, show_table: &mut bool) -> Option<String> {
    let mut status = None;
    ui.group(|ui| {
        if result.rows.is_empty() {
            ui.heading(&result.config.title);
            ui.colored_label(Color32::GRAY, "No data.");
            return;
        }
        toolbar(ui, result, show_table, &mut status);
        if result.config.kind != ChartKind::Table {
            ui.separator();
            draw_chart(ui, result);
        }
        if *show_table {
            ui.separator();
            draw_table(ui, result);
        }
    });
    status
}

fn toolbar(
    ui: &mut egui::Ui,
    result: &mut QueryResult,
    show_table: &mut bool,
    status: &mut Option<String>,
) {
    ui.horizontal_wrapped(|ui| {
        ui.heading(&result.config.title);
        egui::ComboBox::from_id_salt("chart_kind")
            .selected_text(result.config.kind.label())
            .show_ui(ui, |ui| {
                for kind in ChartKind::ALL {
                    ui.selectable_value(&mut result.config.kind, kind, kind.label());
                }
            });

        if result.config.kind == ChartKind::Pie {
            // A pie plots one measure; slice labels come from the label field.
            let numeric = result.classification.numeric.clone();
            let current = result.config.y_fields.first().cloned().unwrap_or_default();
            egui::ComboBox::from_label("Value")
                .selected_text(current.clone())
                .show_ui(ui, |ui| {
                    for field in &numeric {
                        if ui.selectable_label(current == *field, field.as_str()).clicked() {
                            result.config.set_measure(field);
                        }
                    }
                });
        } else {
            let x_options: Vec<String> = result
                .classification
                .categorical
                .iter()
                .chain(result.classification.numeric.iter())
                .cloned()
                .collect();
            egui::ComboBox::from_label("X")
                .selected_text(result.config.x_field.clone())
                .show_ui(ui, |ui| {
                    for field in &x_options {
                        ui.selectable_value(
                            &mut result.config.x_field,
                            field.clone(),
                            field.as_str(),
                        );
                    }
                });
            ui.label("Y:");
            let numeric = result.classification.numeric.clone();
            for field in &numeric {
                let mut selected = result.config.y_fields.iter().any(|f| f == field);
                if ui.checkbox(&mut selected, field.as_str()).changed() {
                    result.config.toggle_measure(field);
                }
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Export CSV").clicked() {
                *status = Some(export_csv(result));
            }
            let toggle = if *show_table { "Hide Table" } else { "Show Table" };
            if ui.button(toggle).clicked() {
                *show_table = !*show_table;
            }
        });
    });
}

fn export_csv(result: &QueryResult) -> String {
    let file_name = vizier::csv_file_name(&result.config.title);
    match rfd::FileDialog::new().set_file_name(&file_name).save_file() {
        Some(path) => match vizier::write_csv_file(&path, &result.fields, &result.rows) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        },
        None => "Export cancelled".to_string(),
    }
}

fn draw_chart(ui: &mut egui::Ui, result: &QueryResult) {
    match result.config.kind {
        ChartKind::Bar => draw_cartesian(ui, result, false),
        ChartKind::Line => draw_cartesian(ui, result, true),
        ChartKind::Pie => draw_pie(ui, result),
        ChartKind::Table => {}
    }
}

/// The series to plot: the selected measures, else the first numeric field
/// so a fresh chart is never empty.
fn series_fields(result: &QueryResult) -> Vec<String> {
    if !result.config.y_fields.is_empty() {
        return result.config.y_fields.clone();
    }
    result
        .classification
        .first_numeric()
        .map(|f| vec![f.to_string()])
        .unwrap_or_default()
}

fn numeric_cell(row: &Row, field: &str) -> Option<f64> {
    row.get(field).and_then(|v| v.as_f64())
}

fn truncated(text: &str) -> String {
    if text.chars().count() > 14 {
        let head: String = text.chars().take(12).collect();
        format!("{head}…")
    } else {
        text.to_string()
    }
}

fn draw_cartesian(ui: &mut egui::Ui, result: &QueryResult, as_lines: bool) {
    let fields = series_fields(result);
    if fields.is_empty() {
        ui.colored_label(Color32::GRAY, "No plottable measure in this result.");
        return;
    }

    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let rect = response.rect;
    let plot = rect.shrink2(Vec2::new(48.0, 24.0));

    let mut max_v = f64::NEG_INFINITY;
    let mut min_v = 0.0_f64;
    for row in &result.rows {
        for field in &fields {
            if let Some(v) = numeric_cell(row, field) {
                max_v = max_v.max(v);
                min_v = min_v.min(v);
            }
        }
    }
    if !max_v.is_finite() {
        max_v = 1.0;
    }
    if (max_v - min_v).abs() < f64::EPSILON {
        max_v = min_v + 1.0;
    }

    let span = max_v - min_v;
    let to_y = |v: f64| plot.bottom() - (((v - min_v) / span) as f32) * plot.height();
    let baseline = to_y(0.0);
    let text_color = ui.visuals().text_color();

    painter.line_segment(
        [
            Pos2::new(plot.left(), baseline),
            Pos2::new(plot.right(), baseline),
        ],
        Stroke::new(1.0, Color32::DARK_GRAY),
    );
    painter.text(
        Pos2::new(rect.left() + 2.0, to_y(max_v)),
        Align2::LEFT_CENTER,
        format!("{max_v:.0}"),
        FontId::proportional(10.0),
        text_color,
    );
    painter.text(
        Pos2::new(rect.left() + 2.0, baseline),
        Align2::LEFT_CENTER,
        "0",
        FontId::proportional(10.0),
        text_color,
    );

    let n = result.rows.len();
    let slot = plot.width() / n as f32;

    if as_lines {
        for (si, field) in fields.iter().enumerate() {
            let points: Vec<Pos2> = result
                .rows
                .iter()
                .enumerate()
                .filter_map(|(i, row)| {
                    numeric_cell(row, field).map(|v| {
                        Pos2::new(plot.left() + (i as f32 + 0.5) * slot, to_y(v))
                    })
                })
                .collect();
            if points.len() > 1 {
                painter.add(egui::Shape::line(
                    points,
                    Stroke::new(2.0, PALETTE[si % PALETTE.len()]),
                ));
            }
        }
    } else {
        let band = slot * 0.8;
        let bar_width = band / fields.len() as f32;
        for (i, row) in result.rows.iter().enumerate() {
            let x0 = plot.left() + i as f32 * slot + slot * 0.1;
            for (si, field) in fields.iter().enumerate() {
                if let Some(v) = numeric_cell(row, field) {
                    let x = x0 + si as f32 * bar_width;
                    let y = to_y(v);
                    let top = y.min(baseline);
                    let bottom = y.max(baseline);
                    painter.rect_filled(
                        Rect::from_min_max(
                            Pos2::new(x, top),
                            Pos2::new(x + bar_width * 0.9, bottom),
                        ),
                        egui::CornerRadius::ZERO,
                        PALETTE[si % PALETTE.len()],
                    );
                }
            }
        }
    }

    // Category labels only when the slots are wide enough to stay legible.
    if slot >= 28.0 && !result.config.x_field.is_empty() {
        for (i, row) in result.rows.iter().enumerate() {
            let label = cell_display(row.get(&result.config.x_field));
            painter.text(
                Pos2::new(plot.left() + (i as f32 + 0.5) * slot, plot.bottom() + 4.0),
                Align2::CENTER_TOP,
                truncated(&label),
                FontId::proportional(10.0),
                text_color,
            );
        }
    }

    ui.horizontal_wrapped(|ui| {
        for (si, field) in fields.iter().enumerate() {
            ui.colored_label(PALETTE[si % PALETTE.len()], format!("■ {field}"));
        }
    });
}

fn draw_pie(ui: &mut egui::Ui, result: &QueryResult) {
    let Some(value_field) = result
        .config
        .measure_field(&result.classification)
        .map(str::to_string)
    else {
        ui.colored_label(Color32::GRAY, "No plottable measure in this result.");
        return;
    };
    let label_field = result
        .config
        .label_field(&result.classification, &result.fields)
        .map(str::to_string);

    let slices = vizier::pie_slices(&result.rows, &value_field, label_field.as_deref());
    let total: f64 = slices
        .iter()
        .filter(|s| s.is_plottable())
        .map(|s| s.value)
        .sum();
    if total <= 0.0 {
        ui.colored_label(Color32::GRAY, "No positive values to plot.");
        return;
    }

    let (response, painter) = ui.allocate_painter(
        Vec2::new(ui.available_width(), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let rect = response.rect;
    let center = rect.center();
    let radius = (rect.height().min(rect.width()) / 2.0 - 40.0).max(10.0);
    let text_color = ui.visuals().text_color();

    let mut angle = -std::f32::consts::FRAC_PI_2;
    for (i, slice) in slices.iter().enumerate() {
        if !slice.is_plottable() {
            continue;
        }
        let sweep = ((slice.value / total) as f32) * std::f32::consts::TAU;
        let steps = ((sweep / std::f32::consts::TAU * 64.0).ceil() as usize).max(2);
        let mut points = vec![center];
        for s in 0..=steps {
            let a = angle + sweep * (s as f32 / steps as f32);
            points.push(center + radius * Vec2::new(a.cos(), a.sin()));
        }
        painter.add(egui::Shape::convex_polygon(
            points,
            PALETTE[i % PALETTE.len()],
            Stroke::NONE,
        ));
        let mid = angle + sweep / 2.0;
        painter.text(
            center + (radius + 18.0) * Vec2::new(mid.cos(), mid.sin()),
            Align2::CENTER_CENTER,
            truncated(&slice.label),
            FontId::proportional(10.0),
            text_color,
        );
        angle += sweep;
    }

    // Non-positive rows keep a legend entry so their absence is visible.
    ui.horizontal_wrapped(|ui| {
        for (i, slice) in slices.iter().enumerate() {
            if slice.is_plottable() {
                ui.colored_label(
                    PALETTE[i % PALETTE.len()],
                    format!("■ {} ({})", slice.label, slice.value),
                );
            } else {
                ui.colored_label(
                    Color32::GRAY,
                    format!("■ {} ({}, no slice)", slice.label, slice.value),
                );
            }
        }
    });
}

fn draw_table(ui: &mut egui::Ui, result: &QueryResult) {
    egui::ScrollArea::both()
        .id_salt("result_table_scroll")
        .max_height(TABLE_HEIGHT)
        .show(ui, |ui| {
            egui::Grid::new("result_table").striped(true).show(ui, |ui| {
                for field in &result.fields {
                    ui.strong(field.as_str());
                }
                ui.end_row();
                for row in &result.rows {
                    for field in &result.fields {
                        ui.label(cell_display(row.get(field)));
                    }
                    ui.end_row();
                }
            });
        });
}
