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

use crate::classify::FieldClassification;
use crate::client::VizHint;
use crate::result_set::{cell_display, Row, Value};

pub const DEFAULT_TITLE: &str = "Results";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Table,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Table,
    ];

    /// Unknown hint strings fall back to a bar chart rather than erroring.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "line" => ChartKind::Line,
            "pie" => ChartKind::Pie,
            "table" => ChartKind::Table,
            _ => ChartKind::Bar,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
            ChartKind::Table => "Table only",
        }
    }
}

/// The concrete visualisation choices for the current result set. Seeded
/// once from the backend hint when a new result arrives, then mutated by
/// the user; a new result discards the previous config wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_fields: Vec<String>,
}

impl ChartConfig {
    /// The defaulting algorithm: hint values win, gaps fill from the
    /// classification (first categorical field for x, first numeric field
    /// for y), then the first field overall, then empty. Deterministic for
    /// a given input.
    pub fn derive(
        hint: Option<&VizHint>,
        fields: &FieldClassification,
        field_list: &[String],
    ) -> Self {
        let kind = hint
            .and_then(|h| h.kind.as_deref())
            .map_or(ChartKind::Bar, ChartKind::parse);
        let title = hint
            .and_then(|h| h.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let x_field = hint
            .and_then(|h| h.x.clone())
            .or_else(|| fields.first_categorical().map(str::to_string))
            .or_else(|| field_list.first().cloned())
            .unwrap_or_default();
        let y_fields = hint
            .and_then(|h| h.y.clone())
            .or_else(|| fields.first_numeric().map(str::to_string))
            .map(|y| vec![y])
            .unwrap_or_default();
        Self {
            kind,
            title,
            x_field,
            y_fields,
        }
    }

    /// Re-derivation step run exactly on result replacement or field-set
    /// change, never per render. Selections that no longer name an existing
    /// field are dropped, then empty slots are re-seeded with the first
    /// available candidate. Valid manual selections are left alone. Returns
    /// whether anything changed.
    pub fn repair(&mut self, fields: &FieldClassification, field_list: &[String]) -> bool {
        let mut changed = false;
        if !self.x_field.is_empty() && !field_list.contains(&self.x_field) {
            self.x_field.clear();
            changed = true;
        }
        let before = self.y_fields.len();
        self.y_fields.retain(|f| field_list.contains(f));
        changed |= self.y_fields.len() != before;

        if self.x_field.is_empty() {
            if let Some(candidate) = fields
                .first_categorical()
                .map(str::to_string)
                .or_else(|| field_list.first().cloned())
            {
                self.x_field = candidate;
                changed = true;
            }
        }
        if self.y_fields.is_empty() {
            if let Some(measure) = fields.first_numeric() {
                self.y_fields.push(measure.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Adds the field if absent, removes it if present. Order of addition
    /// is preserved and duplicates never appear.
    pub fn toggle_measure(&mut self, field: &str) {
        if let Some(pos) = self.y_fields.iter().position(|f| f == field) {
            self.y_fields.remove(pos);
        } else {
            self.y_fields.push(field.to_string());
        }
    }

    /// Pie mode keeps a single selected measure.
    pub fn set_measure(&mut self, field: &str) {
        self.y_fields = vec![field.to_string()];
    }

    /// The field a pie slice (or an empty-series fallback) is sized by:
    /// the first selected measure, else the first numeric field.
    pub fn measure_field<'a>(&'a self, fields: &'a FieldClassification) -> Option<&'a str> {
        self.y_fields
            .first()
            .map(String::as_str)
            .or_else(|| fields.first_numeric())
    }

    /// The field pie slices are labelled by: the x selection, else the
    /// first categorical field, else the first field overall.
    pub fn label_field<'a>(
        &'a self,
        fields: &'a FieldClassification,
        field_list: &'a [String],
    ) -> Option<&'a str> {
        if !self.x_field.is_empty() {
            return Some(&self.x_field);
        }
        fields
            .first_categorical()
            .or_else(|| field_list.first().map(String::as_str))
    }
}

/// One pie entry: a slice when the value is positive, otherwise a
/// legend-only row.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

impl PieSlice {
    /// Only positive values occupy arc length; zero and negative rows
    /// still appear in the legend so the user can see why they are absent.
    pub fn is_plottable(&self) -> bool {
        self.value > 0.0
    }
}

/// Extracts the pie entries for a row set in row order. Rows without a
/// numeric measure value are dropped; every other row is kept, plottable
/// or not.
pub fn pie_slices(rows: &[Row], value_field: &str, label_field: Option<&str>) -> Vec<PieSlice> {
    rows.iter()
        .filter_map(|row| {
            let value = row.get(value_field).and_then(Value::as_f64)?;
            let label = label_field
                .map(|f| cell_display(row.get(f)))
                .unwrap_or_default();
            Some(PieSlice { label, value })
        })
        .collect()
}
