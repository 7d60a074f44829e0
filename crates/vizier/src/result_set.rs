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

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type Value = serde_json::Value;

/// One materialised row: field name to value, in column order.
pub type Row = IndexMap<String, Value>;

/// The columnar payload returned for one query: parallel column names and
/// row tuples. Each row tuple aligns positionally with `columns`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zips every row tuple against `columns`, best effort: a short row
    /// leaves its trailing fields absent, extra cells beyond the column
    /// list are dropped. Never fails, empty input gives empty output.
    pub fn materialise(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|tuple| {
                self.columns
                    .iter()
                    .zip(tuple.iter())
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }

    /// The field list currently on display: the explicit `columns` when
    /// given, otherwise the key set of the first row.
    pub fn field_list(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        self.materialise()
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// How a cell is shown in the table and serialised to CSV. Absent and null
/// values render as the empty string; strings render without JSON quoting.
pub fn cell_display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
