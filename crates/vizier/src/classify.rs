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

use crate::result_set::Row;

/// Partition of the field list into plottable measures and everything else.
/// The two sets are disjoint and together cover the full field list, each
/// preserving field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl FieldClassification {
    pub fn first_numeric(&self) -> Option<&str> {
        self.numeric.first().map(String::as_str)
    }

    pub fn first_categorical(&self) -> Option<&str> {
        self.categorical.first().map(String::as_str)
    }

    pub fn is_numeric(&self, field: &str) -> bool {
        self.numeric.iter().any(|f| f == field)
    }
}

/// Classifies fields over a materialised row set. A field counts as numeric
/// when at least one row holds a numeric value for it; a field with mixed
/// numeric/string values is therefore numeric. This asymmetric rule favours
/// offering a sparsely typed field as a measure over excluding it.
///
/// `explicit` supplies the field list; when absent (or empty) the key set of
/// the first row is used. An empty row set yields both sets empty.
pub fn classify_fields(rows: &[Row], explicit: Option<&[String]>) -> FieldClassification {
    if rows.is_empty() {
        return FieldClassification::default();
    }
    let fields: Vec<String> = match explicit {
        Some(list) if !list.is_empty() => list.to_vec(),
        _ => rows[0].keys().cloned().collect(),
    };
    let mut classification = FieldClassification::default();
    for field in fields {
        if rows.iter().any(|row| {
            row.get(&field)
                .is_some_and(serde_json::Value::is_number)
        }) {
            classification.numeric.push(field);
        } else {
            classification.categorical.push(field);
        }
    }
    classification
}
