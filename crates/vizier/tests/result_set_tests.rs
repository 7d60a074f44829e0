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

use serde_json::json;
use vizier::{classify_fields, ResultSet, Row};

fn sample() -> ResultSet {
    ResultSet::new(
        vec!["Category".to_string(), "Total".to_string()],
        vec![
            vec![json!("Beverages"), json!(100)],
            vec![json!("Produce"), json!(75)],
        ],
    )
}

#[test]
fn materialise_aligns_rows_with_columns() {
    let rs = sample();
    let rows = rs.materialise();
    assert_eq!(rows.len(), rs.rows.len());
    for (i, tuple) in rs.rows.iter().enumerate() {
        for (j, column) in rs.columns.iter().enumerate() {
            assert_eq!(rows[i][column], tuple[j]);
        }
    }
}

#[test]
fn short_rows_leave_trailing_fields_absent() {
    let rs = ResultSet::new(
        vec!["Category".to_string(), "Total".to_string()],
        vec![vec![json!("Dairy")]],
    );
    let rows = rs.materialise();
    assert_eq!(rows[0]["Category"], json!("Dairy"));
    assert!(rows[0].get("Total").is_none());
}

#[test]
fn extra_cells_beyond_columns_are_dropped() {
    let rs = ResultSet::new(
        vec!["Category".to_string()],
        vec![vec![json!("Dairy"), json!(42)]],
    );
    let rows = rs.materialise();
    assert_eq!(rows[0].len(), 1);
}

#[test]
fn empty_input_gives_empty_output() {
    let rs = ResultSet::default();
    assert!(rs.materialise().is_empty());
    assert!(rs.field_list().is_empty());
}

#[test]
fn materialise_is_idempotent() {
    let rs = sample();
    assert_eq!(rs.materialise(), rs.materialise());
}

#[test]
fn field_list_uses_explicit_columns() {
    assert_eq!(sample().field_list(), vec!["Category", "Total"]);
}

#[test]
fn classification_partitions_the_field_list() {
    let rows = sample().materialise();
    let fields = sample().field_list();
    let classification = classify_fields(&rows, Some(&fields));
    assert_eq!(classification.categorical, vec!["Category"]);
    assert_eq!(classification.numeric, vec!["Total"]);
    let mut covered = classification.categorical.clone();
    covered.extend(classification.numeric.clone());
    covered.sort();
    let mut expected = fields;
    expected.sort();
    assert_eq!(covered, expected);
}

#[test]
fn any_numeric_row_makes_the_field_numeric() {
    let rs = ResultSet::new(
        vec!["Amount".to_string()],
        vec![vec![json!("n/a")], vec![json!(5)], vec![json!("n/a")]],
    );
    let rows = rs.materialise();
    let classification = classify_fields(&rows, Some(&rs.field_list()));
    assert_eq!(classification.numeric, vec!["Amount"]);
    assert!(classification.categorical.is_empty());
}

#[test]
fn empty_row_set_classifies_nothing() {
    let fields = vec!["Category".to_string(), "Total".to_string()];
    let classification = classify_fields(&[], Some(&fields));
    assert!(classification.numeric.is_empty());
    assert!(classification.categorical.is_empty());
}

#[test]
fn classification_falls_back_to_first_row_keys() {
    let mut row = Row::new();
    row.insert("Region".to_string(), json!("West"));
    row.insert("Units".to_string(), json!(12));
    let classification = classify_fields(&[row], None);
    assert_eq!(classification.categorical, vec!["Region"]);
    assert_eq!(classification.numeric, vec!["Units"]);
}
