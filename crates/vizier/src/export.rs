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

use crate::error::ExportResult;
use crate::result_set::{cell_display, Row};
use std::path::Path;

/// Serialises the currently displayed field list and rows: a header line of
/// field names, then one line per row. Values containing a comma, quote, or
/// newline are quoted with embedded quotes doubled; absent values become
/// empty cells. Exactly what the table view shows.
pub fn csv_bytes(fields: &[String], rows: &[Row]) -> ExportResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields)?;
    for row in rows {
        let record: Vec<String> = fields
            .iter()
            .map(|field| cell_display(row.get(field)))
            .collect();
        writer.write_record(&record)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Serialises and writes the export to `path` in one step.
pub fn write_csv_file(path: &Path, fields: &[String], rows: &[Row]) -> ExportResult<()> {
    let bytes = csv_bytes(fields, rows)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// `<title>.csv`, falling back to `results.csv` for a blank title.
pub fn csv_file_name(title: &str) -> String {
    let stem = title.trim();
    if stem.is_empty() {
        "results.csv".to_string()
    } else {
        format!("{stem}.csv")
    }
}
