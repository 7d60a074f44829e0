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

pub mod classify;
pub mod client;
pub mod error;
pub mod export;
pub mod result_set;
pub mod session;
pub mod transcript;
pub mod viz;

pub use classify::{classify_fields, FieldClassification};
pub use client::{ChatResponse, InsightClient, VizHint};
pub use error::{ClientError, ExportError};
pub use export::{csv_bytes, csv_file_name, write_csv_file};
pub use result_set::{cell_display, ResultSet, Row, Value};
pub use session::{QueryResult, Session};
pub use transcript::{ConversationTurn, Role, Transcript};
pub use viz::{pie_slices, ChartConfig, ChartKind, PieSlice};
