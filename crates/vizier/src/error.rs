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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport failure: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend rejected the question (HTTP {status})")]
    Backend { status: u16, detail: Option<String> },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
pub type ExportResult<T> = std::result::Result<T, ExportError>;
