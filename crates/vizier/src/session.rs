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

use crate::classify::{classify_fields, FieldClassification};
use crate::client::ChatResponse;
use crate::error::ClientError;
use crate::result_set::{ResultSet, Row};
use crate::transcript::{failure_message, response_message, Transcript};
use crate::viz::ChartConfig;
use tracing::debug;

/// Everything derived from one answered question: the raw result set, its
/// materialised rows, the displayed field list, the field classification,
/// and the mutable chart configuration seeded from the backend hint.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub sql: Option<String>,
    pub result_set: ResultSet,
    pub rows: Vec<Row>,
    pub fields: Vec<String>,
    pub classification: FieldClassification,
    pub config: ChartConfig,
}

impl QueryResult {
    pub fn from_response(response: &ChatResponse) -> Self {
        let result_set = response.result_set();
        let rows = result_set.materialise();
        let fields = result_set.field_list();
        let classification = classify_fields(&rows, Some(&fields));
        let mut config = ChartConfig::derive(response.viz.as_ref(), &classification, &fields);
        // The hint is untrusted; drop selections it made up.
        config.repair(&classification, &fields);
        Self {
            sql: response.sql.clone(),
            result_set,
            rows,
            fields,
            classification,
            config,
        }
    }
}

/// Short-lived, explicitly owned state for one chat session: the visible
/// transcript, the single in-flight request flag, and the current result.
/// Held by the view layer; nothing here is shared or persisted.
#[derive(Debug, Default)]
pub struct Session {
    transcript: Transcript,
    loading: bool,
    result: Option<QueryResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&QueryResult> {
        self.result.as_ref()
    }

    pub fn result_mut(&mut self) -> Option<&mut QueryResult> {
        self.result.as_mut()
    }

    /// Optimistically appends the user turn and enters the loading state.
    /// Returns false (and does nothing) for blank input or while a request
    /// is already in flight.
    pub fn begin_question(&mut self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return false;
        }
        self.transcript.push_user(text);
        self.loading = true;
        self.result = None;
        true
    }

    /// A successful answer replaces the current result wholesale, which
    /// discards any manual chart overrides from the previous one.
    pub fn apply_response(&mut self, response: &ChatResponse) {
        debug!(rows = response.rows.len(), "applying response");
        self.transcript.push_assistant(response_message(response));
        self.result = Some(QueryResult::from_response(response));
        self.loading = false;
    }

    pub fn apply_failure(&mut self, error: &ClientError) {
        self.transcript.push_assistant(failure_message(error));
        self.loading = false;
    }
}
