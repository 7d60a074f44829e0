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

use crate::error::{ClientError, ClientResult};
use crate::result_set::{ResultSet, Value};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

/// Optional backend-suggested chart configuration, used only as a seed for
/// the defaulting algorithm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VizHint {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub title: Option<String>,
}

/// The full answer for one question. Missing `rows`/`columns` deserialise
/// as empty rather than failing; the surface then simply renders no data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    pub sql: Option<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub columns: Vec<String>,
    pub viz: Option<VizHint>,
    pub summary: Option<String>,
}

impl ChatResponse {
    pub fn result_set(&self) -> ResultSet {
        ResultSet::new(self.columns.clone(), self.rows.clone())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Thin client for the single backend endpoint. One request per submitted
/// question; single-flight is the caller's responsibility. No explicit
/// timeout is set, the transport's own defaults bound the call.
pub struct InsightClient {
    client: Client,
    base_url: String,
}

impl InsightClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn ask(&self, message: &str) -> ClientResult<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);
        debug!(%url, "submitting question");
        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { message })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            warn!(status = status.as_u16(), ?detail, "backend rejected question");
            return Err(ClientError::Backend {
                status: status.as_u16(),
                detail,
            });
        }
        let answer = response.json::<ChatResponse>().await?;
        debug!(
            rows = answer.rows.len(),
            columns = answer.columns.len(),
            has_viz = answer.viz.is_some(),
            "received result set"
        );
        Ok(answer)
    }
}
