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

use crate::client::ChatResponse;
use crate::error::ClientError;

pub const GREETING: &str = r#"Hi! Ask me something like "Total sales by category in 1997"."#;
pub const FALLBACK_SUMMARY: &str = "Here are the results.";
pub const FALLBACK_FAILURE: &str = "Something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Append-only conversation log for one session, seeded with a fixed
/// assistant greeting. Turns are never mutated or removed.
#[derive(Debug, Clone)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            turns: vec![ConversationTurn {
                role: Role::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            content: content.into(),
        });
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Assistant turn content for a successful answer: the backend summary (or
/// a generic fallback) followed by the generated query text when present.
pub fn response_message(response: &ChatResponse) -> String {
    let summary = response
        .summary
        .clone()
        .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());
    match response.sql.as_deref() {
        Some(sql) if !sql.is_empty() => format!("{summary}\n\nSQL: {sql}"),
        _ => summary,
    }
}

/// Assistant turn content for a failed request, in preference order: the
/// backend-reported detail, the transport error message, then a generic
/// fallback.
pub fn failure_message(error: &ClientError) -> String {
    match error {
        ClientError::Backend {
            detail: Some(detail),
            ..
        } if !detail.is_empty() => detail.clone(),
        ClientError::Http(source) => source.to_string(),
        ClientError::Backend { .. } => FALLBACK_FAILURE.to_string(),
    }
}
