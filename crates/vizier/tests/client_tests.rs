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

use anyhow::Result;
use serde_json::json;
use vizier::error::ClientError;
use vizier::transcript::failure_message;
use vizier::{ChartKind, InsightClient, Role, Session};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn ask_posts_the_message_and_decodes_the_answer() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"message": "total sales by category"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sql": "SELECT category, SUM(total) FROM sales GROUP BY category",
            "columns": ["Category", "Total"],
            "rows": [["Beverages", 100], ["Produce", 75]],
            "viz": {"type": "bar", "x": "Category", "y": "Total", "title": "Sales"},
            "summary": "Sales by category."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = InsightClient::new(server.uri());
    let answer = client.ask("total sales by category").await?;
    assert_eq!(answer.columns, vec!["Category", "Total"]);
    assert_eq!(answer.rows.len(), 2);
    assert_eq!(answer.summary.as_deref(), Some("Sales by category."));
    let hint = answer.viz.as_ref().expect("hint");
    assert_eq!(hint.kind.as_deref(), Some("bar"));
    assert_eq!(hint.x.as_deref(), Some("Category"));
    Ok(())
}

#[tokio::test]
async fn a_trailing_slash_on_the_base_url_is_tolerated() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = InsightClient::new(format!("{}/", server.uri()));
    client.ask("anything").await?;
    Ok(())
}

#[tokio::test]
async fn missing_rows_and_columns_decode_as_empty() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"summary": "Nothing matched."})),
        )
        .mount(&server)
        .await;

    let client = InsightClient::new(server.uri());
    let answer = client.ask("anything").await?;
    assert!(answer.rows.is_empty());
    assert!(answer.columns.is_empty());
    assert!(answer.viz.is_none());
    Ok(())
}

#[tokio::test]
async fn backend_detail_surfaces_in_the_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "table not found"})),
        )
        .mount(&server)
        .await;

    let client = InsightClient::new(server.uri());
    let error = client.ask("bad question").await.expect_err("must fail");
    match &error {
        ClientError::Backend { status, detail } => {
            assert_eq!(*status, 400);
            assert_eq!(detail.as_deref(), Some("table not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let mut session = Session::new();
    session.begin_question("bad question");
    session.apply_failure(&error);
    let last = session.transcript().last().expect("turn");
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, "table not found");
}

#[tokio::test]
async fn an_undecodable_error_body_still_reports_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let client = InsightClient::new(server.uri());
    let error = client.ask("anything").await.expect_err("must fail");
    match error {
        ClientError::Backend { status, detail } => {
            assert_eq!(status, 500);
            assert!(detail.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn transport_failures_produce_a_printable_message() {
    // Port 9 (discard) is assumed closed; the request cannot connect.
    let client = InsightClient::new("http://127.0.0.1:9");
    let error = client.ask("anything").await.expect_err("must fail");
    assert!(matches!(error, ClientError::Http(_)));
    assert!(!failure_message(&error).is_empty());
}

#[tokio::test]
async fn a_full_round_trip_yields_a_renderable_result() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "columns": ["Category", "Total"],
            "rows": [["Beverages", 100], ["Produce", 75]],
        })))
        .mount(&server)
        .await;

    let client = InsightClient::new(server.uri());
    let answer = client.ask("total sales by category").await?;

    let mut session = Session::new();
    session.begin_question("total sales by category");
    session.apply_response(&answer);
    let result = session.result().expect("result");
    assert_eq!(result.config.kind, ChartKind::Bar);
    assert_eq!(result.config.x_field, "Category");
    assert_eq!(result.config.y_fields, vec!["Total"]);
    assert_eq!(result.rows.len(), 2);
    Ok(())
}
