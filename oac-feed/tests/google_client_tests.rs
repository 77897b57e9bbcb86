//! Google Sheets client against a local mock of the values endpoint
//!
//! The mock serves `GET /v4/spreadsheets/:id/values/:sheet` from an
//! [`InMemorySheets`] and enforces either a bearer token or an API key.
//! Like the real API it answers 404 for an unknown spreadsheet and 400
//! "Unable to parse range" for an unknown tab.

mod common;

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{assembler, with_spreadsheet};
use oac_common::SpreadsheetIds;
use oac_feed::engine::{ClubItem, FeedAssembler, SheetLayout};
use oac_feed::sheets::{Credentials, FetchError, GoogleSheetsClient, InMemorySheets, SheetSource};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

struct MockState {
    sheets: InMemorySheets,
    token: Option<String>,
    key: Option<String>,
}

impl MockState {
    fn authorized(&self, headers: &HeaderMap, query: Option<&str>) -> bool {
        let bearer_ok = self.token.as_ref().is_some_and(|token| {
            headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v == format!("Bearer {}", token))
        });
        let key_ok = self.key.as_ref().is_some_and(|key| {
            query
                .unwrap_or("")
                .split('&')
                .any(|pair| pair == format!("key={}", key))
        });
        bearer_ok || key_ok
    }
}

async fn values(
    State(state): State<Arc<MockState>>,
    Path((spreadsheet_id, sheet)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    if !state.authorized(&headers, query.as_deref()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"code": 401, "status": "UNAUTHENTICATED"}})),
        )
            .into_response();
    }

    match state.sheets.fetch_sheet(&spreadsheet_id, &sheet).await {
        // The real API omits `values` for an empty sheet
        Ok(grid) if grid.is_empty() => {
            Json(json!({"range": format!("'{}'!A1:Z1000", sheet), "majorDimension": "ROWS"}))
                .into_response()
        }
        Ok(grid) => Json(json!({
            "range": format!("'{}'!A1:Z1000", sheet),
            "majorDimension": "ROWS",
            "values": grid,
        }))
        .into_response(),
        Err(FetchError::SheetNotFound { sheet, .. }) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {
                "code": 400,
                "message": format!("Unable to parse range: {}", sheet),
                "status": "INVALID_ARGUMENT"
            }})),
        )
            .into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND"
            }})),
        )
            .into_response(),
    }
}

/// Spawn the mock on an ephemeral port and return its base URL
async fn spawn_mock(sheets: InMemorySheets, token: Option<&str>, key: Option<&str>) -> String {
    let state = Arc::new(MockState {
        sheets,
        token: token.map(str::to_string),
        key: key.map(str::to_string),
    });
    let app = Router::new()
        .route("/v4/spreadsheets/:id/values/:sheet", get(values))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn fixture() -> InMemorySheets {
    with_spreadsheet(
        InMemorySheets::new(),
        "S1",
        &[
            &["C1", "Riverside Runners", "A1", "L1, L3"],
            &["C2", "Ghost Club", "ZZ", "L1"],
        ],
    )
}

fn without_modified(items: Vec<ClubItem>) -> Vec<Value> {
    items
        .into_iter()
        .map(|mut item| {
            item.modified = 0;
            serde_json::to_value(item).unwrap()
        })
        .collect()
}

#[tokio::test]
async fn test_feed_over_sheets_api_matches_in_memory() {
    let base = spawn_mock(fixture(), Some("t0ken"), None).await;
    let client =
        GoogleSheetsClient::new(&base, Credentials::AccessToken("t0ken".to_string())).unwrap();
    let remote = FeedAssembler::new(
        Arc::new(client),
        SpreadsheetIds::new(vec!["S1".to_string()]),
        SheetLayout::default(),
    );

    let over_http = remote.assemble("https://feed.test").await.unwrap();
    let in_memory = assembler(fixture(), &["S1"])
        .assemble("https://feed.test")
        .await
        .unwrap();

    assert_eq!(over_http.len(), 2);
    assert_eq!(without_modified(over_http), without_modified(in_memory));
}

#[tokio::test]
async fn test_api_key_sent_as_query_parameter() {
    let base = spawn_mock(fixture(), None, Some("k3y")).await;
    let client = GoogleSheetsClient::new(&base, Credentials::ApiKey("k3y".to_string())).unwrap();

    let grid = client.fetch_sheet("S1", "amenity features").await.unwrap();
    assert_eq!(grid[0], vec!["code".to_string(), "name".to_string()]);
    assert_eq!(grid[3], vec!["F1".to_string(), "Parking".to_string()]);
}

#[tokio::test]
async fn test_rejected_credentials_are_api_error() {
    let base = spawn_mock(fixture(), Some("t0ken"), None).await;
    let client =
        GoogleSheetsClient::new(&base, Credentials::AccessToken("wrong".to_string())).unwrap();

    let result = client.fetch_sheet("S1", "clubs").await;
    assert!(matches!(result, Err(FetchError::Api(401, _))));
}

#[tokio::test]
async fn test_missing_sheet_is_not_found() {
    let base = spawn_mock(fixture(), Some("t0ken"), None).await;
    let client =
        GoogleSheetsClient::new(&base, Credentials::AccessToken("t0ken".to_string())).unwrap();

    let result = client.fetch_sheet("S1", "venues").await;
    match result {
        Err(FetchError::SheetNotFound {
            spreadsheet_id,
            sheet,
        }) => {
            assert_eq!(spreadsheet_id, "S1");
            assert_eq!(sheet, "venues");
        }
        other => panic!("expected SheetNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_spreadsheet_is_not_found() {
    let base = spawn_mock(fixture(), Some("t0ken"), None).await;
    let client =
        GoogleSheetsClient::new(&base, Credentials::AccessToken("t0ken".to_string())).unwrap();

    let result = client.fetch_sheet("NO-SUCH-ID", "clubs").await;
    assert!(matches!(result, Err(FetchError::SpreadsheetNotFound(id)) if id == "NO-SUCH-ID"));
}

#[tokio::test]
async fn test_empty_sheet_has_no_rows() {
    let sheets = InMemorySheets::new().with_sheet("S1", "clubs", Vec::new());
    let base = spawn_mock(sheets, Some("t0ken"), None).await;
    let client =
        GoogleSheetsClient::new(&base, Credentials::AccessToken("t0ken".to_string())).unwrap();

    let grid = client.fetch_sheet("S1", "clubs").await.unwrap();
    assert!(grid.is_empty());
}
