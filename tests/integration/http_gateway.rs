use crate::common::{build_attendance, sample_input};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use rollcall_offline::application::ports::SyncGateway;
use rollcall_offline::domain::entities::SyncBatch;
use rollcall_offline::infrastructure::{
    MemoryKeyValueStore, ReqwestSyncGateway, StaticCsrfToken,
};
use rollcall_offline::shared::config::DEFAULT_SYNC_PATH;
use rollcall_offline::{AppError, AttendanceRecord, OfflineAttendanceOptions, SyncError};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
struct CapturedRequest {
    csrf: Option<String>,
    content_type: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct MockState {
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    status: StatusCode,
    body: &'static str,
}

async fn handle_sync(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, &'static str) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    state.captured.lock().unwrap().push(CapturedRequest {
        csrf: header("x-csrftoken"),
        content_type: header("content-type"),
        body,
    });
    (state.status, state.body)
}

/// 固定の応答を返すモックサーバーを起動し、エンドポイントURLを返す
async fn spawn_mock_server(
    status: StatusCode,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        captured: captured.clone(),
        status,
        body,
    };
    let app = Router::new()
        .route(DEFAULT_SYNC_PATH, post(handle_sync))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind sync mock");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve sync mock");
    });

    (format!("http://{addr}{DEFAULT_SYNC_PATH}"), captured)
}

fn gateway(endpoint: &str, csrf: StaticCsrfToken) -> ReqwestSyncGateway {
    ReqwestSyncGateway::new(endpoint, Duration::from_secs(5), Arc::new(csrf)).unwrap()
}

fn sample_record() -> AttendanceRecord {
    serde_json::from_value(serde_json::json!({
        "id": 1704067200000_i64,
        "member_id": 1,
        "member_name": "John Smith",
        "member_phone": "555-0101",
        "service_id": 10,
        "service_name": "Sunday Service",
        "timestamp": "2024-01-01T00:00:00.000Z",
        "synced": false
    }))
    .unwrap()
}

#[tokio::test]
async fn test_push_sends_json_batch_with_csrf_header() {
    let (endpoint, captured) =
        spawn_mock_server(StatusCode::OK, r#"{"success":true,"synced_count":1}"#).await;
    let gateway = gateway(&endpoint, StaticCsrfToken::new("token-123"));

    let response = gateway
        .push_attendance(&SyncBatch::new(vec![sample_record()]))
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.synced_count, Some(1));

    let requests = captured.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].csrf.as_deref(), Some("token-123"));
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));

    let attendance = requests[0].body["attendance"].as_array().unwrap();
    assert_eq!(attendance.len(), 1);
    assert_eq!(attendance[0]["member_name"], "John Smith");
    assert_eq!(attendance[0]["service_id"], 10);
    assert_eq!(attendance[0]["timestamp"], "2024-01-01T00:00:00.000Z");
    assert_eq!(attendance[0]["synced"], false);
}

#[tokio::test]
async fn test_rejection_body_is_parsed_regardless_of_status() {
    let (endpoint, _) = spawn_mock_server(
        StatusCode::FORBIDDEN,
        r#"{"success":false,"error":"bad token"}"#,
    )
    .await;
    let gateway = gateway(&endpoint, StaticCsrfToken::new("stale"));

    let response = gateway
        .push_attendance(&SyncBatch::new(vec![sample_record()]))
        .await
        .unwrap();

    assert!(!response.success);
    assert_eq!(response.rejection_message(), "bad token");
}

#[tokio::test]
async fn test_non_json_body_is_a_deserialization_error() {
    let (endpoint, _) =
        spawn_mock_server(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>").await;
    let gateway = gateway(&endpoint, StaticCsrfToken::new("token-123"));

    let result = gateway
        .push_attendance(&SyncBatch::new(vec![sample_record()]))
        .await;

    assert!(matches!(result, Err(AppError::DeserializationError(_))));
}

#[tokio::test]
async fn test_missing_csrf_token_fails_before_request() {
    let (endpoint, captured) =
        spawn_mock_server(StatusCode::OK, r#"{"success":true,"synced_count":1}"#).await;
    let gateway = gateway(&endpoint, StaticCsrfToken::missing());

    let result = gateway
        .push_attendance(&SyncBatch::new(vec![sample_record()]))
        .await;

    assert!(matches!(result, Err(AppError::Auth(_))));
    assert!(captured.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let gateway = gateway(
        "http://127.0.0.1:1/admin/sync-offline-attendance/",
        StaticCsrfToken::new("token-123"),
    );

    let result = gateway
        .push_attendance(&SyncBatch::new(vec![sample_record()]))
        .await;

    assert!(matches!(result, Err(AppError::Network(_))));
}

#[tokio::test]
async fn test_end_to_end_sync_through_http() {
    let (endpoint, captured) =
        spawn_mock_server(StatusCode::OK, r#"{"success":true,"synced_count":2}"#).await;
    let (attendance, _, ui, notifier, _) = build_attendance(
        Arc::new(MemoryKeyValueStore::new()),
        Arc::new(gateway(&endpoint, StaticCsrfToken::new("token-123"))),
        OfflineAttendanceOptions::default(),
        true,
    );
    attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();
    attendance
        .mark_attendance(sample_input(2, "Jane Doe"))
        .await
        .unwrap();

    let report = attendance.sync_all().await.unwrap();

    assert_eq!(report.sent, 2);
    assert_eq!(attendance.pending_count().await.unwrap(), 0);
    assert_eq!(captured.lock().unwrap().len(), 1);
    assert_eq!(ui.last_badge().map(|badge| badge.count), Some(0));
    assert_eq!(
        notifier.last().map(|n| n.message),
        Some("Successfully synced 2 attendance records!".to_string())
    );
}

#[tokio::test]
async fn test_end_to_end_malformed_response_keeps_queue() {
    let (endpoint, _) = spawn_mock_server(StatusCode::BAD_GATEWAY, "upstream error").await;
    let (attendance, _, _, _, _) = build_attendance(
        Arc::new(MemoryKeyValueStore::new()),
        Arc::new(gateway(&endpoint, StaticCsrfToken::new("token-123"))),
        OfflineAttendanceOptions::default(),
        true,
    );
    attendance
        .mark_attendance(sample_input(1, "John Smith"))
        .await
        .unwrap();

    let result = attendance.sync_all().await;

    assert!(matches!(result, Err(SyncError::Transport(_))));
    assert_eq!(attendance.pending_count().await.unwrap(), 1);
}
