// tests/scan_client_test.rs

use scanwatch_rs::app::{App, AppState, ScanEvent};
use scanwatch_rs::config::Endpoints;
use scanwatch_rs::core::error::ScanError;
use scanwatch_rs::core::models::{ScanDetails, ScanStatus, ScannerKind};
use scanwatch_rs::core::scanner::{ScanClient, ScanRequest};
use scanwatch_rs::core::validation::prepare_file_input;
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string_contains, header_regex, method, path},
};

fn client_for(server: &MockServer) -> ScanClient {
    ScanClient::new(Endpoints::with_base(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_url_scan_posts_input_and_maps_list_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-url"))
        .and(body_json(json!({"input": "example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "meta": {"url_info": {"url": "https://example.com/"}},
            "data": {
                "id": "u-abc-123",
                "attributes": {
                    "date": 1_700_000_000,
                    "status": "completed",
                    "stats": {"harmless": 70, "malicious": 0, "suspicious": 1, "undetected": 9},
                    "results": {
                        "Engine A": {"category": "harmless", "result": "clean", "method": "blacklist", "engine_name": "Engine A"},
                        "Engine B": {"category": "suspicious", "result": "suspicious", "method": "blacklist", "engine_name": "Engine B"}
                    }
                }
            }
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).scan_url("example.com").await.unwrap();

    assert_eq!(result.status, ScanStatus::Warning);
    assert_eq!(result.score, Some(88));
    assert_eq!(result.threats, vec!["Engine B: suspicious"]);
    match &result.report {
        ScanDetails::Url(report) => {
            assert_eq!(report.url, "https://example.com/");
            assert_eq!(report.analysis_id, "u-abc-123");
            assert_eq!(report.engines.len(), 2);
        }
        other => panic!("expected a URL report, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ip_scan_unwraps_data_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-ip"))
        .and(body_json(json!({"input": "8.8.8.8"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "ipAddress": "8.8.8.8",
                "abuseConfidenceScore": 0,
                "countryCode": "US",
                "isp": "Google LLC",
                "isTor": false,
                "totalReports": 0
            }
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).scan_ip("8.8.8.8").await.unwrap();

    assert_eq!(result.status, ScanStatus::Safe);
    assert_eq!(result.score, Some(100));
    assert!(result.threats.is_empty());
}

#[tokio::test]
async fn test_ip_scan_empty_object_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).scan_ip("8.8.8.8").await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_error_status_surfaces_message_and_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-url"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "message": "The requested webhook \"check-url\" is not registered.",
            "hint": "Click the 'Execute workflow' button on the canvas"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).scan_url("example.com").await.unwrap_err();
    match &err {
        ScanError::Http { status, message } => {
            assert_eq!(*status, 404);
            assert_eq!(
                message,
                "The requested webhook \"check-url\" is not registered. - Click the 'Execute workflow' button on the canvas"
            );
        }
        other => panic!("expected an HTTP error, got {other:?}"),
    }
    assert_eq!(err.user_message(ScannerKind::Url), err.to_string());
}

#[tokio::test]
async fn test_non_json_success_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-url"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server).scan_url("example.com").await.unwrap_err();
    assert!(matches!(err, ScanError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_slow_webhook_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-ip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"abuseConfidenceScore": 0}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).with_timeouts(Duration::from_millis(100), Duration::from_millis(100));
    let err = client.scan_ip("8.8.8.8").await.unwrap_err();

    assert!(matches!(err, ScanError::Timeout { .. }));
    assert_eq!(err.user_message(ScannerKind::Ip), "Scan timeout. Please try again.");
    assert_eq!(
        err.user_message(ScannerKind::File),
        "File scan timeout. Please try again with a smaller file."
    );
}

#[tokio::test]
async fn test_file_scan_uploads_multipart_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook-test/check-file"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("%PDF-1.4 sample"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "harmless": 50, "malicious": 1, "suspicious": 0, "undetected": 49,
            "status": "completed",
            "threats": ["Exploit.PDF.Gen"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut upload = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    upload.write_all(b"%PDF-1.4 sample").unwrap();
    let file = prepare_file_input(upload.path().to_str().unwrap()).unwrap();
    assert_eq!(file.mime, "application/pdf");

    let result = client_for(&mock_server).run(ScanRequest::File(file)).await.unwrap();

    assert_eq!(result.status, ScanStatus::Danger);
    assert_eq!(result.score, Some(50));
    assert_eq!(result.threats, vec!["Exploit.PDF.Gen"]);
}

#[tokio::test]
async fn test_app_scan_round_trip_through_channel() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-ip"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"abuseConfidenceScore": 35}])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (tx, mut rx) = mpsc::channel::<ScanEvent>(4);
    let mut app = App::new();
    app.switch_scanner(ScannerKind::Ip);
    app.input = " 8.8.8.8 ".into();

    app.begin_scan(&client, &tx);
    assert_eq!(app.state, AppState::Scanning);

    let event = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.unwrap().unwrap();
    assert_eq!(event.subject, "8.8.8.8");
    assert!(app.apply_event(event));

    assert_eq!(app.state, AppState::Finished);
    let result = app.scan_result.as_ref().unwrap();
    assert_eq!(result.status, ScanStatus::Warning);
    assert_eq!(result.score, Some(65));
    assert_eq!(app.notification.as_ref().unwrap().title, "Scan Complete");
}

#[tokio::test]
async fn test_switching_scanner_cancels_in_flight_scan() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/check-ip"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"abuseConfidenceScore": 90}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (tx, mut rx) = mpsc::channel::<ScanEvent>(4);
    let mut app = App::new();
    app.switch_scanner(ScannerKind::Ip);
    app.input = "1.2.3.4".into();

    app.begin_scan(&client, &tx);
    app.switch_scanner(ScannerKind::Url);

    // The aborted task never reports back.
    let outcome = tokio::time::timeout(Duration::from_millis(800), rx.recv()).await;
    assert!(outcome.is_err());
    assert_eq!(app.state, AppState::Idle);
    assert!(app.scan_result.is_none());
}

#[tokio::test]
async fn test_invalid_input_never_reaches_the_network() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let (tx, _rx) = mpsc::channel::<ScanEvent>(4);
    let mut app = App::new();
    app.switch_scanner(ScannerKind::Ip);
    app.input = "192.168.1.10".into();

    app.begin_scan(&client, &tx);

    assert_eq!(app.state, AppState::Idle);
    let note = app.notification.as_ref().unwrap();
    assert_eq!(note.title, "Invalid IP Address");
}
