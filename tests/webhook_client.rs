use std::io;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use recordhook::{ErrorCategory, RecordError, WebhookClient, WebhookEndpoints};
use recordhook_commons::MemoryErrorReporter;
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WebhookClient {
    let endpoints = WebhookEndpoints::parse(
        &format!("{}/webhook/load", server.uri()),
        &format!("{}/webhook-test/save", server.uri()),
    )
    .expect("mock server URLs are valid");
    WebhookClient::new(endpoints)
}

#[tokio::test]
async fn get_unwraps_single_element_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webhook/load"))
        .and(query_param("id", "42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 42, "title": "Lesson plan"}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let record = client_for(&server)
        .get_record_details(42)
        .await
        .expect("record should load");

    assert_eq!(record, json!({"id": 42, "title": "Lesson plan"}));
}

#[tokio::test]
async fn get_passes_through_objects_and_multi_element_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", "obj"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "obj"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", "many"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", "none"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.get_record_details("obj").await.unwrap(), json!({"id": "obj"}));
    assert_eq!(
        client.get_record_details("many").await.unwrap(),
        json!([{"id": 1}, {"id": 2}])
    );
    assert_eq!(client.get_record_details("none").await.unwrap(), json!([]));
}

#[tokio::test]
async fn get_record_as_deserializes_typed_record() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Record {
        id: u64,
        title: String,
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"id": 7, "title": "Unit 7"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record: Record = client.get_record_as(7).await.unwrap();
    assert_eq!(
        record,
        Record {
            id: 7,
            title: "Unit 7".to_string()
        }
    );

    let err = client.get_record_as::<Vec<String>>(7).await.unwrap_err();
    assert!(matches!(err, RecordError::UnexpectedShape(_)));
}

#[tokio::test]
async fn save_posts_full_record_as_json() {
    let server = MockServer::start().await;
    let record = json!({"id": 9, "title": "Draft", "tags": ["a", "b"]});
    Mock::given(method("POST"))
        .and(path("/webhook-test/save"))
        .and(header("content-type", "application/json"))
        .and(body_json(&record))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"ok": true}])))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).save_record(&record).await.unwrap();
    assert_eq!(response, json!({"ok": true}));
}

#[tokio::test]
async fn json_error_body_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"code": 404, "message": "webhook not registered"})),
        )
        .mount(&server)
        .await;

    let reporter = MemoryErrorReporter::new();
    let client = client_for(&server).with_reporter(Arc::new(reporter.clone()));
    let err = client.get_record_details(1).await.unwrap_err();

    match &err {
        RecordError::Api {
            status,
            message,
            body,
        } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "webhook not registered");
            assert_eq!(body, &json!({"code": 404, "message": "webhook not registered"}));
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::ResourceNotFound);
    assert_eq!(reporter.take(), vec!["webhook not registered".to_string()]);
}

#[tokio::test]
async fn text_error_body_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .save_record(&json!({"id": 1}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Bad Gateway");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn error_without_message_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("id", "empty"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("id", "json"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_record_details("empty").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");

    let err = client.get_record_details("json").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Workflow was started"))
        .mount(&server)
        .await;

    let reporter = MemoryErrorReporter::new();
    let err = client_for(&server)
        .with_reporter(Arc::new(reporter.clone()))
        .get_record_details(3)
        .await
        .unwrap_err();

    assert!(matches!(err, RecordError::Decode { .. }));
    assert_eq!(err.category(), ErrorCategory::InvalidResponse);
    assert_eq!(reporter.take().len(), 1);
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    // Reserve a port and release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };
    let endpoints = WebhookEndpoints::parse(
        &format!("http://127.0.0.1:{port}/load"),
        &format!("http://127.0.0.1:{port}/save"),
    )
    .unwrap();

    let reporter = MemoryErrorReporter::new();
    let err = WebhookClient::new(endpoints)
        .with_reporter(Arc::new(reporter.clone()))
        .get_record_details(1)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Network(_)), "{err:?}");
    assert_eq!(err.category(), ErrorCategory::Network);
    assert!(err.is_retryable());

    // The reported message carries the transport cause, not just the wrapper.
    let reported = reporter.take();
    assert_eq!(reported.len(), 1);
    let summary = err.to_string();
    assert!(reported[0].starts_with(&summary), "{reported:?}");
    assert!(reported[0].len() > summary.len(), "{reported:?}");
}

#[tokio::test]
async fn empty_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .save_record(&json!({"id": 4}))
        .await
        .unwrap_err();

    match err {
        RecordError::Decode { status, .. } => assert_eq!(status.as_u16(), 200),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_json_message_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": ""})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_record_details(8).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 422");
    match err {
        RecordError::Api { body, .. } => assert_eq!(body, json!({"message": ""})),
        other => panic!("expected API error, got {other:?}"),
    }
}

/// Shared buffer the fmt subscriber writes log lines into.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|guard| guard.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn api_failure_logs_response_and_fetch_error() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "Workflow crashed"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).get_record_details(11).await.unwrap_err();
    assert_eq!(err.to_string(), "Workflow crashed");

    let output = logs.contents();
    let error_lines: Vec<&str> = output.lines().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(error_lines.len(), 2, "{output}");
    assert!(error_lines[0].contains("API error response"), "{output}");
    assert!(error_lines[0].contains("Workflow crashed"), "{output}");
    assert!(error_lines[1].contains("fetch error: Workflow crashed"), "{output}");
}

#[tokio::test]
async fn successful_request_logs_no_errors() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::ERROR)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;

    client_for(&server).get_record_details(1).await.unwrap();
    assert!(!logs.contents().contains("ERROR"), "{}", logs.contents());
}
