//! Integration tests for the fetch lifecycle orchestrator.
//!
//! Drives `run_fetch` against the scripted transport and recording
//! dispatcher, covering every lifecycle path: gate skip, success, HTTP
//! failure, transport failure, and the dispatch contract of each
//! notification slot.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use http::header::{CONTENT_TYPE, HeaderValue};
use http::{HeaderMap, Method, StatusCode};
use serde_json::json;
use store_fetch_core::config::RequestConfig;
use store_fetch_core::content::Content;
use store_fetch_core::environment::TransportResponse;
use store_fetch_core::error::{FALLBACK_ERROR_MESSAGE, TransportError};
use store_fetch_core::task::FetchTask;
use store_fetch_runtime::run_fetch;
use store_fetch_testing::{MockEnvironment, MockTransport, RecordingDispatcher};

// ============================================================================
// Test Fixtures
// ============================================================================

/// Notification events dispatched into the test store.
#[derive(Debug, Clone, PartialEq)]
enum Event {
    Started { cancellable: bool },
    Received { content: Content, status: u16, header_count: usize },
    Failed { message: String, status: Option<u16> },
    Cancelled,
}

/// Store state read by gate predicates.
#[derive(Debug, Clone)]
struct State {
    online: bool,
}

fn online() -> State {
    State { online: true }
}

fn offline() -> State {
    State { online: false }
}

/// A task with every lifecycle slot filled.
fn full_task(url: &str) -> FetchTask<Event, State> {
    FetchTask::new(url)
        .on_request(|handle| Event::Started {
            cancellable: handle.is_some(),
        })
        .on_receive(|content, status, headers| Event::Received {
            content,
            status: status.as_u16(),
            header_count: headers.len(),
        })
        .on_error(|message, status| Event::Failed {
            message,
            status: status.map(|code| code.as_u16()),
        })
        .on_abort(|| Event::Cancelled)
}

// ============================================================================
// Gate
// ============================================================================

/// A closed gate produces no event and no request at all.
#[tokio::test]
async fn closed_gate_skips_the_whole_invocation() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, r#"{"id":1}"#),
    );
    let dispatcher = RecordingDispatcher::new();

    let task = full_task("/api/items").gate(|state| state.online);
    run_fetch(&environment, task, dispatcher.clone(), offline).await;

    assert!(dispatcher.is_empty());
    assert_eq!(environment.transport().request_count(), 0);
}

/// An open gate lets the invocation proceed normally.
#[tokio::test]
async fn open_gate_proceeds() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, r#"{"id":1}"#),
    );
    let dispatcher = RecordingDispatcher::new();

    let task = full_task("/api/items").gate(|state| state.online);
    run_fetch(&environment, task, dispatcher.clone(), online).await;

    assert_eq!(environment.transport().request_count(), 1);
    assert_eq!(dispatcher.len(), 2);
}

/// Ungated tasks never consult the state.
#[tokio::test]
async fn missing_gate_always_proceeds() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, "[]"),
    );
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/items"), dispatcher.clone(), offline).await;

    assert_eq!(environment.transport().request_count(), 1);
}

// ============================================================================
// Success path
// ============================================================================

/// The canonical happy path: request notification first, then the parsed
/// body, status and headers through the receive slot.
#[tokio::test]
async fn success_dispatches_request_then_receive() {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    let environment = MockEnvironment::new(MockTransport::new().respond_with(
        "/api/items",
        TransportResponse::new(StatusCode::OK, headers, r#"{"id": 1}"#),
    ));
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/items"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events(),
        vec![
            Event::Started { cancellable: true },
            Event::Received {
                content: Content::Structured(json!({"id": 1})),
                status: 200,
                header_count: 1,
            },
        ]
    );
    assert_eq!(environment.transport().request_count(), 1);
}

/// Non-JSON bodies fall back to text without failing the fetch.
#[tokio::test]
async fn text_body_falls_back_on_the_success_path() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/motd", StatusCode::OK, "hello world"),
    );
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/motd"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events()[1],
        Event::Received {
            content: Content::Text("hello world".to_string()),
            status: 200,
            header_count: 0,
        }
    );
}

/// An empty 200 body is a success with empty text content.
#[tokio::test]
async fn empty_success_body_is_empty_text() {
    let environment =
        MockEnvironment::new(MockTransport::new().respond("/api/ping", StatusCode::OK, ""));
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/ping"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events()[1],
        Event::Received {
            content: Content::Text(String::new()),
            status: 200,
            header_count: 0,
        }
    );
}

/// Without a receive slot a successful fetch completes silently.
#[tokio::test]
async fn missing_receive_slot_silences_success() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, "[]"),
    );
    let dispatcher = RecordingDispatcher::new();

    let task: FetchTask<Event, State> = FetchTask::new("/api/items").on_request(|handle| {
        Event::Started {
            cancellable: handle.is_some(),
        }
    });
    run_fetch(&environment, task, dispatcher.clone(), online).await;

    assert_eq!(dispatcher.events(), vec![Event::Started { cancellable: true }]);
}

// ============================================================================
// Failure path
// ============================================================================

/// HTTP error statuses dispatch the error slot with the body text and the
/// status code.
#[tokio::test]
async fn http_error_status_dispatches_error() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/missing", StatusCode::NOT_FOUND, "not found"),
    );
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/missing"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events(),
        vec![
            Event::Started { cancellable: true },
            Event::Failed {
                message: "not found".to_string(),
                status: Some(404),
            },
        ]
    );
}

/// Structured error bodies arrive stringified.
#[tokio::test]
async fn structured_error_body_is_stringified() {
    let environment = MockEnvironment::new(MockTransport::new().respond(
        "/err",
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"error": "boom"}"#,
    ));
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/err"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events()[1],
        Event::Failed {
            message: r#"{"error":"boom"}"#.to_string(),
            status: Some(500),
        }
    );
}

/// An empty error body falls back to the shared failure message.
#[tokio::test]
async fn empty_error_body_falls_back_to_default_message() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/empty", StatusCode::NOT_FOUND, ""),
    );
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/empty"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events()[1],
        Event::Failed {
            message: FALLBACK_ERROR_MESSAGE.to_string(),
            status: Some(404),
        }
    );
}

/// The error range is exactly [400, 600): 399 succeeds, 400 and 599 fail.
#[tokio::test]
async fn classification_boundaries() {
    let environment = MockEnvironment::new(
        MockTransport::new()
            .respond("/e399", StatusCode::from_u16(399).unwrap(), "odd")
            .respond("/e400", StatusCode::BAD_REQUEST, "bad")
            .respond("/e599", StatusCode::from_u16(599).unwrap(), "worse"),
    );

    let dispatcher = RecordingDispatcher::new();
    run_fetch(&environment, full_task("/e399"), dispatcher.clone(), online).await;
    assert!(matches!(dispatcher.events()[1], Event::Received { status: 399, .. }));

    let dispatcher = RecordingDispatcher::new();
    run_fetch(&environment, full_task("/e400"), dispatcher.clone(), online).await;
    assert!(matches!(dispatcher.events()[1], Event::Failed { status: Some(400), .. }));

    let dispatcher = RecordingDispatcher::new();
    run_fetch(&environment, full_task("/e599"), dispatcher.clone(), online).await;
    assert!(matches!(dispatcher.events()[1], Event::Failed { status: Some(599), .. }));
}

/// Transport failures carry no status code.
#[tokio::test]
async fn transport_failure_has_no_status() {
    let environment = MockEnvironment::new(MockTransport::new().fail(
        "/down",
        TransportError::Connection("connection refused".to_string()),
    ));
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/down"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events(),
        vec![
            Event::Started { cancellable: true },
            Event::Failed {
                message: "connection refused".to_string(),
                status: None,
            },
        ]
    );
}

/// Unreadable bodies surface through the failure path, message only.
#[tokio::test]
async fn body_read_failure_has_no_status() {
    let environment = MockEnvironment::new(MockTransport::new().fail(
        "/cut",
        TransportError::Body("connection reset".to_string()),
    ));
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/cut"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events()[1],
        Event::Failed {
            message: "failed to read response body: connection reset".to_string(),
            status: None,
        }
    );
}

/// Without an error slot the failure is swallowed and the future still
/// completes normally.
#[tokio::test]
async fn missing_error_slot_swallows_failures() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/err", StatusCode::INTERNAL_SERVER_ERROR, "boom"),
    );
    let dispatcher = RecordingDispatcher::new();

    let task: FetchTask<Event, State> = FetchTask::new("/err")
        .on_receive(|content, status, headers| Event::Received {
            content,
            status: status.as_u16(),
            header_count: headers.len(),
        });
    run_fetch(&environment, task, dispatcher.clone(), online).await;

    assert!(dispatcher.is_empty());
    assert_eq!(environment.transport().request_count(), 1);
}

// ============================================================================
// Configuration
// ============================================================================

/// The default configuration is a bare GET.
#[tokio::test]
async fn default_configuration_is_a_bare_get() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, "[]"),
    );
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/items"), dispatcher.clone(), online).await;

    let requests = environment.transport().requests();
    assert_eq!(requests[0].method, Method::GET);
    assert!(requests[0].headers.is_empty());
    assert!(requests[0].body.is_none());
}

/// Fixed configuration reaches the transport as given.
#[tokio::test]
async fn fixed_configuration_reaches_the_transport() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::CREATED, "{}"),
    );
    let dispatcher = RecordingDispatcher::new();

    let task = full_task("/api/items").config(
        RequestConfig::new()
            .method(Method::POST)
            .header("authorization", "Bearer token")
            .json(&json!({"name": "anvil"})),
    );
    run_fetch(&environment, task, dispatcher.clone(), online).await;

    let requests = environment.transport().requests();
    assert_eq!(requests[0].method, Method::POST);
    assert!(requests[0].headers.contains_key("authorization"));
    assert_eq!(
        requests[0].headers.get(CONTENT_TYPE).map(HeaderValue::as_bytes),
        Some(b"application/json".as_slice())
    );
    assert_eq!(
        requests[0].body.as_ref().map(|body| body.as_ref()),
        Some(br#"{"name":"anvil"}"#.as_slice())
    );
}

/// A lazy configuration source is re-run on every invocation and observes
/// state as it is at call time.
#[tokio::test]
async fn lazy_configuration_resolves_fresh_per_invocation() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, "[]"),
    );
    let calls = Arc::new(AtomicUsize::new(0));

    let make_task = |calls: Arc<AtomicUsize>| {
        FetchTask::<Event, State>::new("/api/items").lazy_config(move || {
            let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
            RequestConfig::new().header("x-call", &call.to_string())
        })
    };

    let dispatcher = RecordingDispatcher::new();
    run_fetch(&environment, make_task(Arc::clone(&calls)), dispatcher.clone(), online).await;
    run_fetch(&environment, make_task(Arc::clone(&calls)), dispatcher.clone(), online).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    let requests = environment.transport().requests();
    assert_eq!(
        requests[0].headers.get("x-call").map(HeaderValue::as_bytes),
        Some(b"1".as_slice())
    );
    assert_eq!(
        requests[1].headers.get("x-call").map(HeaderValue::as_bytes),
        Some(b"2".as_slice())
    );
}

// ============================================================================
// Degraded environment
// ============================================================================

/// Without cancellation support the request notification carries no
/// handle, and the fetch still completes normally.
#[tokio::test]
async fn degraded_environment_passes_no_handle() {
    let environment = MockEnvironment::new(
        MockTransport::new().respond("/api/items", StatusCode::OK, "[]"),
    )
    .without_cancellation();
    let dispatcher = RecordingDispatcher::new();

    run_fetch(&environment, full_task("/api/items"), dispatcher.clone(), online).await;

    assert_eq!(
        dispatcher.events(),
        vec![
            Event::Started { cancellable: false },
            Event::Received {
                content: Content::Structured(json!([])),
                status: 200,
                header_count: 0,
            },
        ]
    );
}
