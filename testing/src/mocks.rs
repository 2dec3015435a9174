//! Mock implementations of the dependency seams.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use store_fetch_core::cancel::{CancelHandle, CancelSignal};
use store_fetch_core::config::RequestConfig;
use store_fetch_core::dispatch::Dispatcher;
use store_fetch_core::environment::{FetchEnvironment, Transport, TransportResponse};
use store_fetch_core::error::TransportError;

// ============================================================================
// RecordingDispatcher
// ============================================================================

/// Dispatcher that records every event it receives, in dispatch order.
///
/// Clones share the same log, so a test keeps one copy and hands another to
/// the orchestrator.
pub struct RecordingDispatcher<A> {
    events: Arc<Mutex<Vec<A>>>,
}

impl<A> RecordingDispatcher<A> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of events dispatched so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been dispatched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<A>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: Clone> RecordingDispatcher<A> {
    /// Snapshot of every event dispatched so far, in dispatch order.
    #[must_use]
    pub fn events(&self) -> Vec<A> {
        self.lock().clone()
    }
}

impl<A> Default for RecordingDispatcher<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for RecordingDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

impl<A> std::fmt::Debug for RecordingDispatcher<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingDispatcher")
            .field("events", &self.len())
            .finish()
    }
}

impl<A: Send> Dispatcher<A> for RecordingDispatcher<A> {
    fn dispatch(&self, event: A) {
        self.lock().push(event);
    }
}

// ============================================================================
// MockTransport
// ============================================================================

/// One request the mock transport received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Requested url.
    pub url: String,
    /// Request method.
    pub method: Method,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, when present.
    pub body: Option<Bytes>,
}

#[derive(Debug, Clone)]
enum Outcome {
    Respond(TransportResponse),
    Fail(TransportError),
}

/// Scripted [`Transport`]: maps urls to canned outcomes and records every
/// request it receives.
///
/// Unscripted urls fail with a connection error, so a test that forgets to
/// script still observes the failure path instead of hanging. An optional
/// latency is raced against the cancel signal, which is how cancellation
/// tests abort a fetch mid-flight.
#[derive(Debug, Default)]
pub struct MockTransport {
    outcomes: Mutex<HashMap<String, Outcome>>,
    requests: Mutex<Vec<RecordedRequest>>,
    latency: Option<Duration>,
}

impl MockTransport {
    /// Create a transport with nothing scripted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response with the given status and body for a url.
    #[must_use]
    pub fn respond(
        self,
        url: impl Into<String>,
        status: StatusCode,
        body: impl Into<Bytes>,
    ) -> Self {
        self.respond_with(url, TransportResponse::new(status, HeaderMap::new(), body))
    }

    /// Script a full response, headers included, for a url.
    #[must_use]
    pub fn respond_with(self, url: impl Into<String>, response: TransportResponse) -> Self {
        self.outcomes_lock().insert(url.into(), Outcome::Respond(response));
        self
    }

    /// Script a transport failure for a url.
    #[must_use]
    pub fn fail(self, url: impl Into<String>, error: TransportError) -> Self {
        self.outcomes_lock().insert(url.into(), Outcome::Fail(error));
        self
    }

    /// Delay every outcome, leaving cancellation tests a window to abort
    /// mid-flight.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every request received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests_lock().clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests_lock().len()
    }

    fn outcomes_lock(&self) -> MutexGuard<'_, HashMap<String, Outcome>> {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn requests_lock(&self) -> MutexGuard<'_, Vec<RecordedRequest>> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for MockTransport {
    fn execute(
        &self,
        url: &str,
        config: RequestConfig,
        signal: Option<CancelSignal>,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        let outcome = self.outcomes_lock().get(url).cloned();
        self.requests_lock().push(RecordedRequest {
            url: url.to_string(),
            method: config.method,
            headers: config.headers,
            body: config.body,
        });
        let latency = self.latency;
        let url = url.to_string();

        async move {
            if let Some(latency) = latency {
                match signal {
                    Some(signal) => tokio::select! {
                        () = tokio::time::sleep(latency) => {}
                        () = signal.cancelled() => return Err(TransportError::Aborted),
                    },
                    None => tokio::time::sleep(latency).await,
                }
            } else if let Some(signal) = &signal {
                if signal.is_cancelled() {
                    return Err(TransportError::Aborted);
                }
            }

            match outcome {
                Some(Outcome::Respond(response)) => Ok(response),
                Some(Outcome::Fail(error)) => Err(error),
                None => Err(TransportError::Connection(format!(
                    "no scripted outcome for {url}"
                ))),
            }
        }
    }
}

// ============================================================================
// MockEnvironment
// ============================================================================

/// [`FetchEnvironment`] over a [`MockTransport`].
///
/// Issues a fresh [`CancelHandle`] per invocation by default;
/// [`without_cancellation`] models an environment with no cancellation
/// primitive.
///
/// [`without_cancellation`]: MockEnvironment::without_cancellation
#[derive(Debug)]
pub struct MockEnvironment {
    transport: MockTransport,
    cancellation: bool,
}

impl MockEnvironment {
    /// Environment over the given transport, with cancellation support.
    #[must_use]
    pub const fn new(transport: MockTransport) -> Self {
        Self {
            transport,
            cancellation: true,
        }
    }

    /// Disable cancellation support.
    #[must_use]
    pub const fn without_cancellation(mut self) -> Self {
        self.cancellation = false;
        self
    }

    /// The transport, for request assertions.
    #[must_use]
    pub const fn transport(&self) -> &MockTransport {
        &self.transport
    }
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new(MockTransport::new())
    }
}

impl FetchEnvironment for MockEnvironment {
    type Transport = MockTransport;

    fn transport(&self) -> &Self::Transport {
        &self.transport
    }

    fn cancel_handle(&self) -> Option<CancelHandle> {
        self.cancellation.then(CancelHandle::new)
    }
}
