//! One fetch described as a value.
//!
//! [`FetchTask`] bundles the url, the configuration source, the lifecycle
//! slots and the optional gate predicate. It is built fluently and consumed
//! by the orchestrator.

use http::{HeaderMap, StatusCode};

use crate::cancel::CancelHandle;
use crate::config::{ConfigSource, RequestConfig};
use crate::content::Content;
use crate::lifecycle::Lifecycle;

/// Gate predicate: given the store's current state, may this fetch run?
pub type GateFn<S> = Box<dyn FnOnce(&S) -> bool + Send>;

/// Everything one orchestrator invocation needs.
///
/// # Type parameters
///
/// - `A`: the notification event type dispatched into the store
/// - `S`: the store state read by the optional gate predicate
///
/// # Example
///
/// ```
/// use store_fetch_core::{Content, FetchTask};
///
/// #[derive(Debug)]
/// enum Event {
///     Started,
///     Loaded(Content),
///     Failed(String),
/// }
///
/// struct AppState {
///     online: bool,
/// }
///
/// let task: FetchTask<Event, AppState> = FetchTask::new("/api/items")
///     .on_request(|_handle| Event::Started)
///     .on_receive(|content, _status, _headers| Event::Loaded(content))
///     .on_error(|message, _status| Event::Failed(message))
///     .gate(|state: &AppState| state.online);
/// assert_eq!(task.url(), "/api/items");
/// assert!(task.has_gate());
/// ```
pub struct FetchTask<A, S> {
    url: String,
    config: ConfigSource,
    lifecycle: Lifecycle<A>,
    gate: Option<GateFn<S>>,
}

impl<A, S> FetchTask<A, S> {
    /// Start describing a fetch of the given url.
    ///
    /// With nothing else configured this is a bare GET whose lifecycle
    /// dispatches no events at all.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: ConfigSource::default(),
            lifecycle: Lifecycle::new(),
            gate: None,
        }
    }

    /// Use a fixed request configuration.
    #[must_use]
    pub fn config(mut self, config: impl Into<ConfigSource>) -> Self {
        self.config = config.into();
        self
    }

    /// Compute the request configuration at call time, immediately before
    /// the transport call. The producer is re-run on every invocation,
    /// never cached.
    #[must_use]
    pub fn lazy_config<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> RequestConfig + Send + Sync + 'static,
    {
        self.config = ConfigSource::lazy(producer);
        self
    }

    /// Dispatch a "request started" event before the transport call.
    ///
    /// The constructor receives the cancellation handle when the
    /// environment supports one, so the store can keep it and cancel the
    /// exchange later.
    #[must_use]
    pub fn on_request<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(Option<CancelHandle>) -> A + Send + 'static,
    {
        self.lifecycle = self.lifecycle.on_request(ctor);
        self
    }

    /// Dispatch a "request succeeded" event with the parsed content, the
    /// status code and the response headers.
    #[must_use]
    pub fn on_receive<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(Content, StatusCode, HeaderMap) -> A + Send + 'static,
    {
        self.lifecycle = self.lifecycle.on_receive(ctor);
        self
    }

    /// Dispatch a "request failed" event with the failure message and, for
    /// HTTP failures, the status code.
    #[must_use]
    pub fn on_error<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(String, Option<StatusCode>) -> A + Send + 'static,
    {
        self.lifecycle = self.lifecycle.on_error(ctor);
        self
    }

    /// Dispatch a "request cancelled" event if the exchange is cancelled.
    #[must_use]
    pub fn on_abort<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        self.lifecycle = self.lifecycle.on_abort(ctor);
        self
    }

    /// Gate the whole invocation on the store's current state.
    ///
    /// When the predicate returns `false` nothing happens at all: no
    /// cancellation handle, no notification, no request.
    #[must_use]
    pub fn gate<F>(mut self, predicate: F) -> Self
    where
        F: FnOnce(&S) -> bool + Send + 'static,
    {
        self.gate = Some(Box::new(predicate));
        self
    }

    /// The target url.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The lifecycle slots.
    #[must_use]
    pub const fn lifecycle(&self) -> &Lifecycle<A> {
        &self.lifecycle
    }

    /// Whether a gate predicate is present.
    #[must_use]
    pub const fn has_gate(&self) -> bool {
        self.gate.is_some()
    }

    /// Break the task into its parts for execution.
    #[must_use]
    pub fn into_parts(self) -> (String, ConfigSource, Lifecycle<A>, Option<GateFn<S>>) {
        (self.url, self.config, self.lifecycle, self.gate)
    }
}

impl<A, S> std::fmt::Debug for FetchTask<A, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchTask")
            .field("url", &self.url)
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("gate", &self.has_gate())
            .finish()
    }
}
