//! The four optional lifecycle notification slots.

use http::{HeaderMap, StatusCode};

use crate::cancel::CancelHandle;
use crate::content::Content;

/// Constructor for the "request started" notification.
///
/// Receives the cancellation handle when the environment supports one.
pub type RequestFn<A> = Box<dyn FnOnce(Option<CancelHandle>) -> A + Send>;

/// Constructor for the "request succeeded" notification.
pub type ReceiveFn<A> = Box<dyn FnOnce(Content, StatusCode, HeaderMap) -> A + Send>;

/// Constructor for the "request failed" notification.
///
/// Receives the failure message and, for HTTP failures, the status code.
pub type ErrorFn<A> = Box<dyn FnOnce(String, Option<StatusCode>) -> A + Send>;

/// Constructor for the "request cancelled" notification.
pub type AbortFn<A> = Box<dyn FnOnce() -> A + Send>;

/// The lifecycle interface of a fetch: four independently optional
/// notification constructors.
///
/// Each slot that is present is invoked at most once per invocation and its
/// event handed to the dispatcher. Absent slots silence their stage: a
/// fetch with no receive slot completes without dispatching anything, and a
/// fetch with no error slot fails silently.
pub struct Lifecycle<A> {
    /// "Request started" slot.
    pub request: Option<RequestFn<A>>,
    /// "Request succeeded" slot.
    pub receive: Option<ReceiveFn<A>>,
    /// "Request failed" slot.
    pub error: Option<ErrorFn<A>>,
    /// "Request cancelled" slot.
    pub abort: Option<AbortFn<A>>,
}

impl<A> Lifecycle<A> {
    /// Create a lifecycle with every slot absent.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            request: None,
            receive: None,
            error: None,
            abort: None,
        }
    }

    /// Fill the "request started" slot.
    #[must_use]
    pub fn on_request<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(Option<CancelHandle>) -> A + Send + 'static,
    {
        self.request = Some(Box::new(ctor));
        self
    }

    /// Fill the "request succeeded" slot.
    #[must_use]
    pub fn on_receive<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(Content, StatusCode, HeaderMap) -> A + Send + 'static,
    {
        self.receive = Some(Box::new(ctor));
        self
    }

    /// Fill the "request failed" slot.
    #[must_use]
    pub fn on_error<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce(String, Option<StatusCode>) -> A + Send + 'static,
    {
        self.error = Some(Box::new(ctor));
        self
    }

    /// Fill the "request cancelled" slot.
    #[must_use]
    pub fn on_abort<F>(mut self, ctor: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        self.abort = Some(Box::new(ctor));
        self
    }

    /// Whether the "request started" slot is filled.
    #[must_use]
    pub const fn has_request(&self) -> bool {
        self.request.is_some()
    }

    /// Whether the "request succeeded" slot is filled.
    #[must_use]
    pub const fn has_receive(&self) -> bool {
        self.receive.is_some()
    }

    /// Whether the "request failed" slot is filled.
    #[must_use]
    pub const fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Whether the "request cancelled" slot is filled.
    #[must_use]
    pub const fn has_abort(&self) -> bool {
        self.abort.is_some()
    }
}

impl<A> Default for Lifecycle<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for Lifecycle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("request", &self.has_request())
            .field("receive", &self.has_receive())
            .field("error", &self.has_error())
            .field("abort", &self.has_abort())
            .finish()
    }
}
