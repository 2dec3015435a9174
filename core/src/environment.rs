//! Dependency seams: the network transport and the environment supplying
//! it.
//!
//! The orchestrator takes everything it cannot own through these traits.
//! That includes the possibly-absent cancellation capability: an
//! environment returning `None` from [`FetchEnvironment::cancel_handle`]
//! has no cancellation support, and the orchestrator degrades to running
//! without it rather than failing.

use std::future::Future;

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::cancel::{CancelHandle, CancelSignal};
use crate::config::RequestConfig;
use crate::error::TransportError;

/// A complete response from the transport: status, headers, and the full
/// body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The entire response body.
    pub body: Bytes,
}

impl TransportResponse {
    /// Assemble a response.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }
}

/// The network primitive behind the orchestrator.
///
/// Implementations issue exactly one request per call and return the full
/// response. They honour the cancel signal, when given one, by abandoning
/// the exchange with [`TransportError::Aborted`]; cancellation stops the
/// exchange itself, never the caller.
pub trait Transport: Send + Sync {
    /// Issue one request.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Connection`] when no response could be obtained
    /// - [`TransportError::Body`] when the response body could not be read
    /// - [`TransportError::Aborted`] when the signal fired mid-exchange
    fn execute(
        &self,
        url: &str,
        config: RequestConfig,
        signal: Option<CancelSignal>,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// The ambient capabilities one fetch invocation runs against.
pub trait FetchEnvironment: Send + Sync {
    /// The transport requests go through.
    type Transport: Transport;

    /// Access the transport.
    fn transport(&self) -> &Self::Transport;

    /// Create a cancellation handle for one invocation, or `None` when the
    /// environment has no cancellation support.
    fn cancel_handle(&self) -> Option<CancelHandle>;
}
