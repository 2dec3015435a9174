//! Production transport over a shared reqwest client.

use std::future::Future;

use store_fetch_core::cancel::CancelSignal;
use store_fetch_core::config::RequestConfig;
use store_fetch_core::environment::{Transport, TransportResponse};
use store_fetch_core::error::TransportError;

/// [`Transport`] implementation backed by [`reqwest`].
///
/// One clonable client with its connection pool; every [`execute`] call
/// issues exactly one request and collects the full body before returning.
/// The cancel signal is raced against both the exchange and the body
/// collection, so cancellation surfaces as [`TransportError::Aborted`]
/// rather than a half-read response.
///
/// Invalid urls and unconstructable requests surface through the same
/// failure path as connection errors; nothing here panics.
///
/// [`execute`]: Transport::execute
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a transport over an existing client, sharing its pool and
    /// any custom TLS, proxy or timeout settings.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        url: &str,
        config: RequestConfig,
        signal: Option<CancelSignal>,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        async move {
            let RequestConfig { method, headers, body } = config;

            let request = self.client.request(method, url).headers(headers);
            let request = match body {
                Some(body) => request.body(body),
                None => request,
            };

            let send = request.send();
            let response = match signal.clone() {
                Some(signal) => tokio::select! {
                    response = send => response,
                    () = signal.cancelled() => return Err(TransportError::Aborted),
                },
                None => send.await,
            }
            .map_err(|error| TransportError::Connection(error.to_string()))?;

            let status = response.status();
            let headers = response.headers().clone();

            let collect = response.bytes();
            let body = match signal {
                Some(signal) => tokio::select! {
                    body = collect => body,
                    () = signal.cancelled() => return Err(TransportError::Aborted),
                },
                None => collect.await,
            }
            .map_err(|error| TransportError::Body(error.to_string()))?;

            Ok(TransportResponse { status, headers, body })
        }
    }
}
