//! Production environment: the reqwest transport plus per-invocation
//! cancellation handles.

use store_fetch_core::cancel::CancelHandle;
use store_fetch_core::environment::FetchEnvironment;

use crate::transport::HttpTransport;

/// [`FetchEnvironment`] over an [`HttpTransport`].
///
/// Every invocation gets a fresh [`CancelHandle`] unless the environment
/// was built [`without_cancellation`], which models a platform with no
/// cancellation primitive: the orchestrator then runs with no handle, no
/// signal and no abort notification.
///
/// [`without_cancellation`]: ClientEnvironment::without_cancellation
#[derive(Debug, Clone)]
pub struct ClientEnvironment {
    transport: HttpTransport,
    cancellation: bool,
}

impl ClientEnvironment {
    /// Environment with a fresh client and cancellation support.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transport: HttpTransport::new(),
            cancellation: true,
        }
    }

    /// Environment over an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self {
            transport: HttpTransport::with_client(client),
            cancellation: true,
        }
    }

    /// Disable cancellation support.
    #[must_use]
    pub const fn without_cancellation(mut self) -> Self {
        self.cancellation = false;
        self
    }
}

impl Default for ClientEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchEnvironment for ClientEnvironment {
    type Transport = HttpTransport;

    fn transport(&self) -> &Self::Transport {
        &self.transport
    }

    fn cancel_handle(&self) -> Option<CancelHandle> {
        self.cancellation.then(CancelHandle::new)
    }
}
