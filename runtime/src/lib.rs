//! # Store Fetch Runtime
//!
//! The orchestrator that drives one fetch lifecycle on behalf of a store,
//! plus the production reqwest transport and environment.
//!
//! ## Core Components
//!
//! - **[`run_fetch`]**: the single entry point. Gate check, cancellation
//!   setup, request notification, transport call, body parse, status
//!   classification, and the one failure sink.
//! - **[`HttpTransport`]**: reqwest-backed [`Transport`] racing the
//!   exchange against the cancel signal.
//! - **[`ClientEnvironment`]**: production [`FetchEnvironment`] issuing a
//!   fresh cancellation handle per invocation.
//!
//! [`Transport`]: store_fetch_core::environment::Transport
//! [`FetchEnvironment`]: store_fetch_core::environment::FetchEnvironment
//!
//! ## Example
//!
//! ```ignore
//! use store_fetch_core::FetchTask;
//! use store_fetch_runtime::{ClientEnvironment, run_fetch};
//!
//! let environment = ClientEnvironment::new();
//! let task = FetchTask::new("https://example.com/api/items")
//!     .on_request(|handle| AppEvent::FetchStarted(handle))
//!     .on_receive(|content, _status, _headers| AppEvent::ItemsLoaded(content))
//!     .on_error(|message, status| AppEvent::ItemsFailed { message, status })
//!     .on_abort(|| AppEvent::FetchCancelled);
//!
//! run_fetch(&environment, task, dispatch, || store.snapshot()).await;
//! ```

/// The lifecycle orchestrator.
pub mod fetch;

/// Production transport over reqwest.
pub mod transport;

/// Production environment wiring transport and cancellation together.
pub mod environment;

pub use environment::ClientEnvironment;
pub use fetch::run_fetch;
pub use transport::HttpTransport;
