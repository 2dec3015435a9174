//! # Store Fetch Core
//!
//! Core types and dependency seams for the store-fetch orchestrator: a
//! single entry point that issues one HTTP request on behalf of a
//! state-management store and converts the request's lifecycle into
//! dispatched notification events.
//!
//! ## Core Concepts
//!
//! - **[`FetchTask`]**: one fetch described as a value. Url, configuration
//!   source, lifecycle slots, optional gate predicate.
//! - **[`Lifecycle`]**: four independently optional notification
//!   constructors (request, receive, error, abort). Absent slots silence
//!   their stage.
//! - **[`ConfigSource`]**: fixed configuration, or a producer resolved
//!   freshly at call time.
//! - **[`Content`]**: the parsed response body, structured when it is JSON
//!   and plain text otherwise. Parsing is total.
//! - **[`Dispatcher`]**: the seam through which events reach the store.
//! - **[`Transport`] / [`FetchEnvironment`]**: injected network and
//!   cancellation capabilities. An environment without a cancellation
//!   primitive simply returns no handle.
//! - **[`CancelHandle`] / [`CancelSignal`]**: cooperative cancellation of
//!   an in-flight exchange.
//!
//! The orchestrator itself lives in the runtime crate; everything here is
//! runtime-agnostic apart from the watch channel behind cancellation.
//!
//! ## Example
//!
//! ```
//! use store_fetch_core::{Content, FetchTask, RequestConfig};
//!
//! #[derive(Debug)]
//! enum Event {
//!     Loaded(Content),
//!     Failed { message: String, status: Option<u16> },
//! }
//!
//! let task: FetchTask<Event, ()> = FetchTask::new("/api/items")
//!     .config(RequestConfig::new().header("accept", "application/json"))
//!     .on_receive(|content, _status, _headers| Event::Loaded(content))
//!     .on_error(|message, status| Event::Failed {
//!         message,
//!         status: status.map(|code| code.as_u16()),
//!     });
//! assert!(task.lifecycle().has_receive());
//! ```

pub mod cancel;
pub mod config;
pub mod content;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod lifecycle;
pub mod task;

pub use cancel::{CancelHandle, CancelSignal};
pub use config::{ConfigSource, RequestConfig};
pub use content::Content;
pub use dispatch::Dispatcher;
pub use environment::{FetchEnvironment, Transport, TransportResponse};
pub use error::{FALLBACK_ERROR_MESSAGE, FetchError, TransportError, is_error_status};
pub use lifecycle::{AbortFn, ErrorFn, Lifecycle, ReceiveFn, RequestFn};
pub use task::{FetchTask, GateFn};

// Re-export the wire types that appear throughout the public API.
pub use bytes::Bytes;
pub use http::{HeaderMap, Method, StatusCode};
