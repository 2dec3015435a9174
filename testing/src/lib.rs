//! # Store Fetch Testing
//!
//! Test doubles for exercising the fetch lifecycle without a network.
//!
//! This crate provides:
//! - [`MockTransport`]: scripted url-to-outcome responses, request
//!   recording, optional latency for cancellation windows
//! - [`RecordingDispatcher`]: captures notification events in dispatch
//!   order
//! - [`MockEnvironment`]: wires the mock transport to a cancellation
//!   toggle
//!
//! ## Example
//!
//! ```
//! use http::StatusCode;
//! use store_fetch_core::Transport;
//! use store_fetch_testing::{MockEnvironment, MockTransport};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let environment = MockEnvironment::new(
//!     MockTransport::new().respond("/api/items", StatusCode::OK, r#"[1, 2]"#),
//! );
//! let response = environment
//!     .transport()
//!     .execute("/api/items", Default::default(), None)
//!     .await;
//! assert!(response.is_ok());
//! # }
//! ```

/// Mock implementations of the dependency seams.
pub mod mocks;

pub use mocks::{MockEnvironment, MockTransport, RecordedRequest, RecordingDispatcher};
