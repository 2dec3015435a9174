//! Error taxonomy for the fetch lifecycle.
//!
//! Two layers. [`TransportError`] covers what the wire can do to a request
//! (connectivity, body reads, cancellation). [`FetchError`] adds the
//! HTTP-status classification on top and is the single type funnelled into
//! the orchestrator's failure sink.

use http::StatusCode;
use thiserror::Error;

/// Message dispatched when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "request failed";

/// Inclusive lower bound of the HTTP error range.
const ERROR_RANGE_START: u16 = 400;
/// Exclusive upper bound of the HTTP error range.
const ERROR_RANGE_END: u16 = 600;

/// Whether a status code classifies the response as a failure.
///
/// The range is a fixed contract: `[400, 600)`. Everything below 400,
/// informational and redirect codes included, takes the success path.
#[must_use]
pub fn is_error_status(status: StatusCode) -> bool {
    (ERROR_RANGE_START..ERROR_RANGE_END).contains(&status.as_u16())
}

/// Failures below the HTTP layer: the request never produced a usable
/// response.
///
/// None of these carry a status code, which is how stores tell connectivity
/// problems apart from HTTP failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connectivity-level failure: DNS, refused connection, TLS, a request
    /// the client could not construct.
    #[error("{0}")]
    Connection(String),

    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The exchange was cancelled through its [`CancelHandle`].
    ///
    /// [`CancelHandle`]: crate::cancel::CancelHandle
    #[error("request cancelled")]
    Aborted,
}

/// Terminal failure of one fetch invocation.
///
/// Everything the failure sink sees is one of these: a transport failure
/// with no status, or an HTTP-status failure carrying the body-derived
/// message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The transport failed before a classifiable response existed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response status fell in the error range.
    #[error("{message}")]
    Status {
        /// The classifying status code.
        status: StatusCode,
        /// Message derived from the response body.
        message: String,
    },
}

impl FetchError {
    /// The message an error notification should carry.
    ///
    /// Substitutes [`FALLBACK_ERROR_MESSAGE`] when the underlying message
    /// is empty, as with an error response whose body was empty.
    #[must_use]
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }

    /// The status code, when the failure came from HTTP classification.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// Whether this failure is a cancellation.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Aborted))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_of_the_error_range() {
        assert!(!is_error_status(StatusCode::from_u16(399).unwrap()));
        assert!(is_error_status(StatusCode::BAD_REQUEST));
        assert!(is_error_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_error_status(StatusCode::from_u16(599).unwrap()));
        assert!(!is_error_status(StatusCode::from_u16(600).unwrap()));
    }

    #[test]
    fn success_and_redirect_codes_are_not_errors() {
        assert!(!is_error_status(StatusCode::OK));
        assert!(!is_error_status(StatusCode::CREATED));
        assert!(!is_error_status(StatusCode::NOT_MODIFIED));
        assert!(!is_error_status(StatusCode::CONTINUE));
    }

    #[test]
    fn transport_errors_have_no_status() {
        let error = FetchError::from(TransportError::Connection("refused".to_string()));
        assert_eq!(error.status(), None);
        assert_eq!(error.message(), "refused");
    }

    #[test]
    fn status_errors_carry_code_and_message() {
        let error = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            message: "not found".to_string(),
        };
        assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(error.message(), "not found");
    }

    #[test]
    fn empty_messages_fall_back() {
        let status = FetchError::Status {
            status: StatusCode::NOT_FOUND,
            message: String::new(),
        };
        assert_eq!(status.message(), FALLBACK_ERROR_MESSAGE);

        let transport = FetchError::from(TransportError::Connection(String::new()));
        assert_eq!(transport.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn body_read_failures_describe_themselves() {
        let error = FetchError::from(TransportError::Body("connection reset".to_string()));
        assert_eq!(error.message(), "failed to read response body: connection reset");
        assert_eq!(error.status(), None);
    }

    #[test]
    fn only_cancellation_counts_as_aborted() {
        assert!(FetchError::from(TransportError::Aborted).is_aborted());
        assert!(!FetchError::from(TransportError::Connection("x".to_string())).is_aborted());
        let status = FetchError::Status {
            status: StatusCode::BAD_REQUEST,
            message: "x".to_string(),
        };
        assert!(!status.is_aborted());
    }

    proptest! {
        /// Classification agrees with the `[400, 600)` contract across the
        /// whole representable code space.
        #[test]
        fn classification_matches_the_range(code in 100u16..1000) {
            let status = StatusCode::from_u16(code).unwrap();
            prop_assert_eq!(is_error_status(status), (400..600).contains(&code));
        }
    }
}
