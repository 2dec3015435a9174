//! Request configuration and the fixed-or-lazy source it comes from.

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use http::{HeaderMap, Method};

/// Configuration record for one request: method, headers, body.
///
/// The default is a bare GET with no headers and no body, which is what a
/// fetch invoked with no configuration at all sends.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// HTTP method.
    pub method: Method,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body, when present.
    pub body: Option<Bytes>,
}

impl RequestConfig {
    /// Create the default configuration (GET, no headers, no body).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Append a header.
    ///
    /// Names or values that are not valid header text are skipped.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.append(name, value);
        }
        self
    }

    /// Replace the body with raw bytes.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replace the body with a JSON value and set the content type.
    #[must_use]
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(Bytes::from(value.to_string()));
        self
    }
}

/// Where the request configuration comes from: a fixed record, or a
/// zero-argument producer evaluated at call time.
///
/// A lazy source exists for configuration that depends on call-time state,
/// such as an authorization header read from a token that may have been
/// refreshed since the task was built. [`resolve`] never caches: every call
/// re-runs the producer.
///
/// [`resolve`]: ConfigSource::resolve
pub enum ConfigSource {
    /// A fixed configuration record, cloned on each resolution.
    Fixed(RequestConfig),
    /// A producer invoked on each resolution.
    Lazy(Box<dyn Fn() -> RequestConfig + Send + Sync>),
}

impl ConfigSource {
    /// Wrap a producer evaluated freshly on every resolution.
    #[must_use]
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> RequestConfig + Send + Sync + 'static,
    {
        Self::Lazy(Box::new(producer))
    }

    /// Produce the configuration for one invocation.
    #[must_use]
    pub fn resolve(&self) -> RequestConfig {
        match self {
            Self::Fixed(config) => config.clone(),
            Self::Lazy(producer) => producer(),
        }
    }
}

impl Default for ConfigSource {
    fn default() -> Self {
        Self::Fixed(RequestConfig::default())
    }
}

impl From<RequestConfig> for ConfigSource {
    fn from(config: RequestConfig) -> Self {
        Self::Fixed(config)
    }
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(config) => f.debug_tuple("Fixed").field(config).finish(),
            Self::Lazy(_) => write!(f, "Lazy(<producer>)"),
        }
    }
}
