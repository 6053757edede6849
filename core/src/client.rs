//! Boundary to the underlying HTTP client.
//!
//! # Design
//! `BaseTransport` talks to the client through `HttpClient` only: one call
//! taking a method, a target URL and a bag of options, returning a
//! `RawResponse` or a `ClientFailure`. The failure is a tagged enum so the
//! decorators can match on "connection failure" or "bad response with a
//! response attached" without downcasting.

/// Boxed error coming from the underlying client library.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Options for a single outgoing call. Absent keys are `None`, never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Header name to its ordered values, in request order.
    pub headers: Option<Vec<(String, Vec<String>)>>,
    pub body: Option<Vec<u8>>,
}

impl RequestOptions {
    pub fn is_empty(&self) -> bool {
        self.headers.is_none() && self.body.is_none()
    }
}

/// A response exactly as the underlying client produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// Protocol version as the client reports it, e.g. `"1.1"`.
    pub protocol_version: String,
    pub status: u16,
    /// Header lines in wire order; a repeated name appears once per line.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Failures raised by an `HttpClient`.
#[derive(Debug, thiserror::Error)]
pub enum ClientFailure {
    /// No connection could be established: name resolution, refused
    /// connection, connect timeout.
    #[error("connection failed: {source}")]
    Connect { source: BoxError },

    /// The server answered with something the client rejects. `response`
    /// is set when the raw response is still available.
    #[error("bad response: {message}")]
    BadResponse {
        message: String,
        response: Option<RawResponse>,
    },

    #[error("request failed: {source}")]
    Other { source: BoxError },
}

impl ClientFailure {
    pub fn connect(source: impl Into<BoxError>) -> Self {
        ClientFailure::Connect {
            source: source.into(),
        }
    }

    pub fn bad_response(message: impl Into<String>, response: Option<RawResponse>) -> Self {
        ClientFailure::BadResponse {
            message: message.into(),
            response,
        }
    }

    pub fn other(source: impl Into<BoxError>) -> Self {
        ClientFailure::Other {
            source: source.into(),
        }
    }
}

/// The underlying HTTP client collaborator.
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ClientFailure>;
}

impl<C: HttpClient + ?Sized> HttpClient for Box<C> {
    fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ClientFailure> {
        (**self).request(method, url, options)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ClientFailure> {
        (**self).request(method, url, options)
    }
}

impl<C: HttpClient + ?Sized> HttpClient for std::sync::Arc<C> {
    fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ClientFailure> {
        (**self).request(method, url, options)
    }
}
