//! Error types for the transport chain.
//!
//! # Design
//! Only two failures are introduced by this crate on purpose: `ConnectError`
//! when the underlying client cannot reach the server, and `ClientError` /
//! `ServerError` when a reclassifying decorator rejects a response it did
//! obtain. Every other failure of the underlying client travels through the
//! chain untouched as `TransportError::Client`.

use crate::client::ClientFailure;
use crate::http::{Request, Response};

/// Errors returned by `Transport::fulfill`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying client could not establish a connection.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// A response was obtained but its status is a client error.
    #[error(transparent)]
    ClientError(#[from] ClientError),

    /// A response was obtained but its status is a server error.
    #[error(transparent)]
    ServerError(#[from] ServerError),

    /// Any other failure of the underlying client, unmodified.
    #[error(transparent)]
    Client(#[from] ClientFailure),
}

impl TransportError {
    /// The request that failed, when the error carries it.
    pub fn request(&self) -> Option<&Request> {
        match self {
            TransportError::Connect(e) => Some(e.request()),
            TransportError::ClientError(e) => Some(e.request()),
            TransportError::ServerError(e) => Some(e.request()),
            TransportError::Client(_) => None,
        }
    }

    /// The response that was rejected, when the error carries it.
    pub fn response(&self) -> Option<&Response> {
        match self {
            TransportError::ClientError(e) => Some(e.response()),
            TransportError::ServerError(e) => Some(e.response()),
            TransportError::Connect(_) | TransportError::Client(_) => None,
        }
    }
}

/// Connection to the target of `request` could not be established.
#[derive(Debug, thiserror::Error)]
#[error("failed to connect for {} {}", .request.method(), .request.url())]
pub struct ConnectError {
    request: Request,
    #[source]
    cause: ClientFailure,
}

impl ConnectError {
    pub fn new(request: Request, cause: ClientFailure) -> Self {
        Self { request, cause }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn cause(&self) -> &ClientFailure {
        &self.cause
    }
}

/// The response to `request` has a client-error status.
#[derive(Debug, thiserror::Error)]
#[error("client error {} for {} {}", .response.status(), .request.method(), .request.url())]
pub struct ClientError {
    request: Request,
    response: Response,
}

impl ClientError {
    pub fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// The response to `request` has a 5xx status.
#[derive(Debug, thiserror::Error)]
#[error("server error {} for {} {}", .response.status(), .request.method(), .request.url())]
pub struct ServerError {
    request: Request,
    response: Response,
}

impl ServerError {
    pub fn new(request: Request, response: Response) -> Self {
        Self { request, response }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn response(&self) -> &Response {
        &self.response
    }
}
