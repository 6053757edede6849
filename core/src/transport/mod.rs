//! The `Transport` contract and its implementations.
//!
//! # Design
//! `BaseTransport` is the only implementation that reaches the network (via
//! an injected `HttpClient`). Every other transport is a decorator holding
//! the next `Transport` in the chain and applying one policy to its
//! outcome. Chains are strictly linear and built once, then shared.
//!
//! ```text
//! Logger -> ClientError -> BadResponseRecovery -> Base -> HttpClient
//! ```

mod base;
mod client_error;
mod logger;
mod recovery;
mod server_error;

use std::sync::Arc;

pub use base::BaseTransport;
pub use client_error::ClientErrorTransport;
pub use logger::LoggerTransport;
pub use recovery::BadResponseRecoveryTransport;
pub use server_error::ServerErrorTransport;

use crate::agent::UreqClient;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{Request, Response};

/// Turns a `Request` into a `Response` through some delivery mechanism.
///
/// Implementations hold no per-request state: each call is independent and
/// the request is never modified.
pub trait Transport: Send + Sync {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).fulfill(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).fulfill(request)
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        (**self).fulfill(request)
    }
}

/// A `Transport` backed by a closure. See `from_fn`.
pub struct FnTransport<F> {
    f: F,
}

/// Wrap a closure as a `Transport`, e.g. to stub the end of a chain.
pub fn from_fn<F>(f: F) -> FnTransport<F>
where
    F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync,
{
    FnTransport { f }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync,
{
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        (self.f)(request)
    }
}

/// Standard chain over a ureq-backed client.
///
/// Bad responses that still carry a response are recovered first, so a
/// salvaged 4xx is then reported as a `ClientError` like any other.
pub fn default_transport(config: &ClientConfig) -> Box<dyn Transport> {
    let base = BaseTransport::new(UreqClient::new(config));
    let recovered = BadResponseRecoveryTransport::new(base);
    Box::new(LoggerTransport::new(ClientErrorTransport::new(recovered)))
}
