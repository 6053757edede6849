//! Decorator chain around a blocking HTTP client.
//!
//! # Overview
//! A `Transport` turns a domain `Request` into a domain `Response`.
//! `BaseTransport` maps the request onto a single call of an injected
//! `HttpClient` and translates the raw result back; decorators wrap any
//! `Transport` and add one policy each:
//!
//! - `ClientErrorTransport` fails on client-error statuses.
//! - `ServerErrorTransport` fails on 5xx statuses.
//! - `BadResponseRecoveryTransport` salvages bad-response failures that
//!   still carry the raw response.
//! - `LoggerTransport` logs every call through `tracing`.
//!
//! # Design
//! - Transports are stateless and synchronous; the chain is built once and
//!   shared. Connection handling, TLS and timeouts stay in the client.
//! - `UreqClient` is the bundled `HttpClient`, configured by `ClientConfig`.
//! - Requests are passed by reference and never modified; errors that need
//!   the request carry a clone of it.

pub mod agent;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod translate;
pub mod transport;

pub use agent::UreqClient;
pub use client::{ClientFailure, HttpClient, RawResponse, RequestOptions};
pub use config::ClientConfig;
pub use error::{ClientError, ConnectError, ServerError, TransportError};
pub use http::{Body, Headers, Method, ProtocolVersion, Request, Response, StatusCode};
pub use translate::{HeaderTranslator, ResponseTranslator};
pub use transport::{
    default_transport, from_fn, BadResponseRecoveryTransport, BaseTransport, ClientErrorTransport,
    FnTransport, LoggerTransport, ServerErrorTransport, Transport,
};
pub use url::Url;
