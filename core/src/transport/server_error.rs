use crate::error::{ServerError, TransportError};
use crate::http::{Request, Response};
use crate::transport::Transport;

/// Decorator that fails with `TransportError::ServerError` on a 5xx response.
#[derive(Debug, Clone)]
pub struct ServerErrorTransport<T> {
    inner: T,
}

impl<T: Transport> ServerErrorTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Transport> Transport for ServerErrorTransport<T> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        let response = self.inner.fulfill(request)?;

        if response.status().is_server_error() {
            return Err(ServerError::new(request.clone(), response).into());
        }

        Ok(response)
    }
}
