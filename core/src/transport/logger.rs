use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{Request, Response};
use crate::transport::Transport;

/// Decorator that logs every request and its outcome. Never alters it.
#[derive(Debug, Clone)]
pub struct LoggerTransport<T> {
    inner: T,
}

impl<T: Transport> LoggerTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Transport> Transport for LoggerTransport<T> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        debug!(
            method = %request.method(),
            url = %request.url(),
            headers = request.headers().len(),
            body = request.body().size(),
            "sending request"
        );

        match self.inner.fulfill(request) {
            Ok(response) => {
                debug!(
                    method = %request.method(),
                    url = %request.url(),
                    status = %response.status(),
                    body = response.body().size(),
                    "received response"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(
                    method = %request.method(),
                    url = %request.url(),
                    error = %e,
                    "request failed"
                );
                Err(e)
            }
        }
    }
}
