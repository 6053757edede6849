use tracing::debug;

use crate::client::ClientFailure;
use crate::error::TransportError;
use crate::http::{Request, Response};
use crate::transport::Transport;
use crate::translate::{HeaderTranslator, ResponseTranslator};

/// Decorator that turns a bad-response failure back into a response when the
/// failure still carries the raw response.
///
/// A bad response without an attached response, and every other error,
/// propagate unchanged.
#[derive(Debug, Clone)]
pub struct BadResponseRecoveryTransport<T, R = HeaderTranslator> {
    inner: T,
    translator: R,
}

impl<T: Transport> BadResponseRecoveryTransport<T> {
    pub fn new(inner: T) -> Self {
        Self::with_translator(inner, HeaderTranslator)
    }
}

impl<T: Transport, R: ResponseTranslator> BadResponseRecoveryTransport<T, R> {
    pub fn with_translator(inner: T, translator: R) -> Self {
        Self { inner, translator }
    }
}

impl<T: Transport, R: ResponseTranslator> Transport for BadResponseRecoveryTransport<T, R> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        match self.inner.fulfill(request) {
            Err(TransportError::Client(ClientFailure::BadResponse {
                message,
                response: Some(raw),
            })) => {
                debug!(
                    url = %request.url(),
                    status = raw.status,
                    %message,
                    "recovered bad response"
                );
                Ok(self.translator.translate(raw))
            }
            outcome => outcome,
        }
    }
}
