use crate::error::{ClientError, TransportError};
use crate::http::{Request, Response};
use crate::transport::Transport;

/// Decorator that fails with `TransportError::ClientError` when the obtained
/// response has a client-error status (`StatusCode::is_client_error`).
#[derive(Debug, Clone)]
pub struct ClientErrorTransport<T> {
    inner: T,
}

impl<T: Transport> ClientErrorTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Transport> Transport for ClientErrorTransport<T> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        let response = self.inner.fulfill(request)?;

        if response.status().is_client_error() {
            return Err(ClientError::new(request.clone(), response).into());
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientFailure;
    use crate::transport::from_fn;
    use crate::transport::test_support::{get, response};

    fn fulfill_with_status(code: u16) -> Result<Response, TransportError> {
        ClientErrorTransport::new(from_fn(move |_| Ok(response(code))))
            .fulfill(&get("http://example.com"))
    }

    #[test]
    fn classification_follows_modular_rule() {
        let cases = [
            (200, false),
            (302, false),
            (400, true),
            (404, true),
            (499, true),
            (500, false),
            (503, false),
            (800, true),
        ];
        for (code, raises) in cases {
            let result = fulfill_with_status(code);
            assert_eq!(
                matches!(result, Err(TransportError::ClientError(_))),
                raises,
                "status {code}"
            );
        }
    }

    #[test]
    fn error_carries_request_and_response() {
        let req = get("http://example.com/missing");
        let err = ClientErrorTransport::new(from_fn(|_| Ok(response(404))))
            .fulfill(&req)
            .unwrap_err();
        match err {
            TransportError::ClientError(e) => {
                assert_eq!(e.request(), &req);
                assert_eq!(e.response(), &response(404));
            }
            other => panic!("expected ClientError, got {other:?}"),
        }
    }

    #[test]
    fn success_is_returned_unchanged() {
        let result = fulfill_with_status(200).unwrap();
        assert_eq!(result, response(200));
    }

    #[test]
    fn inner_errors_propagate() {
        let err = ClientErrorTransport::new(from_fn(|_| {
            Err(ClientFailure::other("boom").into())
        }))
        .fulfill(&get("http://example.com"))
        .unwrap_err();
        assert!(matches!(err, TransportError::Client(ClientFailure::Other { .. })));
    }
}
