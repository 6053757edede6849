//! Translation from raw client responses into domain `Response` values.

use tracing::warn;

use crate::client::RawResponse;
use crate::http::{Body, Headers, ProtocolVersion, Response, StatusCode};

/// Turns a `RawResponse` into a `Response`.
///
/// Shared by `BaseTransport` and `BadResponseRecoveryTransport` so a
/// recovered response is indistinguishable from a regular one.
pub trait ResponseTranslator: Send + Sync {
    fn translate(&self, raw: RawResponse) -> Response;
}

impl<T: ResponseTranslator + ?Sized> ResponseTranslator for std::sync::Arc<T> {
    fn translate(&self, raw: RawResponse) -> Response {
        (**self).translate(raw)
    }
}

impl<T: ResponseTranslator + ?Sized> ResponseTranslator for &T {
    fn translate(&self, raw: RawResponse) -> Response {
        (**self).translate(raw)
    }
}

/// Default translator.
///
/// Repeated header lines are grouped under the first spelling of their name,
/// keeping first-seen order. An unparsable protocol version falls back to
/// HTTP/1.1.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderTranslator;

impl ResponseTranslator for HeaderTranslator {
    fn translate(&self, raw: RawResponse) -> Response {
        let protocol_version = raw.protocol_version.parse().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to HTTP/1.1");
            ProtocolVersion::HTTP_11
        });

        let mut headers = Headers::new();
        for (name, value) in raw.headers {
            headers.append(name, value);
        }

        Response::new(
            protocol_version,
            StatusCode::new(raw.status),
            headers,
            Body::from(raw.body),
        )
    }
}
