use tracing::{debug, trace};

use crate::client::{ClientFailure, HttpClient, RequestOptions};
use crate::error::{ConnectError, TransportError};
use crate::http::{Request, Response};
use crate::transport::Transport;
use crate::translate::{HeaderTranslator, ResponseTranslator};

/// Transport that hands requests to an `HttpClient`.
///
/// Connection failures become `TransportError::Connect` carrying the
/// request; any other client failure is returned as is.
#[derive(Debug, Clone)]
pub struct BaseTransport<C, R = HeaderTranslator> {
    client: C,
    translator: R,
}

impl<C: HttpClient> BaseTransport<C> {
    pub fn new(client: C) -> Self {
        Self::with_translator(client, HeaderTranslator)
    }
}

impl<C: HttpClient, R: ResponseTranslator> BaseTransport<C, R> {
    pub fn with_translator(client: C, translator: R) -> Self {
        Self { client, translator }
    }
}

impl<C: HttpClient, R: ResponseTranslator> Transport for BaseTransport<C, R> {
    fn fulfill(&self, request: &Request) -> Result<Response, TransportError> {
        let options = build_options(request);
        trace!(
            method = %request.method(),
            url = %request.url(),
            headers = options.headers.as_ref().map_or(0, Vec::len),
            body = options.body.as_ref().map_or(0, Vec::len),
            "calling http client"
        );

        let raw = match self
            .client
            .request(request.method().as_str(), request.url().as_str(), options)
        {
            Ok(raw) => raw,
            Err(failure @ ClientFailure::Connect { .. }) => {
                debug!(url = %request.url(), error = %failure, "connection failed");
                return Err(ConnectError::new(request.clone(), failure).into());
            }
            Err(failure) => return Err(failure.into()),
        };

        Ok(self.translator.translate(raw))
    }
}

/// Client call options for `request`. Headers and body are only present
/// when the request has at least one header or a non-empty body.
fn build_options(request: &Request) -> RequestOptions {
    let headers: Vec<(String, Vec<String>)> = request
        .headers()
        .iter()
        .map(|(name, values)| (name.to_string(), values.to_vec()))
        .collect();

    RequestOptions {
        headers: (!headers.is_empty()).then_some(headers),
        body: (request.body().size() > 0).then(|| request.body().as_bytes().to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::always;
    use url::Url;

    use super::*;
    use crate::client::{MockHttpClient, RawResponse};
    use crate::http::{Headers, Method, StatusCode};

    fn raw(status: u16) -> RawResponse {
        RawResponse {
            protocol_version: "1.1".to_string(),
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    fn request(method: Method) -> Request {
        Request::new(method, Url::parse("http://example.com").unwrap())
    }

    #[test]
    fn plain_get_sends_no_options() {
        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .withf(|method, url, options| {
                method == "GET" && url == "http://example.com/" && options.is_empty()
            })
            .times(1)
            .returning(|_, _, _| Ok(raw(200)));

        let response = BaseTransport::new(client).fulfill(&request(Method::Get)).unwrap();
        assert_eq!(response.status(), StatusCode::new(200));
    }

    #[test]
    fn method_is_forwarded() {
        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .withf(|method, _, options| method == "POST" && options.is_empty())
            .times(1)
            .returning(|_, _, _| Ok(raw(200)));

        BaseTransport::new(client).fulfill(&request(Method::Post)).unwrap();
    }

    #[test]
    fn headers_are_forwarded_in_order() {
        let expected = RequestOptions {
            headers: Some(vec![
                ("Content-Type".to_string(), vec!["application/json".to_string()]),
                (
                    "Accept".to_string(),
                    vec!["text/html".to_string(), "application/xhtml+xml".to_string()],
                ),
            ]),
            body: None,
        };

        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .withf(move |_, _, options| *options == expected)
            .times(1)
            .returning(|_, _, _| Ok(raw(200)));

        let req = request(Method::Get).with_headers(
            Headers::new()
                .with("Content-Type", ["application/json"])
                .with("Accept", ["text/html", "application/xhtml+xml"]),
        );
        BaseTransport::new(client).fulfill(&req).unwrap();
    }

    #[test]
    fn body_is_forwarded_only_when_present() {
        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .withf(|_, _, options| {
                options.headers.is_none() && options.body.as_deref() == Some(&b"content"[..])
            })
            .times(1)
            .returning(|_, _, _| Ok(raw(200)));

        let req = request(Method::Get).with_body("content");
        BaseTransport::new(client).fulfill(&req).unwrap();
    }

    #[test]
    fn post_with_headers_and_body() {
        let expected = RequestOptions {
            headers: Some(vec![(
                "Content-Type".to_string(),
                vec!["application/json".to_string()],
            )]),
            body: Some(b"content".to_vec()),
        };

        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .withf(move |method, url, options| {
                method == "POST" && url == "http://example.com/" && *options == expected
            })
            .times(1)
            .returning(|_, _, _| Ok(raw(201)));

        let req = request(Method::Post)
            .with_header("Content-Type", ["application/json"])
            .with_body("content");
        let response = BaseTransport::new(client).fulfill(&req).unwrap();
        assert_eq!(response.status(), StatusCode::new(201));
    }

    #[test]
    fn connect_failure_carries_request() {
        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .with(always(), always(), always())
            .returning(|_, _, _| {
                Err(ClientFailure::connect(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )))
            });

        let req = request(Method::Get).with_header("X-Trace", ["abc"]);
        let err = BaseTransport::new(client).fulfill(&req).unwrap_err();
        match err {
            TransportError::Connect(e) => {
                assert_eq!(e.request(), &req);
                assert!(e.cause().to_string().contains("connection refused"));
            }
            other => panic!("expected Connect, got {other:?}"),
        }
    }

    #[test]
    fn other_failures_pass_through() {
        let mut client = MockHttpClient::new();
        client
            .expect_request()
            .returning(|_, _, _| Err(ClientFailure::bad_response("invalid status line", None)));

        let err = BaseTransport::new(client)
            .fulfill(&request(Method::Get))
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Client(ClientFailure::BadResponse { response: None, .. })
        ));
    }

    #[test]
    fn request_is_left_untouched() {
        let mut client = MockHttpClient::new();
        client.expect_request().returning(|_, _, _| Ok(raw(200)));

        let req = request(Method::Put)
            .with_header("A", ["1"])
            .with_body("payload");
        let before = req.clone();
        BaseTransport::new(client).fulfill(&req).unwrap();
        assert_eq!(req, before);
    }
}
