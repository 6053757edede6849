//! `HttpClient` implementation over a blocking `ureq` agent.
//!
//! # Design
//! The agent never treats a status code as an error on its own. When
//! `status_as_error` is enabled, 4xx/5xx responses are read in full and
//! reported as `ClientFailure::BadResponse` with the raw response attached,
//! which is what `BadResponseRecoveryTransport` salvages.

use std::io::ErrorKind;
use std::time::Duration;

use tracing::trace;
use ureq::http::{self, Version};

use crate::client::{ClientFailure, HttpClient, RawResponse, RequestOptions};
use crate::config::ClientConfig;

#[derive(Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
    status_as_error: bool,
    user_agent: Option<String>,
}

impl UreqClient {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .timeout_connect(config.timeout_connect_ms.map(Duration::from_millis))
            .timeout_global(config.timeout_global_ms.map(Duration::from_millis))
            .build()
            .new_agent();

        Self {
            agent,
            status_as_error: config.status_as_error,
            user_agent: config.user_agent.clone(),
        }
    }

    fn run(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<http::Response<ureq::Body>, ClientFailure> {
        let mut builder = http::Request::builder().method(method).uri(url);

        let headers = options.headers.unwrap_or_default();
        let sets_user_agent = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case("user-agent"));
        for (name, values) in &headers {
            for value in values {
                builder = builder.header(name.as_str(), value.as_str());
            }
        }
        if let (Some(user_agent), false) = (&self.user_agent, sets_user_agent) {
            builder = builder.header("User-Agent", user_agent.as_str());
        }

        let sent = match options.body {
            Some(body) => self.agent.run(builder.body(body).map_err(ClientFailure::other)?),
            None => self.agent.run(builder.body(()).map_err(ClientFailure::other)?),
        };
        sent.map_err(classify)
    }
}

impl HttpClient for UreqClient {
    fn request(
        &self,
        method: &str,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse, ClientFailure> {
        let response = self.run(method, url, options)?;
        let status = response.status().as_u16();
        trace!(method, url, status, "ureq call completed");

        let rejected = self.status_as_error && status >= 400;
        match read_response(response) {
            Ok(raw) if rejected => Err(ClientFailure::bad_response(
                format!("{method} {url} responded with status {status}"),
                Some(raw),
            )),
            Ok(raw) => Ok(raw),
            Err(e) if rejected => Err(ClientFailure::bad_response(
                format!("{method} {url} responded with status {status}: {e}"),
                None,
            )),
            Err(e) => Err(classify(e)),
        }
    }
}

fn read_response(mut response: http::Response<ureq::Body>) -> Result<RawResponse, ureq::Error> {
    let protocol_version = version_string(response.version()).to_string();
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.body_mut().read_to_vec()?;

    Ok(RawResponse {
        protocol_version,
        status,
        headers,
        body,
    })
}

fn version_string(version: Version) -> &'static str {
    if version == Version::HTTP_09 {
        "0.9"
    } else if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2.0"
    } else if version == Version::HTTP_3 {
        "3.0"
    } else {
        "1.1"
    }
}

/// Failures to establish the connection become `Connect`; everything else,
/// including timeouts and resets once connected, is `Other`.
fn classify(err: ureq::Error) -> ClientFailure {
    let connect = match &err {
        ureq::Error::HostNotFound
        | ureq::Error::ConnectionFailed
        | ureq::Error::Timeout(ureq::Timeout::Resolve | ureq::Timeout::Connect) => true,
        ureq::Error::Io(io) => is_connect_io(io.kind()),
        _ => false,
    };

    if connect {
        ClientFailure::connect(err)
    } else {
        ClientFailure::other(err)
    }
}

fn is_connect_io(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::ConnectionRefused
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable
            | ErrorKind::TimedOut
    )
}
