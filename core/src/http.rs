//! Domain HTTP message types.
//!
//! # Design
//! `Request` and `Response` are immutable values. A `Request` is built by the
//! caller before any transport sees it, and transports only ever receive it
//! by shared reference. A `Response` is only produced by a
//! `ResponseTranslator` from the raw response of the underlying client.
//!
//! All fields use owned types so values can be cloned into error payloads
//! without lifetime concerns.

use std::fmt;
use std::str::FromStr;

use url::Url;

/// HTTP method for a request.
///
/// Methods outside the standard set are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
    Other(String),
}

impl Method {
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
            Method::Connect => "CONNECT",
            Method::Other(method) => method,
        }
    }
}

impl From<&str> for Method {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "PATCH" => Method::Patch,
            "DELETE" => Method::Delete,
            "HEAD" => Method::Head,
            "OPTIONS" => Method::Options,
            "TRACE" => Method::Trace,
            "CONNECT" => Method::Connect,
            other => Method::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP protocol version, e.g. `1.1` or `2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    pub major: u8,
    pub minor: u8,
}

impl ProtocolVersion {
    pub const HTTP_10: ProtocolVersion = ProtocolVersion::new(1, 0);
    pub const HTTP_11: ProtocolVersion = ProtocolVersion::new(1, 1);
    pub const HTTP_2: ProtocolVersion = ProtocolVersion::new(2, 0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::HTTP_11
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Returned when a protocol version string is not `major[.minor]`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid protocol version: {0:?}")]
pub struct InvalidProtocolVersion(pub String);

impl FromStr for ProtocolVersion {
    type Err = InvalidProtocolVersion;

    /// Accepts `1.1`, `2` and `HTTP/1.1` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidProtocolVersion(s.to_string());
        let raw = s.trim();
        let raw = raw.strip_prefix("HTTP/").unwrap_or(raw);
        let (major, minor) = match raw.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (raw, "0"),
        };
        let major = major.parse().map_err(|_| invalid())?;
        let minor = minor.parse().map_err(|_| invalid())?;
        Ok(Self::new(major, minor))
    }
}

/// Numeric HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Modular client-error test: true for 400-499, but also 800-899,
    /// 1200-1299 and so on. Kept literal; see DESIGN.md.
    pub const fn is_client_error(self) -> bool {
        self.0 % 400 < 100
    }

    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered mapping from header name to one or more values.
///
/// Iteration follows insertion order. Names compare case-insensitively;
/// `insert` on an existing name replaces its values in place, `append`
/// adds a value to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, Vec<String>)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `insert`.
    pub fn with<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(name, values);
        self
    }

    pub fn insert<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let name = name.into();
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        match self.position(&name) {
            Some(i) => self.entries[i].1 = values,
            None => self.entries.push((name, values)),
        }
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1.push(value.into()),
            None => self.entries.push((name, vec![value.into()])),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

/// Message body with a known size. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body(Vec<u8>);

impl Body {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn size(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Body content as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// An outgoing HTTP request.
///
/// Defaults to HTTP/1.1 with no headers and an empty body; use the `with_*`
/// builders to fill it in before handing it to a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: Url,
    method: Method,
    protocol_version: ProtocolVersion,
    headers: Headers,
    body: Body,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            url,
            method,
            protocol_version: ProtocolVersion::default(),
            headers: Headers::new(),
            body: Body::empty(),
        }
    }

    pub fn with_protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.protocol_version = version;
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_header<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers.insert(name, values);
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

/// An HTTP response in the domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    protocol_version: ProtocolVersion,
    status: StatusCode,
    headers: Headers,
    body: Body,
}

impl Response {
    pub fn new(
        protocol_version: ProtocolVersion,
        status: StatusCode,
        headers: Headers,
        body: Body,
    ) -> Self {
        Self {
            protocol_version,
            status,
            headers,
            body,
        }
    }

    pub fn protocol_version(&self) -> ProtocolVersion {
        self.protocol_version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parses_case_insensitively() {
        assert_eq!(Method::from("get"), Method::Get);
        assert_eq!(Method::from("Post"), Method::Post);
        assert_eq!(Method::from("purge"), Method::Other("PURGE".to_string()));
        assert_eq!(Method::Other("PURGE".to_string()).to_string(), "PURGE");
    }

    #[test]
    fn protocol_version_parses_common_forms() {
        assert_eq!("1.1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::HTTP_11);
        assert_eq!("HTTP/1.0".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::HTTP_10);
        assert_eq!("2".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::HTTP_2);
        assert!("one.one".parse::<ProtocolVersion>().is_err());
        assert_eq!(ProtocolVersion::HTTP_11.to_string(), "1.1");
    }

    #[test]
    fn client_error_uses_modular_rule() {
        let cases = [
            (200, false),
            (399, false),
            (400, true),
            (404, true),
            (499, true),
            (500, false),
            (799, false),
            (800, true),
            (899, true),
            (900, false),
        ];
        for (code, expected) in cases {
            assert_eq!(StatusCode::new(code).is_client_error(), expected, "{code}");
        }
    }

    #[test]
    fn server_error_is_5xx() {
        assert!(StatusCode::new(500).is_server_error());
        assert!(StatusCode::new(599).is_server_error());
        assert!(!StatusCode::new(404).is_server_error());
        assert!(!StatusCode::new(600).is_server_error());
    }

    #[test]
    fn headers_keep_insertion_order() {
        let headers = Headers::new()
            .with("X-First", ["1"])
            .with("Accept", ["text/html", "application/json"])
            .with("X-Last", ["z"]);
        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["X-First", "Accept", "X-Last"]);
        assert_eq!(
            headers.get("accept").unwrap(),
            &["text/html".to_string(), "application/json".to_string()]
        );
    }

    #[test]
    fn headers_insert_replaces_in_place() {
        let mut headers = Headers::new().with("A", ["1"]).with("B", ["2"]);
        headers.insert("a", ["3"]);
        let entries: Vec<(&str, &[String])> = headers.iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "A");
        assert_eq!(entries[0].1, &["3".to_string()]);
    }

    #[test]
    fn headers_append_groups_values() {
        let mut headers = Headers::new();
        headers.append("Set-Cookie", "a=1");
        headers.append("set-cookie", "b=2");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Set-Cookie").unwrap().len(), 2);
    }

    #[test]
    fn request_defaults() {
        let req = Request::new(Method::Get, Url::parse("http://example.com").unwrap());
        assert_eq!(req.protocol_version(), ProtocolVersion::HTTP_11);
        assert!(req.headers().is_empty());
        assert_eq!(req.body().size(), 0);
        assert_eq!(req.url().as_str(), "http://example.com/");
    }

    #[test]
    fn body_size_counts_bytes() {
        assert_eq!(Body::from("content").size(), 7);
        assert_eq!(Body::from("é").size(), 2);
        assert!(Body::empty().is_empty());
    }
}
