use std::{borrow::Cow, convert::Infallible, fmt};

use bytes::Bytes;
use http::{
    header::HeaderName, response::Parts as ResponseParts, HeaderValue, Response, StatusCode,
    Version,
};
use log::{debug, trace};

use crate::{
    body_decoder::BodyDecoder,
    error::ResponseError,
    header_parser::{extract_body, parse_headers, HeaderField, Headers},
    reason_phrase::reason_phrase,
    status_line_parser::{extract_code, extract_message, extract_version},
    ReasonPhrase, SP,
};

//
//
//
const DEFAULT_VERSION: &str = "1.1";
const MAX_INTERIM_RESPONSES: usize = 8;

//
//
//
#[derive(Debug, Clone)]
pub struct ParseConfig {
    max_interim_responses: usize,
}
impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            max_interim_responses: MAX_INTERIM_RESPONSES,
        }
    }
}
impl ParseConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// How many `100 Continue` responses glued in front of the final one are
    /// skipped before parsing gives up.
    pub fn set_max_interim_responses(&mut self, value: usize) -> &mut Self {
        self.max_interim_responses = value;
        self
    }
    pub fn get_max_interim_responses(&self) -> usize {
        self.max_interim_responses
    }
}

//
//
//
/// A complete, validated HTTP response.
///
/// The body is kept as received; [`HttpResponse::body`] undoes transfer and
/// content codings on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    version: String,
    status: StatusCode,
    message: String,
    headers: Headers,
    raw_body: Vec<u8>,
}

impl HttpResponse {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// An HTTP/1.1 response with the default reason phrase for `code`.
    pub fn new(
        code: u16,
        headers: Headers,
        body: impl Into<Vec<u8>>,
    ) -> Result<Self, ResponseError> {
        Self::builder()
            .code(code)
            .headers(headers)
            .body(body)
            .build()
    }

    pub fn parse(raw: &[u8]) -> Result<Self, ResponseError> {
        Self::parse_with_config(raw, &ParseConfig::default())
    }

    pub fn parse_with_config(raw: &[u8], config: &ParseConfig) -> Result<Self, ResponseError> {
        let mut raw = raw;
        let mut interim_responses = 0_usize;

        loop {
            let code = extract_code(raw).ok_or(ResponseError::MissingStatusLine)?;
            let headers = parse_headers(raw)?;
            let body = extract_body(raw);

            // Some servers put the final response in the body of a 100 Continue.
            if code == 100 && headers.is_empty() && extract_code(body).is_some() {
                if interim_responses >= config.get_max_interim_responses() {
                    return Err(ResponseError::TooManyInterimResponses(
                        config.get_max_interim_responses(),
                    ));
                }
                interim_responses += 1;
                debug!("skipping interim 100 Continue response #{}", interim_responses);

                raw = body;
                continue;
            }

            let mut builder = Self::builder()
                .code(code)
                .version(extract_version(raw).unwrap_or_default())
                .headers(headers)
                .body(body);
            if let Some(message) = extract_message(raw) {
                builder = builder.message(message);
            }
            let response = builder.build()?;

            trace!(
                "parsed HTTP/{} {} with {} headers and {} body bytes",
                response.version,
                response.code(),
                response.headers.len(),
                response.raw_body.len()
            );
            return Ok(response);
        }
    }

    //
    pub fn code(&self) -> u16 {
        self.status.as_u16()
    }
    pub fn status(&self) -> StatusCode {
        self.status
    }
    pub fn message(&self) -> &str {
        &self.message
    }
    pub fn version(&self) -> &str {
        &self.version
    }
    pub fn headers(&self) -> &Headers {
        &self.headers
    }
    pub fn header(&self, name: &str) -> Option<HeaderField<'_>> {
        self.headers.field(name)
    }

    /// The logical body, after `Transfer-Encoding` and `Content-Encoding` are
    /// reversed. Use [`HttpResponse::raw_body`] for the bytes as received.
    pub fn body(&self) -> Result<Cow<'_, [u8]>, ResponseError> {
        BodyDecoder::from_headers(&self.headers).decode(&self.raw_body)
    }
    pub fn raw_body(&self) -> &[u8] {
        &self.raw_body
    }

    //
    // 3xx is deliberately not successful.
    pub fn is_successful(&self) -> bool {
        matches!(self.code() / 100, 1 | 2)
    }
    pub fn is_redirect(&self) -> bool {
        self.code() / 100 == 3
    }
    pub fn is_error(&self) -> bool {
        matches!(self.code() / 100, 4 | 5)
    }

    //
    pub fn headers_as_string(&self, status_line: bool, br: &str) -> String {
        let mut buf = Vec::new();
        self.render_head(status_line, br, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Status line, headers, a blank line and the raw body, lines ending in `br`.
    pub fn as_bytes(&self, br: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.raw_body.len() + 256);
        self.render_head(true, br, &mut buf);
        buf.extend_from_slice(br.as_bytes());
        buf.extend_from_slice(&self.raw_body);
        buf
    }

    fn render_head(&self, status_line: bool, br: &str, buf: &mut Vec<u8>) {
        if status_line {
            buf.extend_from_slice(b"HTTP/");
            buf.extend_from_slice(self.version.as_bytes());
            buf.extend_from_slice(&[SP]);
            buf.extend_from_slice(self.status.as_str().as_bytes());
            buf.extend_from_slice(&[SP]);
            buf.extend_from_slice(self.message.as_bytes());
            buf.extend_from_slice(br.as_bytes());
        }
        self.headers.render(br, buf);
    }

    //
    pub fn to_response_parts(&self) -> Result<ResponseParts, ResponseError> {
        let version = match self.version.as_str() {
            "0.9" => Version::HTTP_09,
            "1.0" => Version::HTTP_10,
            "1.1" => Version::HTTP_11,
            "2.0" => Version::HTTP_2,
            "3.0" => Version::HTTP_3,
            other => return Err(ResponseError::InvalidVersion(other.to_owned())),
        };
        let reason_phrase: ReasonPhrase = Some(self.message.as_bytes().to_vec());

        let (mut parts, _) = Response::new(()).into_parts();
        parts.status = self.status;
        parts.version = version;
        parts.headers = self.headers.to_header_map()?;
        parts.extensions.insert(reason_phrase);
        Ok(parts)
    }

    /// An `http::Response` carrying the raw body, with the reason phrase kept
    /// as a [`ReasonPhrase`] extension.
    pub fn to_response(&self) -> Result<Response<Vec<u8>>, ResponseError> {
        let parts = self.to_response_parts()?;
        Ok(Response::from_parts(parts, self.raw_body.clone()))
    }
}

impl fmt::Display for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.as_bytes("\n")))
    }
}

//
//
//
#[derive(Debug)]
pub struct Builder {
    inner: Result<Parts, ResponseError>,
}

#[derive(Debug)]
struct Parts {
    code: u16,
    version: String,
    message: Option<String>,
    headers: Headers,
    body: Vec<u8>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            inner: Ok(Parts {
                code: StatusCode::OK.as_u16(),
                version: DEFAULT_VERSION.to_owned(),
                message: None,
                headers: Headers::new(),
                body: Vec::new(),
            }),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(self, code: u16) -> Self {
        self.and_then(|mut parts| {
            parts.code = code;
            Ok(parts)
        })
    }

    pub fn version(self, version: impl Into<String>) -> Self {
        let version = version.into();
        self.and_then(|mut parts| {
            parts.version = version;
            Ok(parts)
        })
    }

    /// Overrides the reason phrase looked up from the code.
    pub fn message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.and_then(|mut parts| {
            parts.message = Some(message);
            Ok(parts)
        })
    }

    pub fn header<K, V>(self, name: K, value: V) -> Self
    where
        HeaderName: TryFrom<K>,
        <HeaderName as TryFrom<K>>::Error: Into<ResponseError>,
        HeaderValue: TryFrom<V>,
        <HeaderValue as TryFrom<V>>::Error: Into<ResponseError>,
    {
        self.and_then(move |mut parts| {
            let name = HeaderName::try_from(name).map_err(Into::into)?;
            let value = HeaderValue::try_from(value).map_err(Into::into)?;
            parts
                .headers
                .append(name, Bytes::copy_from_slice(value.as_bytes()));
            Ok(parts)
        })
    }

    /// Appends a raw `Name: value` header line.
    pub fn header_line(self, line: &str) -> Self {
        self.and_then(|mut parts| {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| ResponseError::InvalidHeaderLine(line.to_owned()))?;
            let name = HeaderName::from_bytes(name.trim().as_bytes())?;
            parts
                .headers
                .append(name, Bytes::copy_from_slice(value.trim().as_bytes()));
            Ok(parts)
        })
    }

    /// Replaces every header set so far.
    pub fn headers(self, headers: Headers) -> Self {
        self.and_then(|mut parts| {
            parts.headers = headers;
            Ok(parts)
        })
    }

    pub fn body(self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.and_then(|mut parts| {
            parts.body = body;
            Ok(parts)
        })
    }

    pub fn build(self) -> Result<HttpResponse, ResponseError> {
        let parts = self.inner?;

        let phrase =
            reason_phrase(parts.code).ok_or(ResponseError::InvalidStatusCode(parts.code))?;
        let status = StatusCode::from_u16(parts.code)
            .map_err(|_| ResponseError::InvalidStatusCode(parts.code))?;

        if !is_valid_version(&parts.version) {
            return Err(ResponseError::InvalidVersion(parts.version));
        }

        Ok(HttpResponse {
            version: parts.version,
            status,
            message: parts.message.unwrap_or_else(|| phrase.to_owned()),
            headers: parts.headers,
            raw_body: parts.body,
        })
    }

    fn and_then<F>(self, func: F) -> Self
    where
        F: FnOnce(Parts) -> Result<Parts, ResponseError>,
    {
        Self {
            inner: self.inner.and_then(func),
        }
    }
}

impl From<Infallible> for ResponseError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

// `\d\.\d`
fn is_valid_version(version: &str) -> bool {
    matches!(version.as_bytes(), [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit())
}
