use http::{
    header::{CONNECTION, CONTENT_LENGTH, HOST, TRANSFER_ENCODING},
    request::Parts,
    HeaderMap, HeaderValue, Method, Version,
};
use http1_response::{header_parser::canonical_name, COLON, CRLF, SP};

use crate::error::ClientError;

//
//
//
const HTTP_VERSION_10: &[u8] = b"HTTP/1.0";
const HTTP_VERSION_11: &[u8] = b"HTTP/1.1";
const CLOSE: &str = "close";

//
//
//
/// Renders a request head for a single exchange: the body is sent with a
/// `Content-Length` and the connection is closed after the response, so the
/// response can be read to EOF.
#[derive(Debug, Default)]
pub struct RequestHeadRenderer {}

impl RequestHeadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &self,
        mut parts: Parts,
        body_len: usize,
        buf: &mut Vec<u8>,
    ) -> Result<(), ClientError> {
        let version_bytes = match parts.version {
            Version::HTTP_10 => HTTP_VERSION_10,
            Version::HTTP_11 => HTTP_VERSION_11,
            _ => return Err(ClientError::InvalidRequest("only HTTP/1.0 and HTTP/1.1")),
        };

        update_headers(&mut parts, body_len)?;

        let target = parts
            .uri
            .path_and_query()
            .map(|x| x.as_str())
            .filter(|x| !x.is_empty())
            .unwrap_or("/");

        buf.extend_from_slice(parts.method.as_str().as_bytes());
        buf.extend_from_slice(&[SP]);
        buf.extend_from_slice(target.as_bytes());
        buf.extend_from_slice(&[SP]);
        buf.extend_from_slice(version_bytes);
        buf.extend_from_slice(CRLF);

        for (k, v) in &parts.headers {
            buf.extend_from_slice(canonical_name(k).as_bytes());
            buf.extend_from_slice(&[COLON, SP]);
            buf.extend_from_slice(v.as_bytes());
            buf.extend_from_slice(CRLF);
        }

        buf.extend_from_slice(CRLF);

        Ok(())
    }
}

fn update_headers(parts: &mut Parts, body_len: usize) -> Result<(), ClientError> {
    let headers: &mut HeaderMap<HeaderValue> = &mut parts.headers;

    if !headers.contains_key(HOST) {
        if let Some(authority) = parts.uri.authority() {
            let value = HeaderValue::from_str(authority.as_str())
                .map_err(|_| ClientError::InvalidRequest("invalid authority"))?;
            headers.insert(HOST, value);
        }
    }

    headers.remove(TRANSFER_ENCODING);
    if body_len > 0 || expects_body(&parts.method) {
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body_len));
    } else {
        headers.remove(CONTENT_LENGTH);
    }

    if !headers.contains_key(CONNECTION) {
        headers.insert(CONNECTION, HeaderValue::from_static(CLOSE));
    }

    Ok(())
}

fn expects_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
