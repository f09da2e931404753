use std::slice;

use bytes::Bytes;
use http::{header::HeaderName, HeaderMap, HeaderValue};
use log::debug;

use crate::{error::ResponseError, COLON, CR, LF, SP};

//
//
//
/// Response headers in encounter order.
///
/// Every name maps to a non-empty list of values. Names compare
/// case-insensitively and are presented in Title-Case. Values are kept as
/// received, control bytes included.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Headers {
    fields: Vec<(HeaderName, Vec<Bytes>)>,
}

/// A header as presented to callers: a scalar when the name appeared once.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HeaderField<'a> {
    Single(&'a Bytes),
    Multiple(&'a [Bytes]),
}

impl<'a> HeaderField<'a> {
    pub fn first(&self) -> &'a Bytes {
        match *self {
            Self::Single(value) => value,
            Self::Multiple(values) => &values[0],
        }
    }

    pub fn values(&self) -> &'a [Bytes] {
        match *self {
            Self::Single(value) => slice::from_ref(value),
            Self::Multiple(values) => values,
        }
    }
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, name: HeaderName, value: impl Into<Bytes>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.get_all(name).first()
    }

    pub fn get_all(&self, name: &str) -> &[Bytes] {
        match self.position(name) {
            Some(i) => &self.fields[i].1,
            None => &[],
        }
    }

    pub fn field(&self, name: &str) -> Option<HeaderField<'_>> {
        let values = &self.fields[self.position(name)?].1;
        match values.as_slice() {
            [value] => Some(HeaderField::Single(value)),
            values => Some(HeaderField::Multiple(values)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &[Bytes])> {
        self.fields
            .iter()
            .map(|(name, values)| (name, values.as_slice()))
    }

    /// Fails on the first value `http` refuses, such as one holding a CR.
    pub fn to_header_map(&self) -> Result<HeaderMap<HeaderValue>, ResponseError> {
        let mut map = HeaderMap::with_capacity(self.fields.len());
        for (name, values) in &self.fields {
            for value in values {
                map.append(name.clone(), HeaderValue::from_maybe_shared(value.clone())?);
            }
        }
        Ok(map)
    }

    /// One `Name: value<br>` line per value.
    pub(crate) fn render(&self, br: &str, buf: &mut Vec<u8>) {
        for (name, values) in &self.fields {
            let name = canonical_name(name);
            for value in values {
                buf.extend_from_slice(name.as_bytes());
                buf.extend_from_slice(&[COLON, SP]);
                buf.extend_from_slice(value);
                buf.extend_from_slice(br.as_bytes());
            }
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
    }

    fn last_value_mut(&mut self, name: &HeaderName) -> Option<&mut Bytes> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .and_then(|(_, values)| values.last_mut())
    }
}

/// `content-type` -> `Content-Type`.
pub fn canonical_name(name: &HeaderName) -> String {
    let mut upper = true;
    name.as_str()
        .chars()
        .map(|c| {
            let c = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            c
        })
        .collect()
}

//
//
//
/// Splits `raw` at the first blank line into the head and what follows it.
/// Without a blank line the whole input is the head.
pub fn split_head(raw: &[u8]) -> (&[u8], Option<&[u8]>) {
    let mut from = 0;
    while let Some(i) = raw[from..].iter().position(|b| *b == LF).map(|i| from + i) {
        let next = &raw[i + 1..];
        let second_len = if next.starts_with(&[LF]) {
            Some(1)
        } else if next.starts_with(&[CR, LF]) {
            Some(2)
        } else {
            None
        };
        if let Some(second_len) = second_len {
            let start = if i > 0 && raw[i - 1] == CR { i - 1 } else { i };
            return (&raw[..start], Some(&raw[i + 1 + second_len..]));
        }
        from = i + 1;
    }
    (raw, None)
}

/// The wire body: everything after the first blank line, whitespace trimmed.
pub fn extract_body(raw: &[u8]) -> &[u8] {
    match split_head(raw) {
        (_, Some(body)) => body.trim_ascii(),
        (_, None) => &[],
    }
}

pub fn parse_headers(raw: &[u8]) -> Result<Headers, ResponseError> {
    let (head, _) = split_head(raw);

    let mut headers = Headers::new();
    let mut last_name: Option<HeaderName> = None;

    for line in head.split(|b| *b == LF) {
        let line = trim_line_breaks(line);
        if line.is_empty() {
            break;
        }

        if let Some((name, value)) = parse_header_line(line) {
            let name = HeaderName::from_bytes(name)?;
            headers.append(name.clone(), Bytes::copy_from_slice(value));
            last_name = Some(name);
        } else if let Some(continuation) = parse_continuation_line(line) {
            match last_name
                .as_ref()
                .and_then(|name| headers.last_value_mut(name))
            {
                Some(value) => {
                    let mut folded = value.to_vec();
                    folded.extend_from_slice(continuation);
                    *value = Bytes::from(folded);
                }
                None => debug!("dropping continuation line before any header"),
            }
        }
    }

    Ok(headers)
}

// `name:<ws>value`, where name is `[A-Za-z0-9_-]+` and value is non-empty.
fn parse_header_line(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let name_len = line.iter().position(|b| !is_name_byte(*b))?;
    if name_len == 0 || line[name_len] != COLON {
        return None;
    }
    let value = skip_leading_whitespace(&line[name_len + 1..], 0)?;
    Some((&line[..name_len], value))
}

// `<ws>value`, at least one leading whitespace byte.
fn parse_continuation_line(line: &[u8]) -> Option<&[u8]> {
    skip_leading_whitespace(line, 1)
}

// Drops leading whitespace but always keeps at least one byte, so a value made
// only of whitespace collapses to its last byte. `None` when fewer than `min`
// whitespace bytes lead or nothing would remain.
fn skip_leading_whitespace(bytes: &[u8], min: usize) -> Option<&[u8]> {
    let ws = bytes
        .iter()
        .position(|b| !is_whitespace(*b))
        .unwrap_or(bytes.len());
    if ws < min || bytes.len() <= min {
        return None;
    }
    let skip = ws.min(bytes.len() - 1);
    Some(&bytes[skip..])
}

fn trim_line_breaks(mut line: &[u8]) -> &[u8] {
    while let [CR | LF, rest @ ..] = line {
        line = rest;
    }
    while let [rest @ .., CR | LF] = line {
        line = rest;
    }
    line
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_head_variants() {
        assert_eq!(
            split_head(b"HTTP/1.1 200 OK\r\nA: b\r\n\r\nbody"),
            (&b"HTTP/1.1 200 OK\r\nA: b"[..], Some(&b"body"[..]))
        );
        assert_eq!(
            split_head(b"HTTP/1.1 200 OK\nA: b\n\nbody"),
            (&b"HTTP/1.1 200 OK\nA: b"[..], Some(&b"body"[..]))
        );
        assert_eq!(
            split_head(b"HTTP/1.1 200 OK\r\n\nbody\r\n\r\nmore"),
            (&b"HTTP/1.1 200 OK"[..], Some(&b"body\r\n\r\nmore"[..]))
        );
        assert_eq!(
            split_head(b"HTTP/1.1 200 OK\r\n"),
            (&b"HTTP/1.1 200 OK\r\n"[..], None)
        );
        assert_eq!(split_head(b"\n\nbody"), (&b""[..], Some(&b"body"[..])));
    }

    #[test]
    fn extract_body_trims() {
        assert_eq!(extract_body(b"HTTP/1.1 200 OK\r\n\r\n  hi \r\n"), b"hi");
        assert_eq!(extract_body(b"HTTP/1.1 200 OK\r\nA: b"), b"");
    }

    #[test]
    fn header_line() {
        assert_eq!(
            parse_header_line(b"Location:/x"),
            Some((&b"Location"[..], &b"/x"[..]))
        );
        assert_eq!(
            parse_header_line(b"X-A_b:  \t v: w"),
            Some((&b"X-A_b"[..], &b"v: w"[..]))
        );
        assert_eq!(parse_header_line(b"X-Empty:"), None);
        assert_eq!(parse_header_line(b"X-Space: "), Some((&b"X-Space"[..], &b" "[..])));
        assert_eq!(parse_header_line(b"HTTP/1.1 200 OK"), None);
        assert_eq!(parse_header_line(b": value"), None);
        assert_eq!(parse_header_line(b"NoColon"), None);
    }

    #[test]
    fn continuation_line() {
        assert_eq!(parse_continuation_line(b"  more"), Some(&b"more"[..]));
        assert_eq!(parse_continuation_line(b"\tmore"), Some(&b"more"[..]));
        assert_eq!(parse_continuation_line(b"more"), None);
        assert_eq!(parse_continuation_line(b" "), None);
    }

    #[test]
    fn canonical() {
        assert_eq!(
            canonical_name(&HeaderName::from_static("content-type")),
            "Content-Type"
        );
        assert_eq!(
            canonical_name(&HeaderName::from_static("x-request-id")),
            "X-Request-Id"
        );
        assert_eq!(canonical_name(&HeaderName::from_static("etag")), "Etag");
    }

    #[test]
    fn fold_into_multi_valued() -> Result<(), ResponseError> {
        let headers = parse_headers(b"HTTP/1.1 200 OK\r\nA: 1\r\nA: 2\r\n  tail\r\n\r\n")?;
        assert_eq!(headers.get_all("a"), &["1", "2tail"]);
        Ok(())
    }

    #[test]
    fn control_bytes_in_values() -> Result<(), ResponseError> {
        let headers = parse_headers(b"HTTP/1.1 200 OK\nX-A: a\rb\nX-B: a\x7fb\n\n")?;
        assert_eq!(headers.get("x-a").unwrap(), &b"a\rb"[..]);
        assert_eq!(headers.get("x-b").unwrap(), &b"a\x7fb"[..]);

        assert!(matches!(
            headers.to_header_map(),
            Err(ResponseError::InvalidHeaderValue(_))
        ));

        Ok(())
    }
}
