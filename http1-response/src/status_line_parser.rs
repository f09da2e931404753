use std::{borrow::Cow, str};

use crate::{CR, HTTP_PREFIX, LF, SP};

//
//
//
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StatusLine<'a> {
    pub version: Option<&'a str>,
    pub code: Option<u16>,
    pub message: Option<Cow<'a, str>>,
}

impl<'a> StatusLine<'a> {
    pub fn parse(raw: &'a [u8]) -> Self {
        Self {
            version: extract_version(raw),
            code: extract_code(raw),
            message: extract_message(raw),
        }
    }
}

//
//
//
pub fn extract_version(raw: &[u8]) -> Option<&str> {
    let (version, _, _) = split_status_line(raw)?;
    // version bytes are `[0-9.x]`
    str::from_utf8(version).ok()
}

/// Digits that do not fit a `u16` are reported as absent.
pub fn extract_code(raw: &[u8]) -> Option<u16> {
    let (_, code, _) = split_status_line(raw)?;
    str::from_utf8(code).ok()?.parse().ok()
}

pub fn extract_message(raw: &[u8]) -> Option<Cow<'_, str>> {
    let (_, _, rest) = split_status_line(raw)?;
    let rest = rest.strip_prefix(&[SP])?;
    let len = rest
        .iter()
        .position(|b| *b == CR || *b == LF)
        .unwrap_or(rest.len());
    if len == 0 {
        return None;
    }
    Some(String::from_utf8_lossy(&rest[..len]))
}

// `HTTP/<version> <code>` at the very start of `raw`, returning the version,
// the code digits and whatever follows them.
fn split_status_line(raw: &[u8]) -> Option<(&[u8], &[u8], &[u8])> {
    let rest = raw.strip_prefix(HTTP_PREFIX)?;

    let version_len = rest
        .iter()
        .position(|b| !is_version_byte(*b))
        .unwrap_or(rest.len());
    if version_len == 0 {
        return None;
    }
    let (version, rest) = rest.split_at(version_len);

    let rest = rest.strip_prefix(&[SP])?;
    let code_len = rest
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if code_len == 0 {
        return None;
    }
    let (code, rest) = rest.split_at(code_len);

    Some((version, code, rest))
}

fn is_version_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'.' || b == b'x'
}
