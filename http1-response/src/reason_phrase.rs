//! Reason phrases for the response codes this crate accepts.
//!
//! The table follows RFC 2616, plus `509 Bandwidth Limit Exceeded`. `306` is
//! reserved and therefore absent.

pub const UNKNOWN: &str = "Unknown";

const MOVED_TEMPORARILY: &str = "Moved Temporarily";

// Sorted by code.
static REASON_PHRASES: &[(u16, &str)] = &[
    // 1xx
    (100, "Continue"),
    (101, "Switching Protocols"),
    // 2xx
    (200, "OK"),
    (201, "Created"),
    (202, "Accepted"),
    (203, "Non-Authoritative Information"),
    (204, "No Content"),
    (205, "Reset Content"),
    (206, "Partial Content"),
    // 3xx
    (300, "Multiple Choices"),
    (301, "Moved Permanently"),
    (302, "Found"),
    (303, "See Other"),
    (304, "Not Modified"),
    (305, "Use Proxy"),
    (307, "Temporary Redirect"),
    // 4xx
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Request Entity Too Large"),
    (414, "Request-URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Requested Range Not Satisfiable"),
    (417, "Expectation Failed"),
    // 5xx
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (509, "Bandwidth Limit Exceeded"),
];

/// Strict lookup, `None` for codes outside the table.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    REASON_PHRASES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|i| REASON_PHRASES[i].1)
}

/// Display lookup. HTTP/1.0 wording is used for `302` when `http11` is false.
pub fn reason_phrase_or_unknown(code: u16, http11: bool) -> &'static str {
    if !http11 && code == 302 {
        return MOVED_TEMPORARILY;
    }
    reason_phrase(code).unwrap_or(UNKNOWN)
}

pub fn reason_phrases(http11: bool) -> impl Iterator<Item = (u16, &'static str)> {
    REASON_PHRASES.iter().map(move |&(code, phrase)| {
        if !http11 && code == 302 {
            (code, MOVED_TEMPORARILY)
        } else {
            (code, phrase)
        }
    })
}

pub fn is_known(code: u16) -> bool {
    reason_phrase(code).is_some()
}
