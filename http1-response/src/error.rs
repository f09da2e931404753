use std::{io, num};

use http::header::{InvalidHeaderName, InvalidHeaderValue};

use crate::body_decoder::ContentCoding;

//
//
//
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("no HTTP status line found")]
    MissingStatusLine,

    #[error("{0} is not a valid HTTP response code")]
    InvalidStatusCode(u16),

    #[error("invalid HTTP response version: {0}")]
    InvalidVersion(String),

    #[error("'{0}' is not a valid HTTP header")]
    InvalidHeaderLine(String),

    #[error("invalid header name: {0}")]
    InvalidHeaderName(#[from] InvalidHeaderName),

    #[error("invalid header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("error parsing body, doesn't seem to be a chunked message: {0}")]
    MalformedChunkedBody(#[from] ChunkedBodyError),

    #[error("decoding {0} content requires the `compression` feature")]
    UnsupportedDecompression(ContentCoding),

    #[error("failed to decode {coding} content: {source}")]
    Decompression {
        coding: ContentCoding,
        #[source]
        source: io::Error,
    },

    #[error("more than {0} interim 100 Continue responses")]
    TooManyInterimResponses(usize),
}

impl From<ResponseError> for io::Error {
    fn from(err: ResponseError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

//
//
//
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ChunkedBodyError {
    #[error("invalid chunk size")]
    InvalidChunkSize(Option<num::ParseIntError>),

    #[error("chunk size is too long")]
    TooLongChunkSize,

    #[error("invalid CRLF")]
    InvalidCRLF,

    #[error("chunk announced {expected} bytes, only {actual} left")]
    TruncatedChunk { expected: usize, actual: usize },
}

impl From<ChunkedBodyError> for io::Error {
    fn from(err: ChunkedBodyError) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
