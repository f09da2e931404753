use std::{borrow::Cow, fmt, str};

use bytes::Bytes;
use http::header::{CONTENT_ENCODING, TRANSFER_ENCODING};
use log::trace;

use crate::{
    chunked_body_decoder::decode_chunked, error::ResponseError, header_parser::Headers, CHUNKED,
    DEFLATE, GZIP,
};

//
//
//
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TransferCoding {
    Identity,
    Chunked,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ContentCoding {
    Gzip,
    Deflate,
}

impl ContentCoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gzip => GZIP,
            Self::Deflate => DEFLATE,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case(GZIP) {
            Some(Self::Gzip)
        } else if token.eq_ignore_ascii_case(DEFLATE) {
            Some(Self::Deflate)
        } else {
            None
        }
    }
}

impl fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
//
//
/// Turns the wire body into the logical body.
///
/// Transfer-Encoding is undone first, then every recognised Content-Encoding
/// from the last one applied to the first. Unrecognised codings leave the body
/// untouched.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BodyDecoder {
    transfer_coding: TransferCoding,
    content_codings: Vec<ContentCoding>,
}

impl BodyDecoder {
    pub fn new(transfer_coding: TransferCoding, content_codings: Vec<ContentCoding>) -> Self {
        Self {
            transfer_coding,
            content_codings,
        }
    }

    pub fn from_headers(headers: &Headers) -> Self {
        let transfer_coding = match coding_tokens(headers.get_all(TRANSFER_ENCODING.as_str())).last()
        {
            Some(token) if token.eq_ignore_ascii_case(CHUNKED) => TransferCoding::Chunked,
            _ => TransferCoding::Identity,
        };
        let content_codings = coding_tokens(headers.get_all(CONTENT_ENCODING.as_str()))
            .into_iter()
            .filter_map(ContentCoding::from_token)
            .collect();

        Self::new(transfer_coding, content_codings)
    }

    pub fn transfer_coding(&self) -> TransferCoding {
        self.transfer_coding
    }

    pub fn content_codings(&self) -> &[ContentCoding] {
        &self.content_codings
    }

    pub fn decode<'a>(&self, raw: &'a [u8]) -> Result<Cow<'a, [u8]>, ResponseError> {
        let mut body = match self.transfer_coding {
            TransferCoding::Chunked => Cow::Owned(decode_chunked(raw)?),
            TransferCoding::Identity => Cow::Borrowed(raw),
        };

        for coding in self.content_codings.iter().rev() {
            // 304, 204 and HEAD responses keep the header but carry nothing.
            if body.is_empty() {
                break;
            }
            trace!("decoding {} body of {} bytes", coding, body.len());
            body = Cow::Owned(decode_content(*coding, &body)?);
        }

        Ok(body)
    }
}

// Comma separated tokens across every value of a header, in order.
fn coding_tokens(values: &[Bytes]) -> Vec<&str> {
    values
        .iter()
        .filter_map(|value| str::from_utf8(value).ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}

//
//
//
#[cfg(feature = "compression")]
fn decode_content(coding: ContentCoding, body: &[u8]) -> Result<Vec<u8>, ResponseError> {
    use std::io::Read as _;

    use flate2::read::{DeflateDecoder, ZlibDecoder};

    // ID1 ID2 CM FLG MTIME(4) XFL OS
    const GZIP_HEADER_LEN: usize = 10;

    let mut decoded = Vec::new();
    let result = match coding {
        ContentCoding::Gzip => match body.get(GZIP_HEADER_LEN..) {
            Some(data) if !data.is_empty() => DeflateDecoder::new(data).read_to_end(&mut decoded),
            _ => Ok(0),
        },
        ContentCoding::Deflate => {
            // Some servers send deflate data without the zlib wrapper.
            match body {
                [b0, b1, ..] if u16::from_be_bytes([*b0, *b1]) % 31 != 0 => {
                    DeflateDecoder::new(body).read_to_end(&mut decoded)
                }
                _ => ZlibDecoder::new(body).read_to_end(&mut decoded),
            }
        }
    };

    match result {
        Ok(_) => Ok(decoded),
        Err(source) => Err(ResponseError::Decompression { coding, source }),
    }
}

#[cfg(not(feature = "compression"))]
fn decode_content(coding: ContentCoding, _body: &[u8]) -> Result<Vec<u8>, ResponseError> {
    Err(ResponseError::UnsupportedDecompression(coding))
}
