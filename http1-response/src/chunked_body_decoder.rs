use std::str;

use crate::{error::ChunkedBodyError, CR, CRLF, LF, SEMICOLON};

//
//
//
const LENGTH_MAX_LEN: usize = 16; // b"FFFFFFFFFFFFFFFF"

/// Reverses `Transfer-Encoding: chunked` on a fully buffered body.
///
/// Decoding stops at the zero-size chunk, trailers are ignored. Running out of
/// input between two chunks also ends the body, since the wire body arrives
/// with trailing whitespace trimmed.
pub fn decode_chunked(body: &[u8]) -> Result<Vec<u8>, ChunkedBodyError> {
    let mut rest = body;
    let mut decoded = Vec::with_capacity(body.len());

    loop {
        if rest.trim_ascii().is_empty() {
            break;
        }

        let (length, n) = parse_length_line(rest)?;
        rest = &rest[n..];

        if length == 0 {
            break;
        }

        let length = usize::try_from(length).map_err(|_| ChunkedBodyError::TooLongChunkSize)?;
        if rest.len() < length {
            return Err(ChunkedBodyError::TruncatedChunk {
                expected: length,
                actual: rest.len(),
            });
        }
        decoded.extend_from_slice(&rest[..length]);
        rest = &rest[length..];

        rest = rest
            .strip_prefix(CRLF)
            .ok_or(ChunkedBodyError::InvalidCRLF)?;
    }

    Ok(decoded)
}

// `<hex>[ws][;ext]\r\n`, returning the chunk length and the line length. The
// zero-size line may also be cut off by the end of input.
fn parse_length_line(buf: &[u8]) -> Result<(u64, usize), ChunkedBodyError> {
    let digits_len = buf
        .iter()
        .position(|b| !b.is_ascii_hexdigit())
        .unwrap_or(buf.len());
    if digits_len == 0 {
        return Err(ChunkedBodyError::InvalidChunkSize(None));
    }
    if digits_len > LENGTH_MAX_LEN {
        return Err(ChunkedBodyError::TooLongChunkSize);
    }
    let length_str = str::from_utf8(&buf[..digits_len])
        .map_err(|_| ChunkedBodyError::InvalidChunkSize(None))?;
    let length = u64::from_str_radix(length_str, 16)
        .map_err(|err| ChunkedBodyError::InvalidChunkSize(Some(err)))?;

    match buf.iter().position(|b| *b == LF) {
        Some(lf) => {
            if buf[lf - 1] != CR {
                return Err(ChunkedBodyError::InvalidCRLF);
            }
            if !is_valid_extension(&buf[digits_len..lf - 1]) {
                return Err(ChunkedBodyError::InvalidChunkSize(None));
            }
            Ok((length, lf + 1))
        }
        None if length == 0 && is_valid_extension(&buf[digits_len..]) => Ok((0, buf.len())),
        None => Err(ChunkedBodyError::InvalidCRLF),
    }
}

fn is_valid_extension(ext: &[u8]) -> bool {
    let start = ext
        .iter()
        .position(|b| *b != b' ' && *b != b'\t')
        .unwrap_or(ext.len());
    match &ext[start..] {
        [] => true,
        [SEMICOLON, ..] => !ext.contains(&CR),
        _ => false,
    }
}
