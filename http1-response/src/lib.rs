pub mod body_decoder;
pub mod chunked_body_decoder;
pub mod error;
pub mod header_parser;
pub mod reason_phrase;
pub mod response;
pub mod status_line_parser;

pub use bytes;
pub use http;

pub use body_decoder::{BodyDecoder, ContentCoding, TransferCoding};
pub use error::{ChunkedBodyError, ResponseError};
pub use header_parser::{HeaderField, Headers};
pub use response::{Builder, HttpResponse, ParseConfig};

//
//
//
pub const SP: u8 = b' ';
pub const HTTP_PREFIX: &[u8] = b"HTTP/";
pub const COLON: u8 = b':';
pub const SEMICOLON: u8 = b';';
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';
pub const CRLF: &[u8] = b"\r\n";

pub type ReasonPhrase = Option<Vec<u8>>;

pub const CHUNKED: &str = "chunked";
pub const GZIP: &str = "gzip";
pub const DEFLATE: &str = "deflate";
