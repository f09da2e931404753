//! Pluggable construction of the response value.
//!
//! The stream only buffers bytes; turning them into a response is up to a
//! [`ResponseFactory`]. Any `Fn(&[u8]) -> Result<R, ResponseError>` is one,
//! so callers can wrap or replace [`HttpResponse`] without the stream knowing.

use http1_response::{HttpResponse, ParseConfig, ResponseError};

pub trait ResponseFactory {
    type Response;

    fn from_raw(&self, raw: &[u8]) -> Result<Self::Response, ResponseError>;
}

impl<F, R> ResponseFactory for F
where
    F: Fn(&[u8]) -> Result<R, ResponseError>,
{
    type Response = R;

    fn from_raw(&self, raw: &[u8]) -> Result<R, ResponseError> {
        self(raw)
    }
}

//
//
//
#[derive(Debug, Default, Clone)]
pub struct DefaultResponseFactory {
    config: ParseConfig,
}

impl DefaultResponseFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParseConfig) -> Self {
        Self { config }
    }
}

impl ResponseFactory for DefaultResponseFactory {
    type Response = HttpResponse;

    fn from_raw(&self, raw: &[u8]) -> Result<HttpResponse, ResponseError> {
        HttpResponse::parse_with_config(raw, &self.config)
    }
}
