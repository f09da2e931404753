pub mod config;
pub mod error;
pub mod factory;
pub mod request_head_renderer;
pub mod stream;

pub use config::ClientConfig;
pub use error::ClientError;
pub use factory::{DefaultResponseFactory, ResponseFactory};
pub use stream::Http1ClientStream;

//
//
//
pub use http::{Method, Request, Version};
pub use http1_response::{self, HttpResponse, ResponseError};
