use std::io;

use http1_response::ResponseError;

//
//
//
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(&'static str),

    #[error(transparent)]
    Response(#[from] ResponseError),
}

impl From<ClientError> for io::Error {
    fn from(err: ClientError) -> io::Error {
        match err {
            ClientError::Io(err) => err,
            ClientError::InvalidRequest(_) => io::Error::new(io::ErrorKind::InvalidInput, err),
            ClientError::Response(err) => err.into(),
        }
    }
}
