use std::{
    io,
    marker::PhantomData,
    pin::Pin,
    task::{Context, Poll},
};

use async_sleep::{
    rw::{AsyncReadWithTimeoutExt as _, AsyncWriteWithTimeoutExt as _},
    Sleepble,
};
use futures_io::{AsyncRead, AsyncWrite};
use futures_util::AsyncWriteExt as _;
use http::Request;
use http1_response::HttpResponse;
use log::{debug, trace};

use crate::{
    config::ClientConfig,
    error::ClientError,
    factory::{DefaultResponseFactory, ResponseFactory},
    request_head_renderer::RequestHeadRenderer,
};

//
//
//
/// One request, one response. The request is sent with `Connection: close`
/// and the response is everything the peer writes before closing.
pub struct Http1ClientStream<S, SLEEP> {
    stream: S,
    config: ClientConfig,
    head_renderer: RequestHeadRenderer,
    buf: Vec<u8>,
    phantom: PhantomData<fn() -> SLEEP>,
}

impl<S, SLEEP> Http1ClientStream<S, SLEEP>
where
    S: AsyncRead + AsyncWrite + Unpin,
    SLEEP: Sleepble,
{
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, ClientConfig::default())
    }

    pub fn with_config(stream: S, config: ClientConfig) -> Self {
        Self {
            stream,
            buf: Vec::with_capacity(config.get_buf_capacity()),
            config,
            head_renderer: RequestHeadRenderer::new(),
            phantom: PhantomData,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }
    pub fn into_inner(self) -> S {
        self.stream
    }

    //
    pub async fn write_request(&mut self, request: Request<Vec<u8>>) -> Result<(), ClientError> {
        let (parts, body) = request.into_parts();

        self.buf.clear();
        self.head_renderer.render(parts, body.len(), &mut self.buf)?;
        self.buf.extend_from_slice(&body);

        debug!("write request, head and body {} bytes", self.buf.len());

        let mut offset = 0;
        while offset < self.buf.len() {
            let n = self
                .stream
                .write_with_timeout::<SLEEP>(&self.buf[offset..], self.config.get_write_timeout())
                .await?;
            if n == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "write 0").into());
            }
            offset += n;
        }
        self.stream.flush().await?;

        self.buf.clear();

        Ok(())
    }

    //
    pub async fn read_response(&mut self) -> Result<HttpResponse, ClientError> {
        self.read_response_with(&DefaultResponseFactory::new()).await
    }

    pub async fn read_response_with<F>(&mut self, factory: &F) -> Result<F::Response, ClientError>
    where
        F: ResponseFactory,
    {
        let max_len = self.config.get_max_response_len();
        let mut raw = Vec::new();

        self.buf.clear();
        self.buf.resize(self.config.get_buf_capacity(), 0);

        loop {
            let n = self
                .stream
                .read_with_timeout::<SLEEP>(&mut self.buf[..], self.config.get_read_timeout())
                .await?;
            if n == 0 {
                break;
            }
            trace!("read {} bytes", n);

            if raw.len() + n > max_len {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "response too large").into());
            }
            raw.extend_from_slice(&self.buf[..n]);
        }
        self.buf.clear();

        if raw.is_empty() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "read 0").into());
        }

        debug!("read response {} bytes", raw.len());

        Ok(factory.from_raw(&raw)?)
    }

    //
    pub async fn send(&mut self, request: Request<Vec<u8>>) -> Result<HttpResponse, ClientError> {
        self.send_with(request, &DefaultResponseFactory::new()).await
    }

    pub async fn send_with<F>(
        &mut self,
        request: Request<Vec<u8>>,
        factory: &F,
    ) -> Result<F::Response, ClientError>
    where
        F: ResponseFactory,
    {
        self.write_request(request).await?;
        self.read_response_with(factory).await
    }
}

//
//
//
impl<S, SLEEP> AsyncRead for Http1ClientStream<S, SLEEP>
where
    S: AsyncRead + Unpin,
{
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().stream).poll_read(cx, buf)
    }
}

impl<S, SLEEP> AsyncWrite for Http1ClientStream<S, SLEEP>
where
    S: AsyncWrite + Unpin,
{
    fn poll_write(self: Pin<&mut Self>, cx: &mut Context<'_>, buf: &[u8]) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.get_mut().stream).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_flush(cx)
    }

    fn poll_close(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().stream).poll_close(cx)
    }
}
