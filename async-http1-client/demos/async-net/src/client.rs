/*
RUST_LOG=debug cargo run -p async-http1-client-demo-async-net --bin async_http1_client_demo_async_net_client httpbin.org 80 /gzip
*/

use std::env;

use async_net::TcpStream;
use async_sleep::impl_async_io::Timer;
use futures_lite::future::block_on;
use log::info;

use async_http1_client::{Http1ClientStream, Request};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    block_on(run())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let domain = env::args()
        .nth(1)
        .unwrap_or_else(|| env::var("DOMAIN").unwrap_or("httpbin.org".to_owned()));
    let port: u16 = env::args()
        .nth(2)
        .unwrap_or_else(|| env::var("PORT").unwrap_or("80".to_owned()))
        .parse()?;
    let uri = env::args()
        .nth(3)
        .unwrap_or_else(|| env::var("URI").unwrap_or("/ip".to_owned()));

    info!("client {domain} {port} {uri}");

    //
    let addr = format!("{domain}:{port}");
    let stream = TcpStream::connect(addr).await?;

    //
    let mut stream: Http1ClientStream<_, Timer> = Http1ClientStream::new(stream);

    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("Host", domain)
        .header("User-Agent", "async-http1-client")
        .header("Accept", "*/*")
        .header("Accept-Encoding", "gzip, deflate")
        .body(vec![])?;

    let response = stream.send(request).await?;

    println!("{}", response.headers_as_string(true, "\n"));
    println!("{}", String::from_utf8_lossy(&response.body()?));

    Ok(())
}
