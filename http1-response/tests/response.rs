use std::error::Error;

use http1_response::{HeaderField, Headers, HttpResponse, ParseConfig, ResponseError};

#[test]
fn simple() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\nhello")?;

    assert_eq!(res.version(), "1.1");
    assert_eq!(res.code(), 200);
    assert_eq!(res.message(), "OK");
    assert_eq!(res.headers().len(), 1);
    assert_eq!(res.headers().get("content-type").unwrap(), "text/plain");
    assert_eq!(res.raw_body(), b"hello");
    assert_eq!(&res.body()?[..], b"hello");

    Ok(())
}

#[test]
fn bare_lf() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.0 404 Not Found\nServer: x\n\nmissing\n")?;

    assert_eq!(res.version(), "1.0");
    assert_eq!(res.code(), 404);
    assert_eq!(res.message(), "Not Found");
    assert_eq!(res.headers().get("Server").unwrap(), "x");
    assert_eq!(res.raw_body(), b"missing");

    Ok(())
}

#[test]
fn custom_reason_is_kept() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 200 Everything Fine\r\n\r\n")?;
    assert_eq!(res.message(), "Everything Fine");

    Ok(())
}

#[test]
fn missing_reason_defaults_to_table() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 404\r\n\r\n")?;
    assert_eq!(res.message(), "Not Found");

    Ok(())
}

#[test]
fn no_separator() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 204 No Content\r\nX-A: 1")?;
    assert_eq!(res.code(), 204);
    assert_eq!(res.headers().get("x-a").unwrap(), "1");
    assert_eq!(res.raw_body(), b"");

    Ok(())
}

#[test]
fn duplicate_headers() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(
        b"HTTP/1.1 200 OK\r\nSet-Cookie: a=1\r\nVary: Accept\r\nset-cookie: b=2\r\nSET-COOKIE: c=3\r\n\r\n",
    )?;

    assert_eq!(res.headers().len(), 2);
    match res.header("Set-Cookie") {
        Some(HeaderField::Multiple(values)) => assert_eq!(values, &["a=1", "b=2", "c=3"]),
        other => panic!("{:?}", other),
    }
    match res.header("vary") {
        Some(HeaderField::Single(value)) => assert_eq!(value, "Accept"),
        other => panic!("{:?}", other),
    }
    assert_eq!(res.header("x-missing"), None);

    let names = res
        .headers()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, ["set-cookie", "vary"]);

    Ok(())
}

#[test]
fn folded_header() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(
        b"HTTP/1.1 200 OK\r\nX-Long: first\r\n  second\r\n\tthird\r\nX-Next: n\r\n\r\n",
    )?;

    assert_eq!(res.headers().get("x-long").unwrap(), "firstsecondthird");
    assert_eq!(res.headers().get("x-next").unwrap(), "n");

    Ok(())
}

#[test]
fn continuation_before_any_header_is_dropped() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 200 OK\r\n  orphan\r\nX-A: 1\r\n\r\n")?;

    assert_eq!(res.headers().len(), 1);
    assert_eq!(res.headers().get("x-a").unwrap(), "1");

    Ok(())
}

#[test]
fn interim_continue_is_unwrapped() -> Result<(), Box<dyn Error>> {
    let res =
        HttpResponse::parse(b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 404 Not Found\r\n\r\nmissing")?;

    assert_eq!(res.code(), 404);
    assert_eq!(res.message(), "Not Found");
    assert!(res.headers().is_empty());
    assert_eq!(res.raw_body(), b"missing");

    Ok(())
}

#[test]
fn repeated_interim_continues() -> Result<(), Box<dyn Error>> {
    let raw = b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 200 OK\r\nX-A: 1\r\n\r\nok";

    let res = HttpResponse::parse(raw)?;
    assert_eq!(res.code(), 200);
    assert_eq!(res.raw_body(), b"ok");

    let mut config = ParseConfig::new();
    config.set_max_interim_responses(1);
    match HttpResponse::parse_with_config(raw, &config) {
        Err(ResponseError::TooManyInterimResponses(1)) => {}
        other => panic!("{:?}", other),
    }

    Ok(())
}

#[test]
fn continue_with_headers_is_kept() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(
        b"HTTP/1.1 100 Continue\r\nX-A: 1\r\n\r\nHTTP/1.1 200 OK\r\n\r\nok",
    )?;
    assert_eq!(res.code(), 100);

    let res = HttpResponse::parse(b"HTTP/1.1 100 Continue\r\n\r\nnot a response")?;
    assert_eq!(res.code(), 100);
    assert_eq!(res.raw_body(), b"not a response");

    Ok(())
}

#[test]
fn invalid_input() {
    match HttpResponse::parse(b"garbage") {
        Err(ResponseError::MissingStatusLine) => {}
        other => panic!("{:?}", other),
    }
    match HttpResponse::parse(b"HTTP/1.1 999 Whatever\r\n\r\n") {
        Err(ResponseError::InvalidStatusCode(999)) => {}
        other => panic!("{:?}", other),
    }
    match HttpResponse::parse(b"HTTP/1.x 200 OK\r\n\r\n") {
        Err(ResponseError::InvalidVersion(version)) => assert_eq!(version, "1.x"),
        other => panic!("{:?}", other),
    }
    match HttpResponse::parse(b"HTTP/2 200 OK\r\n\r\n") {
        Err(ResponseError::InvalidVersion(version)) => assert_eq!(version, "2"),
        other => panic!("{:?}", other),
    }
}

#[test]
fn control_bytes_in_header_values() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 200 OK\nX-A: a\rb\nX-B: a\x7fb\nX-C: a\x01b\n\nok")?;

    assert_eq!(res.headers().get("x-a").unwrap(), &b"a\rb"[..]);
    assert_eq!(res.headers().get("x-b").unwrap(), &b"a\x7fb"[..]);
    assert_eq!(res.headers().get("x-c").unwrap(), &b"a\x01b"[..]);
    assert_eq!(res.raw_body(), b"ok");
    assert!(res.headers_as_string(false, "\n").starts_with("X-A: a\rb\n"));

    match res.to_response() {
        Err(ResponseError::InvalidHeaderValue(_)) => {}
        other => panic!("{:?}", other),
    }

    Ok(())
}

#[test]
fn builder() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::builder().code(404).build()?;
    assert_eq!(res.message(), "Not Found");
    assert_eq!(res.version(), "1.1");

    let res = HttpResponse::builder()
        .code(302)
        .version("1.0")
        .message("Moved Temporarily")
        .header_line("location:  /next ")
        .header("X-Count", "1")
        .header(http1_response::http::header::CACHE_CONTROL, "no-cache")
        .body("see elsewhere")
        .build()?;
    assert_eq!(res.version(), "1.0");
    assert_eq!(res.message(), "Moved Temporarily");
    assert_eq!(res.headers().get("Location").unwrap(), "/next");
    assert_eq!(res.headers().get("cache-control").unwrap(), "no-cache");
    assert_eq!(res.raw_body(), b"see elsewhere");

    match HttpResponse::builder().code(999).build() {
        Err(ResponseError::InvalidStatusCode(999)) => {}
        other => panic!("{:?}", other),
    }
    match HttpResponse::builder().version("1.1.1").build() {
        Err(ResponseError::InvalidVersion(_)) => {}
        other => panic!("{:?}", other),
    }
    match HttpResponse::builder().header_line("NoColonHere").build() {
        Err(ResponseError::InvalidHeaderLine(line)) => assert_eq!(line, "NoColonHere"),
        other => panic!("{:?}", other),
    }
    match HttpResponse::builder().header("bad name", "v").build() {
        Err(ResponseError::InvalidHeaderName(_)) => {}
        other => panic!("{:?}", other),
    }

    let res = HttpResponse::new(204, Headers::new(), Vec::new())?;
    assert_eq!(res.message(), "No Content");

    Ok(())
}

#[test]
fn classification() -> Result<(), Box<dyn Error>> {
    for code in [100, 101, 200, 204, 206] {
        let res = HttpResponse::builder().code(code).build()?;
        assert!(res.is_successful(), "{}", code);
        assert!(!res.is_redirect(), "{}", code);
        assert!(!res.is_error(), "{}", code);
    }
    for code in [300, 302, 304, 307] {
        let res = HttpResponse::builder().code(code).build()?;
        assert!(!res.is_successful(), "{}", code);
        assert!(res.is_redirect(), "{}", code);
        assert!(!res.is_error(), "{}", code);
    }
    for code in [400, 404, 417, 500, 505, 509] {
        let res = HttpResponse::builder().code(code).build()?;
        assert!(!res.is_successful(), "{}", code);
        assert!(!res.is_redirect(), "{}", code);
        assert!(res.is_error(), "{}", code);
    }

    Ok(())
}

#[test]
fn as_bytes() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(
        b"HTTP/1.1 200 OK\r\ncontent-type: text/plain\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\nhello",
    )?;

    assert_eq!(
        res.as_bytes("\r\n"),
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nSet-Cookie: a=1\r\nSet-Cookie: b=2\r\n\r\nhello"
    );
    assert_eq!(
        res.headers_as_string(false, "<br />"),
        "Content-Type: text/plain<br />Set-Cookie: a=1<br />Set-Cookie: b=2<br />"
    );
    assert_eq!(
        res.to_string(),
        "HTTP/1.1 200 OK\nContent-Type: text/plain\nSet-Cookie: a=1\nSet-Cookie: b=2\n\nhello"
    );

    Ok(())
}

#[test]
fn round_trip_keeps_status_line_and_raw_body() -> Result<(), Box<dyn Error>> {
    let raws: [&[u8]; 3] = [
        b"HTTP/1.0 301 Moved Permanently\r\nLocation: /a\r\n\r\n",
        b"HTTP/1.1 500 Oops\nX: y\n\nstack trace",
        b"HTTP/1.1 206\r\n\r\n0123",
    ];
    for raw in raws {
        let res = HttpResponse::parse(raw)?;
        let again = HttpResponse::parse(&res.as_bytes("\r\n"))?;

        assert_eq!(again.code(), res.code());
        assert_eq!(again.version(), res.version());
        assert_eq!(again.message(), res.message());
        assert_eq!(again.raw_body(), res.raw_body());
        assert_eq!(again.headers(), res.headers());
    }

    Ok(())
}

#[test]
fn continue_wrapping_oversized_code_is_kept() -> Result<(), Box<dyn Error>> {
    let res = HttpResponse::parse(b"HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 70000 X\r\n\r\n")?;

    assert_eq!(res.code(), 100);
    assert_eq!(res.raw_body(), b"HTTP/1.1 70000 X");

    Ok(())
}
