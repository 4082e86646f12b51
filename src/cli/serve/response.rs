//! HTTP response helpers.

use crate::utils::mime::types::PLAIN;
use anyhow::Result;
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with `body`, or with headers only for HEAD requests.
pub fn respond(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, content_type);
    }
    send_body(request, status, content_type, body)
}

pub fn respond_not_found(request: Request) -> Result<()> {
    respond(request, 404, PLAIN, b"404 Not Found".to_vec())
}

pub fn respond_bad_request(request: Request, message: &str) -> Result<()> {
    respond(request, 400, PLAIN, format!("400 Bad Request: {message}").into_bytes())
}

/// Respond with 405, advertising the supported methods.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_string("405 Method Not Allowed")
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN))
        .with_header(make_header("Allow", "GET, HEAD"));
    request.respond(response)?;
    Ok(())
}

/// Respond with a `302 Found` pointing at `location`.
pub fn respond_redirect(request: Request, location: &str) -> Result<()> {
    let location = Header::from_bytes("Location", location.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid redirect location `{location}`"))?;
    let response = Response::empty(StatusCode(302))
        .with_header(location)
        .with_header(make_header("Cache-Control", "no-store"));
    request.respond(response)?;
    Ok(())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

/// Header from static ASCII, which tiny_http always accepts.
fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).expect("static header is valid ASCII")
}
