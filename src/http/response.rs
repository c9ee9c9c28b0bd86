//! HTTP response building module
//!
//! Builders for the two statuses the site ever returns. Each applies the
//! site-wide headers and never panics on a builder error.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::headers::apply_site_headers;

const NOT_FOUND_BODY: &str = "File not found";

/// Build a file response (200 for assets and pages)
pub fn build_file_response(
    status: u16,
    content: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    let mut response = Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(&status.to_string(), &e);
            Response::new(Full::new(Bytes::new()))
        });
    apply_site_headers(&mut response);
    response
}

/// Build 404 Not Found response
pub fn build_404_response(is_head: bool) -> Response<Full<Bytes>> {
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from_static(NOT_FOUND_BODY.as_bytes())
    };

    let mut response = Response::builder()
        .status(404)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", NOT_FOUND_BODY.len())
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY.as_bytes())))
        });
    apply_site_headers(&mut response);
    response
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
