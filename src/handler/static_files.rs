//! Static file serving module
//!
//! Converts a routing [`Resolution`] into an HTTP response.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http;
use crate::routing::Resolution;

/// Build the response for a resolution
///
/// Assets, named pages and the fallback page are all 200; only a missing
/// extensioned asset (or a missing default page) is a 404.
pub fn serve_resolution(resolution: Resolution, is_head: bool) -> Response<Full<Bytes>> {
    let status = resolution.status();
    match resolution {
        Resolution::Asset(file) | Resolution::Page(file) | Resolution::Fallback { page: file, .. } => {
            http::build_file_response(status, file.content, file.content_type, is_head)
        }
        Resolution::NotFound(_) => http::build_404_response(is_head),
    }
}
