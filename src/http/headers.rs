//! Site-wide response headers
//!
//! Every response, including 404s, disables caching and allows indexing.

use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL, EXPIRES, PRAGMA};
use hyper::Response;

/// Header name/value pairs applied to every response
pub const SITE_HEADERS: [(&str, &str); 4] = [
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
    ("x-robots-tag", "index, follow, all"),
];

/// Overwrite the cache and robots headers on a response
pub fn apply_site_headers<B>(response: &mut Response<B>) {
    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(SITE_HEADERS[0].1));
    headers.insert(PRAGMA, HeaderValue::from_static(SITE_HEADERS[1].1));
    headers.insert(EXPIRES, HeaderValue::from_static(SITE_HEADERS[2].1));
    headers.insert(
        HeaderName::from_static(SITE_HEADERS[3].0),
        HeaderValue::from_static(SITE_HEADERS[3].1),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_applied() {
        let mut response = Response::new(());
        apply_site_headers(&mut response);
        for (name, value) in SITE_HEADERS {
            assert_eq!(response.headers().get(name).unwrap(), value, "{name}");
        }
    }

    #[test]
    fn test_headers_replace_existing_cache_control() {
        let mut response = Response::builder()
            .header("Cache-Control", "public, max-age=3600")
            .body(())
            .unwrap();
        apply_site_headers(&mut response);
        let values: Vec<_> = response.headers().get_all("cache-control").iter().collect();
        assert_eq!(values, vec!["no-cache, no-store, must-revalidate"]);
    }
}
