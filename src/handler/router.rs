//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Every method is routed like GET;
//! HEAD keeps the headers and drops the body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use crate::config::AppState;
use crate::handler::static_files;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RequestPath;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let is_head = *req.method() == Method::HEAD;
    let path = RequestPath::new(req.uri().path());

    let resolution = state.router.resolve(&path).await;
    logger::log_resolution(path.as_str(), &resolution);
    let kind = resolution.kind();

    let response = static_files::serve_resolution(resolution, is_head);

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            req.method().to_string(),
            path.to_string(),
        );
        entry.query = req.uri().query().map(ToString::to_string);
        entry.http_version = format_version(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        entry.resolution = kind;
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn format_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;

    fn state_for(root: &std::path::Path) -> Arc<AppState> {
        let mut cfg = Config::load_from("does-not-exist/site", None).unwrap();
        cfg.site.root = root.to_str().unwrap().to_string();
        cfg.logging.access_log = false;
        Arc::new(AppState::new(&cfg).unwrap())
    }

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Home</h1>").unwrap();
        std::fs::write(dir.path().join("about.html"), "<h1>About</h1>").unwrap();
        std::fs::write(dir.path().join("style.css"), "body{}").unwrap();
        dir
    }

    async fn send(state: &Arc<AppState>, method: Method, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap();
        handle_request(req, Arc::clone(state), "127.0.0.1:40000".parse().unwrap())
            .await
            .unwrap()
    }

    async fn body(response: Response<Full<Bytes>>) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_any_method_routes_like_get() {
        let dir = site();
        let state = state_for(dir.path());
        for method in [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS] {
            let response = send(&state, method.clone(), "/about").await;
            assert_eq!(response.status(), 200, "{method}");
            assert_eq!(body(response).await, "<h1>About</h1>");
        }
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let dir = site();
        let state = state_for(dir.path());
        let response = send(&state, Method::HEAD, "/style.css").await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/css");
        assert_eq!(response.headers()["content-length"], "6");
        assert!(body(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_query_string_is_ignored_for_routing() {
        let dir = site();
        let state = state_for(dir.path());
        let response = send(&state, Method::GET, "/style.css?v=3").await;
        assert_eq!(response.status(), 200);
        let response = send(&state, Method::GET, "/missing?x=1").await;
        assert_eq!(body(response).await, "<h1>Home</h1>");
    }

    #[tokio::test]
    async fn test_headers_on_every_outcome() {
        let dir = site();
        let state = state_for(dir.path());
        for uri in ["/", "/about", "/nowhere", "/style.css", "/missing.js"] {
            let response = send(&state, Method::GET, uri).await;
            assert_eq!(response.headers()["cache-control"], "no-cache, no-store, must-revalidate", "{uri}");
            assert_eq!(response.headers()["pragma"], "no-cache", "{uri}");
            assert_eq!(response.headers()["expires"], "0", "{uri}");
            assert_eq!(response.headers()["x-robots-tag"], "index, follow, all", "{uri}");
        }
    }
}
