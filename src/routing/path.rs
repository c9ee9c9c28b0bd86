//! Request path normalization and extension detection

use std::fmt;

use percent_encoding::percent_decode_str;

/// Normalized, percent-decoded request path, never empty (`/` at minimum)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    path: String,
    /// False when the escapes did not decode to UTF-8; such a path names no file
    decoded: bool,
}

impl RequestPath {
    /// Normalize a raw request target: drop query/fragment, decode `%XX`
    /// escapes, ensure a leading slash
    pub fn new(raw: &str) -> Self {
        let raw = raw.split(['?', '#']).next().unwrap_or_default();
        let (path, decoded) = match percent_decode_str(raw).decode_utf8() {
            Ok(text) => (text.into_owned(), true),
            Err(_) => (raw.to_string(), false),
        };
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        Self { path, decoded }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub const fn is_decoded(&self) -> bool {
        self.decoded
    }

    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Path with the single leading slash removed
    pub fn relative(&self) -> &str {
        self.path.strip_prefix('/').unwrap_or(&self.path)
    }

    /// File-type suffix of the final segment, without the dot.
    ///
    /// Trailing slashes are ignored and leading dots never start an
    /// extension, so `/.well-known` has none while `/index.` has an empty one.
    pub fn extension(&self) -> Option<&str> {
        let segment = self
            .path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        let stem = segment.trim_start_matches('.');
        stem.rfind('.').map(|dot| &stem[dot + 1..])
    }

    pub fn has_extension(&self) -> bool {
        self.extension().is_some()
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
