//! HTTP protocol layer module
//!
//! Content types, the site-wide response headers and the response builders.
//! Kept free of routing decisions so handlers only pick what to send.

pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use headers::{apply_site_headers, SITE_HEADERS};
pub use response::{build_404_response, build_file_response};
