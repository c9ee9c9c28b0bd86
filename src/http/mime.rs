//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension.
//! `.css` and `.js` always map to `text/css` and `application/javascript`.

use std::path::Path;

/// Get MIME Content-Type based on a lowercase file extension
///
/// # Examples
/// ```
/// use pak_builders::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("css")), "text/css");
/// assert_eq!(get_content_type(Some("js")), "application/javascript");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    match extension {
        // Pages and styles
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // Scripts and data
        Some("js" | "mjs") => "application/javascript",
        Some("json" | "map") => "application/json",
        Some("webmanifest") => "application/manifest+json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",

        // Video
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("eot") => "application/vnd.ms-fontobject",

        // Documents (brochures, company profile)
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",

        // Default
        _ => "application/octet-stream",
    }
}

/// Content type for a file path, case-insensitive on the extension
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    get_content_type(extension.as_deref())
}
