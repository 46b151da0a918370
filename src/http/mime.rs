//! Content-Type resolution
//!
//! Maps a file path to the content-type headers used when serving it.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension → MIME type. Extensions are matched lowercase.
const TYPES: &[(&[&str], &str)] = &[
    // Text
    (&["html", "htm"], "text/html; charset=utf-8"),
    (&["css"], "text/css; charset=utf-8"),
    (&["txt", "md"], "text/plain; charset=utf-8"),
    (&["csv"], "text/csv; charset=utf-8"),
    (&["xml"], "application/xml"),
    // Scripts and data
    (&["js", "mjs"], "application/javascript; charset=utf-8"),
    (&["json", "map"], "application/json"),
    (&["wasm"], "application/wasm"),
    // Images
    (&["png"], "image/png"),
    (&["jpg", "jpeg"], "image/jpeg"),
    (&["gif"], "image/gif"),
    (&["svg"], "image/svg+xml"),
    (&["ico"], "image/x-icon"),
    (&["webp"], "image/webp"),
    (&["avif"], "image/avif"),
    // Audio / video
    (&["mp3"], "audio/mpeg"),
    (&["wav"], "audio/wav"),
    (&["ogg"], "audio/ogg"),
    (&["mp4"], "video/mp4"),
    (&["webm"], "video/webm"),
    // Fonts
    (&["woff"], "font/woff"),
    (&["woff2"], "font/woff2"),
    (&["ttf"], "font/ttf"),
    (&["otf"], "font/otf"),
    // Archives and documents
    (&["pdf"], "application/pdf"),
    (&["zip"], "application/zip"),
    (&["gz"], "application/gzip"),
];

/// MIME type for a file extension, `application/octet-stream` when unknown
pub fn content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension.map(str::to_ascii_lowercase) else {
        return OCTET_STREAM;
    };
    TYPES
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map_or(OCTET_STREAM, |(_, mime)| *mime)
}

/// Content-type headers for serving `path`
pub fn resolve(path: &Path) -> Vec<(String, String)> {
    let mime = content_type(path.extension().and_then(|e| e.to_str()));
    vec![("Content-Type".to_string(), mime.to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_types() {
        assert_eq!(content_type(Some("html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Some("json")), "application/json");
        assert_eq!(content_type(Some("png")), "image/png");
        assert_eq!(content_type(Some("PNG")), "image/png");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(content_type(Some("xyz")), OCTET_STREAM);
        assert_eq!(content_type(None), OCTET_STREAM);
    }

    #[test]
    fn test_resolve_path() {
        let headers = resolve(Path::new("public/docs/index.html"));
        assert_eq!(
            headers,
            vec![("Content-Type".to_string(), "text/html; charset=utf-8".to_string())]
        );
        assert_eq!(resolve(Path::new("public/LICENSE"))[0].1, OCTET_STREAM);
    }
}
