//! Content type detection based on file extensions.

/// Map a file extension to the `Content-Type` header value to serve.
///
/// Unknown extensions and extension-less files fall back to
/// `application/octet-stream`.
pub fn content_type_for(extension: Option<&str>) -> &'static str {
    let Some(extension) = extension else {
        return "application/octet-stream";
    };

    match extension.to_ascii_lowercase().as_str() {
        // Documents
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" | "map" => "application/json",
        "webmanifest" => "application/manifest+json",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "md" => "text/markdown; charset=utf-8",
        "pdf" => "application/pdf",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "avif" => "image/avif",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // Audio and video
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "webm" => "video/webm",

        // Archives
        "gz" => "application/gzip",
        "zip" => "application/zip",
        "wasm" => "application/wasm",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_is_utf8_text() {
        assert_eq!(content_type_for(Some("html")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Some("htm")), "text/html; charset=utf-8");
    }

    #[test]
    fn test_script_extensions() {
        assert_eq!(content_type_for(Some("js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type_for(Some("mjs")), "text/javascript; charset=utf-8");
    }

    #[test]
    fn test_extension_case_is_ignored() {
        assert_eq!(content_type_for(Some("PNG")), "image/png");
        assert_eq!(content_type_for(Some("Svg")), "image/svg+xml");
    }

    #[test]
    fn test_source_maps_are_json() {
        assert_eq!(content_type_for(Some("map")), "application/json");
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for(Some("xyz")), "application/octet-stream");
        assert_eq!(content_type_for(None), "application/octet-stream");
    }

    #[test]
    fn test_font_extensions() {
        assert_eq!(content_type_for(Some("woff2")), "font/woff2");
        assert_eq!(content_type_for(Some("ttf")), "font/ttf");
    }
}
