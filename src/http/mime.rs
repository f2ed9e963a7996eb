//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension only.
//! File content is never sniffed.

use std::path::Path;

/// Get MIME Content-Type based on file extension (case-insensitive)
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return "application/octet-stream";
    };

    match ext.to_ascii_lowercase().as_str() {
        "txt" => "text/plain",
        "html" => "text/html",
        "jpg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Content-Type for a stored file name
pub fn content_type_for(name: &str) -> &'static str {
    get_content_type(Path::new(name).extension().and_then(|e| e.to_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types() {
        assert_eq!(get_content_type(Some("txt")), "text/plain");
        assert_eq!(get_content_type(Some("html")), "text/html");
        assert_eq!(get_content_type(Some("jpg")), "image/jpeg");
        assert_eq!(get_content_type(Some("png")), "image/png");
        assert_eq!(get_content_type(Some("pdf")), "application/pdf");
        assert_eq!(get_content_type(Some("zip")), "application/zip");
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert_eq!(get_content_type(Some("PNG")), "image/png");
        assert_eq!(content_type_for("Scan.PDF"), "application/pdf");
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("unknownext")), "application/octet-stream");
        // Only the listed extensions are recognised
        assert_eq!(get_content_type(Some("jpeg")), "application/octet-stream");
        assert_eq!(get_content_type(None), "application/octet-stream");
        assert_eq!(content_type_for("Makefile"), "application/octet-stream");
        assert_eq!(content_type_for(".bashrc"), "application/octet-stream");
    }
}
