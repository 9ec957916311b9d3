//! Extension to MIME-type mapping
//!
//! A small fixed table covering the document types this system serves; not a
//! general-purpose registry.

/// MIME type for a lowercase file extension, `None` when unrecognized
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    let mime = match extension {
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "rtf" => "application/rtf",
        "txt" | "log" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "xml" => "text/xml",
        "json" => "application/json",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "7z" => "application/x-7z-compressed",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        _ => return None,
    };
    Some(mime)
}

/// Top-level category of a MIME type (`"image/png"` → `"image"`)
pub fn top_level(mime: &str) -> &str {
    mime.split('/').next().unwrap_or(mime)
}

/// Fallback content type for unrecognized extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type for a document name, defaulting to octet-stream
pub fn content_type_for_name(name: &str) -> &'static str {
    crate::types::file_extension(name)
        .and_then(|ext| mime_for_extension(&ext.to_ascii_lowercase()))
        .unwrap_or(OCTET_STREAM)
}
