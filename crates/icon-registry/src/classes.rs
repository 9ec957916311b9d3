//! Fixed extension to font-class table
//!
//! Keyed by the resolved icon path's own extension, not the extension of the
//! document being rendered. Entirely independent of the dynamic icon-path
//! table built by the registry.

/// CSS font class for a lowercase file extension, `None` when unmapped
pub fn font_class_for_extension(extension: &str) -> Option<&'static str> {
    let class = match extension {
        "gif" | "png" | "jpg" | "jpeg" | "bmp" | "svg" => "fa fa-file-image-o",
        "pdf" => "fa fa-file-pdf-o",
        "doc" | "docx" | "rtf" => "fa fa-file-word-o",
        "xls" | "xlsx" | "csv" => "fa fa-file-excel-o",
        "ppt" | "pptx" => "fa fa-file-powerpoint-o",
        "zip" | "gz" | "tar" | "7z" => "fa fa-file-zip-o",
        "txt" | "md" | "log" => "fa fa-file-text-o",
        "mp3" | "wav" => "fa fa-file-audio-o",
        "mp4" | "mov" | "avi" => "fa fa-file-video-o",
        "html" | "htm" | "xml" | "css" | "js" | "json" => "fa fa-file-code-o",
        _ => return None,
    };
    Some(class)
}
