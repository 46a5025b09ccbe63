//! File extension to MIME type lookup for Document AI supported formats.

use std::fmt;
use std::path::Path;

/// MIME string sent for anything we do not recognise.
pub const UNSUPPORTED_MIME: &str = "application/octet-stream";

/// MIME types accepted by the document processor.
///
/// [`MimeType::Unsupported`] is the only signal that a file cannot be
/// submitted; classification itself never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Pdf,
    Jpeg,
    Png,
    Tiff,
    Bmp,
    Gif,
    Webp,
    Unsupported,
}

impl MimeType {
    /// Classify a file by the extension of its file name.
    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(Self::from_file_name)
            .unwrap_or(MimeType::Unsupported)
    }

    /// Classify a bare file name such as `scan.TIF`.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => MimeType::Unsupported,
        }
    }

    /// Classify an extension without the leading dot, ignoring case.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => MimeType::Pdf,
            "jpg" | "jpeg" => MimeType::Jpeg,
            "png" => MimeType::Png,
            "tif" | "tiff" => MimeType::Tiff,
            "bmp" => MimeType::Bmp,
            "gif" => MimeType::Gif,
            "webp" => MimeType::Webp,
            _ => MimeType::Unsupported,
        }
    }

    /// The MIME string as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Pdf => "application/pdf",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Png => "image/png",
            MimeType::Tiff => "image/tiff",
            MimeType::Bmp => "image/bmp",
            MimeType::Gif => "image/gif",
            MimeType::Webp => "image/webp",
            MimeType::Unsupported => UNSUPPORTED_MIME,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, MimeType::Unsupported)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
