//! Data URI encoding and MIME sniffing.
//!
//! The browser build gets data URIs straight from `FileReader`; the native
//! build produces the same shape here so both pathways render identically.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;

use crate::error::{PreviewError, Result};

/// MIME type reported for content that can't be identified.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Supported image file extensions.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff", "tif"];

/// Check if a filename has a supported image extension.
pub fn is_image_file(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// A parsed data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, without parameters
    pub mime: String,
    /// Decoded payload
    pub bytes: Vec<u8>,
}

/// Encode bytes as a base64 data URI.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Parse a data URI back into its media type and bytes.
pub fn decode(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| PreviewError::InvalidDataUri("missing 'data:' scheme".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| PreviewError::InvalidDataUri("missing ',' separator".to_string()))?;

    let mut params = header.split(';');
    let mime = match params.next() {
        Some(mime) if !mime.is_empty() => mime.to_string(),
        // RFC 2397 default media type
        _ => "text/plain".to_string(),
    };
    let is_base64 = params.any(|param| param == "base64");

    let bytes = if is_base64 {
        BASE64
            .decode(payload)
            .map_err(|e| PreviewError::InvalidDataUri(e.to_string()))?
    } else {
        payload.as_bytes().to_vec()
    };

    Ok(DataUri { mime, bytes })
}

/// Guess the MIME type of a file from its content, then its name.
///
/// Magic bytes win over the extension, so a PNG saved as `photo.jpg` is
/// still reported as `image/png`.
pub fn sniff_mime(name: &str, bytes: &[u8]) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }

    std::path::Path::new(name)
        .extension()
        .and_then(ImageFormat::from_extension)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
    const JPEG_HEADER: &[u8] = b"\xff\xd8\xff\xe0\0\x10JFIF\0";

    #[test]
    fn test_encode() {
        assert_eq!(encode("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(encode("image/gif", b""), "data:image/gif;base64,");
    }

    #[test]
    fn test_decode_base64() {
        let uri = decode("data:image/png;base64,YWJj").unwrap();
        assert_eq!(uri.mime, "image/png");
        assert_eq!(uri.bytes, b"abc");
    }

    #[test]
    fn test_decode_preserves_binary_payload() {
        let uri = decode(&encode("image/png", PNG_HEADER)).unwrap();
        assert_eq!(uri.bytes, PNG_HEADER);
    }

    #[test]
    fn test_decode_plain_payload_and_default_mime() {
        let uri = decode("data:,hello").unwrap();
        assert_eq!(uri.mime, "text/plain");
        assert_eq!(uri.bytes, b"hello");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(
            decode("image/png;base64,YWJj"),
            Err(PreviewError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode("data:image/png;base64"),
            Err(PreviewError::InvalidDataUri(_))
        ));
        assert!(matches!(
            decode("data:image/png;base64,not base64!"),
            Err(PreviewError::InvalidDataUri(_))
        ));
    }

    #[test]
    fn test_sniff_mime_magic_bytes_win() {
        assert_eq!(sniff_mime("photo.jpg", PNG_HEADER), "image/png");
        assert_eq!(sniff_mime("image.png", JPEG_HEADER), "image/jpeg");
        assert_eq!(sniff_mime("anim", b"GIF89a\x01\0\x01\0"), "image/gif");
    }

    #[test]
    fn test_sniff_mime_falls_back_to_extension() {
        assert_eq!(sniff_mime("truncated.png", b"\x89P"), "image/png");
        assert_eq!(sniff_mime("notes.txt", b"hello"), FALLBACK_MIME);
        assert_eq!(sniff_mime("", b""), FALLBACK_MIME);
    }

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("test.png"));
        assert!(is_image_file("test.JPEG"));
        assert!(is_image_file("path/to/image.webp"));
        assert!(!is_image_file("test.txt"));
        assert!(!is_image_file("test"));
        assert!(!is_image_file(""));
    }
}
