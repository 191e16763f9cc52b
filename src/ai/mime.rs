/// MIME type every image part declares, whatever the real format is.
pub const DECLARED_IMAGE_MIME: &str = "image/jpeg";

/// Sniff the image format from its magic bytes.
pub fn detect_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

/// Log when the declared MIME type does not match the sniffed one.
///
/// Returns the sniffed type when it differs.
pub fn flag_declared_mismatch(name: &str, bytes: &[u8]) -> Option<&'static str> {
    match detect_image_mime(bytes) {
        Some(actual) if actual != DECLARED_IMAGE_MIME => {
            tracing::warn!(
                "{} looks like {} but is sent declared as {}",
                name,
                actual,
                DECLARED_IMAGE_MIME
            );
            Some(actual)
        }
        Some(_) => None,
        None => {
            tracing::debug!(
                "Unrecognized image format for {} (first 4 bytes: {:02X?})",
                name,
                &bytes[..bytes.len().min(4)]
            );
            None
        }
    }
}
