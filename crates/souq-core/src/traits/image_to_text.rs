use crate::errors::SouqResult;

/// Turns an uploaded product image into search text.
pub trait IImageToText: Send + Sync {
    /// Describe the image. Empty input yields an empty string.
    fn process(&self, image_bytes: &[u8]) -> SouqResult<String>;
}
