/// Errors raised when building a [`GrayImage`] from a raw buffer.
#[derive(thiserror::Error, Debug)]
pub enum GrayImageError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

/// Single-channel 8-bit image, row-major, `data.len() == width * height`.
///
/// This is the pixel format marker detectors consume. It is produced once
/// per pipeline invocation and dropped afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Validate dimensions against the buffer length and build the image.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, GrayImageError> {
        let Some(expected) = width.checked_mul(height) else {
            return Err(GrayImageError::InvalidDimensions { width, height });
        };
        if expected == 0 {
            return Err(GrayImageError::InvalidDimensions { width, height });
        }
        if data.len() != expected {
            return Err(GrayImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Pixel intensity at `(x, y)`; `None` outside the image.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[y * self.width + x])
    }
}
