//! Decode an encoded camera frame into the detector's grayscale buffer.

use tagtrack_core::{GrayImage, GrayImageError};

use crate::camera::EncodedImage;

/// The frame could not be turned into a grayscale buffer.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("unsupported or corrupt image data: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Buffer(#[from] GrayImageError),
}

/// Decode `encoded` and reduce it to a single channel.
///
/// A frame that already decodes as single-channel 8-bit passes through
/// without conversion; everything else goes through a luma conversion at
/// identical spatial dimensions. Pure transform, no side effects.
pub fn decode_gray(encoded: &EncodedImage) -> Result<GrayImage, DecodeError> {
    let decoded = image::load_from_memory(&encoded.bytes)?;
    let (width, height) = (decoded.width() as usize, decoded.height() as usize);
    let luma = match decoded {
        image::DynamicImage::ImageLuma8(img) => img,
        other => other.to_luma8(),
    };
    Ok(GrayImage::from_raw(width, height, luma.into_raw())?)
}
