//! Image sanitizer - decode, verify, strip and re-encode
//!
//! The output never shares bytes with the input: pixels are decoded into a
//! fresh buffer, normalized to 64x64 RGB and written out by the PNG encoder.
//! Anything that is not pixel data (EXIF, ICC profiles, text chunks,
//! thumbnails, bytes after the end marker) is dropped on the way.

use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageEncoder, ImageReader, Limits};
use std::io::Cursor;

use crate::kind::ImageKind;
use crate::limits::{
    MAX_DECODE_ALLOC_BYTES, MAX_DECODE_DIMENSION, OUTPUT_HEIGHT, OUTPUT_WIDTH,
};
use crate::upload::SanitizedImage;
use crate::validator::ValidationError;

/// Turns verified image bytes into the canonical stored form.
pub trait ImageSanitizer: Send + Sync {
    /// `expected` is the type the sniffer found; the decoder must agree.
    fn sanitize(&self, bytes: &[u8], expected: ImageKind)
        -> Result<SanitizedImage, ValidationError>;
}

/// Sanitizer producing 64x64 RGB PNGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngSanitizer;

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DECODE_DIMENSION);
    limits.max_image_height = Some(MAX_DECODE_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC_BYTES);
    limits
}

fn decode_failure(step: &str, err: impl std::fmt::Display) -> ValidationError {
    ValidationError::DecodeFailure(format!("{}: {}", step, err))
}

impl PngSanitizer {
    /// Full decode as an integrity check, plus the decoder's own format call.
    fn verify(bytes: &[u8], expected: ImageKind) -> Result<(), ValidationError> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| decode_failure("format detection", e))?;

        let detected = reader
            .format()
            .and_then(ImageKind::from_image_format)
            .ok_or_else(|| {
                ValidationError::DecodeFailure("decoder did not recognize JPEG or PNG".to_string())
            })?;

        if detected != expected {
            return Err(ValidationError::DecodeFailure(format!(
                "decoder found {} but content was sniffed as {}",
                detected, expected
            )));
        }

        reader.limits(decode_limits());
        let image = reader.decode().map_err(|e| decode_failure("verify", e))?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ValidationError::DecodeFailure(
                "image has no pixels".to_string(),
            ));
        }

        Ok(())
    }

    /// Second, format-pinned decode whose pixels become the output.
    fn redecode(bytes: &[u8], kind: ImageKind) -> Result<DynamicImage, ValidationError> {
        let mut reader = ImageReader::with_format(Cursor::new(bytes), kind.image_format());
        reader.limits(decode_limits());
        reader.decode().map_err(|e| decode_failure("re-decode", e))
    }
}

impl ImageSanitizer for PngSanitizer {
    fn sanitize(
        &self,
        bytes: &[u8],
        expected: ImageKind,
    ) -> Result<SanitizedImage, ValidationError> {
        Self::verify(bytes, expected)?;
        let decoded = Self::redecode(bytes, expected)?;

        // to_rgb8 allocates a new pixel-only buffer; alpha, palette and gray
        // inputs all collapse to three channels here.
        let pixels = decoded.to_rgb8();

        let pixels = if pixels.dimensions() == (OUTPUT_WIDTH, OUTPUT_HEIGHT) {
            pixels
        } else {
            imageops::resize(&pixels, OUTPUT_WIDTH, OUTPUT_HEIGHT, FilterType::CatmullRom)
        };

        let mut encoded = Vec::with_capacity((OUTPUT_WIDTH * OUTPUT_HEIGHT * 3) as usize);
        PngEncoder::new(&mut encoded)
            .write_image(
                pixels.as_raw(),
                OUTPUT_WIDTH,
                OUTPUT_HEIGHT,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| decode_failure("encode", e))?;

        Ok(SanitizedImage::new(encoded, OUTPUT_WIDTH, OUTPUT_HEIGHT))
    }
}
