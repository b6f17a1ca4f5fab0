//! In-process test image builders.

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

fn rgb_pattern(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
    })
}

pub fn png_rgb(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(rgb_pattern(width, height)), ImageFormat::Png)
}

/// Blocky RGBA image with half-transparent quadrants; compresses well.
pub fn png_rgba(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        let block = ((x / 50) + (y / 50)) % 4;
        match block {
            0 => Rgba([255, 0, 0, 255]),
            1 => Rgba([0, 255, 0, 128]),
            2 => Rgba([0, 0, 255, 255]),
            _ => Rgba([255, 255, 255, 0]),
        }
    });
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

pub fn png_gray(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, y| Luma([((x * y) % 256) as u8]));
    encode(DynamicImage::ImageLuma8(image), ImageFormat::Png)
}

pub fn jpeg_rgb(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(rgb_pattern(width, height)), ImageFormat::Jpeg)
}

pub fn jpeg_gray(width: u32, height: u32) -> Vec<u8> {
    let image = GrayImage::from_fn(width, height, |x, _| Luma([(x * 5 % 256) as u8]));
    encode(DynamicImage::ImageLuma8(image), ImageFormat::Jpeg)
}

/// JPEG of pseudo-random noise, large enough to exceed the upload ceiling.
pub fn jpeg_noise(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 0x1234_5678;
    let image = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        Rgb([next(), next(), next()])
    });
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
}

fn encode_png(
    width: u32,
    height: u32,
    color: png::ColorType,
    palette: Option<Vec<u8>>,
    text: Option<(&str, &str)>,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        if let Some((keyword, text)) = text {
            encoder
                .add_text_chunk(keyword.to_string(), text.to_string())
                .unwrap();
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
        writer.finish().unwrap();
    }
    buf
}

/// Indexed-colour PNG with a four-entry palette.
pub fn png_palette(width: u32, height: u32) -> Vec<u8> {
    let palette = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 0];
    let indices: Vec<u8> = (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x + y) % 4) as u8))
        .collect();
    encode_png(width, height, png::ColorType::Indexed, Some(palette), None, &indices)
}

/// RGB PNG carrying a tEXt chunk.
pub fn png_rgb_with_text(width: u32, height: u32, keyword: &str, text: &str) -> Vec<u8> {
    let pixels = rgb_pattern(width, height);
    encode_png(
        width,
        height,
        png::ColorType::Rgb,
        None,
        Some((keyword, text)),
        pixels.as_raw(),
    )
}

/// Insert a JPEG marker segment (`0xFF marker len payload`) straight after SOI.
pub fn with_jpeg_segment(jpeg: &[u8], marker: u8, payload: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    let len = u16::try_from(payload.len() + 2).unwrap();

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, marker]);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// APP1 payload: `Exif\0\0`, a big-endian TIFF header, an empty IFD and `tail`.
pub fn exif_payload(tail: &[u8]) -> Vec<u8> {
    let mut payload = b"Exif\0\0MM\0\x2a\0\0\0\x08\0\0\0\0\0\0".to_vec();
    payload.extend_from_slice(tail);
    payload
}

/// APP2 payload: a single-chunk `ICC_PROFILE` segment carrying `tail`.
pub fn icc_payload(tail: &[u8]) -> Vec<u8> {
    let mut payload = b"ICC_PROFILE\0".to_vec();
    payload.extend_from_slice(&[1, 1]);
    payload.extend_from_slice(tail);
    payload
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_png_decodes() {
        let decoded = image::load_from_memory(&png_palette(5, 3)).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
    }

    #[test]
    fn test_jpeg_segments_keep_the_file_decodable() {
        let jpeg = jpeg_rgb(8, 8);
        let tagged = with_jpeg_segment(&jpeg, 0xE1, &exif_payload(b"camera"));
        let tagged = with_jpeg_segment(&tagged, 0xE2, &icc_payload(b"profile"));

        assert!(contains(&tagged, b"Exif\0\0"));
        assert!(contains(&tagged, b"ICC_PROFILE\0"));
        let decoded = image::load_from_memory(&tagged).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }
}
