//! Test fixtures: small images generated in-process.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format)
        .expect("Failed to encode fixture");
    buf
}

/// Four flat quadrants with partial transparency. Compresses well, so even
/// large dimensions stay far below the upload ceiling.
pub fn png_rgba(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        match (x < width / 2, y < height / 2) {
            (true, true) => Rgba([220, 40, 40, 255]),
            (false, true) => Rgba([40, 220, 40, 200]),
            (true, false) => Rgba([40, 40, 220, 128]),
            (false, false) => Rgba([240, 240, 240, 0]),
        }
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

pub fn jpeg_rgb(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 140, 200]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// Pseudo-random pixels; JPEG cannot compress them, so the file is large.
pub fn jpeg_noise(width: u32, height: u32) -> Vec<u8> {
    let mut seed: u32 = 0x2545_f491;
    let img = RgbImage::from_fn(width, height, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = seed.to_le_bytes();
        Rgb([r, g, b])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

pub fn php_payload() -> Vec<u8> {
    b"<?php system($_GET['cmd']); ?>".to_vec()
}
