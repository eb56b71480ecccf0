//! Test fixtures
//!
//! Small encoded images built in memory so tests need no files on disk.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use outpaint_rs::{GenerationResult, ImagePayload, SourceImage};
use std::io::Cursor;

/// Opaque red, the color every fixture source is filled with
pub const SOURCE_COLOR: Rgba<u8> = Rgba([220, 30, 30, 255]);

pub const TEST_API_KEY: &str = "AIzaSyINTEGRATIONTEST0001";

/// Solid opaque PNG
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, SOURCE_COLOR)),
        ImageFormat::Png,
    )
}

/// Solid JPEG (no alpha channel)
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let [r, g, b, _] = SOURCE_COLOR.0;
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([r, g, b]))),
        ImageFormat::Jpeg,
    )
}

fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode fixture image");
    bytes
}

/// PNG source of the given size
pub fn png_source(width: u32, height: u32) -> SourceImage {
    SourceImage::from_bytes(
        format!("source-{}x{}.png", width, height),
        png_bytes(width, height),
        None,
    )
    .expect("fixture source")
}

/// A model result whose image bytes are tagged for later identification
pub fn tagged_result(tag: &str) -> GenerationResult {
    let payload = ImagePayload::new(format!("result:{}", tag).into_bytes(), "image/png");
    GenerationResult::from_image(&payload, Some(format!("note {}", tag)))
}
