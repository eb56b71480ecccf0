//! Custom test assertions
//!
//! Pixel checks on composited templates.

use image::RgbaImage;
use outpaint_rs::Template;
use outpaint_rs::core::compositor::{TEMPLATE_HEIGHT, TEMPLATE_WIDTH};

/// Assertions for composited templates
pub trait TemplateAssertions {
    /// Decode the template, checking it is a 1280x720 PNG
    fn assert_canvas(&self) -> RgbaImage;
}

impl TemplateAssertions for Template {
    fn assert_canvas(&self) -> RgbaImage {
        assert_eq!(self.mime_type(), "image/png", "template must be PNG");
        assert!(
            self.data_url().starts_with("data:image/png;base64,"),
            "template data URL must carry the PNG mime type"
        );

        let decoded = image::load_from_memory_with_format(self.bytes(), image::ImageFormat::Png)
            .expect("template decodes as PNG")
            .to_rgba8();
        assert_eq!(
            decoded.dimensions(),
            (TEMPLATE_WIDTH, TEMPLATE_HEIGHT),
            "template must be 1280x720"
        );
        decoded
    }
}

/// Assert a pixel is fully transparent
pub fn assert_transparent(canvas: &RgbaImage, x: u32, y: u32) {
    let alpha = canvas.get_pixel(x, y).0[3];
    assert_eq!(alpha, 0, "expected transparent pixel at ({}, {})", x, y);
}

/// Assert a pixel is covered by the source
pub fn assert_covered(canvas: &RgbaImage, x: u32, y: u32) {
    let pixel = canvas.get_pixel(x, y).0;
    assert!(pixel[3] > 0, "expected covered pixel at ({}, {}), got {:?}", x, y, pixel);
}
