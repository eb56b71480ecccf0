//! Canvas rendering and PNG export

use super::layout::TemplateLayout;
use super::{CompositorError, TEMPLATE_HEIGHT, TEMPLATE_MIME_TYPE, TEMPLATE_WIDTH};
use crate::core::types::data_url;
use crate::core::types::{SourceImage, Template};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::time::Duration;
use tracing::debug;

/// Decode `source` and compose its template
pub fn compose_template(source: &SourceImage) -> Result<Template, CompositorError> {
    let mut reader = ImageReader::new(Cursor::new(source.payload.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| CompositorError::decode(format!("failed to read image header: {}", e)))?;

    if reader.format().is_none() {
        let format = ImageFormat::from_mime_type(&source.payload.mime_type).ok_or_else(|| {
            CompositorError::decode(format!("unsupported format '{}'", source.payload.mime_type))
        })?;
        reader.set_format(format);
    }

    // Camera JPEGs store pixels sideways and record the display rotation in EXIF
    let mut decoder = reader.into_decoder()?;
    let orientation = decoder.orientation()?;
    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    debug!(
        name = %source.name,
        width = image.width(),
        height = image.height(),
        ?orientation,
        "Decoded source image"
    );

    compose_image(&image)
}

/// Compose the template for an already decoded image
pub fn compose_image(image: &DynamicImage) -> Result<Template, CompositorError> {
    let layout = TemplateLayout::fit(image.width(), image.height()).ok_or_else(|| {
        CompositorError::decode(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        ))
    })?;
    let rect = layout.draw_rect();

    let mut canvas = acquire_canvas(TEMPLATE_WIDTH, TEMPLATE_HEIGHT)?;

    let source = image.to_rgba8();
    let scaled = if source.dimensions() == (rect.width, rect.height) {
        source
    } else {
        imageops::resize(&source, rect.width, rect.height, FilterType::Triangle)
    };
    imageops::replace(&mut canvas, &scaled, rect.x, rect.y);

    let bytes = export_png(canvas)?;
    debug!(
        x = rect.x,
        y = rect.y,
        width = rect.width,
        height = rect.height,
        bytes = bytes.len(),
        "Composed template"
    );

    Ok(Template::new(bytes))
}

/// Compose on the blocking pool, failing with a decode error after `decode_timeout`
pub async fn compose_template_async(
    source: SourceImage,
    decode_timeout: Duration,
) -> Result<Template, CompositorError> {
    let task = tokio::task::spawn_blocking(move || compose_template(&source));

    match tokio::time::timeout(decode_timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(CompositorError::decode(format!("decode task failed: {}", e))),
        Err(_) => Err(CompositorError::decode(format!(
            "decode timed out after {}s",
            decode_timeout.as_secs_f64()
        ))),
    }
}

/// Allocate a fully transparent RGBA canvas
fn acquire_canvas(width: u32, height: u32) -> Result<RgbaImage, CompositorError> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(CompositorError::RenderContextUnavailable)?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| CompositorError::RenderContextUnavailable)?;
    buffer.resize(len, 0u8);

    RgbaImage::from_raw(width, height, buffer).ok_or(CompositorError::RenderContextUnavailable)
}

fn export_png(canvas: RgbaImage) -> Result<Vec<u8>, CompositorError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| CompositorError::encode(e.to_string()))?;

    // The exported payload must survive the data URI round trip intact
    let url = data_url::encode(TEMPLATE_MIME_TYPE, &bytes);
    let (mime_type, _) = data_url::split(&url).map_err(|e| CompositorError::encode(e.to_string()))?;
    if mime_type != TEMPLATE_MIME_TYPE {
        return Err(CompositorError::encode(format!(
            "unexpected mime type '{}'",
            mime_type
        )));
    }

    Ok(bytes)
}
