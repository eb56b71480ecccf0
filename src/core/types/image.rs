//! Image payload types

use super::data_url::{self, DataUrlError};
use crate::core::compositor::{CompositorError, TEMPLATE_HEIGHT, TEMPLATE_MIME_TYPE, TEMPLATE_WIDTH};
use image::metadata::Orientation;
use image::{ImageDecoder, ImageFormat, ImageReader};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Encoded image bytes plus their mime type
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    /// Encoded bytes, base64 text when serialized
    #[serde(rename = "data", with = "base64_bytes")]
    pub bytes: Vec<u8>,
    /// Format tag, e.g. `image/png`
    pub mime_type: String,
}

impl ImagePayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Parse a `data:` URI
    pub fn from_data_url(data_url: &str) -> Result<Self, DataUrlError> {
        let (mime_type, bytes) = data_url::decode(data_url)?;
        Ok(Self { bytes, mime_type })
    }

    /// Encode as a `data:` URI
    pub fn to_data_url(&self) -> String {
        data_url::encode(&self.mime_type, &self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the mime type
    pub fn extension(&self) -> &'static str {
        ImageFormat::from_mime_type(&self.mime_type)
            .and_then(|format| format.extensions_str().first().copied())
            .unwrap_or("bin")
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A user-supplied or generated source picture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Display name (file name for uploads)
    pub name: String,
    pub payload: ImagePayload,
    pub width: u32,
    pub height: u32,
}

impl SourceImage {
    /// Wrap raw file bytes, sniffing the format and reading the dimensions.
    ///
    /// Dimensions are as displayed, after the EXIF orientation is applied.
    /// `mime_hint` is only used when the content itself cannot be recognized.
    pub fn from_bytes(
        name: impl Into<String>,
        bytes: Vec<u8>,
        mime_hint: Option<&str>,
    ) -> Result<Self, CompositorError> {
        let mut reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| CompositorError::decode(format!("failed to read image header: {}", e)))?;

        let format = reader
            .format()
            .or_else(|| mime_hint.and_then(ImageFormat::from_mime_type))
            .ok_or_else(|| CompositorError::decode("unrecognized image format"))?;

        reader.set_format(format);
        let mut decoder = reader.into_decoder()?;
        let (stored_width, stored_height) = decoder.dimensions();
        let (width, height) = match decoder.orientation()? {
            Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH => (stored_height, stored_width),
            _ => (stored_width, stored_height),
        };
        drop(decoder);

        if width == 0 || height == 0 {
            return Err(CompositorError::decode(format!(
                "image has no pixels ({}x{})",
                width, height
            )));
        }

        Ok(Self {
            name: name.into(),
            payload: ImagePayload::new(bytes, format.to_mime_type()),
            width,
            height,
        })
    }

    /// Read an image file from disk
    pub async fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        let hint = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .map(|format| format.to_mime_type());

        Ok(Self::from_bytes(name, bytes, hint)?)
    }

    /// Aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Preview reference for display
    pub fn preview_url(&self) -> String {
        self.payload.to_data_url()
    }
}

/// The 1280×720 centered canvas sent to the outpaint operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    payload: ImagePayload,
}

impl Template {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            payload: ImagePayload::new(bytes, TEMPLATE_MIME_TYPE),
        }
    }

    /// Restore a template stored in history
    pub fn from_payload(payload: ImagePayload) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &ImagePayload {
        &self.payload
    }

    pub fn bytes(&self) -> &[u8] {
        &self.payload.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.payload.mime_type
    }

    pub fn data_url(&self) -> String {
        self.payload.to_data_url()
    }

    pub const fn width() -> u32 {
        TEMPLATE_WIDTH
    }

    pub const fn height() -> u32 {
        TEMPLATE_HEIGHT
    }
}

/// Image returned by an outpaint or enhance call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// `data:` URI of the result image
    pub reference: String,
    /// Optional commentary returned alongside the image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GenerationResult {
    pub fn from_image(image: &ImagePayload, text: Option<String>) -> Self {
        Self {
            reference: image.to_data_url(),
            text,
        }
    }

    /// Restore a result from a stored reference
    pub fn from_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: None,
        }
    }

    /// Decode the embedded format tag and bytes
    pub fn image(&self) -> Result<ImagePayload, DataUrlError> {
        ImagePayload::from_data_url(&self.reference)
    }
}

mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
