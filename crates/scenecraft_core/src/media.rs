//! Generated image payloads.

use serde::{Deserialize, Serialize};

/// An image produced by the image engine.
///
/// Bytes are stored raw in memory and as base64 when serialized.
///
/// # Examples
///
/// ```
/// use scenecraft_core::GeneratedImage;
///
/// let image = GeneratedImage::new("image/png", vec![0x89, 0x50, 0x4e, 0x47]);
/// let json = serde_json::to_value(&image).unwrap();
/// assert_eq!(json["data"], "iVBORw==");
/// assert_eq!(image.extension(), "png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    /// MIME type reported by the engine
    mime_type: String,
    /// Raw image bytes
    #[serde(with = "base64_bytes")]
    data: Vec<u8>,
}

impl GeneratedImage {
    /// Create an image from its MIME type and bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// File extension matching the MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
