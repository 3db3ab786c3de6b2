//! Photo payloads arrive as data URIs (`data:<mimetype>;base64,<data>`).
//! They are checked here once and then forwarded to the model as image blocks.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// Image formats the model accepts as inline image blocks.
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("must be a data URI of the form 'data:<mimetype>;base64,<data>'")]
    Malformed,

    #[error("must be base64 encoded")]
    NotBase64,

    #[error("has unsupported image type '{0}'")]
    UnsupportedType(String),

    #[error("must not have an empty payload")]
    EmptyPayload,

    #[error("contains invalid base64 data")]
    InvalidPayload,
}

/// An image forwarded to the model alongside the prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub media_type: String,
    /// Base64 payload, exactly as received.
    pub data: String,
}

/// Splits and checks a data URI. The payload is decoded once to make sure the
/// model is never sent garbage.
pub fn parse_data_uri(uri: &str) -> Result<ImageAttachment, DataUriError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(DataUriError::Malformed)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUriError::Malformed)?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or(DataUriError::NotBase64)?
        .to_ascii_lowercase();

    if !SUPPORTED_IMAGE_TYPES.contains(&media_type.as_str()) {
        return Err(DataUriError::UnsupportedType(media_type));
    }
    if payload.is_empty() {
        return Err(DataUriError::EmptyPayload);
    }
    STANDARD
        .decode(payload)
        .map_err(|_| DataUriError::InvalidPayload)?;

    Ok(ImageAttachment {
        media_type,
        data: payload.to_string(),
    })
}
