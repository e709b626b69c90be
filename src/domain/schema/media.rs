use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Binary content carried inline as base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineMedia {
    pub mime_type: String,
    /// Base64-encoded payload.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("expected a data URI of the form data:<mimetype>;base64,<data>")]
    NotDataUri,
    #[error("data URI is missing a media type")]
    MissingMimeType,
    #[error("data URI payload is not valid base64")]
    InvalidPayload,
}

impl InlineMedia {
    /// Parse `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(uri: &str) -> Result<Self, MediaError> {
        let rest = uri.strip_prefix(DATA_PREFIX).ok_or(MediaError::NotDataUri)?;
        let marker = rest.find(BASE64_MARKER).ok_or(MediaError::NotDataUri)?;
        let mime_type = rest[..marker].trim();
        if mime_type.is_empty() || !mime_type.contains('/') {
            return Err(MediaError::MissingMimeType);
        }

        let data = rest[marker + BASE64_MARKER.len()..].trim();
        if data.is_empty() || STANDARD.decode(data).is_err() {
            return Err(MediaError::InvalidPayload);
        }

        Ok(Self { mime_type: mime_type.to_string(), data: data.to_string() })
    }

    pub fn to_data_uri(&self) -> String {
        format!("{DATA_PREFIX}{}{BASE64_MARKER}{}", self.mime_type, self.data)
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    url::Url::parse(value).map(|url| matches!(url.scheme(), "http" | "https")).unwrap_or(false)
}
