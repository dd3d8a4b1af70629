/// Response decoding: raw bytes to a displayable data URI
///
/// The service always answers with PNG today, and the result is labelled
/// `image/png` unconditionally by default. `MediaTypePolicy::Sniff` labels it
/// from the magic bytes instead.

use base64::{engine::general_purpose, Engine as _};

use crate::error::{Result, WorkflowError};

/// Media type used when nothing better is known
pub const DEFAULT_MEDIA_TYPE: &str = "image/png";

/// How the result's media type is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaTypePolicy {
    /// Always `image/png`, whatever the bytes are
    #[default]
    FixedPng,
    /// Detect an image type from magic bytes, falling back to `image/png`
    Sniff,
}

impl MediaTypePolicy {
    /// Parse the build-time `PHOTO2VANGOGH_MEDIA_TYPE` setting.
    ///
    /// `sniff` (any case) selects sniffing; anything else keeps the fixed label.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("sniff") => MediaTypePolicy::Sniff,
            _ => MediaTypePolicy::FixedPng,
        }
    }
}

/// The decoded image returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultImage {
    /// Media type written into the data URI
    pub media_type: &'static str,
    /// `data:<media_type>;base64,<payload>`
    pub data_uri: String,
    /// The response body, kept for rendering via an image handle
    pub bytes: Vec<u8>,
}

impl ResultImage {
    /// Decode the base64 payload back out of the data URI
    #[cfg(test)]
    pub fn payload(&self) -> Result<Vec<u8>> {
        let (_, encoded) = self
            .data_uri
            .split_once(";base64,")
            .ok_or(WorkflowError::EmptyBody)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| WorkflowError::EmptyBody)
    }
}

/// Convert a success body into a `ResultImage`.
///
/// An empty body is an error and folds into the transfer's failed outcome.
pub fn decode(bytes: Vec<u8>, policy: MediaTypePolicy) -> Result<ResultImage> {
    if bytes.is_empty() {
        return Err(WorkflowError::EmptyBody);
    }

    let media_type = match policy {
        MediaTypePolicy::FixedPng => DEFAULT_MEDIA_TYPE,
        MediaTypePolicy::Sniff => infer::get(&bytes)
            .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
            .map(|kind| kind.mime_type())
            .unwrap_or(DEFAULT_MEDIA_TYPE),
    };

    let data_uri = format!(
        "data:{};base64,{}",
        media_type,
        general_purpose::STANDARD.encode(&bytes)
    );

    Ok(ResultImage {
        media_type,
        data_uri,
        bytes,
    })
}
