/// Build-time configuration for the transformation client
///
/// Both knobs are baked in at compile time: the endpoint from
/// `PHOTO2VANGOGH_ENDPOINT` and the result labelling from
/// `PHOTO2VANGOGH_MEDIA_TYPE` (`sniff` to detect the type from the bytes).
/// Nothing is read from the environment at runtime.

use std::time::Duration;

use crate::workflow::decode::MediaTypePolicy;

/// Endpoint used when `PHOTO2VANGOGH_ENDPOINT` is unset at build time
pub const DEFAULT_ENDPOINT: &str = "http://karamkaku.pythonanywhere.com/process-image";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Full URL of `POST /process-image`
    pub endpoint: String,
    /// Whole-request timeout. `None` waits forever, like a browser fetch
    /// without an abort signal.
    pub request_timeout: Option<Duration>,
    /// How the result data URI gets its media type
    pub media_type_policy: MediaTypePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: option_env!("PHOTO2VANGOGH_ENDPOINT")
                .unwrap_or(DEFAULT_ENDPOINT)
                .to_string(),
            request_timeout: None,
            media_type_policy: MediaTypePolicy::from_setting(option_env!(
                "PHOTO2VANGOGH_MEDIA_TYPE"
            )),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Configuration pointing at a specific endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}
