/// Error types for the upload workflow
///
/// Every failure the workflow can hit is a `WorkflowError`. The variants keep
/// their cause for logging, but the text shown to the user always comes from
/// `WorkflowError::user_message`, which never leaks server or network
/// details.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Generic banner text for any failed upload.
pub const UPLOAD_FAILED: &str = "Failed to upload image";

/// Notice shown when the user submits before choosing a file.
pub const SELECT_FILE_FIRST: &str = "Please select a file first!";

/// Notice shown when the picker closes without a file.
pub const SELECT_AN_IMAGE: &str = "Please select an image!";

/// Main error type for the upload workflow.
///
/// `Clone` so it can ride inside iced messages; non-clone sources are
/// wrapped in `Arc`.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    /// Submit or selection completed without a file.
    #[error("no file selected")]
    NoFileSelected,

    /// The selected blob could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] Arc<reqwest::Error>),

    /// Connection, timeout or body transfer failure.
    #[error("network error: {0}")]
    Network(#[source] Arc<reqwest::Error>),

    /// The endpoint answered with a status outside 200..=299.
    #[error("transformation service returned {0}")]
    Status(reqwest::StatusCode),

    /// A success response carried no bytes.
    #[error("transformation service returned an empty body")]
    EmptyBody,
}

impl WorkflowError {
    /// Text safe to put in front of the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            WorkflowError::NoFileSelected => SELECT_FILE_FIRST,
            _ => UPLOAD_FAILED,
        }
    }
}

impl From<reqwest::Error> for WorkflowError {
    fn from(err: reqwest::Error) -> Self {
        WorkflowError::Network(Arc::new(err))
    }
}

/// Result type alias for workflow operations.
pub type Result<T> = std::result::Result<T, WorkflowError>;
