/// Selection of the local image to upload
///
/// The picker only suggests JPEG. Whatever single file comes back
/// becomes the selection; rejecting unsupported types is the service's job.

use std::path::{Path, PathBuf};

use crate::error::{Result, WorkflowError};

/// Extensions the service is known to accept
pub const JPEG_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "jfif"];

/// A user-chosen local file plus its declared media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Full path to the blob on disk
    pub path: PathBuf,
    /// File name only (e.g., "photo.jpg"), sent as the multipart filename
    pub file_name: String,
    /// Media type declared from the extension, not from the contents
    pub media_type: &'static str,
}

impl SelectedFile {
    /// Build a selection from a picked path
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let media_type = declared_media_type(&path);

        Self {
            path,
            file_name,
            media_type,
        }
    }
}

/// Turn the picker's answer into a selection.
///
/// `None` (cancelled picker, empty file list) is rejected with
/// `NoFileSelected`; the caller keeps its prior selection and notifies the user.
pub fn select_file(picked: Option<PathBuf>) -> Result<SelectedFile> {
    let path = picked.ok_or(WorkflowError::NoFileSelected)?;
    let file = SelectedFile::from_path(path);
    log::info!("📁 Selected {} ({})", file.file_name, file.media_type);
    if !is_suggested_type(&file.path) {
        log::warn!(
            "⚠️  {} is not a JPEG, the service may reject it",
            file.file_name
        );
    }
    Ok(file)
}

/// Whether the file has one of the suggested JPEG extensions
pub fn is_suggested_type(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| JPEG_EXTENSIONS.contains(&ext.as_str()))
}

/// Media type a browser would put in `File.type` for this extension
fn declared_media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" | "pjpeg" | "pjp" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}
