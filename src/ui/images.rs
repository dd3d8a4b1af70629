use iced::widget::image::Handle;
use std::path::{Path, PathBuf};

use crate::workflow::decode::ResultImage;

/// GPU image handles for the two panes.
///
/// Handles are built once per selection/result instead of on every render;
/// replacing one drops the old handle so iced can evict its texture.
/// Previews are built from the file's bytes, so re-picking a file that
/// changed on disk never reuses a cached texture.
#[derive(Debug, Default)]
pub struct ImageHandles {
    preview: Option<(PathBuf, Handle)>,
    result: Option<Handle>,
}

impl ImageHandles {
    /// Drop both handles ahead of a new selection's preview load
    pub fn begin_selection(&mut self) {
        self.preview = None;
        self.result = None;
    }

    /// Install the preview for `path`, always with a fresh handle
    pub fn set_preview(&mut self, path: PathBuf, bytes: Vec<u8>) {
        self.preview = Some((path, Handle::from_bytes(bytes)));
    }

    /// Mirror the workflow's result slot
    pub fn set_result(&mut self, image: Option<&ResultImage>) {
        self.result = image.map(|image| Handle::from_bytes(image.bytes.clone()));
    }

    pub fn clear(&mut self) {
        self.preview = None;
        self.result = None;
    }

    /// Preview handle, only if it was loaded for `path`
    pub fn preview_for(&self, path: &Path) -> Option<&Handle> {
        match &self.preview {
            Some((loaded, handle)) if loaded == path => Some(handle),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&Handle> {
        self.result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::decode::{decode, MediaTypePolicy};

    #[test]
    fn test_new_selection_drops_preview_and_result() {
        let mut handles = ImageHandles::default();
        handles.set_preview(PathBuf::from("/photos/a.jpg"), vec![0xFF, 0xD8]);
        let image = decode(vec![1, 2, 3], MediaTypePolicy::FixedPng).unwrap();
        handles.set_result(Some(&image));
        assert!(handles.result().is_some());

        handles.begin_selection();
        assert!(handles.preview_for(Path::new("/photos/a.jpg")).is_none());
        assert!(handles.result().is_none());
    }

    #[test]
    fn test_preview_is_keyed_on_path() {
        let mut handles = ImageHandles::default();
        handles.set_preview(PathBuf::from("/photos/a.jpg"), vec![0xFF, 0xD8]);
        assert!(handles.preview_for(Path::new("/photos/a.jpg")).is_some());
        assert!(handles.preview_for(Path::new("/photos/b.jpg")).is_none());

        handles.clear();
        assert!(handles.preview_for(Path::new("/photos/a.jpg")).is_none());
    }

    #[test]
    fn test_reselecting_same_path_rebuilds_handle() {
        let mut handles = ImageHandles::default();
        let path = PathBuf::from("/photos/a.jpg");

        handles.set_preview(path.clone(), vec![0xFF, 0xD8, 0x01]);
        let first = handles.preview_for(&path).map(Handle::id);

        // Same file picked again after being edited on disk
        handles.begin_selection();
        handles.set_preview(path.clone(), vec![0xFF, 0xD8, 0x02]);
        let second = handles.preview_for(&path).map(Handle::id);

        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
    }
}
