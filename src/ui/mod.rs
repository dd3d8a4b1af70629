/// Rendering glue between the workflow and iced widgets
///
/// - Image handles for the two panes (images.rs)
/// - Widget tree for a derived presentation (view.rs)

pub mod images;
pub mod view;

pub use images::ImageHandles;
