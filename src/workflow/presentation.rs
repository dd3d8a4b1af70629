/// What the window shows, derived purely from the workflow state
///
/// No widget is ever mutated directly: the view calls [`derive`] on every
/// render and draws whatever comes back.

use std::path::Path;

use super::decode::ResultImage;
use super::{TransferState, Workflow};

pub const SUBMIT_LABEL: &str = "Upload Image";
pub const SUBMIT_LABEL_IN_FLIGHT: &str = "Uploading...";

/// Content of one of the two image panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane<'a> {
    Placeholder,
    /// Local preview of the selected file
    Preview(&'a Path),
    /// Image returned by the service
    Result(&'a ResultImage),
}

/// Label and enabled state of the submit trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub enabled: bool,
}

/// Everything the view needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation<'a> {
    /// Left pane: the original
    pub source: Pane<'a>,
    /// Right pane: the transformed image
    pub result: Pane<'a>,
    /// Error banner, shown only after a failed transfer
    pub banner: Option<&'static str>,
    pub submit: SubmitButton,
    /// Reset is unavailable while a request is outstanding
    pub reset_enabled: bool,
}

/// Map the four state slots to what is on screen
pub fn derive(workflow: &Workflow) -> Presentation<'_> {
    let in_flight = workflow.transfer().is_in_flight();

    let source = match workflow.selected() {
        Some(file) => Pane::Preview(&file.path),
        None => Pane::Placeholder,
    };

    let result = match (workflow.transfer(), workflow.result()) {
        (TransferState::Succeeded, Some(image)) => Pane::Result(image),
        _ => Pane::Placeholder,
    };

    let banner = match workflow.transfer() {
        TransferState::Failed => workflow.error(),
        _ => None,
    };

    let submit = SubmitButton {
        label: if in_flight {
            SUBMIT_LABEL_IN_FLIGHT
        } else {
            SUBMIT_LABEL
        },
        enabled: !in_flight,
    };

    Presentation {
        source,
        result,
        banner,
        submit,
        reset_enabled: !in_flight,
    }
}
