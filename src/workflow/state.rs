/// The upload workflow's state: one struct, owned by the app
///
/// Holds the four slots the UI is derived from (selection, transfer state,
/// result image, error message) plus the bookkeeping that ties an
/// in-flight request back to the selection it was made for.

use crate::error::{Result, WorkflowError, UPLOAD_FAILED};

use super::decode::{self, MediaTypePolicy, ResultImage};
use super::{SelectedFile, TransferState};

/// Proof that a submission was accepted, carried through the async upload
/// and handed back to [`Workflow::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    /// The file to upload (a snapshot of the selection at submit time)
    pub file: SelectedFile,
    id: u64,
    selection: u64,
}

/// Upload workflow state
#[derive(Debug, Default)]
pub struct Workflow {
    selected: Option<SelectedFile>,
    transfer: TransferState,
    result: Option<ResultImage>,
    error: Option<&'static str>,
    policy: MediaTypePolicy,
    /// Bumped on every selection and reset
    selection: u64,
    /// Last ticket id handed out
    tickets: u64,
    /// Ticket currently in flight
    pending: Option<u64>,
}

impl Workflow {
    pub fn new(policy: MediaTypePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn transfer(&self) -> TransferState {
        self.transfer
    }

    pub fn result(&self) -> Option<&ResultImage> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Replace the selection. Any prior result or error is stale and cleared.
    ///
    /// An outstanding request keeps the state InFlight; its outcome is dropped
    /// when it settles because it belongs to the old selection.
    pub fn select(&mut self, file: SelectedFile) {
        self.selected = Some(file);
        self.selection += 1;
        self.result = None;
        self.error = None;
        if !self.transfer.is_in_flight() {
            self.transfer = TransferState::Idle;
        }
    }

    /// Start a submission.
    ///
    /// Fails with `NoFileSelected` (no state change) when nothing is selected.
    /// Returns `Ok(None)` and changes nothing when a request is already in
    /// flight.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitTicket>> {
        let file = self.selected.clone().ok_or(WorkflowError::NoFileSelected)?;

        if self.transfer.is_in_flight() {
            log::warn!("⚠️  Submit ignored, an upload is already in flight");
            return Ok(None);
        }

        self.tickets += 1;
        self.pending = Some(self.tickets);
        self.transfer = TransferState::InFlight;
        self.result = None;
        self.error = None;

        Ok(Some(SubmitTicket {
            file,
            id: self.tickets,
            selection: self.selection,
        }))
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Always leaves InFlight for the pending ticket. Success bodies are
    /// decoded here; an empty body fails the transfer like any other error.
    /// The cause is logged, the user only ever sees [`UPLOAD_FAILED`].
    pub fn settle(&mut self, ticket: SubmitTicket, outcome: Result<Vec<u8>>) {
        if self.pending != Some(ticket.id) {
            log::warn!("Dropping outcome of superseded upload #{}", ticket.id);
            return;
        }
        self.pending = None;

        if ticket.selection != self.selection {
            log::info!(
                "Upload of {} finished after the selection changed, discarding",
                ticket.file.file_name
            );
            self.transfer = TransferState::Idle;
            return;
        }

        match outcome.and_then(|bytes| decode::decode(bytes, self.policy)) {
            Ok(image) => {
                log::info!(
                    "🎨 Result ready for {} ({}, {} bytes)",
                    ticket.file.file_name,
                    image.media_type,
                    image.bytes.len()
                );
                self.transfer = TransferState::Succeeded;
                self.result = Some(image);
                self.error = None;
            }
            Err(err) => {
                log::error!("❌ Upload of {} failed: {}", ticket.file.file_name, err);
                self.transfer = TransferState::Failed;
                self.result = None;
                self.error = Some(UPLOAD_FAILED);
            }
        }
    }

    /// Back to the initial state. A request still in flight is orphaned.
    pub fn reset(&mut self) {
        self.selected = None;
        self.transfer = TransferState::Idle;
        self.result = None;
        self.error = None;
        self.selection += 1;
        self.pending = None;
    }
}
