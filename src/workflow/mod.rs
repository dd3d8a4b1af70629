/// Upload workflow
///
/// This module holds everything with control flow:
/// - Picking the local file (selection.rs)
/// - The multipart upload and transfer state (transfer.rs)
/// - Turning the response body into a data URI (decode.rs)
/// - The state struct tying them together (state.rs)
/// - Deriving what the window shows (presentation.rs)

pub mod selection;
pub mod transfer;
pub mod decode;
pub mod state;
pub mod presentation;

pub use selection::{select_file, SelectedFile};
pub use state::{SubmitTicket, Workflow};
pub use transfer::{TransferState, TransformClient};
