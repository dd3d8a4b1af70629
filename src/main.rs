use iced::widget::{column, container, text, Column};
use iced::{Element, Length, Task, Theme};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{WorkflowError, SELECT_AN_IMAGE};
use crate::ui::ImageHandles;
use crate::workflow::{presentation, select_file, SubmitTicket, TransformClient, Workflow};

mod config;
mod error;
mod ui;
mod workflow;

/// Main application state
struct Photo2Vangogh {
    /// The upload workflow (selection, transfer, result, error)
    workflow: Workflow,
    /// HTTP client, or the reason it could not be built
    client: Result<TransformClient, WorkflowError>,
    /// Image handles backing the two panes
    handles: ImageHandles,
    /// One-shot notice ("alert") waiting to be dismissed
    notice: Option<&'static str>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Choose Image"
    PickFile,
    /// The native picker closed, with or without a file
    FilePicked(Option<PathBuf>),
    /// Preview bytes for a selected path were read (or not)
    PreviewLoaded(PathBuf, Option<Vec<u8>>),
    /// User clicked the submit button
    Submit,
    /// The upload for a ticket finished
    TransferSettled(SubmitTicket, Result<Vec<u8>, WorkflowError>),
    /// Copy the result's data URI to the clipboard
    CopyResult,
    /// User acknowledged the notice
    DismissNotice,
    /// Start over
    Reset,
}

impl Photo2Vangogh {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = Config::default();

        let client = TransformClient::new(&config);
        match &client {
            Ok(client) => log::info!("✅ Upload client ready for {}", client.endpoint()),
            Err(err) => log::error!("HTTP client unavailable, uploads will fail: {}", err),
        }

        (
            Photo2Vangogh {
                workflow: Workflow::new(config.media_type_policy),
                client,
                handles: ImageHandles::default(),
                notice: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => Task::perform(pick_image(), Message::FilePicked),
            Message::FilePicked(picked) => match select_file(picked) {
                Ok(file) => {
                    let path = file.path.clone();
                    self.handles.begin_selection();
                    self.workflow.select(file);
                    self.notice = None;
                    Task::perform(load_preview(path), |(path, bytes)| {
                        Message::PreviewLoaded(path, bytes)
                    })
                }
                Err(_) => {
                    // Prior selection stays as it was
                    self.notice = Some(SELECT_AN_IMAGE);
                    Task::none()
                }
            },
            Message::PreviewLoaded(path, bytes) => {
                let current = self.workflow.selected().map(|file| file.path.as_path());
                match bytes {
                    Some(bytes) if current == Some(path.as_path()) => {
                        self.handles.set_preview(path, bytes);
                    }
                    Some(_) => log::info!("Ignoring preview for superseded {}", path.display()),
                    None => {}
                }
                Task::none()
            }
            Message::Submit => match self.workflow.begin_submit() {
                Ok(Some(ticket)) => {
                    self.handles.set_result(None);
                    match &self.client {
                        Ok(client) => {
                            let client = client.clone();
                            Task::perform(
                                async move {
                                    let outcome = client.upload(ticket.file.clone()).await;
                                    (ticket, outcome)
                                },
                                |(ticket, outcome)| Message::TransferSettled(ticket, outcome),
                            )
                        }
                        Err(err) => {
                            let err = err.clone();
                            self.settle(ticket, Err(err));
                            Task::none()
                        }
                    }
                }
                Ok(None) => Task::none(),
                Err(err) => {
                    log::warn!("⚠️  Submit rejected: {}", err);
                    self.notice = Some(err.user_message());
                    Task::none()
                }
            },
            Message::TransferSettled(ticket, outcome) => {
                self.settle(ticket, outcome);
                Task::none()
            }
            Message::CopyResult => match self.workflow.result() {
                Some(image) => iced::clipboard::write(image.data_uri.clone()),
                None => Task::none(),
            },
            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
            Message::Reset => {
                self.workflow.reset();
                self.handles.clear();
                self.notice = None;
                log::info!("🔄 Workflow reset");
                Task::none()
            }
        }
    }

    /// Settle the workflow and refresh the result pane's handle
    fn settle(&mut self, ticket: SubmitTicket, outcome: Result<Vec<u8>, WorkflowError>) {
        self.workflow.settle(ticket, outcome);
        self.handles.set_result(self.workflow.result());
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let presentation = presentation::derive(&self.workflow);
        let file_label = self.workflow.selected().map(|file| file.file_name.as_str());

        let content: Column<Message> = column![
            text("Image Uploader").size(40),
            text("Transform your photo to vangogh like style painting").size(16),
            ui::view::workflow(presentation, &self.handles, file_label, self.notice),
        ]
        .spacing(20)
        .padding(40);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("Photo2Vangogh", Photo2Vangogh::update, Photo2Vangogh::view)
        .theme(Photo2Vangogh::theme)
        .centered()
        .run_with(Photo2Vangogh::new)
}

/// Show the native file picker.
///
/// No extension filter: JPEG is suggested in the title only, and any file
/// can be picked.
async fn pick_image() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title(PICKER_TITLE)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

const PICKER_TITLE: &str = "Select a photo (JPEG)";

/// Read the selected file for its preview pane
async fn load_preview(path: PathBuf) -> (PathBuf, Option<Vec<u8>>) {
    match tokio::fs::read(&path).await {
        Ok(bytes) => (path, Some(bytes)),
        Err(err) => {
            log::warn!("⚠️  Could not read preview for {}: {}", path.display(), err);
            (path, None)
        }
    }
}
