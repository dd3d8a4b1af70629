use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Color, ContentFit, Element, Length};

use crate::workflow::presentation::{Pane, Presentation};
use crate::Message;

use super::images::ImageHandles;

const ERROR_RED: Color = Color {
    r: 0.9,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};
const PANE_HEIGHT: f32 = 420.0;

/// Render a derived `Presentation`
pub fn workflow<'a>(
    presentation: Presentation<'a>,
    handles: &'a ImageHandles,
    file_label: Option<&'a str>,
    notice: Option<&'static str>,
) -> Element<'a, Message> {
    let controls = row![
        button("Choose Image").on_press(Message::PickFile).padding(10),
        text(file_label.unwrap_or("No file chosen")).size(16),
        button(presentation.submit.label)
            .on_press_maybe(presentation.submit.enabled.then_some(Message::Submit))
            .padding(10),
        button("Copy Result")
            .on_press_maybe(
                matches!(presentation.result, Pane::Result(_)).then_some(Message::CopyResult)
            )
            .padding(10),
        button("Reset")
            .on_press_maybe(presentation.reset_enabled.then_some(Message::Reset))
            .padding(10),
    ]
    .spacing(16)
    .align_y(Alignment::Center);

    let mut content: Column<Message> = column![controls].spacing(20);

    if let Some(notice) = notice {
        content = content.push(
            row![
                text(notice).size(16),
                button("OK").on_press(Message::DismissNotice).padding(6),
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        );
    }

    if let Some(banner) = presentation.banner {
        content = content.push(text(banner).size(16).color(ERROR_RED));
    }

    content
        .push(
            row![
                pane("Selected Image:", presentation.source, handles),
                pane("Received Image from Server:", presentation.result, handles),
            ]
            .spacing(24),
        )
        .into()
}

/// One captioned image pane
fn pane<'a>(caption: &'a str, pane: Pane<'a>, handles: &'a ImageHandles) -> Element<'a, Message> {
    let handle = match pane {
        Pane::Placeholder => None,
        Pane::Preview(path) => handles.preview_for(path),
        Pane::Result(_) => handles.result(),
    };

    let body: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("No image").size(16))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    column![
        text(caption).size(20),
        container(body).width(Length::Fill).height(PANE_HEIGHT),
    ]
    .spacing(10)
    .width(Length::FillPortion(1))
    .into()
}
