//! Gallery cards
use iced::widget::{button, column, container, image, text};
use iced::{Element, Length};
use iced_aw::Wrap;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::app::Message;
use crate::state::data::GalleryEntry;

/// Card edge length in logical pixels
const CARD_WIDTH: f32 = 160.0;

/// One card per entry, in list order (newest first)
pub fn gallery_view<'a>(
    entries: &'a [GalleryEntry],
    thumbnails: &'a HashMap<String, PathBuf>,
) -> Element<'a, Message> {
    if entries.is_empty() {
        return text("No saved art yet.").size(14).into();
    }

    let cards: Vec<Element<'a, Message>> = entries
        .iter()
        .map(|entry| card(entry, thumbnails.get(&entry.url)))
        .collect();

    Wrap::with_elements(cards).into()
}

fn card<'a>(entry: &'a GalleryEntry, thumbnail: Option<&PathBuf>) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(path) => image(image::Handle::from_path(path))
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_WIDTH))
            .into(),
        // Not cached yet: show where it lives
        None => container(text(entry.url.as_str()).size(11))
            .width(Length::Fixed(CARD_WIDTH))
            .height(Length::Fixed(CARD_WIDTH))
            .center_y(Length::Fixed(CARD_WIDTH))
            .into(),
    };

    let content = column![
        preview,
        text(entry.created_label()).size(12),
        button(text("Delete").size(12))
            .style(button::secondary)
            .on_press(Message::DeleteRequested(entry.url.clone())),
    ]
    .spacing(6)
    .width(Length::Fixed(CARD_WIDTH));

    container(container(content).padding(8).style(container::rounded_box))
        .padding(6)
        .into()
}
