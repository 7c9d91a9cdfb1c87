//! Text normalization shared by the extractors.

mod contact;
mod location;
mod phone;

pub use contact::{categorize_email_by_domain, clean_contact_info_empty_fields, simplify_contact_info};
pub use location::{parse_room_and_building, RoomBuilding};
pub use phone::validate_and_split_phone_numbers;

use scraper::{ElementRef, Node};

/// Trimmed text of all descendants.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first child node only, so `<h3>Name <span>..</span></h3>`
/// yields `Name`.
pub fn first_child_text(element: &ElementRef) -> String {
    let Some(node) = element.children().next() else {
        return String::new();
    };

    match node.value() {
        Node::Text(text) => text.trim().to_string(),
        _ => ElementRef::wrap(node)
            .map(|child| element_text(&child))
            .unwrap_or_default(),
    }
}

/// Collapses every whitespace run into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
