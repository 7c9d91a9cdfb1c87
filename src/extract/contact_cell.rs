//! Parser for `Label: value` contact blocks found on the eee and cse
//! profile pages.

use crate::log_debug;
use crate::model::{ContactBundle, ContactValue};
use crate::normalize::{
    clean_contact_info_empty_fields, parse_room_and_building, simplify_contact_info,
    validate_and_split_phone_numbers,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Personal,
    Office,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContactLabel {
    Location,
    Phone(Category),
    Email(Category),
}

/// Labels are matched lower-cased with all spaces removed.
fn contact_label(label: &str) -> Option<ContactLabel> {
    let label = match label {
        "office" => ContactLabel::Location,
        "phone" | "mobile" => ContactLabel::Phone(Category::Other),
        "cellphone" => ContactLabel::Phone(Category::Personal),
        "officephone" => ContactLabel::Phone(Category::Office),
        "email" | "e-mail" => ContactLabel::Email(Category::Other),
        "officiale-mail" => ContactLabel::Email(Category::Office),
        "personale-mail" => ContactLabel::Email(Category::Personal),
        _ => return None,
    };
    Some(label)
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(super) struct ContactCell {
    pub room: String,
    pub building: String,
    pub phone: Option<ContactBundle>,
    pub email: Option<ContactBundle>,
}

#[derive(Debug, Default)]
struct Collected {
    personal: Vec<String>,
    office: Vec<String>,
    other: Vec<String>,
}

impl Collected {
    fn extend(&mut self, category: Category, values: Vec<String>) {
        let target = match category {
            Category::Personal => &mut self.personal,
            Category::Office => &mut self.office,
            Category::Other => &mut self.other,
        };
        for value in values {
            if !target.contains(&value) {
                target.push(value);
            }
        }
    }

    /// Cleaned, then simplified.
    fn into_bundle(self) -> Option<ContactBundle> {
        let bundle = ContactBundle {
            personal: Some(ContactValue::Multiple(self.personal)),
            office: Some(ContactValue::Multiple(self.office)),
            other: Some(ContactValue::Multiple(self.other)),
        };
        clean_contact_info_empty_fields(&bundle).map(|cleaned| simplify_contact_info(&cleaned))
    }
}

pub(super) fn parse_contact_lines<'a, I>(lines: I) -> ContactCell
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cell = ContactCell::default();
    let mut phones = Collected::default();
    let mut emails = Collected::default();

    for line in lines.into_iter().map(str::trim).filter(|line| !line.is_empty()) {
        if !line.contains(':') {
            log_debug!("[extract] Invalid line format, missing colon: {}", line);
            continue;
        }

        let mut parts = line.split(':').map(|part| part.trim().replace(' ', ""));
        let key = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        if value.is_empty() {
            continue;
        }

        let key = key.to_lowercase();
        let Some(label) = contact_label(&key) else {
            log_debug!("[extract] Unrecognized field: <{}>", key);
            continue;
        };

        match label {
            ContactLabel::Location => {
                let parsed = parse_room_and_building(&value);
                if !parsed.room.is_empty() {
                    cell.room = parsed.room;
                }
                if !parsed.building.is_empty() {
                    cell.building = parsed.building;
                }
            }
            ContactLabel::Email(category) => emails.extend(category, vec![value]),
            ContactLabel::Phone(category) => match validate_and_split_phone_numbers(&value) {
                Some(numbers) if !numbers.is_empty() => phones.extend(category, numbers.into_vec()),
                _ => log_debug!("[extract] Skipping invalid phone number: {}", value),
            },
        }
    }

    cell.phone = phones.into_bundle();
    cell.email = emails.into_bundle();
    cell
}
