use super::contact_cell::parse_contact_lines;
use super::{attr_of, require, select_first, text_of};
use crate::department::Department;
use crate::error::ExtractError;
use crate::model::FacultyRecord;
use crate::normalize::{element_text, first_child_text};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").unwrap());
static PARENTHESIZED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static PARENTHESES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()]").unwrap());

// The eee site only lists its own faculty.
const DEPARTMENT: Department = Department::ElectricalElectronicEngineering;

pub(super) fn parse_card(card: ElementRef) -> Result<FacultyRecord, ExtractError> {
    let heading = require(&card, "div.person_text > h4")?;

    let faculty_code = text_of(&card, "div.person_text > h4 > small")?;
    let title = text_of(&card, "div.person_text > h4 > span")?;

    Ok(FacultyRecord {
        department: Some(DEPARTMENT),
        faculty_code: PARENTHESES.replace_all(&faculty_code, "").trim().to_string(),
        name: first_child_text(&heading),
        designation: strip_parentheticals(&title),
        status: first_parenthesized(&title),
        profile_url: attr_of(&card, "div.person_specialization > p > a", "href")?,
        ..Default::default()
    })
}

/// Profile pages are a two-column table. The second row holds
/// `Name (CODE), Designation (Status)`, the last row the contact block.
pub(super) fn parse_page(document: &Html) -> Result<FacultyRecord, ExtractError> {
    let table = require(&document.root_element(), "tbody#members_list")?;
    let name_cell = require(&table, "tr:nth-child(2) > td:nth-child(2) > strong")?;

    let name_text = element_text(&name_cell);
    let mut parts = name_text.split(',');
    let name_and_code = parts.next().unwrap_or_default();
    let designation_and_status = parts.next().unwrap_or_default();

    let contact_text = select_first(&table, "tr:last-child > td:nth-child(2)")?
        .map(|cell| cell.text().collect::<String>())
        .unwrap_or_default();
    let contact = parse_contact_lines(contact_text.split('\n'));

    Ok(FacultyRecord {
        department: Some(DEPARTMENT),
        faculty_code: first_parenthesized(name_and_code),
        name: strip_parentheticals(name_and_code),
        designation: strip_parentheticals(designation_and_status),
        status: first_parenthesized(designation_and_status),
        room: contact.room,
        building: contact.building,
        telephone: contact.phone.into(),
        email: contact.email.into(),
        ..Default::default()
    })
}

fn strip_parentheticals(text: &str) -> String {
    PARENTHETICAL.replace_all(text, "").trim().to_string()
}

fn first_parenthesized(text: &str) -> String {
    PARENTHESIZED
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().trim().to_string())
        .unwrap_or_default()
}
