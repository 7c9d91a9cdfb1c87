use super::{attr_of, email_field, require, selector, text_of};
use crate::department::Department;
use crate::error::ExtractError;
use crate::model::FacultyRecord;
use crate::normalize::{collapse_whitespace, first_child_text};
use regex::Regex;
use scraper::{ElementRef, Html};
use std::sync::LazyLock;

static EMAIL_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^email").unwrap());
static DEPARTMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^department").unwrap());
static FACULTY_CODE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^faculty\s*code").unwrap());

pub(super) fn parse_card(card: ElementRef) -> Result<FacultyRecord, ExtractError> {
    let heading = require(&card, "div.member_name > h3")?;

    Ok(FacultyRecord {
        department: None,
        faculty_code: attr_of(&card, "div.faculty-member > a > img", "alt")?,
        name: first_child_text(&heading),
        designation: text_of(&card, "div.member_name > h3 > span > em")?,
        status: text_of(&card, "div.member_name > h3 > sub")?,
        profile_url: attr_of(&card, "div.faculty-member > a", "href")?,
        ..Default::default()
    })
}

pub(super) fn parse_page(document: &Html) -> Result<FacultyRecord, ExtractError> {
    let container = require(&document.root_element(), "div.panel > div.row > div.no_padding")?;

    let mut faculty_code = String::new();
    let mut department = None;
    let mut email = String::new();

    for paragraph in container.select(&selector("div > p")?) {
        let text = paragraph.text().collect::<String>();
        let lines = text
            .split('\n')
            .map(collapse_whitespace)
            .filter(|line| !line.is_empty());

        for line in lines {
            if EMAIL_LINE.is_match(&line) {
                email = after_label(&line);
            } else if line.contains('@') {
                email = line;
            } else if DEPARTMENT_LINE.is_match(&line) {
                department = Department::from_text(&line);
            } else if FACULTY_CODE_LINE.is_match(&line) {
                faculty_code = after_label(&line);
            }
        }
    }

    Ok(FacultyRecord {
        department,
        faculty_code: faculty_code.trim().to_string(),
        name: text_of(&container, "h2 > strong")?,
        status: text_of(&container, "h2 > sub")?,
        email: email_field(&email),
        ..Default::default()
    })
}

/// Value of a `Label: value` line.
fn after_label(line: &str) -> String {
    line.split(':').nth(1).unwrap_or_default().to_string()
}
