use super::contact_cell::parse_contact_lines;
use super::{attr_of, email_field, require, select_first, text_of};
use crate::department::Department;
use crate::error::ExtractError;
use crate::model::FacultyRecord;
use crate::normalize::parse_room_and_building;
use scraper::{ElementRef, Html};

const DEPARTMENT: Department = Department::ComputerScienceEngineering;

// The phone cell is stored as markup with `<br>` between entries rather than
// newlines, so it is split on the serialized tag.
const LINE_BREAK: &str = "<br>";

pub(super) fn parse_card(card: ElementRef) -> Result<FacultyRecord, ExtractError> {
    let title = require(&card, "div.fac_title")?;
    let location = parse_room_and_building(&text_of(&card, "div.s_f_cart:nth-child(2) p")?);

    Ok(FacultyRecord {
        department: Some(DEPARTMENT),
        faculty_code: text_of(&title, "p span")?,
        name: text_of(&title, "a h3")?,
        designation: text_of(&title, "h6")?,
        status: text_of(&title, "a + span")?,
        room: location.room,
        building: location.building,
        email: email_field(&text_of(&card, "div.s_f_cart:nth-child(1) p")?),
        profile_url: attr_of(&card, "div.single_fac_intro > a", "href")?,
        ..Default::default()
    })
}

pub(super) fn parse_page(document: &Html) -> Result<FacultyRecord, ExtractError> {
    let container = require(&document.root_element(), "div.f-detail_area > div.container")?;

    let phone_html = select_first(&container, "div.fac_cart > div.f_cell > p")?
        .map(|cell| cell.inner_html())
        .unwrap_or_default();
    let contact = parse_contact_lines(phone_html.split(LINE_BREAK));

    // The mail link wins over addresses listed in the contact cell.
    let email = match email_field(&text_of(&container, "div.f_mail > a")?) {
        field if field.is_empty() => contact.email.into(),
        field => field,
    };

    Ok(FacultyRecord {
        department: Some(DEPARTMENT),
        name: text_of(&container, "div.fac_title > h2")?,
        designation: text_of(&container, "div.fac_title > h6")?,
        room: contact.room,
        building: contact.building,
        telephone: contact.phone.into(),
        email,
        ..Default::default()
    })
}
