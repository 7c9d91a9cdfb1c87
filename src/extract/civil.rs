use super::general;
use crate::error::ExtractError;
use crate::model::FacultyRecord;
use scraper::ElementRef;

/// The civil engineering listing reuses the general layout, but its image alt
/// text is not a faculty code. The code comes from the profile page instead.
pub(super) fn parse_card(card: ElementRef) -> Result<FacultyRecord, ExtractError> {
    let mut record = general::parse_card(card)?;
    record.faculty_code.clear();
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::selector;
    use scraper::Html;

    #[test]
    fn drops_card_faculty_code() {
        let html = Html::parse_document(
            r#"<div class="faculty-member">
                 <a href="/home/faculty_details/civil-12"><img alt="photo of Jane"></a>
                 <div class="member_name"><h3>Jane Roe <span><em>Lecturer</em></span></h3></div>
               </div>"#,
        );
        let card = html
            .select(&selector("div.faculty-member").unwrap())
            .next()
            .unwrap();

        let record = parse_card(card).unwrap();
        assert_eq!(record.faculty_code, "");
        assert_eq!(record.name, "Jane Roe");
        assert_eq!(record.designation, "Lecturer");
        assert_eq!(record.profile_url, "/home/faculty_details/civil-12");
    }
}
