use crate::department::Department;
use serde::{Deserialize, Serialize};

/// One value of a contact category: a bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactValue {
    Single(String),
    Multiple(Vec<String>),
}

impl ContactValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ContactValue::Single(value) => value.is_empty(),
            ContactValue::Multiple(values) => values.is_empty(),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            ContactValue::Single(value) => vec![value],
            ContactValue::Multiple(values) => values,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBundle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal: Option<ContactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<ContactValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<ContactValue>,
}

impl ContactBundle {
    pub fn categories(&self) -> [&Option<ContactValue>; 3] {
        [&self.personal, &self.office, &self.other]
    }

    pub fn categories_mut(&mut self) -> [&mut Option<ContactValue>; 3] {
        [&mut self.personal, &mut self.office, &mut self.other]
    }

    pub fn is_empty(&self) -> bool {
        self.categories().iter().all(|value| value.is_none())
    }
}

/// `telephone` and `email` hold either plain text or a categorized bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactField {
    Text(String),
    Bundle(ContactBundle),
}

impl Default for ContactField {
    fn default() -> Self {
        ContactField::Text(String::new())
    }
}

impl ContactField {
    pub fn is_empty(&self) -> bool {
        match self {
            ContactField::Text(text) => text.is_empty(),
            ContactField::Bundle(bundle) => bundle.is_empty(),
        }
    }
}

impl From<Option<ContactBundle>> for ContactField {
    fn from(bundle: Option<ContactBundle>) -> Self {
        bundle.map(ContactField::Bundle).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default)]
    pub faculty_code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub telephone: ContactField,
    #[serde(default)]
    pub email: ContactField,
    #[serde(default)]
    pub profile_url: String,
}

impl FacultyRecord {
    /// Fills every empty field of a card record from the page record.
    /// Non-empty card values always win.
    pub fn merge_page(mut self, page: FacultyRecord) -> FacultyRecord {
        if self.department.is_none() && page.department.is_some() {
            crate::log_debug!("department: filled from page ({:?})", page.department);
            self.department = page.department;
        }

        fill_text("facultyCode", &mut self.faculty_code, page.faculty_code);
        fill_text("name", &mut self.name, page.name);
        fill_text("designation", &mut self.designation, page.designation);
        fill_text("status", &mut self.status, page.status);
        fill_text("room", &mut self.room, page.room);
        fill_text("building", &mut self.building, page.building);
        fill_contact("telephone", &mut self.telephone, page.telephone);
        fill_contact("email", &mut self.email, page.email);
        fill_text("profileUrl", &mut self.profile_url, page.profile_url);

        self
    }
}

fn fill_text(field: &str, card: &mut String, page: String) {
    if card.is_empty() && !page.is_empty() {
        crate::log_debug!("{}: filled from page ({})", field, page);
        *card = page;
    }
}

fn fill_contact(field: &str, card: &mut ContactField, page: ContactField) {
    if card.is_empty() && !page.is_empty() {
        crate::log_debug!("{}: filled from page ({:?})", field, page);
        *card = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn record(name: &str, telephone: &str) -> FacultyRecord {
        FacultyRecord {
            name: name.to_string(),
            telephone: ContactField::Text(telephone.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_card_fields_take_page_values() {
        let merged = record("A", "").merge_page(record("B", "555"));
        assert_eq!(merged.telephone, ContactField::Text("555".to_string()));
    }

    #[test]
    fn card_wins_when_both_present() {
        let merged = record("A", "").merge_page(record("B", ""));
        assert_eq!(merged.name, "A");
    }

    #[test]
    fn empty_page_values_never_overwrite() {
        let card = FacultyRecord {
            department: Some(Department::CivilEngineering),
            faculty_code: "CE01".to_string(),
            ..Default::default()
        };
        let merged = card.clone().merge_page(FacultyRecord::default());
        assert_eq!(merged, card);
    }

    #[test]
    fn department_and_bundles_fill_from_page() {
        let page = FacultyRecord {
            department: Some(Department::English),
            email: ContactField::Bundle(ContactBundle {
                office: Some(ContactValue::Single("x@bubt.edu.bd".to_string())),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = FacultyRecord::default().merge_page(page.clone());
        assert_eq!(merged.department, Some(Department::English));
        assert_eq!(merged.email, page.email);
    }

    #[test]
    fn serializes_with_stable_shape() {
        let record = FacultyRecord {
            department: Some(Department::ComputerScienceEngineering),
            name: "Jane Doe".to_string(),
            telephone: ContactField::Bundle(ContactBundle {
                personal: Some(ContactValue::Single("01700000000".to_string())),
                office: Some(ContactValue::Multiple(vec!["1".to_string(), "2".to_string()])),
                other: None,
            }),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"department":"Computer Science and Engineering","facultyCode":"","name":"Jane Doe","designation":"","status":"","room":"","building":"","telephone":{"personal":"01700000000","office":["1","2"]},"email":"","profileUrl":""}"#
        );
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn filled_fields_are_logged_at_debug() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            record("", "").merge_page(record("B", ""));
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("DEBUG"));
        assert!(output.contains("name: filled from page (B)"));
    }

    #[test]
    fn bundle_is_empty_only_without_categories() {
        assert!(ContactBundle::default().is_empty());
        let bundle = ContactBundle {
            other: Some(ContactValue::Multiple(Vec::new())),
            ..Default::default()
        };
        assert!(!bundle.is_empty());
        assert_eq!(bundle.categories(), [&None, &None, &bundle.other]);
    }

    #[test]
    fn unknown_department_is_omitted() {
        let json = serde_json::to_string(&FacultyRecord::default()).unwrap();
        assert!(json.starts_with(r#"{"facultyCode":"""#));
    }
}
