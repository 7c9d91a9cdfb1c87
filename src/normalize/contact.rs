use crate::model::{ContactBundle, ContactValue};
use regex::Regex;
use std::sync::LazyLock;

static PERSONAL_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@(gmail|yahoo|hotmail|outlook)\.").unwrap());
static OFFICE_DOMAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@([\w-]+\.)*bubt\.edu\.bd$").unwrap());

/// Files an address under `personal`, `office` or `other` by its domain.
pub fn categorize_email_by_domain(email: &str) -> Option<ContactBundle> {
    let email = email.trim();
    if email.is_empty() {
        return None;
    }

    let value = Some(ContactValue::Multiple(vec![email.to_string()]));
    let bundle = if PERSONAL_DOMAIN.is_match(email) {
        ContactBundle {
            personal: value,
            ..Default::default()
        }
    } else if OFFICE_DOMAIN.is_match(email) {
        ContactBundle {
            office: value,
            ..Default::default()
        }
    } else {
        ContactBundle {
            other: value,
            ..Default::default()
        }
    };

    Some(bundle)
}

/// Drops empty categories. A bundle with nothing left is `None`, never `{}`.
pub fn clean_contact_info_empty_fields(data: &ContactBundle) -> Option<ContactBundle> {
    let mut cleaned = data.clone();

    for value in cleaned.categories_mut() {
        if value.as_ref().is_some_and(ContactValue::is_empty) {
            *value = None;
        }
    }

    (!cleaned.is_empty()).then_some(cleaned)
}

/// Unwraps single-element lists into bare strings.
pub fn simplify_contact_info(data: &ContactBundle) -> ContactBundle {
    let mut flattened = data.clone();

    for value in flattened.categories_mut() {
        if let Some(ContactValue::Multiple(values)) = value {
            if values.len() == 1 {
                *value = Some(ContactValue::Single(values.remove(0)));
            }
        }
    }

    flattened
}

#[cfg(test)]
mod tests {
    use super::*;

    fn many(values: &[&str]) -> Option<ContactValue> {
        Some(ContactValue::Multiple(
            values.iter().map(|v| v.to_string()).collect(),
        ))
    }

    #[test]
    fn categorizes_by_domain() {
        assert_eq!(
            categorize_email_by_domain("x@gmail.com"),
            Some(ContactBundle {
                personal: many(&["x@gmail.com"]),
                ..Default::default()
            })
        );
        assert_eq!(
            categorize_email_by_domain("  x@bubt.edu.bd "),
            Some(ContactBundle {
                office: many(&["x@bubt.edu.bd"]),
                ..Default::default()
            })
        );
        assert_eq!(
            categorize_email_by_domain("x@other.org"),
            Some(ContactBundle {
                other: many(&["x@other.org"]),
                ..Default::default()
            })
        );
        assert_eq!(
            categorize_email_by_domain("X@Cse.BUBT.edu.bd").unwrap().office,
            many(&["X@Cse.BUBT.edu.bd"])
        );
        assert_eq!(categorize_email_by_domain(""), None);
        assert_eq!(categorize_email_by_domain("   "), None);
    }

    #[test]
    fn cleaner_drops_empty_categories() {
        let data = ContactBundle {
            personal: many(&["1234"]),
            office: many(&[]),
            other: many(&[]),
        };
        assert_eq!(
            clean_contact_info_empty_fields(&data),
            Some(ContactBundle {
                personal: many(&["1234"]),
                ..Default::default()
            })
        );
    }

    #[test]
    fn cleaner_returns_none_for_all_empty() {
        let data = ContactBundle {
            personal: Some(ContactValue::Single(String::new())),
            office: many(&[]),
            other: None,
        };
        assert_eq!(clean_contact_info_empty_fields(&data), None);
        assert_eq!(clean_contact_info_empty_fields(&ContactBundle::default()), None);
    }

    #[test]
    fn simplifier_only_unwraps_singletons() {
        let data = ContactBundle {
            personal: many(&["1234"]),
            office: many(&["123", "456"]),
            other: many(&[]),
        };
        assert_eq!(
            simplify_contact_info(&data),
            ContactBundle {
                personal: Some(ContactValue::Single("1234".to_string())),
                office: many(&["123", "456"]),
                other: many(&[]),
            }
        );
    }
}
