use crate::model::ContactValue;
use regex::Regex;
use std::sync::LazyLock;

// optional non-word prefix, any character, then digits
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\W?.\d+").unwrap());
static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,/;]+").unwrap());

/// Cleans a raw phone string and splits it into numbers.
///
/// Spaces and hyphens are visual separators and are removed first; numbers
/// are separated by `,`, `/` or `;`. Returns `None` when the text holds no
/// phone number at all, `Single("")` when nothing survived the split.
///
/// ```text
/// "+123-456 789" -> "123456789"
/// "123,456;789"  -> ["123", "456", "789"]
/// "abc"          -> None
/// ```
pub fn validate_and_split_phone_numbers(phone: &str) -> Option<ContactValue> {
    let clean_text: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    if !PHONE_PATTERN.is_match(&clean_text) {
        return None;
    }

    let mut numbers: Vec<String> = SEPARATORS
        .split(&clean_text)
        .map(str::trim)
        .filter(|number| PHONE_PATTERN.is_match(number))
        .map(strip_leading_symbol)
        .collect();

    match numbers.len() {
        0 => Some(ContactValue::Single(String::new())),
        1 => Some(ContactValue::Single(numbers.remove(0))),
        _ => Some(ContactValue::Multiple(numbers)),
    }
}

fn strip_leading_symbol(number: &str) -> String {
    match number.chars().next() {
        Some(c) if !c.is_alphanumeric() && c != '_' => number[c.len_utf8()..].to_string(),
        _ => number.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(s: &str) -> Option<ContactValue> {
        Some(ContactValue::Single(s.to_string()))
    }

    #[test]
    fn strips_visual_separators() {
        assert_eq!(validate_and_split_phone_numbers("+123-456 789"), single("123456789"));
        assert_eq!(validate_and_split_phone_numbers("123-456 789"), single("123456789"));
        assert_eq!(validate_and_split_phone_numbers("01700-000000"), single("01700000000"));
    }

    #[test]
    fn splits_multiple_numbers_in_order() {
        assert_eq!(
            validate_and_split_phone_numbers("123,456;789"),
            Some(ContactValue::Multiple(vec![
                "123".to_string(),
                "456".to_string(),
                "789".to_string()
            ]))
        );
        assert_eq!(
            validate_and_split_phone_numbers("01711-111111 / 01811-222222"),
            Some(ContactValue::Multiple(vec![
                "01711111111".to_string(),
                "01811222222".to_string()
            ]))
        );
    }

    #[test]
    fn rejects_text_without_numbers() {
        assert_eq!(validate_and_split_phone_numbers("abc"), None);
        assert_eq!(validate_and_split_phone_numbers("abc123"), None);
        assert_eq!(validate_and_split_phone_numbers(""), None);
    }

    #[test]
    fn numeric_text_with_nothing_left_is_empty_not_invalid() {
        assert_eq!(validate_and_split_phone_numbers("/1"), single(""));
    }

    #[test]
    fn drops_pieces_without_digits() {
        assert_eq!(validate_and_split_phone_numbers("0171234,ext"), single("0171234"));
    }
}
