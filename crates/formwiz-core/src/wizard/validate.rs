//! Per-field format checks run on user input.
//!
//! Empty values never carry a format error; emptiness is the navigation
//! gate's concern.

use formwiz_types::schema::{FieldDefinition, FieldType};

const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

/// Format error for a value, or `None` when the value is acceptable.
pub fn validate_value(field: &FieldDefinition, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(max) = field.max_length {
        if value.chars().count() > max as usize {
            return Some(format!("Не более {max} символов"));
        }
    }

    match field.field_type {
        FieldType::Email if !is_valid_email(value) => {
            Some("Введите корректный email".to_string())
        }
        FieldType::Tel if !is_valid_phone(value) => {
            Some("Введите корректный номер телефона".to_string())
        }
        _ => None,
    }
}

/// Minimal structural email check: `local@domain.tld`, no whitespace.
pub fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

/// Phone check: digits with optional separators and a leading `+`,
/// 10 to 15 digits in total.
pub fn is_valid_phone(value: &str) -> bool {
    let allowed = value.char_indices().all(|(i, c)| {
        c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0)
    });
    let digits = value.chars().filter(char::is_ascii_digit).count();
    allowed && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}
