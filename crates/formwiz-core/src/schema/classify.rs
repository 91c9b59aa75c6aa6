//! Keyword-based field type inference.
//!
//! The spreadsheet only carries question text, so the input kind and its
//! limits are inferred from keywords in the question. Rules are checked in
//! priority order and the first match wins; the last rule matches anything.

use formwiz_types::schema::FieldType;

/// Accept filter for CV uploads.
pub const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx";

/// Accept filter for financial model uploads.
pub const FINANCIAL_MODEL_ACCEPT: &str = ".xls,.xlsx,.csv,.pdf";

/// Accept filter for generic file uploads.
pub const OFFICE_ACCEPT: &str = ".pdf,.doc,.docx,.xls,.xlsx,.ppt,.pptx";

/// Input kind and limits inferred for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub field_type: FieldType,
    pub accept: Option<String>,
    pub max_length: Option<u32>,
    pub rows: Option<u32>,
}

impl FieldShape {
    fn limited(field_type: FieldType, max_length: u32) -> Self {
        Self {
            field_type,
            accept: None,
            max_length: Some(max_length),
            rows: None,
        }
    }
}

/// One (predicate, outcome) pair of the classifier.
///
/// Both functions receive the lower-cased question.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub shape: fn(&str) -> FieldShape,
}

/// Classifier rules in priority order.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "email",
        matches: is_email_question,
        shape: email_shape,
    },
    ClassificationRule {
        name: "tel",
        matches: is_phone_question,
        shape: phone_shape,
    },
    ClassificationRule {
        name: "file",
        matches: is_upload_question,
        shape: upload_shape,
    },
    ClassificationRule {
        name: "short_text",
        matches: is_short_text_question,
        shape: short_text_shape,
    },
    ClassificationRule {
        name: "free_text",
        matches: any_question,
        shape: free_text_shape,
    },
];

/// Infer the field shape of a question.
pub fn classify_question(question: &str) -> FieldShape {
    let question = question.to_lowercase();
    let rule = CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(&question));
    match rule {
        Some(rule) => (rule.shape)(&question),
        None => free_text_shape(&question),
    }
}

fn contains_any(question: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| question.contains(k))
}

fn is_email_question(q: &str) -> bool {
    contains_any(q, &["email", "почта"])
}

fn email_shape(_: &str) -> FieldShape {
    FieldShape::limited(FieldType::Email, 100)
}

fn is_phone_question(q: &str) -> bool {
    contains_any(q, &["телефон", "phone"])
}

fn phone_shape(_: &str) -> FieldShape {
    FieldShape::limited(FieldType::Tel, 30)
}

fn is_upload_question(q: &str) -> bool {
    contains_any(q, &["загрузите", "приложить"])
}

fn upload_shape(q: &str) -> FieldShape {
    let accept = if q.contains("резюме") {
        Some(DOCUMENT_ACCEPT)
    } else if contains_any(q, &["финансовая модель", "финансовую модель"]) {
        Some(FINANCIAL_MODEL_ACCEPT)
    } else if q.contains("файл") {
        Some(OFFICE_ACCEPT)
    } else {
        None
    };
    FieldShape {
        field_type: FieldType::File,
        accept: accept.map(str::to_string),
        max_length: None,
        rows: None,
    }
}

fn is_short_text_question(q: &str) -> bool {
    contains_any(q, &["название", "сумму", "%"])
}

fn short_text_shape(q: &str) -> FieldShape {
    let max_length = if q.contains("название") { 200 } else { 100 };
    FieldShape::limited(FieldType::Text, max_length)
}

fn any_question(_: &str) -> bool {
    true
}

fn free_text_shape(q: &str) -> FieldShape {
    let (max_length, rows) = if contains_any(q, &["описание", "описать"]) {
        (3000, 5)
    } else {
        (2000, 3)
    };
    FieldShape {
        field_type: FieldType::Textarea,
        accept: None,
        max_length: Some(max_length),
        rows: Some(rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rule_wins_over_later_rules() {
        // Also matches "название" and "загрузите".
        let shape = classify_question("Загрузите название и Email компании");
        assert_eq!(shape.field_type, FieldType::Email);
        assert_eq!(shape.max_length, Some(100));
        assert_eq!(shape.rows, None);
    }

    #[test]
    fn test_email_keyword_is_case_insensitive() {
        assert_eq!(classify_question("Контактный EMAIL").field_type, FieldType::Email);
        assert_eq!(classify_question("Электронная почта").field_type, FieldType::Email);
    }

    #[test]
    fn test_phone_rule() {
        let shape = classify_question("Контактный телефон");
        assert_eq!(shape.field_type, FieldType::Tel);
        assert_eq!(shape.max_length, Some(30));
    }

    #[test]
    fn test_upload_accept_filters() {
        let resume = classify_question("Загрузите резюме основателя");
        assert_eq!(resume.field_type, FieldType::File);
        assert_eq!(resume.accept.as_deref(), Some(DOCUMENT_ACCEPT));
        assert_eq!(resume.max_length, None);

        let model = classify_question("Загрузите финансовую модель");
        assert_eq!(model.accept.as_deref(), Some(FINANCIAL_MODEL_ACCEPT));

        let nominative = classify_question("Загрузите файл: финансовая модель");
        assert_eq!(nominative.accept.as_deref(), Some(FINANCIAL_MODEL_ACCEPT));

        let deck = classify_question("Можно приложить файл презентации");
        assert_eq!(deck.accept.as_deref(), Some(OFFICE_ACCEPT));

        let any = classify_question("Загрузите логотип");
        assert_eq!(any.field_type, FieldType::File);
        assert_eq!(any.accept, None);
    }

    #[test]
    fn test_short_text_limits() {
        assert_eq!(
            classify_question("Название компании"),
            FieldShape::limited(FieldType::Text, 200)
        );
        assert_eq!(
            classify_question("Запрашиваемую сумму инвестиций"),
            FieldShape::limited(FieldType::Text, 100)
        );
        assert_eq!(
            classify_question("Доля в компании, %"),
            FieldShape::limited(FieldType::Text, 100)
        );
    }

    #[test]
    fn test_free_text_limits() {
        let described = classify_question("Описание проекта");
        assert_eq!(described.field_type, FieldType::Textarea);
        assert_eq!(described.max_length, Some(3000));
        assert_eq!(described.rows, Some(5));

        let plain = classify_question("Какую проблему решает проект");
        assert_eq!(plain.max_length, Some(2000));
        assert_eq!(plain.rows, Some(3));
    }

    #[test]
    fn test_rules_are_checked_in_declared_order() {
        let names: Vec<&str> = CLASSIFICATION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["email", "tel", "file", "short_text", "free_text"]);
        assert!((CLASSIFICATION_RULES[4].matches)(""));
    }
}
