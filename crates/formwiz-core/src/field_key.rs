//! Field key resolution.
//!
//! The schema spreadsheet carries no stable per-column identifier, so field
//! keys are derived from question text:
//!
//! 1. exact match in [`FIELD_KEYS`];
//! 2. first entry (in table order) that is a substring of the question, or
//!    that the question is a substring of;
//! 3. a slug synthesized from the question.
//!
//! Step 2 is order dependent and can alias two distinct questions to the same
//! key. [`find_key_collisions`] lets callers detect that after compilation.

use std::collections::BTreeMap;

use formwiz_types::schema::Schema;
use serde::Serialize;

/// Maximum length (in characters) of a synthesized key.
pub const MAX_SYNTHESIZED_KEY_LEN: usize = 50;

/// Known questions and their keys, in match priority order.
///
/// The first question listed for a key doubles as its display label.
pub const FIELD_KEYS: &[(&str, &str)] = &[
    ("Название компании", "company_name"),
    ("Название проекта", "project_name"),
    ("ФИО основателя", "founder_name"),
    ("Контактный email", "email"),
    ("Email", "email"),
    ("Контактный телефон", "phone"),
    ("Телефон", "phone"),
    ("Город", "city"),
    ("Сайт компании", "website"),
    ("Описание проекта", "project_description"),
    ("Какую проблему решает проект", "problem"),
    ("Целевая аудитория", "target_audience"),
    ("Стадия проекта", "stage"),
    ("Размер команды", "team_size"),
    ("Опыт команды", "team_experience"),
    ("Выручка за последний год", "revenue"),
    ("Запрашиваемую сумму инвестиций", "investment_amount"),
    ("Доля в компании, %", "equity_share"),
    ("Загрузите резюме основателя", "resume"),
    ("Загрузите финансовую модель", "financial_model"),
    ("Загрузите презентацию (файл)", "pitch_deck"),
    ("Откуда вы узнали о программе", "referral_source"),
];

/// Resolve a question to its field key.
pub fn resolve_field_key(question: &str) -> String {
    let question = question.trim();

    if let Some((_, key)) = FIELD_KEYS.iter().find(|(q, _)| *q == question) {
        return (*key).to_string();
    }

    if !question.is_empty() {
        if let Some((_, key)) = FIELD_KEYS
            .iter()
            .find(|(q, _)| question.contains(q) || q.contains(question))
        {
            return (*key).to_string();
        }
    }

    synthesize_key(question)
}

/// Display label for a key, if the key is a dictionary key.
pub fn field_label(key: &str) -> Option<&'static str> {
    FIELD_KEYS
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(question, _)| *question)
}

/// Build a key from free text: lower-case, non-alphanumerics to `_`,
/// runs of `_` collapsed, edges trimmed, at most 50 characters.
pub fn synthesize_key(question: &str) -> String {
    let mut key = String::with_capacity(question.len());
    for c in question.to_lowercase().chars() {
        let c = if is_key_char(c) { c } else { '_' };
        if c == '_' && key.ends_with('_') {
            continue;
        }
        key.push(c);
    }
    key.trim_matches('_')
        .chars()
        .take(MAX_SYNTHESIZED_KEY_LEN)
        .collect()
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || is_cyrillic_letter(c)
}

fn is_cyrillic_letter(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c) && c.is_alphabetic()
}

/// Keys for every field of a schema, parallel to `schema.fields()`.
pub fn bind_field_keys(schema: &Schema) -> Vec<String> {
    schema
        .fields()
        .iter()
        .map(|f| resolve_field_key(&f.question))
        .collect()
}

/// A key shared by more than one field of a schema, or an empty key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyCollision {
    pub key: String,
    /// Questions of the colliding fields, in column order.
    pub questions: Vec<String>,
}

/// Report every key bound to more than one field, plus the empty key.
///
/// Collisions mean the wizard cannot tell those fields' values apart. A
/// question without any key characters synthesizes `""`, which cannot
/// identify even a single field, so it is reported on its own.
pub fn find_key_collisions(schema: &Schema) -> Vec<KeyCollision> {
    let mut by_key: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (field, key) in schema.fields().iter().zip(bind_field_keys(schema)) {
        by_key.entry(key).or_default().push(field.question.clone());
    }

    by_key
        .into_iter()
        .filter(|(key, questions)| key.is_empty() || questions.len() > 1)
        .map(|(key, questions)| KeyCollision { key, questions })
        .collect()
}
