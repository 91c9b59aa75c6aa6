//! Built-in fallback schema.
//!
//! Used whenever the schema spreadsheet cannot be fetched or compiled, so the
//! applicant always sees a working form. Field shapes go through the same
//! classifier as compiled fields.

use formwiz_types::schema::{FieldDefinition, Schema};

use crate::schema::classify::classify_question;

/// (section, question, placeholder, required)
const DEFAULT_FIELDS: &[(&str, &str, &str, bool)] = &[
    ("О компании", "Название компании", "ООО «Ромашка»", true),
    ("О компании", "Сайт компании", "https://example.com", false),
    ("О компании", "Город", "Москва", true),
    ("Контакты", "ФИО основателя", "Иванов Иван Иванович", true),
    ("Контакты", "Контактный email", "founder@example.com", true),
    ("Контакты", "Контактный телефон", "+7 900 000-00-00", true),
    ("Проект", "Описание проекта", "Что вы делаете и для кого", true),
    ("Проект", "Какую проблему решает проект", "", true),
    ("Проект", "Целевая аудитория", "", false),
    ("Проект", "Стадия проекта", "Идея, MVP, первые продажи…", true),
    ("Команда", "Размер команды", "", true),
    ("Команда", "Опыт команды", "", false),
    ("Команда", "Загрузите резюме основателя", "", false),
    ("Финансы", "Выручка за последний год", "", false),
    ("Финансы", "Запрашиваемую сумму инвестиций", "10 000 000 ₽", true),
    ("Финансы", "Доля в компании, %", "10", false),
    ("Финансы", "Загрузите финансовую модель", "", false),
    ("Финансы", "Откуда вы узнали о программе", "", false),
];

/// The schema used when no spreadsheet schema is available.
pub fn default_schema() -> Schema {
    let fields = DEFAULT_FIELDS
        .iter()
        .map(|&(section, question, placeholder, required)| {
            let shape = classify_question(question);
            FieldDefinition {
                section: section.to_string(),
                question: question.to_string(),
                placeholder: placeholder.to_string(),
                required,
                field_type: shape.field_type,
                accept: shape.accept,
                max_length: shape.max_length,
                rows: shape.rows,
            }
        })
        .collect();
    Schema::from_fields(fields)
}
