use serde::Deserialize;
use std::collections::HashSet;

use crate::shared::RsvpError;

/// Ключ сравнения имени: верхний регистр, без пробелов и дефисов.
///
/// Идемпотентна: `normalize_name(&normalize_name(s)) == normalize_name(s)`.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .flat_map(char::to_uppercase)
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Вариант для ввода с клавиатуры: убирает пробелы, регистр не трогает
pub fn compact_typed_name(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ').collect()
}

/// Формат `names.json`: голый массив или объект с полем `allowed`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameListDocument {
    Bare(Vec<String>),
    Wrapped { allowed: Vec<String> },
}

impl NameListDocument {
    fn into_names(self) -> Vec<String> {
        match self {
            NameListDocument::Bare(names) => names,
            NameListDocument::Wrapped { allowed } => allowed,
        }
    }
}

// ============================================================================
// Allow-list
// ============================================================================

/// Список гостей, допущенных к RSVP. Хранит только нормализованные ключи.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    entries: HashSet<String>,
}

impl AllowList {
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let entries = names
            .into_iter()
            .map(|n| normalize_name(n.as_ref()))
            .filter(|key| !key.is_empty())
            .collect();
        Self { entries }
    }

    /// Разобрать содержимое `names.json`
    pub fn from_json(body: &str) -> Result<Self, RsvpError> {
        let doc: NameListDocument =
            serde_json::from_str(body).map_err(|e| RsvpError::NameListParse(e.to_string()))?;
        Ok(Self::new(doc.into_names()))
    }

    /// Точное совпадение по нормализованной форме
    pub fn contains(&self, raw_name: &str) -> bool {
        let key = normalize_name(raw_name);
        !key.is_empty() && self.entries.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
