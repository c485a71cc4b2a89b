use serde::{Deserialize, Serialize};

/// Выбор участия (радиокнопки «Yes» / «No»)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceMode {
    /// Ничего не выбрано; обязательно, пока шлюз закрыт
    #[default]
    None,
    Yes,
    No,
}

impl AttendanceMode {
    /// Значение атрибута `value` радиокнопки
    pub fn code(&self) -> &'static str {
        match self {
            AttendanceMode::None => "",
            AttendanceMode::Yes => "yes",
            AttendanceMode::No => "no",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            AttendanceMode::None => "Not selected",
            AttendanceMode::Yes => "Yes, we'll be there",
            AttendanceMode::No => "Sorry, can't make it",
        }
    }

    /// Часть темы письма
    pub fn subject_token(&self) -> &'static str {
        match self {
            AttendanceMode::None => "REPLY",
            AttendanceMode::Yes => "YES",
            AttendanceMode::No => "NO",
        }
    }

    /// Парсинг из строки (регистр не важен)
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "yes" => AttendanceMode::Yes,
            "no" => AttendanceMode::No,
            _ => AttendanceMode::None,
        }
    }

    pub fn is_selected(&self) -> bool {
        !matches!(self, AttendanceMode::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(AttendanceMode::from_code("yes"), AttendanceMode::Yes);
        assert_eq!(AttendanceMode::from_code(" NO "), AttendanceMode::No);
        assert_eq!(AttendanceMode::from_code("maybe"), AttendanceMode::None);
        assert_eq!(AttendanceMode::from_code(""), AttendanceMode::None);
    }

    #[test]
    fn test_subject_token() {
        assert_eq!(AttendanceMode::Yes.subject_token(), "YES");
        assert_eq!(AttendanceMode::None.subject_token(), "REPLY");
    }
}
