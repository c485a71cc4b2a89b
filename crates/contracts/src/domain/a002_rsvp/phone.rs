//! Проверка номера мобильного телефона (Великобритания).

use crate::enums::AttendanceMode;

pub const PHONE_HINT: &str = "Please enter a UK mobile (07XXXXXXXXX or +447XXXXXXXXX).";

/// Очистка при вводе: без пробелов, дефисов и скобок; `+` только первым символом
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '(' | ')' | '-'))
        .enumerate()
        .filter(|(i, c)| *c != '+' || *i == 0)
        .map(|(_, c)| c)
        .collect()
}

/// `07` + 9 цифр или `+447` + 9 цифр
pub fn is_uk_mobile(value: &str) -> bool {
    let subscriber = if let Some(rest) = value.strip_prefix("+447") {
        rest
    } else if let Some(rest) = value.strip_prefix("07") {
        rest
    } else {
        return false;
    };
    subscriber.len() == 9 && subscriber.bytes().all(|b| b.is_ascii_digit())
}

/// Живая проверка при вводе и потере фокуса: пустое значение допустимо
pub fn live_phone_error(raw: &str) -> Option<&'static str> {
    let value = sanitize_phone_input(raw);
    (!value.is_empty() && !is_uk_mobile(&value)).then_some(PHONE_HINT)
}

/// Проверка при отправке: номер обязателен только при «Yes»
pub fn check_phone(raw: &str, mode: AttendanceMode) -> Result<(), &'static str> {
    if mode != AttendanceMode::Yes {
        return Ok(());
    }
    if is_uk_mobile(&sanitize_phone_input(raw)) {
        Ok(())
    } else {
        Err(PHONE_HINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_numbers() {
        assert!(is_uk_mobile("07123456789"));
        assert!(is_uk_mobile("+447123456789"));
        assert!(check_phone("07 123 456789", AttendanceMode::Yes).is_ok());
        assert!(check_phone("(07123) 456-789", AttendanceMode::Yes).is_ok());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(!is_uk_mobile("07123"));
        assert!(!is_uk_mobile("+17123456789"));
        assert!(check_phone("+1 7123456789", AttendanceMode::Yes).is_err());
        assert!(check_phone("07123", AttendanceMode::Yes).is_err());
        assert!(!is_uk_mobile("0712345678a"));
        assert!(!is_uk_mobile("071234567890"));
        assert!(!is_uk_mobile("08123456789"));
    }

    #[test]
    fn test_sanitize_collapses_extra_plus() {
        assert_eq!(sanitize_phone_input("+44 7123 456 789"), "+447123456789");
        assert_eq!(sanitize_phone_input("07+123+456789"), "07123456789");
        assert_eq!(sanitize_phone_input(" +44+7"), "+447");
    }

    #[test]
    fn test_only_enforced_when_attending() {
        assert!(check_phone("", AttendanceMode::No).is_ok());
        assert!(check_phone("07123", AttendanceMode::None).is_ok());
        assert_eq!(check_phone("", AttendanceMode::Yes), Err(PHONE_HINT));
    }

    #[test]
    fn test_live_error_allows_blank() {
        assert_eq!(live_phone_error(""), None);
        assert_eq!(live_phone_error("07123"), Some(PHONE_HINT));
        assert_eq!(live_phone_error("07 123 456 789"), None);
    }
}
