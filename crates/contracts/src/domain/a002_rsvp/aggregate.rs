use serde::{Deserialize, Serialize};

use crate::enums::AttendanceMode;

/// Секция формы, в которой находится поле
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormSection {
    /// Видно всегда
    Always,
    /// Раскрывается при «Yes»
    Attending,
    /// Раскрывается при «No»
    NotAttending,
    /// Ловушка для ботов, пользователю не показывается
    Hidden,
}

/// Поля RSVP-формы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    ChildName,
    ParentName,
    Attending,
    Phone,
    EmergencyContact,
    DietaryNotes,
    DeclineMessage,
    Honeypot,
}

impl FieldId {
    pub fn all() -> [FieldId; 8] {
        [
            FieldId::ChildName,
            FieldId::ParentName,
            FieldId::Attending,
            FieldId::Phone,
            FieldId::EmergencyContact,
            FieldId::DietaryNotes,
            FieldId::DeclineMessage,
            FieldId::Honeypot,
        ]
    }

    /// Имя поля в отправляемых данных и id элемента
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldId::ChildName => "child_name",
            FieldId::ParentName => "parent_name",
            FieldId::Attending => "attending",
            FieldId::Phone => "phone",
            FieldId::EmergencyContact => "emergency_contact",
            FieldId::DietaryNotes => "dietary_notes",
            FieldId::DeclineMessage => "decline_message",
            FieldId::Honeypot => "hp",
        }
    }

    pub fn section(&self) -> FormSection {
        match self {
            FieldId::ChildName | FieldId::ParentName | FieldId::Attending => FormSection::Always,
            FieldId::Phone | FieldId::EmergencyContact | FieldId::DietaryNotes => {
                FormSection::Attending
            }
            FieldId::DeclineMessage => FormSection::NotAttending,
            FieldId::Honeypot => FormSection::Hidden,
        }
    }

    /// Обязательно всегда, независимо от выбора участия
    pub fn always_required(&self) -> bool {
        matches!(
            self,
            FieldId::ChildName | FieldId::ParentName | FieldId::Attending
        )
    }

    /// Обязательно только при «Yes» (`data-required-when="yes"`)
    pub fn required_when_attending(&self) -> bool {
        matches!(self, FieldId::Phone | FieldId::EmergencyContact)
    }
}

// ============================================================================
// Form values
// ============================================================================

/// Значения полей формы
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    pub child_name: String,
    pub parent_name: String,
    pub attending: AttendanceMode,
    pub phone: String,
    pub emergency_contact: String,
    pub dietary_notes: String,
    pub decline_message: String,
    pub honeypot: String,
}

impl RsvpForm {
    pub fn value(&self, field: FieldId) -> &str {
        match field {
            FieldId::ChildName => &self.child_name,
            FieldId::ParentName => &self.parent_name,
            FieldId::Attending => self.attending.code(),
            FieldId::Phone => &self.phone,
            FieldId::EmergencyContact => &self.emergency_contact,
            FieldId::DietaryNotes => &self.dietary_notes,
            FieldId::DeclineMessage => &self.decline_message,
            FieldId::Honeypot => &self.honeypot,
        }
    }

    pub fn is_blank(&self, field: FieldId) -> bool {
        self.value(field).trim().is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Тема письма: `RSVP: ALEX TURNER – YES`
    pub fn subject_line(&self) -> String {
        let child = self
            .child_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();
        format!("RSVP: {} – {}", child, self.attending.subject_token())
    }

    /// Данные для отправки; скрытая секция не отправляется
    pub fn to_payload(&self) -> RsvpPayload {
        let attending = self.attending == AttendanceMode::Yes;
        let declining = self.attending == AttendanceMode::No;
        let keep = |on: bool, v: &str| {
            let v = v.trim();
            (on && !v.is_empty()).then(|| v.to_string())
        };

        RsvpPayload {
            child_name: self.child_name.trim().to_string(),
            parent_name: self.parent_name.trim().to_string(),
            attending: self.attending.code().to_string(),
            phone: keep(attending, &self.phone),
            emergency_contact: keep(attending, &self.emergency_contact),
            dietary_notes: keep(attending, &self.dietary_notes),
            decline_message: keep(declining, &self.decline_message),
            subject: self.subject_line(),
        }
    }
}

/// Данные, уходящие в сервис пересылки форм
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsvpPayload {
    pub child_name: String,
    pub parent_name: String,
    pub attending: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_message: Option<String>,
    #[serde(rename = "_subject")]
    pub subject: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RsvpForm {
        RsvpForm {
            child_name: "  Alex   Turner ".to_string(),
            parent_name: "Sam Turner".to_string(),
            attending: AttendanceMode::Yes,
            phone: "07123456789".to_string(),
            emergency_contact: "Pat 07000000000".to_string(),
            dietary_notes: String::new(),
            decline_message: "ignored while attending".to_string(),
            honeypot: String::new(),
        }
    }

    #[test]
    fn test_subject_line() {
        assert_eq!(sample().subject_line(), "RSVP: ALEX TURNER – YES");

        let mut form = sample();
        form.attending = AttendanceMode::None;
        assert_eq!(form.subject_line(), "RSVP: ALEX TURNER – REPLY");
    }

    #[test]
    fn test_payload_drops_hidden_section() {
        let payload = sample().to_payload();
        assert_eq!(payload.child_name, "Alex   Turner");
        assert_eq!(payload.attending, "yes");
        assert_eq!(payload.phone.as_deref(), Some("07123456789"));
        assert_eq!(payload.dietary_notes, None);
        assert_eq!(payload.decline_message, None);
    }

    #[test]
    fn test_payload_json_uses_subject_field() {
        let json = serde_json::to_value(sample().to_payload()).unwrap();
        assert_eq!(json["_subject"], "RSVP: ALEX TURNER – YES");
        assert!(json.get("decline_message").is_none());
    }

    #[test]
    fn test_field_sections() {
        for field in FieldId::all() {
            if field.required_when_attending() {
                assert_eq!(field.section(), FormSection::Attending);
            }
        }
        assert_eq!(FieldId::Honeypot.wire_name(), "hp");
    }

    #[test]
    fn test_reset() {
        let mut form = sample();
        form.reset();
        assert_eq!(form, RsvpForm::default());
    }
}
