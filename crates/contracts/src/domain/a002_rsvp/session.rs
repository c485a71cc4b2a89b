use super::aggregate::{FieldId, RsvpForm, RsvpPayload};
use super::controller::FormController;
use super::phone;
use super::submission::{SubmissionOutcome, SubmissionReport, SUCCESS_MESSAGE};
use crate::domain::a001_guest_list::{compact_typed_name, normalize_name, GateState, GateVerdict};
use crate::enums::AttendanceMode;
use crate::shared::RsvpError;

/// Состояние RSVP-страницы: значения полей, шлюз и условная форма.
///
/// Поток данных односторонний: имя → шлюз → радиокнопки → обязательность → отправка.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpSession {
    pub form: RsvpForm,
    pub gate: GateState,
    /// Имя, для которого получен текущий вердикт
    pub gate_name: String,
    pub controller: FormController,
}

impl RsvpSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Изменение имени ребёнка. Возвращает `true`, если нужна проверка по списку.
    ///
    /// Вердикт привязан к имени: другое имя сразу закрывает шлюз (`Unknown`)
    /// до следующей проверки.
    pub fn set_child_name(&mut self, raw: &str, compact_while_typing: bool) -> bool {
        self.form.child_name = if compact_while_typing {
            compact_typed_name(raw)
        } else {
            raw.to_string()
        };
        let normalized = normalize_name(&self.form.child_name);
        if normalized.is_empty() || normalized != normalize_name(&self.gate_name) {
            self.apply_gate(GateState::Unknown);
            self.gate_name.clear();
        }
        !normalized.is_empty()
    }

    /// Шлюз открыт именно для имени, которое сейчас в поле
    fn gate_covers_current_name(&self) -> bool {
        self.gate.is_open()
            && normalize_name(&self.gate_name) == normalize_name(&self.form.child_name)
    }

    /// Применить вердикт, если он относится к текущему значению поля
    pub fn apply_verdict(&mut self, verdict: &GateVerdict) -> bool {
        if verdict.display_name != self.form.child_name.trim() {
            return false;
        }
        self.gate_name = verdict.display_name.clone();
        self.apply_gate(verdict.state);
        true
    }

    /// Пока шлюз закрыт, радиокнопки выключены и сняты, секции свёрнуты
    pub fn apply_gate(&mut self, state: GateState) {
        self.gate = state;
        if !state.radios_enabled() {
            self.form.attending = AttendanceMode::None;
            self.controller.force_none();
        }
    }

    pub fn radios_enabled(&self) -> bool {
        self.gate.radios_enabled()
    }

    /// Выбор радиокнопки; игнорируется при закрытом шлюзе
    pub fn select_mode(&mut self, mode: AttendanceMode) -> bool {
        if !self.radios_enabled() {
            return false;
        }
        self.form.attending = mode;
        self.controller.apply_mode(mode);
        true
    }

    pub fn set_parent_name(&mut self, value: &str) {
        self.form.parent_name = value.to_string();
        self.refresh_required(FieldId::ParentName);
    }

    /// Номер очищается при вводе; ошибка шаблона подсвечивается сразу
    pub fn set_phone(&mut self, raw: &str) -> Option<&'static str> {
        self.form.phone = phone::sanitize_phone_input(raw);
        let error = phone::live_phone_error(&self.form.phone);
        self.controller.set_invalid(FieldId::Phone, error.is_some());
        error
    }

    pub fn set_emergency_contact(&mut self, value: &str) {
        self.form.emergency_contact = value.to_string();
        self.refresh_required(FieldId::EmergencyContact);
    }

    pub fn set_dietary_notes(&mut self, value: &str) {
        self.form.dietary_notes = value.to_string();
    }

    pub fn set_decline_message(&mut self, value: &str) {
        self.form.decline_message = value.to_string();
    }

    pub fn set_honeypot(&mut self, value: &str) {
        self.form.honeypot = value.to_string();
    }

    /// После неудачной проверки подсветка снимается, как только поле заполнено
    fn refresh_required(&mut self, field: FieldId) {
        if self.controller.was_validated() && self.controller.is_required(field) {
            let blank = self.form.is_blank(field);
            self.controller.set_invalid(field, blank);
        }
    }

    /// Локальные шаги отправки. `Err` означает итог без сетевого запроса.
    pub fn prepare_submission(&mut self) -> Result<RsvpPayload, SubmissionReport> {
        if !self.gate_covers_current_name() {
            log::debug!("RSVP blocked: {}", RsvpError::GateClosed);
            return Err(SubmissionReport::from(&RsvpError::GateClosed));
        }
        if let Err(e) = self.controller.validate(&self.form) {
            log::debug!("RSVP validation failed: {}", e);
            return Err(SubmissionReport::from(&e));
        }
        if !self.form.honeypot.trim().is_empty() {
            log::debug!("honeypot filled, skipping relay");
            return Err(SubmissionReport::local(
                SubmissionOutcome::Success,
                SUCCESS_MESSAGE,
            ));
        }
        Ok(self.form.to_payload())
    }

    /// Успех сбрасывает форму, секции и шлюз
    pub fn finish_submission(&mut self, report: &SubmissionReport) {
        if report.is_success() {
            self.form.reset();
            self.gate_name.clear();
            self.apply_gate(GateState::Unknown);
        }
    }
}
