use std::collections::BTreeSet;

use super::aggregate::{FieldId, FormSection, RsvpForm};
use super::phone;
use crate::enums::AttendanceMode;
use crate::shared::RsvpError;

/// Состояние условной формы: видимость секций, обязательность и
/// подсветка ошибок в зависимости от выбора участия.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormController {
    mode: AttendanceMode,
    attending_visible: bool,
    not_attending_visible: bool,
    required: BTreeSet<FieldId>,
    invalid: BTreeSet<FieldId>,
    was_validated: bool,
}

impl Default for FormController {
    fn default() -> Self {
        let mut controller = Self {
            mode: AttendanceMode::None,
            attending_visible: false,
            not_attending_visible: false,
            required: BTreeSet::new(),
            invalid: BTreeSet::new(),
            was_validated: false,
        };
        controller.apply_mode(AttendanceMode::None);
        controller
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AttendanceMode {
        self.mode
    }

    /// Переключить режим. Повторный вызов с тем же режимом ничего не меняет.
    pub fn apply_mode(&mut self, mode: AttendanceMode) {
        self.mode = mode;
        self.attending_visible = mode == AttendanceMode::Yes;
        self.not_attending_visible = mode == AttendanceMode::No;

        self.required = FieldId::all()
            .into_iter()
            .filter(|f| {
                f.always_required() || (mode == AttendanceMode::Yes && f.required_when_attending())
            })
            .collect();

        // Скрытое поле с прошлой ошибкой не должно блокировать отправку
        let hidden: Vec<FieldId> = self
            .invalid
            .iter()
            .copied()
            .filter(|f| !self.is_visible(*f))
            .collect();
        for field in hidden {
            self.invalid.remove(&field);
        }
    }

    /// Сброс, вызванный шлюзом (отказ, ошибка, очистка имени) или успешной отправкой
    pub fn force_none(&mut self) {
        self.invalid.clear();
        self.was_validated = false;
        self.apply_mode(AttendanceMode::None);
    }

    pub fn section_visible(&self, section: FormSection) -> bool {
        match section {
            FormSection::Always => true,
            FormSection::Attending => self.attending_visible,
            FormSection::NotAttending => self.not_attending_visible,
            FormSection::Hidden => false,
        }
    }

    pub fn is_visible(&self, field: FieldId) -> bool {
        self.section_visible(field.section())
    }

    pub fn is_required(&self, field: FieldId) -> bool {
        self.required.contains(&field)
    }

    pub fn is_invalid(&self, field: FieldId) -> bool {
        self.invalid.contains(&field)
    }

    pub fn was_validated(&self) -> bool {
        self.was_validated
    }

    /// Подсветка поля при живой проверке (телефон)
    pub fn set_invalid(&mut self, field: FieldId, invalid: bool) {
        if invalid && self.is_visible(field) {
            self.invalid.insert(field);
        } else {
            self.invalid.remove(&field);
        }
    }

    /// Встроенная проверка формы: обязательные поля и шаблон телефона.
    /// Ошибочные поля помечаются; при успехе подсветка снимается.
    pub fn validate(&mut self, form: &RsvpForm) -> Result<(), RsvpError> {
        self.was_validated = true;

        let mut failed: Vec<FieldId> = self
            .required
            .iter()
            .copied()
            .filter(|f| match f {
                FieldId::Attending => !form.attending.is_selected(),
                other => form.is_blank(*other),
            })
            .collect();

        if phone::check_phone(&form.phone, self.mode).is_err() && !failed.contains(&FieldId::Phone)
        {
            failed.push(FieldId::Phone);
        }
        failed.sort();

        self.invalid = failed.iter().copied().collect();
        if failed.is_empty() {
            Ok(())
        } else {
            Err(RsvpError::Validation(failed))
        }
    }
}
