use crate::layout::page_context::PageContext;
use crate::shared::api_utils::focus_element;
use contracts::domain::a001_guest_list::GateState;
use contracts::domain::a002_rsvp::{FieldId, RsvpSession, SubmissionReport};
use contracts::enums::AttendanceMode;
use contracts::shared::CheckSequence;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Сообщение в области уведомлений формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusAlert {
    /// Суффикс класса `alert-*`
    pub kind: &'static str,
    pub message: String,
}

impl From<&SubmissionReport> for StatusAlert {
    fn from(report: &SubmissionReport) -> Self {
        Self {
            kind: report.outcome.alert_kind(),
            message: report.message.clone(),
        }
    }
}

/// ViewModel RSVP-формы
#[derive(Clone, Copy)]
pub struct RsvpFormViewModel {
    pub session: RwSignal<RsvpSession>,
    pub alert: RwSignal<Option<StatusAlert>>,
    pub is_checking: RwSignal<bool>,
    pub is_submitting: RwSignal<bool>,
    checks: StoredValue<CheckSequence>,
    ctx: PageContext,
}

impl RsvpFormViewModel {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            session: RwSignal::new(RsvpSession::new()),
            alert: RwSignal::new(None),
            is_checking: RwSignal::new(false),
            is_submitting: RwSignal::new(false),
            checks: StoredValue::new(CheckSequence::new()),
            ctx,
        }
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    pub fn gate(&self) -> GateState {
        self.session.with(|s| s.gate)
    }

    pub fn field_value(&self, field: FieldId) -> String {
        self.session.with(|s| s.form.value(field).to_string())
    }

    pub fn is_required(&self, field: FieldId) -> bool {
        self.session.with(|s| s.controller.is_required(field))
    }

    pub fn is_invalid(&self, field: FieldId) -> bool {
        self.session.with(|s| s.controller.is_invalid(field))
    }

    pub fn mode(&self) -> AttendanceMode {
        self.session.with(|s| s.controller.mode())
    }

    pub fn radios_enabled(&self) -> bool {
        self.session.with(|s| s.radios_enabled())
    }

    pub fn contact_anchor(&self) -> String {
        self.ctx.config().event.contact_anchor
    }

    // ------------------------------------------------------------------
    // Access gate
    // ------------------------------------------------------------------

    /// Каждое нажатие откладывает проверку; пустое имя сбрасывает шлюз сразу
    pub fn on_child_name_input(&self, value: String) {
        let gate_config = self.ctx.config().gate;
        let mut needs_check = false;
        self.session
            .update(|s| needs_check = s.set_child_name(&value, gate_config.compact_while_typing));

        if needs_check {
            self.schedule_check(gate_config.debounce_ms);
        } else {
            self.cancel_checks();
        }
    }

    /// Потеря фокуса проверяет сразу
    pub fn on_child_name_blur(&self) {
        let has_name = self
            .session
            .with_untracked(|s| !s.form.child_name.trim().is_empty());
        if has_name {
            self.schedule_check(0);
        }
    }

    fn cancel_checks(&self) {
        let mut seq = self.checks.get_value();
        seq.invalidate();
        self.checks.set_value(seq);
        self.is_checking.set(false);
    }

    fn schedule_check(&self, delay_ms: u32) {
        let mut seq = self.checks.get_value();
        let ticket = seq.next();
        self.checks.set_value(seq);

        let vm = *self;
        let gate = self.ctx.gate();
        vm.is_checking.set(true);

        spawn_local(async move {
            if delay_ms > 0 {
                TimeoutFuture::new(delay_ms).await;
            }
            if !vm.checks.with_value(|c| c.is_current(ticket)) {
                return;
            }

            let name = vm.session.with_untracked(|s| s.form.child_name.clone());
            let verdict = gate.verdict(&name).await;
            if !vm.checks.with_value(|c| c.is_current(ticket)) {
                return;
            }

            vm.is_checking.set(false);
            let mut applied = false;
            vm.session.update(|s| applied = s.apply_verdict(&verdict));
            if !applied {
                return;
            }
            log::debug!("gate: {:?} for {:?}", verdict.state, verdict.display_name);

            if verdict.state == GateState::Granted {
                // radios are enabled on the next render
                TimeoutFuture::new(0).await;
                focus_element("attYes");
            }
        });
    }

    // ------------------------------------------------------------------
    // Form fields
    // ------------------------------------------------------------------

    pub fn on_mode_change(&self, code: String) {
        let mode = AttendanceMode::from_code(&code);
        self.session.update(|s| {
            s.select_mode(mode);
        });
    }

    pub fn on_field_input(&self, field: FieldId, value: String) {
        self.session.update(|s| match field {
            FieldId::ParentName => s.set_parent_name(&value),
            FieldId::Phone => {
                s.set_phone(&value);
            }
            FieldId::EmergencyContact => s.set_emergency_contact(&value),
            FieldId::DietaryNotes => s.set_dietary_notes(&value),
            FieldId::DeclineMessage => s.set_decline_message(&value),
            FieldId::Honeypot => s.set_honeypot(&value),
            FieldId::ChildName | FieldId::Attending => {}
        });
    }

    // ------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------

    pub fn submit_command(&self) {
        if self.is_submitting.get_untracked() {
            return;
        }

        let mut prepared = None;
        self.session.update(|s| prepared = Some(s.prepare_submission()));
        let Some(prepared) = prepared else {
            return;
        };

        let payload = match prepared {
            Ok(payload) => payload,
            Err(report) => {
                self.finish(&report);
                return;
            }
        };

        let vm = *self;
        let submitter = self.ctx.submitter();
        vm.alert.set(None);
        vm.is_submitting.set(true);

        spawn_local(async move {
            if let Some(report) = submitter.relay(&payload).await {
                vm.finish(&report);
            }
            vm.is_submitting.set(false);
        });
    }

    fn finish(&self, report: &SubmissionReport) {
        if report.is_success() {
            log::info!("RSVP sent (relayed: {})", report.relayed);
            self.cancel_checks();
        }
        self.session.update(|s| s.finish_submission(report));
        self.alert.set(Some(StatusAlert::from(report)));
    }
}
