use async_trait::async_trait;
use serde::Deserialize;
use std::cell::Cell;

use super::aggregate::RsvpPayload;
use crate::shared::RsvpError;

pub const GENERIC_SERVER_ERROR: &str = "Something went wrong sending your RSVP.";
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const SUCCESS_MESSAGE: &str =
    "Thanks! Your RSVP has been sent. We look forward to seeing you on mission day!";
pub const GATE_CLOSED_MESSAGE: &str = "Please enter the child's name exactly as it appears on \
     the invitation first. Once access is granted, you can complete your RSVP.";
pub const VALIDATION_MESSAGE: &str = "Please complete the highlighted fields.";

/// Итог попытки отправки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    BlockedGateClosed,
    ValidationFailed,
    NetworkError,
    ServerRejected,
    Success,
}

impl SubmissionOutcome {
    /// Класс оформления сообщения (`alert-*`)
    pub fn alert_kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::BlockedGateClosed | SubmissionOutcome::ValidationFailed => "warning",
            SubmissionOutcome::NetworkError | SubmissionOutcome::ServerRejected => "danger",
            SubmissionOutcome::Success => "success",
        }
    }
}

/// Результат отправки для показа пользователю
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    pub outcome: SubmissionOutcome,
    pub message: String,
    /// Запрос к сервису был начат, даже если ответ так и не пришёл
    pub relayed: bool,
}

impl SubmissionReport {
    pub fn local(outcome: SubmissionOutcome, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: message.into(),
            relayed: false,
        }
    }

    pub fn success(relayed: bool) -> Self {
        Self {
            outcome: SubmissionOutcome::Success,
            message: SUCCESS_MESSAGE.to_string(),
            relayed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == SubmissionOutcome::Success
    }
}

/// Ошибка отправки → сообщение пользователю.
/// Отказ шлюза и недоступный список означают одно: форма ещё закрыта.
impl From<&RsvpError> for SubmissionReport {
    fn from(err: &RsvpError) -> Self {
        match err {
            RsvpError::NameListFetch(_)
            | RsvpError::NameListParse(_)
            | RsvpError::AccessDenied
            | RsvpError::GateClosed => {
                Self::local(SubmissionOutcome::BlockedGateClosed, GATE_CLOSED_MESSAGE)
            }
            RsvpError::Validation(_) => {
                Self::local(SubmissionOutcome::ValidationFailed, VALIDATION_MESSAGE)
            }
            RsvpError::SubmissionNetwork(_) => Self {
                outcome: SubmissionOutcome::NetworkError,
                message: NETWORK_ERROR_MESSAGE.to_string(),
                relayed: true,
            },
            RsvpError::SubmissionServer { message, .. } => Self {
                outcome: SubmissionOutcome::ServerRejected,
                message: format!("{} Please try again.", message),
                relayed: true,
            },
        }
    }
}

// ============================================================================
// Relay transport
// ============================================================================

/// Ответ сервиса пересылки форм
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: String,
}

impl RelayResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RelayFieldError {
    #[serde(default)]
    message: Option<String>,
}

/// Тело ошибки: `{"error": "..."}` или `{"errors": [{"message": "..."}]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<RelayFieldError>,
}

impl RelayErrorBody {
    /// Нечитаемое тело даёт пустую ошибку
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        let top = self.error.as_deref().filter(|m| !m.trim().is_empty());
        top.or_else(|| {
            self.errors
                .first()
                .and_then(|e| e.message.as_deref())
                .filter(|m| !m.trim().is_empty())
        })
    }

    pub fn message_or_default(&self) -> String {
        self.message().unwrap_or(GENERIC_SERVER_ERROR).to_string()
    }
}

/// Отправка формы во внешний сервис. `Err` означает сбой транспорта (нет ответа).
#[async_trait(?Send)]
pub trait RelayTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        payload: &RsvpPayload,
    ) -> Result<RelayResponse, RsvpError>;
}

// ============================================================================
// Submitter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// Возвращает фазу в `Idle` при любом исходе
struct PhaseGuard<'a>(&'a Cell<SubmissionPhase>);

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.0.set(SubmissionPhase::Idle);
    }
}

/// Отправитель RSVP: idle → submitting → idle.
///
/// Полный цикл: `RsvpSession::prepare_submission` → `relay` →
/// `RsvpSession::finish_submission`.
pub struct RsvpSubmitter<T: RelayTransport> {
    transport: T,
    endpoint: String,
    phase: Cell<SubmissionPhase>,
}

impl<T: RelayTransport> RsvpSubmitter<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            phase: Cell::new(SubmissionPhase::Idle),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase.get()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase.get() == SubmissionPhase::Submitting
    }

    /// Сетевая часть отправки. `None`, если другая отправка ещё идёт:
    /// повторный запрос не делается.
    pub async fn relay(&self, payload: &RsvpPayload) -> Option<SubmissionReport> {
        if self.is_submitting() {
            log::debug!("RSVP already being sent, ignoring");
            return None;
        }
        self.phase.set(SubmissionPhase::Submitting);
        let _guard = PhaseGuard(&self.phase);

        let result = match self.transport.post_form(&self.endpoint, payload).await {
            Ok(resp) if resp.is_success() => Ok(()),
            Ok(resp) => Err(RsvpError::SubmissionServer {
                status: resp.status,
                message: RelayErrorBody::parse(&resp.body).message_or_default(),
            }),
            Err(e) => Err(e),
        };

        let report = match result {
            Ok(()) => SubmissionReport::success(true),
            Err(e) => {
                if let RsvpError::SubmissionServer { .. } = e {
                    log::warn!("{}", e);
                } else {
                    log::error!("RSVP relay unreachable: {}", e);
                }
                SubmissionReport::from(&e)
            }
        };
        Some(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_guest_list::{GateState, GateVerdict};
    use crate::domain::a002_rsvp::{FieldId, RsvpSession};
    use crate::enums::AttendanceMode;
    use std::cell::RefCell;

    struct FakeRelay {
        response: Result<RelayResponse, RsvpError>,
        sent: RefCell<Vec<(String, RsvpPayload)>>,
    }

    impl FakeRelay {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                response: Ok(RelayResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                response: Err(RsvpError::SubmissionNetwork("Failed to fetch".to_string())),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl RelayTransport for FakeRelay {
        async fn post_form(
            &self,
            endpoint: &str,
            payload: &RsvpPayload,
        ) -> Result<RelayResponse, RsvpError> {
            self.sent
                .borrow_mut()
                .push((endpoint.to_string(), payload.clone()));
            self.response.clone()
        }
    }

    const ENDPOINT: &str = "https://formspree.io/f/test";

    fn granted_session() -> RsvpSession {
        let mut session = RsvpSession::new();
        session.set_child_name("Alex Turner", false);
        session.apply_verdict(&GateVerdict {
            state: GateState::Granted,
            display_name: "Alex Turner".to_string(),
        });
        session.set_parent_name("Sam Turner");
        session.select_mode(AttendanceMode::Yes);
        session.set_phone("07 123 456 789");
        session.set_emergency_contact("Pat Turner");
        session
    }

    /// Same steps as the page view model: prepare, relay, finish
    async fn send(
        submitter: &RsvpSubmitter<FakeRelay>,
        session: &mut RsvpSession,
    ) -> SubmissionReport {
        let report = match session.prepare_submission() {
            Ok(payload) => submitter
                .relay(&payload)
                .await
                .expect("no submission in flight"),
            Err(report) => report,
        };
        session.finish_submission(&report);
        report
    }

    #[test]
    fn test_error_body_message_priority() {
        let body = RelayErrorBody::parse(r#"{"error": "Form not found"}"#);
        assert_eq!(body.message(), Some("Form not found"));

        let body = RelayErrorBody::parse(r#"{"errors": [{"message": "Email invalid"}]}"#);
        assert_eq!(body.message(), Some("Email invalid"));

        let body = RelayErrorBody::parse("<html>bad gateway</html>");
        assert_eq!(body.message_or_default(), GENERIC_SERVER_ERROR);

        let body = RelayErrorBody::parse(r#"{"errors": []}"#);
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_report_from_error() {
        let report = SubmissionReport::from(&RsvpError::AccessDenied);
        assert_eq!(report.outcome, SubmissionOutcome::BlockedGateClosed);
        assert!(!report.relayed);

        let report = SubmissionReport::from(&RsvpError::Validation(vec![FieldId::Phone]));
        assert_eq!(report.outcome, SubmissionOutcome::ValidationFailed);

        let report = SubmissionReport::from(&RsvpError::SubmissionServer {
            status: 400,
            message: "Bad form".to_string(),
        });
        assert_eq!(report.outcome, SubmissionOutcome::ServerRejected);
        assert_eq!(report.message, "Bad form Please try again.");
    }

    #[tokio::test]
    async fn test_gate_closed_never_hits_network() {
        let submitter = RsvpSubmitter::new(FakeRelay::replying(200, "{}"), ENDPOINT);

        for gate in [GateState::Unknown, GateState::Denied, GateState::Error] {
            let mut session = granted_session();
            session.apply_gate(gate);
            let report = send(&submitter, &mut session).await;
            assert_eq!(report.outcome, SubmissionOutcome::BlockedGateClosed);
            assert!(!report.relayed);
        }
        assert!(submitter.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_validation_failure_aborts() {
        let submitter = RsvpSubmitter::new(FakeRelay::replying(200, "{}"), ENDPOINT);
        let mut session = granted_session();
        session.set_phone("07123");

        let report = send(&submitter, &mut session).await;
        assert_eq!(report.outcome, SubmissionOutcome::ValidationFailed);
        assert!(submitter.transport.sent.borrow().is_empty());
        assert!(session.controller.is_invalid(FieldId::Phone));
    }

    #[tokio::test]
    async fn test_honeypot_reports_success_without_network() {
        let submitter = RsvpSubmitter::new(FakeRelay::replying(500, "{}"), ENDPOINT);
        let mut session = granted_session();
        session.set_honeypot("http://spam.example");

        let report = send(&submitter, &mut session).await;
        assert_eq!(report.outcome, SubmissionOutcome::Success);
        assert!(!report.relayed);
        assert!(submitter.transport.sent.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_end_to_end_success_resets_session() {
        let submitter = RsvpSubmitter::new(FakeRelay::replying(200, r#"{"ok": true}"#), ENDPOINT);
        let mut session = granted_session();

        let report = send(&submitter, &mut session).await;
        assert_eq!(report.outcome, SubmissionOutcome::Success);
        assert!(report.relayed);
        assert!(report.message.starts_with("Thanks! Your RSVP has been sent."));
        assert!(report
            .message
            .contains("We look forward to seeing you on mission day!"));

        let sent = submitter.transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        let (endpoint, payload) = &sent[0];
        assert_eq!(endpoint, ENDPOINT);
        assert!(payload.subject.contains("ALEX TURNER"));
        assert!(payload.subject.contains("YES"));
        assert_eq!(payload.phone.as_deref(), Some("07123456789"));

        assert_eq!(session.gate, GateState::Unknown);
        assert_eq!(session.form.child_name, "");
        assert_eq!(session.controller.mode(), AttendanceMode::None);
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_server_rejection_surfaces_message() {
        let submitter = RsvpSubmitter::new(
            FakeRelay::replying(422, r#"{"errors": [{"message": "Too many submissions"}]}"#),
            ENDPOINT,
        );
        let mut session = granted_session();

        let report = send(&submitter, &mut session).await;
        assert_eq!(report.outcome, SubmissionOutcome::ServerRejected);
        assert_eq!(report.message, "Too many submissions Please try again.");
        // form kept for retry
        assert_eq!(session.gate, GateState::Granted);
        assert_eq!(session.form.child_name, "Alex Turner");
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        let submitter = RsvpSubmitter::new(FakeRelay::offline(), ENDPOINT);
        let mut session = granted_session();

        let report = send(&submitter, &mut session).await;
        assert_eq!(report.outcome, SubmissionOutcome::NetworkError);
        assert_eq!(report.message, NETWORK_ERROR_MESSAGE);
        // the request was attempted even though no response arrived
        assert!(report.relayed);
        assert_eq!(submitter.transport.sent.borrow().len(), 1);
        assert_eq!(submitter.phase(), SubmissionPhase::Idle);
    }

    #[tokio::test]
    async fn test_second_relay_while_in_flight_is_ignored() {
        let submitter = RsvpSubmitter::new(FakeRelay::replying(200, "{}"), ENDPOINT);
        submitter.phase.set(SubmissionPhase::Submitting);

        let mut session = granted_session();
        let payload = session.prepare_submission().unwrap();
        assert_eq!(submitter.relay(&payload).await, None);
        assert!(submitter.transport.sent.borrow().is_empty());
    }
}
