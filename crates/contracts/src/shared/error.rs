use thiserror::Error;

use crate::domain::a002_rsvp::aggregate::FieldId;

/// Ошибки RSVP-страницы.
///
/// Ни одна из них не фатальна: пользователь всегда может повторить действие.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RsvpError {
    #[error("name list fetch failed: {0}")]
    NameListFetch(String),

    #[error("name list could not be parsed: {0}")]
    NameListParse(String),

    #[error("name is not on the guest list")]
    AccessDenied,

    #[error("access has not been granted yet")]
    GateClosed,

    #[error("form is invalid: {0:?}")]
    Validation(Vec<FieldId>),

    #[error("network error: {0}")]
    SubmissionNetwork(String),

    #[error("relay rejected submission (HTTP {status}): {message}")]
    SubmissionServer { status: u16, message: String },
}

impl RsvpError {
    /// Ошибки загрузки списка сворачиваются в одно состояние шлюза `Error`
    pub fn is_name_list_failure(&self) -> bool {
        matches!(self, Self::NameListFetch(_) | Self::NameListParse(_))
    }
}
