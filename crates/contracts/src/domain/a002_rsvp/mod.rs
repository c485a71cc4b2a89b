pub mod aggregate;
pub mod controller;
pub mod phone;
pub mod session;
pub mod submission;

pub use aggregate::{FieldId, FormSection, RsvpForm, RsvpPayload};
pub use controller::FormController;
pub use session::RsvpSession;
pub use submission::{
    RelayErrorBody, RelayResponse, RelayTransport, RsvpSubmitter, SubmissionOutcome,
    SubmissionPhase, SubmissionReport,
};
