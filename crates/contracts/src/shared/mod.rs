pub mod debounce;
pub mod error;

pub use debounce::{CheckSequence, CheckTicket};
pub use error::RsvpError;
