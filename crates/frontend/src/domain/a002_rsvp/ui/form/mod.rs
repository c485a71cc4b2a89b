mod view;
mod view_model;

pub use view::RsvpPage;
pub use view_model::{RsvpFormViewModel, StatusAlert};
