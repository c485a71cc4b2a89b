pub mod button;
pub mod input;
pub mod radio;

pub use button::Button;
pub use input::{Input, Textarea};
pub use radio::Radio;
