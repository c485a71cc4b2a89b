pub mod page_context;

pub use page_context::{use_page_context, PageContext};
