use crate::domain::a002_rsvp::ui::form::RsvpPage;
use crate::layout::page_context::PageContext;
use crate::shared::config::load_config;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // One context per page load: owns the config, the name-list cache and the submitter.
    let config = load_config();
    log::debug!("site config: {:?}", config);
    provide_context(PageContext::new(config));

    view! {
        <RsvpPage />
    }
}
