use crate::domain::a001_guest_list::api::HttpNameSource;
use crate::domain::a002_rsvp::api::GlooRelayTransport;
use crate::shared::api_utils::asset_url;
use crate::shared::config::SiteConfig;
use contracts::domain::a001_guest_list::AccessGate;
use contracts::domain::a002_rsvp::RsvpSubmitter;
use leptos::prelude::*;
use std::rc::Rc;

pub type PageGate = AccessGate<HttpNameSource>;
pub type PageSubmitter = RsvpSubmitter<GlooRelayTransport>;

/// Page-wide state constructed once in `App` and shared through context.
///
/// The gate keeps the allow-list cache for the whole session; the submitter
/// tracks the single in-flight submission.
#[derive(Clone, Copy)]
pub struct PageContext {
    config: StoredValue<SiteConfig>,
    gate: StoredValue<Rc<PageGate>, LocalStorage>,
    submitter: StoredValue<Rc<PageSubmitter>, LocalStorage>,
}

impl PageContext {
    pub fn new(config: SiteConfig) -> Self {
        let names_url = asset_url(&config.gate.names_url);
        let gate = AccessGate::new(HttpNameSource::new(names_url));
        let submitter = RsvpSubmitter::new(GlooRelayTransport, config.relay.endpoint.clone());

        Self {
            config: StoredValue::new(config),
            gate: StoredValue::new_local(Rc::new(gate)),
            submitter: StoredValue::new_local(Rc::new(submitter)),
        }
    }

    pub fn config(&self) -> SiteConfig {
        self.config.get_value()
    }

    pub fn gate(&self) -> Rc<PageGate> {
        self.gate.get_value()
    }

    pub fn submitter(&self) -> Rc<PageSubmitter> {
        self.submitter.get_value()
    }
}

pub fn use_page_context() -> PageContext {
    use_context::<PageContext>().expect("PageContext not provided in context")
}
