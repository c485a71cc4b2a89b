use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub event: EventConfig,
    pub gate: GateConfig,
    pub relay: RelayConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EventConfig {
    pub title: String,
    /// Anchor shown in the "not on the list" message
    #[serde(default = "default_contact_anchor")]
    pub contact_anchor: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Allow-list resource, resolved against `document.baseURI`
    pub names_url: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Drop spaces from the child name while typing
    #[serde(default)]
    pub compact_while_typing: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Form relay endpoint (form `action`)
    pub endpoint: String,
}

fn default_contact_anchor() -> String {
    "#contact".to_string()
}

fn default_debounce_ms() -> u32 {
    150
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r##"
[event]
title = "Shadow Force: Mission Day"
contact_anchor = "#contact"

[gate]
names_url = "assets/data/names.json"
debounce_ms = 150
compact_while_typing = false

[relay]
endpoint = "https://formspree.io/f/your-form-id"
"##;

/// Element id of an optional inline override:
/// `<script type="application/toml" id="site-config">...</script>`
const OVERRIDE_ELEMENT_ID: &str = "site-config";

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            event: EventConfig {
                title: "Shadow Force: Mission Day".to_string(),
                contact_anchor: default_contact_anchor(),
            },
            gate: GateConfig {
                names_url: "assets/data/names.json".to_string(),
                debounce_ms: default_debounce_ms(),
                compact_while_typing: false,
            },
            relay: RelayConfig {
                endpoint: "https://formspree.io/f/your-form-id".to_string(),
            },
        }
    }
}

pub fn parse_config(contents: &str) -> Result<SiteConfig, toml::de::Error> {
    toml::from_str(contents)
}

/// Load site configuration
///
/// Search order:
/// 1. Inline `#site-config` element in the page (per-deployment override)
/// 2. Falls back to embedded default config
pub fn load_config() -> SiteConfig {
    if let Some(contents) = read_override() {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from #{}", OVERRIDE_ELEMENT_ID);
                return config;
            }
            Err(e) => log::warn!("Invalid #{} config, using defaults: {}", OVERRIDE_ELEMENT_ID, e),
        }
    }

    parse_config(DEFAULT_CONFIG).unwrap_or_else(|e| {
        log::warn!("Embedded config is invalid: {}", e);
        SiteConfig::default()
    })
}

fn read_override() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(OVERRIDE_ELEMENT_ID)?;
    element
        .text_content()
        .filter(|text| !text.trim().is_empty())
}
