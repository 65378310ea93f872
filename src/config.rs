use log::{warn, Level};
use serde::Deserialize;

use crate::dom;

/// Element holding optional JSON overrides for [`PageConfig`].
pub const CONFIG_SELECTOR: &str = "#page-config";

/// Everything about the page that differs between deployments.
///
/// The defaults describe the service-picker layout. The time-picker
/// layout only overrides `descriptorField`/`descriptorLabel`, e.g.
///
/// ```json
/// { "descriptorField": "time", "descriptorLabel": "Preferred time" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    pub recipient: String,
    pub subject_prefix: String,
    pub signature: String,
    pub descriptor_field: String,
    pub descriptor_label: String,
    pub default_choice: String,
    pub splash_key: String,
    pub splash_seen_value: String,
    pub toast_ms: u32,
    pub splash_fade_ms: u32,
    pub focus_release_ms: u32,
    pub section_thresholds: Vec<f64>,
    pub reveal_threshold: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            recipient: "sheila@priviancare.com".to_string(),
            subject_prefix: "Privian Care Consultation Request — ".to_string(),
            signature: "— Sent from priviancare.com demo form".to_string(),
            descriptor_field: "service".to_string(),
            descriptor_label: "Preferred service".to_string(),
            default_choice: "personal".to_string(),
            splash_key: "privian_splash_seen".to_string(),
            splash_seen_value: "1".to_string(),
            toast_ms: 1400,
            splash_fade_ms: 700,
            focus_release_ms: 600,
            section_thresholds: vec![0.18, 0.28, 0.38],
            reveal_threshold: 0.22,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads overrides from the page, falling back to defaults.
    pub fn load() -> Self {
        let Some(raw) = dom::query(CONFIG_SELECTOR).and_then(|el| el.text_content()) else {
            return Self::default();
        };
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed page config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
