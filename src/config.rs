//! Page-level tunables for the helpers.
//!
//! Every field has a default matching the stock page markup, so a page only
//! needs to pass the values it overrides. Under `hydrate` the start entry
//! point reads a JSON object from `<body data-pagekit-config="...">`.

use serde::Deserialize;

use crate::error::UiError;

pub const DEFAULT_MESSAGE_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_REVOKE_DELAY_MS: u32 = 100;
pub const DEFAULT_CONTAINER_SELECTOR: &str = ".container";

/// Body attribute holding the page's JSON config.
pub const CONFIG_ATTR: &str = "data-pagekit-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a transient banner stays up before it is removed.
    pub message_timeout_ms: u32,
    /// Delay between clicking a download anchor and revoking its object URL.
    pub revoke_delay_ms: u32,
    /// Where banners go when the caller names no container.
    pub default_container_selector: String,
    pub tooltip_selector: String,
    pub popover_selector: String,
    pub progress_selector: String,
    /// Attribute holding a progress bar's width as a percentage number.
    pub progress_width_attr: String,
    /// Attribute holding a button's content while it shows a spinner.
    pub original_text_attr: String,
    pub loading_label: String,
    /// Restored when a button leaves the loading state with nothing stored.
    pub loading_fallback_label: String,
    /// `log` level filter name (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_timeout_ms: DEFAULT_MESSAGE_TIMEOUT_MS,
            revoke_delay_ms: DEFAULT_REVOKE_DELAY_MS,
            default_container_selector: DEFAULT_CONTAINER_SELECTOR.to_owned(),
            tooltip_selector: r#"[data-bs-toggle="tooltip"]"#.to_owned(),
            popover_selector: r#"[data-bs-toggle="popover"]"#.to_owned(),
            progress_selector: ".progress-bar".to_owned(),
            progress_width_attr: "data-width".to_owned(),
            original_text_attr: "data-original-text".to_owned(),
            loading_label: "Loading...".to_owned(),
            loading_fallback_label: "Submit".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl UiConfig {
    /// Parse a (possibly partial) JSON object, filling gaps with defaults.
    pub fn from_json(raw: &str) -> Result<Self, UiError> {
        serde_json::from_str(raw).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Resolved `log` filter; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
