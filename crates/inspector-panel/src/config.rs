//! Panel configuration.
//!
//! Hosts may pass a JSON object (camelCase keys); every key is optional.
//!
//! ```json
//! { "pinDurationMs": 500, "pinReleasePolicy": "firstTimerWins", "extraExcludedFields": ["symbol"] }
//! ```

use crate::error::ConfigError;
use crate::highlight::{DEFAULT_PIN_DURATION, DEFAULT_PINNED_STYLE_CLASS, PinReleasePolicy};
use serde::Deserialize;
use std::time::Duration;

/// Default prefix of the settings key under which text inputs persist their value.
pub const DEFAULT_INPUT_STORAGE_PREFIX: &str = "playground-input-";

/// Configuration of one panel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    /// How long a click-triggered highlight stays pinned, in milliseconds.
    pub pin_duration_ms: u64,
    /// What a second click does to a pending release.
    pub pin_release_policy: PinReleasePolicy,
    /// Style class of the pinned whole-line overlay.
    pub pinned_style_class: String,
    /// Field names skipped by the tree renderer in addition to the back-reference fields.
    pub extra_excluded_fields: Vec<String>,
    /// Prefix of the settings key used by persisted text inputs.
    pub input_storage_prefix: String,
}

impl PanelConfig {
    /// Parse a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Pin duration.
    pub fn pin_duration(&self) -> Duration {
        Duration::from_millis(self.pin_duration_ms)
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            pin_duration_ms: DEFAULT_PIN_DURATION.as_millis() as u64,
            pin_release_policy: PinReleasePolicy::default(),
            pinned_style_class: DEFAULT_PINNED_STYLE_CLASS.to_string(),
            extra_excluded_fields: Vec::new(),
            input_storage_prefix: DEFAULT_INPUT_STORAGE_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.pin_duration(), Duration::from_millis(300));
        assert_eq!(config.pin_release_policy, PinReleasePolicy::CancelAndReschedule);
        assert_eq!(config.pinned_style_class, "error-highlight");
        assert_eq!(config.input_storage_prefix, "playground-input-");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PanelConfig::from_json_str(
            r#"{"pinDurationMs": 500, "pinReleasePolicy": "firstTimerWins", "extraExcludedFields": ["symbol"]}"#,
        )
        .unwrap();
        assert_eq!(config.pin_duration(), Duration::from_millis(500));
        assert_eq!(config.pin_release_policy, PinReleasePolicy::FirstTimerWins);
        assert_eq!(config.extra_excluded_fields, vec!["symbol".to_string()]);
        assert_eq!(config.pinned_style_class, "error-highlight");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = PanelConfig::from_json_str(r#"{"pinDurationMs": "soon"}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid panel configuration"));
    }
}
