#![forbid(unsafe_code)]

//! File-based slider configuration.
//!
//! [`SliderConfig`] mirrors the default option set with camelCase keys, so a
//! JSON (or, with the `toml-config` feature, TOML) document like
//!
//! ```json
//! {
//!   "slides": ".carousel",
//!   "watchElementResize": true,
//!   "layout": [
//!     { "group": 1, "margin": 0 },
//!     { "width": 768, "group": 3, "margin": "12px" }
//!   ]
//! }
//! ```
//!
//! can be loaded, checked with [`SliderConfig::validate`], and handed to
//! [`SlideEngine::initialize`](crate::engine::SlideEngine::initialize) via
//! [`SliderConfig::into_patch`]. Missing keys fall back to the defaults and
//! unknown keys are ignored.

use crate::settings::{OptionName, SettingsPatch};
use flexi_layout::{LayoutRuleSpec, resolve};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    pub navigation_template: Option<String>,
    pub slider: Option<String>,
    pub slides: Option<String>,
    pub slide: Option<String>,
    pub debug: Option<bool>,
    pub click_debounce_timeout: Option<u64>,
    pub layout: Option<Vec<LayoutRuleSpec>>,
    pub scroll_transition: Option<String>,
    pub resize_debounce_timeout: Option<u64>,
    pub watch_element_interval: Option<u64>,
    pub watch_element_resize: Option<bool>,
}

impl SliderConfig {
    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigFileError> {
        serde_json::from_str(s).map_err(ConfigFileError::Json)
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigFileError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a TOML string.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(s).map_err(ConfigFileError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "toml-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigFileError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Check values the engine would reject or fall back on.
    ///
    /// Returns a list of problems. An empty list means the config applies
    /// cleanly.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Some(layout) = &self.layout {
            if layout.is_empty() {
                errors.push("layout must not be empty".into());
            } else if let Err(err) = resolve(layout) {
                errors.push(format!("layout: {err}"));
            }
        }

        if self.watch_element_interval == Some(0) {
            errors.push("watchElementInterval must be > 0".into());
        }

        for (key, selector) in [
            (OptionName::Slider, &self.slider),
            (OptionName::Slides, &self.slides),
            (OptionName::Slide, &self.slide),
        ] {
            if selector.as_deref().is_some_and(|s| s.trim().is_empty()) {
                errors.push(format!("{key} selector must not be blank"));
            }
        }

        errors
    }

    /// Options present in this config, ready to override the defaults.
    #[must_use]
    pub fn into_patch(self) -> SettingsPatch {
        let mut patch = SettingsPatch::new();
        let mut put = |name, value: crate::settings::OptionValue| {
            if !value.is_unset() {
                patch.insert(name, value);
            }
        };
        put(OptionName::NavigationTemplate, self.navigation_template.into());
        put(OptionName::Slider, self.slider.into());
        put(OptionName::Slides, self.slides.into());
        put(OptionName::Slide, self.slide.into());
        put(OptionName::Debug, self.debug.into());
        put(OptionName::ClickDebounceTimeout, self.click_debounce_timeout.into());
        put(OptionName::Layout, self.layout.into());
        put(OptionName::ScrollTransition, self.scroll_transition.into());
        put(OptionName::ResizeDebounceTimeout, self.resize_debounce_timeout.into());
        put(OptionName::WatchElementInterval, self.watch_element_interval.into());
        put(OptionName::WatchElementResize, self.watch_element_resize.into());
        patch
    }
}

/// Errors that can occur when loading a slider configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[cfg(feature = "toml-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
}
