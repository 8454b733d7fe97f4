//! Scroll configuration
//!
//! Every field has a default, so a config can be built in code, partially
//! deserialized from TOML, or both:
//!
//! ```toml
//! min_thumb_size = 24.0
//! easing = 0.2
//! track_click = "center"
//! scrollbar = "always"
//! ```

use glide_animation::LerpConfig;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScrollError};

/// What a click on the track (outside the thumb) does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackClickPolicy {
    /// Page one viewport toward the click
    #[default]
    Page,
    /// Jump so the thumb centres under the pointer
    Center,
}

/// Scrollbar visibility modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollbarVisibility {
    /// Show on activity, auto-hide after the configured delay (like macOS)
    #[default]
    Auto,
    /// Always show while content overflows
    Always,
    /// Never show scrollbar (content still scrollable)
    Never,
}

/// When a region claims page-wide keyboard events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyScope {
    /// While the pointer hovers the region
    #[default]
    Hover,
    /// While the region reports itself open (panels that listen regardless of hover)
    WhenOpen,
}

/// Configuration for one scroll region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Minimum thumb length in pixels
    pub min_thumb_size: f32,
    /// Base wheel / arrow-key step in pixels
    pub wheel_step: f32,
    /// Fraction of the remaining distance covered per frame (0.0-1.0]
    pub easing: f32,
    /// Inactivity before the scrollbar hides, in milliseconds
    pub auto_hide_delay_ms: u64,
    /// Stop wheel/touch events from reaching enclosing scroll regions
    pub stop_propagation: bool,
    pub track_click: TrackClickPolicy,
    pub scrollbar: ScrollbarVisibility,
    pub key_scope: KeyScope,
    /// Follow new content to the end when the collaborator reports a change
    pub pin_to_end: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            min_thumb_size: 32.0,
            wheel_step: 60.0,
            easing: 0.12,
            auto_hide_delay_ms: 1600,
            stop_propagation: false,
            track_click: TrackClickPolicy::Page,
            scrollbar: ScrollbarVisibility::Auto,
            key_scope: KeyScope::Hover,
            pin_to_end: false,
        }
    }
}

impl ScrollConfig {
    /// Embedded transcript: follows new messages, keeps wheel input to itself
    pub fn chat() -> Self {
        Self {
            stop_propagation: true,
            pin_to_end: true,
            ..Default::default()
        }
    }

    /// Create config with always-visible scrollbar
    pub fn always_visible() -> Self {
        Self {
            scrollbar: ScrollbarVisibility::Always,
            ..Default::default()
        }
    }

    /// Create config with hidden scrollbar
    pub fn hidden_scrollbar() -> Self {
        Self {
            scrollbar: ScrollbarVisibility::Never,
            ..Default::default()
        }
    }

    /// Parse a (possibly partial) TOML table and validate it
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.easing > 0.0 && self.easing <= 1.0) {
            return Err(ScrollError::InvalidConfig {
                field: "easing",
                reason: format!("must be in (0, 1], got {}", self.easing),
            });
        }
        if !(self.wheel_step.is_finite() && self.wheel_step > 0.0) {
            return Err(ScrollError::InvalidConfig {
                field: "wheel_step",
                reason: format!("must be positive, got {}", self.wheel_step),
            });
        }
        if !(self.min_thumb_size.is_finite() && self.min_thumb_size >= 0.0) {
            return Err(ScrollError::InvalidConfig {
                field: "min_thumb_size",
                reason: format!("must be non-negative, got {}", self.min_thumb_size),
            });
        }
        Ok(())
    }

    pub fn lerp_config(&self) -> LerpConfig {
        LerpConfig::new(self.easing)
    }

    pub fn auto_hide_delay(&self) -> f64 {
        self.auto_hide_delay_ms as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_config_default() {
        let config = ScrollConfig::default();
        assert_eq!(config.min_thumb_size, 32.0);
        assert_eq!(config.auto_hide_delay_ms, 1600);
        assert_eq!(config.track_click, TrackClickPolicy::Page);
        assert_eq!(config.scrollbar, ScrollbarVisibility::Auto);
        assert!(!config.stop_propagation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scroll_config_presets() {
        let chat = ScrollConfig::chat();
        assert!(chat.pin_to_end);
        assert!(chat.stop_propagation);

        assert_eq!(
            ScrollConfig::always_visible().scrollbar,
            ScrollbarVisibility::Always
        );
        assert_eq!(
            ScrollConfig::hidden_scrollbar().scrollbar,
            ScrollbarVisibility::Never
        );
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = ScrollConfig::from_toml_str(
            r#"
            easing = 0.25
            track_click = "center"
            key_scope = "when-open"
            "#,
        )
        .unwrap();

        assert_eq!(config.easing, 0.25);
        assert_eq!(config.track_click, TrackClickPolicy::Center);
        assert_eq!(config.key_scope, KeyScope::WhenOpen);
        assert_eq!(config.wheel_step, ScrollConfig::default().wheel_step);
    }

    #[test]
    fn test_invalid_easing_rejected() {
        let err = ScrollConfig::from_toml_str("easing = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ScrollError::InvalidConfig {
                field: "easing",
                ..
            }
        ));

        let zero = ScrollConfig {
            easing: 0.0,
            ..Default::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = ScrollConfig::from_toml_str("easing = ").unwrap_err();
        assert!(matches!(err, ScrollError::ConfigParse(_)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(ScrollConfig::from_toml_str(r#"track_click = "warp""#).is_err());
    }
}
