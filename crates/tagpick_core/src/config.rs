//! Combobox configuration
//!
//! Every field has a serde default, so a partial TOML table only overrides
//! what it names:
//!
//! ```toml
//! placeholder = "{label}"
//!
//! [metrics]
//! row_height = 28.0
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ComboboxError, Result};

// =============================================================================
// Metrics
// =============================================================================

/// Geometry constants used by the dropdown placement heuristic
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ComboboxMetrics {
    /// Height of one dropdown row in pixels
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    /// Subtracted from the summed row heights (menu padding overlap)
    #[serde(default = "default_overlap_adjustment")]
    pub overlap_adjustment: f32,
    /// Gap between an upward panel and the tag panel
    #[serde(default = "default_upward_gap")]
    pub upward_gap: f32,
    /// Space above the anchor required before a shrunk upward panel is used
    #[serde(default = "default_upward_threshold")]
    pub upward_threshold: f32,
    /// Space kept free below a capped downward panel
    #[serde(default = "default_downward_reserve")]
    pub downward_reserve: f32,
    /// Minimum max-height of a capped downward panel
    #[serde(default = "default_downward_floor")]
    pub downward_floor: f32,
}

fn default_row_height() -> f32 {
    34.0
}

fn default_overlap_adjustment() -> f32 {
    14.0
}

fn default_upward_gap() -> f32 {
    10.0
}

fn default_upward_threshold() -> f32 {
    400.0
}

fn default_downward_reserve() -> f32 {
    200.0
}

fn default_downward_floor() -> f32 {
    400.0
}

impl Default for ComboboxMetrics {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            overlap_adjustment: default_overlap_adjustment(),
            upward_gap: default_upward_gap(),
            upward_threshold: default_upward_threshold(),
            downward_reserve: default_downward_reserve(),
            downward_floor: default_downward_floor(),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// Widget configuration shared by every combobox a registry creates
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ComboboxConfig {
    #[serde(default)]
    pub metrics: ComboboxMetrics,
    /// Token in the template chip replaced by the candidate label
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Class marking the template chip (and other host-hidden markup)
    #[serde(default = "default_hidden_class")]
    pub hidden_class: String,
}

fn default_placeholder() -> String {
    "xxx".to_string()
}

fn default_hidden_class() -> String {
    "d-none".to_string()
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            metrics: ComboboxMetrics::default(),
            placeholder: default_placeholder(),
            hidden_class: default_hidden_class(),
        }
    }
}

impl ComboboxConfig {
    /// Parse a TOML document; missing keys fall back to defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| ComboboxError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the placement heuristic cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.placeholder.is_empty() {
            return Err(ComboboxError::Config(
                "placeholder must not be empty".to_string(),
            ));
        }
        let m = &self.metrics;
        let all = [
            ("row_height", m.row_height),
            ("overlap_adjustment", m.overlap_adjustment),
            ("upward_gap", m.upward_gap),
            ("upward_threshold", m.upward_threshold),
            ("downward_reserve", m.downward_reserve),
            ("downward_floor", m.downward_floor),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(ComboboxError::Config(format!(
                    "metrics.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
