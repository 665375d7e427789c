use serde::{Deserialize, Serialize};

use crate::core::{ConvergenceConfig, StabilityConfig};
use crate::error::{NavigatorError, NavigatorResult};

use super::validation::validate_navigator_config;

/// Page budget used while searching for a navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializeConfig {
    /// Max extra pages requested for one navigation.
    pub attempt_budget: u32,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self { attempt_budget: 40 }
    }
}

/// Bounds and increment for content zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub step: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 3.0,
            step: 0.1,
        }
    }
}

impl ZoomConfig {
    #[must_use]
    pub fn clamp(self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Infinite-scroll style background pagination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoFetchConfig {
    pub enabled: bool,
    /// Request the next page once the viewport is this close to the end.
    pub prefetch_distance_px: f64,
}

impl Default for AutoFetchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prefetch_distance_px: 800.0,
        }
    }
}

/// Public navigator configuration.
///
/// Serializable so hosts can persist/load tuning without inventing their own
/// format. Missing fields fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub materialize: MaterializeConfig,
    #[serde(default)]
    pub stability: StabilityConfig,
    #[serde(default)]
    pub convergence: ConvergenceConfig,
    #[serde(default)]
    pub zoom: ZoomConfig,
    #[serde(default)]
    pub auto_fetch: AutoFetchConfig,
}

impl NavigatorConfig {
    #[must_use]
    pub fn with_attempt_budget(mut self, attempt_budget: u32) -> Self {
        self.materialize.attempt_budget = attempt_budget;
        self
    }

    #[must_use]
    pub fn with_stability(mut self, stability: StabilityConfig) -> Self {
        self.stability = stability;
        self
    }

    #[must_use]
    pub fn with_convergence(mut self, convergence: ConvergenceConfig) -> Self {
        self.convergence = convergence;
        self
    }

    #[must_use]
    pub fn with_zoom(mut self, zoom: ZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    #[must_use]
    pub fn with_auto_fetch(mut self, enabled: bool) -> Self {
        self.auto_fetch.enabled = enabled;
        self
    }

    pub fn validate(self) -> NavigatorResult<Self> {
        validate_navigator_config(self)
    }

    /// Parses and validates a JSON config.
    pub fn from_json_str(input: &str) -> NavigatorResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            NavigatorError::InvalidConfig(format!("failed to parse navigator config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> NavigatorResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            NavigatorError::InvalidConfig(format!("failed to serialize navigator config: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::NavigatorConfig;
    use crate::error::NavigatorError;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = NavigatorConfig::from_json_str(r#"{"materialize":{"attempt_budget":7}}"#)
            .expect("valid config");
        assert_eq!(config.materialize.attempt_budget, 7);
        assert_eq!(config.stability, NavigatorConfig::default().stability);
        assert!(config.auto_fetch.enabled);
    }

    #[test]
    fn malformed_json_is_invalid_config() {
        let err = NavigatorConfig::from_json_str("{").expect_err("must fail");
        assert!(matches!(err, NavigatorError::InvalidConfig(_)));
    }

    #[test]
    fn json_round_trip_preserves_config() {
        let config = NavigatorConfig::default().with_attempt_budget(12);
        let json = config.to_json_pretty().expect("serialize");
        assert_eq!(NavigatorConfig::from_json_str(&json).expect("parse"), config);
    }
}
