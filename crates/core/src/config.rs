//! Engine configuration (map viewport limits).
//!
//! Values come from the environment with hard-coded defaults, the same way the
//! host process reads the rest of its settings.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

pub const ENV_MIN_ZOOM: &str = "HUMIDOR_MIN_ZOOM";
pub const ENV_MAX_ZOOM: &str = "HUMIDOR_MAX_ZOOM";
pub const ENV_ZOOM_STEP: &str = "HUMIDOR_ZOOM_STEP";
pub const ENV_INITIAL_ZOOM: &str = "HUMIDOR_INITIAL_ZOOM";

/// Static settings consumed by the map viewport.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Increment applied by a single zoom-in / zoom-out.
    pub zoom_step: f64,
    pub initial_zoom: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 8.0,
            zoom_step: 0.5,
            initial_zoom: 1.0,
        }
    }
}

impl EngineConfig {
    /// Load from `HUMIDOR_*` environment variables; unset variables keep defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (environment, test fixtures, ...).
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, default: f64| -> DomainResult<f64> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => raw.trim().parse::<f64>().map_err(|e| {
                    DomainError::configuration(format!("{key}={raw:?} is not a number: {e}"))
                }),
            }
        };

        let config = Self {
            min_zoom: read(ENV_MIN_ZOOM, defaults.min_zoom)?,
            max_zoom: read(ENV_MAX_ZOOM, defaults.max_zoom)?,
            zoom_step: read(ENV_ZOOM_STEP, defaults.zoom_step)?,
            initial_zoom: read(ENV_INITIAL_ZOOM, defaults.initial_zoom)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let all = [self.min_zoom, self.max_zoom, self.zoom_step, self.initial_zoom];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(DomainError::configuration("zoom settings must be finite"));
        }
        if self.min_zoom > self.max_zoom {
            return Err(DomainError::configuration(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(DomainError::configuration("zoom_step must be positive"));
        }
        Ok(())
    }

    /// Clamp a zoom level into `[min_zoom, max_zoom]`.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_MAX_ZOOM, "12"),
            (ENV_ZOOM_STEP, " 1.5 "),
        ]))
        .unwrap();
        assert_eq!(config.max_zoom, 12.0);
        assert_eq!(config.zoom_step, 1.5);
        assert_eq!(config.min_zoom, 1.0);
    }

    #[test]
    fn rejects_unparsable_values() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_MIN_ZOOM, "low")])).unwrap_err();
        match err {
            DomainError::Configuration(msg) => assert!(msg.contains(ENV_MIN_ZOOM)),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_range_and_non_positive_step() {
        assert!(
            EngineConfig::from_lookup(lookup_from(&[(ENV_MIN_ZOOM, "9"), (ENV_MAX_ZOOM, "2")]))
                .is_err()
        );
        assert!(EngineConfig::from_lookup(lookup_from(&[(ENV_ZOOM_STEP, "0")])).is_err());
        assert!(EngineConfig::from_lookup(lookup_from(&[(ENV_MAX_ZOOM, "inf")])).is_err());
    }

    #[test]
    fn clamps_zoom() {
        let config = EngineConfig::default();
        assert_eq!(config.clamp_zoom(0.2), 1.0);
        assert_eq!(config.clamp_zoom(20.0), 8.0);
        assert_eq!(config.clamp_zoom(3.5), 3.5);
    }

    #[test]
    fn partial_json_uses_defaults_for_missing_keys() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_zoom": 5.0}"#).unwrap();
        assert_eq!(config.max_zoom, 5.0);
        assert_eq!(config.zoom_step, 0.5);
    }
}
