//! Engine tuning.
//!
//! Every constant that shapes the feel of the grid lives here so screens can
//! load their own profile from JSON. Missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::spring::SpringConfig;

/// Per-item proximity styling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProximityConfig {
    /// Side length of an item's square box, in pixels
    pub item_dim: f32,
    /// Distance from focal point -> scale
    pub scale_curve: Curve,
    /// Distance from focal point -> opacity
    pub opacity_curve: Curve,
    /// z-index of an item sitting exactly on the focal point
    pub z_base: f32,
    /// Drop items whose centre is more than `item_dim` off screen
    pub cull: bool,
    /// Distance under which an item counts as very close to the focal point
    pub very_close_distance: f32,
    /// Smoothing applied to each item's scale
    pub scale_spring: SpringConfig,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            item_dim: 140.0,
            scale_curve: Curve::new([0.0, 100.0, 450.0], [1.8, 1.0, 0.4]),
            opacity_curve: Curve::new([0.0, 220.0, 500.0], [1.0, 0.9, 0.05]),
            z_base: 1000.0,
            cull: true,
            very_close_distance: 40.0,
            scale_spring: SpringConfig::ITEM_SCALE,
        }
    }
}

/// Drag release and tap snapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Seconds of release velocity added to the pan to predict where it rests
    pub prediction_secs: f32,
    /// Request more items when the resting viewport is this close to the grid edge
    pub load_more_threshold: f32,
    /// Spring used after a drag release, seeded with the release velocity
    pub release_spring: SpringConfig,
    /// Spring used when centring a tapped item
    pub tap_spring: SpringConfig,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            prediction_secs: 0.12,
            load_more_threshold: 200.0,
            release_spring: SpringConfig::SNAP,
            tap_spring: SpringConfig::TAP,
        }
    }
}

/// Long-press canvas zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Canvas scale while the press is held
    pub scale: f32,
    /// Hold time before the press counts as long, in milliseconds
    pub min_duration_ms: u64,
    /// Pointer travel that cancels a press before it activates
    pub max_travel: f32,
    pub press_spring: SpringConfig,
    pub release_spring: SpringConfig,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scale: 0.5,
            min_duration_ms: 200,
            max_travel: 10.0,
            press_spring: SpringConfig::ZOOM_PRESS,
            release_spring: SpringConfig::ZOOM_RELEASE,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hex size for projection, in pixels
    pub hex_size: f32,
    pub proximity: ProximityConfig,
    pub snap: SnapConfig,
    pub zoom: ZoomConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hex_size: honeycomb_topology::DEFAULT_HEX_SIZE,
            proximity: ProximityConfig::default(),
            snap: SnapConfig::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must be positive, got {v}")))
            }
        }

        fn non_negative(name: &str, v: f32) -> Result<()> {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!("{name} must be non-negative, got {v}")))
            }
        }

        fn curve(name: &str, c: &Curve) -> Result<()> {
            if c.is_well_formed() {
                Ok(())
            } else {
                Err(Error::InvalidConfig(format!(
                    "{name} breakpoints must be finite and strictly ascending, got {:?}",
                    c.input
                )))
            }
        }

        fn spring(name: &str, s: &SpringConfig) -> Result<()> {
            match s.problem() {
                Some(problem) => Err(Error::InvalidConfig(format!("{name}: {problem}"))),
                None => Ok(()),
            }
        }

        positive("hex_size", self.hex_size)?;

        let p = &self.proximity;
        non_negative("proximity.item_dim", p.item_dim)?;
        curve("proximity.scale_curve", &p.scale_curve)?;
        curve("proximity.opacity_curve", &p.opacity_curve)?;
        non_negative("proximity.very_close_distance", p.very_close_distance)?;
        if !p.z_base.is_finite() {
            return Err(Error::InvalidConfig("proximity.z_base must be finite".into()));
        }
        spring("proximity.scale_spring", &p.scale_spring)?;

        let s = &self.snap;
        non_negative("snap.prediction_secs", s.prediction_secs)?;
        non_negative("snap.load_more_threshold", s.load_more_threshold)?;
        spring("snap.release_spring", &s.release_spring)?;
        spring("snap.tap_spring", &s.tap_spring)?;

        let z = &self.zoom;
        positive("zoom.scale", z.scale)?;
        non_negative("zoom.max_travel", z.max_travel)?;
        spring("zoom.press_spring", &z.press_spring)?;
        spring("zoom.release_spring", &z.release_spring)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_json_yields_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config = EngineConfig::from_json(
            r#"{ "hex_size": 80.0, "snap": { "prediction_secs": 0.2 }, "proximity": { "cull": false } }"#,
        )
        .unwrap();

        assert_eq!(config.hex_size, 80.0);
        assert_eq!(config.snap.prediction_secs, 0.2);
        assert_eq!(config.snap.load_more_threshold, 200.0);
        assert!(!config.proximity.cull);
        assert_eq!(config.proximity.item_dim, 140.0);
    }

    #[test]
    fn rejects_non_positive_hex_size() {
        let err = EngineConfig::from_json(r#"{ "hex_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("hex_size"));
    }

    #[test]
    fn rejects_unordered_curve() {
        let mut config = EngineConfig::default();
        config.proximity.scale_curve.input = [0.0, 500.0, 450.0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_spring() {
        let mut config = EngineConfig::default();
        config.zoom.press_spring.stiffness = -1.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("zoom.press_spring"));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = EngineConfig::from_json("{ hex_size: ").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
