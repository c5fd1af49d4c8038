//! Globe and route configuration.

use serde::{Deserialize, Serialize};

use crate::arc::ArcSettings;
use crate::constants::{
    ARC_COLOR, DEFAULT_ARC_SEGMENTS, DEFAULT_DEBOUNCE_SECS, DEFAULT_ORBIT_DURATION_SECS,
    GLOBE_RADIUS, MARKER_A_COLOR, MARKER_B_COLOR, SURFACE_OFFSET,
};
use crate::error::{Error, Result};
use crate::geo::UvOffset;

/// Settings shared by the marker store, the arc builder and the planner.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Texture alignment offsets, in degrees.
    pub uv_offset: UvOffset,
    /// Radius of the globe surface in scene units.
    pub globe_radius: f64,
    /// Multiplier placing markers and arcs slightly above the surface.
    pub surface_offset: f64,
    /// Segments per great-circle arc.
    pub arc_segments: u32,
    /// Colour of marker A (0xRRGGBB).
    pub marker_a_color: u32,
    /// Colour of marker B (0xRRGGBB).
    pub marker_b_color: u32,
    /// Colour of the arc (0xRRGGBB).
    pub arc_color: u32,
    /// Camera re-orientation duration in seconds.
    pub orbit_duration_secs: f64,
    /// Delay between the last input edit and the recompute, in seconds.
    pub debounce_secs: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            uv_offset: UvOffset::default(),
            globe_radius: GLOBE_RADIUS,
            surface_offset: SURFACE_OFFSET,
            arc_segments: DEFAULT_ARC_SEGMENTS,
            marker_a_color: MARKER_A_COLOR,
            marker_b_color: MARKER_B_COLOR,
            arc_color: ARC_COLOR,
            orbit_duration_secs: DEFAULT_ORBIT_DURATION_SECS,
            debounce_secs: DEFAULT_DEBOUNCE_SECS,
        }
    }
}

impl GlobeConfig {
    /// Distance of marker centers from the globe center.
    pub fn marker_radius(&self) -> f64 {
        self.globe_radius * self.surface_offset
    }

    /// Arc settings derived from this config.
    pub fn arc_settings(&self) -> ArcSettings {
        ArcSettings {
            segments: self.arc_segments,
            radius: self.globe_radius * self.surface_offset,
        }
    }

    /// Check that the values can be used to build a scene.
    pub fn validate(&self) -> Result<()> {
        let positive = |field: &'static str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::InvalidConfig {
                    field,
                    detail: format!("expected a positive number, got {value}"),
                })
            }
        };

        positive("globe_radius", self.globe_radius)?;
        positive("surface_offset", self.surface_offset)?;
        positive("orbit_duration_secs", self.orbit_duration_secs)?;

        if !self.debounce_secs.is_finite() || self.debounce_secs < 0.0 {
            return Err(Error::InvalidConfig {
                field: "debounce_secs",
                detail: format!("expected a non-negative number, got {}", self.debounce_secs),
            });
        }
        if self.arc_segments == 0 {
            return Err(Error::InvalidConfig {
                field: "arc_segments",
                detail: "expected at least one segment".to_string(),
            });
        }
        if !self.uv_offset.lon.is_finite() || !self.uv_offset.lat.is_finite() {
            return Err(Error::InvalidConfig {
                field: "uv_offset",
                detail: "offsets must be finite".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GlobeConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.marker_radius() - 1.02).abs() < 1e-12);
        assert_eq!(config.arc_settings().segments, 160);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GlobeConfig =
            serde_json::from_str(r#"{ "arc_segments": 64, "uv_offset": { "lon": 12.5 } }"#)
                .unwrap();
        assert_eq!(config.arc_segments, 64);
        assert_eq!(config.uv_offset, UvOffset::new(12.5, 180.0));
        assert_eq!(config.debounce_secs, GlobeConfig::default().debounce_secs);
    }

    #[test]
    fn test_validate_rejects_unusable_values() {
        let config = GlobeConfig {
            globe_radius: 0.0,
            ..GlobeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig {
                field: "globe_radius",
                ..
            })
        ));

        let config = GlobeConfig {
            arc_segments: 0,
            ..GlobeConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig {
                field: "arc_segments",
                ..
            })
        ));

        let config = GlobeConfig {
            debounce_secs: -0.1,
            ..GlobeConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
