//! Geographic math on the rendered globe.
//!
//! Converts latitude/longitude to directions on the unit sphere, measures
//! great-circle distances and interpolates along great circles.
//!
//! The globe's texture does not have its UV origin at (0°, 0°), so every
//! conversion takes an explicit [`UvOffset`] rather than reading ambient state.

use std::f64::consts::PI;
use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{DEGENERATE_ANGLE_EPSILON, EARTH_RADIUS_KM};
use crate::error::{Axis, Error, Result};

/// A validated geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting values outside `[-90, 90]` x `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !is_valid_latitude(lat) {
            return Err(Error::InvalidCoordinate {
                axis: Axis::Latitude,
                value: lat,
            });
        }
        if !is_valid_longitude(lon) {
            return Err(Error::InvalidCoordinate {
                axis: Axis::Longitude,
                value: lon,
            });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Offsets (degrees) aligning the globe texture's UV origin with true geography.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UvOffset {
    pub lon: f64,
    pub lat: f64,
}

impl Default for UvOffset {
    fn default() -> Self {
        Self { lon: 0.0, lat: 180.0 }
    }
}

impl UvOffset {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Returns true if `lat` is a finite latitude in `[-90, 90]`.
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Returns true if `lon` is a finite longitude in `[-180, 180]`.
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

/// Convert a geographic point to a unit direction in globe space.
///
/// +Y is the polar axis. The offset is applied before the spherical
/// conversion, so the same `offset` must be used for every point that is
/// drawn on the same globe.
pub fn to_direction(point: GeoPoint, offset: UvOffset) -> DVec3 {
    let adj_lat = -(point.lat + offset.lat);
    let adj_lon = point.lon + offset.lon;
    let phi = (90.0 - adj_lat).to_radians();
    let theta = (adj_lon + 180.0).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    DVec3::new(-sin_phi * cos_theta, cos_phi, sin_phi * sin_theta)
}

/// Convert a geographic point to a position at `radius` from the globe center.
pub fn to_position(point: GeoPoint, offset: UvOffset, radius: f64) -> DVec3 {
    to_direction(point, offset) * radius
}

/// Great-circle distance in kilometers using the haversine formula.
pub fn haversine_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;

    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_KM * c
}

/// Spherical linear interpolation between two unit directions.
///
/// Both inputs should be normalized. The result is always unit length,
/// including for coincident and antipodal inputs.
pub fn slerp(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    let dot = a.dot(b).clamp(-1.0, 1.0);
    let omega = dot.acos();

    // Nearly identical: the sine weights would divide by ~0.
    if omega < DEGENERATE_ANGLE_EPSILON {
        let lerped = a.lerp(b, t);
        return lerped.try_normalize().unwrap_or(a);
    }

    // Nearly antipodal: every great circle through `a` is a shortest path,
    // so rotate about an arbitrary perpendicular axis.
    if omega > PI - DEGENERATE_ANGLE_EPSILON {
        let perp = if a.x.abs() < 0.9 {
            DVec3::X.cross(a).normalize()
        } else {
            DVec3::Y.cross(a).normalize()
        };
        let angle = t * PI;
        return (a * angle.cos() + perp * angle.sin()).normalize();
    }

    let sin_omega = omega.sin();
    let a_weight = ((1.0 - t) * omega).sin() / sin_omega;
    let b_weight = (t * omega).sin() / sin_omega;

    (a * a_weight + b * b_weight).normalize()
}

/// Great-circle midpoint of two unit directions.
pub fn great_circle_midpoint(a: DVec3, b: DVec3) -> DVec3 {
    slerp(a, b, 0.5)
}

/// Horizontal angle of `v` around the +Y axis, measured from +Z towards +X.
pub fn azimuth(v: DVec3) -> f64 {
    v.x.atan2(v.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn assert_vec_close(a: DVec3, b: DVec3, eps: f64) {
        assert!(
            (a - b).length() <= eps,
            "expected {a:?} ~= {b:?} (diff {})",
            (a - b).length()
        );
    }

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::new(90.5, 0.0),
            Err(Error::InvalidCoordinate {
                axis: Axis::Latitude,
                ..
            })
        ));
        assert!(matches!(
            GeoPoint::new(0.0, -180.01),
            Err(Error::InvalidCoordinate {
                axis: Axis::Longitude,
                ..
            })
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_poles_map_to_polar_axis() {
        let offset = UvOffset::default();
        assert_vec_close(to_direction(point(90.0, 0.0), offset), DVec3::Y, 1e-12);
        assert_vec_close(
            to_direction(point(-90.0, 45.0), offset),
            DVec3::NEG_Y,
            1e-12,
        );
    }

    #[test]
    fn test_offset_rotates_longitude() {
        let base = to_direction(point(10.0, 20.0), UvOffset::new(0.0, 180.0));
        let shifted = to_direction(point(10.0, 0.0), UvOffset::new(20.0, 180.0));
        assert_vec_close(base, shifted, 1e-12);
    }

    #[test]
    fn test_to_position_scales_direction() {
        let p = point(40.7, -74.0);
        let pos = to_position(p, UvOffset::default(), 1.02);
        assert!((pos.length() - 1.02).abs() < 1e-12);
    }

    #[test]
    fn test_haversine_identical_points_is_zero() {
        let p = point(51.5, -0.12);
        assert_eq!(haversine_distance_km(p, p), 0.0);
    }

    #[test]
    fn test_haversine_new_york_london() {
        let d = haversine_distance_km(point(40.7, -74.0), point(51.5, -0.12));
        assert!((d - 5570.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_haversine_antipodal_is_half_circumference() {
        let d = haversine_distance_km(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_slerp_endpoints() {
        let offset = UvOffset::default();
        let a = to_direction(point(40.7, -74.0), offset);
        let b = to_direction(point(35.7, 139.7), offset);
        assert_vec_close(slerp(a, b, 0.0), a, 1e-12);
        assert_vec_close(slerp(a, b, 1.0), b, 1e-12);
    }

    #[test]
    fn test_slerp_identical_inputs() {
        let v = DVec3::new(1.0, 2.0, 3.0).normalize();
        for t in [0.0, 0.25, 0.5, 1.0] {
            assert_vec_close(slerp(v, v, t), v, 1e-12);
        }
    }

    #[test]
    fn test_slerp_antipodal_stays_on_sphere() {
        let a = DVec3::Z;
        let b = DVec3::NEG_Z;
        for t in [0.0, 0.3, 0.5, 0.9, 1.0] {
            let v = slerp(a, b, t);
            assert!(v.is_finite());
            assert!((v.length() - 1.0).abs() < 1e-12);
        }
        assert_vec_close(slerp(a, b, 1.0), b, 1e-9);
    }

    #[test]
    fn test_midpoint_of_quarter_circle() {
        let mid = great_circle_midpoint(DVec3::X, DVec3::Z);
        let expected = DVec3::new(1.0, 0.0, 1.0).normalize();
        assert_vec_close(mid, expected, 1e-12);
    }

    #[test]
    fn test_azimuth_axes() {
        assert!(azimuth(DVec3::Z).abs() < 1e-12);
        assert!((azimuth(DVec3::X) - PI / 2.0).abs() < 1e-12);
        assert!((azimuth(DVec3::NEG_X) + PI / 2.0).abs() < 1e-12);
    }

    fn lat_lon() -> impl Strategy<Value = (f64, f64)> {
        (-90.0..=90.0f64, -180.0..=180.0f64)
    }

    proptest! {
        #[test]
        fn prop_direction_is_unit((lat, lon) in lat_lon()) {
            let v = to_direction(point(lat, lon), UvOffset::default());
            prop_assert!((v.length() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_haversine_is_symmetric(a in lat_lon(), b in lat_lon()) {
            let (pa, pb) = (point(a.0, a.1), point(b.0, b.1));
            let d1 = haversine_distance_km(pa, pb);
            let d2 = haversine_distance_km(pb, pa);
            prop_assert!(d1 >= 0.0);
            prop_assert!((d1 - d2).abs() < 1e-9);
        }

        #[test]
        fn prop_slerp_is_unit_and_hits_endpoints(
            a in lat_lon(),
            b in lat_lon(),
            t in 0.0..=1.0f64,
        ) {
            let offset = UvOffset::default();
            let va = to_direction(point(a.0, a.1), offset);
            let vb = to_direction(point(b.0, b.1), offset);
            prop_assert!((slerp(va, vb, t).length() - 1.0).abs() < 1e-9);
            prop_assert!((slerp(va, vb, 0.0) - va).length() < 1e-9);
            prop_assert!((slerp(va, vb, 1.0) - vb).length() < 1e-6);
        }
    }
}
