//! Great-circle arc polylines between two geographic points.

use glam::DVec3;

use crate::constants::{DEFAULT_ARC_SEGMENTS, GLOBE_RADIUS, SURFACE_OFFSET};
use crate::geo::{GeoPoint, UvOffset, slerp, to_direction};

/// Subdivision and placement of an arc polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSettings {
    /// Number of segments; the polyline has `segments + 1` samples.
    pub segments: u32,
    /// Distance of every sample from the globe center.
    pub radius: f64,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            segments: DEFAULT_ARC_SEGMENTS,
            radius: GLOBE_RADIUS * SURFACE_OFFSET,
        }
    }
}

/// A polyline approximating the shortest path between two points on the globe.
///
/// Arcs are immutable: a route change builds a new arc.
#[derive(Debug, Clone, PartialEq)]
pub struct GreatCircleArc {
    points: Vec<DVec3>,
}

impl GreatCircleArc {
    /// The ordered samples, from the start point to the end point.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Number of segments between consecutive samples.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// The sample at the middle of the arc.
    pub fn midpoint(&self) -> DVec3 {
        self.points[self.points.len() / 2]
    }
}

/// Build the great-circle arc from `from` to `to`.
///
/// A segment count of zero is treated as one, so the arc always contains
/// both endpoints.
pub fn build_arc(
    from: GeoPoint,
    to: GeoPoint,
    settings: ArcSettings,
    offset: UvOffset,
) -> GreatCircleArc {
    let segments = settings.segments.max(1);
    let start = to_direction(from, offset);
    let end = to_direction(to, offset);

    let points = (0..=segments)
        .map(|i| {
            let t = f64::from(i) / f64::from(segments);
            slerp(start, end, t) * settings.radius
        })
        .collect();

    GreatCircleArc { points }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_arc_has_segments_plus_one_samples() {
        let settings = ArcSettings {
            segments: 128,
            radius: 1.02,
        };
        let arc = build_arc(
            point(40.7, -74.0),
            point(51.5, -0.12),
            settings,
            UvOffset::default(),
        );
        assert_eq!(arc.points().len(), 129);
        assert_eq!(arc.segment_count(), 128);
    }

    #[test]
    fn test_arc_endpoints_match_scaled_directions() {
        let offset = UvOffset::default();
        let settings = ArcSettings::default();
        let (a, b) = (point(-33.9, 151.2), point(55.8, 37.6));
        let arc = build_arc(a, b, settings, offset);

        let first = *arc.points().first().unwrap();
        let last = *arc.points().last().unwrap();
        assert!((first - to_direction(a, offset) * settings.radius).length() < 1e-9);
        assert!((last - to_direction(b, offset) * settings.radius).length() < 1e-9);
    }

    #[test]
    fn test_arc_samples_lie_on_render_radius() {
        let settings = ArcSettings {
            segments: 16,
            radius: 1.5,
        };
        let arc = build_arc(
            point(10.0, 10.0),
            point(-10.0, -170.0),
            settings,
            UvOffset::default(),
        );
        for p in arc.points() {
            assert!((p.length() - 1.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_segments_is_treated_as_one() {
        let settings = ArcSettings {
            segments: 0,
            radius: 1.0,
        };
        let arc = build_arc(point(0.0, 0.0), point(0.0, 90.0), settings, UvOffset::default());
        assert_eq!(arc.points().len(), 2);
    }

    #[test]
    fn test_coincident_points_give_repeated_samples() {
        let p = point(48.85, 2.35);
        let settings = ArcSettings {
            segments: 8,
            radius: 1.02,
        };
        let arc = build_arc(p, p, settings, UvOffset::default());
        let first = arc.points()[0];
        for sample in arc.points() {
            assert!(sample.is_finite());
            assert!((*sample - first).length() < 1e-12);
        }
    }

    #[test]
    fn test_arc_is_deterministic() {
        let settings = ArcSettings::default();
        let build = || {
            build_arc(
                point(1.3, 103.8),
                point(-23.5, -46.6),
                settings,
                UvOffset::default(),
            )
        };
        assert_eq!(build(), build());
    }
}
