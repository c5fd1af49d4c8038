//! Ownership of the two route markers and the arc between them.
//!
//! ## State machine
//!
//! Each slot is either `Empty` or `Placed`. The arc is a derived state: it
//! exists exactly when both slots are `Placed`.
//!
//! ```text
//! Empty  --set_marker(valid)-->   Placed
//! Placed --set_marker(valid)-->   Placed   (old marker disposed first)
//! *      --set_marker(invalid)--> Empty
//! *      --clear_marker/clear_all--> Empty
//! ```
//!
//! Every transition disposes the previous arc before anything else happens,
//! so no arc can outlive either of its endpoints.

use std::fmt;

use glam::DVec3;

use crate::arc::{GreatCircleArc, build_arc};
use crate::config::GlobeConfig;
use crate::error::Result;
use crate::geo::{GeoPoint, to_direction};
use crate::scene::SceneGraph;

/// Which of the two route endpoints a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerId {
    A,
    B,
}

impl MarkerId {
    pub const BOTH: [MarkerId; 2] = [MarkerId::A, MarkerId::B];

    fn index(self) -> usize {
        match self {
            MarkerId::A => 0,
            MarkerId::B => 1,
        }
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerId::A => f.write_str("A"),
            MarkerId::B => f.write_str("B"),
        }
    }
}

/// A placed marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub id: MarkerId,
    pub point: GeoPoint,
    /// Position in globe space, at the marker radius.
    pub position: DVec3,
    pub color: u32,
}

impl Marker {
    /// Unit direction from the globe center to the marker.
    pub fn direction(&self) -> DVec3 {
        self.position.normalize()
    }
}

enum Slot<H> {
    Empty,
    Placed { marker: Marker, handle: H },
}

struct PlacedArc<H> {
    arc: GreatCircleArc,
    handle: H,
}

/// Owns the markers and arc drawn on the globe, and their scene handles.
///
/// Nothing outside the store mutates marker state; hosts read it through
/// the accessors.
pub struct MarkerStore<H> {
    config: GlobeConfig,
    slots: [Slot<H>; 2],
    arc: Option<PlacedArc<H>>,
}

impl<H> MarkerStore<H> {
    pub fn new(config: GlobeConfig) -> Self {
        Self {
            config,
            slots: [Slot::Empty, Slot::Empty],
            arc: None,
        }
    }

    /// The configuration markers and arcs are built with.
    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    /// Place (or move) a marker.
    ///
    /// On invalid coordinates the slot is left empty and the error is
    /// returned; the previous marker in that slot is gone either way.
    pub fn set_marker<S>(
        &mut self,
        scene: &mut S,
        id: MarkerId,
        lat: f64,
        lon: f64,
    ) -> Result<Marker>
    where
        S: SceneGraph<Handle = H>,
    {
        self.dispose_arc(scene);
        self.dispose_slot(scene, id);

        let point = match GeoPoint::new(lat, lon) {
            Ok(point) => point,
            Err(e) => {
                tracing::warn!("Marker {id} not placed: {e}");
                return Err(e);
            }
        };

        let position = to_direction(point, self.config.uv_offset) * self.config.marker_radius();
        let color = match id {
            MarkerId::A => self.config.marker_a_color,
            MarkerId::B => self.config.marker_b_color,
        };
        let handle = scene.add_marker(position, color);
        tracing::debug!("Placed marker {id} at ({lat:.4}, {lon:.4})");

        let marker = Marker {
            id,
            point,
            position,
            color,
        };
        self.slots[id.index()] = Slot::Placed { marker, handle };
        self.rebuild_arc(scene);

        Ok(marker)
    }

    /// Remove one marker (and therefore the arc).
    pub fn clear_marker<S>(&mut self, scene: &mut S, id: MarkerId)
    where
        S: SceneGraph<Handle = H>,
    {
        self.dispose_arc(scene);
        self.dispose_slot(scene, id);
    }

    /// Remove both markers and the arc.
    pub fn clear_all<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Handle = H>,
    {
        self.dispose_arc(scene);
        for id in MarkerId::BOTH {
            self.dispose_slot(scene, id);
        }
    }

    /// The marker in `id`'s slot, if placed.
    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        match &self.slots[id.index()] {
            Slot::Placed { marker, .. } => Some(marker),
            Slot::Empty => None,
        }
    }

    /// Both markers, if both are placed.
    pub fn pair(&self) -> Option<(&Marker, &Marker)> {
        self.marker(MarkerId::A).zip(self.marker(MarkerId::B))
    }

    /// The current arc, present exactly when both markers are placed.
    pub fn arc(&self) -> Option<&GreatCircleArc> {
        self.arc.as_ref().map(|placed| &placed.arc)
    }

    pub fn has_arc(&self) -> bool {
        self.arc.is_some()
    }

    /// Number of placed markers (0, 1 or 2).
    pub fn placed_count(&self) -> usize {
        MarkerId::BOTH
            .into_iter()
            .filter(|id| self.marker(*id).is_some())
            .count()
    }

    fn rebuild_arc<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Handle = H>,
    {
        self.dispose_arc(scene);

        let Some((a, b)) = self.pair() else {
            return;
        };
        let arc = build_arc(
            a.point,
            b.point,
            self.config.arc_settings(),
            self.config.uv_offset,
        );
        let handle = scene.add_polyline(arc.points(), self.config.arc_color);
        tracing::debug!("Built arc with {} segments", arc.segment_count());
        self.arc = Some(PlacedArc { arc, handle });
    }

    fn dispose_arc<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Handle = H>,
    {
        if let Some(placed) = self.arc.take() {
            scene.remove(placed.handle);
        }
    }

    fn dispose_slot<S>(&mut self, scene: &mut S, id: MarkerId)
    where
        S: SceneGraph<Handle = H>,
    {
        let slot = std::mem::replace(&mut self.slots[id.index()], Slot::Empty);
        if let Slot::Placed { handle, .. } = slot {
            scene.remove(handle);
        }
    }
}
