//! The render-scene seam.
//!
//! The core never talks to a renderer directly. It asks a [`SceneGraph`] to
//! add drawables, keeps the returned handles, and hands them back for
//! disposal when the drawable is no longer wanted.

use glam::DVec3;

/// A scene that can host marker spheres and polylines on the globe.
///
/// Positions are in globe space (the globe centered at the origin with +Y as
/// the polar axis). Colours are `0xRRGGBB`.
pub trait SceneGraph {
    /// Handle identifying one drawable in this scene.
    type Handle;

    /// Add a marker sphere at `position`.
    fn add_marker(&mut self, position: DVec3, color: u32) -> Self::Handle;

    /// Add a line strip through `points`.
    fn add_polyline(&mut self, points: &[DVec3], color: u32) -> Self::Handle;

    /// Remove a drawable and release its render resources.
    fn remove(&mut self, handle: Self::Handle);
}

/// A drawable held by a [`HeadlessScene`].
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Marker { position: DVec3, color: u32 },
    Polyline { points: Vec<DVec3>, color: u32 },
}

/// An in-memory scene that records drawables without rendering them.
///
/// Useful for headless hosts and for inspecting what the core asked for.
#[derive(Debug, Default)]
pub struct HeadlessScene {
    next_handle: u64,
    live: Vec<(u64, Drawable)>,
    removed: usize,
}

impl HeadlessScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawables currently in the scene, in insertion order.
    pub fn drawables(&self) -> impl Iterator<Item = &Drawable> {
        self.live.iter().map(|(_, drawable)| drawable)
    }

    /// Number of live marker spheres.
    pub fn marker_count(&self) -> usize {
        self.drawables()
            .filter(|d| matches!(d, Drawable::Marker { .. }))
            .count()
    }

    /// Number of live polylines.
    pub fn polyline_count(&self) -> usize {
        self.drawables()
            .filter(|d| matches!(d, Drawable::Polyline { .. }))
            .count()
    }

    /// Total number of drawables removed over the scene's lifetime.
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    fn insert(&mut self, drawable: Drawable) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.push((handle, drawable));
        handle
    }
}

impl SceneGraph for HeadlessScene {
    type Handle = u64;

    fn add_marker(&mut self, position: DVec3, color: u32) -> u64 {
        self.insert(Drawable::Marker { position, color })
    }

    fn add_polyline(&mut self, points: &[DVec3], color: u32) -> u64 {
        self.insert(Drawable::Polyline {
            points: points.to_vec(),
            color,
        })
    }

    fn remove(&mut self, handle: u64) {
        let before = self.live.len();
        self.live.retain(|(h, _)| *h != handle);
        if self.live.len() < before {
            self.removed += 1;
        } else {
            tracing::warn!("Removing unknown drawable handle {handle}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_scene_tracks_live_drawables() {
        let mut scene = HeadlessScene::new();
        let marker = scene.add_marker(DVec3::X, 0xff_00_00);
        let line = scene.add_polyline(&[DVec3::X, DVec3::Y], 0x00_ff_00);
        assert_eq!(scene.marker_count(), 1);
        assert_eq!(scene.polyline_count(), 1);

        scene.remove(marker);
        assert_eq!(scene.marker_count(), 0);
        assert_eq!(scene.removed_count(), 1);

        scene.remove(line);
        assert_eq!(scene.drawables().count(), 0);
        assert_eq!(scene.removed_count(), 2);
    }

    #[test]
    fn test_removing_twice_is_counted_once() {
        let mut scene = HeadlessScene::new();
        let marker = scene.add_marker(DVec3::Z, 0);
        scene.remove(marker);
        scene.remove(marker);
        assert_eq!(scene.removed_count(), 1);
    }
}
