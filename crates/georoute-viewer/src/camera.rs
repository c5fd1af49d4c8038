//! Orbit camera around the globe.
//!
//! Left-drag orbits, the scroll wheel zooms. Either one takes over from an
//! in-flight re-orientation animation.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::route::{RouteState, frame_clock};

/// Starting distance from the globe center.
pub const START_DISTANCE: f32 = 4.0;
/// Closest zoom, in globe units from the center.
pub const MIN_DISTANCE: f32 = 1.3;
/// Farthest zoom.
pub const MAX_DISTANCE: f32 = 20.0;
/// Keeps the camera off the poles so `look_at` stays well defined.
const MAX_POLAR_Y: f32 = 0.99;

/// Plugin for the orbit camera.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_input, animate_orbit).chain());
    }
}

/// Settings for orbit input.
#[derive(Resource)]
pub struct OrbitSettings {
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Zoom factor per scroll line.
    pub zoom_step: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.005,
            zoom_step: 1.1,
        }
    }
}

/// The camera entity and the point it orbits.
#[derive(Component)]
pub struct OrbitController {
    pub target: Vec3,
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: bevy::camera::ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, START_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        Projection::Perspective(PerspectiveProjection {
            fov: 35_f32.to_radians(),
            near: 0.1,
            far: 1_000.0,
            ..Default::default()
        }),
        OrbitController { target: Vec3::ZERO },
    ));

    tracing::info!("Camera ready - drag to orbit, scroll to zoom");
}

/// Rotate `offset` by `yaw` around +Y and `pitch` toward the poles.
///
/// The length is preserved and the height is clamped short of the poles.
pub fn orbit_offset(offset: Vec3, yaw: f32, pitch: f32) -> Vec3 {
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return offset;
    }
    let dir = offset / radius;

    let max_elevation = MAX_POLAR_Y.asin();
    let azimuth = dir.x.atan2(dir.z) + yaw;
    let elevation = (dir.y.clamp(-1.0, 1.0).asin() + pitch).clamp(-max_elevation, max_elevation);
    let y = elevation.sin();
    let horizontal = (1.0 - y * y).sqrt();

    Vec3::new(azimuth.sin() * horizontal, y, azimuth.cos() * horizontal) * radius
}

/// Scale the distance by `factor`, clamped to the zoom limits.
pub fn zoom_offset(offset: Vec3, factor: f32) -> Vec3 {
    let distance = (offset.length() * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    offset.normalize_or(Vec3::Z) * distance
}

/// Apply drag and scroll input.
#[allow(clippy::needless_pass_by_value)]
fn orbit_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mut scroll_events: MessageReader<MouseWheel>,
    mouse: Res<ButtonInput<MouseButton>>,
    settings: Res<OrbitSettings>,
    mut contexts: EguiContexts,
    mut route: ResMut<RouteState>,
    mut query: Query<(&mut Transform, &OrbitController)>,
) {
    let mut drag = Vec2::ZERO;
    for event in mouse_motion.read() {
        drag += event.delta;
    }
    let mut scroll = 0.0;
    for event in scroll_events.read() {
        // Normalize scroll value: web reports pixels, native reports lines.
        scroll += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 120.0,
        };
    }

    let egui_wants_pointer = contexts
        .ctx_mut()
        .ok()
        .is_some_and(|ctx| ctx.is_pointer_over_area() || ctx.is_using_pointer());
    if egui_wants_pointer {
        return;
    }

    let dragging = mouse.pressed(MouseButton::Left) && drag != Vec2::ZERO;
    if !dragging && scroll == 0.0 {
        return;
    }
    route.planner.cancel_camera();

    for (mut transform, controller) in &mut query {
        let mut offset = transform.translation - controller.target;
        if dragging {
            offset = orbit_offset(
                offset,
                -drag.x * settings.drag_sensitivity,
                drag.y * settings.drag_sensitivity,
            );
        }
        if scroll != 0.0 {
            offset = zoom_offset(offset, settings.zoom_step.powf(-scroll));
        }
        transform.translation = controller.target + offset;
        transform.look_at(controller.target, Vec3::Y);
    }
}

/// Move the camera along the planner's re-orientation animation.
#[allow(clippy::needless_pass_by_value)]
fn animate_orbit(
    time: Res<Time>,
    mut route: ResMut<RouteState>,
    mut query: Query<(&mut Transform, &OrbitController)>,
) {
    let Some(position) = route.planner.step_camera(&frame_clock(&time)) else {
        return;
    };
    for (mut transform, controller) in &mut query {
        transform.translation = position.as_vec3();
        transform.look_at(controller.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_offset_keeps_distance() {
        let offset = Vec3::new(0.0, 1.0, 3.0);
        let rotated = orbit_offset(offset, 0.7, -0.3);
        assert!((rotated.length() - offset.length()).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_offset_yaw_only_keeps_height() {
        let offset = Vec3::new(1.0, 2.0, 3.0);
        let rotated = orbit_offset(offset, 1.2, 0.0);
        assert!((rotated.y - offset.y).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_offset_stops_short_of_pole() {
        let rotated = orbit_offset(Vec3::new(0.0, 0.0, 4.0), 0.0, 10.0);
        assert!((rotated.y / rotated.length() - MAX_POLAR_Y).abs() < 1e-4);
        let rotated = orbit_offset(Vec3::new(0.0, 0.0, 4.0), 0.0, -10.0);
        assert!((rotated.y / rotated.length() + MAX_POLAR_Y).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let offset = Vec3::new(0.0, 0.0, START_DISTANCE);
        assert!((zoom_offset(offset, 100.0).length() - MAX_DISTANCE).abs() < 1e-4);
        assert!((zoom_offset(offset, 0.01).length() - MIN_DISTANCE).abs() < 1e-4);
        assert!((zoom_offset(offset, 0.5).length() - 2.0).abs() < 1e-4);
    }
}
