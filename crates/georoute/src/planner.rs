//! Route planning: from coordinate fields to markers, arc, readouts and
//! camera motion.

use glam::DVec3;

use crate::clock::Clock;
use crate::config::GlobeConfig;
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::geo::{azimuth, great_circle_midpoint, haversine_distance_km};
use crate::markers::{MarkerId, MarkerStore};
use crate::orbit::{OrbitAnimator, OrbitCamera};
use crate::scene::SceneGraph;
use crate::travel::{RouteMode, distance_text, travel_time_text};

/// Status shown when neither coordinate pair could be placed.
pub const NO_VALID_INPUT_MESSAGE: &str = "Enter at least one valid lat/lon pair";

/// Receives the planner's text output.
///
/// Every method defaults to doing nothing, so a host only implements the
/// readouts it actually has.
pub trait RouteDisplay {
    fn show_status(&mut self, _text: &str) {}
    fn show_distance(&mut self, _text: &str) {}
    fn show_travel_time(&mut self, _text: &str) {}
    fn clear_status(&mut self) {}
}

/// A display that discards everything.
impl RouteDisplay for () {}

/// A display that keeps the latest text of each readout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteReadout {
    pub status: Option<String>,
    pub distance: Option<String>,
    pub travel_time: Option<String>,
}

impl RouteDisplay for RouteReadout {
    fn show_status(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }

    fn show_distance(&mut self, text: &str) {
        self.distance = Some(text.to_string());
    }

    fn show_travel_time(&mut self, text: &str) {
        self.travel_time = Some(text.to_string());
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

/// Parse a coordinate field. Blank, malformed and non-finite text is `None`.
pub fn parse_coordinate(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// The four numeric fields as read from the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RouteInputs {
    pub lat_a: Option<f64>,
    pub lon_a: Option<f64>,
    pub lat_b: Option<f64>,
    pub lon_b: Option<f64>,
}

impl RouteInputs {
    pub fn new(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> Self {
        Self {
            lat_a: Some(lat_a),
            lon_a: Some(lon_a),
            lat_b: Some(lat_b),
            lon_b: Some(lon_b),
        }
    }

    /// Build inputs from raw field text.
    pub fn parse(lat_a: &str, lon_a: &str, lat_b: &str, lon_b: &str) -> Self {
        Self {
            lat_a: parse_coordinate(lat_a),
            lon_a: parse_coordinate(lon_a),
            lat_b: parse_coordinate(lat_b),
            lon_b: parse_coordinate(lon_b),
        }
    }

    /// The (lat, lon) pair for a marker, if both fields hold numbers.
    pub fn pair(&self, id: MarkerId) -> Option<(f64, f64)> {
        match id {
            MarkerId::A => self.lat_a.zip(self.lon_a),
            MarkerId::B => self.lat_b.zip(self.lon_b),
        }
    }
}

/// Drives one route: markers, arc, distance, travel time and camera.
pub struct RoutePlanner<H> {
    markers: MarkerStore<H>,
    animator: OrbitAnimator,
    debouncer: Debouncer,
    mode: String,
    last_distance_km: Option<f64>,
}

impl<H> RoutePlanner<H> {
    pub fn new(config: GlobeConfig) -> Result<Self> {
        config.validate()?;
        let debouncer = Debouncer::new(config.debounce_secs);
        Ok(Self {
            markers: MarkerStore::new(config),
            animator: OrbitAnimator::new(),
            debouncer,
            mode: RouteMode::default().key().to_string(),
            last_distance_km: None,
        })
    }

    pub fn markers(&self) -> &MarkerStore<H> {
        &self.markers
    }

    pub fn config(&self) -> &GlobeConfig {
        self.markers.config()
    }

    /// The selected route mode key, exactly as it was given.
    pub fn route_mode(&self) -> &str {
        &self.mode
    }

    /// Distance of the last complete route, kept across partial updates.
    pub fn last_distance_km(&self) -> Option<f64> {
        self.last_distance_km
    }

    /// Recompute markers, arc and readouts from the input fields.
    ///
    /// Both markers are cleared and the valid pairs re-placed, so an
    /// invalid field removes its marker (and the arc). When both markers
    /// are placed the camera swings toward the midpoint of the route.
    /// Returns the route distance when there is one.
    pub fn update_from_inputs<S, C, D>(
        &mut self,
        scene: &mut S,
        inputs: &RouteInputs,
        camera: OrbitCamera,
        clock: &C,
        display: &mut D,
    ) -> Option<f64>
    where
        S: SceneGraph<Handle = H>,
        C: Clock + ?Sized,
        D: RouteDisplay + ?Sized,
    {
        display.clear_status();
        self.markers.clear_all(scene);

        let mut placed = 0;
        for id in MarkerId::BOTH {
            let Some((lat, lon)) = inputs.pair(id) else {
                tracing::debug!("Marker {id} has blank fields");
                continue;
            };
            if self.markers.set_marker(scene, id, lat, lon).is_ok() {
                placed += 1;
            }
        }

        if placed == 0 {
            display.show_status(NO_VALID_INPUT_MESSAGE);
            return None;
        }

        let (a, b) = self.markers.pair()?;
        let distance = haversine_distance_km(a.point, b.point);
        let midpoint = great_circle_midpoint(a.direction(), b.direction());

        if let Some(toward_midpoint) = (midpoint - camera.target).try_normalize() {
            self.animator.start(
                camera,
                azimuth(toward_midpoint),
                clock.now_secs(),
                self.markers.config().orbit_duration_secs,
            );
        }

        tracing::debug!("Route {} -> {}: {distance:.2} km", a.point, b.point);
        self.last_distance_km = Some(distance);
        display.show_distance(&distance_text(distance));
        display.show_travel_time(&travel_time_text(&self.mode, Some(distance)));

        Some(distance)
    }

    /// Change the route mode and refresh the travel time from the last
    /// computed distance. Markers and arc are left untouched.
    pub fn set_route_mode<D>(&mut self, mode: &str, display: &mut D)
    where
        D: RouteDisplay + ?Sized,
    {
        if mode.parse::<RouteMode>().is_err() {
            tracing::warn!("Unknown route mode {mode:?}, travel time unavailable");
        }
        self.mode = mode.to_string();
        display.show_travel_time(&travel_time_text(&self.mode, self.last_distance_km));
    }

    /// Note an input edit. The update fires once edits pause for the
    /// configured debounce delay.
    pub fn request_update<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.debouncer.trigger(clock.now_secs());
    }

    /// True once per burst of edits, when the update is due.
    pub fn poll_update<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        self.debouncer.poll(clock.now_secs())
    }

    /// Advance the camera animation; returns the new camera position.
    pub fn step_camera<C: Clock + ?Sized>(&mut self, clock: &C) -> Option<DVec3> {
        self.animator.step(clock.now_secs())
    }

    /// Stop any camera animation, e.g. when the user grabs the camera.
    pub fn cancel_camera(&mut self) {
        if self.animator.is_active() {
            tracing::debug!("Camera animation cancelled by user input");
        }
        self.animator.cancel();
    }

    pub fn is_camera_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// Remove everything the planner put in the scene.
    pub fn clear<S>(&mut self, scene: &mut S)
    where
        S: SceneGraph<Handle = H>,
    {
        self.markers.clear_all(scene);
    }
}
