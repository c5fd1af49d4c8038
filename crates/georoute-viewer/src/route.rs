//! Route state and the frame-driven update loop.
//!
//! Field edits only arm the planner's debouncer; the recompute runs here once
//! edits pause, against the live globe scene.

use bevy::prelude::*;
use georoute::cities::{City, find_city};
use georoute::{ManualClock, OrbitCamera, RouteInputs, RouteMode, RoutePlanner, RouteReadout};

use crate::camera::OrbitController;
use crate::globe::GlobeScene;
use crate::launch_params::LaunchParams;

/// Plugin for route planning.
pub struct RoutePlugin;

impl Plugin for RoutePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, request_initial_route)
            .add_systems(Update, run_route_update);
    }
}

/// A clock reading Bevy's frame time.
pub fn frame_clock(time: &Time) -> ManualClock {
    ManualClock::new(time.elapsed_secs_f64())
}

/// Text of the four coordinate fields.
#[derive(Debug, Clone, Default)]
pub struct RouteFields {
    pub lat_a: String,
    pub lon_a: String,
    pub lat_b: String,
    pub lon_b: String,
}

impl RouteFields {
    pub fn inputs(&self) -> RouteInputs {
        RouteInputs::parse(&self.lat_a, &self.lon_a, &self.lat_b, &self.lon_b)
    }

    pub fn set_a(&mut self, city: &City) {
        self.lat_a = city.lat.to_string();
        self.lon_a = city.lon.to_string();
    }

    pub fn set_b(&mut self, city: &City) {
        self.lat_b = city.lat.to_string();
        self.lon_b = city.lon.to_string();
    }
}

/// Everything the route panel and the update loop share.
#[derive(Resource)]
pub struct RouteState {
    pub planner: RoutePlanner<Entity>,
    pub readout: RouteReadout,
    pub fields: RouteFields,
    pub mode: RouteMode,
}

impl RouteState {
    /// Build the initial state, prefilling the fields from the launch cities.
    pub fn new(params: &LaunchParams) -> georoute::Result<Self> {
        let mut planner = RoutePlanner::new(params.config.clone())?;
        let mut readout = RouteReadout::default();
        planner.set_route_mode(params.mode.key(), &mut readout);

        let mut fields = RouteFields::default();
        match find_city(&params.city_a) {
            Some(city) => fields.set_a(city),
            None => tracing::warn!("Unknown city {:?} for A", params.city_a),
        }
        match find_city(&params.city_b) {
            Some(city) => fields.set_b(city),
            None => tracing::warn!("Unknown city {:?} for B", params.city_b),
        }

        Ok(Self {
            planner,
            readout,
            fields,
            mode: params.mode,
        })
    }
}

#[allow(clippy::needless_pass_by_value)]
fn request_initial_route(time: Res<Time>, mut state: ResMut<RouteState>) {
    state.planner.request_update(&frame_clock(&time));
}

/// Recompute the route once pending edits are due.
#[allow(clippy::needless_pass_by_value)]
fn run_route_update(
    time: Res<Time>,
    mut state: ResMut<RouteState>,
    mut scene: GlobeScene,
    camera: Query<(&Transform, &OrbitController)>,
) {
    let clock = frame_clock(&time);
    if !state.planner.poll_update(&clock) {
        return;
    }
    let Ok((transform, controller)) = camera.single() else {
        return;
    };

    let pose = OrbitCamera::new(
        transform.translation.as_dvec3(),
        controller.target.as_dvec3(),
    );
    let RouteState {
        planner,
        readout,
        fields,
        ..
    } = &mut *state;
    let inputs = fields.inputs();
    if let Some(distance) = planner.update_from_inputs(&mut scene, &inputs, pose, &clock, readout)
    {
        tracing::info!("Route updated: {distance:.2} km");
    }
}
