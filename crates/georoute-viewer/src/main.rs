//! Interactive globe for plotting great-circle routes using Bevy.
//!
//! Pick two cities (or type coordinates) to draw the great-circle arc
//! between them, read off the distance and estimated travel time, and watch
//! the camera swing round to face the route.

mod camera;
mod globe;
mod launch_params;
mod route;
mod ui;

use bevy::prelude::*;
use camera::OrbitCameraPlugin;
use globe::GlobePlugin;
use route::{RoutePlugin, RouteState};
use ui::RouteUiPlugin;

/// Plugin for the main application.
pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GlobePlugin, OrbitCameraPlugin, RoutePlugin, RouteUiPlugin));
    }
}

fn main() {
    // Initialize tracing for native platforms.
    #[cfg(not(target_family = "wasm"))]
    {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    // Initialize tracing for WASM (logs to browser console).
    #[cfg(target_family = "wasm")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let params = launch_params::parse();
    tracing::info!(
        "Starting with {} -> {} by {}",
        params.city_a,
        params.city_b,
        params.mode
    );

    let route = match RouteState::new(&params) {
        Ok(route) => route,
        Err(e) => {
            tracing::error!("Cannot start: {e}");
            return;
        }
    };

    let mut app = App::new();

    #[allow(unused_mut)]
    let mut window = Window {
        title: "georoute".to_string(),
        resolution: (1280, 720).into(),
        ..Default::default()
    };

    // WASM: Fit canvas to parent element and prevent browser event handling.
    #[cfg(target_family = "wasm")]
    {
        window.fit_canvas_to_parent = true;
        window.prevent_default_event_handling = true;
    }

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(window),
        ..Default::default()
    }));

    app.insert_resource(params)
        .insert_resource(route)
        .add_plugins(AppPlugin)
        .run();
}
