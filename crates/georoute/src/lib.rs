//! Great-circle routing between two points on an interactive globe.
//!
//! This crate holds everything about a route that is not rendering: the
//! geographic math, the arc polyline, travel-time estimates, marker
//! ownership and the eased camera swing toward a route. Hosts plug in a
//! renderer through [`SceneGraph`] and a text UI through [`RouteDisplay`].
//!
//! # Design principles
//!
//! - **Renderer-agnostic**: markers and arcs are added and removed through handles
//! - **Frame-driven**: animation and debouncing take the time from a [`Clock`]
//! - **Recoverable input**: bad coordinates clear a marker, they never panic
//!
//! # Example
//!
//! ```ignore
//! use georoute::{GlobeConfig, HeadlessScene, ManualClock, OrbitCamera, RouteInputs,
//!     RoutePlanner, RouteReadout};
//!
//! let mut planner = RoutePlanner::new(GlobeConfig::default())?;
//! let mut scene = HeadlessScene::new();
//! let mut readout = RouteReadout::default();
//! let camera = OrbitCamera::new(DVec3::new(0.0, 0.0, 4.0), DVec3::ZERO);
//!
//! let inputs = RouteInputs::new(40.7, -74.0, 51.5, -0.12);
//! planner.update_from_inputs(&mut scene, &inputs, camera, &ManualClock::new(0.0), &mut readout);
//! // readout.distance == Some("Distance: 5571.49 km")
//! ```

pub mod arc;
pub mod cities;
pub mod clock;
pub mod config;
pub mod constants;
pub mod debounce;
mod error;
pub mod geo;
pub mod markers;
pub mod orbit;
pub mod planner;
pub mod scene;
pub mod travel;

pub use arc::{ArcSettings, GreatCircleArc, build_arc};
pub use cities::{CITIES, City};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::GlobeConfig;
pub use debounce::Debouncer;
pub use error::{Axis, Error, Result};
pub use geo::{GeoPoint, UvOffset};
pub use markers::{Marker, MarkerId, MarkerStore};
pub use orbit::{OrbitAnimator, OrbitCamera};
pub use planner::{RouteDisplay, RouteInputs, RoutePlanner, RouteReadout};
pub use scene::{Drawable, HeadlessScene, SceneGraph};
pub use travel::{RouteMode, TravelDuration};
