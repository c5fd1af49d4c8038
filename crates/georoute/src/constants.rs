//! Shared physical and rendering constants.

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Radius of the rendered globe in scene units.
pub const GLOBE_RADIUS: f64 = 1.0;

/// Outward offset applied to markers and arcs so they sit above the surface.
pub const SURFACE_OFFSET: f64 = 1.02;

/// Arc subdivision used when drawing the route between two markers.
pub const DEFAULT_ARC_SEGMENTS: u32 = 160;

/// Angular separation (radians) below which two directions are treated as equal.
pub const DEGENERATE_ANGLE_EPSILON: f64 = 1e-6;

/// Tolerance (degrees) when matching typed coordinates against a named city.
pub const CITY_MATCH_EPSILON_DEG: f64 = 1e-6;

/// Default camera re-orientation duration in seconds.
pub const DEFAULT_ORBIT_DURATION_SECS: f64 = 0.9;

/// Default input debounce delay in seconds.
pub const DEFAULT_DEBOUNCE_SECS: f64 = 0.15;

/// Colour of marker A (0xRRGGBB).
pub const MARKER_A_COLOR: u32 = 0x44_ff_88;

/// Colour of marker B (0xRRGGBB).
pub const MARKER_B_COLOR: u32 = 0xff_44_44;

/// Colour of the great-circle arc (0xRRGGBB).
pub const ARC_COLOR: u32 = 0xff_ff_00;
