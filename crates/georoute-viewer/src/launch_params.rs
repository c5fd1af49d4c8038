//! Launch parameter parsing for the viewer.
//!
//! On native, parameters are parsed from command-line arguments using clap.
//! On WASM, defaults are used (CLI argument parsing is not available).

use std::fmt;

use bevy::prelude::*;
use georoute::{GlobeConfig, RouteMode};

/// Default city for marker A.
const DEFAULT_CITY_A: &str = "New York";
/// Default city for marker B.
const DEFAULT_CITY_B: &str = "London";

/// Launch parameters for the viewer.
#[derive(Resource, Debug, Clone)]
pub struct LaunchParams {
    /// City prefilled into the A fields.
    pub city_a: String,
    /// City prefilled into the B fields.
    pub city_b: String,
    /// Initially selected route mode.
    pub mode: RouteMode,
    /// Globe configuration, with any CLI overrides applied.
    pub config: GlobeConfig,
}

impl Default for LaunchParams {
    fn default() -> Self {
        Self {
            city_a: DEFAULT_CITY_A.to_string(),
            city_b: DEFAULT_CITY_B.to_string(),
            mode: RouteMode::default(),
            config: GlobeConfig::default(),
        }
    }
}

/// Why a config file could not be used.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(georoute::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Json(e) => write!(f, "failed to parse config: {e}"),
            Self::Invalid(e) => write!(f, "unusable config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<georoute::Error> for ConfigError {
    fn from(e: georoute::Error) -> Self {
        Self::Invalid(e)
    }
}

/// Parse a JSON globe config. Missing fields keep their defaults.
pub fn parse_config(json: &str) -> Result<GlobeConfig, ConfigError> {
    let config: GlobeConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::*;

    fn parse_mode(s: &str) -> Result<RouteMode, String> {
        s.parse::<RouteMode>().map_err(|e| e.to_string())
    }

    fn load_config(path: &Path) -> Result<GlobeConfig, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        parse_config(&json)
    }

    #[derive(Parser)]
    #[command(about = "Interactive globe for plotting great-circle routes")]
    struct CliArgs {
        /// City prefilled into the A fields.
        #[arg(long, default_value = DEFAULT_CITY_A)]
        city_a: String,

        /// City prefilled into the B fields.
        #[arg(long, default_value = DEFAULT_CITY_B)]
        city_b: String,

        /// Route mode used for the travel-time estimate.
        #[arg(long, value_parser = parse_mode, default_value = "airplane")]
        mode: RouteMode,

        /// Texture longitude offset in degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon_offset: Option<f64>,

        /// Texture latitude offset in degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat_offset: Option<f64>,

        /// Segments per great-circle arc.
        #[arg(long)]
        segments: Option<u32>,

        /// JSON file with globe configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    }

    pub fn parse() -> LaunchParams {
        let args = CliArgs::parse();

        let mut config = match &args.config {
            Some(path) => load_config(path).unwrap_or_else(|e| {
                tracing::error!("Ignoring {}: {e}", path.display());
                GlobeConfig::default()
            }),
            None => GlobeConfig::default(),
        };
        if let Some(lon) = args.lon_offset {
            config.uv_offset.lon = lon;
        }
        if let Some(lat) = args.lat_offset {
            config.uv_offset.lat = lat;
        }
        if let Some(segments) = args.segments {
            config.arc_segments = segments;
        }
        if let Err(e) = config.validate() {
            tracing::error!("Invalid command-line overrides ({e}), using defaults");
            config = GlobeConfig::default();
        }

        LaunchParams {
            city_a: args.city_a,
            city_b: args.city_b,
            mode: args.mode,
            config,
        }
    }
}

/// Parse launch parameters from CLI args (native) or use defaults (WASM).
pub fn parse() -> LaunchParams {
    #[cfg(not(target_family = "wasm"))]
    {
        native::parse()
    }
    #[cfg(target_family = "wasm")]
    {
        LaunchParams::default()
    }
}
