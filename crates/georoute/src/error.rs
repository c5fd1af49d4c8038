//! Error types for the georoute crate.

use std::fmt;

/// Result type for georoute operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which half of a coordinate pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => f.write_str("latitude"),
            Axis::Longitude => f.write_str("longitude"),
        }
    }
}

/// Errors that can occur in georoute operations.
///
/// None of these are fatal for an interactive host: they describe input the
/// core refused, and the caller keeps running with the previous valid state.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Latitude or longitude outside its domain, or not a finite number.
    InvalidCoordinate {
        /// The rejected axis.
        axis: Axis,
        /// The rejected value.
        value: f64,
    },
    /// Route mode key not present in the speed table.
    UnknownRouteMode(String),
    /// Configuration value that cannot be used.
    InvalidConfig {
        /// The offending field.
        field: &'static str,
        /// Description of what was invalid.
        detail: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCoordinate { axis, value } => {
                let (min, max) = match axis {
                    Axis::Latitude => (-90, 90),
                    Axis::Longitude => (-180, 180),
                };
                write!(f, "invalid {axis} {value}: expected a value in [{min}, {max}]")
            }
            Error::UnknownRouteMode(mode) => write!(f, "unknown route mode '{mode}'"),
            Error::InvalidConfig { field, detail } => {
                write!(f, "invalid config field {field}: {detail}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_coordinate_message_names_range() {
        let err = Error::InvalidCoordinate {
            axis: Axis::Longitude,
            value: 200.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid longitude 200: expected a value in [-180, 180]"
        );
    }

    #[test]
    fn test_unknown_route_mode_message() {
        let err = Error::UnknownRouteMode("warp".to_string());
        assert_eq!(err.to_string(), "unknown route mode 'warp'");
    }
}
