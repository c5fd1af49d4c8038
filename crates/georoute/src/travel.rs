//! Travel-time estimates for named transport modes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Placeholder shown when no travel time can be computed.
pub const UNAVAILABLE: &str = "\u{2014}";

/// Token shown for a duration that rounds to zero milliseconds.
pub const ZERO_DURATION: &str = "0 ms";

/// A named way of covering the distance, with a fixed cruising speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouteMode {
    Walk,
    Run,
    Cheetah,
    Train,
    #[default]
    Airplane,
    SoundAir,
    SoundWater,
    X43,
    Optic,
    Light,
}

impl RouteMode {
    /// Every mode, slowest first.
    pub const ALL: [RouteMode; 10] = [
        RouteMode::Walk,
        RouteMode::Run,
        RouteMode::Cheetah,
        RouteMode::Train,
        RouteMode::Airplane,
        RouteMode::SoundAir,
        RouteMode::SoundWater,
        RouteMode::X43,
        RouteMode::Optic,
        RouteMode::Light,
    ];

    /// Speed in km/h.
    pub fn speed_kmh(self) -> f64 {
        match self {
            // Preferred walking speed.
            RouteMode::Walk => 5.0,
            // Peak human footspeed.
            RouteMode::Run => 44.72,
            RouteMode::Cheetah => 104.0,
            // Shanghai maglev operating speed.
            RouteMode::Train => 300.0,
            // Typical airliner cruise.
            RouteMode::Airplane => 900.0,
            // Speed of sound in air at 20 °C.
            RouteMode::SoundAir => 1_235.0,
            // Speed of sound in fresh water.
            RouteMode::SoundWater => 5_331.0,
            // NASA X-43 record.
            RouteMode::X43 => 11_760.0,
            // Light in optical fiber, ~200,000 km/s.
            RouteMode::Optic => 200_000.0 * 3_600.0,
            RouteMode::Light => 299_792.458 * 3_600.0,
        }
    }

    /// Lookup key, as accepted by [`speed_for`] and `FromStr`.
    pub fn key(self) -> &'static str {
        match self {
            RouteMode::Walk => "walk",
            RouteMode::Run => "run",
            RouteMode::Cheetah => "cheetah",
            RouteMode::Train => "train",
            RouteMode::Airplane => "airplane",
            RouteMode::SoundAir => "soundair",
            RouteMode::SoundWater => "soundwater",
            RouteMode::X43 => "x43",
            RouteMode::Optic => "optic",
            RouteMode::Light => "light",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            RouteMode::Walk => "Walking",
            RouteMode::Run => "Running (top speed)",
            RouteMode::Cheetah => "Cheetah",
            RouteMode::Train => "Maglev train",
            RouteMode::Airplane => "Airplane",
            RouteMode::SoundAir => "Sound in air",
            RouteMode::SoundWater => "Sound in water",
            RouteMode::X43 => "X-43 scramjet",
            RouteMode::Optic => "Fiber optic signal",
            RouteMode::Light => "Light in vacuum",
        }
    }
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RouteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        RouteMode::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownRouteMode(s.to_string()))
    }
}

/// Speed in km/h for a mode key, case-insensitive.
///
/// Returns `None` for empty or unknown keys.
pub fn speed_for(mode: &str) -> Option<f64> {
    mode.parse::<RouteMode>().ok().map(RouteMode::speed_kmh)
}

/// Hours needed to cover `distance_km` at `speed_kmh`.
///
/// Returns `None` unless the distance is finite and non-negative and the
/// speed is finite and positive.
pub fn estimate_hours(distance_km: f64, speed_kmh: f64) -> Option<f64> {
    let distance_ok = distance_km.is_finite() && distance_km >= 0.0;
    let speed_ok = speed_kmh.is_finite() && speed_kmh > 0.0;
    (distance_ok && speed_ok).then(|| distance_km / speed_kmh)
}

/// A duration split into whole hours, minutes, seconds and milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

impl TravelDuration {
    /// Decompose a duration in hours, rounded to the nearest millisecond.
    ///
    /// Returns `None` for negative or non-finite input.
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return None;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let total_ms = (hours * 3_600_000.0).round() as u64;

        let millis = total_ms % 1_000;
        let total_seconds = total_ms / 1_000;
        let seconds = total_seconds % 60;
        let total_minutes = total_seconds / 60;
        let minutes = total_minutes % 60;
        let hours = total_minutes / 60;

        Some(Self {
            hours,
            minutes,
            seconds,
            millis,
        })
    }

    /// True if every component is zero.
    pub fn is_zero(self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.millis == 0
    }
}

impl fmt::Display for TravelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str(ZERO_DURATION);
        }

        let parts = [
            (self.hours, "h"),
            (self.minutes, "m"),
            (self.seconds, "s"),
            (self.millis, "ms"),
        ];
        let mut first = true;
        for (value, unit) in parts.into_iter().filter(|(value, _)| *value > 0) {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{value} {unit}")?;
            first = false;
        }
        Ok(())
    }
}

/// Format a duration in hours as `"2 h 15 m"`.
///
/// Only non-zero components are shown. Zero renders as [`ZERO_DURATION`];
/// negative or non-finite input renders as [`UNAVAILABLE`].
pub fn format_duration(hours: f64) -> String {
    TravelDuration::from_hours(hours).map_or_else(|| UNAVAILABLE.to_string(), |d| d.to_string())
}

/// Text for the distance readout.
pub fn distance_text(distance_km: f64) -> String {
    format!("Distance: {distance_km:.2} km")
}

/// Text for the travel-time readout.
///
/// `mode` is the key the user picked; unknown keys and unusable distances
/// produce the unavailable placeholder.
pub fn travel_time_text(mode: &str, distance_km: Option<f64>) -> String {
    let hours = distance_km
        .zip(speed_for(mode))
        .and_then(|(distance, speed)| estimate_hours(distance, speed));

    match hours {
        Some(hours) => format!("Estimated travel time ({mode}): {}", format_duration(hours)),
        None => format!("Estimated travel time: {UNAVAILABLE}"),
    }
}
