//! Named locations used to prefill the coordinate fields.

use crate::constants::CITY_MATCH_EPSILON_DEG;

/// Selector label for hand-entered coordinates.
pub const CUSTOM: &str = "Custom (editable)";

/// A named location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn city(name: &'static str, lat: f64, lon: f64) -> City {
    City { name, lat, lon }
}

pub static CITIES: &[City] = &[
    city("New York", 40.7, -74.0),
    city("London", 51.5, -0.12),
    city("Paris", 48.85, 2.35),
    city("Tokyo", 35.68, 139.69),
    city("Sydney", -33.87, 151.21),
    city("Los Angeles", 34.05, -118.24),
    city("Rio de Janeiro", -22.91, -43.17),
    city("Cape Town", -33.92, 18.42),
    city("Cairo", 30.04, 31.24),
    city("Moscow", 55.76, 37.62),
    city("Beijing", 39.9, 116.4),
    city("Singapore", 1.35, 103.82),
    city("Mumbai", 19.08, 72.88),
    city("Dubai", 25.2, 55.27),
    city("Buenos Aires", -34.6, -58.38),
    city("Mexico City", 19.43, -99.13),
    city("Toronto", 43.65, -79.38),
    city("Reykjavik", 64.15, -21.94),
    city("Nairobi", -1.29, 36.82),
    city("Auckland", -36.85, 174.76),
    city("Honolulu", 21.31, -157.86),
    city("Anchorage", 61.22, -149.9),
];

/// Look a city up by name, ignoring case and surrounding whitespace.
pub fn find_city(name: &str) -> Option<&'static City> {
    let name = name.trim();
    CITIES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// The city sitting exactly at `(lat, lon)`, if any.
pub fn city_at(lat: f64, lon: f64) -> Option<&'static City> {
    CITIES.iter().find(|c| {
        (c.lat - lat).abs() < CITY_MATCH_EPSILON_DEG && (c.lon - lon).abs() < CITY_MATCH_EPSILON_DEG
    })
}

/// Selector label for typed coordinates: the matching city, else [`CUSTOM`].
pub fn selection_label(lat: Option<f64>, lon: Option<f64>) -> &'static str {
    lat.zip(lon)
        .and_then(|(lat, lon)| city_at(lat, lon))
        .map_or(CUSTOM, |c| c.name)
}

/// City names in alphabetical order, for selectors.
pub fn sorted_names() -> Vec<&'static str> {
    let mut names: Vec<_> = CITIES.iter().map(|c| c.name).collect();
    names.sort_unstable();
    names
}
