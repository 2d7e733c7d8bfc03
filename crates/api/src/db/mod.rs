mod climate_data;

pub use climate_data::*;

/// Station reported by `/api/v1.0/tobs` unless configured otherwise.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// How the tobs route picks its station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveStation {
    /// Always report this station identifier.
    Fixed(String),
    /// Ask the dataset which station has the most measurement rows.
    MostObservations,
}

impl Default for ActiveStation {
    fn default() -> Self {
        ActiveStation::Fixed(MOST_ACTIVE_STATION.to_string())
    }
}

impl From<&str> for ActiveStation {
    /// `"auto"` selects the computed policy, anything else is a station identifier.
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("auto") {
            ActiveStation::MostObservations
        } else {
            ActiveStation::Fixed(value.to_string())
        }
    }
}
