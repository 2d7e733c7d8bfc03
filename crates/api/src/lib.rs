pub mod dates;
pub mod db;
mod routes;
mod startup;
pub mod templates;
mod utils;

pub use dates::{is_valid_date, DateRange, RangeError};
pub use db::{
    ActiveStation, ClimateAccess, ClimateData, DailyValues, Precipitation, Station,
    StationTemperatures, TemperatureStats, MOST_ACTIVE_STATION,
};
pub use routes::*;
pub use startup::*;
pub use utils::*;
