pub mod proximity;
pub mod ranking;

pub use proximity::{distance_km, parse_coords};
pub use ranking::{AvailabilityResult, RankedStation, rank};
