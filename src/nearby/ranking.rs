use crate::nearby::proximity::distance_km;
use crate::stations::{Coordinate, StationRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: StationRecord,
    pub distance_km: f64,
}

/// Usable stations within the query radius, nearest first, plus the nearest
/// station overall / with bikes / with docks.
///
/// The three slots index into `stations`, so two entries are the same station
/// exactly when their slots are equal.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityResult {
    stations: Vec<RankedStation>,
    nearest: Option<usize>,
    nearest_with_bikes: Option<usize>,
    nearest_with_docks: Option<usize>,
}

impl AvailabilityResult {
    pub fn stations(&self) -> &[RankedStation] {
        &self.stations
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn nearest(&self) -> Option<&RankedStation> {
        self.nearest.map(|i| &self.stations[i])
    }

    pub fn nearest_with_bikes(&self) -> Option<&RankedStation> {
        self.nearest_with_bikes.map(|i| &self.stations[i])
    }

    pub fn nearest_with_docks(&self) -> Option<&RankedStation> {
        self.nearest_with_docks.map(|i| &self.stations[i])
    }
}

/// Ranks `stations` by distance from `origin`, keeping only installed,
/// unlocked stations no further than `radius_km`.
///
/// Stations at equal distance keep their input order. A negative or NaN
/// radius matches nothing.
pub fn rank(stations: &[StationRecord], origin: Coordinate, radius_km: f64) -> AvailabilityResult {
    let mut nearby: Vec<RankedStation> = stations
        .iter()
        .filter(|s| s.is_usable())
        .filter_map(|s| {
            let dist = distance_km(origin, s.location);
            (dist <= radius_km).then(|| RankedStation {
                station: s.clone(),
                distance_km: dist,
            })
        })
        .collect();

    // sort_by is stable
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    let nearest = if nearby.is_empty() { None } else { Some(0) };
    let nearest_with_bikes = nearby.iter().position(|r| r.station.has_bikes());
    let nearest_with_docks = nearby.iter().position(|r| r.station.has_docks());

    AvailabilityResult {
        stations: nearby,
        nearest,
        nearest_with_bikes,
        nearest_with_docks,
    }
}
