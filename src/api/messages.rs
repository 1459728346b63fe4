//! Plain-text replies for the `/siri` endpoints.

use crate::error::CycleError;
use crate::nearby::{AvailabilityResult, RankedStation, rank};
use crate::stations::{Coordinate, StationRecord};
use std::collections::HashMap;

const NONE_IN_RANGE: &str = "none in range";

/// Ranks the snapshot around `origin` and describes the nearest stations.
pub fn nearby_summary(
    stations: &[StationRecord],
    origin: Coordinate,
    radius_km: f64,
) -> Result<String, CycleError> {
    let availability = rank(stations, origin, radius_km);

    for ranked in availability.stations() {
        tracing::debug!(
            "Station: {} ({:.3} km)",
            ranked.station.name,
            ranked.distance_km
        );
    }

    if availability.is_empty() {
        return Err(CycleError::NotFound(
            "no cycle stations found within range".to_string(),
        ));
    }

    Ok(describe_availability(&availability))
}

/// Collapses the three "nearest" slots into one sentence where they point at
/// the same station.
pub fn describe_availability(availability: &AvailabilityResult) -> String {
    let nearest = availability.nearest();
    let bikes = availability.nearest_with_bikes();
    let docks = availability.nearest_with_docks();

    if same_station(bikes, docks) && same_station(bikes, nearest) {
        format!("{} has both bikes & docks", name_of(nearest))
    } else if same_station(bikes, docks) {
        format!(
            "Closest station: {}. Closest with bikes & docks: {}",
            name_of(nearest),
            name_of(bikes)
        )
    } else if same_station(bikes, nearest) {
        format!(
            "Closest station has bikes: {}. Closest with docks: {}",
            name_of(nearest),
            name_of(docks)
        )
    } else if same_station(docks, nearest) {
        format!(
            "Closest station has docks: {}. Closest with bikes: {}",
            name_of(nearest),
            name_of(bikes)
        )
    } else {
        format!(
            "Closest station: {}\nClosest with bikes: {}\nClosest with docks: {}",
            name_of(nearest),
            name_of(bikes),
            name_of(docks)
        )
    }
}

// Slots borrow from the same result list, so pointer identity is station identity.
fn same_station(a: Option<&RankedStation>, b: Option<&RankedStation>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => std::ptr::eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn name_of(slot: Option<&RankedStation>) -> &str {
    slot.map(|r| r.station.name.as_str()).unwrap_or(NONE_IN_RANGE)
}

/// Splits an `ids` query value, dropping blanks.
pub fn parse_station_ids(ids: &str) -> Result<Vec<String>, CycleError> {
    let ids: Vec<String> = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    if ids.is_empty() {
        return Err(CycleError::InvalidInput("invalid ids parameter".to_string()));
    }
    Ok(ids)
}

/// One line per requested station, in request order.
pub fn station_status_summary(
    stations: &[StationRecord],
    ids: &[String],
) -> Result<String, CycleError> {
    let mut by_id: HashMap<&str, &StationRecord> = HashMap::new();
    for station in stations {
        by_id.entry(station.id.as_str()).or_insert(station);
    }

    let missing: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| !by_id.contains_key(id))
        .collect();
    if !missing.is_empty() {
        return Err(CycleError::NotFound(format!(
            "could not find stations with IDs: {}",
            missing.join(", ")
        )));
    }

    let mut message = String::new();
    for id in ids {
        let station = by_id[id.as_str()];
        message.push_str(&station_status_line(station));
        message.push('\n');
    }
    Ok(message)
}

fn station_status_line(station: &StationRecord) -> String {
    let name = station.short_name();
    let bikes = station.standard_bikes_available;
    let docks = station.empty_docks_available;

    match (station.has_bikes(), station.has_docks()) {
        (true, true) => format!("{name} has {bikes} bikes and {docks} docks."),
        (false, true) => format!("{name} has {docks} docks but no bikes."),
        (true, false) => format!("{name} has {bikes} bikes but no docks."),
        (false, false) => format!("{name} has no bikes or docks."),
    }
}
