use crate::error::CycleError;
use crate::stations::Coordinate;

const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Great-circle distance in kilometres (haversine).
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lon = b.lon.to_radians() - a.lon.to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // round-off can push h slightly outside [0, 1]
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Parses a `"lat,lng"` query value.
pub fn parse_coords(coords: &str) -> Result<Coordinate, CycleError> {
    let parts: Vec<&str> = coords.split(',').collect();
    if parts.len() != 2 {
        return Err(CycleError::InvalidInput(
            "invalid coords parameter".to_string(),
        ));
    }

    let lat: f64 = parts[0]
        .trim()
        .parse()
        .map_err(|_| CycleError::InvalidInput("invalid latitude".to_string()))?;
    let lon: f64 = parts[1]
        .trim()
        .parse()
        .map_err(|_| CycleError::InvalidInput("invalid longitude".to_string()))?;

    Ok(Coordinate::new(lat, lon))
}
