use crate::error::CycleError;
use crate::stations::{Coordinate, StationRecord};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BikePoint {
    id: String,
    common_name: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    additional_properties: Vec<AdditionalProperty>,
}

#[derive(Debug, Deserialize)]
struct AdditionalProperty {
    key: String,
    value: String,
}

/// Decodes the JSON `BikePoint` feed. Points without coordinates are skipped.
pub fn decode_bike_points(bytes: &[u8]) -> Result<Vec<StationRecord>, CycleError> {
    let points: Vec<BikePoint> = serde_json::from_slice(bytes)?;

    Ok(points.into_iter().filter_map(bike_point_to_station).collect())
}

fn bike_point_to_station(bp: BikePoint) -> Option<StationRecord> {
    let (Some(lat), Some(lon)) = (bp.lat, bp.lon) else {
        tracing::warn!("Skipping station {:?}: missing or invalid coordinates", bp.id);
        return None;
    };

    let mut station = empty_station(bp.id, bp.common_name, Coordinate::new(lat, lon));

    for prop in &bp.additional_properties {
        let value = prop.value.as_str();
        let count = || parse_count(&station.id, &prop.key, value);
        match prop.key.as_str() {
            "Installed" => station.installed = value == "true",
            "Locked" => station.locked = value == "true",
            "NbBikes" => station.total_bikes_available = count(),
            "NbStandardBikes" => station.standard_bikes_available = count(),
            "NbEBikes" => station.e_bikes_available = count(),
            "NbEmptyDocks" => station.empty_docks_available = count(),
            "NbDocks" => station.total_docks = count(),
            _ => {}
        }
    }

    Some(station)
}

/// Decodes the XML cycle hire syndication feed.
pub fn decode_cycle_hire_xml(xml: &str) -> Result<Vec<StationRecord>, CycleError> {
    let doc = roxmltree::Document::parse(xml)?;

    let root = doc.root_element();
    if !root.has_tag_name("stations") {
        return Err(CycleError::UpstreamParse(format!(
            "expected <stations> root, found <{}>",
            root.tag_name().name()
        )));
    }

    let mut stations = Vec::new();

    for node in root.children().filter(|n| n.has_tag_name("station")) {
        let child_text = |tag: &str| {
            node.children()
                .find(|n| n.has_tag_name(tag))
                .and_then(|n| n.text())
                .map(str::trim)
                .unwrap_or("")
        };

        let id = child_text("id").to_string();
        let lat = child_text("lat").parse::<f64>();
        let lon = child_text("long").parse::<f64>();

        let (Ok(lat), Ok(lon)) = (lat, lon) else {
            tracing::warn!("Skipping station {:?}: missing or invalid coordinates", id);
            continue;
        };

        let name = child_text("name").to_string();
        let mut station = empty_station(id, name, Coordinate::new(lat, lon));

        station.installed = child_text("installed") == "true";
        station.locked = child_text("locked") == "true";
        station.total_bikes_available =
            parse_count(&station.id, "nbBikes", child_text("nbBikes"));
        station.standard_bikes_available =
            parse_count(&station.id, "nbStandardBikes", child_text("nbStandardBikes"));
        station.e_bikes_available = parse_count(&station.id, "nbEBikes", child_text("nbEBikes"));
        station.empty_docks_available =
            parse_count(&station.id, "nbEmptyDocks", child_text("nbEmptyDocks"));
        station.total_docks = parse_count(&station.id, "nbDocks", child_text("nbDocks"));

        stations.push(station);
    }

    Ok(stations)
}

fn empty_station(id: String, name: String, location: Coordinate) -> StationRecord {
    StationRecord {
        id,
        name,
        location,
        installed: false,
        locked: false,
        total_bikes_available: 0,
        standard_bikes_available: 0,
        e_bikes_available: 0,
        empty_docks_available: 0,
        total_docks: 0,
    }
}

fn parse_count(station_id: &str, key: &str, value: &str) -> u32 {
    match value.trim().parse() {
        Ok(n) => n,
        Err(_) => {
            tracing::warn!(
                "Station {} has unparseable {} value {:?}, using 0",
                station_id,
                key,
                value
            );
            0
        }
    }
}
