use crate::api::messages::{nearby_summary, parse_station_ids, station_status_summary};
use crate::error::CycleError;
use crate::feed::FeedClient;
use crate::nearby::{AvailabilityResult, RankedStation, parse_coords, rank};
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    pub feed: FeedClient,
    pub nearby_radius_km: f64,
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub coords: Option<String>,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct StationsQuery {
    pub ids: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StationSummary {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
    pub bikes_available: u32,
    pub ebikes_available: u32,
    pub docks_available: u32,
    pub total_docks: u32,
}

impl From<&RankedStation> for StationSummary {
    fn from(ranked: &RankedStation) -> Self {
        Self {
            id: ranked.station.id.clone(),
            name: ranked.station.name.clone(),
            distance_km: ranked.distance_km,
            bikes_available: ranked.station.standard_bikes_available,
            ebikes_available: ranked.station.e_bikes_available,
            docks_available: ranked.station.empty_docks_available,
            total_docks: ranked.station.total_docks,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CyclesNearbyResponse {
    pub count: usize,
    pub stations: Vec<StationSummary>,
    pub nearest_station: Option<StationSummary>,
    pub nearest_station_with_bikes: Option<StationSummary>,
    pub nearest_station_with_docks: Option<StationSummary>,
}

impl From<&AvailabilityResult> for CyclesNearbyResponse {
    fn from(availability: &AvailabilityResult) -> Self {
        Self {
            count: availability.stations().len(),
            stations: availability.stations().iter().map(StationSummary::from).collect(),
            nearest_station: availability.nearest().map(StationSummary::from),
            nearest_station_with_bikes: availability.nearest_with_bikes().map(StationSummary::from),
            nearest_station_with_docks: availability.nearest_with_docks().map(StationSummary::from),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/cycles/nearby/siri", get(get_nearby_siri))
        .route("/cycles/nearby", get(get_nearby_json))
        .route("/cycles/stations/siri", get(get_stations_siri))
        .route("/health", get(health_check))
        .with_state(state)
}

pub async fn run_server(state: AppState, port: u16) -> std::io::Result<()> {
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}

async fn get_nearby_siri(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<String, CycleError> {
    let coords = query.coords.unwrap_or_default();
    tracing::info!("Request: /cycles/nearby/siri?coords={}", coords);

    let origin = parse_coords(&coords)?;
    let stations = state.feed.fetch_stations().await?;

    nearby_summary(&stations, origin, state.nearby_radius_km)
}

async fn get_nearby_json(
    State(state): State<AppState>,
    Query(query): Query<NearbyQuery>,
) -> Result<Json<CyclesNearbyResponse>, CycleError> {
    let coords = query.coords.unwrap_or_default();
    tracing::info!("Request: /cycles/nearby?coords={}", coords);

    let origin = parse_coords(&coords)?;
    let radius_km = query.radius_km.unwrap_or(state.nearby_radius_km);
    let stations = state.feed.fetch_stations().await?;

    let availability = rank(&stations, origin, radius_km);
    Ok(Json(CyclesNearbyResponse::from(&availability)))
}

async fn get_stations_siri(
    State(state): State<AppState>,
    Query(query): Query<StationsQuery>,
) -> Result<String, CycleError> {
    let ids = query.ids.unwrap_or_default();
    tracing::info!("Request: /cycles/stations/siri?ids={}", ids);

    let ids = parse_station_ids(&ids)?;
    let stations = state.feed.fetch_stations().await?;

    station_status_summary(&stations, &ids)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FeedConfig, FeedFormat};
    use crate::stations::{Coordinate, StationRecord};
    use std::time::Duration;

    fn unreachable_state() -> AppState {
        let feed = FeedClient::new(FeedConfig {
            url: "http://127.0.0.1:9/BikePoint".to_string(),
            app_key: Some("k".to_string()),
            format: FeedFormat::Json,
            timeout: Duration::from_secs(2),
        })
        .unwrap();
        AppState {
            feed,
            nearby_radius_km: 1.0,
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn bad_coords_are_rejected_before_fetching() {
        let query = NearbyQuery {
            coords: Some("51.5".to_string()),
            radius_km: None,
        };
        let err = get_nearby_siri(State(unreachable_state()), Query(query))
            .await
            .unwrap_err();
        assert!(matches!(err, CycleError::InvalidInput(_)));

        let query = NearbyQuery {
            coords: None,
            radius_km: None,
        };
        let response = get_nearby_json(State(unreachable_state()), Query(query))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_ids_are_rejected_before_fetching() {
        let err = get_stations_siri(State(unreachable_state()), Query(StationsQuery { ids: None }))
            .await
            .unwrap_err();
        assert!(matches!(err, CycleError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn upstream_failure_is_500() {
        let query = NearbyQuery {
            coords: Some("51.5,-0.12".to_string()),
            radius_km: None,
        };
        let response = get_nearby_siri(State(unreachable_state()), Query(query))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn json_response_mirrors_ranking() {
        let origin = Coordinate::new(51.5, -0.12);
        let station = |id: &str, lat: f64, bikes: u32, docks: u32| StationRecord {
            id: id.to_string(),
            name: id.to_string(),
            location: Coordinate::new(lat, -0.12),
            installed: true,
            locked: false,
            total_bikes_available: bikes + 1,
            standard_bikes_available: bikes,
            e_bikes_available: 1,
            empty_docks_available: docks,
            total_docks: 20,
        };
        let stations = vec![station("far", 51.504, 2, 0), station("near", 51.501, 0, 4)];

        let availability = rank(&stations, origin, 1.0);
        let response = CyclesNearbyResponse::from(&availability);

        assert_eq!(response.count, 2);
        assert_eq!(response.stations[0].id, "near");
        assert_eq!(response.stations[0].ebikes_available, 1);
        assert_eq!(response.nearest_station.as_ref().unwrap().id, "near");
        assert_eq!(response.nearest_station_with_bikes.as_ref().unwrap().id, "far");
        assert_eq!(response.nearest_station_with_docks.as_ref().unwrap().id, "near");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["stations"][1]["bikes_available"], 2);
    }

    #[test]
    fn empty_json_response_has_null_slots() {
        let availability = rank(&[], Coordinate::new(51.5, -0.12), 1.0);
        let json = serde_json::to_value(CyclesNearbyResponse::from(&availability)).unwrap();

        assert_eq!(json["count"], 0);
        assert!(json["nearest_station"].is_null());
        assert!(json["nearest_station_with_bikes"].is_null());
        assert!(json["nearest_station_with_docks"].is_null());
    }
}
