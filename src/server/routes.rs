//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::error::Error;
use crate::server::state::AppState;
use crate::source::service::CacheEntryStatus;
use crate::track::intensity::{classify_by_wind_speed, matches_intensity_level, CATEGORIES};
use crate::track::synth::synthesize_path;
use crate::track::wind::WindCircle;
use crate::track::{available_sources, IntensityCategory, SourceId, TrackPoint, TyphoonRecord};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::debug;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(state.static_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/typhoon/:source", get(typhoon_handler))
        .route("/api/typhoon/:source/stats", get(stats_handler))
        .route("/api/typhoons", get(typhoons_handler))
        .route("/api/track", post(track_handler))
        .route("/api/intensities", get(intensities_handler))
        .route("/api/sources", get(sources_handler))
        .route("/api/cache", get(cache_handler).delete(cache_clear_handler))
        .route("/api/health", get(health_handler))
        .fallback_service(assets)
        .with_state(state)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code.as_str() {
            "INDETERMINATE_SPEED" => StatusCode::UNPROCESSABLE_ENTITY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::UnsupportedSource(_) => "UNSUPPORTED_SOURCE",
            Error::InvalidRange { .. } => "INVALID_RANGE",
            Error::IndeterminateSpeed => "INDETERMINATE_SPEED",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Get one source's record
///
/// GET /api/typhoon/:source
async fn typhoon_handler(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Result<Json<TyphoonRecord>, ApiError> {
    let record = state.service.get_typhoon_data_by_name(&source).await?;
    Ok(Json(record))
}

/// Summary statistics for a record
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub name: String,
    pub source: SourceId,
    pub intensity: IntensityCategory,
    pub intensity_rank: u8,
    /// Category implied by the maximum wind speed alone
    pub wind_category: IntensityCategory,
    pub pressure: f64,
    pub wind_speed: f64,
    /// Movement between the last two historical points; null when unknown
    pub movement_speed_kmh: Option<f64>,
    pub wind_circles: Vec<WindCircle>,
}

/// Get summary statistics for one source
///
/// GET /api/typhoon/:source/stats
async fn stats_handler(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    let record = state.service.get_typhoon_data_by_name(&source).await?;

    let movement_speed_kmh = match record.movement_speed_kmh() {
        Ok(speed) => speed,
        Err(Error::IndeterminateSpeed) => {
            debug!("{} record has coincident last points", record.source);
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(StatsResponse {
        name: record.name.clone(),
        source: record.source,
        intensity: record.intensity,
        intensity_rank: record.intensity.rank(),
        wind_category: classify_by_wind_speed(record.wind_speed),
        pressure: record.pressure,
        wind_speed: record.wind_speed,
        movement_speed_kmh,
        wind_circles: record.wind_circles(),
    }))
}

/// Filter for the all-sources endpoint
#[derive(Debug, Deserialize)]
pub struct TyphoonsQuery {
    /// Only include records at or above this severity rank
    pub min_level: Option<u8>,
}

/// Get every source's record
///
/// GET /api/typhoons?min_level=N
async fn typhoons_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TyphoonsQuery>,
) -> Result<Json<BTreeMap<SourceId, TyphoonRecord>>, ApiError> {
    let level = query.min_level.unwrap_or(0);
    let records = state
        .service
        .get_all()
        .await?
        .into_iter()
        .filter(|(_, record)| matches_intensity_level(record.intensity.label(), level))
        .collect();

    Ok(Json(records))
}

/// Track synthesis request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub start_hours: i64,
    pub end_hours: i64,
    #[serde(default)]
    pub offset: f64,
}

/// Track synthesis response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResponse {
    pub base_time: DateTime<Utc>,
    pub count: usize,
    pub points: Vec<TrackPoint>,
}

/// Synthesize a track around the current time
///
/// POST /api/track
async fn track_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrackRequest>,
) -> Result<Json<TrackResponse>, ApiError> {
    let base_time = Utc::now();
    let points = synthesize_path(
        base_time,
        req.start_hours,
        req.end_hours,
        req.offset,
        state.service.rng(),
    )?;

    Ok(Json(TrackResponse {
        base_time,
        count: points.len(),
        points,
    }))
}

/// Intensity category description
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntensityInfo {
    pub category: IntensityCategory,
    pub rank: u8,
    pub label: String,
    pub label_zh: String,
    pub min_wind_speed: f64,
    pub max_wind_speed: f64,
}

/// Intensities list response
#[derive(Debug, Serialize, Deserialize)]
pub struct IntensitiesResponse {
    pub intensities: Vec<IntensityInfo>,
}

/// List intensity categories, lowest first
///
/// GET /api/intensities
async fn intensities_handler() -> Json<IntensitiesResponse> {
    let intensities = CATEGORIES
        .iter()
        .map(|c| {
            let (min_wind_speed, max_wind_speed) = c.wind_band();
            IntensityInfo {
                category: *c,
                rank: c.rank(),
                label: c.label().to_string(),
                label_zh: c.label_zh().to_string(),
                min_wind_speed,
                max_wind_speed,
            }
        })
        .collect();

    Json(IntensitiesResponse { intensities })
}

/// Source description with availability
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: SourceId,
    pub name: String,
    pub endpoint: String,
    pub available: bool,
    pub last_check: DateTime<Utc>,
}

/// Sources list response
#[derive(Debug, Serialize, Deserialize)]
pub struct SourcesResponse {
    pub sources: Vec<SourceInfo>,
    pub offline: bool,
}

/// List sources and check their endpoints
///
/// GET /api/sources
async fn sources_handler(State(state): State<Arc<AppState>>) -> Json<SourcesResponse> {
    let status = state.service.api_status().await;

    let sources = available_sources()
        .into_iter()
        .map(|id| {
            let (available, last_check) = status
                .get(&id)
                .map(|s| (s.available, s.last_check))
                .unwrap_or((false, Utc::now()));
            SourceInfo {
                id,
                name: id.display_name().to_string(),
                endpoint: state.service.endpoint(id),
                available,
                last_check,
            }
        })
        .collect();

    Json(SourcesResponse {
        sources,
        offline: state.service.is_offline(),
    })
}

/// Cache status response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheResponse {
    pub ttl_ms: u64,
    pub entries: BTreeMap<SourceId, CacheEntryStatus>,
}

/// Show the record cache
///
/// GET /api/cache
async fn cache_handler(State(state): State<Arc<AppState>>) -> Json<CacheResponse> {
    Json(CacheResponse {
        ttl_ms: state.service.cache_ttl().await.as_millis() as u64,
        entries: state.service.cache_status().await,
    })
}

/// Clear the record cache
///
/// DELETE /api/cache
async fn cache_clear_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    state.service.clear_cache().await;
    StatusCode::NO_CONTENT
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_secs: u64,
}

/// Health check
///
/// GET /api/health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::random::pseudo::SeededRandom;
    use crate::source::service::TyphoonService;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn create_test_state() -> Arc<AppState> {
        let mut config = Config::default();
        config.sources.offline = true;
        let service = TyphoonService::with_random(&config, Arc::new(SeededRandom::new(42)));
        Arc::new(AppState::with_service(config, service))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        app: Router,
        uri: &str,
    ) -> (StatusCode, T) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_track(app: Router, body: serde_json::Value) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/track")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_typhoon_endpoint() {
        let app = create_router(create_test_state());

        let (status, record): (_, TyphoonRecord) = get_json(app, "/api/typhoon/hko").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(record.source, SourceId::Hko);
        assert_eq!(record.historical_path.len(), 5);
        assert_eq!(record.forecast_path.len(), 9);
    }

    #[tokio::test]
    async fn test_typhoon_endpoint_unsupported_source() {
        let app = create_router(create_test_state());

        let (status, err): (_, ApiError) = get_json(app, "/api/typhoon/noaa").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "UNSUPPORTED_SOURCE");
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_router(create_test_state());

        let (status, stats): (_, StatsResponse) = get_json(app, "/api/typhoon/jma/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats.source, SourceId::Jma);
        assert_eq!(stats.intensity_rank, 3);
        // JMA winds of 32..46 m/s classify as typhoon or severe typhoon
        assert!(matches!(
            stats.wind_category,
            IntensityCategory::Typhoon | IntensityCategory::SevereTyphoon
        ));
        assert!(stats.movement_speed_kmh.is_some());
        // JMA synthesizes at least 32 m/s, so all three circles apply
        assert_eq!(stats.wind_circles.len(), 3);
    }

    #[tokio::test]
    async fn test_typhoons_endpoint() {
        let state = create_test_state();

        let (status, all): (_, BTreeMap<SourceId, TyphoonRecord>) =
            get_json(create_router(state.clone()), "/api/typhoons").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(all.len(), 3);

        // Only HKO reports a severe typhoon
        let (_, filtered): (_, BTreeMap<SourceId, TyphoonRecord>) =
            get_json(create_router(state), "/api/typhoons?min_level=4").await;
        assert_eq!(filtered.keys().copied().collect::<Vec<_>>(), vec![SourceId::Hko]);
    }

    #[tokio::test]
    async fn test_track_endpoint() {
        let app = create_router(create_test_state());

        let response = post_track(app, serde_json::json!({ "startHours": -24, "endHours": 0 })).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let track: TrackResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(track.count, 5);
        assert_eq!(track.points.len(), 5);
        assert_eq!(track.points[0].time, track.base_time - chrono::TimeDelta::hours(24));
    }

    #[tokio::test]
    async fn test_track_endpoint_invalid_range() {
        let app = create_router(create_test_state());

        let response = post_track(app, serde_json::json!({ "startHours": 12, "endHours": 0 })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_track_endpoint_rejects_oversized_range() {
        let app = create_router(create_test_state());

        let response =
            post_track(app, serde_json::json!({ "startHours": 0, "endHours": 2_000_000_000i64 }))
                .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "INVALID_RANGE");
    }

    #[tokio::test]
    async fn test_intensities_endpoint() {
        let app = create_router(create_test_state());

        let (status, resp): (_, IntensitiesResponse) = get_json(app, "/api/intensities").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp.intensities.len(), 6);
        assert_eq!(resp.intensities[0].category, IntensityCategory::TropicalDepression);
        assert_eq!(resp.intensities[5].rank, 5);
        assert_eq!(resp.intensities[3].label_zh, "台风");
    }

    #[tokio::test]
    async fn test_sources_endpoint_offline() {
        let app = create_router(create_test_state());

        let (status, resp): (_, SourcesResponse) = get_json(app, "/api/sources").await;

        assert_eq!(status, StatusCode::OK);
        assert!(resp.offline);
        assert_eq!(resp.sources.len(), 3);
        assert!(resp.sources.iter().all(|s| !s.available));
    }

    #[tokio::test]
    async fn test_cache_endpoints() {
        let state = create_test_state();

        let _: (_, TyphoonRecord) = get_json(create_router(state.clone()), "/api/typhoon/cma").await;

        let (_, cache): (_, CacheResponse) =
            get_json(create_router(state.clone()), "/api/cache").await;
        assert_eq!(cache.ttl_ms, 300_000);
        assert!(cache.entries.contains_key(&SourceId::Cma));

        let response = create_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/cache")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let (_, cache): (_, CacheResponse) = get_json(create_router(state), "/api/cache").await;
        assert!(cache.entries.is_empty());
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(create_test_state());

        let (status, health): (_, HealthResponse) = get_json(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_error_codes() {
        let err: ApiError = Error::IndeterminateSpeed.into();
        assert_eq!(err.code, "INDETERMINATE_SPEED");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = Error::Config("bad".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
