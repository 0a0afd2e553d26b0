//! HTTP API for cyclecast
//!
//! Endpoints:
//! - POST /api/predict - Score a target date against observations
//! - POST /api/suggest-fills - Suggest in-cluster fill dates
//! - GET /health - Health check
//!
//! Scoring is stateless, so requests carry the full observation list
//! and the response is self-contained. A prediction that cannot be
//! made (no valid observations, unparseable target) comes back as
//! JSON `null`, not as an HTTP error.

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::cluster::suggest_fill_dates;
use crate::core::scorer::{CycleEngine, ScoreOptions};
use crate::types::{
    parse_calendar_day, Category, ParsedObservations, Prediction, ReliabilityBand, ScoreReason,
};
use crate::DEFAULT_MAX_GAP_DAYS;

/// App state
pub struct AppState {
    pub engine: CycleEngine,
}

/// Predict request
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub obs_dates: Vec<String>,
    pub target_date: String,
    #[serde(default)]
    pub certain_dates: Vec<String>,
    #[serde(default = "default_auto_fill")]
    pub auto_fill_clusters: bool,
    #[serde(default = "default_max_gap")]
    pub max_gap_days: i64,
}

fn default_auto_fill() -> bool {
    true
}

fn default_max_gap() -> i64 {
    DEFAULT_MAX_GAP_DAYS
}

/// Predict response (flat result shape)
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub regla: f64,
    pub perrisima: f64,
    pub horny: f64,
    pub nifunifa: f64,
    pub sexual_prob: f64,
    pub dominance_gap: f64,
    pub dominant_sex_category: Option<Category>,
    pub dominant: Category,
    pub expected_cycle_day: Option<f64>,
    pub reliability: f64,
    pub reliability_pct: f64,
    pub reliability_band: ReliabilityBand,
    pub reason: ScoreReason,
    pub reference_date: Option<String>,
    pub used_observations: Vec<String>,
    pub rejected_dates: Vec<String>,
}

impl PredictResponse {
    fn from_prediction(prediction: Prediction, rejected_dates: Vec<String>) -> Self {
        Self {
            regla: prediction.scores.regla,
            perrisima: prediction.scores.perrisima,
            horny: prediction.scores.horny,
            nifunifa: prediction.scores.nifunifa,
            sexual_prob: prediction.sexual_prob,
            dominance_gap: prediction.dominance_gap,
            dominant_sex_category: prediction.dominant_sex_category,
            dominant: prediction.dominant,
            expected_cycle_day: prediction.expected_cycle_day,
            reliability: prediction.reliability.score,
            reliability_pct: prediction.reliability.pct,
            reliability_band: prediction.reliability.band,
            reason: prediction.reason,
            reference_date: prediction
                .reference_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            used_observations: prediction
                .used_observations
                .iter()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            rejected_dates,
        }
    }
}

/// Suggest fills request
#[derive(Debug, Deserialize)]
pub struct SuggestFillsRequest {
    pub obs_dates: Vec<String>,
    #[serde(default = "default_max_gap")]
    pub max_gap_days: i64,
}

/// Suggest fills response
#[derive(Debug, Serialize)]
pub struct SuggestFillsResponse {
    pub suggested_dates: Vec<String>,
    pub rejected_dates: Vec<String>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        engine: CycleEngine::default(),
    });

    Router::new()
        .route("/health", get(health))
        .route("/api/predict", post(predict))
        .route("/api/suggest-fills", post(suggest_fills))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

/// Score a target date
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PredictRequest>,
) -> Json<Option<PredictResponse>> {
    let target = match parse_calendar_day(&req.target_date) {
        Some(d) => d,
        None => return Json(None),
    };

    let parsed = ParsedObservations::parse(&req.obs_dates);
    let options = ScoreOptions {
        certain_dates: req
            .certain_dates
            .iter()
            .filter_map(|s| parse_calendar_day(s))
            .collect(),
        auto_fill_clusters: req.auto_fill_clusters,
        max_gap_days: req.max_gap_days,
    };

    let response = state
        .engine
        .score(&parsed.set, target, &options)
        .map(|p| PredictResponse::from_prediction(p, parsed.rejected));
    Json(response)
}

/// Suggest fill dates for in-cluster holes
async fn suggest_fills(
    Json(req): Json<SuggestFillsRequest>,
) -> Json<SuggestFillsResponse> {
    let parsed = ParsedObservations::parse(&req.obs_dates);
    let suggested = suggest_fill_dates(&parsed.set.dates(), req.max_gap_days);

    Json(SuggestFillsResponse {
        suggested_dates: suggested
            .iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect(),
        rejected_dates: parsed.rejected,
    })
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("🩸 cyclecast API running on {}", addr);
    println!("  POST /api/predict       - Score a target date");
    println!("  POST /api/suggest-fills - Suggest cluster fills");
    println!("  GET  /health            - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
