//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Every handler reads the shared catalog and asks the clock for today's
//! date once per request.

use super::{
    AppState,
    types::{
        FilterRequest, FiltersResponse, HealthResponse, ProfilesResponse, SuiteResponse,
        SystemDetailResponse, SystemsResponse, TimelineResponse,
    },
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use benchdash_core::primitives::CATALOG_DATE_FORMAT;
use benchdash_core::{
    BenchmarkSuite, DashboardSummary, SuiteSummary, SystemId, SystemTimeline, TimelineCounts,
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// SYSTEMS HANDLERS
// =============================================================================

/// The whole catalog.
pub async fn systems_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(SystemsResponse::new(state.catalog.systems()))
}

/// Filtered catalog.
pub async fn filter_handler(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> impl IntoResponse {
    let ignored = request.ignored_keys();
    if !ignored.is_empty() {
        tracing::debug!("Ignoring unknown filter keys: {:?}", ignored);
    }

    let systems = request.apply(&state.catalog);
    Json(SystemsResponse::new(systems).with_ignored_keys(ignored))
}

/// One system with its timeline and performance profile.
pub async fn system_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> impl IntoResponse {
    match state.catalog.require(SystemId(id)) {
        Ok(system) => {
            let timeline = SystemTimeline::derive(system, state.clock.today());
            (
                StatusCode::OK,
                Json(SystemDetailResponse::success(system.clone(), timeline)),
            )
        }
        Err(e) => (
            StatusCode::NOT_FOUND,
            Json(SystemDetailResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// TIMELINE HANDLER
// =============================================================================

/// Timeline views of the filtered systems.
pub async fn timeline_handler(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> impl IntoResponse {
    let today = state.clock.today();
    let timelines = SystemTimeline::derive_all(request.apply(&state.catalog), today);

    Json(TimelineResponse {
        as_of: today.format(CATALOG_DATE_FORMAT).to_string(),
        count: timelines.len(),
        counts: TimelineCounts::tally(&timelines),
        timelines,
        ignored_keys: request.ignored_keys(),
    })
}

// =============================================================================
// PROFILES HANDLER
// =============================================================================

/// Performance-profile radar data of the filtered systems.
pub async fn profiles_handler(
    State(state): State<AppState>,
    Json(request): Json<FilterRequest>,
) -> impl IntoResponse {
    let systems = request.apply(&state.catalog);
    Json(ProfilesResponse::new(systems).with_ignored_keys(request.ignored_keys()))
}

// =============================================================================
// SUITE HANDLER
// =============================================================================

/// Ranking, average and sub-scores of one suite.
pub async fn suite_handler(
    State(state): State<AppState>,
    Path(suite): Path<String>,
) -> impl IntoResponse {
    match suite.parse::<BenchmarkSuite>() {
        Ok(suite) => {
            let summary = SuiteSummary::compute(suite, state.catalog.systems());
            (StatusCode::OK, Json(SuiteResponse::success(summary)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(SuiteResponse::error(e.to_string())),
        ),
    }
}

// =============================================================================
// SUMMARY & FILTERS HANDLERS
// =============================================================================

/// Dashboard headline numbers.
pub async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(DashboardSummary::compute(
        state.catalog.systems(),
        state.clock.today(),
    ))
}

/// Filter groups with the options present in the catalog.
pub async fn filters_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(FiltersResponse {
        groups: state.catalog.filter_options(),
    })
}
