//! Integration tests for the Benchdash HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real server.
//! The clock is pinned so timeline assertions do not depend on today.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum_test::TestServer;
use benchdash::api::{
    AppState, FiltersResponse, HealthResponse, ProfilesResponse, SuiteResponse,
    SystemDetailResponse, SystemsResponse, TimelineResponse, create_router,
};
use benchdash::config::ServerConfig;
use benchdash_core::{
    BenchmarkSystem, Catalog, DashboardSummary, FilterGroup, FixedClock, SystemId, TimelineStatus,
};
use chrono::NaiveDate;
use serde_json::json;
use std::sync::Arc;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn as_of(date: &str) -> Arc<FixedClock> {
    Arc::new(FixedClock::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    ))
}

/// Test server over the built-in catalog, as of 2025-03-20.
fn create_test_server() -> TestServer {
    create_server_with(Catalog::fixture().unwrap(), "2025-03-20")
}

fn create_server_with(catalog: Catalog, date: &str) -> TestServer {
    let state = AppState::new(catalog, as_of(date));
    let router = create_router(state, &ServerConfig::default());
    TestServer::new(router).unwrap()
}

fn ids(response: &SystemsResponse) -> Vec<u32> {
    response.systems.iter().map(|s| s.id.0).collect()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// SYSTEMS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_systems_returns_full_catalog() {
    let server = create_test_server();

    let response = server.get("/systems").await;

    response.assert_status_ok();
    let systems: SystemsResponse = response.json();
    assert_eq!(systems.count, 6);
    assert_eq!(ids(&systems), vec![1, 2, 3, 4, 5, 6]);
    assert!(systems.ignored_keys.is_empty());
}

#[tokio::test]
async fn test_systems_keep_catalog_keys() {
    let server = create_test_server();

    let response = server.get("/systems").await;
    let body: serde_json::Value = response.json();

    let first = &body["systems"][0];
    assert_eq!(first["systemName"], "System A");
    assert_eq!(first["systemInfo"]["MKT"], "US");
    assert_eq!(first["systemInfo"]["PMSubmitDate"], "2025-02-15");
    assert_eq!(first["benchmarkScores"]["TimeSpy"], 9245);
}

#[tokio::test]
async fn test_filter_by_market() {
    let server = create_test_server();

    let response = server
        .post("/systems/filter")
        .json(&json!({ "criteria": { "MKT": ["US"] } }))
        .await;

    response.assert_status_ok();
    let systems: SystemsResponse = response.json();
    assert_eq!(ids(&systems), vec![1, 6]);
}

#[tokio::test]
async fn test_filter_with_query_and_unknown_key() {
    let server = create_test_server();

    let response = server
        .post("/systems/filter")
        .json(&json!({
            "criteria": { "GPU": ["NVIDIA RTX 4070", "NVIDIA RTX 4080"], "Colour": ["Silver"] },
            "query": "RYZEN"
        }))
        .await;

    response.assert_status_ok();
    let systems: SystemsResponse = response.json();
    assert_eq!(ids(&systems), vec![2]);
    assert_eq!(systems.ignored_keys, vec!["Colour".to_string()]);
}

#[tokio::test]
async fn test_filter_empty_body_is_identity() {
    let server = create_test_server();

    let response = server.post("/systems/filter").json(&json!({})).await;

    response.assert_status_ok();
    let systems: SystemsResponse = response.json();
    assert_eq!(systems.count, 6);
}

#[tokio::test]
async fn test_system_detail_found() {
    let server = create_test_server();

    let response = server.get("/systems/2").await;

    response.assert_status_ok();
    let detail: SystemDetailResponse = response.json();
    assert!(detail.success);
    assert_eq!(detail.system.unwrap().system_name, "System B");
    let timeline = detail.timeline.unwrap();
    assert_eq!(timeline.status, TimelineStatus::CompletedLate);
    assert_eq!(timeline.completed, "Feb 15, 2025");
}

#[tokio::test]
async fn test_system_detail_includes_profile() {
    let server = create_test_server();

    let response = server.get("/systems/1").await;

    response.assert_status_ok();
    let detail: SystemDetailResponse = response.json();
    let profile = detail.profile.unwrap();
    assert_eq!(profile.axes.len(), 5);
    assert_eq!(profile.value("Time Spy"), Some(46.225));
    assert_eq!(profile.value("Physics"), Some(98.81));
}

#[tokio::test]
async fn test_filter_query_is_not_trimmed() {
    let server = create_test_server();

    let response = server
        .post("/systems/filter")
        .json(&json!({ "query": "4060 " }))
        .await;

    response.assert_status_ok();
    let systems: SystemsResponse = response.json();
    assert_eq!(systems.count, 0);
}

#[tokio::test]
async fn test_system_detail_not_found() {
    let server = create_test_server();

    let response = server.get("/systems/99").await;

    response.assert_status_not_found();
    let detail: SystemDetailResponse = response.json();
    assert!(!detail.success);
    assert!(detail.system.is_none());
    assert!(detail.error.unwrap().contains("99"));
}

#[tokio::test]
async fn test_system_detail_invalid_id() {
    let server = create_test_server();

    let response = server.get("/systems/abc").await;

    assert!(response.status_code().is_client_error());
}

// =============================================================================
// TIMELINE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_timeline_all_systems() {
    let server = create_test_server();

    let response = server.post("/timeline").json(&json!({})).await;

    response.assert_status_ok();
    let timeline: TimelineResponse = response.json();
    assert_eq!(timeline.as_of, "2025-03-20");
    assert_eq!(timeline.count, 6);
    assert_eq!(timeline.counts.completed_on_time, 4);
    assert_eq!(timeline.counts.completed_late, 1);
    assert_eq!(timeline.counts.in_progress, 1);

    let f = &timeline.timelines[5];
    assert_eq!(f.status, TimelineStatus::InProgress);
    assert_eq!(f.progress_percent, 42);
    assert_eq!(f.completed, "Pending");
}

#[tokio::test]
async fn test_timeline_turns_overdue_later() {
    let server = create_server_with(Catalog::fixture().unwrap(), "2025-05-01");

    let response = server
        .post("/timeline")
        .json(&json!({ "criteria": { "State": ["Pre-production"] } }))
        .await;

    let timeline: TimelineResponse = response.json();
    let statuses: Vec<TimelineStatus> = timeline.timelines.iter().map(|t| t.status).collect();
    assert_eq!(
        statuses,
        vec![TimelineStatus::CompletedOnTime, TimelineStatus::Overdue]
    );
    assert_eq!(timeline.counts.overdue, 1);
}

#[tokio::test]
async fn test_timeline_placeholders_for_missing_dates() {
    let catalog = Catalog::new(vec![BenchmarkSystem::new(SystemId(7), "Bare")]).unwrap();
    let server = create_server_with(catalog, "2025-03-20");

    let response = server.post("/timeline").json(&json!({})).await;

    let timeline: TimelineResponse = response.json();
    let bare = &timeline.timelines[0];
    assert_eq!(bare.status, TimelineStatus::NotStarted);
    assert_eq!(bare.progress, 0.0);
    assert_eq!(bare.submitted, "Not set");
    assert_eq!(bare.duration, "N/A");
    assert_eq!(timeline.counts.not_started, 1);
}

// =============================================================================
// PROFILES ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_profiles_for_filtered_systems() {
    let server = create_test_server();

    let response = server
        .post("/profiles")
        .json(&json!({ "criteria": { "MKT": ["US"] } }))
        .await;

    response.assert_status_ok();
    let profiles: ProfilesResponse = response.json();
    assert_eq!(profiles.count, 2);
    let ids: Vec<u32> = profiles.profiles.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![1, 6]);
}

#[tokio::test]
async fn test_profiles_keep_absent_scores_empty() {
    let catalog = Catalog::new(vec![BenchmarkSystem::new(SystemId(7), "Bare")]).unwrap();
    let server = create_server_with(catalog, "2025-03-20");

    let response = server.post("/profiles").json(&json!({})).await;

    let body: serde_json::Value = response.json();
    let axes = body["profiles"][0]["axes"].as_array().unwrap();
    assert_eq!(axes.len(), 5);
    assert!(axes.iter().all(|a| a["value"].is_null()));
}

// =============================================================================
// SUITE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_suite_port_royal() {
    let server = create_test_server();

    let response = server.get("/suites/PortRoyal").await;

    response.assert_status_ok();
    let suite: SuiteResponse = response.json();
    assert!(suite.success);
    let summary = suite.summary.unwrap();
    assert_eq!(summary.ranking.len(), 5);
    assert_eq!(summary.average, Some(8360));
    assert_eq!(summary.best.unwrap().id, SystemId(3));
}

#[tokio::test]
async fn test_suite_lenient_id() {
    let server = create_test_server();

    let response = server.get("/suites/time-spy-extreme").await;

    response.assert_status_ok();
    let suite: SuiteResponse = response.json();
    assert_eq!(suite.summary.unwrap().title, "Time Spy Extreme");
}

#[tokio::test]
async fn test_suite_unknown_is_bad_request() {
    let server = create_test_server();

    let response = server.get("/suites/Vantage").await;

    response.assert_status_bad_request();
    let suite: SuiteResponse = response.json();
    assert!(!suite.success);
    assert!(suite.error.unwrap().contains("Vantage"));
}

// =============================================================================
// SUMMARY & FILTERS ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_summary() {
    let server = create_test_server();

    let response = server.get("/summary").await;

    response.assert_status_ok();
    let summary: DashboardSummary = response.json();
    assert_eq!(summary.systems_tested, 6);
    assert_eq!(summary.avg_time_spy, Some(11861));
    assert_eq!(summary.as_of, "2025-03-20");
    assert_eq!(summary.timeline.total(), 6);
}

#[tokio::test]
async fn test_filters() {
    let server = create_test_server();

    let response = server.get("/filters").await;

    response.assert_status_ok();
    let filters: FiltersResponse = response.json();
    assert_eq!(filters.groups.len(), 3);
    assert_eq!(filters.groups[0].group, FilterGroup::SystemIdentification);

    let market = filters.groups[0]
        .fields
        .iter()
        .find(|f| f.label == "Market")
        .unwrap();
    assert_eq!(market.options, vec!["US", "EU", "Global", "APAC"]);
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let server = create_test_server();

    let response = server.get("/unknown").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let server = create_test_server();

    // /summary is GET only
    let response = server.post("/summary").await;
    assert_eq!(response.status_code().as_u16(), 405);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = create_test_server();

    let response = server
        .post("/systems/filter")
        .bytes(bytes::Bytes::from("not valid json"))
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let config = ServerConfig {
        rate_limit: 1,
        ..ServerConfig::default()
    };
    let state = AppState::new(Catalog::fixture().unwrap(), as_of("2025-03-20"));
    let server = TestServer::new(create_router(state, &config)).unwrap();

    server.get("/health").await.assert_status_ok();
    let second = server.get("/health").await;
    assert_eq!(second.status_code().as_u16(), 429);
}
