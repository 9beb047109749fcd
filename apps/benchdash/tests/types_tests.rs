//! Unit tests for API types serialization/deserialization.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use benchdash::api::{
    FilterRequest, HealthResponse, ProfilesResponse, SuiteResponse, SystemDetailResponse,
    SystemsResponse,
};
use benchdash_core::primitives::MAX_QUERY_LENGTH;
use benchdash_core::{
    BenchmarkSuite, BenchmarkSystem, Catalog, DashError, FilterField, SuiteSummary, SystemId,
};

// =============================================================================
// HEALTH RESPONSE TESTS
// =============================================================================

#[test]
fn test_health_response_default() {
    let health = HealthResponse::default();
    assert_eq!(health.status, "ok");
    assert!(!health.version.is_empty());
}

#[test]
fn test_health_response_serialization() {
    let health = HealthResponse {
        status: "ok".to_string(),
        version: "0.4.2".to_string(),
    };

    let json = serde_json::to_string(&health).unwrap();
    assert!(json.contains("\"status\":\"ok\""));
    assert!(json.contains("\"version\":\"0.4.2\""));
}

// =============================================================================
// FILTER REQUEST TESTS
// =============================================================================

#[test]
fn test_filter_request_deserialization() {
    let json = r#"{"criteria":{"MKT":["US","EU"],"GPU":["NVIDIA RTX 4070"]},"query":"rtx"}"#;
    let request: FilterRequest = serde_json::from_str(json).unwrap();

    assert_eq!(request.criteria.active_count(), 3);
    assert_eq!(request.query(), Some("rtx"));
    assert!(request.ignored_keys().is_empty());
}

#[test]
fn test_filter_request_defaults() {
    let request: FilterRequest = serde_json::from_str("{}").unwrap();
    assert!(request.criteria.is_empty());
    assert_eq!(request.query(), None);
}

#[test]
fn test_filter_request_from_pairs() {
    let pairs = vec!["MKT=US".to_string(), "GPU = NVIDIA RTX 4070".to_string()];
    let request = FilterRequest::from_pairs(&pairs, Some("ryzen".into())).unwrap();

    let expected = benchdash_core::FilterCriteria::new()
        .with(FilterField::Market, "US")
        .with(FilterField::Gpu, "NVIDIA RTX 4070");
    assert_eq!(request.criteria, expected);
    assert_eq!(request.query(), Some("ryzen"));
}

#[test]
fn test_filter_request_rejects_unknown_field_pair() {
    let result = FilterRequest::from_pairs(&["Colour=Silver".to_string()], None);
    assert!(matches!(result, Err(DashError::UnknownField(_))));
}

#[test]
fn test_filter_request_truncates_long_query() {
    let request = FilterRequest {
        query: Some("é".repeat(MAX_QUERY_LENGTH + 10)),
        ..FilterRequest::default()
    };
    assert_eq!(request.query().unwrap().chars().count(), MAX_QUERY_LENGTH);
}

#[test]
fn test_filter_request_keeps_query_whitespace() {
    let catalog = Catalog::fixture().unwrap();
    let padded = FilterRequest {
        query: Some("4060 ".to_string()),
        ..FilterRequest::default()
    };
    assert_eq!(padded.query(), Some("4060 "));
    assert!(padded.apply(&catalog).is_empty());

    let exact = FilterRequest {
        query: Some("4060".to_string()),
        ..FilterRequest::default()
    };
    let ids: Vec<u32> = exact.apply(&catalog).iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_filter_request_apply_reports_ignored_keys() {
    let catalog = Catalog::fixture().unwrap();
    let mut request = FilterRequest::default();
    request.criteria.insert("MKT", "US");
    request.criteria.insert("Colour", "Silver");

    let ids: Vec<u32> = request.apply(&catalog).iter().map(|s| s.id.0).collect();
    assert_eq!(ids, vec![1, 6]);
    assert_eq!(request.ignored_keys(), vec!["Colour".to_string()]);
}

// =============================================================================
// RESPONSE TESTS
// =============================================================================

#[test]
fn test_systems_response_omits_empty_ignored_keys() {
    let systems = vec![BenchmarkSystem::new(SystemId(1), "A")];
    let response = SystemsResponse::new(&systems);

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"count\":1"));
    assert!(!json.contains("ignored_keys"));

    let with_keys = SystemsResponse::new(&systems).with_ignored_keys(vec!["X".into()]);
    let json = serde_json::to_string(&with_keys).unwrap();
    assert!(json.contains("\"ignored_keys\":[\"X\"]"));
}

#[test]
fn test_system_detail_error() {
    let response = SystemDetailResponse::error("System not found: 9");
    assert!(!response.success);
    assert!(response.system.is_none());
    assert!(response.timeline.is_none());
    assert!(response.profile.is_none());
    assert_eq!(response.error.as_deref(), Some("System not found: 9"));
}

#[test]
fn test_profiles_response_counts_profiles() {
    let catalog = Catalog::fixture().unwrap();
    let response = ProfilesResponse::new(catalog.systems());

    assert_eq!(response.count, 6);
    assert_eq!(response.profiles[3].name, "System D");
    assert_eq!(response.profiles[3].value("Time Spy"), Some(11.98));

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains("\"label\":\"Graphics Score\""));
    assert!(!json.contains("ignored_keys"));
}

#[test]
fn test_suite_response_round_trip() {
    let catalog = Catalog::fixture().unwrap();
    let summary = SuiteSummary::compute(BenchmarkSuite::Firestrike, catalog.systems());
    let response = SuiteResponse::success(summary.clone());

    let json = serde_json::to_string(&response).unwrap();
    let back: SuiteResponse = serde_json::from_str(&json).unwrap();
    assert!(back.success);
    assert_eq!(back.summary, Some(summary));
    assert!(back.error.is_none());
}
