//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use benchdash_core::catalog::FilterGroupOptions;
use benchdash_core::primitives::MAX_QUERY_LENGTH;
use benchdash_core::{
    BenchmarkSystem, Catalog, DashError, FilterCriteria, PerformanceProfile, SuiteSummary,
    SystemTimeline, TimelineCounts,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// FILTER REQUEST
// =============================================================================

/// Filter selection shared by `POST /systems/filter`, `POST /timeline`,
/// `POST /profiles` and the `list`/`timeline`/`profile` commands.
///
/// ```json
/// { "criteria": { "MKT": ["US"] }, "query": "rtx" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRequest {
    pub criteria: FilterCriteria,
    pub query: Option<String>,
}

impl FilterRequest {
    /// Build from `KEY=VALUE` pairs and an optional query.
    pub fn from_pairs(pairs: &[String], query: Option<String>) -> Result<Self, DashError> {
        let mut criteria = FilterCriteria::new();
        for pair in pairs {
            criteria.parse_pair(pair)?;
        }
        Ok(Self { criteria, query })
    }

    /// The free-text query, cut to `MAX_QUERY_LENGTH` characters.
    ///
    /// Whitespace is kept: `"4060 "` only matches values containing it.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        let query = self.query.as_deref()?;
        match query.char_indices().nth(MAX_QUERY_LENGTH) {
            Some((cut, _)) => Some(&query[..cut]),
            None => Some(query),
        }
    }

    /// Criteria keys that name no filterable field.
    #[must_use]
    pub fn ignored_keys(&self) -> Vec<String> {
        self.criteria.unknown_keys().map(str::to_string).collect()
    }

    /// Apply to a catalog.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a BenchmarkSystem> {
        catalog.filter(&self.criteria, self.query())
    }
}

// =============================================================================
// SYSTEMS RESPONSES
// =============================================================================

/// A list of systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemsResponse {
    pub count: usize,
    pub systems: Vec<BenchmarkSystem>,
    /// Criteria keys that were not applied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
}

impl SystemsResponse {
    pub fn new<'a>(systems: impl IntoIterator<Item = &'a BenchmarkSystem>) -> Self {
        let systems: Vec<BenchmarkSystem> = systems.into_iter().cloned().collect();
        Self {
            count: systems.len(),
            systems,
            ignored_keys: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ignored_keys(mut self, keys: Vec<String>) -> Self {
        self.ignored_keys = keys;
        self
    }
}

/// One system with its timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemDetailResponse {
    pub success: bool,
    pub system: Option<BenchmarkSystem>,
    pub timeline: Option<SystemTimeline>,
    pub profile: Option<PerformanceProfile>,
    pub error: Option<String>,
}

impl SystemDetailResponse {
    pub fn success(system: BenchmarkSystem, timeline: SystemTimeline) -> Self {
        let profile = PerformanceProfile::compute(&system);
        Self {
            success: true,
            system: Some(system),
            timeline: Some(timeline),
            profile: Some(profile),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            system: None,
            timeline: None,
            profile: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// TIMELINE RESPONSE
// =============================================================================

/// Timeline views of the filtered systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub as_of: String,
    pub count: usize,
    pub counts: TimelineCounts,
    pub timelines: Vec<SystemTimeline>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
}

// =============================================================================
// PROFILES RESPONSE
// =============================================================================

/// Performance profiles of the filtered systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub count: usize,
    pub profiles: Vec<PerformanceProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignored_keys: Vec<String>,
}

impl ProfilesResponse {
    pub fn new<'a>(systems: impl IntoIterator<Item = &'a BenchmarkSystem>) -> Self {
        let profiles: Vec<PerformanceProfile> =
            systems.into_iter().map(PerformanceProfile::compute).collect();
        Self {
            count: profiles.len(),
            profiles,
            ignored_keys: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_ignored_keys(mut self, keys: Vec<String>) -> Self {
        self.ignored_keys = keys;
        self
    }
}

// =============================================================================
// SUITE RESPONSE
// =============================================================================

/// Summary of one benchmark suite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResponse {
    pub success: bool,
    pub summary: Option<SuiteSummary>,
    pub error: Option<String>,
}

impl SuiteResponse {
    pub fn success(summary: SuiteSummary) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// FILTERS RESPONSE
// =============================================================================

/// Filter panel contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersResponse {
    pub groups: Vec<FilterGroupOptions>,
}
