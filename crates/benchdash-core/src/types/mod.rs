//! # Core Type Definitions
//!
//! This module contains the record types every other module works on:
//! - System identifiers (`SystemId`)
//! - Descriptive fields and raw timeline dates (`SystemInfo`)
//! - Benchmark results (`BenchmarkScores`, `ScoreKey`)
//! - The catalog record (`BenchmarkSystem`)
//! - Error types (`DashError`)
//!
//! ## Optional Fields
//!
//! Every descriptive field and every score is optional. `None` means
//! "unknown": it is never read as zero or as an empty string. Placeholders
//! are produced only by the presentation module.
//!
//! JSON keys follow the catalog file format (`systemName`, `MKT`,
//! `PMSubmitDate`, `TimeSpyCPUScore`, ...).

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a system in the catalog. Unique for the catalog's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SystemId(pub u32);

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// SYSTEM INFO
// =============================================================================

/// Descriptive fields of a system plus its three raw timeline dates.
///
/// Dates are kept as the strings found in the catalog; they are parsed at
/// derivation time so that a malformed value degrades to "absent" instead of
/// rejecting the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    // System identification
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "Series", default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(rename = "Segment", default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(rename = "MKT", default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(rename = "Model", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    // Hardware configuration
    #[serde(rename = "CPU", default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    #[serde(rename = "GPU", default, skip_serializing_if = "Option::is_none")]
    pub gpu: Option<String>,
    #[serde(rename = "DRAM", default, skip_serializing_if = "Option::is_none")]
    pub dram: Option<String>,
    #[serde(rename = "Panel", default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<String>,

    // System version
    #[serde(rename = "BIOS", default, skip_serializing_if = "Option::is_none")]
    pub bios: Option<String>,
    #[serde(rename = "EC", default, skip_serializing_if = "Option::is_none")]
    pub ec: Option<String>,
    #[serde(rename = "VBIOS", default, skip_serializing_if = "Option::is_none")]
    pub vbios: Option<String>,
    #[serde(rename = "VGA_Driver", default, skip_serializing_if = "Option::is_none")]
    pub vga_driver: Option<String>,
    #[serde(rename = "PN", default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,

    // Timeline
    #[serde(rename = "PMSubmitDate", default, skip_serializing_if = "Option::is_none")]
    pub submitted_date: Option<String>,
    #[serde(
        rename = "TargetCompletionDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_completion_date: Option<String>,
    /// `null` in the catalog file deserializes to `None`.
    #[serde(rename = "ActualCompletionDate", default)]
    pub actual_completion_date: Option<String>,
}

// =============================================================================
// BENCHMARK SCORES
// =============================================================================

/// Every score recorded for a system, grouped by suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BenchmarkScores {
    // Time Spy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spy: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spy_graphics_score: Option<u32>,
    #[serde(rename = "TimeSpyCPUScore", default, skip_serializing_if = "Option::is_none")]
    pub time_spy_cpu_score: Option<u32>,

    // Port Royal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_royal: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_royal_graphics: Option<u32>,

    // Time Spy Extreme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spy_extreme: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spy_extreme_graphics_score: Option<u32>,
    #[serde(
        rename = "TimeSpyExtremeCPUScore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub time_spy_extreme_cpu_score: Option<u32>,

    // Firestrike
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_graphic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_physics: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_combined: Option<u32>,

    // Firestrike Ultra
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_ultra: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_ultra_graphic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_ultra_physics: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firestrike_ultra_combined: Option<u32>,
}

/// Typed handle on a single score field of [`BenchmarkScores`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreKey {
    TimeSpy,
    TimeSpyGraphicsScore,
    #[serde(rename = "TimeSpyCPUScore")]
    TimeSpyCpuScore,
    PortRoyal,
    PortRoyalGraphics,
    TimeSpyExtreme,
    TimeSpyExtremeGraphicsScore,
    #[serde(rename = "TimeSpyExtremeCPUScore")]
    TimeSpyExtremeCpuScore,
    Firestrike,
    FirestrikeGraphic,
    FirestrikePhysics,
    FirestrikeCombined,
    FirestrikeUltra,
    FirestrikeUltraGraphic,
    FirestrikeUltraPhysics,
    FirestrikeUltraCombined,
}

impl ScoreKey {
    /// The key as written in the catalog file.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKey::TimeSpy => "TimeSpy",
            ScoreKey::TimeSpyGraphicsScore => "TimeSpyGraphicsScore",
            ScoreKey::TimeSpyCpuScore => "TimeSpyCPUScore",
            ScoreKey::PortRoyal => "PortRoyal",
            ScoreKey::PortRoyalGraphics => "PortRoyalGraphics",
            ScoreKey::TimeSpyExtreme => "TimeSpyExtreme",
            ScoreKey::TimeSpyExtremeGraphicsScore => "TimeSpyExtremeGraphicsScore",
            ScoreKey::TimeSpyExtremeCpuScore => "TimeSpyExtremeCPUScore",
            ScoreKey::Firestrike => "Firestrike",
            ScoreKey::FirestrikeGraphic => "FirestrikeGraphic",
            ScoreKey::FirestrikePhysics => "FirestrikePhysics",
            ScoreKey::FirestrikeCombined => "FirestrikeCombined",
            ScoreKey::FirestrikeUltra => "FirestrikeUltra",
            ScoreKey::FirestrikeUltraGraphic => "FirestrikeUltraGraphic",
            ScoreKey::FirestrikeUltraPhysics => "FirestrikeUltraPhysics",
            ScoreKey::FirestrikeUltraCombined => "FirestrikeUltraCombined",
        }
    }
}

impl BenchmarkScores {
    /// Read one score. `None` when the system was not measured.
    #[must_use]
    pub fn get(&self, key: ScoreKey) -> Option<u32> {
        match key {
            ScoreKey::TimeSpy => self.time_spy,
            ScoreKey::TimeSpyGraphicsScore => self.time_spy_graphics_score,
            ScoreKey::TimeSpyCpuScore => self.time_spy_cpu_score,
            ScoreKey::PortRoyal => self.port_royal,
            ScoreKey::PortRoyalGraphics => self.port_royal_graphics,
            ScoreKey::TimeSpyExtreme => self.time_spy_extreme,
            ScoreKey::TimeSpyExtremeGraphicsScore => self.time_spy_extreme_graphics_score,
            ScoreKey::TimeSpyExtremeCpuScore => self.time_spy_extreme_cpu_score,
            ScoreKey::Firestrike => self.firestrike,
            ScoreKey::FirestrikeGraphic => self.firestrike_graphic,
            ScoreKey::FirestrikePhysics => self.firestrike_physics,
            ScoreKey::FirestrikeCombined => self.firestrike_combined,
            ScoreKey::FirestrikeUltra => self.firestrike_ultra,
            ScoreKey::FirestrikeUltraGraphic => self.firestrike_ultra_graphic,
            ScoreKey::FirestrikeUltraPhysics => self.firestrike_ultra_physics,
            ScoreKey::FirestrikeUltraCombined => self.firestrike_ultra_combined,
        }
    }
}

// =============================================================================
// BENCHMARK SYSTEM
// =============================================================================

/// One hardware configuration under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkSystem {
    pub id: SystemId,
    pub system_name: String,
    #[serde(default)]
    pub system_info: SystemInfo,
    #[serde(default)]
    pub benchmark_scores: BenchmarkScores,
}

impl BenchmarkSystem {
    /// Create a system with no descriptive fields and no scores.
    #[must_use]
    pub fn new(id: SystemId, system_name: impl Into<String>) -> Self {
        Self {
            id,
            system_name: system_name.into(),
            system_info: SystemInfo::default(),
            benchmark_scores: BenchmarkScores::default(),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while loading or querying the dashboard data.
///
/// Derivations (status, progress, filtering) never return these: absent and
/// malformed fields are a valid "unknown" state. Errors are reserved for the
/// catalog boundary and for caller input that names something that does not
/// exist.
#[derive(Debug, Error)]
pub enum DashError {
    /// Two catalog records share an id.
    #[error("Duplicate system id: {0}")]
    DuplicateSystemId(SystemId),

    /// The catalog holds more systems than allowed.
    #[error("Catalog has {0} systems, maximum is {1}")]
    CatalogTooLarge(usize, usize),

    /// The requested system is not in the catalog.
    #[error("System not found: {0}")]
    SystemNotFound(SystemId),

    /// The benchmark suite id is not recognised.
    #[error("Unknown benchmark suite: {0}")]
    UnknownSuite(String),

    /// The descriptive field key is not recognised.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A filter expression could not be parsed.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A caller-supplied date could not be parsed.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// The configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_deserializes_catalog_keys() {
        let json = r#"{
            "id": 7,
            "systemName": "System G",
            "systemInfo": {
                "MKT": "US",
                "CPU": "Intel Core i7-13700H",
                "PMSubmitDate": "2025-02-15",
                "ActualCompletionDate": null
            },
            "benchmarkScores": { "TimeSpy": 9245, "TimeSpyCPUScore": 9185 }
        }"#;

        let system: BenchmarkSystem = serde_json::from_str(json).expect("parse");
        assert_eq!(system.id, SystemId(7));
        assert_eq!(system.system_info.market.as_deref(), Some("US"));
        assert_eq!(system.system_info.submitted_date.as_deref(), Some("2025-02-15"));
        assert_eq!(system.system_info.actual_completion_date, None);
        assert_eq!(system.system_info.gpu, None);
        assert_eq!(system.benchmark_scores.get(ScoreKey::TimeSpy), Some(9245));
        assert_eq!(system.benchmark_scores.get(ScoreKey::TimeSpyCpuScore), Some(9185));
        assert_eq!(system.benchmark_scores.get(ScoreKey::PortRoyal), None);
    }

    #[test]
    fn missing_sections_default_to_unknown() {
        let json = r#"{ "id": 1, "systemName": "Bare" }"#;
        let system: BenchmarkSystem = serde_json::from_str(json).expect("parse");
        assert_eq!(system.system_info, SystemInfo::default());
        assert_eq!(system.benchmark_scores, BenchmarkScores::default());
    }

    #[test]
    fn absent_scores_are_not_serialized() {
        let mut system = BenchmarkSystem::new(SystemId(1), "A");
        system.benchmark_scores.firestrike = Some(19945);

        let json = serde_json::to_string(&system.benchmark_scores).expect("serialize");
        assert_eq!(json, r#"{"Firestrike":19945}"#);
    }

    #[test]
    fn score_key_names_match_catalog() {
        assert_eq!(ScoreKey::TimeSpyCpuScore.as_str(), "TimeSpyCPUScore");
        let parsed: ScoreKey = serde_json::from_str("\"TimeSpyExtremeCPUScore\"").expect("parse");
        assert_eq!(parsed, ScoreKey::TimeSpyExtremeCpuScore);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            DashError::DuplicateSystemId(SystemId(3)).to_string(),
            "Duplicate system id: 3"
        );
        assert_eq!(
            DashError::UnknownSuite("Heaven".into()).to_string(),
            "Unknown benchmark suite: Heaven"
        );
    }
}
