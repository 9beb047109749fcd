//! # benchdash-core
//!
//! The derivation engine for the benchmark dashboard - THE LOGIC.
//!
//! This crate holds the catalog of laptop systems under test and derives
//! everything the dashboard displays from it:
//! - timeline status and progress per system (`timeline`)
//! - filtered views of the catalog (`filter`)
//! - per-suite rankings, averages and performance profiles (`benchmark`)
//! - display-ready records with placeholders (`presentation`)
//!
//! ## Architectural Constraints
//!
//! - No async, no network, no logging: the binary owns those concerns
//! - Every derivation takes "today" explicitly (see [`Clock`])
//! - Absent fields stay `None` until the presentation boundary
//! - The catalog is immutable once loaded

// =============================================================================
// MODULES
// =============================================================================

pub mod benchmark;
pub mod catalog;
pub mod clock;
pub mod filter;
pub mod presentation;
pub mod primitives;
pub mod timeline;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{BenchmarkScores, BenchmarkSystem, DashError, ScoreKey, SystemId, SystemInfo};

// =============================================================================
// RE-EXPORTS: Derivations
// =============================================================================

pub use benchmark::{
    BenchmarkSuite, PerformanceProfile, ProfileAxis, RankedScore, SuiteSummary, average_score,
    profile_percent,
};
pub use catalog::{Catalog, CatalogSource, FixtureCatalog, JsonFileCatalog};
pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{FilterCriteria, FilterField, FilterGroup, filter_systems};
pub use presentation::{DashboardSummary, SystemTimeline, TimelineCounts};
pub use timeline::{
    DateField, StatusTone, TimelineDates, TimelineStatus, classify, parse_date, progress,
    progress_percent,
};
