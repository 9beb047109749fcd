//! # Dashboard Primitives
//!
//! Fixed constants shared by the derivation modules and the binary.
//! They are compiled in and immutable at runtime.

/// Date format used by the catalog for every timeline field.
pub const CATALOG_DATE_FORMAT: &str = "%Y-%m-%d";

/// Display format for timeline dates (`Mar 3, 2025`).
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

// =============================================================================
// PLACEHOLDERS
// =============================================================================

/// Shown for an absent submit or target date.
pub const PLACEHOLDER_NOT_SET: &str = "Not set";

/// Shown for an absent actual completion date.
pub const PLACEHOLDER_PENDING: &str = "Pending";

/// Shown when a duration cannot be computed.
pub const PLACEHOLDER_NOT_AVAILABLE: &str = "N/A";

/// Shown for an absent benchmark score.
pub const PLACEHOLDER_SCORE: &str = "-";

// =============================================================================
// SCALES
// =============================================================================

/// Reference score that maps to 100 on the performance-profile chart.
pub const PROFILE_SCALE: u32 = 20_000;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of systems accepted from a catalog source.
pub const MAX_CATALOG_SYSTEMS: usize = 10_000;

/// Maximum size of a catalog file (16 MB).
pub const MAX_CATALOG_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Maximum length of a free-text query.
///
/// Longer queries are truncated by the binary before they reach the filter.
pub const MAX_QUERY_LENGTH: usize = 256;
