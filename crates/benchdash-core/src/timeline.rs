//! # Timeline Derivation
//!
//! Classifies a system's project timeline and measures how far it has
//! progressed through its submit → target window.
//!
//! ## Status Rules
//!
//! Evaluated strictly in this order:
//!
//! | # | Condition | Status |
//! |---|-----------|--------|
//! | 1 | submitted absent | `NotStarted` |
//! | 2 | target absent | `InProgress` |
//! | 3 | actual present, actual <= target | `CompletedOnTime` |
//! | 4 | actual present, actual > target | `CompletedLate` |
//! | 5 | now > target | `Overdue` |
//! | 6 | otherwise | `InProgress` |
//!
//! A completed system is never overdue. Lateness is binary: how late a
//! system finished does not change its status.
//!
//! ## Soft Parsing
//!
//! Catalog dates are raw strings. An unparsable date is treated exactly like
//! an absent one, so a bad field degrades the status toward `NotStarted` /
//! `InProgress` and the progress toward 0 instead of failing.

use crate::primitives::CATALOG_DATE_FORMAT;
use crate::{DashError, SystemInfo};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

// =============================================================================
// DATE PARSING
// =============================================================================

/// Parse a catalog date, returning `None` for absent, blank or malformed input.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept).
#[must_use]
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(trimmed, CATALOG_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Parse a caller-supplied date (CLI flag, config value).
///
/// Unlike [`parse_date`], a malformed value is an error: the caller asked for
/// a specific date and must hear that it was not understood.
pub fn parse_date_strict(raw: &str) -> Result<NaiveDate, DashError> {
    parse_date(Some(raw)).ok_or_else(|| DashError::InvalidDate(raw.to_string()))
}

// =============================================================================
// STATUS
// =============================================================================

/// Project-timeline state of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimelineStatus {
    NotStarted,
    InProgress,
    CompletedOnTime,
    CompletedLate,
    Overdue,
}

/// Indicator color the view layer uses for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Green,
    Yellow,
    Red,
    Blue,
    Gray,
}

impl TimelineStatus {
    /// All statuses, in display order.
    pub const ALL: [TimelineStatus; 5] = [
        TimelineStatus::NotStarted,
        TimelineStatus::InProgress,
        TimelineStatus::CompletedOnTime,
        TimelineStatus::CompletedLate,
        TimelineStatus::Overdue,
    ];

    /// Machine identifier (`completed-on-time`).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineStatus::NotStarted => "not-started",
            TimelineStatus::InProgress => "in-progress",
            TimelineStatus::CompletedOnTime => "completed-on-time",
            TimelineStatus::CompletedLate => "completed-late",
            TimelineStatus::Overdue => "overdue",
        }
    }

    /// Human label (`completed on time`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TimelineStatus::NotStarted => "not started",
            TimelineStatus::InProgress => "in progress",
            TimelineStatus::CompletedOnTime => "completed on time",
            TimelineStatus::CompletedLate => "completed late",
            TimelineStatus::Overdue => "overdue",
        }
    }

    #[must_use]
    pub fn tone(&self) -> StatusTone {
        match self {
            TimelineStatus::CompletedOnTime => StatusTone::Green,
            TimelineStatus::CompletedLate => StatusTone::Yellow,
            TimelineStatus::Overdue => StatusTone::Red,
            TimelineStatus::InProgress => StatusTone::Blue,
            TimelineStatus::NotStarted => StatusTone::Gray,
        }
    }

    /// True for both terminal states.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(
            self,
            TimelineStatus::CompletedOnTime | TimelineStatus::CompletedLate
        )
    }
}

impl std::fmt::Display for TimelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Classify a timeline from its three optional dates.
#[must_use]
pub fn classify(
    submitted: Option<NaiveDate>,
    target: Option<NaiveDate>,
    actual: Option<NaiveDate>,
    now: NaiveDate,
) -> TimelineStatus {
    if submitted.is_none() {
        return TimelineStatus::NotStarted;
    }
    let Some(target) = target else {
        return TimelineStatus::InProgress;
    };

    match actual {
        Some(actual) if actual <= target => TimelineStatus::CompletedOnTime,
        Some(_) => TimelineStatus::CompletedLate,
        None if now > target => TimelineStatus::Overdue,
        None => TimelineStatus::InProgress,
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Fraction of the submit → target window that has elapsed, in `[0, 1]`.
///
/// Any completion counts as 1: lateness is carried by the status, not by the
/// bar position. A window whose target does not lie after the submit date
/// has no usable length; it reads 1 once the submit date is reached.
#[must_use]
pub fn progress(
    submitted: Option<NaiveDate>,
    target: Option<NaiveDate>,
    actual: Option<NaiveDate>,
    now: NaiveDate,
) -> f64 {
    let (Some(submitted), Some(target)) = (submitted, target) else {
        return 0.0;
    };
    if actual.is_some() {
        return 1.0;
    }

    let window = (target - submitted).num_days();
    if window <= 0 {
        return if now >= submitted { 1.0 } else { 0.0 };
    }

    let elapsed = (now - submitted).num_days();
    (elapsed as f64 / window as f64).clamp(0.0, 1.0)
}

/// Progress as a whole percentage, for progress-bar widths.
#[must_use]
pub fn progress_percent(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

// =============================================================================
// TIMELINE DATES
// =============================================================================

/// The three timeline fields of a system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Submitted,
    Target,
    Actual,
}

impl DateField {
    /// Key of the field in the catalog file.
    #[must_use]
    pub fn catalog_key(&self) -> &'static str {
        match self {
            DateField::Submitted => "PMSubmitDate",
            DateField::Target => "TargetCompletionDate",
            DateField::Actual => "ActualCompletionDate",
        }
    }
}

/// Parsed timeline dates of one system.
///
/// `malformed` lists fields that held a value which could not be parsed;
/// those fields read as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineDates {
    pub submitted: Option<NaiveDate>,
    pub target: Option<NaiveDate>,
    pub actual: Option<NaiveDate>,
    pub malformed: Vec<DateField>,
}

impl TimelineDates {
    /// Build from already-parsed dates.
    #[must_use]
    pub fn new(
        submitted: Option<NaiveDate>,
        target: Option<NaiveDate>,
        actual: Option<NaiveDate>,
    ) -> Self {
        Self {
            submitted,
            target,
            actual,
            malformed: Vec::new(),
        }
    }

    /// Parse the raw dates of a system.
    #[must_use]
    pub fn from_info(info: &SystemInfo) -> Self {
        let mut malformed = Vec::new();
        let mut read = |raw: &Option<String>, field: DateField| {
            let parsed = parse_date(raw.as_deref());
            let blank = raw.as_deref().is_none_or(|s| s.trim().is_empty());
            if parsed.is_none() && !blank {
                malformed.push(field);
            }
            parsed
        };

        let submitted = read(&info.submitted_date, DateField::Submitted);
        let target = read(&info.target_completion_date, DateField::Target);
        let actual = read(&info.actual_completion_date, DateField::Actual);

        Self {
            submitted,
            target,
            actual,
            malformed,
        }
    }

    #[must_use]
    pub fn classify(&self, now: NaiveDate) -> TimelineStatus {
        classify(self.submitted, self.target, self.actual, now)
    }

    #[must_use]
    pub fn progress(&self, now: NaiveDate) -> f64 {
        progress(self.submitted, self.target, self.actual, now)
    }

    /// Whole days from submit to completion (or to target while pending).
    ///
    /// `None` unless both the submit and target dates are known. Rounded up;
    /// the sign of the span is ignored.
    #[must_use]
    pub fn duration_days(&self) -> Option<i64> {
        let start = self.submitted?;
        let target = self.target?;
        let end = self.actual.unwrap_or(target);
        Some((end - start).num_days().abs())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
    }

    #[test]
    fn parse_accepts_catalog_and_rfc3339() {
        assert_eq!(parse_date(Some("2025-03-05")), Some(d("2025-03-05")));
        assert_eq!(
            parse_date(Some("2025-03-05T10:00:00Z")),
            Some(d("2025-03-05"))
        );
        assert_eq!(parse_date(Some(" 2025-03-05 ")), Some(d("2025-03-05")));
    }

    #[test]
    fn parse_rejects_garbage_softly() {
        assert_eq!(parse_date(None), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("soon")), None);
        assert_eq!(parse_date(Some("2025-02-30")), None);
    }

    #[test]
    fn strict_parse_reports_input() {
        let err = parse_date_strict("tomorrow").expect_err("must fail");
        assert!(matches!(err, DashError::InvalidDate(s) if s == "tomorrow"));
    }

    #[test]
    fn not_started_ignores_other_fields() {
        let now = d("2025-03-01");
        assert_eq!(
            classify(None, Some(d("2099-01-01")), Some(d("2025-01-01")), now),
            TimelineStatus::NotStarted
        );
    }

    #[test]
    fn missing_target_is_in_progress_even_when_completed() {
        let now = d("2025-03-01");
        assert_eq!(
            classify(Some(d("2025-01-01")), None, Some(d("2025-02-01")), now),
            TimelineStatus::InProgress
        );
    }

    #[test]
    fn completion_on_target_day_is_on_time() {
        let now = d("2025-06-01");
        assert_eq!(
            classify(
                Some(d("2025-01-01")),
                Some(d("2025-02-01")),
                Some(d("2025-02-01")),
                now
            ),
            TimelineStatus::CompletedOnTime
        );
    }

    #[test]
    fn late_completion_is_never_overdue() {
        let now = d("2025-06-01");
        assert_eq!(
            classify(
                Some(d("2025-01-20")),
                Some(d("2025-02-10")),
                Some(d("2025-02-15")),
                now
            ),
            TimelineStatus::CompletedLate
        );
    }

    #[test]
    fn overdue_only_after_target_day() {
        let s = Some(d("2025-03-01"));
        let t = Some(d("2025-04-15"));
        assert_eq!(classify(s, t, None, d("2025-04-15")), TimelineStatus::InProgress);
        assert_eq!(classify(s, t, None, d("2025-04-16")), TimelineStatus::Overdue);
    }

    #[test]
    fn progress_midpoint() {
        let p = progress(
            Some(d("2025-01-10")),
            Some(d("2025-01-30")),
            None,
            d("2025-01-20"),
        );
        assert!((p - 0.5).abs() < 1e-9);
        assert_eq!(progress_percent(p), 50);
    }

    #[test]
    fn progress_clamps_both_ends() {
        let s = Some(d("2025-01-10"));
        let t = Some(d("2025-01-30"));
        assert_eq!(progress(s, t, None, d("2024-12-01")), 0.0);
        assert_eq!(progress(s, t, None, d("2025-05-01")), 1.0);
    }

    #[test]
    fn progress_needs_both_window_ends() {
        let now = d("2025-01-20");
        assert_eq!(progress(None, Some(d("2025-01-30")), None, now), 0.0);
        assert_eq!(progress(Some(d("2025-01-10")), None, Some(now), now), 0.0);
    }

    #[test]
    fn progress_zero_length_window() {
        let day = Some(d("2025-02-01"));
        assert_eq!(progress(day, day, None, d("2025-01-31")), 0.0);
        assert_eq!(progress(day, day, None, d("2025-02-01")), 1.0);
    }

    #[test]
    fn progress_inverted_window_behaves_like_zero_length() {
        let s = Some(d("2025-02-10"));
        let t = Some(d("2025-02-01"));
        assert_eq!(progress(s, t, None, d("2025-02-05")), 0.0);
        assert_eq!(progress(s, t, None, d("2025-02-10")), 1.0);
    }

    #[test]
    fn malformed_dates_read_as_absent() {
        let info = SystemInfo {
            submitted_date: Some("2025-13-01".into()),
            target_completion_date: Some("2025-04-01".into()),
            actual_completion_date: Some("   ".into()),
            ..SystemInfo::default()
        };

        let dates = TimelineDates::from_info(&info);
        assert_eq!(dates.submitted, None);
        assert_eq!(dates.target, Some(d("2025-04-01")));
        assert_eq!(dates.actual, None);
        assert_eq!(dates.malformed, vec![DateField::Submitted]);
        assert_eq!(dates.classify(d("2025-05-01")), TimelineStatus::NotStarted);
        assert_eq!(dates.progress(d("2025-05-01")), 0.0);
    }

    #[test]
    fn duration_uses_actual_then_target() {
        let mut dates = TimelineDates::new(Some(d("2025-02-15")), Some(d("2025-03-05")), None);
        assert_eq!(dates.duration_days(), Some(18));

        dates.actual = Some(d("2025-03-03"));
        assert_eq!(dates.duration_days(), Some(16));

        dates.submitted = None;
        assert_eq!(dates.duration_days(), None);
    }

    #[test]
    fn duration_needs_a_target() {
        let dates = TimelineDates::new(
            Some(d("2025-02-15")),
            None,
            Some(d("2025-03-03")),
        );
        assert_eq!(dates.duration_days(), None);
        assert_eq!(dates.classify(d("2025-03-20")), TimelineStatus::InProgress);
    }

    #[test]
    fn status_strings() {
        assert_eq!(TimelineStatus::CompletedOnTime.as_str(), "completed-on-time");
        assert_eq!(TimelineStatus::CompletedOnTime.label(), "completed on time");
        assert_eq!(
            serde_json::to_string(&TimelineStatus::NotStarted).expect("serialize"),
            "\"not-started\""
        );
        assert_eq!(TimelineStatus::Overdue.tone(), StatusTone::Red);
        assert!(TimelineStatus::CompletedLate.is_completed());
        assert!(!TimelineStatus::Overdue.is_completed());
    }
}
