//! # Presentation Adapter
//!
//! Turns catalog records into display-ready values. This is the only place
//! where status and progress are derived per system; views consume the
//! resulting [`SystemTimeline`] and never recompute it.
//!
//! Placeholders ("Not set", "Pending", "N/A", "-") are produced here and
//! nowhere upstream.

use crate::benchmark::average_score;
use crate::primitives::{
    DISPLAY_DATE_FORMAT, PLACEHOLDER_NOT_AVAILABLE, PLACEHOLDER_NOT_SET, PLACEHOLDER_PENDING,
    PLACEHOLDER_SCORE,
};
use crate::timeline::{DateField, TimelineDates, TimelineStatus, progress_percent};
use crate::{BenchmarkSystem, SystemId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// FORMATTING
// =============================================================================

/// `Mar 3, 2025`, or `placeholder` when the date is unknown.
#[must_use]
pub fn display_date(date: Option<NaiveDate>, placeholder: &str) -> String {
    match date {
        Some(d) => d.format(DISPLAY_DATE_FORMAT).to_string(),
        None => placeholder.to_string(),
    }
}

/// A score, or `-` when it was not measured.
#[must_use]
pub fn display_score(score: Option<u32>) -> String {
    score.map_or_else(|| PLACEHOLDER_SCORE.to_string(), |s| s.to_string())
}

/// `18 days`, or `N/A`.
#[must_use]
pub fn display_duration(days: Option<i64>) -> String {
    match days {
        Some(1) => "1 day".to_string(),
        Some(n) => format!("{} days", n),
        None => PLACEHOLDER_NOT_AVAILABLE.to_string(),
    }
}

// =============================================================================
// SYSTEM TIMELINE
// =============================================================================

/// Timeline of one system, ready for a table row or a detail card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTimeline {
    pub id: SystemId,
    pub name: String,
    pub status: TimelineStatus,
    pub status_label: String,
    /// Fraction of the window elapsed, `[0, 1]`.
    pub progress: f64,
    pub progress_percent: u8,
    pub submitted: String,
    pub target: String,
    pub completed: String,
    pub duration: String,
    pub duration_days: Option<i64>,
    /// Fields holding values that could not be read as dates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub malformed_dates: Vec<DateField>,
}

impl SystemTimeline {
    #[must_use]
    pub fn derive(system: &BenchmarkSystem, now: NaiveDate) -> Self {
        let dates = TimelineDates::from_info(&system.system_info);
        let status = dates.classify(now);
        let progress = dates.progress(now);
        let duration_days = dates.duration_days();

        Self {
            id: system.id,
            name: system.system_name.clone(),
            status,
            status_label: status.label().to_string(),
            progress,
            progress_percent: progress_percent(progress),
            submitted: display_date(dates.submitted, PLACEHOLDER_NOT_SET),
            target: display_date(dates.target, PLACEHOLDER_NOT_SET),
            completed: display_date(dates.actual, PLACEHOLDER_PENDING),
            duration: display_duration(duration_days),
            duration_days,
            malformed_dates: dates.malformed,
        }
    }

    /// Derive every system in order.
    #[must_use]
    pub fn derive_all<'a>(
        systems: impl IntoIterator<Item = &'a BenchmarkSystem>,
        now: NaiveDate,
    ) -> Vec<Self> {
        systems
            .into_iter()
            .map(|s| Self::derive(s, now))
            .collect()
    }
}

// =============================================================================
// COUNTS & SUMMARY
// =============================================================================

/// Number of systems in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub completed_on_time: usize,
    pub completed_late: usize,
    pub overdue: usize,
}

impl TimelineCounts {
    #[must_use]
    pub fn tally<'a>(timelines: impl IntoIterator<Item = &'a SystemTimeline>) -> Self {
        let mut counts = Self::default();
        for timeline in timelines {
            let slot = match timeline.status {
                TimelineStatus::NotStarted => &mut counts.not_started,
                TimelineStatus::InProgress => &mut counts.in_progress,
                TimelineStatus::CompletedOnTime => &mut counts.completed_on_time,
                TimelineStatus::CompletedLate => &mut counts.completed_late,
                TimelineStatus::Overdue => &mut counts.overdue,
            };
            *slot = slot.saturating_add(1);
        }
        counts
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed_on_time.saturating_add(self.completed_late)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.not_started
            .saturating_add(self.in_progress)
            .saturating_add(self.completed())
            .saturating_add(self.overdue)
    }
}

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub as_of: String,
    pub systems_tested: usize,
    pub avg_time_spy: Option<u32>,
    pub avg_graphics_score: Option<u32>,
    pub avg_cpu_score: Option<u32>,
    pub timeline: TimelineCounts,
}

impl DashboardSummary {
    #[must_use]
    pub fn compute(systems: &[BenchmarkSystem], now: NaiveDate) -> Self {
        let scores = || systems.iter().map(|s| &s.benchmark_scores);
        let timelines = SystemTimeline::derive_all(systems, now);

        Self {
            as_of: now.format(crate::primitives::CATALOG_DATE_FORMAT).to_string(),
            systems_tested: systems.len(),
            avg_time_spy: average_score(scores().map(|s| s.time_spy)),
            avg_graphics_score: average_score(scores().map(|s| s.time_spy_graphics_score)),
            avg_cpu_score: average_score(scores().map(|s| s.time_spy_cpu_score)),
            timeline: TimelineCounts::tally(&timelines),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
