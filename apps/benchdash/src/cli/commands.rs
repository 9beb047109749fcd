//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Every command loads the catalog through the resolved [`Config`], so a
//! terminal report and the HTTP API always see the same data.

use crate::api::{self, AppState, FilterRequest};
use crate::config::Config;
use benchdash_core::presentation::display_score;
use benchdash_core::primitives::{CATALOG_DATE_FORMAT, PROFILE_SCALE};
use benchdash_core::{
    BenchmarkSuite, Catalog, DashError, DashboardSummary, FilterField, PerformanceProfile,
    SuiteSummary, SystemTimeline, TimelineCounts, profile_percent,
};
use chrono::NaiveDate;
use serde::Serialize;

// =============================================================================
// HELPERS
// =============================================================================

/// Catalog and reporting date, as every report needs them.
fn load(config: &Config) -> Result<(Catalog, NaiveDate), DashError> {
    let catalog = config.load_catalog()?;
    let today = config.clock()?.today();
    Ok((catalog, today))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DashError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| DashError::SerializationError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn warn_ignored(request: &FilterRequest) {
    for key in request.ignored_keys() {
        tracing::warn!("Ignoring unknown filter field '{}'", key);
    }
}

/// Cut `text` to `width` characters for table cells.
fn cell(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// A ten-slot text progress bar.
fn bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) / 10;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(10 - filled))
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config) -> Result<(), DashError> {
    let catalog = config.load_catalog()?;
    let clock = config.clock()?;

    println!("Benchdash Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Systems:  {}", catalog.len());
    println!("  As of:    {}", clock.today());
    println!();
    println!("Endpoints:");
    println!("  GET  /health         - Health check");
    println!("  GET  /systems        - Full catalog");
    println!("  POST /systems/filter - Filtered catalog");
    println!("  GET  /systems/{{id}}   - One system with timeline");
    println!("  POST /timeline       - Timeline views");
    println!("  POST /profiles       - Performance profiles");
    println!("  GET  /suites/{{suite}} - Suite ranking");
    println!("  GET  /summary        - Dashboard summary");
    println!("  GET  /filters        - Filter options");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(AppState::new(catalog, clock), &config.server).await
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List systems matching the filter.
pub fn cmd_list(
    config: &Config,
    json_mode: bool,
    filters: &[String],
    query: Option<String>,
) -> Result<(), DashError> {
    let request = FilterRequest::from_pairs(filters, query)?;
    let (catalog, today) = load(config)?;
    warn_ignored(&request);

    let systems = request.apply(&catalog);

    if json_mode {
        print_json(&systems)?;
        return Ok(());
    }

    println!(
        "{:<4} {:<16} {:<8} {:<15} {:<26} {:<22} {:<18}",
        "ID", "Name", "Market", "State", "CPU", "GPU", "Status"
    );
    for system in &systems {
        let info = &system.system_info;
        let timeline = SystemTimeline::derive(system, today);
        println!(
            "{:<4} {:<16} {:<8} {:<15} {:<26} {:<22} {:<18}",
            system.id,
            cell(&system.system_name, 16),
            cell(info.market.as_deref().unwrap_or("-"), 8),
            cell(info.state.as_deref().unwrap_or("-"), 15),
            cell(info.cpu.as_deref().unwrap_or("-"), 26),
            cell(info.gpu.as_deref().unwrap_or("-"), 22),
            timeline.status_label,
        );
    }
    println!();
    println!("{} of {} systems", systems.len(), catalog.len());

    Ok(())
}

// =============================================================================
// TIMELINE COMMAND
// =============================================================================

/// Show timeline status and progress of the filtered systems.
pub fn cmd_timeline(
    config: &Config,
    json_mode: bool,
    filters: &[String],
    query: Option<String>,
) -> Result<(), DashError> {
    let request = FilterRequest::from_pairs(filters, query)?;
    let (catalog, today) = load(config)?;
    warn_ignored(&request);

    let timelines = SystemTimeline::derive_all(request.apply(&catalog), today);
    let counts = TimelineCounts::tally(&timelines);

    if json_mode {
        let output = serde_json::json!({
            "as_of": today.format(CATALOG_DATE_FORMAT).to_string(),
            "counts": counts,
            "timelines": timelines,
        });
        print_json(&output)?;
        return Ok(());
    }

    println!("Benchmark Timeline (as of {})", today);
    println!("==============================");
    println!();
    for t in &timelines {
        println!("{} ({})", t.name, t.id);
        println!("  Status:    {}", t.status_label);
        println!("  Progress:  {} {}%", bar(t.progress_percent), t.progress_percent);
        println!("  Submitted: {}", t.submitted);
        println!("  Target:    {}", t.target);
        println!("  Completed: {}", t.completed);
        println!("  Duration:  {}", t.duration);
        println!();
    }
    println!(
        "On time: {}  Late: {}  In progress: {}  Overdue: {}  Not started: {}",
        counts.completed_on_time,
        counts.completed_late,
        counts.in_progress,
        counts.overdue,
        counts.not_started
    );

    Ok(())
}

// =============================================================================
// PROFILE COMMAND
// =============================================================================

/// Show performance-profile values of the filtered systems.
pub fn cmd_profile(
    config: &Config,
    json_mode: bool,
    filters: &[String],
    query: Option<String>,
) -> Result<(), DashError> {
    let request = FilterRequest::from_pairs(filters, query)?;
    let catalog = config.load_catalog()?;
    warn_ignored(&request);

    let profiles: Vec<PerformanceProfile> = request
        .apply(&catalog)
        .into_iter()
        .map(PerformanceProfile::compute)
        .collect();

    if json_mode {
        return print_json(&profiles);
    }

    println!("Performance Profile (100 = {} points)", PROFILE_SCALE);
    println!("=====================================");
    for profile in &profiles {
        println!();
        println!("{} ({})", profile.name, profile.id);
        for axis in &profile.axes {
            match axis.value {
                Some(value) => println!("  {:<15} {:>6.1}", axis.label, value),
                None => println!("  {:<15} {:>6}", axis.label, "N/A"),
            }
        }
    }

    Ok(())
}

// =============================================================================
// SUITE COMMAND
// =============================================================================

/// Show ranking and averages of one suite.
pub fn cmd_suite(config: &Config, json_mode: bool, suite: &str) -> Result<(), DashError> {
    let suite: BenchmarkSuite = suite.parse()?;
    let catalog = config.load_catalog()?;
    let summary = SuiteSummary::compute(suite, catalog.systems());

    if json_mode {
        print_json(&summary)?;
        return Ok(());
    }

    println!("{}", summary.title);
    println!("{}", "=".repeat(summary.title.len()));
    println!("{}", suite.description());
    println!();
    println!("Average: {}", display_score(summary.average));
    if let Some(best) = &summary.best {
        println!("Best:    {} ({})", best.name, best.score);
    }
    if let Some(lead) = summary.lead_percent {
        println!("Lead:    {}% over runner-up", lead);
    }
    println!();

    println!("Ranking:");
    for (rank, entry) in summary.ranking.iter().enumerate() {
        let profile = profile_percent(Some(entry.score)).unwrap_or(0.0);
        println!(
            "  {:>2}. {:<16} {:>6}  ({:.1}% of profile scale)",
            rank + 1,
            cell(&entry.name, 16),
            entry.score,
            profile
        );
    }
    println!();

    println!("Sub-scores:");
    for row in &summary.sub_scores {
        let values: Vec<String> = row
            .values
            .iter()
            .map(|v| format!("{}: {}", v.label, display_score(v.score)))
            .collect();
        println!("  {:<16} {}", cell(&row.name, 16), values.join("  "));
    }

    Ok(())
}

// =============================================================================
// SUMMARY COMMAND
// =============================================================================

/// Show dashboard headline numbers.
pub fn cmd_summary(config: &Config, json_mode: bool) -> Result<(), DashError> {
    let (catalog, today) = load(config)?;
    let summary = DashboardSummary::compute(catalog.systems(), today);

    if json_mode {
        print_json(&summary)?;
        return Ok(());
    }

    let t = &summary.timeline;
    println!("Benchmark Dashboard Summary");
    println!("===========================");
    println!("As of:              {}", summary.as_of);
    println!();
    println!("Systems tested:     {}", summary.systems_tested);
    println!("Avg Time Spy:       {}", display_score(summary.avg_time_spy));
    println!("Avg Graphics Score: {}", display_score(summary.avg_graphics_score));
    println!("Avg CPU Score:      {}", display_score(summary.avg_cpu_score));
    println!();
    println!("Timeline:");
    println!("  Completed:        {} ({} late)", t.completed(), t.completed_late);
    println!("  In progress:      {}", t.in_progress);
    println!("  Overdue:          {}", t.overdue);
    println!("  Not started:      {}", t.not_started);

    Ok(())
}

// =============================================================================
// VALUES & FILTERS COMMANDS
// =============================================================================

/// List distinct values of one field.
pub fn cmd_values(config: &Config, json_mode: bool, field: &str) -> Result<(), DashError> {
    let field: FilterField = field.parse()?;
    let catalog = config.load_catalog()?;
    let values = catalog.unique_values(field);

    if json_mode {
        let output = serde_json::json!({
            "field": field.key(),
            "label": field.label(),
            "values": values,
        });
        print_json(&output)?;
        return Ok(());
    }

    println!("{} ({})", field.label(), field.key());
    for value in &values {
        println!("  {}", value);
    }

    Ok(())
}

/// Show filter groups with their options.
pub fn cmd_filters(config: &Config, json_mode: bool) -> Result<(), DashError> {
    let catalog = config.load_catalog()?;
    let groups = catalog.filter_options();

    if json_mode {
        print_json(&groups)?;
        return Ok(());
    }

    for group in &groups {
        println!("{}", group.title);
        if group.fields.is_empty() {
            println!("  (no values)");
        }
        for field in &group.fields {
            println!(
                "  {:<12} {}",
                format!("{}:", field.label),
                field.options.join(", ")
            );
        }
        println!();
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
