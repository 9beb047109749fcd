//! # Benchmark Suites
//!
//! Suite definitions and the per-suite numbers the dashboard charts show.
//!
//! | Suite | Main score | Sub-scores |
//! |-------|-----------|------------|
//! | Time Spy | `TimeSpy` | Graphics, CPU |
//! | Port Royal | `PortRoyal` | Graphics |
//! | Time Spy Extreme | `TimeSpyExtreme` | Graphics, CPU |
//! | Firestrike | `Firestrike` | Graphics, Physics, Combined |
//! | Firestrike Ultra | `FirestrikeUltra` | Graphics, Physics, Combined |
//!
//! Absent scores are left out of rankings and averages. They are never
//! counted as zero.

use crate::primitives::PROFILE_SCALE;
use crate::{BenchmarkSystem, DashError, ScoreKey, SystemId};
use serde::{Deserialize, Serialize};

// =============================================================================
// SUITES
// =============================================================================

/// A benchmark family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BenchmarkSuite {
    TimeSpy,
    PortRoyal,
    TimeSpyExtreme,
    Firestrike,
    FirestrikeUltra,
}

/// A named sub-score of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubScore {
    pub key: ScoreKey,
    pub label: &'static str,
}

const TIME_SPY_SUBS: &[SubScore] = &[
    SubScore { key: ScoreKey::TimeSpyGraphicsScore, label: "Graphics" },
    SubScore { key: ScoreKey::TimeSpyCpuScore, label: "CPU" },
];

const PORT_ROYAL_SUBS: &[SubScore] = &[SubScore {
    key: ScoreKey::PortRoyalGraphics,
    label: "Graphics",
}];

const TIME_SPY_EXTREME_SUBS: &[SubScore] = &[
    SubScore { key: ScoreKey::TimeSpyExtremeGraphicsScore, label: "Graphics" },
    SubScore { key: ScoreKey::TimeSpyExtremeCpuScore, label: "CPU" },
];

const FIRESTRIKE_SUBS: &[SubScore] = &[
    SubScore { key: ScoreKey::FirestrikeGraphic, label: "Graphics" },
    SubScore { key: ScoreKey::FirestrikePhysics, label: "Physics" },
    SubScore { key: ScoreKey::FirestrikeCombined, label: "Combined" },
];

const FIRESTRIKE_ULTRA_SUBS: &[SubScore] = &[
    SubScore { key: ScoreKey::FirestrikeUltraGraphic, label: "Graphics" },
    SubScore { key: ScoreKey::FirestrikeUltraPhysics, label: "Physics" },
    SubScore { key: ScoreKey::FirestrikeUltraCombined, label: "Combined" },
];

impl BenchmarkSuite {
    pub const ALL: [BenchmarkSuite; 5] = [
        BenchmarkSuite::TimeSpy,
        BenchmarkSuite::PortRoyal,
        BenchmarkSuite::TimeSpyExtreme,
        BenchmarkSuite::Firestrike,
        BenchmarkSuite::FirestrikeUltra,
    ];

    /// Identifier used in URLs and on the command line.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            BenchmarkSuite::TimeSpy => "TimeSpy",
            BenchmarkSuite::PortRoyal => "PortRoyal",
            BenchmarkSuite::TimeSpyExtreme => "TimeSpyExtreme",
            BenchmarkSuite::Firestrike => "Firestrike",
            BenchmarkSuite::FirestrikeUltra => "FirestrikeUltra",
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            BenchmarkSuite::TimeSpy => "Time Spy",
            BenchmarkSuite::PortRoyal => "Port Royal",
            BenchmarkSuite::TimeSpyExtreme => "Time Spy Extreme",
            BenchmarkSuite::Firestrike => "Firestrike",
            BenchmarkSuite::FirestrikeUltra => "Firestrike Ultra",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            BenchmarkSuite::TimeSpy => "DirectX 12 benchmark for gaming PCs",
            BenchmarkSuite::PortRoyal => "Ray tracing benchmark",
            BenchmarkSuite::TimeSpyExtreme => "4K DirectX 12 gaming benchmark",
            BenchmarkSuite::Firestrike => "DirectX 11 gaming PC benchmark",
            BenchmarkSuite::FirestrikeUltra => "4K UHD resolution benchmark",
        }
    }

    #[must_use]
    pub fn main_score(&self) -> ScoreKey {
        match self {
            BenchmarkSuite::TimeSpy => ScoreKey::TimeSpy,
            BenchmarkSuite::PortRoyal => ScoreKey::PortRoyal,
            BenchmarkSuite::TimeSpyExtreme => ScoreKey::TimeSpyExtreme,
            BenchmarkSuite::Firestrike => ScoreKey::Firestrike,
            BenchmarkSuite::FirestrikeUltra => ScoreKey::FirestrikeUltra,
        }
    }

    #[must_use]
    pub fn sub_scores(&self) -> &'static [SubScore] {
        match self {
            BenchmarkSuite::TimeSpy => TIME_SPY_SUBS,
            BenchmarkSuite::PortRoyal => PORT_ROYAL_SUBS,
            BenchmarkSuite::TimeSpyExtreme => TIME_SPY_EXTREME_SUBS,
            BenchmarkSuite::Firestrike => FIRESTRIKE_SUBS,
            BenchmarkSuite::FirestrikeUltra => FIRESTRIKE_ULTRA_SUBS,
        }
    }

    /// Chart color (hex).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            BenchmarkSuite::TimeSpy => "#3b82f6",
            BenchmarkSuite::PortRoyal => "#10b981",
            BenchmarkSuite::TimeSpyExtreme => "#6366f1",
            BenchmarkSuite::Firestrike => "#f59e0b",
            BenchmarkSuite::FirestrikeUltra => "#ec4899",
        }
    }
}

impl std::str::FromStr for BenchmarkSuite {
    type Err = DashError;

    /// Case-insensitive match on the id; spaces, dashes and underscores are
    /// ignored, so `time-spy-extreme`, `time_spy_extreme` and `Time Spy Extreme`
    /// all resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        BenchmarkSuite::ALL
            .into_iter()
            .find(|suite| suite.id().to_lowercase() == wanted)
            .ok_or_else(|| DashError::UnknownSuite(s.to_string()))
    }
}

impl std::fmt::Display for BenchmarkSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// =============================================================================
// AGGREGATES
// =============================================================================

/// Mean of the present values, rounded to the nearest integer.
///
/// `None` when no value is present.
#[must_use]
pub fn average_score(values: impl IntoIterator<Item = Option<u32>>) -> Option<u32> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0u64, 0u64), |(sum, count), v| {
            (sum.saturating_add(v as u64), count.saturating_add(1))
        });

    (count > 0).then(|| (sum as f64 / count as f64).round() as u32)
}

/// Score on the performance-profile scale (0–100 at [`PROFILE_SCALE`]).
#[must_use]
pub fn profile_percent(score: Option<u32>) -> Option<f64> {
    score.map(|s| s as f64 / PROFILE_SCALE as f64 * 100.0)
}

// =============================================================================
// PERFORMANCE PROFILE
// =============================================================================

/// Scores plotted on the performance-profile radar, in axis order.
const PROFILE_AXES: [(&str, ScoreKey); 5] = [
    ("Time Spy", ScoreKey::TimeSpy),
    ("Graphics Score", ScoreKey::TimeSpyGraphicsScore),
    ("CPU Score", ScoreKey::TimeSpyCpuScore),
    ("Firestrike", ScoreKey::Firestrike),
    ("Physics", ScoreKey::FirestrikePhysics),
];

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAxis {
    pub label: String,
    /// Score on the profile scale. Not clamped: a score above
    /// [`PROFILE_SCALE`] reads above 100.
    pub value: Option<f64>,
}

/// A system's scores normalized for the performance-profile chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceProfile {
    pub id: SystemId,
    pub name: String,
    pub axes: Vec<ProfileAxis>,
}

impl PerformanceProfile {
    #[must_use]
    pub fn compute(system: &BenchmarkSystem) -> Self {
        let axes = PROFILE_AXES
            .iter()
            .map(|&(label, key)| ProfileAxis {
                label: label.to_string(),
                value: profile_percent(system.benchmark_scores.get(key)),
            })
            .collect();

        Self {
            id: system.id,
            name: system.system_name.clone(),
            axes,
        }
    }

    /// Value on the axis with this label.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<f64> {
        self.axes
            .iter()
            .find(|a| a.label == label)
            .and_then(|a| a.value)
    }
}

// =============================================================================
// SUITE SUMMARY
// =============================================================================

/// One bar of a ranking chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedScore {
    pub id: SystemId,
    pub name: String,
    pub score: u32,
}

/// Sub-score values of one system, in suite order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScoreRow {
    pub id: SystemId,
    pub name: String,
    pub values: Vec<SubScoreValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScoreValue {
    pub label: String,
    pub score: Option<u32>,
}

/// Everything a suite card needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub suite: BenchmarkSuite,
    pub title: String,
    pub color: String,
    /// Systems with a main score, best first. Ties keep catalog order.
    pub ranking: Vec<RankedScore>,
    pub average: Option<u32>,
    pub best: Option<RankedScore>,
    /// How far the best score leads the runner-up, in whole percent.
    pub lead_percent: Option<i64>,
    pub sub_scores: Vec<SubScoreRow>,
}

impl SuiteSummary {
    #[must_use]
    pub fn compute<'a>(
        suite: BenchmarkSuite,
        systems: impl IntoIterator<Item = &'a BenchmarkSystem>,
    ) -> Self {
        let systems: Vec<&BenchmarkSystem> = systems.into_iter().collect();
        let main = suite.main_score();

        let mut ranking: Vec<RankedScore> = systems
            .iter()
            .filter_map(|s| {
                s.benchmark_scores.get(main).map(|score| RankedScore {
                    id: s.id,
                    name: s.system_name.clone(),
                    score,
                })
            })
            .collect();
        ranking.sort_by(|a, b| b.score.cmp(&a.score));

        let average = average_score(ranking.iter().map(|r| Some(r.score)));
        let best = ranking.first().cloned();

        let lead_percent = match ranking.as_slice() {
            [first, second, ..] if second.score > 0 => {
                let diff = first.score as f64 - second.score as f64;
                Some((diff / second.score as f64 * 100.0).round() as i64)
            }
            _ => None,
        };

        let sub_scores = systems
            .iter()
            .map(|s| SubScoreRow {
                id: s.id,
                name: s.system_name.clone(),
                values: suite
                    .sub_scores()
                    .iter()
                    .map(|sub| SubScoreValue {
                        label: sub.label.to_string(),
                        score: s.benchmark_scores.get(sub.key),
                    })
                    .collect(),
            })
            .collect();

        Self {
            suite,
            title: suite.title().to_string(),
            color: suite.color().to_string(),
            ranking,
            average,
            best,
            lead_percent,
            sub_scores,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
