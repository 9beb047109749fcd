//! # Catalog Filter
//!
//! Narrows a list of systems by descriptive-field criteria and a free-text
//! query.
//!
//! - Values within one field combine with OR, fields combine with AND.
//! - A system whose field is absent never matches a filter on that field.
//! - Unknown field keys and empty value sets add no constraint.
//! - Free text matches name, CPU or GPU, case-insensitively.
//! - Output keeps input order. No criteria and no text is the identity.

use crate::{BenchmarkSystem, DashError, SystemInfo};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// FILTER FIELDS
// =============================================================================

/// A descriptive field that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FilterField {
    State,
    Series,
    Segment,
    #[serde(rename = "MKT")]
    Market,
    Model,
    #[serde(rename = "CPU")]
    Cpu,
    #[serde(rename = "GPU")]
    Gpu,
    #[serde(rename = "DRAM")]
    Dram,
    Panel,
    #[serde(rename = "BIOS")]
    Bios,
    #[serde(rename = "EC")]
    Ec,
    #[serde(rename = "VBIOS")]
    Vbios,
    #[serde(rename = "VGA_Driver")]
    VgaDriver,
    #[serde(rename = "PN")]
    PartNumber,
}

impl FilterField {
    pub const ALL: [FilterField; 14] = [
        FilterField::State,
        FilterField::Series,
        FilterField::Segment,
        FilterField::Market,
        FilterField::Model,
        FilterField::Cpu,
        FilterField::Gpu,
        FilterField::Dram,
        FilterField::Panel,
        FilterField::Bios,
        FilterField::Ec,
        FilterField::Vbios,
        FilterField::VgaDriver,
        FilterField::PartNumber,
    ];

    /// Key used in criteria maps and in the catalog file.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            FilterField::State => "State",
            FilterField::Series => "Series",
            FilterField::Segment => "Segment",
            FilterField::Market => "MKT",
            FilterField::Model => "Model",
            FilterField::Cpu => "CPU",
            FilterField::Gpu => "GPU",
            FilterField::Dram => "DRAM",
            FilterField::Panel => "Panel",
            FilterField::Bios => "BIOS",
            FilterField::Ec => "EC",
            FilterField::Vbios => "VBIOS",
            FilterField::VgaDriver => "VGA_Driver",
            FilterField::PartNumber => "PN",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Market => "Market",
            FilterField::VgaDriver => "VGA Driver",
            FilterField::PartNumber => "P/N",
            other => other.key(),
        }
    }

    /// Look a field up by its key. Exact match.
    #[must_use]
    pub fn from_key(key: &str) -> Option<FilterField> {
        FilterField::ALL.into_iter().find(|f| f.key() == key)
    }

    /// Read this field from a system.
    #[must_use]
    pub fn value_of<'a>(&self, info: &'a SystemInfo) -> Option<&'a str> {
        let value = match self {
            FilterField::State => &info.state,
            FilterField::Series => &info.series,
            FilterField::Segment => &info.segment,
            FilterField::Market => &info.market,
            FilterField::Model => &info.model,
            FilterField::Cpu => &info.cpu,
            FilterField::Gpu => &info.gpu,
            FilterField::Dram => &info.dram,
            FilterField::Panel => &info.panel,
            FilterField::Bios => &info.bios,
            FilterField::Ec => &info.ec,
            FilterField::Vbios => &info.vbios,
            FilterField::VgaDriver => &info.vga_driver,
            FilterField::PartNumber => &info.part_number,
        };
        value.as_deref()
    }

    #[must_use]
    pub fn group(&self) -> FilterGroup {
        match self {
            FilterField::State
            | FilterField::Series
            | FilterField::Segment
            | FilterField::Market
            | FilterField::Model => FilterGroup::SystemIdentification,
            FilterField::Cpu | FilterField::Gpu | FilterField::Dram | FilterField::Panel => {
                FilterGroup::HardwareConfiguration
            }
            FilterField::Bios
            | FilterField::Ec
            | FilterField::Vbios
            | FilterField::VgaDriver
            | FilterField::PartNumber => FilterGroup::SystemVersion,
        }
    }
}

impl std::str::FromStr for FilterField {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterField::from_key(s).ok_or_else(|| DashError::UnknownField(s.to_string()))
    }
}

/// Section of the filter panel a field is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterGroup {
    SystemIdentification,
    HardwareConfiguration,
    SystemVersion,
}

impl FilterGroup {
    pub const ALL: [FilterGroup; 3] = [
        FilterGroup::SystemIdentification,
        FilterGroup::HardwareConfiguration,
        FilterGroup::SystemVersion,
    ];

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            FilterGroup::SystemIdentification => "System Identification",
            FilterGroup::HardwareConfiguration => "Hardware Configuration",
            FilterGroup::SystemVersion => "System Version",
        }
    }

    /// Fields of this group, in panel order.
    pub fn fields(&self) -> impl Iterator<Item = FilterField> + '_ {
        FilterField::ALL
            .into_iter()
            .filter(move |f| f.group() == *self)
    }
}

// =============================================================================
// CRITERIA
// =============================================================================

/// Active filter selection: field key → accepted values.
///
/// Keys are plain strings so that selections coming from a view layer can be
/// passed through unchanged; keys that do not name a [`FilterField`] are
/// ignored when filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCriteria(pub BTreeMap<String, BTreeSet<String>>);

impl FilterCriteria {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of one accepted value.
    #[must_use]
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.insert(field.key(), value);
        self
    }

    /// Accept `value` for the field `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().insert(value.into());
    }

    /// Select `value` if it is not selected, deselect it otherwise.
    ///
    /// A field whose last value is deselected is removed entirely.
    pub fn toggle(&mut self, field: FilterField, value: &str) {
        let key = field.key();
        match self.0.get_mut(key) {
            Some(values) if values.contains(value) => {
                values.remove(value);
                if values.is_empty() {
                    self.0.remove(key);
                }
            }
            Some(values) => {
                values.insert(value.to_string());
            }
            None => {
                self.insert(key, value);
            }
        }
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Total number of selected values across all fields.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Parse a `KEY=VALUE` pair and accept it.
    ///
    /// The key must name a known field; the value may contain `=`.
    pub fn parse_pair(&mut self, pair: &str) -> Result<(), DashError> {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| DashError::InvalidFilter(format!("expected KEY=VALUE, got '{}'", pair)))?;
        let field: FilterField = key.trim().parse()?;
        let value = value.trim();
        if value.is_empty() {
            return Err(DashError::InvalidFilter(format!(
                "empty value for '{}'",
                field.key()
            )));
        }
        self.insert(field.key(), value);
        Ok(())
    }

    /// Constraints that actually apply: known fields with a non-empty set.
    fn constraints(&self) -> impl Iterator<Item = (FilterField, &BTreeSet<String>)> {
        self.0.iter().filter_map(|(key, values)| {
            let field = FilterField::from_key(key)?;
            (!values.is_empty()).then_some((field, values))
        })
    }

    /// Keys that do not name a filterable field.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| FilterField::from_key(k).is_none())
    }

    /// Does one system satisfy every applicable constraint?
    #[must_use]
    pub fn matches(&self, system: &BenchmarkSystem) -> bool {
        self.constraints().all(|(field, accepted)| {
            field
                .value_of(&system.system_info)
                .is_some_and(|value| accepted.contains(value))
        })
    }
}

// =============================================================================
// FREE TEXT
// =============================================================================

/// Case-insensitive substring match on name, CPU and GPU.
///
/// `needle` must already be lowercase.
fn matches_text(system: &BenchmarkSystem, needle: &str) -> bool {
    let info = &system.system_info;
    std::iter::once(Some(system.system_name.as_str()))
        .chain([info.cpu.as_deref(), info.gpu.as_deref()])
        .flatten()
        .any(|haystack| haystack.to_lowercase().contains(needle))
}

// =============================================================================
// FILTER
// =============================================================================

/// Filter systems, keeping input order.
///
/// An empty `free_text` is treated as absent.
#[must_use]
pub fn filter_systems<'a>(
    systems: &'a [BenchmarkSystem],
    criteria: &FilterCriteria,
    free_text: Option<&str>,
) -> Vec<&'a BenchmarkSystem> {
    let needle = free_text
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    systems
        .iter()
        .filter(|system| criteria.matches(system))
        .filter(|system| {
            needle
                .as_deref()
                .is_none_or(|needle| matches_text(system, needle))
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
