//! # Catalog
//!
//! The read-only collection of systems under comparison.
//!
//! ## Sources
//!
//! The catalog is loaded once from a [`CatalogSource`]:
//! - [`FixtureCatalog`]: the built-in sample of six systems
//! - [`JsonFileCatalog`]: a JSON array of systems in the same shape
//!
//! A different source (API response, database query) only has to produce
//! `Vec<BenchmarkSystem>`; nothing downstream changes.
//!
//! ## Validation
//!
//! Loading rejects duplicate ids and oversized catalogs. Field contents are
//! not validated: absent and malformed values are handled softly by the
//! derivations.

use crate::filter::{FilterCriteria, FilterField, FilterGroup, filter_systems};
use crate::primitives::{MAX_CATALOG_FILE_SIZE, MAX_CATALOG_SYSTEMS};
use crate::{BenchmarkSystem, DashError, SystemId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const FIXTURE_JSON: &str = include_str!("fixtures/catalog.json");

// =============================================================================
// SOURCES
// =============================================================================

/// Supplies the systems of a catalog.
///
/// Implementors should be side-effect free apart from reading their input.
pub trait CatalogSource: Send + Sync {
    /// Produce every system, in catalog order.
    fn load(&self) -> Result<Vec<BenchmarkSystem>, DashError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// The built-in sample catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalog;

impl CatalogSource for FixtureCatalog {
    fn load(&self) -> Result<Vec<BenchmarkSystem>, DashError> {
        parse_systems(FIXTURE_JSON.as_bytes())
    }

    fn describe(&self) -> String {
        "built-in fixture".to_string()
    }
}

/// A catalog stored as a JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileCatalog {
    fn load(&self) -> Result<Vec<BenchmarkSystem>, DashError> {
        let validated = validate_file_path(&self.path)?;
        validate_file_size(&validated, MAX_CATALOG_FILE_SIZE)?;

        let data = std::fs::read(&validated)
            .map_err(|e| DashError::IoError(format!("Read catalog: {}", e)))?;
        parse_systems(&data)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Decode a JSON array of systems.
pub fn parse_systems(data: &[u8]) -> Result<Vec<BenchmarkSystem>, DashError> {
    serde_json::from_slice(data).map_err(|e| DashError::DeserializationError(e.to_string()))
}

/// Resolve symlinks and `..`, and require a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, DashError> {
    let canonical = path.canonicalize().map_err(|e| {
        DashError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(DashError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn validate_file_size(path: &Path, max_size: u64) -> Result<(), DashError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| DashError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(DashError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

// =============================================================================
// CATALOG
// =============================================================================

/// Options offered for one field in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOptions {
    pub field: FilterField,
    pub label: String,
    pub options: Vec<String>,
}

/// One section of the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterGroupOptions {
    pub group: FilterGroup,
    pub title: String,
    pub fields: Vec<FieldOptions>,
}

/// Immutable, validated collection of systems.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: Vec<BenchmarkSystem>,
}

impl Catalog {
    /// Validate and wrap a list of systems.
    pub fn new(systems: Vec<BenchmarkSystem>) -> Result<Self, DashError> {
        if systems.len() > MAX_CATALOG_SYSTEMS {
            return Err(DashError::CatalogTooLarge(systems.len(), MAX_CATALOG_SYSTEMS));
        }

        let mut seen = BTreeSet::new();
        for system in &systems {
            if !seen.insert(system.id) {
                return Err(DashError::DuplicateSystemId(system.id));
            }
        }

        Ok(Self { systems })
    }

    /// Load from a source and validate.
    pub fn from_source(source: &dyn CatalogSource) -> Result<Self, DashError> {
        Self::new(source.load()?)
    }

    /// The built-in sample catalog.
    pub fn fixture() -> Result<Self, DashError> {
        Self::from_source(&FixtureCatalog)
    }

    #[must_use]
    pub fn systems(&self) -> &[BenchmarkSystem] {
        &self.systems
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SystemId) -> Option<&BenchmarkSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn require(&self, id: SystemId) -> Result<&BenchmarkSystem, DashError> {
        self.get(id).ok_or(DashError::SystemNotFound(id))
    }

    /// Filter the catalog. See [`filter_systems`].
    #[must_use]
    pub fn filter(
        &self,
        criteria: &FilterCriteria,
        free_text: Option<&str>,
    ) -> Vec<&BenchmarkSystem> {
        filter_systems(&self.systems, criteria, free_text)
    }

    /// Distinct non-empty values of a field, in first-seen order.
    #[must_use]
    pub fn unique_values(&self, field: FilterField) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.systems
            .iter()
            .filter_map(|s| field.value_of(&s.system_info))
            .filter(|v| !v.is_empty())
            .filter(|v| seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    /// Every filter group with the options present in this catalog.
    ///
    /// Fields with no values are omitted; groups are always listed.
    #[must_use]
    pub fn filter_options(&self) -> Vec<FilterGroupOptions> {
        FilterGroup::ALL
            .iter()
            .map(|group| FilterGroupOptions {
                group: *group,
                title: group.title().to_string(),
                fields: group
                    .fields()
                    .filter_map(|field| {
                        let options = self.unique_values(field);
                        (!options.is_empty()).then(|| FieldOptions {
                            field,
                            label: field.label().to_string(),
                            options,
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
