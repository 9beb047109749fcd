//! # Configuration
//!
//! Settings for the server, the catalog source and the reporting date.
//!
//! ## Sources (highest precedence first)
//!
//! 1. Command-line flags (`--catalog`, `--as-of`, `server --host/--port`)
//! 2. Environment: `BENCHDASH_CORS_ORIGINS`, `BENCHDASH_RATE_LIMIT`
//! 3. TOML file: `--config <path>`, or `benchdash.toml` in the working
//!    directory when present
//! 4. Built-in defaults
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! cors_origins = ["http://localhost:3000"]
//! rate_limit = 100
//!
//! [catalog]
//! path = "catalog.json"
//!
//! [timeline]
//! as_of = "2025-03-20"
//! ```

use benchdash_core::timeline::parse_date_strict;
use benchdash_core::{
    Catalog, CatalogSource, Clock, DashError, FixedClock, FixtureCatalog, JsonFileCatalog,
    SystemClock,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "benchdash.toml";

/// Comma-separated allowed origins, or `*`.
pub const ENV_CORS_ORIGINS: &str = "BENCHDASH_CORS_ORIGINS";

/// Requests per second, `0` disables rate limiting.
pub const ENV_RATE_LIMIT: &str = "BENCHDASH_RATE_LIMIT";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// SECTIONS
// =============================================================================

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins. `None` allows localhost only, `["*"]` allows all.
    pub cors_origins: Option<Vec<String>>,
    /// Requests per second. `0` disables the limiter.
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            cors_origins: None,
            rate_limit: 100,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `[catalog]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// JSON catalog file. Absent means the built-in fixture.
    pub path: Option<PathBuf>,
}

/// `[timeline]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimelineConfig {
    /// Reporting date (`YYYY-MM-DD`). Absent means today.
    pub as_of: Option<String>,
}

// =============================================================================
// CONFIG
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub timeline: TimelineConfig,
}

impl Config {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, DashError> {
        toml::from_str(input).map_err(|e| DashError::ConfigError(e.to_string()))
    }

    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `benchdash.toml` is read if
    /// present and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, DashError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let metadata = std::fs::metadata(&path).map_err(|e| {
            DashError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(DashError::ConfigError(format!(
                "Config file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(&path).map_err(|e| {
            DashError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply `BENCHDASH_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_CORS_ORIGINS).ok().as_deref(),
            std::env::var(ENV_RATE_LIMIT).ok().as_deref(),
        );
    }

    /// Apply raw override values as they would appear in the environment.
    ///
    /// An unparseable rate limit is logged and ignored.
    pub fn apply_overrides(&mut self, cors_origins: Option<&str>, rate_limit: Option<&str>) {
        if let Some(origins) = cors_origins {
            self.server.cors_origins = Some(
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            );
        }

        if let Some(raw) = rate_limit {
            match raw.trim().parse::<u32>() {
                Ok(rps) => self.server.rate_limit = rps,
                Err(e) => tracing::warn!("Ignoring {}='{}': {}", ENV_RATE_LIMIT, raw, e),
            }
        }
    }

    /// The catalog source selected by `[catalog] path`.
    #[must_use]
    pub fn catalog_source(&self) -> Box<dyn CatalogSource> {
        match &self.catalog.path {
            Some(path) => Box::new(JsonFileCatalog::new(path)),
            None => Box::new(FixtureCatalog),
        }
    }

    /// Load and validate the catalog, logging unreadable timeline dates.
    pub fn load_catalog(&self) -> Result<Catalog, DashError> {
        let source = self.catalog_source();
        let catalog = Catalog::from_source(source.as_ref())?;
        tracing::info!("Loaded {} systems from {}", catalog.len(), source.describe());
        log_malformed_dates(&catalog);
        Ok(catalog)
    }

    /// The clock selected by `[timeline] as_of`.
    pub fn clock(&self) -> Result<Arc<dyn Clock>, DashError> {
        match self.timeline.as_of.as_deref() {
            Some(raw) => {
                let date = parse_date_strict(raw)?;
                tracing::info!("Timeline pinned to {}", date);
                Ok(Arc::new(FixedClock::new(date)))
            }
            None => Ok(Arc::new(SystemClock)),
        }
    }
}

/// Warn once per system field whose date could not be read.
fn log_malformed_dates(catalog: &Catalog) {
    for system in catalog.systems() {
        let dates = benchdash_core::TimelineDates::from_info(&system.system_info);
        for field in &dates.malformed {
            tracing::warn!(
                system = %system.id,
                field = field.catalog_key(),
                "Unreadable date treated as absent"
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
