//! Selector configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).
//!
//! | Variable                 | Default     |
//! |--------------------------|-------------|
//! | `SEED_PATH`              | `seed.json` |
//! | `VIEWER_ID`              | required    |
//! | `CRITERIA`               | `[]`        |
//! | `CATALOG_WARN_THRESHOLD` | `10000`     |
//! | `LOG_FORMAT`             | `pretty`    |

use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::UserId;
use crate::engine::FilterCriterion;
use crate::error::SelectorError;
use crate::service::event_service::DEFAULT_CATALOG_WARN_THRESHOLD;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(SelectorError::Config(format!(
                "LOG_FORMAT must be pretty or json, got {other:?}"
            ))),
        }
    }
}

/// Top-level selector configuration.
///
/// Loaded once at startup via [`SelectorConfig::from_env`].
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Seed document to load into the store.
    pub seed_path: PathBuf,

    /// User whose view of the catalog is selected.
    pub viewer_id: UserId,

    /// Filter criteria applied to the selection.
    pub criteria: Vec<FilterCriterion>,

    /// Catalog size above which a selection logs a warning.
    pub catalog_warn_threshold: usize,

    /// Log output format.
    pub log_format: LogFormat,
}

impl SelectorConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::Config`] if `VIEWER_ID` is missing, or if
    /// `CRITERIA` or `LOG_FORMAT` is set but invalid.
    pub fn from_env() -> Result<Self, SelectorError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`SelectorConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SelectorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_path = lookup("SEED_PATH")
            .map_or_else(|| PathBuf::from("seed.json"), PathBuf::from);

        let viewer_id = lookup("VIEWER_ID")
            .filter(|v| !v.trim().is_empty())
            .map(UserId::new)
            .ok_or_else(|| SelectorError::Config("VIEWER_ID must be set".to_string()))?;

        let criteria = match lookup("CRITERIA") {
            Some(raw) => parse_criteria(&raw)?,
            None => Vec::new(),
        };

        let catalog_warn_threshold = parse_value(
            lookup("CATALOG_WARN_THRESHOLD"),
            DEFAULT_CATALOG_WARN_THRESHOLD,
        );

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            seed_path,
            viewer_id,
            criteria,
            catalog_warn_threshold,
            log_format,
        })
    }
}

/// Decodes a JSON array of filter criteria.
///
/// # Errors
///
/// Returns [`SelectorError::Config`] if the text is not an array of known
/// criteria.
pub fn parse_criteria(raw: &str) -> Result<Vec<FilterCriterion>, SelectorError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|e| SelectorError::Config(format!("CRITERIA: {e}")))
}

/// Parses an optional value as `T`, returning `default` on missing or
/// invalid values.
fn parse_value<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
