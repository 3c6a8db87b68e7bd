//! Category configuration loaded from `config/categories.yaml`.
//!
//! Everything the pipeline treats as data lives here: per-category search
//! queries, filter thresholds, selection plans, anchor seeds, and the
//! keyword-bucket table used for trend analysis. The pipeline itself is a
//! single parameterized algorithm; categories only differ in this data.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::types::{FilterConfig, KeywordBucket, SelectionPlan, SortMode};
use crate::ConfigError;

/// Seed references resolved into an anchor profile at run start.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnchorSeeds {
    /// Channel ids used verbatim, no lookup needed.
    #[serde(default)]
    pub channel_ids: Vec<String>,
    /// `@handle` style references requiring a lookup call to resolve.
    #[serde(default)]
    pub channel_handles: Vec<String>,
    /// Seed videos contributing their owning channel and their title.
    #[serde(default)]
    pub video_ids: Vec<String>,
    /// When true, candidates scoring zero against the profile are dropped
    /// and only backfilled if the plan under-fills the target count.
    #[serde(default)]
    pub strict: bool,
}

/// One topic category: a search query plus the data driving selection.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    /// ASCII slug used in output file names.
    pub slug: String,
    pub query: String,
    pub filter: FilterConfig,
    pub plan: SelectionPlan,
    #[serde(default)]
    pub anchor: Option<AnchorSeeds>,
}

/// Settings for the week-over-week keyword momentum analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct TrendConfig {
    pub query: String,
    #[serde(default = "default_window_days")]
    pub current_days: u32,
    #[serde(default = "default_window_days")]
    pub previous_days: u32,
    #[serde(default)]
    pub sort: SortMode,
    pub buckets: Vec<KeywordBucket>,
    pub monthly: MonthlyConfig,
}

/// Settings for the monthly discovery and competition analyses.
///
/// The `topics` table labels videos for both analyses; discovery assigns
/// the first matching topic only, competition counts every match.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyConfig {
    #[serde(default = "default_monthly_days")]
    pub days: u32,
    /// Videos below this view count are excluded from the monthly window
    /// entirely.
    #[serde(default = "default_monthly_min_views")]
    pub min_views: u64,
    pub topics: Vec<KeywordBucket>,
}

fn default_window_days() -> u32 {
    7
}

fn default_monthly_days() -> u32 {
    30
}

fn default_monthly_min_views() -> u64 {
    100_000
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
    pub trend: TrendConfig,
}

/// Load and validate the categories configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)?;

    validate_categories(&file)?;

    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    let mut seen_slugs = HashSet::new();

    for cat in &file.categories {
        if cat.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }
        if cat.query.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty query",
                cat.name
            )));
        }
        if cat.slug.is_empty() || !cat.slug.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
            return Err(ConfigError::Validation(format!(
                "category '{}' has invalid slug '{}'; use lowercase ASCII and dashes",
                cat.name, cat.slug
            )));
        }
        if !seen_slugs.insert(cat.slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category slug: '{}'",
                cat.slug
            )));
        }

        if cat.filter.min_duration_secs >= cat.filter.max_duration_secs {
            return Err(ConfigError::Validation(format!(
                "category '{}' duration bounds are inverted: {} >= {}",
                cat.name, cat.filter.min_duration_secs, cat.filter.max_duration_secs
            )));
        }

        if cat.plan.steps.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has an empty selection plan",
                cat.name
            )));
        }
        // Widening windows only: each step must look strictly further back.
        for pair in cat.plan.steps.windows(2) {
            if pair[1].days <= pair[0].days {
                return Err(ConfigError::Validation(format!(
                    "category '{}' plan windows must be strictly increasing ({} then {})",
                    cat.name, pair[0].days, pair[1].days
                )));
            }
        }
    }

    if file.trend.query.trim().is_empty() {
        return Err(ConfigError::Validation(
            "trend query must be non-empty".to_string(),
        ));
    }
    if file.trend.current_days == 0 || file.trend.previous_days == 0 {
        return Err(ConfigError::Validation(
            "trend window days must be positive".to_string(),
        ));
    }

    validate_buckets("trend", &file.trend.buckets)?;

    if file.trend.monthly.days == 0 {
        return Err(ConfigError::Validation(
            "monthly window days must be positive".to_string(),
        ));
    }
    if file.trend.monthly.topics.is_empty() {
        return Err(ConfigError::Validation(
            "monthly topics table must be non-empty".to_string(),
        ));
    }
    validate_buckets("monthly", &file.trend.monthly.topics)?;

    Ok(())
}

fn validate_buckets(context: &str, buckets: &[KeywordBucket]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for bucket in buckets {
        if bucket.synonyms.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{context} keyword bucket '{}' has no synonyms",
                bucket.name
            )));
        }
        if !seen.insert(bucket.name.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate {context} keyword bucket: '{}'",
                bucket.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "categories_test.rs"]
mod tests;
