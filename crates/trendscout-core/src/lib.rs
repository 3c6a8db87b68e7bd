//! Shared domain types and configuration for the trendscout pipeline.

use thiserror::Error;

pub mod app_config;
pub mod categories;
pub mod config;
pub mod types;

pub use app_config::AppConfig;
pub use categories::{
    AnchorSeeds, CategoriesFile, CategoryConfig, MonthlyConfig, TrendConfig, load_categories,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    AnchorProfile, Candidate, CompetitionRecord, Difficulty, Disambiguation, FilterConfig,
    GrowthRecord, KeywordBucket, PlanStep, SelectionPlan, SortMode, TargetScript, TopicHighlight,
};

/// Errors raised while loading application or category configuration.
///
/// All of these are fatal and occur before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read categories file {path}: {source}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse categories file: {0}")]
    CategoriesFileParse(#[from] serde_yaml::Error),

    #[error("invalid categories config: {0}")]
    Validation(String),
}
