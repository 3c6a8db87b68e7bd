use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let youtube_api_key = require("YOUTUBE_API_KEY")?;

    let log_level = or_default("TRENDSCOUT_LOG_LEVEL", "info");
    let categories_path = PathBuf::from(or_default(
        "TRENDSCOUT_CATEGORIES_PATH",
        "./config/categories.yaml",
    ));
    let out_dir = PathBuf::from(or_default("TRENDSCOUT_OUT_DIR", "./data/outputs"));
    let history_dir = PathBuf::from(or_default("TRENDSCOUT_HISTORY_DIR", "./data/history"));

    let request_timeout_secs = parse_u64("TRENDSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TRENDSCOUT_USER_AGENT", "trendscout/0.1 (content-scouting)");

    let search_page_size = parse_u32("TRENDSCOUT_SEARCH_PAGE_SIZE", "50")?;
    if search_page_size == 0 || search_page_size > 50 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDSCOUT_SEARCH_PAGE_SIZE".to_string(),
            reason: format!("must be in 1..=50, got {search_page_size}"),
        });
    }
    let search_max_pages = parse_u32("TRENDSCOUT_SEARCH_MAX_PAGES", "5")?;
    if search_max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "TRENDSCOUT_SEARCH_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let relevance_language = or_default("TRENDSCOUT_RELEVANCE_LANGUAGE", "ko");

    Ok(AppConfig {
        youtube_api_key,
        log_level,
        categories_path,
        out_dir,
        history_dir,
        request_timeout_secs,
        user_agent,
        search_page_size,
        search_max_pages,
        relevance_language,
    })
}
