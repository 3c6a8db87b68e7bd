use std::path::PathBuf;

/// Process-wide configuration, constructed once from the environment and
/// passed into each component.
#[derive(Clone)]
pub struct AppConfig {
    pub youtube_api_key: String,
    pub log_level: String,
    pub categories_path: PathBuf,
    pub out_dir: PathBuf,
    pub history_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Page size for the search endpoint, capped at the provider limit of 50.
    pub search_page_size: u32,
    pub search_max_pages: u32,
    pub relevance_language: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("youtube_api_key", &"[redacted]")
            .field("log_level", &self.log_level)
            .field("categories_path", &self.categories_path)
            .field("out_dir", &self.out_dir)
            .field("history_dir", &self.history_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("search_page_size", &self.search_page_size)
            .field("search_max_pages", &self.search_max_pages)
            .field("relevance_language", &self.relevance_language)
            .finish()
    }
}
