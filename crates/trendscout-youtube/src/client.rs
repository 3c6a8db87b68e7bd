//! HTTP client for the `YouTube` Data API v3.
//!
//! Wraps `reqwest` with typed response deserialization and API-key
//! management. Search results are merged with their `videos.list` detail
//! records (statistics, duration, live status) into normalized
//! [`Candidate`] values. A non-success response from any endpoint is fatal
//! for the call and propagated without retry.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};
use trendscout_core::Candidate;

use crate::duration::parse_duration_code;
use crate::error::YouTubeError;
use crate::types::{
    ChannelListResponse, SearchListResponse, VideoItem, VideoListResponse,
};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Provider cap on ids per `videos.list` call.
pub const DETAIL_BATCH_LIMIT: usize = 50;

/// Sort order requested from the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    ViewCount,
    Date,
}

impl SearchOrder {
    fn as_str(self) -> &'static str {
        match self {
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Date => "date",
        }
    }
}

/// Coarse duration-category hint passed to the search endpoint. This is a
/// provider-side prefilter only; the admission filter enforces the exact
/// bounds afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationHint {
    Short,
    Medium,
    Long,
}

impl DurationHint {
    fn as_str(self) -> &'static str {
        match self {
            DurationHint::Short => "short",
            DurationHint::Medium => "medium",
            DurationHint::Long => "long",
        }
    }
}

/// Parameters for one windowed search.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub published_after: DateTime<Utc>,
    pub published_before: Option<DateTime<Utc>>,
    pub order: SearchOrder,
    pub duration_hint: Option<DurationHint>,
    /// Page size for the search endpoint, at most 50.
    pub page_size: u32,
    pub max_pages: u32,
}

impl<'a> SearchRequest<'a> {
    /// Request covering the absolute window "last `days` days", ordered by
    /// view count with default paging.
    #[must_use]
    pub fn last_days(query: &'a str, days: u32) -> Self {
        Self {
            query,
            published_after: Utc::now() - chrono::Duration::days(i64::from(days)),
            published_before: None,
            order: SearchOrder::ViewCount,
            duration_hint: None,
            page_size: 50,
            max_pages: 5,
        }
    }
}

/// Client for the `YouTube` Data API v3.
///
/// Use [`YouTubeClient::new`] for production or
/// [`YouTubeClient::with_base_url`] to point at a mock server in tests.
/// Requests are issued strictly sequentially; there is no internal
/// concurrency.
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
    relevance_language: String,
}

impl YouTubeClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        relevance_language: &str,
    ) -> Result<Self, YouTubeError> {
        Self::with_base_url(
            api_key,
            timeout_secs,
            user_agent,
            relevance_language,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YouTubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`YouTubeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        relevance_language: &str,
        base_url: &str,
    ) -> Result<Self, YouTubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: the base URL must end with a slash so that joining a
        // resource name appends a path segment instead of replacing one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| YouTubeError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            relevance_language: relevance_language.to_owned(),
        })
    }

    /// Runs a windowed search and merges detail records into [`Candidate`]s,
    /// preserving the first-seen order of the raw search results.
    ///
    /// Pages through the search endpoint up to `req.max_pages`, deduplicates
    /// video ids before the detail lookup, fetches details in batches of at
    /// most [`DETAIL_BATCH_LIMIT`] ids, and drops items that are currently
    /// live broadcasts.
    ///
    /// # Errors
    ///
    /// - [`YouTubeError::Api`] on a non-success response from either endpoint.
    /// - [`YouTubeError::Http`] on network failure.
    /// - [`YouTubeError::Deserialize`] if a response body has an unexpected shape.
    pub async fn search_candidates(
        &self,
        req: &SearchRequest<'_>,
    ) -> Result<Vec<Candidate>, YouTubeError> {
        let mut raw_ids: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut page_token: Option<String> = None;

        for _ in 0..req.max_pages {
            let url = self.search_page_url(req, page_token.as_deref())?;
            let page: SearchListResponse = self.request_json(&url, "search.list").await?;

            for item in page.items {
                if let Some(id) = item.id.video_id {
                    if seen.insert(id.clone()) {
                        raw_ids.push(id);
                    }
                }
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        tracing::debug!(query = req.query, ids = raw_ids.len(), "search pages collected");

        let mut details: HashMap<String, VideoItem> = HashMap::new();
        for chunk in raw_ids.chunks(DETAIL_BATCH_LIMIT) {
            for item in self.fetch_detail_batch(chunk).await? {
                details.insert(item.id.clone(), item);
            }
        }

        let mut out = Vec::with_capacity(raw_ids.len());
        for id in &raw_ids {
            let Some(item) = details.remove(id) else {
                continue;
            };
            if item.snippet.live_broadcast_content != "none" {
                tracing::debug!(id = %item.id, "skipping live broadcast");
                continue;
            }
            out.push(candidate_from_item(item));
        }

        Ok(out)
    }

    /// Like [`search_candidates`](Self::search_candidates), but returns the
    /// merged candidates sorted by view count descending — the order the
    /// guaranteed selector consumes.
    ///
    /// # Errors
    ///
    /// Same as [`search_candidates`](Self::search_candidates).
    pub async fn search_top_by_views(
        &self,
        req: &SearchRequest<'_>,
    ) -> Result<Vec<Candidate>, YouTubeError> {
        let mut candidates = self.search_candidates(req).await?;
        candidates.sort_by(|a, b| b.views.cmp(&a.views));
        Ok(candidates)
    }

    /// Resolves an `@handle` channel reference to a channel id.
    ///
    /// Returns `Ok(None)` when the handle is unknown to the API.
    ///
    /// # Errors
    ///
    /// Same failure modes as the other endpoints; callers building anchor
    /// profiles treat these as degraded-but-continuing.
    pub async fn resolve_handle(&self, handle: &str) -> Result<Option<String>, YouTubeError> {
        let url = self.build_url("channels", &[("part", "id"), ("forHandle", handle)])?;
        let page: ChannelListResponse = self.request_json(&url, "channels.list").await?;
        Ok(page.items.into_iter().next().map(|c| c.id))
    }

    /// Fetches the owning channel id and title for a single video.
    ///
    /// Returns `Ok(None)` when the video does not exist.
    ///
    /// # Errors
    ///
    /// Same failure modes as the other endpoints.
    pub async fn video_owner(&self, video_id: &str) -> Result<Option<(String, String)>, YouTubeError> {
        let url = self.build_url("videos", &[("part", "snippet"), ("id", video_id)])?;
        let page: VideoListResponse = self.request_json(&url, "videos.list").await?;
        Ok(page
            .items
            .into_iter()
            .next()
            .map(|item| (item.snippet.channel_id, item.snippet.title)))
    }

    /// Fetches one detail batch; `ids` must already respect the provider cap.
    async fn fetch_detail_batch(&self, ids: &[String]) -> Result<Vec<VideoItem>, YouTubeError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.join(",");
        let url = self.build_url(
            "videos",
            &[
                ("part", "snippet,statistics,contentDetails"),
                ("id", &joined),
            ],
        )?;
        let page: VideoListResponse = self.request_json(&url, "videos.list").await?;
        Ok(page.items)
    }

    fn search_page_url(
        &self,
        req: &SearchRequest<'_>,
        page_token: Option<&str>,
    ) -> Result<Url, YouTubeError> {
        let after = req
            .published_after
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let page_size = req.page_size.min(50).to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("part", "snippet"),
            ("type", "video"),
            ("order", req.order.as_str()),
            ("publishedAfter", &after),
            ("maxResults", &page_size),
            ("safeSearch", "none"),
            ("q", req.query),
        ];

        let before;
        if let Some(b) = req.published_before {
            before = b.to_rfc3339_opts(SecondsFormat::Secs, true);
            params.push(("publishedBefore", &before));
        }
        if let Some(hint) = req.duration_hint {
            params.push(("videoDuration", hint.as_str()));
        }
        if !self.relevance_language.is_empty() {
            params.push(("relevanceLanguage", &self.relevance_language));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        self.build_url("search", &params)
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters, appending the API key to every call.
    fn build_url(&self, resource: &str, params: &[(&str, &str)]) -> Result<Url, YouTubeError> {
        let mut url = self
            .base_url
            .join(resource)
            .map_err(|e| YouTubeError::Api(format!("invalid resource '{resource}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request and parses the body as JSON, surfacing non-success
    /// statuses as [`YouTubeError::Api`] with the message from the error
    /// envelope when one is present.
    async fn request_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        context: &str,
    ) -> Result<T, YouTubeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("error")
                        .and_then(|e| e.get("message"))
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| "no error message".to_string());
            return Err(YouTubeError::Api(format!(
                "{context} failed with HTTP {status}: {message}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| YouTubeError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

/// Merges one detail record into a normalized [`Candidate`].
fn candidate_from_item(item: VideoItem) -> Candidate {
    let views = item
        .statistics
        .view_count
        .as_deref()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    let duration_secs = item
        .content_details
        .duration
        .as_deref()
        .map_or(0, parse_duration_code);

    Candidate {
        id: item.id,
        title: item.snippet.title,
        channel: item.snippet.channel_title,
        channel_id: item.snippet.channel_id,
        published_at: item.snippet.published_at,
        views,
        duration_secs,
        tags: item.snippet.tags,
        description: item.snippet.description,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
