//! Anchor profile construction from seed channel and video references.
//!
//! Resolution failures never abort the run: a seed that cannot be resolved
//! is logged and skipped, leaving a smaller profile. The profile is built
//! once per category per run and not mutated afterwards.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use trendscout_core::{AnchorProfile, AnchorSeeds};
use trendscout_youtube::{YouTubeClient, YouTubeError};

/// Number of weak keywords retained from seed titles.
pub const WEAK_KEYWORD_LIMIT: usize = 20;

const MIN_TOKEN_CHARS: usize = 2;

/// Tokens too generic to say anything about a content style.
const STOP_TOKENS: [&str; 9] = [
    "영상",
    "뉴스",
    "속보",
    "라이브",
    "live",
    "풀영상",
    "하이라이트",
    "클립",
    "브이로그",
];

/// Seed lookups needed to build a profile; implemented by the API client
/// and by in-memory fakes in tests.
pub trait SeedResolver {
    fn resolve_handle(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Option<String>, YouTubeError>>;

    fn video_owner(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Option<(String, String)>, YouTubeError>>;
}

impl SeedResolver for YouTubeClient {
    fn resolve_handle(
        &self,
        handle: &str,
    ) -> impl Future<Output = Result<Option<String>, YouTubeError>> {
        YouTubeClient::resolve_handle(self, handle)
    }

    fn video_owner(
        &self,
        video_id: &str,
    ) -> impl Future<Output = Result<Option<(String, String)>, YouTubeError>> {
        YouTubeClient::video_owner(self, video_id)
    }
}

/// Resolves all seed references into an [`AnchorProfile`].
///
/// Direct channel ids are taken verbatim; handles go through a lookup call;
/// seed videos contribute their owning channel and their title. Weak
/// keywords are the top-[`WEAK_KEYWORD_LIMIT`] frequency-ranked tokens from
/// all seed titles.
pub async fn build_profile<R: SeedResolver>(resolver: &R, seeds: &AnchorSeeds) -> AnchorProfile {
    let mut channel_ids: HashSet<String> = seeds.channel_ids.iter().cloned().collect();
    let mut titles: Vec<String> = Vec::new();

    for handle in &seeds.channel_handles {
        match resolver.resolve_handle(handle).await {
            Ok(Some(id)) => {
                channel_ids.insert(id);
            }
            Ok(None) => {
                tracing::warn!(handle = %handle, "anchor handle not found; skipping seed");
            }
            Err(e) => {
                tracing::warn!(handle = %handle, error = %e, "anchor handle resolution failed; skipping seed");
            }
        }
    }

    for video_id in &seeds.video_ids {
        match resolver.video_owner(video_id).await {
            Ok(Some((channel_id, title))) => {
                channel_ids.insert(channel_id);
                titles.push(title);
            }
            Ok(None) => {
                tracing::warn!(video_id = %video_id, "anchor seed video not found; skipping seed");
            }
            Err(e) => {
                tracing::warn!(video_id = %video_id, error = %e, "anchor seed video lookup failed; skipping seed");
            }
        }
    }

    let keywords = weak_keywords(&titles, WEAK_KEYWORD_LIMIT);
    tracing::info!(
        channels = channel_ids.len(),
        keywords = keywords.len(),
        "anchor profile built"
    );

    AnchorProfile {
        channel_ids,
        keywords,
    }
}

/// Frequency-counts tokens (length ≥ 2, stop words removed, decorations
/// stripped) across seed titles and keeps the `top_k` most common. Ties
/// break lexicographically for determinism.
fn weak_keywords(titles: &[String], top_k: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for title in titles {
        let cleaned: String = title
            .chars()
            .map(|c| if is_decoration(c) { ' ' } else { c })
            .collect();
        for token in cleaned.split_whitespace() {
            if token.chars().count() < MIN_TOKEN_CHARS {
                continue;
            }
            let lower = token.to_lowercase();
            if STOP_TOKENS.contains(&lower.as_str()) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(top_k).map(|(t, _)| t).collect()
}

fn is_decoration(c: char) -> bool {
    c.is_ascii_punctuation() || "【】『』〈〉《》「」–—·•….‘’“”".contains(c)
}
