//! Monthly discovery and competition analyses over a single wide window.
//!
//! Both passes consume the same candidate list: the last ~30 days of
//! results, already thresholded by a minimum view count. Discovery labels
//! each video with its first matching topic and surfaces the strongest
//! video per topic; competition measures, per topic archetype, what share
//! of its uploads broke into the top 20% of the window by views.

use trendscout_core::{Candidate, CompetitionRecord, Difficulty, KeywordBucket, TopicHighlight};

use crate::trend::bucket_members;

/// Number of topic highlights reported by the discovery pass.
pub const TOPIC_LIMIT: usize = 5;

/// Groups videos by their first matching topic and returns up to `limit`
/// topics, each represented by its highest-viewed video, ordered by that
/// video's view count descending.
///
/// A video matching several topic rules counts only for the first one in
/// table order, so earlier topics absorb ambiguous uploads.
#[must_use]
pub fn discover_topics(
    videos: &[Candidate],
    topics: &[KeywordBucket],
    limit: usize,
) -> Vec<TopicHighlight> {
    let mut grouped: Vec<(usize, Vec<&Candidate>)> = Vec::new();

    for video in videos {
        let Some(index) = label_topic(video, topics) else {
            continue;
        };
        match grouped.iter_mut().find(|(i, _)| *i == index) {
            Some((_, members)) => members.push(video),
            None => grouped.push((index, vec![video])),
        }
    }

    let mut highlights: Vec<TopicHighlight> = grouped
        .into_iter()
        .filter_map(|(index, members)| {
            let best = members.iter().max_by_key(|c| c.views)?;
            Some(TopicHighlight {
                topic: topics[index].name.clone(),
                uploads: members.len() as u64,
                best: (*best).clone(),
            })
        })
        .collect();

    highlights.sort_by(|a, b| b.best.views.cmp(&a.best.views));
    highlights.truncate(limit);
    highlights
}

/// Index of the first topic whose synonyms match the video's title or
/// description.
fn label_topic(video: &Candidate, topics: &[KeywordBucket]) -> Option<usize> {
    let text = format!("{} {}", video.title, video.description).to_lowercase();
    topics.iter().position(|topic| {
        topic
            .synonyms
            .iter()
            .any(|syn| text.contains(&syn.to_lowercase()))
    })
}

/// Ranks topic archetypes by upload volume and scores each one's entry
/// difficulty from its top-tier hit rate.
///
/// Unlike discovery, a video here counts for every archetype it matches.
/// The top tier is the window's top 20% by views; an archetype whose
/// uploads land there often is easy to enter, one that floods the window
/// without breaking in is hard.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn competition(videos: &[Candidate], topics: &[KeywordBucket]) -> Vec<CompetitionRecord> {
    if videos.is_empty() {
        return Vec::new();
    }

    let cutoff = top_tier_cutoff(videos);
    let members = bucket_members(videos, topics);

    let mut records: Vec<CompetitionRecord> = members
        .into_iter()
        .map(|(archetype, uploads)| {
            let top_hits = uploads.iter().filter(|c| c.views >= cutoff).count() as u64;
            let count = uploads.len() as u64;
            let top_ratio = top_hits as f64 / count as f64;
            CompetitionRecord {
                archetype: archetype.to_string(),
                uploads: count,
                top_hits,
                top_ratio,
                difficulty: difficulty_from_ratio(top_ratio),
            }
        })
        .collect();

    records.sort_by(|a, b| {
        b.uploads
            .cmp(&a.uploads)
            .then_with(|| a.archetype.cmp(&b.archetype))
    });
    records
}

/// View count marking the boundary of the window's top 20%.
fn top_tier_cutoff(videos: &[Candidate]) -> u64 {
    let mut views: Vec<u64> = videos.iter().map(|c| c.views).collect();
    views.sort_unstable_by(|a, b| b.cmp(a));
    let index = (views.len() / 5).saturating_sub(1).max(1).min(views.len() - 1);
    views[index]
}

fn difficulty_from_ratio(ratio: f64) -> Difficulty {
    if ratio >= 0.35 {
        Difficulty::Easy
    } else if ratio >= 0.2 {
        Difficulty::Normal
    } else {
        Difficulty::Hard
    }
}

/// The window's `limit` highest-viewed videos.
#[must_use]
pub fn top_by_views(videos: &[Candidate], limit: usize) -> Vec<Candidate> {
    let mut sorted: Vec<Candidate> = videos.to_vec();
    sorted.sort_by(|a, b| b.views.cmp(&a.views));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
#[path = "discovery_test.rs"]
mod tests;
