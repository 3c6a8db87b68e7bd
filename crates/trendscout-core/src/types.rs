//! Plain record shapes exchanged between the pipeline and its collaborators.
//!
//! Everything here is created fresh per run from live API responses or static
//! configuration; nothing persists between invocations. `Candidate` lists and
//! `GrowthRecord` lists are what the downstream reporting collaborator
//! consumes, so their serialized field set is part of the contract.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized search result merged with its statistics and duration.
///
/// `id` uniquely identifies a candidate within one run; `duration_secs` is
/// always ≥ 0 by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub channel_id: String,
    pub published_at: Option<DateTime<Utc>>,
    pub views: u64,
    pub duration_secs: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
}

/// Script a candidate title must contain at least one character from.
///
/// The shipped categories target Korean-language content, so the heuristic
/// checks for a Hangul syllable. `Any` disables the check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetScript {
    #[default]
    Any,
    Hangul,
}

/// Disambiguation rule for categories whose keywords collide with unrelated
/// topics: when an ambiguous token appears in a title, at least one core
/// token must appear as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disambiguation {
    pub ambiguous: Vec<String>,
    pub core: Vec<String>,
}

/// Per-category admission criteria. Thresholds here never change during a
/// run; the selection plan only widens the time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub min_duration_secs: u32,
    pub max_duration_secs: u32,
    #[serde(default)]
    pub include_keywords: Vec<String>,
    #[serde(default)]
    pub exclude_keywords: Vec<String>,
    /// Empty list means no mandatory-phrase requirement.
    #[serde(default)]
    pub mandatory_phrases: Vec<String>,
    #[serde(default)]
    pub channel_blacklist: Vec<String>,
    #[serde(default)]
    pub script: TargetScript,
    #[serde(default)]
    pub disambiguation: Option<Disambiguation>,
}

/// One step of a [`SelectionPlan`]: an absolute lookback window plus a label
/// for the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub days: u32,
    pub label: String,
}

/// Ordered sequence of widening time windows, queried as absolute
/// "last K days". Window sizes must be strictly increasing; this is
/// validated at config load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPlan {
    pub steps: Vec<PlanStep>,
}

/// Reference profile used to bias ranking toward a known content style.
/// Built once per category per run and immutable thereafter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorProfile {
    pub channel_ids: HashSet<String>,
    pub keywords: Vec<String>,
}

/// A named bucket of synonym tokens, shared between admission disambiguation
/// config and trend analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordBucket {
    pub name: String,
    pub synonyms: Vec<String>,
}

/// Ordering for ranked growth records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// NEW buckets first, then change fraction, delta, current count.
    #[default]
    Percent,
    /// Raw delta first, then current count, change fraction.
    Delta,
}

/// Week-over-week comparison for one keyword bucket.
///
/// `change_fraction` is `None` exactly when the bucket is NEW (previous
/// count zero, current count positive); buckets with zero counts in both
/// windows are never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub bucket: String,
    pub current: u64,
    pub previous: u64,
    pub delta: i64,
    pub change_fraction: Option<f64>,
    pub representative: Option<Candidate>,
}

impl GrowthRecord {
    /// True when the bucket had no occurrences in the previous window but
    /// has some now.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.previous == 0 && self.current > 0
    }
}

/// A topic surfaced by the monthly discovery pass: the bucket's upload
/// count over the window plus its best-performing video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicHighlight {
    pub topic: String,
    pub uploads: u64,
    pub best: Candidate,
}

/// Entry difficulty derived from a topic's top-tier hit rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Competition profile of one topic archetype over the monthly window:
/// how many uploads it drew and how many of them landed in the top 20%
/// by views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionRecord {
    pub archetype: String,
    pub uploads: u64,
    pub top_hits: u64,
    pub top_ratio: f64,
    pub difficulty: Difficulty,
}
