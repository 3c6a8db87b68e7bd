//! Guaranteed-N selection across a plan of widening time windows.
//!
//! Each plan step queries an absolute "last K days" window, filters the full
//! result set with the unchanged [`FilterConfig`], and appends newly seen
//! admissible candidates in that step's view-rank order. Filter thresholds
//! never change between steps; only the window widens, so looser results are
//! never approved by accident. An exhausted plan with fewer than N picks is
//! a normal terminal state.

use std::collections::HashSet;
use std::future::Future;

use trendscout_core::{AnchorProfile, Candidate, FilterConfig, SelectionPlan};
use trendscout_youtube::{DurationHint, SearchRequest, YouTubeClient, YouTubeError};

use crate::error::PipelineError;
use crate::filter;

/// Source of view-ranked candidates for an absolute lookback window.
///
/// The production implementation is [`YouTubeSource`]; tests substitute an
/// in-memory fake.
pub trait CandidateSource {
    fn search(
        &self,
        query: &str,
        window_days: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>, YouTubeError>>;
}

/// [`CandidateSource`] backed by the real API client.
pub struct YouTubeSource<'a> {
    client: &'a YouTubeClient,
    duration_hint: Option<DurationHint>,
    page_size: u32,
    max_pages: u32,
}

impl<'a> YouTubeSource<'a> {
    #[must_use]
    pub fn new(client: &'a YouTubeClient, page_size: u32, max_pages: u32) -> Self {
        Self {
            client,
            duration_hint: None,
            page_size,
            max_pages,
        }
    }

    /// Adds a coarse provider-side duration prefilter to every search.
    #[must_use]
    pub fn with_duration_hint(mut self, hint: DurationHint) -> Self {
        self.duration_hint = Some(hint);
        self
    }
}

impl CandidateSource for YouTubeSource<'_> {
    fn search(
        &self,
        query: &str,
        window_days: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>, YouTubeError>> {
        let mut req = SearchRequest::last_days(query, window_days);
        req.duration_hint = self.duration_hint;
        req.page_size = self.page_size;
        req.max_pages = self.max_pages;
        async move { self.client.search_top_by_views(&req).await }
    }
}

/// Anchor-aware ranking settings for a selection run.
pub struct AnchorRanking<'a> {
    pub profile: &'a AnchorProfile,
    /// Drop zero-score candidates, backfilling only if the plan under-fills.
    pub strict: bool,
}

/// Everything one guaranteed-N selection needs; plan and thresholds are
/// shared across all steps.
pub struct SelectionRequest<'a> {
    pub query: &'a str,
    pub plan: &'a SelectionPlan,
    pub filter: &'a FilterConfig,
    pub target: usize,
    pub anchor: Option<AnchorRanking<'a>>,
}

/// Scores a candidate against an anchor profile:
/// 5 for an anchor channel, 2 for an anchor keyword in the title, 1 for an
/// include-keyword in the title.
#[must_use]
pub fn anchor_score(
    candidate: &Candidate,
    profile: &AnchorProfile,
    include_keywords: &[String],
) -> u32 {
    let mut score = 0;
    if profile.channel_ids.contains(&candidate.channel_id) {
        score += 5;
    }
    let title = candidate.title.to_lowercase();
    if profile
        .keywords
        .iter()
        .any(|k| title.contains(&k.to_lowercase()))
    {
        score += 2;
    }
    if include_keywords
        .iter()
        .any(|k| title.contains(&k.to_lowercase()))
    {
        score += 1;
    }
    score
}

/// Runs the selection plan until `target` unique admissible candidates are
/// accumulated or the plan is exhausted, returning at most `target`.
///
/// # Errors
///
/// Returns [`PipelineError::Source`] if any step's search fails; a step
/// failure aborts the whole selection.
pub async fn select<S: CandidateSource>(
    source: &S,
    req: &SelectionRequest<'_>,
) -> Result<Vec<Candidate>, PipelineError> {
    let mut picked: Vec<Candidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    // Zero-score candidates set aside by a strict anchor pass, in the
    // order they were first encountered.
    let mut reserve: Vec<Candidate> = Vec::new();
    let mut reserve_seen: HashSet<String> = HashSet::new();

    for step in &req.plan.steps {
        if picked.len() >= req.target {
            break;
        }
        tracing::info!(
            step = %step.label,
            days = step.days,
            picked = picked.len(),
            target = req.target,
            "running selection step"
        );

        let raw = source.search(req.query, step.days).await?;
        let total = raw.len();

        let mut kept: Vec<Candidate> = Vec::new();
        for cand in raw {
            match filter::admit(&cand, req.filter) {
                Ok(()) => kept.push(cand),
                Err(reason) => {
                    tracing::debug!(
                        id = %cand.id,
                        reason = %reason,
                        views = cand.views,
                        duration_secs = cand.duration_secs,
                        "candidate rejected"
                    );
                }
            }
        }
        tracing::info!(step = %step.label, total, kept = kept.len(), "step filtered");

        match &req.anchor {
            Some(ranking) => {
                let mut scored: Vec<(u32, Candidate)> = kept
                    .into_iter()
                    .map(|c| {
                        let s = anchor_score(&c, ranking.profile, &req.filter.include_keywords);
                        (s, c)
                    })
                    .collect();

                if ranking.strict {
                    let mut positive = Vec::with_capacity(scored.len());
                    for (score, cand) in scored {
                        if score == 0 {
                            if !seen.contains(&cand.id) && reserve_seen.insert(cand.id.clone()) {
                                reserve.push(cand);
                            }
                        } else {
                            positive.push((score, cand));
                        }
                    }
                    scored = positive;
                }

                scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.views.cmp(&a.1.views)));
                for (score, cand) in scored {
                    if push_unique(&mut picked, &mut seen, cand, step, Some(score))
                        && picked.len() >= req.target
                    {
                        break;
                    }
                }
            }
            None => {
                for cand in kept {
                    if push_unique(&mut picked, &mut seen, cand, step, None)
                        && picked.len() >= req.target
                    {
                        break;
                    }
                }
            }
        }
    }

    // Strict anchor mode only: backfill with unscored candidates when the
    // whole plan under-filled the target.
    if picked.len() < req.target && req.anchor.as_ref().is_some_and(|a| a.strict) {
        for cand in reserve {
            if picked.len() >= req.target {
                break;
            }
            if seen.insert(cand.id.clone()) {
                tracing::info!(id = %cand.id, "backfilling unscored candidate");
                picked.push(cand);
            }
        }
    }

    tracing::info!(picked = picked.len(), target = req.target, "selection finished");
    picked.truncate(req.target);
    Ok(picked)
}

fn push_unique(
    picked: &mut Vec<Candidate>,
    seen: &mut HashSet<String>,
    cand: Candidate,
    step: &trendscout_core::PlanStep,
    score: Option<u32>,
) -> bool {
    if !seen.insert(cand.id.clone()) {
        return false;
    }
    tracing::info!(
        id = %cand.id,
        title = %cand.title,
        views = cand.views,
        step = %step.label,
        score,
        "picked candidate"
    );
    picked.push(cand);
    true
}

#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;
