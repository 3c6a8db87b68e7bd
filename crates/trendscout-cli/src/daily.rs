//! `daily` subcommand: guaranteed top-N candidate selection per category.

use anyhow::Context;
use trendscout_core::{AppConfig, CategoriesFile, Candidate, CategoryConfig};
use trendscout_pipeline::{build_profile, select, AnchorRanking, SelectionRequest, YouTubeSource};
use trendscout_youtube::{DurationHint, YouTubeClient};

use crate::output;

pub async fn run(config: &AppConfig, categories: &CategoriesFile, top: usize) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;

    for category in &categories.categories {
        let picked = select_category(config, &client, category, top)
            .await
            .with_context(|| format!("selecting candidates for category '{}'", category.name))?;

        tracing::info!(
            category = %category.name,
            picked = picked.len(),
            target = top,
            "category selection done"
        );

        // An under-filled or empty list is a valid result; the reporting
        // side renders "no results" for it.
        let path = config.out_dir.join(format!("daily_{}.json", category.slug));
        output::write_json(&path, &picked)?;
    }

    Ok(())
}

async fn select_category(
    config: &AppConfig,
    client: &YouTubeClient,
    category: &CategoryConfig,
    top: usize,
) -> anyhow::Result<Vec<Candidate>> {
    let profile = match &category.anchor {
        Some(seeds) => Some((build_profile(client, seeds).await, seeds.strict)),
        None => None,
    };

    let mut source = YouTubeSource::new(client, config.search_page_size, config.search_max_pages);
    if let Some(hint) = duration_hint_for(category) {
        source = source.with_duration_hint(hint);
    }

    let request = SelectionRequest {
        query: &category.query,
        plan: &category.plan,
        filter: &category.filter,
        target: top,
        anchor: profile.as_ref().map(|(profile, strict)| AnchorRanking {
            profile,
            strict: *strict,
        }),
    };

    let picked = select(&source, &request).await?;
    Ok(picked)
}

/// Picks the provider-side duration prefilter matching the category's lower
/// bound. The provider's buckets are <4min, 4-20min, and >20min; the exact
/// bounds are still enforced by the admission filter.
fn duration_hint_for(category: &CategoryConfig) -> Option<DurationHint> {
    let min = category.filter.min_duration_secs;
    if min >= 1200 {
        Some(DurationHint::Long)
    } else if min >= 240 {
        Some(DurationHint::Medium)
    } else {
        None
    }
}
