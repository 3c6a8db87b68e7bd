//! `weekly` subcommand: week-over-week keyword bucket growth report.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Duration, FixedOffset, Utc};
use trendscout_core::{AppConfig, CategoriesFile};
use trendscout_pipeline::{analyze, competition, discover_topics, top_by_views, TOPIC_LIMIT};
use trendscout_youtube::{SearchOrder, SearchRequest, YouTubeClient};

use crate::output;

pub async fn run(config: &AppConfig, categories: &CategoriesFile) -> anyhow::Result<()> {
    let trend = &categories.trend;
    let client = crate::build_client(config)?;

    let now = Utc::now();
    let current_start = now - Duration::days(i64::from(trend.current_days));
    let previous_start = current_start - Duration::days(i64::from(trend.previous_days));

    // Both windows order by recency, not view count; relative growth is the
    // signal here and view-count ordering would bias both windows the same way.
    let current = client
        .search_candidates(&SearchRequest {
            query: &trend.query,
            published_after: current_start,
            published_before: None,
            order: SearchOrder::Date,
            duration_hint: None,
            page_size: config.search_page_size,
            max_pages: config.search_max_pages,
        })
        .await
        .context("fetching the current trend window")?;

    let previous = client
        .search_candidates(&SearchRequest {
            query: &trend.query,
            published_after: previous_start,
            published_before: Some(current_start),
            order: SearchOrder::Date,
            duration_hint: None,
            page_size: config.search_page_size,
            max_pages: config.search_max_pages,
        })
        .await
        .context("fetching the previous trend window")?;

    tracing::info!(
        current = current.len(),
        previous = previous.len(),
        buckets = trend.buckets.len(),
        "trend windows fetched"
    );

    let records = analyze(&current, &previous, &trend.buckets, trend.sort);

    let rising_path = config.out_dir.join("weekly_rising.json");
    output::write_json(&rising_path, &records)?;

    let monthly_paths = run_monthly(config, categories, &client).await?;

    // Snapshot into the append-only history, stamped with the local
    // reporting date (KST).
    let kst = FixedOffset::east_opt(9 * 3600)
        .ok_or_else(|| anyhow::anyhow!("invalid reporting timezone offset"))?;
    let stamp = now.with_timezone(&kst).format("%Y%m%d").to_string();
    let mut snapshot_files = vec![rising_path.as_path()];
    snapshot_files.extend(monthly_paths.iter().map(PathBuf::as_path));
    output::snapshot(&config.history_dir.join(stamp), &snapshot_files)?;

    Ok(())
}

/// Runs the wide-window analyses: topic discovery, the overall monthly
/// top 5, and archetype competition ranking.
async fn run_monthly(
    config: &AppConfig,
    categories: &CategoriesFile,
    client: &YouTubeClient,
) -> anyhow::Result<Vec<PathBuf>> {
    let trend = &categories.trend;
    let monthly = &trend.monthly;

    let window = client
        .search_top_by_views(&SearchRequest {
            query: &trend.query,
            published_after: Utc::now() - Duration::days(i64::from(monthly.days)),
            published_before: None,
            order: SearchOrder::ViewCount,
            duration_hint: None,
            page_size: config.search_page_size,
            max_pages: config.search_max_pages,
        })
        .await
        .context("fetching the monthly window")?;

    let total = window.len();
    let window: Vec<_> = window
        .into_iter()
        .filter(|c| c.views >= monthly.min_views)
        .collect();
    tracing::info!(
        total,
        kept = window.len(),
        min_views = monthly.min_views,
        "monthly window fetched"
    );

    let topics = discover_topics(&window, &monthly.topics, TOPIC_LIMIT);
    let top = top_by_views(&window, TOPIC_LIMIT);
    let ranking = competition(&window, &monthly.topics);

    let topics_path = config.out_dir.join("weekly_new_topics.json");
    output::write_json(&topics_path, &topics)?;
    let top_path = config.out_dir.join("weekly_top_month.json");
    output::write_json(&top_path, &top)?;
    let competition_path = config.out_dir.join("weekly_competition.json");
    output::write_json(&competition_path, &ranking)?;

    Ok(vec![topics_path, top_path, competition_path])
}
