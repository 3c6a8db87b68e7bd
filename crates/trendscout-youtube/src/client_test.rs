use chrono::TimeZone;

use super::*;
use crate::types::{ContentDetails, VideoSnippet, VideoStatistics};

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, "trendscout-test/0.1", "ko", base_url)
        .expect("client construction should not fail")
}

fn detail_item(id: &str, views: &str, duration: &str) -> VideoItem {
    VideoItem {
        id: id.to_string(),
        snippet: VideoSnippet {
            title: format!("title-{id}"),
            channel_title: "채널".to_string(),
            channel_id: "UC1".to_string(),
            published_at: None,
            tags: vec![],
            description: String::new(),
            live_broadcast_content: "none".to_string(),
        },
        statistics: VideoStatistics {
            view_count: Some(views.to_string()),
        },
        content_details: ContentDetails {
            duration: Some(duration.to_string()),
        },
    }
}

#[test]
fn build_url_appends_key_and_params() {
    let client = test_client("https://www.googleapis.com/youtube/v3");
    let url = client
        .build_url("videos", &[("part", "snippet"), ("id", "a,b")])
        .unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.googleapis.com/youtube/v3/videos?key=test-key&part=snippet&id=a%2Cb"
    );
}

#[test]
fn search_page_url_carries_window_bounds() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let after = chrono::Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let before = chrono::Utc.with_ymd_and_hms(2025, 1, 8, 0, 0, 0).unwrap();
    let req = SearchRequest {
        query: "시니어 건강",
        published_after: after,
        published_before: Some(before),
        order: SearchOrder::Date,
        duration_hint: Some(DurationHint::Long),
        page_size: 50,
        max_pages: 5,
    };
    let url = client.search_page_url(&req, Some("tok123")).unwrap();
    let query = url.query().unwrap();
    assert!(query.contains("publishedAfter=2025-01-01T00%3A00%3A00Z"));
    assert!(query.contains("publishedBefore=2025-01-08T00%3A00%3A00Z"));
    assert!(query.contains("order=date"));
    assert!(query.contains("videoDuration=long"));
    assert!(query.contains("relevanceLanguage=ko"));
    assert!(query.contains("pageToken=tok123"));
}

#[test]
fn search_page_url_caps_page_size_at_provider_limit() {
    let client = test_client("https://www.googleapis.com/youtube/v3/");
    let mut req = SearchRequest::last_days("연금", 7);
    req.page_size = 500;
    let url = client.search_page_url(&req, None).unwrap();
    assert!(url.query().unwrap().contains("maxResults=50"));
}

#[test]
fn candidate_merges_statistics_and_duration() {
    let cand = candidate_from_item(detail_item("v1", "12345", "PT1H5M30S"));
    assert_eq!(cand.id, "v1");
    assert_eq!(cand.views, 12_345);
    assert_eq!(cand.duration_secs, 3930);
}

#[test]
fn candidate_defaults_unparseable_views_to_zero() {
    let cand = candidate_from_item(detail_item("v1", "hidden", "PT45S"));
    assert_eq!(cand.views, 0);
    assert_eq!(cand.duration_secs, 45);
}

#[test]
fn candidate_defaults_missing_duration_to_zero() {
    let mut item = detail_item("v1", "10", "PT45S");
    item.content_details.duration = None;
    let cand = candidate_from_item(item);
    assert_eq!(cand.duration_secs, 0);
}
