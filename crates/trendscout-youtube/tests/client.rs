//! Integration tests for `YouTubeClient` using wiremock HTTP mocks.

use chrono::Utc;
use trendscout_youtube::{SearchOrder, SearchRequest, YouTubeClient, YouTubeError};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> YouTubeClient {
    YouTubeClient::with_base_url("test-key", 30, "trendscout-test/0.1", "ko", base_url)
        .expect("client construction should not fail")
}

fn request(query: &str, max_pages: u32) -> SearchRequest<'_> {
    SearchRequest {
        query,
        published_after: Utc::now() - chrono::Duration::days(7),
        published_before: None,
        order: SearchOrder::ViewCount,
        duration_hint: None,
        page_size: 50,
        max_pages,
    }
}

fn search_page(ids: &[&str], next_token: Option<&str>) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| serde_json::json!({ "id": { "kind": "youtube#video", "videoId": id } }))
        .collect();
    match next_token {
        Some(tok) => serde_json::json!({ "items": items, "nextPageToken": tok }),
        None => serde_json::json!({ "items": items }),
    }
}

fn detail(id: &str, views: u64, duration: &str, live: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "snippet": {
            "title": format!("영상 {id}"),
            "channelTitle": "시니어 채널",
            "channelId": "UCseed",
            "publishedAt": "2025-01-02T00:00:00Z",
            "tags": ["건강"],
            "description": "설명",
            "liveBroadcastContent": live
        },
        "statistics": { "viewCount": views.to_string() },
        "contentDetails": { "duration": duration }
    })
}

#[tokio::test]
async fn search_pages_deduplicates_and_merges_details() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&["a", "b", "a"], Some("p2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("pageToken", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&["c", "b"], None)))
        .expect(1)
        .mount(&server)
        .await;

    // One detail call for the deduplicated ids in first-seen order.
    let details = serde_json::json!({
        "items": [
            detail("a", 10, "PT31M", "none"),
            detail("b", 100, "PT40M", "live"),
            detail("c", 50, "PT1H5M30S", "none")
        ]
    });
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "a,b,c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&details))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_top_by_views(&request("시니어 건강", 5))
        .await
        .expect("search should succeed");

    // The live broadcast "b" is excluded, the rest sorted by views descending.
    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a"]);
    assert_eq!(candidates[0].views, 50);
    assert_eq!(candidates[0].duration_secs, 3930);
    assert_eq!(candidates[1].duration_secs, 1860);
}

#[tokio::test]
async fn search_stops_at_max_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param_is_missing("pageToken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(search_page(&["a", "b"], Some("p2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let details = serde_json::json!({
        "items": [
            detail("a", 10, "PT31M", "none"),
            detail("b", 20, "PT32M", "none")
        ]
    });
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "a,b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&details))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_candidates(&request("연금", 1))
        .await
        .expect("single-page search should succeed");

    assert_eq!(candidates.len(), 2);
}

#[tokio::test]
async fn empty_search_result_is_an_empty_list_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&[], None)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let candidates = client
        .search_candidates(&request("없는 검색어", 5))
        .await
        .expect("empty search should succeed");
    assert!(candidates.is_empty());
}

#[tokio::test]
async fn non_success_search_response_is_fatal() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": { "code": 403, "message": "quotaExceeded" }
    });
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_candidates(&request("시니어", 5))
        .await
        .expect_err("403 should be fatal");

    assert!(
        matches!(err, YouTubeError::Api(ref msg) if msg.contains("quotaExceeded")),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn non_success_detail_response_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(&["a"], None)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .search_candidates(&request("시니어", 5))
        .await
        .expect_err("500 on detail lookup should be fatal");
    assert!(matches!(err, YouTubeError::Api(_)));
}

#[tokio::test]
async fn resolve_handle_returns_channel_id() {
    let server = MockServer::start().await;

    let body = serde_json::json!({ "items": [ { "id": "UCresolved" } ] });
    Mock::given(method("GET"))
        .and(path("/channels"))
        .and(query_param("forHandle", "@senior-health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client.resolve_handle("@senior-health").await.unwrap();
    assert_eq!(resolved.as_deref(), Some("UCresolved"));
}

#[tokio::test]
async fn resolve_handle_unknown_returns_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let resolved = client.resolve_handle("@nobody").await.unwrap();
    assert!(resolved.is_none());
}

#[tokio::test]
async fn video_owner_returns_channel_and_title() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [ {
            "id": "vid1",
            "snippet": { "title": "씨앗 영상", "channelId": "UCowner", "channelTitle": "c" }
        } ]
    });
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "vid1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let owner = client.video_owner("vid1").await.unwrap();
    assert_eq!(owner, Some(("UCowner".to_string(), "씨앗 영상".to_string())));
}
