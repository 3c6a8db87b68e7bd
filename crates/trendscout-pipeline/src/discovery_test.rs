use trendscout_core::Difficulty;

use super::*;

fn video(id: &str, title: &str, views: u64) -> Candidate {
    Candidate {
        id: id.to_string(),
        title: title.to_string(),
        channel: "채널".to_string(),
        channel_id: format!("UC-{id}"),
        published_at: None,
        views,
        duration_secs: 2400,
        tags: vec![],
        description: String::new(),
    }
}

fn topics() -> Vec<KeywordBucket> {
    vec![
        KeywordBucket {
            name: "재테크/연금/퇴직".to_string(),
            synonyms: vec!["연금".to_string(), "노후".to_string()],
        },
        KeywordBucket {
            name: "부동산/임대".to_string(),
            synonyms: vec!["부동산".to_string(), "아파트".to_string()],
        },
    ]
}

#[test]
fn discovery_labels_with_the_first_matching_topic_only() {
    // "노후 아파트" matches both tables; table order wins.
    let videos = vec![video("a", "노후 아파트 준비", 500)];

    let result = discover_topics(&videos, &topics(), TOPIC_LIMIT);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].topic, "재테크/연금/퇴직");
    assert_eq!(result[0].uploads, 1);
}

#[test]
fn discovery_keeps_the_highest_viewed_video_per_topic() {
    let videos = vec![
        video("small", "연금 기초", 100),
        video("big", "국민연금 총정리", 9_000),
        video("mid", "노후 자금", 3_000),
    ];

    let result = discover_topics(&videos, &topics(), TOPIC_LIMIT);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].best.id, "big");
    assert_eq!(result[0].uploads, 3);
}

#[test]
fn discovery_orders_topics_by_their_best_video() {
    let videos = vec![
        video("p1", "연금 정리", 1_000),
        video("r1", "아파트 전망", 8_000),
        video("r2", "부동산 입문", 200),
    ];

    let result = discover_topics(&videos, &topics(), TOPIC_LIMIT);

    let names: Vec<&str> = result.iter().map(|h| h.topic.as_str()).collect();
    assert_eq!(names, vec!["부동산/임대", "재테크/연금/퇴직"]);
}

#[test]
fn discovery_truncates_to_the_limit() {
    let videos = vec![
        video("p1", "연금", 1_000),
        video("r1", "부동산", 2_000),
    ];

    let result = discover_topics(&videos, &topics(), 1);

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].topic, "부동산/임대");
}

#[test]
fn discovery_skips_unlabeled_videos() {
    let videos = vec![video("x", "등산 브이로그", 50_000)];
    assert!(discover_topics(&videos, &topics(), TOPIC_LIMIT).is_empty());
}

#[test]
fn competition_counts_every_matching_archetype() {
    // One video in both archetypes, plus filler shaping the cutoff.
    let mut videos = vec![video("both", "노후 대비 아파트", 10_000)];
    for i in 0..9 {
        videos.push(video(&format!("pension-{i}"), "연금 이야기", 100 + i));
    }

    let result = competition(&videos, &topics());

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].archetype, "재테크/연금/퇴직");
    assert_eq!(result[0].uploads, 10);
    assert_eq!(result[1].archetype, "부동산/임대");
    assert_eq!(result[1].uploads, 1);
}

#[test]
fn competition_scores_top_tier_hit_rate() {
    // 10 videos, top 20% cutoff lands on the 2nd highest view count.
    // Both the 10_000 and 9_000 videos are top tier; only one archetype
    // places a video there.
    let mut videos = vec![
        video("hit", "연금 대박", 10_000),
        video("hit2", "노후 준비", 9_000),
    ];
    for i in 0..8 {
        videos.push(video(&format!("estate-{i}"), "부동산 소식", 100 + i));
    }

    let result = competition(&videos, &topics());

    let estate = result
        .iter()
        .find(|r| r.archetype == "부동산/임대")
        .unwrap();
    assert_eq!(estate.top_hits, 0);
    assert_eq!(estate.difficulty, Difficulty::Hard);

    let pension = result
        .iter()
        .find(|r| r.archetype == "재테크/연금/퇴직")
        .unwrap();
    assert_eq!(pension.uploads, 2);
    assert_eq!(pension.top_hits, 2);
    assert!((pension.top_ratio - 1.0).abs() < f64::EPSILON);
    assert_eq!(pension.difficulty, Difficulty::Easy);
}

#[test]
fn competition_difficulty_thresholds() {
    assert_eq!(super::difficulty_from_ratio(0.35), Difficulty::Easy);
    assert_eq!(super::difficulty_from_ratio(0.2), Difficulty::Normal);
    assert_eq!(super::difficulty_from_ratio(0.19), Difficulty::Hard);
}

#[test]
fn competition_on_empty_window_is_empty() {
    assert!(competition(&[], &topics()).is_empty());
}

#[test]
fn top_by_views_sorts_and_truncates() {
    let videos = vec![
        video("a", "연금", 100),
        video("b", "부동산", 300),
        video("c", "노후", 200),
    ];

    let top = top_by_views(&videos, 2);

    let ids: Vec<&str> = top.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}
