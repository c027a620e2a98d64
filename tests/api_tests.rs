/// In-process tests of the HTTP surface
/// Status codes, response shapes and rate limiting through the router
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gfg_stats_api::api::router;
use gfg_stats_api::config::Config;
use gfg_stats_api::errors::AppError;
use gfg_stats_api::fetcher::PageFetcher;
use gfg_stats_api::handlers::AppState;
use gfg_stats_api::profile::ProfileService;
use gfg_stats_api::rate_limiter::RateLimiter;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

struct FixedPage {
    markup: Result<String, AppError>,
    calls: AtomicUsize,
}

#[async_trait]
impl PageFetcher for FixedPage {
    async fn fetch(&self, _username: &str) -> Result<String, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.markup.clone()
    }
}

fn next_data(state: Value) -> String {
    format!(
        r#"<html><script id="__NEXT_DATA__" type="application/json">{}</script></html>"#,
        state
    )
}

fn sample_page() -> String {
    next_data(json!({
        "props": {"pageProps": {
            "userInfo": {
                "name": "Margaret",
                "institute_name": "MIT",
                "score": 77,
                "total_problems_solved": 9,
                "monthly_score": 0,
                "pod_solved_longest_streak": 4
            },
            "languages": "Java",
            "heatMapData": {"result": {
                "2024-01-05": true,
                "2024-01-04": true,
                "2024-01-03": false,
                "2024-01-02": true
            }},
            "userSubmissionsInfo": {
                "Hard": {
                    "1": {"pname": "Apollo Guidance", "slug": "apollo-guidance"},
                    "2": {"slug": "missing-name"}
                }
            }
        }}
    }))
}

fn app_with(markup: Result<String, AppError>, capacity: usize) -> (axum::Router, Arc<FixedPage>) {
    let fetcher = Arc::new(FixedPage {
        markup,
        calls: AtomicUsize::new(0),
    });
    let state = Arc::new(AppState {
        config: Config::default(),
        profiles: ProfileService::new(fetcher.clone()),
        limiter: RateLimiter::in_memory(Duration::from_secs(60), capacity),
    });
    (router(state), fetcher)
}

async fn get(app: &axum::Router, uri: &str, client: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .uri(uri)
        .header("x-forwarded-for", client)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: &axum::Router, uri: &str, client: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, uri, client).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = app_with(Ok(sample_page()), 10);
    let (status, body) = get_json(&app, "/health", "198.51.100.1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_profile_shape() {
    let (app, _) = app_with(Ok(sample_page()), 10);
    let (status, body) = get_json(&app, "/api/profile?username=margaret_h", "198.51.100.1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["info"],
        json!({
            "username": "margaret_h",
            "fullname": "Margaret",
            "qualification": "MIT",
            "joined_date": null,
            "institution": "MIT",
            "languages_used": ["Java"]
        })
    );
    let stats = &body["solved_stats"];
    assert_eq!(stats["current_streak"], 2);
    assert_eq!(stats["monthly_score"], 0);
    assert_eq!(stats["contest_rating"], Value::Null);
    assert_eq!(stats["difficulty_breakdown"]["hard"], 2);
    assert_eq!(
        stats["problems_by_difficulty"]["hard"],
        json!([{
            "name": "Apollo Guidance",
            "url": "https://www.geeksforgeeks.org/problems/apollo-guidance/0"
        }])
    );
}

#[tokio::test]
async fn test_each_endpoint_projects_snapshot() {
    let (app, _) = app_with(Ok(sample_page()), 50);
    let client = "198.51.100.2";

    let (_, basic) = get_json(&app, "/api/basic-info?username=margaret_h", client).await;
    assert_eq!(basic["fullname"], "Margaret");
    assert!(basic.get("institution").is_none());

    let (_, coding) = get_json(&app, "/api/coding-stats?username=margaret_h", client).await;
    assert_eq!(
        coding,
        json!({
            "coding_score": 77,
            "problems_solved": 9,
            "contest_rating": null,
            "overall_rank": null
        })
    );

    let (_, subs) = get_json(&app, "/api/submission-data?username=margaret_h", client).await;
    assert_eq!(subs["total_submissions"], 9);
    assert_eq!(subs["submissions_by_difficulty"]["hard"].as_array().unwrap().len(), 1);

    let (_, diff) = get_json(&app, "/api/difficulty-stats?username=margaret_h", client).await;
    assert_eq!(
        diff,
        json!({"solved_by_difficulty": {"basic": 0, "easy": 0, "medium": 0, "hard": 2}})
    );

    let (_, inst) =
        get_json(&app, "/api/institution-languages?username=margaret_h", client).await;
    assert_eq!(inst, json!({"institution": "MIT", "languages_used": ["Java"]}));

    let (_, streak) = get_json(&app, "/api/streak?username=margaret_h", client).await;
    assert_eq!(
        streak,
        json!({"current_streak": 2, "longest_streak": 4, "monthly_score": 0})
    );
}

#[tokio::test]
async fn test_invalid_username_is_400_without_fetch() {
    let (app, fetcher) = app_with(Ok(sample_page()), 10);

    for uri in [
        "/api/profile",
        "/api/profile?username=ab",
        "/api/streak?username=bad%20name",
    ] {
        let (status, body) = get_json(&app, uri, "198.51.100.3").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "Invalid username parameter");
    }
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rate_limit_is_429_per_client() {
    let (app, fetcher) = app_with(Ok(sample_page()), 3);

    for _ in 0..3 {
        let (status, _) = get(&app, "/api/streak?username=margaret_h", "203.0.113.9").await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = get_json(&app, "/api/streak?username=margaret_h", "203.0.113.9").await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "Rate limit exceeded. Please try again later.");
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 3);

    let (status, _) = get(&app, "/api/streak?username=margaret_h", "203.0.113.10").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_spoofed_forwarded_hops_share_proxy_budget() {
    let (app, fetcher) = app_with(Ok(sample_page()), 10);

    let mut admitted = 0;
    for i in 0..30 {
        let forwarded = format!("10.9.{}.{}, 203.0.113.5", i / 256, i % 256);
        let (status, _) = get(&app, "/api/streak?username=margaret_h", &forwarded).await;
        if status == StatusCode::OK {
            admitted += 1;
        } else {
            assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        }
    }
    assert_eq!(admitted, 10);
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn test_not_found_is_500_with_message() {
    let (app, _) = app_with(Ok("<p>Profile does not exist</p>".to_string()), 10);
    let (status, body) =
        get_json(&app, "/api/profile?username=ghost_user", "198.51.100.4").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Profile 'ghost_user' does not exist"}));
}

#[tokio::test]
async fn test_fetch_failure_is_500() {
    let (app, _) = app_with(Err(AppError::Fetch("timed out".to_string())), 10);
    let (status, body) =
        get_json(&app, "/api/coding-stats?username=margaret_h", "198.51.100.5").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch profile: timed out");
}

#[tokio::test]
async fn test_repeated_calls_are_byte_identical() {
    let (app, _) = app_with(Ok(sample_page()), 10);
    let (_, first) = get(&app, "/api/profile?username=margaret_h", "198.51.100.6").await;
    let (_, second) = get(&app, "/api/profile?username=margaret_h", "198.51.100.6").await;
    assert_eq!(first, second);
}
