use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::tests::test_state;
use crate::api::{build_app, default_rate_limit_state};

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title><![CDATA[분석대상님의 블로그]]></title>
    <item>
      <title><![CDATA[맛집 다녀온 기록 하나]]></title>
      <link>https://blog.naver.com/analyzeme/1</link>
      <description><![CDATA[맛집 이야기. 맛집 추천과 맛집 방문 기록. <img src="a.jpg"/>]]></description>
      <pubDate>Mon, 12 May 2025 09:30:00 +0900</pubDate>
    </item>
    <item>
      <title><![CDATA[맛집 다녀온 기록 둘]]></title>
      <link>https://blog.naver.com/analyzeme/2</link>
      <description><![CDATA[두 번째 맛집 방문. <img src="b.jpg"/><img src="c.jpg"/>]]></description>
      <pubDate>Tue, 13 May 2025 10:00:00 +0900</pubDate>
    </item>
  </channel>
</rss>"#;

fn analyze_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/analysis/blog")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

#[tokio::test]
async fn missing_blog_url_is_a_validation_error() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;
    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({ "userPlan": "basic" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
}

#[tokio::test]
async fn exceeded_plan_limit_is_rejected_before_acquisition() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;
    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({
            "blogUrl": "analyzeme",
            "userPlan": "basic",
            "todayUsage": 50
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("usage_limited"));
}

#[tokio::test]
async fn free_plan_has_no_allowance() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;
    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({ "blogUrl": "analyzeme" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn malformed_identifier_is_a_validation_error() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;
    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({
            "blogUrl": "이건 올바르지 않은 입력",
            "userPlan": "standard"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"].as_str(), Some("validation_error"));
}

#[tokio::test]
async fn full_analysis_over_the_feed_path_succeeds() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;

    // Page crawl and stat endpoints 404 (no mounts on `blog`); the feed
    // answers; search answers with an empty result page.
    Mock::given(method("GET"))
        .and(path("/analyzeme.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .mount(&feed)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&search)
        .await;

    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({
            "blogUrl": "analyzeme",
            "userPlan": "basic",
            "todayUsage": 3
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;

    assert_eq!(json["success"].as_bool(), Some(true));
    assert_eq!(json["usage"].as_u64(), Some(4));

    let result = &json["result"];
    assert_eq!(result["blogInfo"]["blogId"].as_str(), Some("analyzeme"));
    assert_eq!(result["blogInfo"]["nickname"].as_str(), Some("분석대상"));

    let overall = result["blogScore"]["overall"].as_f64().expect("overall");
    assert!((20.0..=85.0).contains(&overall));
    let expertise = result["blogScore"]["expertise"].as_f64().expect("expertise");
    assert!((15.0..=85.0).contains(&expertise));

    assert!(result["blogIndex"]["grade"].is_string());
    let progress = result["blogIndex"]["progressToNext"].as_f64().expect("progress");
    assert!((0.0..=100.0).contains(&progress));

    // "맛집" repeats often enough to become a keyword, so the enrichment
    // ran against the (empty) search page and reported unranked keywords.
    assert!(!result["keywords"].as_array().expect("keywords").is_empty());
    let rankings = result["keywordRankings"].as_array().expect("rankings");
    assert!(!rankings.is_empty());
    assert!(rankings[0]["bestRank"].is_null());

    assert_eq!(
        result["recentPosts"].as_array().map(Vec::len),
        Some(2),
        "both feed posts should be displayed"
    );
    assert!(result["performanceMetrics"]["totalVisitors"].is_u64());
    assert!(result["contentPattern"]["characterCount"]["evaluation"].is_string());
}

#[tokio::test]
async fn synthetic_fallback_still_returns_success() {
    let blog = MockServer::start().await;
    let feed = MockServer::start().await;
    let search = MockServer::start().await;
    // Nothing mounted anywhere: acquisition falls through to synthesis and
    // enrichment fails per-keyword — the analysis still succeeds.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&search)
        .await;

    let app = build_app(
        test_state(&blog, &feed, &search).await,
        default_rate_limit_state(),
    );

    let response = app
        .oneshot(analyze_request(serde_json::json!({
            "blogUrl": "https://blog.naver.com/fallbackblog",
            "userPlan": "standard"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["success"].as_bool(), Some(true));
    assert_eq!(
        json["result"]["blogInfo"]["blogId"].as_str(),
        Some("fallbackblog")
    );
    let overall = json["result"]["blogScore"]["overall"].as_f64().expect("overall");
    assert!((20.0..=85.0).contains(&overall));
}

#[test]
fn relative_time_formats() {
    use super::relative_time;
    use chrono::{Duration, Utc};

    let now = Utc::now();
    assert_eq!(relative_time(now - Duration::days(3), now), "3일 전");
    assert_eq!(relative_time(now - Duration::hours(5), now), "5시간 전");
    assert_eq!(relative_time(now - Duration::minutes(10), now), "10분 전");
    assert_eq!(relative_time(now, now), "1분 전");
}

#[test]
fn comparison_entry_evaluations() {
    use super::comparison_entry;

    assert_eq!(comparison_entry(90.0, 88.24, 85.0).evaluation, "평균 이상");
    assert_eq!(comparison_entry(86.0, 88.24, 85.0).evaluation, "평균");
    assert_eq!(comparison_entry(60.0, 88.24, 85.0).evaluation, "평균 이하");
}
