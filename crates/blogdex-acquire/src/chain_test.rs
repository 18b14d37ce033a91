use super::*;
use crate::types::Confidence;
use chrono::TimeZone;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FEED_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title><![CDATA[테스트님의 블로그]]></title>
    <item>
      <title><![CDATA[여행 기록 하나]]></title>
      <link>https://blog.naver.com/ladderblog/1</link>
      <description><![CDATA[여행을 다녀왔습니다. <img src="a.jpg"/>]]></description>
      <pubDate>Mon, 12 May 2025 09:30:00 +0900</pubDate>
    </item>
  </channel>
</rss>"#;

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
}

/// Chain wired so the page and endpoint strategies hit `blog_server` and
/// the feed strategy hits `feed_server`.
fn chain_for(blog_server: &MockServer, feed_server: &MockServer) -> AcquisitionChain {
    let mut config = blogdex_core::load_app_config_from_env().expect("default config");
    config.blog_base_url = blog_server.uri();
    config.feed_base_url = feed_server.uri();
    config.page_timeout_secs = 5;
    config.http_timeout_secs = 5;
    AcquisitionChain::from_config(&config).expect("chain builds")
}

#[tokio::test]
async fn invalid_identifier_is_a_hard_error() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;
    let chain = chain_for(&blog_server, &feed_server);

    let err = chain.acquire("not a valid id!", fixed_now()).await.unwrap_err();
    assert!(matches!(err, AcquireError::InvalidIdentifier { .. }));
}

#[tokio::test]
async fn ladder_falls_through_to_feed_when_earlier_rungs_fail() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;

    // Page crawl and every stat endpoint fail hard.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&blog_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ladderblog.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .mount(&feed_server)
        .await;

    let chain = chain_for(&blog_server, &feed_server);
    let acquired = chain.acquire("ladderblog", fixed_now()).await.unwrap();

    assert_eq!(acquired.source, AcquisitionSource::Feed);
    assert_eq!(acquired.confidence, Confidence::High);
    assert_eq!(acquired.profile.nickname, "테스트");
    assert_eq!(acquired.posts.len(), 1);
}

#[tokio::test]
async fn ladder_ends_in_synthetic_when_everything_fails() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;
    // No mounts anywhere: all network strategies 404.

    let chain = chain_for(&blog_server, &feed_server);
    let acquired = chain.acquire("ladderblog", fixed_now()).await.unwrap();

    assert_eq!(acquired.source, AcquisitionSource::Synthetic);
    assert_eq!(acquired.confidence, Confidence::Simulated);
    assert_eq!(acquired.posts.len(), 20);
    assert_eq!(acquired.profile.blog_id, "ladderblog");
}

#[tokio::test]
async fn synthetic_fallback_is_bit_identical_across_calls() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;
    let chain = chain_for(&blog_server, &feed_server);

    let a = chain.acquire("ladderblog", fixed_now()).await.unwrap();
    let b = chain.acquire("ladderblog", fixed_now()).await.unwrap();

    assert_eq!(a.profile, b.profile);
    assert_eq!(a.posts, b.posts);
}

#[tokio::test]
async fn direct_api_win_backfills_posts_from_feed() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;

    // Page crawl fails (home page has no title element); stat endpoint
    // answers; feed provides the posts.
    Mock::given(method("GET"))
        .and(path("/ladderblog"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&blog_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/blogs/ladderblog/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "subscriberCount": 900,
            "postCount": 60,
            "totalViews": 120000
        })))
        .mount(&blog_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ladderblog.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FEED_BODY))
        .mount(&feed_server)
        .await;

    let chain = chain_for(&blog_server, &feed_server);
    let acquired = chain.acquire("ladderblog", fixed_now()).await.unwrap();

    assert_eq!(acquired.source, AcquisitionSource::DirectApi);
    assert_eq!(acquired.confidence, Confidence::High);
    assert_eq!(acquired.profile.subscriber_count, 900);
    assert_eq!(acquired.posts.len(), 1, "posts should come from the feed");
    assert_eq!(acquired.posts[0].title, "여행 기록 하나");
}

#[tokio::test]
async fn url_input_is_accepted() {
    let blog_server = MockServer::start().await;
    let feed_server = MockServer::start().await;
    let chain = chain_for(&blog_server, &feed_server);

    let acquired = chain
        .acquire("https://blog.naver.com/ladderblog", fixed_now())
        .await
        .unwrap();
    assert_eq!(acquired.profile.blog_id, "ladderblog");
}
