//! Direct stat-endpoint probing strategy.
//!
//! Tries a fixed list of candidate internal API paths that some blog
//! frontends expose. Fast when one answers, but frequently blocked or
//! absent — a failed candidate moves straight to the next one, and a fully
//! failed probe advances the ladder.

use blogdex_core::{BlogProfile, Category};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::error::AcquireError;
use crate::http::build_client;
use crate::types::StrategyYield;

/// Stats payload shape across the candidate endpoints. Field names vary by
/// endpoint generation, so every field carries its observed alias.
#[derive(Debug, Deserialize)]
struct StatsPayload {
    #[serde(default, rename = "subscriberCount", alias = "followerCount")]
    subscriber_count: Option<u64>,
    #[serde(default, rename = "postCount", alias = "totalPosts")]
    post_count: Option<u64>,
    #[serde(default, rename = "totalViews", alias = "totalVisits")]
    total_views: Option<u64>,
    #[serde(default, rename = "todayViews", alias = "dailyVisits")]
    today_views: Option<u64>,
    #[serde(default, rename = "scrapCount")]
    scrap_count: Option<u64>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

pub struct DirectApiStrategy {
    client: Client,
    base_url: String,
}

impl DirectApiStrategy {
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, AcquireError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The fixed candidate paths, in probe order.
    fn candidate_urls(&self, blog_id: &str) -> [String; 4] {
        let base = &self.base_url;
        [
            format!("{base}/api/blogs/{blog_id}/stats"),
            format!("{base}/BlogStatistics.naver?blogId={blog_id}"),
            format!("{base}/BlogDashboard.naver?blogId={blog_id}"),
            format!("{base}/{blog_id}/statistics"),
        ]
    }

    /// Probe each candidate endpoint until one returns a parseable stats
    /// payload. Yields a profile with no posts; the chain backfills posts
    /// from the feed or the synthetic generator.
    ///
    /// # Errors
    ///
    /// Returns the last candidate's failure when none answers.
    pub async fn attempt(
        &self,
        blog_id: &str,
        _now: DateTime<Utc>,
    ) -> Result<StrategyYield, AcquireError> {
        let mut last_err = AcquireError::Extraction {
            context: format!("stat endpoints for {blog_id}"),
            reason: "no candidate endpoints configured".to_string(),
        };

        for url in self.candidate_urls(blog_id) {
            match self.probe(&url).await {
                Ok(payload) => {
                    tracing::debug!(blog_id, %url, "stat endpoint answered");
                    return Ok(StrategyYield {
                        profile: profile_from_stats(blog_id, &payload),
                        posts: Vec::new(),
                    });
                }
                Err(e) => {
                    tracing::debug!(blog_id, %url, error = %e, "stat endpoint candidate failed");
                    last_err = e;
                }
            }
        }

        Err(last_err)
    }

    async fn probe(&self, url: &str) -> Result<StatsPayload, AcquireError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: StatsPayload =
            serde_json::from_str(&body).map_err(|e| AcquireError::Extraction {
                context: url.to_string(),
                reason: format!("stats payload did not parse: {e}"),
            })?;

        // An empty object parses fine but carries nothing usable.
        if payload.subscriber_count.is_none() && payload.post_count.is_none() {
            return Err(AcquireError::Extraction {
                context: url.to_string(),
                reason: "stats payload carried no counts".to_string(),
            });
        }

        Ok(payload)
    }
}

fn profile_from_stats(blog_id: &str, stats: &StatsPayload) -> BlogProfile {
    let post_count = stats.post_count.unwrap_or(0);
    let total_views = stats.total_views.unwrap_or(0);

    #[allow(clippy::cast_precision_loss)]
    let post_frequency = if post_count > 0 {
        post_count as f64 / 365.0
    } else {
        0.1
    };

    BlogProfile {
        blog_id: blog_id.to_string(),
        nickname: stats
            .nickname
            .clone()
            .unwrap_or_else(|| blog_id.to_string()),
        category: stats
            .category
            .as_deref()
            .map_or(Category::Uncategorized, Category::from_label),
        subscriber_count: stats.subscriber_count.unwrap_or(0),
        post_count,
        scrap_count: stats.scrap_count.unwrap_or(0),
        average_views: total_views / post_count.max(1),
        post_frequency,
        total_visitor_count: Some(total_views),
        daily_visitor_count: Some(stats.today_views.unwrap_or(0)),
        average_visitor_count: Some(total_views / 30),
    }
}
