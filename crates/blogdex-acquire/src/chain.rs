//! The acquisition strategy ladder and its driver.
//!
//! Strategies are typed objects sharing an `attempt` capability, iterated
//! in a fixed order by [`AcquisitionChain::acquire`]. Later strategies run
//! only after earlier ones have been confirmed failed — a fail-fast ladder,
//! not a race. Upstream failures never escape the driver: the ladder ends
//! in seeded synthesis, so a valid identifier always produces data.

use blogdex_core::{AppConfig, Post};
use chrono::{DateTime, Utc};

use crate::endpoints::DirectApiStrategy;
use crate::error::AcquireError;
use crate::feed::FeedStrategy;
use crate::identifier::extract_blog_id;
use crate::page::PageCrawlStrategy;
use crate::synthetic;
use crate::types::{AcquiredBlog, AcquisitionSource, StrategyYield};

/// Number of posts synthesized when no real posts could be collected.
const SYNTHETIC_POST_COUNT: usize = 20;

/// One rung of the ladder.
pub(crate) enum Strategy {
    PageCrawl(PageCrawlStrategy),
    DirectApi(DirectApiStrategy),
    Feed(FeedStrategy),
    Synthetic,
}

impl Strategy {
    pub(crate) fn source(&self) -> AcquisitionSource {
        match self {
            Strategy::PageCrawl(_) => AcquisitionSource::PageCrawl,
            Strategy::DirectApi(_) => AcquisitionSource::DirectApi,
            Strategy::Feed(_) => AcquisitionSource::Feed,
            Strategy::Synthetic => AcquisitionSource::Synthetic,
        }
    }

    pub(crate) async fn attempt(
        &self,
        blog_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StrategyYield, AcquireError> {
        match self {
            Strategy::PageCrawl(s) => s.attempt(blog_id, now).await,
            Strategy::DirectApi(s) => s.attempt(blog_id, now).await,
            Strategy::Feed(s) => s.attempt(blog_id, now).await,
            Strategy::Synthetic => Ok(StrategyYield {
                profile: synthetic::generate_profile(blog_id),
                posts: synthetic::generate_posts(blog_id, SYNTHETIC_POST_COUNT, now),
            }),
        }
    }
}

pub struct AcquisitionChain {
    ladder: Vec<Strategy>,
}

impl AcquisitionChain {
    /// Build the standard ladder from configuration:
    /// page crawl → direct endpoints → feed → synthetic.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AcquireError> {
        let ladder = vec![
            Strategy::PageCrawl(PageCrawlStrategy::new(
                &config.blog_base_url,
                config.page_timeout_secs,
                &config.user_agent,
                config.post_fetch_limit,
            )?),
            Strategy::DirectApi(DirectApiStrategy::new(
                &config.blog_base_url,
                config.http_timeout_secs,
                &config.user_agent,
            )?),
            Strategy::Feed(FeedStrategy::new(
                &config.feed_base_url,
                config.http_timeout_secs,
                &config.user_agent,
            )?),
            Strategy::Synthetic,
        ];
        Ok(Self { ladder })
    }

    /// Acquire a profile and posts for the raw user input.
    ///
    /// `now` anchors every fallback date so that a fully synthetic result
    /// is reproducible for a given (identifier, instant) pair.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::InvalidIdentifier`] when the input parses to no
    ///   identifier — the only error a caller is expected to surface.
    /// - [`AcquireError::Exhausted`] if every rung including synthesis
    ///   failed (internal error; synthesis has no failure mode).
    pub async fn acquire(
        &self,
        input: &str,
        now: DateTime<Utc>,
    ) -> Result<AcquiredBlog, AcquireError> {
        let blog_id = extract_blog_id(input)?;

        let mut winner: Option<(AcquisitionSource, StrategyYield)> = None;
        for strategy in &self.ladder {
            let source = strategy.source();
            match strategy.attempt(&blog_id, now).await {
                Ok(result) => {
                    tracing::info!(%blog_id, %source, posts = result.posts.len(), "acquisition strategy succeeded");
                    winner = Some((source, result));
                    break;
                }
                Err(e) => {
                    tracing::warn!(%blog_id, %source, error = %e, "acquisition strategy failed; advancing ladder");
                }
            }
        }

        let Some((source, mut result)) = winner else {
            return Err(AcquireError::Exhausted { blog_id });
        };

        // A profile-only win (typically the stat endpoints) still needs
        // posts: prefer real feed items, then synthesize. The confidence
        // tag keeps reflecting the profile's source.
        if result.posts.is_empty() {
            result.posts = self.backfill_posts(&blog_id, now).await;
        }

        Ok(AcquiredBlog {
            confidence: source.confidence(),
            profile: result.profile,
            posts: result.posts,
            source,
        })
    }

    async fn backfill_posts(&self, blog_id: &str, now: DateTime<Utc>) -> Vec<Post> {
        for strategy in &self.ladder {
            if let Strategy::Feed(feed) = strategy {
                match feed.attempt(blog_id, now).await {
                    Ok(result) if !result.posts.is_empty() => {
                        tracing::debug!(blog_id, "backfilled posts from feed");
                        return result.posts;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::debug!(blog_id, error = %e, "feed post backfill failed");
                    }
                }
            }
        }
        synthetic::generate_posts(blog_id, SYNTHETIC_POST_COUNT, now)
    }
}

#[cfg(test)]
#[path = "chain_test.rs"]
mod tests;
