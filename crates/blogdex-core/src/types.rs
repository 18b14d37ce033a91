//! Source-agnostic blog and post data shapes.
//!
//! Every acquisition strategy — rendered-page crawl, direct stat endpoints,
//! RSS feed, seeded synthesis — normalizes into these two types. They are
//! constructed once per analysis request and never mutated afterwards; there
//! is no persistence layer, so they live exactly as long as the request.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::category::Category;

/// Blog-level metadata in the common shape all strategies produce.
///
/// Counts default to 0 when a source cannot provide them; they are never
/// negative. `blog_id` is the stable key used for caching and seeding and
/// must not change once acquired.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogProfile {
    pub blog_id: String,
    pub nickname: String,
    pub category: Category,
    pub subscriber_count: u64,
    pub post_count: u64,
    pub scrap_count: u64,
    pub average_views: u64,
    /// Posts per day.
    pub post_frequency: f64,
    pub total_visitor_count: Option<u64>,
    pub daily_visitor_count: Option<u64>,
    pub average_visitor_count: Option<u64>,
}

/// A single post belonging to one blog's analysis result.
///
/// Produced in one batch by the acquisition chain (most-recent-first by
/// convention, not enforced) and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// May be empty; consumers render empty titles as "제목 없음".
    pub title: String,
    pub body_text: String,
    /// Defaults to the acquisition instant when the source date is
    /// unparseable.
    pub published_at: DateTime<Utc>,
    pub image_count: u64,
    pub video_count: u64,
    pub character_count: u64,
    pub comment_count: u64,
    pub like_count: u64,
    pub view_count: u64,
    pub link: Option<String>,
}
