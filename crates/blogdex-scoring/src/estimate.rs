//! Simulated rank estimates.
//!
//! Real third-party ranking integration is deliberately absent; these
//! numbers position the blog inside assumed population sizes and exist for
//! reporting only.

use blogdex_core::BlogProfile;
use serde::Serialize;

/// Assumed total blog population.
const TOTAL_BLOGS: f64 = 1_000_000.0;
/// Assumed blogs per category.
const CATEGORY_BLOGS: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RankEstimate {
    pub total_rank: u64,
    pub category_rank: u64,
}

/// Estimate overall and in-category rank from a weighted count score.
#[must_use]
pub fn estimate_rank(profile: &BlogProfile) -> RankEstimate {
    #[allow(clippy::cast_precision_loss)]
    let weighted = profile.subscriber_count as f64 * 0.3
        + profile.post_count as f64 * 0.2
        + profile.scrap_count as f64 * 0.5;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_rank = (TOTAL_BLOGS * (1.0 - weighted / 10_000.0)).floor().max(1.0) as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let category_rank = (CATEGORY_BLOGS * (1.0 - weighted / 5_000.0)).floor().max(1.0) as u64;

    RankEstimate {
        total_rank,
        category_rank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdex_core::Category;

    fn profile(subscribers: u64, posts: u64, scraps: u64) -> BlogProfile {
        BlogProfile {
            blog_id: "unit".to_string(),
            nickname: "unit".to_string(),
            category: Category::Tech,
            subscriber_count: subscribers,
            post_count: posts,
            scrap_count: scraps,
            average_views: 0,
            post_frequency: 0.0,
            total_visitor_count: None,
            daily_visitor_count: None,
            average_visitor_count: None,
        }
    }

    #[test]
    fn bigger_blogs_rank_higher() {
        let small = estimate_rank(&profile(100, 50, 10));
        let large = estimate_rank(&profile(5000, 500, 2000));
        assert!(large.total_rank < small.total_rank);
        assert!(large.category_rank < small.category_rank);
    }

    #[test]
    fn rank_never_drops_below_one() {
        let huge = estimate_rank(&profile(1_000_000, 1_000_000, 1_000_000));
        assert_eq!(huge.total_rank, 1);
        assert_eq!(huge.category_rank, 1);
    }

    #[test]
    fn empty_blog_sits_at_the_bottom() {
        let rank = estimate_rank(&profile(0, 0, 0));
        assert_eq!(rank.total_rank, 1_000_000);
        assert_eq!(rank.category_rank, 50_000);
    }
}
