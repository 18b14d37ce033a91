//! Relevance score: how well the content is optimized for search surfaces.

use blogdex_core::Post;
use serde::Serialize;

use crate::keywords::repeated_token_count;
use crate::stats::hangul_ratio;

const BAND: (f64, f64) = (20.0, 85.0);

/// Score returned verbatim when the batch has no posts. Short-circuiting
/// here is what keeps per-post averaging from ever dividing by zero.
const NO_POSTS_FLOOR: f64 = 20.0;

/// Named contributions to the relevance score. With posts present, the sum
/// of base + components equals the pre-clamp total; with no posts the
/// score is exactly [`NO_POSTS_FLOOR`].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelevanceBreakdown {
    /// Flat starting score.
    pub base: f64,
    /// Per-post title length and Hangul-ratio bands, averaged; capped 25.
    pub title: f64,
    /// Per-post content length and image-to-text ratio bands, averaged;
    /// capped 25.
    pub structure: f64,
    /// Average `(comments + 0.5·likes) / views` rate, banded; capped 20.
    pub engagement: f64,
    /// Twice the repeated-token count, capped 15.
    pub keyword: f64,
    posts_analyzed: usize,
}

impl RelevanceBreakdown {
    /// Sum of base and components before clamping.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.title + self.structure + self.engagement + self.keyword
    }

    /// Final score: the flat floor when no posts were analyzed, otherwise
    /// the clamped component sum.
    #[must_use]
    pub fn score(&self) -> f64 {
        if self.posts_analyzed == 0 {
            return NO_POSTS_FLOOR;
        }
        self.total().clamp(BAND.0, BAND.1)
    }
}

/// Compute the relevance breakdown over the post batch.
#[must_use]
pub fn relevance_breakdown(posts: &[Post]) -> RelevanceBreakdown {
    if posts.is_empty() {
        return RelevanceBreakdown {
            base: 0.0,
            title: 0.0,
            structure: 0.0,
            engagement: 0.0,
            keyword: 0.0,
            posts_analyzed: 0,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let count = posts.len() as f64;

    let title = (posts.iter().map(title_score).sum::<f64>() / count).min(25.0);
    let structure = (posts.iter().map(structure_score).sum::<f64>() / count).min(25.0);

    let engagement_rate = posts
        .iter()
        .map(|post| {
            #[allow(clippy::cast_precision_loss)]
            let views = (post.view_count.max(1)) as f64;
            #[allow(clippy::cast_precision_loss)]
            let interactions = post.comment_count as f64 + post.like_count as f64 * 0.5;
            interactions / views * 100.0
        })
        .sum::<f64>()
        / count;
    let engagement = if engagement_rate > 3.0 {
        20.0
    } else if engagement_rate > 1.0 {
        15.0
    } else if engagement_rate > 0.5 {
        10.0
    } else if engagement_rate > 0.1 {
        5.0
    } else {
        2.0
    };

    #[allow(clippy::cast_precision_loss)]
    let keyword = ((repeated_token_count(posts) * 2) as f64).min(15.0);

    let breakdown = RelevanceBreakdown {
        base: 5.0,
        title,
        structure,
        engagement,
        keyword,
        posts_analyzed: posts.len(),
    };

    tracing::debug!(
        posts = posts.len(),
        title,
        structure,
        engagement,
        keyword,
        total = breakdown.total(),
        score = breakdown.score(),
        "relevance breakdown"
    );

    breakdown
}

fn title_score(post: &Post) -> f64 {
    let length = post.title.chars().count();
    let mut score = if (10..=50).contains(&length) {
        15.0
    } else if (5..=80).contains(&length) {
        10.0
    } else {
        5.0
    };
    if hangul_ratio(&post.title) > 0.5 {
        score += 3.0;
    }
    score
}

fn structure_score(post: &Post) -> f64 {
    let mut score = if (300..=2000).contains(&post.character_count) {
        15.0
    } else if post.character_count >= 100 {
        10.0
    } else {
        5.0
    };

    #[allow(clippy::cast_precision_loss)]
    let image_text_ratio = post.image_count as f64 / (post.character_count as f64 / 300.0).max(1.0);
    if (0.3..=3.0).contains(&image_text_ratio) {
        score += 8.0;
    } else if image_text_ratio > 0.0 {
        score += 4.0;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(title: &str, chars: u64, images: u64, comments: u64, likes: u64, views: u64) -> Post {
        Post {
            title: title.to_string(),
            body_text: String::new(),
            published_at: Utc::now(),
            image_count: images,
            video_count: 0,
            character_count: chars,
            comment_count: comments,
            like_count: likes,
            view_count: views,
            link: None,
        }
    }

    #[test]
    fn empty_posts_return_exactly_the_floor() {
        let b = relevance_breakdown(&[]);
        assert!((b.score() - 20.0).abs() < f64::EPSILON);
        assert!(b.score().is_finite(), "must not be NaN");
    }

    #[test]
    fn components_sum_to_pre_clamp_total() {
        let b = relevance_breakdown(&[post("맛집 다녀온 후기 공유", 1200, 4, 5, 10, 500)]);
        let sum = b.base + b.title + b.structure + b.engagement + b.keyword;
        assert!((sum - b.total()).abs() < f64::EPSILON);
    }

    #[test]
    fn ideal_hangul_title_gets_bonus() {
        // 10–50 chars and majority Hangul: 15 + 3.
        let ideal = relevance_breakdown(&[post("주말 맛집 탐방 기록입니다", 500, 2, 0, 0, 1)]);
        let ascii = relevance_breakdown(&[post("my weekend food notes", 500, 2, 0, 0, 1)]);
        assert!((ideal.title - 18.0).abs() < f64::EPSILON);
        assert!((ascii.title - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_views_are_guarded_not_nan() {
        let b = relevance_breakdown(&[post("제목이 조금 깁니다만", 500, 1, 3, 4, 0)]);
        assert!(b.score().is_finite());
        assert!(b.engagement > 0.0);
    }

    #[test]
    fn balanced_image_ratio_beats_none() {
        // 1500 chars → ratio denominator 5; 4 images → 0.8, in band.
        let balanced = relevance_breakdown(&[post("이미지 배치가 좋은 글", 1500, 4, 0, 0, 1)]);
        let none = relevance_breakdown(&[post("이미지 없는 글입니다", 1500, 0, 0, 0, 1)]);
        assert!((balanced.structure - 23.0).abs() < f64::EPSILON);
        assert!((none.structure - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn score_never_exceeds_band_ceiling() {
        let posts: Vec<Post> = (0..5)
            .map(|_| post("맛집 맛집 맛집 제일 좋은 맛집", 1000, 3, 50, 100, 100))
            .collect();
        let b = relevance_breakdown(&posts);
        assert!(b.score() <= 85.0);
        assert!(b.score() >= 20.0);
    }
}
