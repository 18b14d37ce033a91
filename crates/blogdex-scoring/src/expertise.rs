//! Expertise score: how much topical depth the blog demonstrates.

use blogdex_core::{BlogProfile, Category, Post};
use serde::Serialize;

use crate::stats::{averages, log_curve};

const BAND: (f64, f64) = (15.0, 85.0);

/// Fixed per-category specialization weights. Unknown categories fall back
/// to 0.8.
const CATEGORY_WEIGHTS: &[(Category, f64)] = &[
    (Category::Tech, 1.1),
    (Category::Health, 1.1),
    (Category::Education, 1.05),
    (Category::Business, 1.05),
    (Category::Food, 0.95),
    (Category::Travel, 0.9),
    (Category::Fashion, 0.9),
    (Category::Daily, 0.7),
];

const DEFAULT_CATEGORY_WEIGHT: f64 = 0.8;

/// Named contributions to the expertise score. The sum of the components
/// equals the pre-clamp total.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ExpertiseBreakdown {
    /// `min(25, log10(post_count + 1) * 8)`.
    pub volume: f64,
    /// Category specialization: flat 5 for generic categories, otherwise
    /// 12 scaled by the fixed weight table.
    pub category: f64,
    /// Average character count and image count per post, banded; capped
    /// at 25. Zero when there are no posts.
    pub content_depth: f64,
    /// Posting-frequency consistency, capped at 15.
    pub activity: f64,
    /// `min(15, log10(subscriber_count + 1) * 3)`.
    pub audience: f64,
}

impl ExpertiseBreakdown {
    /// Sum of all components before clamping.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.volume + self.category + self.content_depth + self.activity + self.audience
    }

    /// Final score, clamped to the realistic band.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.total().clamp(BAND.0, BAND.1)
    }
}

/// Compute the expertise breakdown for a profile and its posts.
#[must_use]
pub fn expertise_breakdown(profile: &BlogProfile, posts: &[Post]) -> ExpertiseBreakdown {
    let volume = (log_curve(profile.post_count) * 8.0).min(25.0);

    let category = if profile.category.is_generic() {
        5.0
    } else {
        let weight = CATEGORY_WEIGHTS
            .iter()
            .find(|(c, _)| *c == profile.category)
            .map_or(DEFAULT_CATEGORY_WEIGHT, |(_, w)| *w);
        (12.0 * weight).round()
    };

    let content_depth = averages(posts).map_or(0.0, |avg| {
        let quality: f64 = if (800.0..=2000.0).contains(&avg.characters) {
            12.0
        } else if (500.0..800.0).contains(&avg.characters) {
            8.0
        } else if (300.0..500.0).contains(&avg.characters) {
            5.0
        } else if avg.characters > 2000.0 {
            10.0
        } else {
            2.0
        };

        let media: f64 = if (2.0..=8.0).contains(&avg.images) {
            8.0
        } else if (1.0..2.0).contains(&avg.images) {
            5.0
        } else if avg.images > 8.0 {
            6.0
        } else {
            1.0
        };

        (quality + media).min(25.0)
    });

    let activity = if profile.post_frequency > 0.0 {
        if (0.1..=1.0).contains(&profile.post_frequency) {
            12.0
        } else if profile.post_frequency > 1.0 {
            8.0
        } else {
            5.0
        }
    } else {
        0.0
    };

    let audience = if profile.subscriber_count > 0 {
        (log_curve(profile.subscriber_count) * 3.0).min(15.0)
    } else {
        0.0
    };

    let breakdown = ExpertiseBreakdown {
        volume,
        category,
        content_depth,
        activity,
        audience,
    };

    tracing::debug!(
        blog_id = %profile.blog_id,
        volume,
        category,
        content_depth,
        activity,
        audience,
        total = breakdown.total(),
        score = breakdown.score(),
        "expertise breakdown"
    );

    breakdown
}
