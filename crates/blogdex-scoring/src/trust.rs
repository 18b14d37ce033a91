//! Trust score: longevity, engagement, and audience-quality signals.

use blogdex_core::{BlogProfile, Post};
use serde::Serialize;

use crate::stats::{averages, log_curve};

const BAND: (f64, f64) = (10.0, 80.0);

/// Minimum posting frequency that still counts as an active blog.
const CONSISTENCY_THRESHOLD: f64 = 0.05;

/// Posts-per-subscriber ratio above which a blog starts to look spammy.
const SPAM_RATIO_THRESHOLD: f64 = 10.0;

/// Named contributions to the trust score. The sum of the components
/// equals the pre-clamp total.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TrustBreakdown {
    /// Post-count longevity proxy plus a flat consistency bonus.
    pub longevity: f64,
    /// Average `(comments + likes) / views` engagement rate, banded;
    /// capped at 20.
    pub engagement: f64,
    /// Subscriber-based trust plus a flat bonus when the
    /// posts-per-subscriber ratio stays below the spam threshold.
    pub subscriber: f64,
    /// Content-length consistency plus an image-usage bonus, capped at 15.
    pub quality: f64,
}

impl TrustBreakdown {
    /// Sum of all components before clamping.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.longevity + self.engagement + self.subscriber + self.quality
    }

    /// Final score, clamped to the realistic band.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.total().clamp(BAND.0, BAND.1)
    }
}

/// Compute the trust breakdown for a profile and its posts.
#[must_use]
pub fn trust_breakdown(profile: &BlogProfile, posts: &[Post]) -> TrustBreakdown {
    let age = (log_curve(profile.post_count) * 6.0).min(20.0);
    let consistency = if profile.post_frequency > CONSISTENCY_THRESHOLD {
        5.0
    } else {
        0.0
    };
    let longevity = age + consistency;

    let engagement = averages(posts).map_or(0.0, |avg| {
        let rate = if avg.views > 0.0 {
            (avg.comments + avg.likes) / avg.views * 100.0
        } else {
            0.0
        };
        let banded: f64 = if rate > 5.0 {
            15.0
        } else if rate > 2.0 {
            12.0
        } else if rate > 1.0 {
            8.0
        } else if rate > 0.5 {
            5.0
        } else {
            2.0
        };
        banded.min(20.0)
    });

    let subscriber = if profile.subscriber_count > 0 {
        let base = (log_curve(profile.subscriber_count) * 3.5).min(15.0);
        #[allow(clippy::cast_precision_loss)]
        let posts_per_subscriber =
            profile.post_count as f64 / profile.subscriber_count.max(1) as f64;
        if posts_per_subscriber < SPAM_RATIO_THRESHOLD {
            base + 5.0
        } else {
            base
        }
    } else {
        0.0
    };

    let quality = averages(posts).map_or(0.0, |avg| {
        let mut score: f64 = if avg.characters > 500.0 {
            10.0
        } else if avg.characters > 200.0 {
            6.0
        } else {
            2.0
        };
        if avg.images > 1.0 {
            score += 5.0;
        }
        score.min(15.0)
    });

    let breakdown = TrustBreakdown {
        longevity,
        engagement,
        subscriber,
        quality,
    };

    tracing::debug!(
        blog_id = %profile.blog_id,
        longevity,
        engagement,
        subscriber,
        quality,
        total = breakdown.total(),
        score = breakdown.score(),
        "trust breakdown"
    );

    breakdown
}
