//! Weighted overall score with mild self-correcting adjustments.

use blogdex_core::BlogProfile;
use serde::Serialize;

use crate::expertise::ExpertiseBreakdown;
use crate::relevance::RelevanceBreakdown;
use crate::trust::TrustBreakdown;

const BAND: (f64, f64) = (20.0, 85.0);

/// How the overall score was assembled. The weight nudges are independent
/// and additive; the weights are deliberately not re-normalized.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OverallBreakdown {
    pub expertise_weight: f64,
    pub trust_weight: f64,
    pub relevance_weight: f64,
    pub weighted_sum: f64,
    /// Reward when every sub-score clears 50.
    pub balance_bonus: f64,
    /// Penalty when the sub-scores spread more than 40 points.
    pub variance_penalty: f64,
}

impl OverallBreakdown {
    /// Final score: adjusted weighted sum, clamped and rounded to a whole
    /// number.
    #[must_use]
    pub fn score(&self) -> f64 {
        (self.weighted_sum + self.balance_bonus - self.variance_penalty)
            .clamp(BAND.0, BAND.1)
            .round()
    }
}

/// Combine the three sub-scores for a profile.
#[must_use]
pub fn overall_breakdown(
    expertise: &ExpertiseBreakdown,
    trust: &TrustBreakdown,
    relevance: &RelevanceBreakdown,
    profile: &BlogProfile,
) -> OverallBreakdown {
    let expertise_score = expertise.score();
    let trust_score = trust.score();
    let relevance_score = relevance.score();

    let mut expertise_weight = 0.35;
    let mut trust_weight = 0.35;
    let mut relevance_weight = 0.30;

    if profile.subscriber_count > 500 {
        trust_weight += 0.03;
        expertise_weight -= 0.015;
        relevance_weight -= 0.015;
    }
    if profile.post_count > 50 {
        expertise_weight += 0.03;
        trust_weight -= 0.015;
        relevance_weight -= 0.015;
    }

    let weighted_sum = expertise_score * expertise_weight
        + trust_score * trust_weight
        + relevance_score * relevance_weight;

    let min_score = expertise_score.min(trust_score).min(relevance_score);
    let max_score = expertise_score.max(trust_score).max(relevance_score);

    let balance_bonus = if min_score > 50.0 {
        ((min_score - 50.0) * 0.2).min(3.0)
    } else {
        0.0
    };

    let spread = max_score - min_score;
    let variance_penalty = if spread > 40.0 {
        ((spread - 40.0) * 0.05).min(2.0)
    } else {
        0.0
    };

    let breakdown = OverallBreakdown {
        expertise_weight,
        trust_weight,
        relevance_weight,
        weighted_sum,
        balance_bonus,
        variance_penalty,
    };

    tracing::debug!(
        blog_id = %profile.blog_id,
        expertise = expertise_score,
        trust = trust_score,
        relevance = relevance_score,
        weighted_sum,
        balance_bonus,
        variance_penalty,
        score = breakdown.score(),
        "overall breakdown"
    );

    breakdown
}
