//! Composition of the full scoring pipeline.

use blogdex_core::{BlogProfile, Post};
use serde::Serialize;

use crate::estimate::{estimate_rank, RankEstimate};
use crate::expertise::expertise_breakdown;
use crate::grade::{grade_for, progress_to_next, BlogGrade};
use crate::keywords::{extract_keywords, valid_keyword_count};
use crate::overall::overall_breakdown;
use crate::recommend::generate_recommendations;
use crate::relevance::relevance_breakdown;
use crate::trust::trust_breakdown;

/// Keywords surfaced on the report.
const DISPLAY_KEYWORD_LIMIT: usize = 8;

/// The three sub-scores, their combination, and the resulting grade.
/// `overall` is always a deterministic function of the other fields plus
/// the profile; `grade` is a deterministic function of `overall`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreSet {
    pub expertise: f64,
    pub trust: f64,
    pub relevance: f64,
    pub overall: f64,
    pub grade: BlogGrade,
}

/// Everything the scoring engine derives for one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub score_set: ScoreSet,
    pub progress_to_next: f64,
    pub valid_keyword_count: usize,
    pub rank_estimate: RankEstimate,
    pub keywords: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Run the full scoring pipeline over an acquired profile and post batch.
#[must_use]
pub fn analyze(profile: &BlogProfile, posts: &[Post]) -> AnalysisReport {
    let expertise = expertise_breakdown(profile, posts);
    let trust = trust_breakdown(profile, posts);
    let relevance = relevance_breakdown(posts);
    let overall = overall_breakdown(&expertise, &trust, &relevance, profile);

    let overall_score = overall.score();
    let score_set = ScoreSet {
        expertise: expertise.score(),
        trust: trust.score(),
        relevance: relevance.score(),
        overall: overall_score,
        grade: grade_for(overall_score),
    };

    AnalysisReport {
        score_set,
        progress_to_next: progress_to_next(overall_score),
        valid_keyword_count: valid_keyword_count(posts),
        rank_estimate: estimate_rank(profile),
        keywords: extract_keywords(posts, DISPLAY_KEYWORD_LIMIT),
        recommendations: generate_recommendations(
            score_set.expertise,
            score_set.trust,
            score_set.relevance,
            profile,
        ),
    }
}

#[cfg(test)]
#[path = "analyze_test.rs"]
mod tests;
