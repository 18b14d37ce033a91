//! Heuristic quality-index scoring for blog profiles.
//!
//! Pure, synchronous, and deterministic: the same profile and post batch
//! always produce the same scores. Each score is an additive composite of
//! named components, independently clamped to a realistic band that stops
//! short of a perfect value on purpose — no analyzed blog should appear
//! flawless. Component breakdowns are exposed (and logged) so a score can
//! always be decomposed into its contributions.

mod analyze;
mod estimate;
mod expertise;
mod grade;
mod keywords;
mod overall;
mod recommend;
mod relevance;
mod stats;
mod trust;

pub use analyze::{analyze, AnalysisReport, ScoreSet};
pub use estimate::{estimate_rank, RankEstimate};
pub use expertise::{expertise_breakdown, ExpertiseBreakdown};
pub use grade::{grade_for, progress_to_next, BlogGrade};
pub use keywords::{extract_keywords, repeated_token_count, valid_keyword_count};
pub use overall::{overall_breakdown, OverallBreakdown};
pub use recommend::generate_recommendations;
pub use relevance::{relevance_breakdown, RelevanceBreakdown};
pub use trust::{trust_breakdown, TrustBreakdown};
