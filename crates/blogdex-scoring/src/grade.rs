//! Tier grading over the overall score.

use serde::Serialize;

/// Ordered grade tiers. `Unrated` ("없음") through the sub-optimal "준최"
/// tiers up to the optimal "최적" tiers. Ordering follows score order, so
/// the derived `Ord` matches grade quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum BlogGrade {
    #[serde(rename = "없음")]
    Unrated,
    #[serde(rename = "준최 4")]
    Sub4,
    #[serde(rename = "준최 3")]
    Sub3,
    #[serde(rename = "준최 2")]
    Sub2,
    #[serde(rename = "준최 1")]
    Sub1,
    #[serde(rename = "최적 4")]
    Opt4,
    #[serde(rename = "최적 3")]
    Opt3,
    #[serde(rename = "최적 2")]
    Opt2,
    #[serde(rename = "최적 1")]
    Opt1,
}

impl BlogGrade {
    /// Score band `[low, high)` owned by this grade. The top grade's band
    /// closes at 100.
    #[must_use]
    pub fn band(self) -> (f64, f64) {
        match self {
            BlogGrade::Unrated => (0.0, 20.0),
            BlogGrade::Sub4 => (20.0, 35.0),
            BlogGrade::Sub3 => (35.0, 45.0),
            BlogGrade::Sub2 => (45.0, 55.0),
            BlogGrade::Sub1 => (55.0, 65.0),
            BlogGrade::Opt4 => (65.0, 72.0),
            BlogGrade::Opt3 => (72.0, 78.0),
            BlogGrade::Opt2 => (78.0, 85.0),
            BlogGrade::Opt1 => (85.0, 100.0),
        }
    }
}

impl std::fmt::Display for BlogGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BlogGrade::Unrated => "없음",
            BlogGrade::Sub4 => "준최 4",
            BlogGrade::Sub3 => "준최 3",
            BlogGrade::Sub2 => "준최 2",
            BlogGrade::Sub1 => "준최 1",
            BlogGrade::Opt4 => "최적 4",
            BlogGrade::Opt3 => "최적 3",
            BlogGrade::Opt2 => "최적 2",
            BlogGrade::Opt1 => "최적 1",
        };
        write!(f, "{label}")
    }
}

/// Map an overall score to its grade via the fixed ascending breakpoints.
#[must_use]
pub fn grade_for(overall_score: f64) -> BlogGrade {
    if overall_score < 20.0 {
        BlogGrade::Unrated
    } else if overall_score < 35.0 {
        BlogGrade::Sub4
    } else if overall_score < 45.0 {
        BlogGrade::Sub3
    } else if overall_score < 55.0 {
        BlogGrade::Sub2
    } else if overall_score < 65.0 {
        BlogGrade::Sub1
    } else if overall_score < 72.0 {
        BlogGrade::Opt4
    } else if overall_score < 78.0 {
        BlogGrade::Opt3
    } else if overall_score < 85.0 {
        BlogGrade::Opt2
    } else {
        BlogGrade::Opt1
    }
}

/// Percentage position of the score within its own grade band. Display
/// only; nothing downstream computes on it.
#[must_use]
pub fn progress_to_next(overall_score: f64) -> f64 {
    let (low, high) = grade_for(overall_score).band();
    (((overall_score - low) / (high - low)) * 100.0).clamp(0.0, 100.0)
}
