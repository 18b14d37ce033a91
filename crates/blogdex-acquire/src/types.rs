use blogdex_core::{BlogProfile, Post};
use serde::Serialize;

/// Which strategy ultimately produced the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionSource {
    PageCrawl,
    DirectApi,
    Feed,
    Synthetic,
}

impl AcquisitionSource {
    /// Any non-synthetic source counts as high confidence.
    #[must_use]
    pub fn confidence(self) -> Confidence {
        match self {
            AcquisitionSource::Synthetic => Confidence::Simulated,
            _ => Confidence::High,
        }
    }
}

impl std::fmt::Display for AcquisitionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AcquisitionSource::PageCrawl => "page_crawl",
            AcquisitionSource::DirectApi => "direct_api",
            AcquisitionSource::Feed => "feed",
            AcquisitionSource::Synthetic => "synthetic",
        };
        write!(f, "{name}")
    }
}

/// Confidence tag carried on every acquisition result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Simulated,
}

/// What a single strategy yields on success: a profile and whatever posts
/// the strategy could see (possibly none).
#[derive(Debug, Clone)]
pub struct StrategyYield {
    pub profile: BlogProfile,
    pub posts: Vec<Post>,
}

/// Final output of the acquisition chain.
#[derive(Debug, Clone)]
pub struct AcquiredBlog {
    pub profile: BlogProfile,
    pub posts: Vec<Post>,
    pub source: AcquisitionSource,
    pub confidence: Confidence,
}
