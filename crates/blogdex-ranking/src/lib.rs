//! Best-effort search-rank enrichment.
//!
//! Given a blog identifier and a handful of extracted keywords, looks up
//! the external search surface for each keyword, identifies which results
//! belong to the target blog, and aggregates per-keyword rank statistics.
//! Lookups are cached with a TTL, rate-limited with a fixed inter-call
//! delay, and individually fallible: a failed keyword becomes an error
//! entry in the report, never an aborted batch. The enrichment as a whole
//! never blocks the scoring pipeline.

mod cache;
mod client;
mod error;
mod report;

pub use cache::RankingCache;
pub use client::{SearchHit, SearchRankClient};
pub use error::RankingError;
pub use report::{
    KeywordRanking, RankDistribution, RankedPost, RankingEnricher, RankingReport, RankingSummary,
};
