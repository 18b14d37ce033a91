//! Data acquisition for blog analysis.
//!
//! Produces one `(BlogProfile, Vec<Post>)` pair for a blog identifier by
//! walking a ladder of strategies — rendered-page crawl, direct stat
//! endpoints, syndication feed, seeded synthesis — until one yields a
//! profile. Only identifier extraction can fail hard; every upstream
//! failure is absorbed and the ladder advances, so downstream scoring never
//! observes a missing profile for a valid-looking identifier.

mod chain;
mod endpoints;
mod error;
mod feed;
mod http;
mod identifier;
mod page;
mod seed;
mod synthetic;
mod types;

pub use chain::AcquisitionChain;
pub use endpoints::DirectApiStrategy;
pub use error::AcquireError;
pub use feed::FeedStrategy;
pub use identifier::extract_blog_id;
pub use page::PageCrawlStrategy;
pub use seed::{polynomial_seed, seeded_estimate};
pub use synthetic::{generate_posts, generate_profile};
pub use types::{AcquiredBlog, AcquisitionSource, Confidence, StrategyYield};
