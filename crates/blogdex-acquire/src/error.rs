use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("invalid blog identifier: {input:?}")]
    InvalidIdentifier { input: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("extraction failed for {context}: {reason}")]
    Extraction { context: String, reason: String },

    /// Every strategy including the synthetic fallback failed. The synthetic
    /// generator has no external dependency, so reaching this is an internal
    /// error rather than an upstream condition.
    #[error("all acquisition strategies failed for blog {blog_id}")]
    Exhausted { blog_id: String },
}
