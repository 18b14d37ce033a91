use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, loaded once at startup from the environment.
///
/// Every upstream base URL is configurable so tests can point the
/// acquisition chain and the ranking client at a local mock server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Blog page origin, e.g. `https://blog.naver.com`.
    pub blog_base_url: String,
    /// Syndication feed origin, e.g. `https://rss.blog.naver.com`.
    pub feed_base_url: String,
    /// Search origin used by the ranking enrichment.
    pub search_base_url: String,
    pub user_agent: String,
    /// Timeout for the rendered-page crawl strategy (the expensive one).
    pub page_timeout_secs: u64,
    /// Timeout for plain HTTP strategies (stat endpoints, feed, search).
    pub http_timeout_secs: u64,
    /// Maximum individual post pages fetched by the page-crawl strategy.
    pub post_fetch_limit: usize,
    /// Delay between per-keyword ranking lookups.
    pub ranking_delay_ms: u64,
    /// TTL for cached ranking lookups.
    pub ranking_cache_ttl_secs: u64,
    /// How many extracted keywords feed the ranking enrichment.
    pub ranking_keyword_limit: usize,
}
