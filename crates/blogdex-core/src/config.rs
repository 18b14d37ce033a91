use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup
/// function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let trim_base = |raw: String| -> String { raw.trim_end_matches('/').to_string() };

    let env = parse_environment(&or_default("BLOGDEX_ENV", "development"));
    let bind_addr = parse_addr("BLOGDEX_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BLOGDEX_LOG_LEVEL", "info");

    let blog_base_url = trim_base(or_default("BLOGDEX_BLOG_BASE_URL", "https://blog.naver.com"));
    let feed_base_url = trim_base(or_default(
        "BLOGDEX_FEED_BASE_URL",
        "https://rss.blog.naver.com",
    ));
    let search_base_url = trim_base(or_default(
        "BLOGDEX_SEARCH_BASE_URL",
        "https://search.naver.com",
    ));

    let user_agent = or_default("BLOGDEX_USER_AGENT", "blogdex/0.1 (blog-quality-index)");
    let page_timeout_secs = parse_u64("BLOGDEX_PAGE_TIMEOUT_SECS", "30")?;
    let http_timeout_secs = parse_u64("BLOGDEX_HTTP_TIMEOUT_SECS", "10")?;
    let post_fetch_limit = parse_usize("BLOGDEX_POST_FETCH_LIMIT", "10")?;
    let ranking_delay_ms = parse_u64("BLOGDEX_RANKING_DELAY_MS", "1500")?;
    let ranking_cache_ttl_secs = parse_u64("BLOGDEX_RANKING_CACHE_TTL_SECS", "300")?;
    let ranking_keyword_limit = parse_usize("BLOGDEX_RANKING_KEYWORD_LIMIT", "3")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        blog_base_url,
        feed_base_url,
        search_base_url,
        user_agent,
        page_timeout_secs,
        http_timeout_secs,
        post_fetch_limit,
        ranking_delay_ms,
        ranking_cache_ttl_secs,
        ranking_keyword_limit,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
