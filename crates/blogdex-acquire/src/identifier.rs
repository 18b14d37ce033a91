//! Blog identifier extraction from raw user input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AcquireError;

/// Known URL shapes carrying a blog identifier, tried in order.
static URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"blog\.naver\.com/PostView\.naver\?.*?blogId=([A-Za-z0-9_-]+)",
        r"blog\.naver\.com/PostList\.naver\?.*?blogId=([A-Za-z0-9_-]+)",
        r"blog\.naver\.com/([A-Za-z0-9_-]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("identifier pattern must compile"))
    .collect()
});

/// Bare identifier shape: alphanumeric plus underscore and hyphen.
static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("bare id pattern must compile"));

/// Extract the stable blog identifier from a URL or bare-identifier string.
///
/// # Errors
///
/// Returns [`AcquireError::InvalidIdentifier`] when the input matches
/// neither a known URL shape nor the bare identifier pattern. This is the
/// only acquisition error surfaced to callers as a validation failure.
pub fn extract_blog_id(input: &str) -> Result<String, AcquireError> {
    let trimmed = input.trim();

    for pattern in URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(trimmed) {
            if let Some(id) = captures.get(1) {
                return Ok(id.as_str().to_string());
            }
        }
    }

    if !trimmed.is_empty() && BARE_ID.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(AcquireError::InvalidIdentifier {
        input: input.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_plain_blog_url() {
        assert_eq!(
            extract_blog_id("https://blog.naver.com/testblog123").unwrap(),
            "testblog123"
        );
    }

    #[test]
    fn extracts_from_post_view_url() {
        assert_eq!(
            extract_blog_id("https://blog.naver.com/PostView.naver?blogId=cook_mom&logNo=12345")
                .unwrap(),
            "cook_mom"
        );
    }

    #[test]
    fn extracts_from_post_list_url() {
        assert_eq!(
            extract_blog_id("https://blog.naver.com/PostList.naver?blogId=travel-log").unwrap(),
            "travel-log"
        );
    }

    #[test]
    fn accepts_bare_identifier() {
        assert_eq!(extract_blog_id("testblog123").unwrap(), "testblog123");
        assert_eq!(extract_blog_id("  spaced_id  ").unwrap(), "spaced_id");
    }

    #[test]
    fn rejects_invalid_input() {
        for input in ["", "한국어아이디", "id with spaces", "https://example.com/foo"] {
            let err = extract_blog_id(input).unwrap_err();
            assert!(
                matches!(err, AcquireError::InvalidIdentifier { .. }),
                "expected InvalidIdentifier for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn url_with_trailing_path_takes_first_segment() {
        assert_eq!(
            extract_blog_id("https://blog.naver.com/testblog123/223000000001").unwrap(),
            "testblog123"
        );
    }
}
