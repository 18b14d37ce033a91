//! Hangul keyword extraction from post titles and bodies.

use std::collections::HashMap;
use std::sync::LazyLock;

use blogdex_core::Post;
use regex::Regex;

static HANGUL_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[가-힣]{2,}").expect("hangul token pattern must compile"));

/// Minimum corpus frequency for a token to count as a repeated keyword.
const MIN_FREQUENCY: usize = 3;

/// Frequency of every Hangul token (length ≥ 2) across titles and bodies.
fn token_frequencies(posts: &[Post]) -> HashMap<String, usize> {
    let mut frequencies: HashMap<String, usize> = HashMap::new();
    for post in posts {
        let text = format!("{} {}", post.title, post.body_text);
        for token in HANGUL_TOKEN.find_iter(&text) {
            *frequencies.entry(token.as_str().to_string()).or_insert(0) += 1;
        }
    }
    frequencies
}

/// Tokens sorted by descending frequency (ties broken alphabetically so
/// results are stable), filtered to a length range and the minimum
/// frequency.
fn ranked_tokens(
    posts: &[Post],
    min_len: usize,
    max_len: usize,
) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = token_frequencies(posts)
        .into_iter()
        .filter(|(word, count)| {
            let len = word.chars().count();
            len >= min_len && len <= max_len && *count >= MIN_FREQUENCY
        })
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Top display/enrichment keywords: tokens of 2–6 characters appearing at
/// least three times, most frequent first.
#[must_use]
pub fn extract_keywords(posts: &[Post], max: usize) -> Vec<String> {
    ranked_tokens(posts, 2, 6)
        .into_iter()
        .take(max)
        .map(|(word, _)| word)
        .collect()
}

/// Number of repeated topical tokens (2–10 characters, frequency ≥ 3,
/// top 10) — the relevance score's keyword-consistency input.
#[must_use]
pub fn repeated_token_count(posts: &[Post]) -> usize {
    ranked_tokens(posts, 2, 10).len().min(10)
}

/// Count of all tokens appearing at least three times, regardless of
/// length — reported as the blog's valid keyword count.
#[must_use]
pub fn valid_keyword_count(posts: &[Post]) -> usize {
    token_frequencies(posts)
        .values()
        .filter(|count| **count >= MIN_FREQUENCY)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post(title: &str, body: &str) -> Post {
        Post {
            title: title.to_string(),
            body_text: body.to_string(),
            published_at: Utc::now(),
            image_count: 0,
            video_count: 0,
            character_count: body.chars().count() as u64,
            comment_count: 0,
            like_count: 0,
            view_count: 0,
            link: None,
        }
    }

    #[test]
    fn empty_posts_have_no_keywords() {
        assert!(extract_keywords(&[], 8).is_empty());
        assert_eq!(valid_keyword_count(&[]), 0);
        assert_eq!(repeated_token_count(&[]), 0);
    }

    #[test]
    fn tokens_below_frequency_threshold_are_dropped() {
        let posts = vec![post("맛집 탐방", "오늘도 맛집"), post("맛집 추천", "주말 나들이")];
        // "맛집" appears 3 times; everything else fewer.
        assert_eq!(extract_keywords(&posts, 8), vec!["맛집".to_string()]);
        assert_eq!(valid_keyword_count(&posts), 1);
    }

    #[test]
    fn keywords_sort_by_frequency_then_alphabetically() {
        let posts = vec![
            post("여행 여행 여행 맛집", "맛집 맛집 여행"),
            post("카페 카페 카페", ""),
        ];
        // 여행 x4, 맛집 x3, 카페 x3 — ties broken alphabetically (맛집 < 카페).
        assert_eq!(
            extract_keywords(&posts, 8),
            vec!["여행".to_string(), "맛집".to_string(), "카페".to_string()]
        );
    }

    #[test]
    fn non_hangul_text_is_ignored() {
        let posts = vec![post("rust rust rust", "tokio tokio tokio")];
        assert!(extract_keywords(&posts, 8).is_empty());
    }

    #[test]
    fn repeated_token_count_caps_at_ten() {
        // Twelve distinct tokens, each repeated three times.
        let words: Vec<String> = [
            "가나다", "나다라", "다라마", "라마바", "마바사", "바사아", "사아자", "아자차",
            "자차카", "차카타", "카타파", "타파하",
        ]
        .iter()
        .map(|w| format!("{w} {w} {w}"))
        .collect();
        let posts = vec![post("제목", &words.join(" "))];
        assert_eq!(repeated_token_count(&posts), 10);
    }
}
