//! Per-corpus post statistics shared by the score functions.

use blogdex_core::Post;

/// Averages across a non-empty post batch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PostAverages {
    pub(crate) characters: f64,
    pub(crate) images: f64,
    pub(crate) comments: f64,
    pub(crate) likes: f64,
    pub(crate) views: f64,
}

/// Compute averages, or `None` for an empty batch so callers must handle
/// the no-posts case explicitly instead of dividing by zero.
pub(crate) fn averages(posts: &[Post]) -> Option<PostAverages> {
    if posts.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let len = posts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let sum = |f: fn(&Post) -> u64| posts.iter().map(f).sum::<u64>() as f64 / len;

    Some(PostAverages {
        characters: sum(|p| p.character_count),
        images: sum(|p| p.image_count),
        comments: sum(|p| p.comment_count),
        likes: sum(|p| p.like_count),
        views: sum(|p| p.view_count),
    })
}

pub(crate) fn is_hangul(c: char) -> bool {
    ('가'..='힣').contains(&c)
}

/// Fraction of Hangul characters in a string; 0 for the empty string.
pub(crate) fn hangul_ratio(text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        return 0.0;
    }
    let hangul = text.chars().filter(|c| is_hangul(*c)).count();
    #[allow(clippy::cast_precision_loss)]
    {
        hangul as f64 / total as f64
    }
}

/// `log10(value + 1)` — the diminishing-returns curve used by the volume
/// and audience components.
pub(crate) fn log_curve(value: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    (value as f64 + 1.0).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdex_core::Post;
    use chrono::Utc;

    fn post(chars: u64, images: u64) -> Post {
        Post {
            title: "제목".to_string(),
            body_text: String::new(),
            published_at: Utc::now(),
            image_count: images,
            video_count: 0,
            character_count: chars,
            comment_count: 4,
            like_count: 8,
            view_count: 100,
            link: None,
        }
    }

    #[test]
    fn averages_of_empty_batch_is_none() {
        assert!(averages(&[]).is_none());
    }

    #[test]
    fn averages_are_arithmetic_means() {
        let avg = averages(&[post(1200, 2), post(1800, 4)]).unwrap();
        assert!((avg.characters - 1500.0).abs() < f64::EPSILON);
        assert!((avg.images - 3.0).abs() < f64::EPSILON);
        assert!((avg.comments - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn hangul_ratio_counts_hangul_chars() {
        assert!((hangul_ratio("한글") - 1.0).abs() < f64::EPSILON);
        assert!((hangul_ratio("한글ab") - 0.5).abs() < f64::EPSILON);
        assert!(hangul_ratio("").abs() < f64::EPSILON);
        assert!(hangul_ratio("abcd").abs() < f64::EPSILON);
    }

    #[test]
    fn log_curve_is_monotone() {
        assert!(log_curve(0).abs() < f64::EPSILON);
        assert!(log_curve(9) < log_curve(99));
        assert!((log_curve(99) - 2.0).abs() < 1e-9);
    }
}
