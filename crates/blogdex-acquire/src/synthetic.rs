//! Deterministic synthetic generation — the last rung of the ladder.
//!
//! Has no external dependency and therefore cannot fail. All values are
//! derived from the identifier's seed so that repeated calls with the same
//! identifier (and the same reference instant) are bit-identical.

use blogdex_core::{BlogProfile, Category, Post};
use chrono::{DateTime, Duration, Utc};

use crate::seed::{polynomial_seed, seeded_estimate};

/// Subscriber/post ranges observed on real blogs whose identifier matches a
/// known pattern. Checked before the generic identifier heuristics.
const KNOWN_PATTERNS: &[(&str, Category, (u64, u64), (u64, u64))] = &[
    ("macgii", Category::Tech, (3000, 8000), (200, 800)),
    ("soyoung-choi", Category::Fashion, (1000, 5000), (100, 500)),
    ("happylife", Category::Daily, (500, 3000), (50, 300)),
    ("cooking_mom", Category::Food, (2000, 6000), (150, 600)),
    ("travel_blog", Category::Travel, (4000, 10000), (200, 700)),
];

/// Ordered (category, identifier-substring) pairs for guessing a category
/// from an ASCII blog identifier.
const ID_CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (Category::Tech, &["tech", "dev", "code"]),
    (Category::Fashion, &["beauty", "fashion", "style"]),
    (Category::Food, &["food", "cook", "recipe"]),
    (Category::Travel, &["travel", "trip"]),
    (Category::Daily, &["life", "daily"]),
];

/// Fallback categories indexed by the identifier's character sum.
const FALLBACK_CATEGORIES: &[Category] = &[
    Category::Daily,
    Category::Food,
    Category::Travel,
    Category::Fashion,
    Category::Tech,
    Category::Health,
];

const COMMON_NICKNAMES: &[&str] = &[
    "블로거",
    "일상기록자",
    "취미생활",
    "소소한일상",
    "생활정보",
    "맛집탐방",
    "여행러버",
    "책읽는사람",
    "운동매니아",
    "요리연구가",
];

const TITLE_TEMPLATES: &[&str] = &[
    "오늘의 {주제} 이야기",
    "{계절} {활동} 후기",
    "{제품명} 솔직 리뷰",
    "{장소} 방문 기록",
    "{주제}에 대한 개인적인 생각",
    "최근에 {활동}한 경험",
    "{주제} 관련 유용한 팁",
    "일상 속 {주제} 발견",
    "{주제} 추천과 후기",
    "{계절}에 어울리는 {활동}",
];

const SUBJECTS: &[&str] = &[
    "요리", "독서", "영화", "음악", "운동", "여행", "카페", "맛집", "쇼핑", "취미",
];
const SEASONS: &[&str] = &["봄", "여름", "가을", "겨울"];
const ACTIVITIES: &[&str] = &["체험", "탐방", "도전", "경험", "시도"];
const PLACES: &[&str] = &["카페", "맛집", "공원", "전시회", "서점", "영화관"];

const CONTENT_SECTIONS: &[&str] = &[
    "먼저 개인적인 경험을 공유해드리자면, 이 주제에 대해 평소에 관심이 많았어요.",
    "여러 가지 정보를 찾아보고 직접 경험해본 결과를 솔직하게 말씀드릴게요.",
    "처음에는 잘 몰랐지만, 시간이 지나면서 많은 것을 배우게 되었습니다.",
    "같은 관심사를 가진 분들에게 도움이 되었으면 좋겠어요.",
    "앞으로도 이런 유용한 정보들을 계속 공유하도록 하겠습니다.",
    "궁금한 점이 있으시면 언제든지 댓글로 남겨주세요!",
    "다음에는 더 자세한 내용으로 찾아뵙겠습니다.",
    "읽어주셔서 감사하고, 좋은 하루 되세요!",
];

/// Sum of character code points — a second, coarser hash used for picking
/// among small fixed lists, matching the seeded-profile shape.
fn char_sum(input: &str) -> u64 {
    input.chars().map(|c| u64::from(u32::from(c))).sum()
}

/// Seed-indexed access into a fixed list.
#[allow(clippy::cast_possible_truncation)]
fn idx(seed: u64, len: usize) -> usize {
    (seed % len as u64) as usize
}

fn match_known_pattern(blog_id: &str) -> Option<&'static (&'static str, Category, (u64, u64), (u64, u64))> {
    let lowered = blog_id.to_lowercase();
    KNOWN_PATTERNS
        .iter()
        .find(|(key, ..)| lowered.contains(key) || key.contains(&lowered))
}

fn guess_category_from_id(blog_id: &str) -> Category {
    let lowered = blog_id.to_lowercase();
    for (category, keywords) in ID_CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return *category;
        }
    }
    #[allow(clippy::cast_possible_truncation)]
    let index = (char_sum(blog_id) % FALLBACK_CATEGORIES.len() as u64) as usize;
    FALLBACK_CATEGORIES[index]
}

fn nickname_for(blog_id: &str) -> String {
    if blog_id.chars().count() <= 10 && blog_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return blog_id.to_string();
    }
    #[allow(clippy::cast_possible_truncation)]
    let index = (char_sum(blog_id) % COMMON_NICKNAMES.len() as u64) as usize;
    COMMON_NICKNAMES[index].to_string()
}

/// Generate a plausible blog profile from the identifier alone.
#[must_use]
pub fn generate_profile(blog_id: &str) -> BlogProfile {
    let seed = u64::from(polynomial_seed(blog_id));

    let (category, subscriber_range, post_range) = match match_known_pattern(blog_id) {
        Some((_, category, subs, posts)) => (*category, *subs, *posts),
        None => (guess_category_from_id(blog_id), (100, 5000), (10, 500)),
    };

    let subscriber_count = seeded_estimate(seed, subscriber_range.0, subscriber_range.1);
    let post_count = seeded_estimate(seed, post_range.0, post_range.1);

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scrap_count = (subscriber_count as f64 * 0.3) as u64 + seed % 1000;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average_views = (subscriber_count as f64 * 1.5) as u64 + seed % 5000;

    #[allow(clippy::cast_precision_loss)]
    let post_frequency = ((post_count as f64 / 365.0) * 100.0).round() / 100.0;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let daily_visitor_count = (subscriber_count as f64 * 0.1) as u64 + seed % 500;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average_visitor_count = (subscriber_count as f64 * 0.5) as u64 + seed % 2000;

    BlogProfile {
        blog_id: blog_id.to_string(),
        nickname: nickname_for(blog_id),
        category,
        subscriber_count,
        post_count,
        scrap_count,
        average_views,
        post_frequency,
        total_visitor_count: Some(subscriber_count * 10 + seed % 50000),
        daily_visitor_count: Some(daily_visitor_count),
        average_visitor_count: Some(average_visitor_count),
    }
}

/// Generate `count` plausible posts for the identifier, dated backwards from
/// `now` at roughly weekly intervals.
///
/// `now` is injected so that repeated calls with the same identifier and
/// reference instant yield bit-identical posts.
#[must_use]
pub fn generate_posts(blog_id: &str, count: usize, now: DateTime<Utc>) -> Vec<Post> {
    let seed = u64::from(polynomial_seed(blog_id));
    let mut posts = Vec::with_capacity(count);

    for index in 0..count {
        let post_seed = seed + index as u64;

        let template = TITLE_TEMPLATES[idx(post_seed, TITLE_TEMPLATES.len())];
        let pick = |list: &[&'static str]| list[idx(post_seed, list.len())];
        let mut title = template.to_string();
        title = title.replacen("{주제}", pick(SUBJECTS), 1);
        title = title.replacen("{계절}", pick(SEASONS), 1);
        title = title.replacen("{활동}", pick(ACTIVITIES), 1);
        title = title.replacen("{제품명}", pick(SUBJECTS), 1);
        title = title.replacen("{장소}", pick(PLACES), 1);
        title.push_str(&format!(" #{}", index + 1));

        let days_back = index as u64 * 7 + post_seed % 7;
        let published_at = now - Duration::days(i64::try_from(days_back).unwrap_or(0));

        let character_count = 800 + post_seed % 2000;
        let image_count = 3 + post_seed % 10;
        let video_count = post_seed % 3;

        #[allow(clippy::cast_precision_loss)]
        let quality_factor =
            (character_count as f64 / 1000.0 + image_count as f64 / 10.0).min(2.0);
        let base_views = 500 + post_seed % 5000;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let view_count = (base_views as f64 * quality_factor) as u64;

        let body_text = build_content(&title, character_count, post_seed);

        posts.push(Post {
            title,
            body_text,
            published_at,
            image_count,
            video_count,
            character_count,
            comment_count: view_count / 100 + post_seed % 20,
            like_count: view_count / 50 + post_seed % 50,
            view_count,
            link: None,
        });
    }

    posts
}

/// Assemble body text of roughly `target_chars` characters from the fixed
/// section pool, deterministically indexed by the post seed.
fn build_content(title: &str, target_chars: u64, post_seed: u64) -> String {
    let target = usize::try_from(target_chars).unwrap_or(800);
    let mut content = format!("안녕하세요! 오늘은 {title}에 대해 이야기해보려고 합니다.\n\n");
    let mut char_len = content.chars().count();
    let mut iteration = 0u64;

    while char_len < target {
        let section = CONTENT_SECTIONS[idx(post_seed + iteration, CONTENT_SECTIONS.len())];
        content.push_str(section);
        content.push(' ');
        char_len += section.chars().count() + 1;

        if char_len < target * 4 / 5 {
            content.push_str("\n\n");
            char_len += 2;
        }
        iteration += 1;
    }

    content.chars().take(target).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn profile_is_bit_identical_across_calls() {
        let a = generate_profile("testblog123");
        let b = generate_profile("testblog123");
        assert_eq!(a, b);
    }

    #[test]
    fn posts_are_bit_identical_for_same_reference_instant() {
        let a = generate_posts("testblog123", 20, fixed_now());
        let b = generate_posts("testblog123", 20, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn profile_counts_are_in_generic_ranges() {
        let profile = generate_profile("zzz-unmatched-identifier-zzz");
        assert!((100..5000).contains(&profile.subscriber_count));
        assert!((10..500).contains(&profile.post_count));
        assert!(profile.post_frequency >= 0.0);
    }

    #[test]
    fn known_pattern_overrides_ranges() {
        let profile = generate_profile("macgii");
        assert_eq!(profile.category, Category::Tech);
        assert!((3000..8000).contains(&profile.subscriber_count));
        assert!((200..800).contains(&profile.post_count));
    }

    #[test]
    fn identifier_substring_guides_category() {
        assert_eq!(generate_profile("my-dev-notes").category, Category::Tech);
        // "cook" (Food) outranks "daily" (Daily) in the priority list.
        assert_eq!(generate_profile("daily-cook").category, Category::Food);
    }

    #[test]
    fn short_ascii_identifier_is_its_own_nickname() {
        assert_eq!(generate_profile("macgii").nickname, "macgii");
    }

    #[test]
    fn post_content_matches_declared_character_count() {
        let posts = generate_posts("testblog123", 5, fixed_now());
        for post in &posts {
            assert_eq!(
                post.body_text.chars().count() as u64,
                post.character_count,
                "body text length must match character_count"
            );
            assert!((800..2800).contains(&post.character_count));
            assert!((3..13).contains(&post.image_count));
            assert!(post.video_count < 3);
        }
    }

    #[test]
    fn posts_are_dated_most_recent_first() {
        let posts = generate_posts("testblog123", 10, fixed_now());
        for pair in posts.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }
}
