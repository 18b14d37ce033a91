use serde::Serialize;

/// Fixed blog category taxonomy.
///
/// Labels match the platform's own category names. Unknown labels map to
/// [`Category::Uncategorized`] ("주제 없음") rather than failing, since
/// scraped category strings are best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    #[serde(rename = "일상·생각")]
    Daily,
    #[serde(rename = "맛집")]
    Food,
    #[serde(rename = "여행")]
    Travel,
    #[serde(rename = "패션·미용")]
    Fashion,
    #[serde(rename = "스타·연예인")]
    Celebrity,
    #[serde(rename = "취미·게임")]
    Hobby,
    #[serde(rename = "인테리어·DIY")]
    Interior,
    #[serde(rename = "비즈니스·경제")]
    Business,
    #[serde(rename = "IT·컴퓨터")]
    Tech,
    #[serde(rename = "건강·의학")]
    Health,
    #[serde(rename = "교육·학문")]
    Education,
    #[serde(rename = "문화·예술")]
    Culture,
    #[serde(rename = "주제 없음")]
    Uncategorized,
}

/// All categories, in the platform's display order.
pub const ALL_CATEGORIES: &[Category] = &[
    Category::Daily,
    Category::Food,
    Category::Travel,
    Category::Fashion,
    Category::Celebrity,
    Category::Hobby,
    Category::Interior,
    Category::Business,
    Category::Tech,
    Category::Health,
    Category::Education,
    Category::Culture,
    Category::Uncategorized,
];

/// Ordered (category, keyword-set) pairs for guessing a category from free
/// text. Evaluated top to bottom; the first pair with any keyword hit wins.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Tech,
        &[
            "개발",
            "programming",
            "code",
            "tech",
            "기술",
            "컴퓨터",
            "프로그래밍",
            "코딩",
        ],
    ),
    (
        Category::Food,
        &["음식", "맛집", "레시피", "요리", "food", "recipe", "카페"],
    ),
    (
        Category::Travel,
        &["여행", "관광", "travel", "휴가", "여행기", "해외"],
    ),
    (
        Category::Fashion,
        &["패션", "뷰티", "화장품", "스타일", "fashion", "beauty", "미용"],
    ),
    (
        Category::Health,
        &["건강", "운동", "의학", "병원", "health", "다이어트", "헬스"],
    ),
    (
        Category::Education,
        &["교육", "학습", "공부", "학문"],
    ),
    (
        Category::Hobby,
        &["게임", "취미", "만화"],
    ),
    (
        Category::Daily,
        &["일상", "생각", "일기", "에세이"],
    ),
];

impl Category {
    /// Parse a scraped category label. Unknown labels become
    /// [`Category::Uncategorized`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "일상·생각" => Category::Daily,
            "맛집" => Category::Food,
            "여행" => Category::Travel,
            "패션·미용" => Category::Fashion,
            "스타·연예인" => Category::Celebrity,
            "취미·게임" => Category::Hobby,
            "인테리어·DIY" => Category::Interior,
            "비즈니스·경제" => Category::Business,
            "IT·컴퓨터" => Category::Tech,
            "건강·의학" => Category::Health,
            "교육·학문" => Category::Education,
            "문화·예술" => Category::Culture,
            _ => Category::Uncategorized,
        }
    }

    /// Guess a category from free text (page titles, descriptions, feed
    /// item titles) by walking the fixed keyword-pair list in priority
    /// order. Pure function of its input; returns
    /// [`Category::Uncategorized`] when nothing matches.
    #[must_use]
    pub fn guess_from_text(text: &str) -> Self {
        let haystack = text.to_lowercase();
        for (category, keywords) in CATEGORY_KEYWORDS {
            if keywords.iter().any(|kw| haystack.contains(kw)) {
                return *category;
            }
        }
        Category::Uncategorized
    }

    /// True for labels that carry no topical specialization.
    #[must_use]
    pub fn is_generic(self) -> bool {
        matches!(self, Category::Uncategorized | Category::Daily)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Category::Daily => "일상·생각",
            Category::Food => "맛집",
            Category::Travel => "여행",
            Category::Fashion => "패션·미용",
            Category::Celebrity => "스타·연예인",
            Category::Hobby => "취미·게임",
            Category::Interior => "인테리어·DIY",
            Category::Business => "비즈니스·경제",
            Category::Tech => "IT·컴퓨터",
            Category::Health => "건강·의학",
            Category::Education => "교육·학문",
            Category::Culture => "문화·예술",
            Category::Uncategorized => "주제 없음",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_round_trips_every_category() {
        for &category in ALL_CATEGORIES {
            assert_eq!(Category::from_label(&category.to_string()), category);
        }
    }

    #[test]
    fn from_label_unknown_is_uncategorized() {
        assert_eq!(Category::from_label("완전히 새로운 주제"), Category::Uncategorized);
        assert_eq!(Category::from_label(""), Category::Uncategorized);
    }

    #[test]
    fn guess_prefers_earlier_pairs() {
        // "개발" (Tech) appears before "여행" (Travel) in the priority list,
        // so mixed text resolves to Tech.
        assert_eq!(
            Category::guess_from_text("개발자의 여행 이야기"),
            Category::Tech
        );
    }

    #[test]
    fn guess_is_case_insensitive_for_ascii_keywords() {
        assert_eq!(Category::guess_from_text("My TECH Blog"), Category::Tech);
    }

    #[test]
    fn guess_unmatched_text_is_uncategorized() {
        assert_eq!(Category::guess_from_text("xyzzy"), Category::Uncategorized);
    }

    #[test]
    fn generic_categories() {
        assert!(Category::Uncategorized.is_generic());
        assert!(Category::Daily.is_generic());
        assert!(!Category::Tech.is_generic());
    }
}
