//! Threshold-driven improvement advice.

use blogdex_core::BlogProfile;

const NEEDS_WORK: f64 = 60.0;
const LOW_FREQUENCY: f64 = 0.5;

/// Generate improvement suggestions from the sub-scores and posting
/// cadence.
#[must_use]
pub fn generate_recommendations(
    expertise: f64,
    trust: f64,
    relevance: f64,
    profile: &BlogProfile,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if expertise < NEEDS_WORK {
        recommendations
            .push("블로그 주제를 명확히 하고 전문성을 높이는 콘텐츠를 작성하세요".to_string());
        recommendations.push("포스팅 길이를 늘리고 더 상세한 정보를 제공하세요".to_string());
    }

    if trust < NEEDS_WORK {
        recommendations
            .push("독자와의 상호작용을 늘리기 위해 댓글에 적극적으로 응답하세요".to_string());
        recommendations.push("꾸준한 포스팅으로 블로그 활동량을 증가시키세요".to_string());
    }

    if relevance < NEEDS_WORK {
        recommendations
            .push("제목에 핵심 키워드를 포함하여 검색 최적화를 개선하세요".to_string());
        recommendations.push("이미지와 텍스트의 균형을 맞춰 콘텐츠 구조를 개선하세요".to_string());
    }

    if profile.post_frequency < LOW_FREQUENCY {
        recommendations.push("포스팅 주기를 더 일정하게 유지하세요".to_string());
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdex_core::Category;

    fn profile(frequency: f64) -> BlogProfile {
        BlogProfile {
            blog_id: "unit".to_string(),
            nickname: "unit".to_string(),
            category: Category::Tech,
            subscriber_count: 100,
            post_count: 50,
            scrap_count: 0,
            average_views: 0,
            post_frequency: frequency,
            total_visitor_count: None,
            daily_visitor_count: None,
            average_visitor_count: None,
        }
    }

    #[test]
    fn strong_scores_and_cadence_need_nothing() {
        let recs = generate_recommendations(70.0, 70.0, 70.0, &profile(0.8));
        assert!(recs.is_empty());
    }

    #[test]
    fn each_weak_dimension_adds_advice() {
        let recs = generate_recommendations(50.0, 70.0, 70.0, &profile(0.8));
        assert_eq!(recs.len(), 2);
        assert!(recs[0].contains("전문성"));
    }

    #[test]
    fn sparse_posting_adds_cadence_advice() {
        let recs = generate_recommendations(70.0, 70.0, 70.0, &profile(0.1));
        assert_eq!(recs.len(), 1);
        assert!(recs[0].contains("포스팅 주기"));
    }

    #[test]
    fn everything_weak_yields_full_list() {
        let recs = generate_recommendations(40.0, 40.0, 40.0, &profile(0.1));
        assert_eq!(recs.len(), 7);
    }
}
