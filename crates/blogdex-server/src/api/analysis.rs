//! The blog analysis endpoint.
//!
//! Orchestrates the full pipeline for one request: usage gate → acquisition
//! chain → scoring → best-effort ranking enrichment → detailed report
//! assembly. Only identifier validation and unexpected internal failures
//! surface as errors; everything else degrades gracefully inside the
//! pipeline.

use axum::{extract::State, Extension, Json};
use blogdex_core::{BlogProfile, Category, Plan, Post};
use blogdex_ranking::{KeywordRanking, RankingReport};
use blogdex_scoring::{analyze, extract_keywords, AnalysisReport};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// Posts shown in the detailed report.
const RECENT_POST_LIMIT: usize = 10;

/// Fixed category averages the three sub-scores are compared against.
const EXPERTISE_CATEGORY_AVERAGE: f64 = 88.24;
const TRUST_CATEGORY_AVERAGE: f64 = 79.94;
const RELEVANCE_CATEGORY_AVERAGE: f64 = 75.0;

/// Per-category content-pattern averages: (characters, images, title length).
const CONTENT_PATTERN_AVERAGES: &[(Category, (f64, f64, f64))] = &[
    (Category::Celebrity, (1365.0, 11.0, 30.0)),
    (Category::Food, (1500.0, 15.0, 28.0)),
    (Category::Travel, (1800.0, 20.0, 32.0)),
    (Category::Fashion, (1200.0, 12.0, 26.0)),
    (Category::Tech, (2000.0, 8.0, 35.0)),
    (Category::Daily, (1000.0, 6.0, 25.0)),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AnalyzeRequest {
    #[serde(default)]
    blog_url: Option<String>,
    #[serde(default)]
    user_plan: Plan,
    #[serde(default)]
    today_usage: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct AnalyzeResponse {
    success: bool,
    result: DetailedResult,
    usage: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailedResult {
    blog_info: BlogInfo,
    blog_index: BlogIndex,
    blog_score: BlogScore,
    metrics: Metrics,
    score_comparison: ScoreComparison,
    content_pattern: Option<ContentPattern>,
    keywords: Vec<String>,
    keyword_rankings: Vec<KeywordRanking>,
    recent_posts: Vec<DetailedPost>,
    recommendations: Vec<String>,
    performance_metrics: PerformanceMetrics,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogInfo {
    blog_id: String,
    nickname: String,
    title: String,
    url: String,
    category: String,
    subscriber_count: u64,
    post_count: u64,
    average_views: u64,
    scrap_count: u64,
    neighbor_count: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogIndex {
    grade: String,
    base_score: f64,
    progress_to_next: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogScore {
    overall: f64,
    expertise: f64,
    trust: f64,
    relevance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metrics {
    valid_keyword_count: usize,
    total_rank: u64,
    category_rank: u64,
    post_frequency: f64,
    /// Simulated display decoration, not part of the scoring contract.
    rank_change: i32,
    /// Simulated display decoration, not part of the scoring contract.
    weekly_trend: u32,
    best_rank: u64,
    actual_rankings: Option<ActualRankings>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActualRankings {
    total_keywords: usize,
    ranked_keywords: usize,
    average_rank: Option<u32>,
    top_ranked_posts: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreComparison {
    expertise: ComparisonEntry,
    trust: ComparisonEntry,
    relevance: ComparisonEntry,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonEntry {
    my_score: f64,
    category_average: f64,
    difference: f64,
    evaluation: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentPattern {
    character_count: PatternEntry,
    title_length: PatternEntry,
    image_count: PatternEntry,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PatternEntry {
    my_average: f64,
    category_average: f64,
    difference: f64,
    evaluation: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailedPost {
    title: String,
    publish_date: String,
    publish_time: String,
    exposure_status: &'static str,
    grade: &'static str,
    image_count: u64,
    video_count: u64,
    character_count: u64,
    comment_count: u64,
    like_count: u64,
    view_count: u64,
    scores: PostScores,
    link: Option<String>,
}

#[derive(Debug, Serialize)]
struct PostScores {
    expertise: f64,
    trust: f64,
    relevance: f64,
    overall: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PerformanceMetrics {
    daily_visitors: u64,
    average_visitors: u64,
    total_visitors: u64,
}

pub(super) async fn analyze_blog(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let blog_url = match request.blog_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => {
            return Err(ApiError::new(
                req_id.0,
                "validation_error",
                "블로그 URL 또는 ID를 입력해주세요.",
            ))
        }
    };

    // Usage gating is an external policy check; it runs before any
    // acquisition work starts.
    let check = request.user_plan.check_usage(request.today_usage);
    if !check.allowed {
        return Err(ApiError::new(
            req_id.0,
            "usage_limited",
            "일일 분석 한도를 초과했습니다. 플랜을 업그레이드하거나 내일 다시 시도해주세요.",
        ));
    }

    let now = Utc::now();
    let acquired = state.chain.acquire(&blog_url, now).await.map_err(|e| {
        if matches!(e, blogdex_acquire::AcquireError::InvalidIdentifier { .. }) {
            ApiError::new(
                req_id.0.clone(),
                "validation_error",
                "올바른 블로그 ID 또는 URL을 입력해주세요.",
            )
        } else {
            tracing::error!(error = %e, "blog acquisition failed unexpectedly");
            ApiError::new(
                req_id.0.clone(),
                "internal_error",
                "블로그 분석 중 오류가 발생했습니다.",
            )
        }
    })?;

    tracing::info!(
        blog_id = %acquired.profile.blog_id,
        source = %acquired.source,
        confidence = ?acquired.confidence,
        posts = acquired.posts.len(),
        "analysis acquisition complete"
    );

    let report = analyze(&acquired.profile, &acquired.posts);

    // Best-effort enrichment over the top extracted keywords; a failed or
    // empty enrichment never fails the analysis.
    let enrichment_keywords =
        extract_keywords(&acquired.posts, state.config.ranking_keyword_limit);
    let ranking_report = if enrichment_keywords.is_empty() {
        None
    } else {
        Some(
            state
                .enricher
                .generate_report(&acquired.profile.blog_id, &enrichment_keywords)
                .await,
        )
    };

    let result = build_detailed_result(
        &blog_url,
        &acquired.profile,
        &acquired.posts,
        &report,
        ranking_report,
        now,
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        result,
        usage: request.today_usage + 1,
    }))
}

fn build_detailed_result(
    blog_url: &str,
    profile: &BlogProfile,
    posts: &[Post],
    report: &AnalysisReport,
    ranking_report: Option<RankingReport>,
    now: DateTime<Utc>,
) -> DetailedResult {
    let mut rng = rand::rng();
    let scores = report.score_set;

    let ranking_details: Vec<KeywordRanking> = ranking_report
        .as_ref()
        .map(|r| r.details.clone())
        .unwrap_or_default();

    let actual_rankings = ranking_report.as_ref().map(|r| ActualRankings {
        total_keywords: r.summary.total_keywords,
        ranked_keywords: r.summary.ranked_keywords,
        average_rank: r.summary.average_rank,
        top_ranked_posts: r.summary.total_ranked_posts,
    });

    // Fall back to a nearby simulated best rank when no real lookup
    // produced one.
    let best_rank = ranking_report
        .as_ref()
        .and_then(|r| r.summary.best_rank)
        .map_or_else(
            || {
                report
                    .rank_estimate
                    .total_rank
                    .saturating_sub(rng.random_range(0..500))
                    .max(1)
            },
            u64::from,
        );

    DetailedResult {
        blog_info: BlogInfo {
            blog_id: profile.blog_id.clone(),
            nickname: profile.nickname.clone(),
            title: format!("{}의 블로그", profile.nickname),
            url: blog_url.to_string(),
            category: profile.category.to_string(),
            subscriber_count: profile.subscriber_count,
            post_count: profile.post_count,
            average_views: profile.average_views,
            scrap_count: profile.scrap_count,
            neighbor_count: profile.subscriber_count,
        },
        blog_index: BlogIndex {
            grade: scores.grade.to_string(),
            base_score: scores.overall,
            progress_to_next: round2(report.progress_to_next),
        },
        blog_score: BlogScore {
            overall: scores.overall,
            expertise: round2(scores.expertise),
            trust: round2(scores.trust),
            relevance: round2(scores.relevance),
        },
        metrics: Metrics {
            valid_keyword_count: report.valid_keyword_count,
            total_rank: report.rank_estimate.total_rank,
            category_rank: report.rank_estimate.category_rank,
            post_frequency: round2(profile.post_frequency),
            rank_change: rng.random_range(-50..50),
            weekly_trend: rng.random_range(0..10),
            best_rank,
            actual_rankings,
        },
        score_comparison: ScoreComparison {
            expertise: comparison_entry(scores.expertise, EXPERTISE_CATEGORY_AVERAGE, 85.0),
            trust: comparison_entry(scores.trust, TRUST_CATEGORY_AVERAGE, 75.0),
            relevance: comparison_entry(scores.relevance, RELEVANCE_CATEGORY_AVERAGE, 70.0),
        },
        content_pattern: content_pattern(posts, profile.category),
        keywords: report.keywords.clone(),
        keyword_rankings: ranking_details,
        recent_posts: posts
            .iter()
            .take(RECENT_POST_LIMIT)
            .map(|post| detailed_post(post, now, &mut rng))
            .collect(),
        recommendations: report.recommendations.clone(),
        performance_metrics: PerformanceMetrics {
            daily_visitors: profile.daily_visitor_count.unwrap_or(0),
            average_visitors: profile.average_visitor_count.unwrap_or(0),
            total_visitors: profile.total_visitor_count.unwrap_or(0),
        },
    }
}

fn comparison_entry(my_score: f64, category_average: f64, par: f64) -> ComparisonEntry {
    let evaluation = if my_score > category_average {
        "평균 이상"
    } else if my_score > par {
        "평균"
    } else {
        "평균 이하"
    };
    ComparisonEntry {
        my_score: round2(my_score),
        category_average,
        difference: round2(my_score - category_average),
        evaluation,
    }
}

fn content_pattern(posts: &[Post], category: Category) -> Option<ContentPattern> {
    if posts.is_empty() {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let count = posts.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    let avg_characters = posts.iter().map(|p| p.character_count).sum::<u64>() as f64 / count;
    #[allow(clippy::cast_precision_loss)]
    let avg_images = posts.iter().map(|p| p.image_count).sum::<u64>() as f64 / count;
    #[allow(clippy::cast_precision_loss)]
    let avg_title_length = posts
        .iter()
        .map(|p| p.title.chars().count() as u64)
        .sum::<u64>() as f64
        / count;

    let (chars_avg, images_avg, title_avg) = CONTENT_PATTERN_AVERAGES
        .iter()
        .find(|(c, _)| *c == category)
        .map_or((1000.0, 6.0, 25.0), |(_, v)| *v);

    let scale_eval = |mine: f64, average: f64| -> &'static str {
        if mine > average {
            "평균 이상"
        } else if mine > average * 0.8 {
            "평균"
        } else {
            "평균 이하"
        }
    };

    let title_eval = if avg_title_length > title_avg * 0.9 && avg_title_length < title_avg * 1.2 {
        "평균"
    } else if avg_title_length >= title_avg * 1.2 {
        "평균 이상"
    } else {
        "평균 이하"
    };

    Some(ContentPattern {
        character_count: PatternEntry {
            my_average: avg_characters.round(),
            category_average: chars_avg,
            difference: (avg_characters - chars_avg).round(),
            evaluation: scale_eval(avg_characters, chars_avg),
        },
        title_length: PatternEntry {
            my_average: avg_title_length.round(),
            category_average: title_avg,
            difference: (avg_title_length - title_avg).round(),
            evaluation: title_eval,
        },
        image_count: PatternEntry {
            my_average: round1(avg_images),
            category_average: images_avg,
            difference: round1(avg_images - images_avg),
            evaluation: scale_eval(avg_images, images_avg),
        },
    })
}

/// Per-post display card. The sub-scores here are simulated presentation
/// decoration; the deterministic scoring contract covers only the
/// blog-level ScoreSet.
fn detailed_post(post: &Post, now: DateTime<Utc>, rng: &mut impl Rng) -> DetailedPost {
    let base: f64 = 70.0 + rng.random_range(0.0..30.0);
    let expertise = base + rng.random_range(-10.0..10.0);
    let trust = base + rng.random_range(-7.5..7.5);
    let relevance = base + rng.random_range(-12.5..12.5);
    let overall = (expertise + trust + relevance) / 3.0;

    let exposure_status = if overall > 70.0 {
        "정상 노출"
    } else {
        "반영 대기중"
    };
    let grade = if overall >= 90.0 {
        "최적 1"
    } else if overall >= 80.0 {
        "최적 2"
    } else if overall >= 70.0 {
        "최적 3"
    } else if overall >= 60.0 {
        "준최 1"
    } else {
        "없음"
    };

    DetailedPost {
        title: if post.title.is_empty() {
            "제목 없음".to_string()
        } else {
            post.title.clone()
        },
        publish_date: post.published_at.format("%Y. %m. %d.").to_string(),
        publish_time: relative_time(post.published_at, now),
        exposure_status,
        grade,
        image_count: post.image_count,
        video_count: post.video_count,
        character_count: post.character_count,
        comment_count: post.comment_count,
        like_count: post.like_count,
        view_count: post.view_count,
        scores: PostScores {
            expertise: round2(expertise),
            trust: round2(trust),
            relevance: round2(relevance),
            overall: round2(overall),
        },
        link: post.link.clone(),
    }
}

/// "N일 전" / "N시간 전" / "N분 전" relative display time.
fn relative_time(published_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(published_at);
    let days = elapsed.num_days();
    if days > 0 {
        return format!("{days}일 전");
    }
    let hours = elapsed.num_hours();
    if hours > 0 {
        return format!("{hours}시간 전");
    }
    format!("{}분 전", elapsed.num_minutes().max(1))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
#[path = "analysis_test.rs"]
mod tests;
