//! Per-keyword rank analysis and report aggregation.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::cache::RankingCache;
use crate::client::{SearchHit, SearchRankClient};
use crate::error::RankingError;

/// How many keywords make the top/improvement shortlists.
const SHORTLIST_LIMIT: usize = 5;

/// A post of the target blog found in the search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPost {
    pub title: String,
    pub link: String,
    pub rank: u32,
}

/// Rank statistics for one queried keyword. A failed lookup keeps its slot
/// with `error` set instead of aborting the batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRanking {
    pub keyword: String,
    pub best_rank: Option<u32>,
    pub average_rank: Option<u32>,
    pub total_posts: usize,
    pub ranked_posts: Vec<RankedPost>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct RankDistribution {
    /// Ranks 1–3.
    pub top: usize,
    /// Ranks 4–10.
    pub high: usize,
    /// Ranks 11–30.
    pub medium: usize,
    /// Ranks 31 and beyond.
    pub low: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingSummary {
    pub total_keywords: usize,
    pub ranked_keywords: usize,
    pub total_ranked_posts: usize,
    pub average_rank: Option<u32>,
    pub best_rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingReport {
    pub summary: RankingSummary,
    pub distribution: RankDistribution,
    pub top_keywords: Vec<String>,
    pub improve_keywords: Vec<String>,
    pub details: Vec<KeywordRanking>,
    pub recommendations: Vec<String>,
}

/// Drives sequential per-keyword lookups through the cache and the search
/// client, with a fixed delay between network calls.
pub struct RankingEnricher {
    client: SearchRankClient,
    cache: Arc<RankingCache>,
    delay: Duration,
}

impl RankingEnricher {
    #[must_use]
    pub fn new(client: SearchRankClient, cache: Arc<RankingCache>, delay: Duration) -> Self {
        Self {
            client,
            cache,
            delay,
        }
    }

    /// Look up every keyword sequentially. Cache hits skip both the network
    /// call and the inter-call delay; per-keyword failures become error
    /// entries.
    pub async fn analyze_keyword_rankings(
        &self,
        blog_id: &str,
        keywords: &[String],
    ) -> Vec<KeywordRanking> {
        let mut results = Vec::with_capacity(keywords.len());
        let mut network_calls = 0usize;

        for keyword in keywords {
            let key = RankingCache::key(keyword, "rank", blog_id);

            let hits = if let Some(cached) = self.cache.get(&key).await {
                tracing::debug!(%keyword, blog_id, "rank lookup served from cache");
                Ok(cached)
            } else {
                if network_calls > 0 && !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
                network_calls += 1;
                match self.client.search(keyword).await {
                    Ok(hits) => {
                        self.cache.set(key, hits.clone()).await;
                        Ok(hits)
                    }
                    Err(e) => Err(e),
                }
            };

            match hits {
                Ok(hits) => results.push(ranking_from_hits(keyword, blog_id, &hits)),
                Err(e) => {
                    tracing::warn!(%keyword, blog_id, error = %e, "keyword rank lookup failed");
                    results.push(KeywordRanking {
                        keyword: keyword.clone(),
                        best_rank: None,
                        average_rank: None,
                        total_posts: 0,
                        ranked_posts: Vec::new(),
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        results
    }

    /// Full enrichment: per-keyword details plus aggregate statistics and
    /// recommendation strings.
    pub async fn generate_report(&self, blog_id: &str, keywords: &[String]) -> RankingReport {
        let details = self.analyze_keyword_rankings(blog_id, keywords).await;
        build_report(keywords.len(), details)
    }

    /// Propagated client-construction helper for callers that only hold
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Http`] if the HTTP client cannot be built.
    pub fn from_parts(
        search_base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        cache: Arc<RankingCache>,
        delay_ms: u64,
    ) -> Result<Self, RankingError> {
        let client = SearchRankClient::new(search_base_url, timeout_secs, user_agent)?;
        Ok(Self::new(client, cache, Duration::from_millis(delay_ms)))
    }
}

fn ranking_from_hits(keyword: &str, blog_id: &str, hits: &[SearchHit]) -> KeywordRanking {
    let ranked_posts: Vec<RankedPost> = hits
        .iter()
        .filter(|hit| hit.link.contains(blog_id))
        .map(|hit| RankedPost {
            title: hit.title.clone(),
            link: hit.link.clone(),
            rank: hit.position,
        })
        .collect();

    if ranked_posts.is_empty() {
        return KeywordRanking {
            keyword: keyword.to_string(),
            best_rank: None,
            average_rank: None,
            total_posts: 0,
            ranked_posts,
            error: None,
        };
    }

    let best_rank = ranked_posts.iter().map(|p| p.rank).min();
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average_rank = Some(
        (ranked_posts.iter().map(|p| f64::from(p.rank)).sum::<f64>()
            / ranked_posts.len() as f64)
            .round() as u32,
    );

    KeywordRanking {
        keyword: keyword.to_string(),
        best_rank,
        average_rank,
        total_posts: ranked_posts.len(),
        ranked_posts,
        error: None,
    }
}

fn build_report(total_keywords: usize, details: Vec<KeywordRanking>) -> RankingReport {
    let all_ranks: Vec<u32> = details
        .iter()
        .flat_map(|d| d.ranked_posts.iter().map(|p| p.rank))
        .collect();

    let mut distribution = RankDistribution::default();
    for rank in &all_ranks {
        match rank {
            1..=3 => distribution.top += 1,
            4..=10 => distribution.high += 1,
            11..=30 => distribution.medium += 1,
            _ => distribution.low += 1,
        }
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average_rank = (!all_ranks.is_empty()).then(|| {
        (all_ranks.iter().map(|r| f64::from(*r)).sum::<f64>() / all_ranks.len() as f64).round()
            as u32
    });

    let summary = RankingSummary {
        total_keywords,
        ranked_keywords: details.iter().filter(|d| d.total_posts > 0).count(),
        total_ranked_posts: all_ranks.len(),
        average_rank,
        best_rank: all_ranks.iter().copied().min(),
    };

    let mut top: Vec<&KeywordRanking> = details
        .iter()
        .filter(|d| d.best_rank.is_some_and(|r| r <= 10))
        .collect();
    top.sort_by_key(|d| d.best_rank.unwrap_or(u32::MAX));
    let top_keywords: Vec<String> = top
        .iter()
        .take(SHORTLIST_LIMIT)
        .map(|d| d.keyword.clone())
        .collect();

    let improve_keywords: Vec<String> = details
        .iter()
        .filter(|d| d.total_posts == 0 || d.best_rank.is_some_and(|r| r > 30))
        .take(SHORTLIST_LIMIT)
        .map(|d| d.keyword.clone())
        .collect();

    let recommendations = ranking_recommendations(&distribution, &details);

    RankingReport {
        summary,
        distribution,
        top_keywords,
        improve_keywords,
        details,
        recommendations,
    }
}

fn ranking_recommendations(
    distribution: &RankDistribution,
    details: &[KeywordRanking],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if distribution.top < 3 {
        recommendations.push(
            "상위권(1-3위) 진입을 위해 콘텐츠 품질을 높이고 키워드 최적화를 강화하세요"
                .to_string(),
        );
    }

    let unranked = details.iter().filter(|d| d.total_posts == 0).count();
    #[allow(clippy::cast_precision_loss)]
    if !details.is_empty() && unranked as f64 > details.len() as f64 * 0.3 {
        recommendations.push(
            "순위권 밖 키워드가 많습니다. 해당 키워드로 새로운 포스트를 작성해보세요".to_string(),
        );
    }

    if distribution.medium > distribution.high + distribution.top {
        recommendations.push(
            "중간 순위 포스트들이 많습니다. 내용을 보강하고 이미지를 추가하여 상위권으로 올려보세요"
                .to_string(),
        );
    }

    if recommendations.is_empty() {
        recommendations.push("꾸준한 포스팅과 키워드 최적화로 현재 순위를 유지하세요".to_string());
        recommendations.push("독자와의 상호작용을 늘려 블로그 활성도를 높이세요".to_string());
    }

    recommendations
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
