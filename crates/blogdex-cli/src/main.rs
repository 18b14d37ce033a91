use std::sync::Arc;
use std::time::Duration;

use blogdex_acquire::AcquisitionChain;
use blogdex_ranking::{RankingCache, RankingEnricher};
use blogdex_scoring::{analyze, extract_keywords};
use chrono::Utc;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blogdex-cli")]
#[command(about = "Blog quality-index analysis from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze one blog by URL or identifier and print its quality index.
    Analyze {
        /// Blog URL or bare identifier.
        input: String,
        /// Print the full report as JSON instead of a summary.
        #[arg(long)]
        json: bool,
        /// Skip the search-rank enrichment (faster, no search traffic).
        #[arg(long)]
        no_enrich: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            input,
            json,
            no_enrich,
        } => run_analyze(&input, json, no_enrich).await,
    }
}

async fn run_analyze(input: &str, json: bool, no_enrich: bool) -> anyhow::Result<()> {
    let config = blogdex_core::load_app_config()?;
    let chain = AcquisitionChain::from_config(&config)?;

    let now = Utc::now();
    let acquired = chain.acquire(input, now).await?;
    let report = analyze(&acquired.profile, &acquired.posts);

    let ranking_report = if no_enrich {
        None
    } else {
        let keywords = extract_keywords(&acquired.posts, config.ranking_keyword_limit);
        if keywords.is_empty() {
            None
        } else {
            let cache = Arc::new(RankingCache::new(Duration::from_secs(
                config.ranking_cache_ttl_secs,
            )));
            let enricher = RankingEnricher::from_parts(
                &config.search_base_url,
                config.http_timeout_secs,
                &config.user_agent,
                cache,
                config.ranking_delay_ms,
            )?;
            Some(
                enricher
                    .generate_report(&acquired.profile.blog_id, &keywords)
                    .await,
            )
        }
    };

    if json {
        let output = serde_json::json!({
            "profile": acquired.profile,
            "source": acquired.source,
            "confidence": acquired.confidence,
            "report": report,
            "rankings": ranking_report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let scores = report.score_set;
    println!("블로그: {} ({})", acquired.profile.nickname, acquired.profile.blog_id);
    println!("카테고리: {}", acquired.profile.category);
    println!("수집 방식: {} ({:?})", acquired.source, acquired.confidence);
    println!();
    println!("블로그 지수: {} ({:.0}점)", scores.grade, scores.overall);
    println!("  전문성: {:.1}", scores.expertise);
    println!("  신뢰성: {:.1}", scores.trust);
    println!("  관련성: {:.1}", scores.relevance);
    println!("  다음 등급까지: {:.1}%", report.progress_to_next);
    println!();
    println!("유효 키워드: {}개", report.valid_keyword_count);
    if !report.keywords.is_empty() {
        println!("주요 키워드: {}", report.keywords.join(", "));
    }

    if let Some(rankings) = ranking_report {
        println!();
        println!(
            "검색 순위: {}개 키워드 중 {}개 노출",
            rankings.summary.total_keywords, rankings.summary.ranked_keywords
        );
        for detail in &rankings.details {
            match (&detail.error, detail.best_rank) {
                (Some(err), _) => println!("  {} — 조회 실패: {err}", detail.keyword),
                (None, Some(best)) => println!(
                    "  {} — 최고 {}위 (노출 {}건)",
                    detail.keyword, best, detail.total_posts
                ),
                (None, None) => println!("  {} — 순위권 밖", detail.keyword),
            }
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("개선 제안:");
        for recommendation in &report.recommendations {
            println!("  - {recommendation}");
        }
    }

    Ok(())
}
