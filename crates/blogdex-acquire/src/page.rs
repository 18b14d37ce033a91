//! Rendered-page crawl strategy.
//!
//! The most expensive and highest-fidelity rung: fetches the blog's home
//! page and its post-list page, extracts title/description/stat elements
//! with CSS selector queries, then pulls up to `post_limit` individual post
//! pages. Markup varies between blog skins, so every element is probed
//! through a list of candidate selectors and missing stats are backfilled
//! with seeded estimates.

use std::sync::LazyLock;

use blogdex_core::{BlogProfile, Category, Post};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::error::AcquireError;
use crate::http::{build_client, fetch_text};
use crate::seed::{polynomial_seed, seeded_estimate};
use crate::types::StrategyYield;

/// Most post links collected from the list page before the fetch limit
/// applies.
const MAX_POST_LINKS: usize = 20;

static NICKNAME_FROM_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)님?의?\s*(블로그|Blog)").expect("nickname pattern must compile")
});

pub struct PageCrawlStrategy {
    client: Client,
    base_url: String,
    post_limit: usize,
}

/// What the home page yields before profile assembly.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct PageMetadata {
    pub(crate) title: Option<String>,
    pub(crate) description: String,
    pub(crate) post_count: Option<u64>,
    pub(crate) visitor_count: Option<u64>,
    pub(crate) subscriber_count: Option<u64>,
}

/// Raw extraction from a single post page.
#[derive(Debug, Default)]
pub(crate) struct PostExtract {
    pub(crate) title: String,
    pub(crate) body_text: String,
    pub(crate) image_count: u64,
    pub(crate) video_count: u64,
    pub(crate) date_text: Option<String>,
}

impl PageCrawlStrategy {
    /// # Errors
    ///
    /// Returns [`AcquireError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        post_limit: usize,
    ) -> Result<Self, AcquireError> {
        Ok(Self {
            client: build_client(timeout_secs, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            post_limit,
        })
    }

    /// Crawl the blog's pages and assemble a profile plus posts.
    ///
    /// A home page without an extractable title is treated as a failed
    /// crawl so the ladder can advance; post-level failures are absorbed
    /// individually.
    ///
    /// # Errors
    ///
    /// Any network, status, or extraction failure on the home page.
    pub async fn attempt(
        &self,
        blog_id: &str,
        now: DateTime<Utc>,
    ) -> Result<StrategyYield, AcquireError> {
        let home_url = format!("{}/{blog_id}", self.base_url);
        let home_html = fetch_text(&self.client, &home_url).await?;
        let metadata = parse_blog_page(&home_html);

        let Some(title) = metadata.title.clone() else {
            return Err(AcquireError::Extraction {
                context: home_url,
                reason: "no blog title element found".to_string(),
            });
        };

        let profile = profile_from_metadata(blog_id, &title, &metadata);

        let list_url = format!("{}/PostList.naver?blogId={blog_id}", self.base_url);
        let links = match fetch_text(&self.client, &list_url).await {
            Ok(html) => parse_post_links(&html),
            Err(e) => {
                tracing::warn!(blog_id, error = %e, "post list fetch failed; continuing without posts");
                Vec::new()
            }
        };

        let mut posts = Vec::new();
        for (index, href) in links.iter().take(self.post_limit).enumerate() {
            let post_url = if href.starts_with("http") {
                href.clone()
            } else {
                format!("{}{href}", self.base_url)
            };
            match fetch_text(&self.client, &post_url).await {
                Ok(html) => {
                    let extract = parse_post_page(&html);
                    posts.push(post_from_extract(extract, index, Some(post_url), now));
                }
                Err(e) => {
                    tracing::debug!(blog_id, url = %post_url, error = %e, "post page fetch failed");
                }
            }
        }

        Ok(StrategyYield { profile, posts })
    }
}

fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for raw in selectors {
        if let Ok(selector) = Selector::parse(raw) {
            if let Some(element) = document.select(&selector).next() {
                let text: String = element.text().collect::<String>().trim().to_string();
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

fn meta_content(document: &Html, raw: &str) -> Option<String> {
    let selector = Selector::parse(raw).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn count_elements(document: &Html, raw: &str) -> u64 {
    Selector::parse(raw)
        .map(|selector| document.select(&selector).count() as u64)
        .unwrap_or(0)
}

/// Extract title, description, and any stat elements from the home page.
pub(crate) fn parse_blog_page(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    let title = first_text(&document, &["h1", ".blog_title", ".se_title", "title"]);
    let description = first_text(&document, &[".blog_desc", ".se_description"])
        .or_else(|| meta_content(&document, r#"meta[name="description"]"#))
        .unwrap_or_default();

    let mut metadata = PageMetadata {
        title,
        description,
        ..PageMetadata::default()
    };

    if let Ok(selector) = Selector::parse(r#"[class*="count"], [class*="stat"]"#) {
        for element in document.select(&selector) {
            let classes = element.value().attr("class").unwrap_or_default().to_string();
            let digits: String = element
                .text()
                .collect::<String>()
                .chars()
                .filter(char::is_ascii_digit)
                .collect();
            let Ok(number) = digits.parse::<u64>() else {
                continue;
            };
            if number == 0 {
                continue;
            }
            if classes.contains("post") {
                metadata.post_count = Some(number);
            } else if classes.contains("visitor") {
                metadata.visitor_count = Some(number);
            } else if classes.contains("subscriber") {
                metadata.subscriber_count = Some(number);
            }
        }
    }

    metadata
}

/// Collect post-page links (hrefs containing `PostView`) from the list page,
/// deduplicated in document order.
pub(crate) fn parse_post_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();

    if let Ok(selector) = Selector::parse(r#"a[href*="PostView"]"#) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let href = href.to_string();
                if !links.contains(&href) {
                    links.push(href);
                }
            }
        }
    }

    links.truncate(MAX_POST_LINKS);
    links
}

/// Extract title, body text, media counts, and the raw date string from a
/// post page.
pub(crate) fn parse_post_page(html: &str) -> PostExtract {
    let document = Html::parse_document(html);

    let title = first_text(&document, &[".se_title", ".pcol1 .title", "h3", "h2"])
        .unwrap_or_default();
    let body_text = first_text(
        &document,
        &[".se_component", ".se_textarea", ".entry-content", ".post_ct"],
    )
    .unwrap_or_default();

    PostExtract {
        title,
        body_text,
        image_count: count_elements(&document, "img"),
        video_count: count_elements(&document, "video") + count_elements(&document, "iframe"),
        date_text: first_text(&document, &[".se_publishDate", ".date", "time"]),
    }
}

fn profile_from_metadata(blog_id: &str, title: &str, metadata: &PageMetadata) -> BlogProfile {
    let seed = u64::from(polynomial_seed(blog_id));

    let nickname = NICKNAME_FROM_TITLE
        .captures(title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_else(|| {
            if title.to_lowercase().contains("blog") {
                blog_id.to_string()
            } else {
                title.to_string()
            }
        });

    let category = Category::guess_from_text(&format!("{title} {}", metadata.description));

    #[allow(clippy::cast_precision_loss)]
    let post_frequency = seeded_estimate(seed, 1, 10) as f64 / 10.0;

    BlogProfile {
        blog_id: blog_id.to_string(),
        nickname,
        category,
        subscriber_count: metadata
            .subscriber_count
            .unwrap_or_else(|| seeded_estimate(seed, 100, 5000)),
        post_count: metadata
            .post_count
            .unwrap_or_else(|| seeded_estimate(seed, 10, 500)),
        scrap_count: seeded_estimate(seed, 0, 2000),
        average_views: seeded_estimate(seed, 500, 10000),
        post_frequency,
        total_visitor_count: Some(
            metadata
                .visitor_count
                .unwrap_or_else(|| seeded_estimate(seed, 1000, 50000)),
        ),
        daily_visitor_count: Some(seeded_estimate(seed, 50, 500)),
        average_visitor_count: Some(seeded_estimate(seed, 100, 2000)),
    }
}

fn post_from_extract(
    extract: PostExtract,
    index: usize,
    link: Option<String>,
    now: DateTime<Utc>,
) -> Post {
    let published_at = extract
        .date_text
        .as_deref()
        .and_then(parse_post_date)
        .unwrap_or_else(|| now - Duration::days(index as i64 * 3));

    let character_count = extract.body_text.chars().count() as u64;
    let title = if extract.title.is_empty() {
        "제목 없음".to_string()
    } else {
        extract.title
    };

    // Interaction counts are not rendered in static markup; estimate them
    // from a per-post seed scaled by apparent content quality.
    let post_seed = u64::from(polynomial_seed(&format!("{title}{index}")));
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quality = (character_count as f64 / 20.0 + extract.image_count as f64 * 3.0).min(100.0) as u64;
    let base_interaction = quality / 5;

    Post {
        title,
        body_text: extract.body_text,
        published_at,
        image_count: extract.image_count,
        video_count: extract.video_count,
        character_count,
        comment_count: seeded_estimate(post_seed, 0, 30) + base_interaction / 3,
        like_count: seeded_estimate(post_seed, 0, 100) + base_interaction / 2,
        view_count: (seeded_estimate(post_seed, 100, 5000) + base_interaction * 5).max(100),
        link,
    }
}

/// Try the date shapes blog skins actually render.
fn parse_post_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y. %m. %d.", "%Y. %m. %d", "%Y-%m-%d", "%Y.%m.%d."] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
