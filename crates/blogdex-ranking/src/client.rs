//! Search-result client for the external search surface.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::error::RankingError;

/// One search result in document order. `position` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub position: u32,
}

pub struct SearchRankClient {
    client: Client,
    base_url: String,
}

impl SearchRankClient {
    /// # Errors
    ///
    /// Returns [`RankingError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, RankingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self, keyword: &str) -> String {
        let encoded = utf8_percent_encode(keyword, NON_ALPHANUMERIC).to_string();
        format!("{}/search.naver?where=blog&query={encoded}", self.base_url)
    }

    /// Fetch the search page for a keyword and return its results in
    /// document order.
    ///
    /// # Errors
    ///
    /// Network failure, timeout, or a non-2xx status.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, RankingError> {
        let url = self.search_url(keyword);
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RankingError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }
        let body = response.text().await?;
        Ok(parse_search_results(&body))
    }
}

/// Extract result blocks (`.blog_area` / `.total_area`) and their first
/// link, positioned in document order.
pub(crate) fn parse_search_results(html: &str) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let mut hits = Vec::new();

    let Ok(block_selector) = Selector::parse(".blog_area, .total_area") else {
        return hits;
    };
    let Ok(link_selector) = Selector::parse("a[href]") else {
        return hits;
    };

    for (index, block) in document.select(&block_selector).enumerate() {
        let Some(anchor) = block.select(&link_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let title = anchor.text().collect::<String>().trim().to_string();
        #[allow(clippy::cast_possible_truncation)]
        hits.push(SearchHit {
            title,
            link: href.to_string(),
            position: index as u32 + 1,
        });
    }

    hits
}
