//! URL title inference
//!
//! Fetches a page and extracts the trimmed text of its `<title>` tag. Any
//! failure (network, non-HTML body, missing tag) yields `None` so link
//! creation never fails on a bad page.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

/// Strategy for inferring a page title from its URL
#[async_trait]
pub trait TitleFetcher: Send + Sync + Debug {
    async fn fetch_title(&self, url: &str) -> Option<String>;
}

/// HTTP-backed title fetcher
#[derive(Debug, Clone)]
pub struct HttpTitleFetcher {
    client: reqwest::Client,
}

impl HttpTitleFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self { client }
    }
}

impl Default for HttpTitleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TitleFetcher for HttpTitleFetcher {
    async fn fetch_title(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(url = %url, error = %err, "Title fetch request failed");
                return None;
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(url = %url, error = %err, "Title fetch body read failed");
                return None;
            }
        };

        extract_title(&body)
    }
}

/// Title fetcher that never infers anything (tests, offline mode)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTitleFetcher;

#[async_trait]
impl TitleFetcher for NoopTitleFetcher {
    async fn fetch_title(&self, _url: &str) -> Option<String> {
        None
    }
}

/// Extract the trimmed `<title>` text from an HTML document
///
/// Kept synchronous so the non-`Send` parsed document never lives across an
/// await point.
fn extract_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;

    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let title = title.trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
