use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use reqwest::header;
use serde::Deserialize;

use crate::{Document, DocumentSource, FetchError};

/// Searches Wikipedia and loads the intro of the best matching pages.
///
/// The source identifier passed to [`DocumentSource::load`] is the search
/// query, not a URL. A query without matches loads an empty document.
#[derive(Debug, Clone)]
pub struct WikipediaSource {
    client: reqwest::Client,
    base_url: String,
    top_k: usize,
    max_chars: usize,
}

impl Default for WikipediaSource {
    fn default() -> Self {
        Self {
            client: reqwest::Client::default(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            top_k: 3,
            max_chars: 4000,
        }
    }
}

impl WikipediaSource {
    pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org/w/api.php";
    const USER_AGENT: &str = concat!("digest-pulse/", env!("CARGO_PKG_VERSION"));
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Points the source at another MediaWiki `api.php` endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Number of search hits to load.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Upper bound on the characters in the loaded document.
    pub fn max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    extract: String,
}

#[async_trait]
impl DocumentSource for WikipediaSource {
    #[tracing::instrument(skip(self))]
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        let top_k = self.top_k.to_string();

        let resp = self
            .client
            .get(&self.base_url)
            .query(&[
                ("action", "query"),
                ("generator", "search"),
                ("gsrsearch", source.trim()),
                ("gsrlimit", top_k.as_str()),
                ("prop", "extracts"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("exlimit", "max"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .header(header::USER_AGENT, Self::USER_AGENT)
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make wikipedia request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            tracing::error!(status, "Wikipedia request was not successful");
            return Err(FetchError::Status {
                status,
                url: self.base_url.clone(),
            });
        }

        let body: SearchResponse = resp
            .json()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to parse wikipedia response"))?;

        let pages = body.query.map(|q| q.pages).unwrap_or_default();
        tracing::debug!(pages = pages.len(), "Wikipedia search returned");

        let content = pages
            .into_iter()
            .filter(|page| !page.extract.trim().is_empty())
            .sorted_by_key(|page| page.index)
            .map(|page| format!("Page: {}\nSummary: {}", page.title, page.extract.trim()))
            .join("\n\n")
            .chars()
            .take(self.max_chars)
            .collect::<String>();

        Ok(Document::new(content, source))
    }
}
