use std::{ops::Deref, time::Duration};

use async_trait::async_trait;
use reqwest::{header, Url};

use crate::{html, Document, DocumentSource, FetchError};

/// Fetches a web page over HTTP(S) and reduces it to plain text.
#[derive(Debug, Default, Clone)]
pub struct UrlLoader(pub reqwest::Client);

impl Deref for UrlLoader {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl UrlLoader {
    // some sites refuse requests without a browser-like agent
    const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Accepts only absolute `http`/`https` URLs.
    pub fn parse_url(source: &str) -> Result<Url, FetchError> {
        let url = Url::parse(source.trim()).map_err(|e| FetchError::InvalidUrl {
            url: source.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(FetchError::InvalidUrl {
                url: source.to_string(),
                reason: format!("unsupported scheme '{scheme}'"),
            }),
        }
    }
}

#[async_trait]
impl DocumentSource for UrlLoader {
    #[tracing::instrument(skip(self))]
    async fn load(&self, source: &str) -> Result<Document, FetchError> {
        let url = Self::parse_url(source)?;

        let resp = self
            .get(url.clone())
            .header(header::USER_AGENT, Self::USER_AGENT)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .timeout(Self::REQUEST_TIMEOUT)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            tracing::error!(status, "Document request was not successful");
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let is_html_content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("html"));

        let body = resp.text().await?;
        let content = if is_html_content_type || html::looks_like_html(&body) {
            html::extract_text(&body)
        } else {
            body
        };

        tracing::debug!(chars = content.chars().count(), "Loaded document from url");
        Ok(Document::new(content, source))
    }
}
