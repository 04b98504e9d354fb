//! Yahoo Finance symbol search client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::search::{SearchError, SymbolCandidate, SymbolSearch};

pub const DEFAULT_SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; marketmind-dashboard)";

pub type Result<T> = std::result::Result<T, SearchError>;

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::RequestFailed(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<Value>,
}

/// Symbol search against the Yahoo Finance search endpoint
pub struct YahooSearchClient {
    base_url: String,
    quotes_count: usize,
    client: Client,
}

impl YahooSearchClient {
    pub fn new(base_url: impl Into<String>, quotes_count: usize, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            quotes_count,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Quotes that do not decode as candidates (news items, indices without a
/// symbol) are skipped
fn decode_quotes(body: &str) -> Result<Vec<SymbolCandidate>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SearchError::DeserializeFailed(e.to_string()))?;

    Ok(response
        .quotes
        .into_iter()
        .filter_map(|quote| serde_json::from_value(quote).ok())
        .collect())
}

#[async_trait]
impl SymbolSearch for YahooSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>> {
        let params = [
            ("q", query.to_string()),
            ("quotesCount", self.quotes_count.to_string()),
            ("newsCount", "0".to_string()),
        ];
        debug!("[Search] GET {} q={}", self.base_url, query);

        let response = self.client.get(&self.base_url).query(&params).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("[Search] Rate limit exceeded");
            return Err(SearchError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::ApiError(format!("{}: {}", status, error_text)));
        }

        let body = response.text().await?;
        decode_quotes(&body)
    }
}
