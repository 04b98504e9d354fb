//! Symbol search port

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

const ACCEPTED_QUOTE_TYPES: [&str; 2] = ["EQUITY", "ETF"];

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Quote returned by the symbol search API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SymbolCandidate {
    pub symbol: String,
    #[serde(default)]
    pub shortname: Option<String>,
    #[serde(rename = "quoteType", default)]
    pub quote_type: String,
    #[serde(rename = "isYahooFinance", default)]
    pub is_yahoo_finance: bool,
}

impl SymbolCandidate {
    /// Listed equities and ETFs only
    pub fn is_accepted(&self) -> bool {
        self.is_yahoo_finance && ACCEPTED_QUOTE_TYPES.contains(&self.quote_type.as_str())
    }

    pub fn display_name(&self) -> &str {
        self.shortname.as_deref().unwrap_or(&self.symbol)
    }
}

#[async_trait]
pub trait SymbolSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SymbolCandidate>, SearchError>;
}
