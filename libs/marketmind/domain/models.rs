use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Base URL for per-ticker financial statements
const FINANCIALS_BASE_URL: &str = "https://stockanalysis.com/stocks";

/// Scheduled macroeconomic data release
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroEvent {
    /// Release time in epoch seconds
    pub timestamp: f64,
    /// Display string, e.g. "2025-01-15 21:30 (SGT)"
    #[serde(default)]
    pub date: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub previous: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub forecast: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub actual: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub analysis: Option<String>,
}

impl MacroEvent {
    /// Composite key used to persist the featured selection
    pub fn key(&self) -> String {
        format!("{}|{}", self.timestamp, self.title)
    }
}

/// Market news item scored by the upstream pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    /// Free-text tag carrying a bullish or bearish marker
    #[serde(default)]
    pub impact: String,
    /// 0-10
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Confirmed earnings date for a subscribed ticker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomEvent {
    pub ticker: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    pub timestamp: f64,
    #[serde(rename = "type", default = "default_custom_kind")]
    pub kind: String,
}

impl CustomEvent {
    pub fn financials_url(&self) -> String {
        financials_url(&self.ticker)
    }
}

fn default_custom_kind() -> String {
    "custom".to_string()
}

/// `market_data/macro`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacroDocument {
    #[serde(default)]
    pub events: Vec<MacroEvent>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// `market_data/news`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsDocument {
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

/// `market_data/custom_calendar`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomCalendarDocument {
    #[serde(default)]
    pub events: Vec<CustomEvent>,
}

/// `market_data/watchlist`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchlistDocument {
    #[serde(default)]
    pub tickers: Vec<String>,
}

/// Financial statements page for a ticker
pub fn financials_url(ticker: &str) -> String {
    format!("{}/{}/financials/", FINANCIALS_BASE_URL, ticker.to_lowercase())
}

/// "2025-01-15 21:30 (SGT)" -> "01-15"
pub fn day_label(date: &str) -> Option<String> {
    let day = date.split(' ').next().filter(|d| !d.is_empty())?;
    Some(day.chars().skip(5).collect())
}

/// "2025-01-15 21:30 (SGT)" -> "21:30"
pub fn time_label(date: &str) -> Option<String> {
    date.split(' ')
        .nth(1)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Accept strings, numbers and booleans for display-only fields
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
