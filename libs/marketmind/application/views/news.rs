//! News cards for the dashboard list and the intelligence tab

use crate::domain::{Impact, NewsArticle, NewsFilter, ScoreTier};

/// Dashboard shows at most this many cards
pub const DASHBOARD_NEWS_LIMIT: usize = 10;

pub const DASHBOARD_EMPTY: &str = "No market intelligence right now";
pub const INTELLIGENCE_EMPTY: &str = "No intelligence matches this filter";

#[derive(Debug, Clone, PartialEq)]
pub struct NewsCard {
    pub title: String,
    pub impact: String,
    pub classification: Impact,
    pub tier: ScoreTier,
    pub score: f64,
    pub reason: String,
    pub link: Option<String>,
}

impl NewsCard {
    pub fn from_article(article: &NewsArticle) -> Self {
        Self {
            title: article.title.clone(),
            impact: article.impact.clone(),
            classification: Impact::classify(&article.impact),
            tier: ScoreTier::from_score(article.score),
            score: article.score,
            reason: article.reason.clone(),
            link: article.link.clone().filter(|l| !l.is_empty()),
        }
    }

    /// `"9 / 10"`, `"7.5 / 10"`
    pub fn score_label(&self) -> String {
        format!("{} / 10", self.score)
    }
}

/// Descending by score; equal scores keep their document order
fn by_score_desc<'a>(articles: impl Iterator<Item = &'a NewsArticle>) -> Vec<&'a NewsArticle> {
    let mut sorted: Vec<&NewsArticle> = articles.collect();
    sorted.sort_by(|a, b| b.score.total_cmp(&a.score));
    sorted
}

pub fn dashboard_news(articles: &[NewsArticle], limit: usize) -> Vec<NewsCard> {
    by_score_desc(articles.iter())
        .into_iter()
        .take(limit)
        .map(NewsCard::from_article)
        .collect()
}

pub fn intelligence(articles: &[NewsArticle], filter: NewsFilter) -> Vec<NewsCard> {
    let matches = |a: &&NewsArticle| match filter {
        NewsFilter::All => true,
        NewsFilter::Bullish => crate::domain::sentiment::is_bullish(&a.impact),
        NewsFilter::Bearish => crate::domain::sentiment::is_bearish(&a.impact),
    };

    by_score_desc(articles.iter().filter(matches))
        .into_iter()
        .map(NewsCard::from_article)
        .collect()
}
