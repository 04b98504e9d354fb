//! Bull/bear strength chart

use crate::domain::{NewsArticle, SentimentTotals};

pub const BULL_LABEL: &str = "Bull";
pub const BEAR_LABEL: &str = "Bear";

/// Long-lived chart; later renders update the dataset in place
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentChart {
    totals: SentimentTotals,
    revision: u64,
}

impl SentimentChart {
    pub fn new(articles: &[NewsArticle]) -> Self {
        Self {
            totals: SentimentTotals::aggregate(articles),
            revision: 0,
        }
    }

    /// Replace the dataset and request a redraw
    pub fn update(&mut self, articles: &[NewsArticle]) {
        self.totals = SentimentTotals::aggregate(articles);
        self.revision += 1;
    }

    pub fn totals(&self) -> SentimentTotals {
        self.totals
    }

    /// Number of in-place updates since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn bars(&self) -> [(&'static str, f64); 2] {
        [(BULL_LABEL, self.totals.bull), (BEAR_LABEL, self.totals.bear)]
    }
}
