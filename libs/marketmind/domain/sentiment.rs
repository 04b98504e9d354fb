//! News impact classification and sentiment aggregation

use super::models::NewsArticle;

/// Marker the scoring pipeline writes into bullish impact tags
pub const BULLISH_MARKER: &str = "多";
/// Marker the scoring pipeline writes into bearish impact tags
pub const BEARISH_MARKER: &str = "空";

/// Baseline used when there are no articles so the chart never collapses
pub const EMPTY_SENTIMENT_BASELINE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Bullish,
    Bearish,
    Neutral,
}

impl Impact {
    /// Bullish wins when both markers are present
    pub fn classify(impact: &str) -> Self {
        if is_bullish(impact) {
            Impact::Bullish
        } else if is_bearish(impact) {
            Impact::Bearish
        } else {
            Impact::Neutral
        }
    }
}

pub fn is_bullish(impact: &str) -> bool {
    impact.contains(BULLISH_MARKER)
}

pub fn is_bearish(impact: &str) -> bool {
    impact.contains(BEARISH_MARKER)
}

/// Visual severity bucket for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    /// score >= 9
    Critical,
    /// score >= 7
    Elevated,
    Normal,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 9.0 {
            ScoreTier::Critical
        } else if score >= 7.0 {
            ScoreTier::Elevated
        } else {
            ScoreTier::Normal
        }
    }
}

/// Summed bullish and bearish scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentTotals {
    pub bull: f64,
    pub bear: f64,
}

impl SentimentTotals {
    /// Sum scores per marker; an article carrying both markers counts twice
    pub fn aggregate(articles: &[NewsArticle]) -> Self {
        if articles.is_empty() {
            return Self {
                bull: EMPTY_SENTIMENT_BASELINE,
                bear: EMPTY_SENTIMENT_BASELINE,
            };
        }

        articles.iter().fold(Self { bull: 0.0, bear: 0.0 }, |mut acc, article| {
            if is_bullish(&article.impact) {
                acc.bull += article.score;
            }
            if is_bearish(&article.impact) {
                acc.bear += article.score;
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(score: f64, impact: &str) -> NewsArticle {
        NewsArticle {
            title: format!("{} {}", impact, score),
            impact: impact.to_string(),
            score,
            reason: String::new(),
            link: None,
        }
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(Impact::classify("利多"), Impact::Bullish);
        assert_eq!(Impact::classify("利空"), Impact::Bearish);
        assert_eq!(Impact::classify("中性"), Impact::Neutral);
        assert_eq!(Impact::classify("多空交织"), Impact::Bullish);
    }

    #[test]
    fn test_score_tiers() {
        assert_eq!(ScoreTier::from_score(9.0), ScoreTier::Critical);
        assert_eq!(ScoreTier::from_score(8.9), ScoreTier::Elevated);
        assert_eq!(ScoreTier::from_score(7.0), ScoreTier::Elevated);
        assert_eq!(ScoreTier::from_score(6.9), ScoreTier::Normal);
    }

    #[test]
    fn test_aggregate_sums_per_marker() {
        let totals = SentimentTotals::aggregate(&[article(9.0, "多"), article(3.0, "空")]);
        assert_eq!(totals, SentimentTotals { bull: 9.0, bear: 3.0 });
    }

    #[test]
    fn test_dual_marker_counts_toward_both() {
        let totals = SentimentTotals::aggregate(&[article(5.0, "多空"), article(2.0, "中性")]);
        assert_eq!(totals, SentimentTotals { bull: 5.0, bear: 5.0 });
    }

    #[test]
    fn test_empty_uses_baseline() {
        let totals = SentimentTotals::aggregate(&[]);
        assert_eq!(totals, SentimentTotals { bull: 0.1, bear: 0.1 });
    }

    #[test]
    fn test_only_neutral_articles_sum_to_zero() {
        let totals = SentimentTotals::aggregate(&[article(8.0, "中性")]);
        assert_eq!(totals, SentimentTotals { bull: 0.0, bear: 0.0 });
    }
}
