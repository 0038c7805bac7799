/// Sentiment tiers used for coloring words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentimentCategory {
    /// Score above 60
    Positive,
    /// Score from 40 to 60 inclusive
    Neutral,
    /// Score below 40
    Negative,
}

impl SentimentCategory {
    /// CSS-style class name handed to the surface.
    pub fn class_name(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "positive",
            SentimentCategory::Neutral => "neutral",
            SentimentCategory::Negative => "negative",
        }
    }
}

/// Classify a 0-100 sentiment score.
pub fn categorize_score(score: f64) -> SentimentCategory {
    if score > 60.0 {
        SentimentCategory::Positive
    } else if score < 40.0 {
        SentimentCategory::Negative
    } else {
        SentimentCategory::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(categorize_score(60.0), SentimentCategory::Neutral);
        assert_eq!(categorize_score(60.5), SentimentCategory::Positive);
        assert_eq!(categorize_score(40.0), SentimentCategory::Neutral);
        assert_eq!(categorize_score(39.9), SentimentCategory::Negative);
        assert_eq!(categorize_score(0.0), SentimentCategory::Negative);
        assert_eq!(categorize_score(100.0), SentimentCategory::Positive);
    }
}
