use super::i18n::Catalog;
use crate::error::Result;
use crate::topic::arena::Topic;

/// Metadata lines shown when hovering a word.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub title: String,
    pub total: String,
    pub positive: String,
    pub neutral: String,
    pub negative: String,
}

impl TooltipInfo {
    pub fn lines(&self) -> [&str; 5] {
        [
            &self.title,
            &self.total,
            &self.positive,
            &self.neutral,
            &self.negative,
        ]
    }
}

/// Build tooltip info for a topic. Fails if the language lacks any of the
/// five metadata strings.
pub fn build_tooltip(topic: &Topic, catalog: &Catalog, language: &str) -> Result<TooltipInfo> {
    let counts = &topic.sentiment;
    Ok(TooltipInfo {
        title: catalog.format(language, "stats_title", Some(topic.label.as_str()))?,
        total: catalog.format(language, "total_mentions", Some(format_count(topic.volume).as_str()))?,
        positive: catalog.format(language, "positive_mentions", Some(format_count(counts.positive).as_str()))?,
        neutral: catalog.format(language, "neutral_mentions", Some(format_count(counts.neutral).as_str()))?,
        negative: catalog.format(language, "negative_mentions", Some(format_count(counts.negative).as_str()))?,
    })
}

/// Whole numbers print without a fractional part.
pub fn format_count(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CloudError;
    use crate::topic::arena::SentimentCounts;

    fn topic() -> Topic {
        Topic {
            id: "rust".into(),
            label: "Rust".into(),
            volume: 120.0,
            sentiment_score: 72.0,
            sentiment: SentimentCounts {
                positive: 80.0,
                neutral: 30.0,
                negative: 0.0,
            },
            size_class: None,
            category: None,
            extent: None,
            position: None,
        }
    }

    #[test]
    fn english_tooltip() {
        let info = build_tooltip(&topic(), &Catalog::builtin(), "en").unwrap();
        assert_eq!(info.title, "Information on topic \"Rust\":");
        assert_eq!(info.total, "Total Mentions: 120");
        assert_eq!(info.positive, "Positive Mentions: 80");
        assert_eq!(info.negative, "Negative Mentions: 0");
    }

    #[test]
    fn unknown_language_fails() {
        let err = build_tooltip(&topic(), &Catalog::builtin(), "de").unwrap_err();
        assert!(matches!(err, CloudError::TranslationMissing { .. }));
    }

    #[test]
    fn fractional_counts_keep_decimals() {
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(-3.0), "-3");
    }
}
