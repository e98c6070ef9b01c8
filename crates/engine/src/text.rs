//! Keyword text analyzer
//!
//! Rule-based classification of lead messages: urgency, sentiment, intent
//! and topic tags from configurable keyword lists. Informational only; the
//! scorer never reads text features.

use lead_scoring_config::TextKeywords;
use lead_scoring_core::{MessageIntent, Sentiment, TextAnalyzer, TextFeatures, UrgencyLevel};

use crate::keywords::KeywordSet;
use crate::ScoringError;

#[derive(Debug, Clone)]
pub struct KeywordTextAnalyzer {
    urgency_high: KeywordSet,
    urgency_medium: KeywordSet,
    positive: KeywordSet,
    negative: KeywordSet,
    intents: Vec<(MessageIntent, KeywordSet)>,
    topics: Vec<(String, KeywordSet)>,
}

impl KeywordTextAnalyzer {
    pub fn new(keywords: &TextKeywords) -> Result<Self, ScoringError> {
        let intents = keywords
            .intents
            .iter()
            .map(|entry| {
                let field = format!("text.intents.{:?}", entry.intent);
                Ok((entry.intent, KeywordSet::new(&field, &entry.keywords)?))
            })
            .collect::<Result<Vec<_>, ScoringError>>()?;

        let topics = keywords
            .topics
            .iter()
            .map(|entry| {
                let field = format!("text.topics.{}", entry.tag);
                Ok((entry.tag.clone(), KeywordSet::new(&field, &entry.keywords)?))
            })
            .collect::<Result<Vec<_>, ScoringError>>()?;

        Ok(Self {
            urgency_high: KeywordSet::new("text.urgency_high", &keywords.urgency_high)?,
            urgency_medium: KeywordSet::new("text.urgency_medium", &keywords.urgency_medium)?,
            positive: KeywordSet::new("text.positive", &keywords.positive)?,
            negative: KeywordSet::new("text.negative", &keywords.negative)?,
            intents,
            topics,
        })
    }

    fn urgency(&self, text: &str) -> UrgencyLevel {
        if self.urgency_high.is_match(text) {
            UrgencyLevel::High
        } else if self.urgency_medium.is_match(text) {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    fn sentiment(&self, text: &str) -> Sentiment {
        let positive = self.positive.count(text);
        let negative = self.negative.count(text);

        // "not interested" also hits "interested", so ties go negative
        if negative > 0 && negative >= positive {
            Sentiment::Negative
        } else if positive > negative {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }

    fn intent(&self, text: &str) -> MessageIntent {
        self.intents
            .iter()
            .find(|(_, keywords)| keywords.is_match(text))
            .map_or(MessageIntent::Other, |(intent, _)| *intent)
    }

    fn topics(&self, text: &str) -> Vec<String> {
        self.topics
            .iter()
            .filter(|(_, keywords)| keywords.is_match(text))
            .map(|(tag, _)| tag.clone())
            .collect()
    }
}

impl TextAnalyzer for KeywordTextAnalyzer {
    fn analyze(&self, messages: &[String]) -> Option<TextFeatures> {
        let messages: Vec<&str> = messages
            .iter()
            .map(|m| m.trim())
            .filter(|m| !m.is_empty())
            .collect();

        if messages.is_empty() {
            return None;
        }

        let text = messages.join("\n");

        Some(TextFeatures {
            sentiment: Some(self.sentiment(&text)),
            intent: Some(self.intent(&text)),
            urgency_level: Some(self.urgency(&text)),
            topic_tags: self.topics(&text),
            has_message: true,
            message_length: messages.iter().map(|m| m.chars().count()).sum(),
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
