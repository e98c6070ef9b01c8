//! Text understanding results carried alongside the weighted features
//!
//! Produced by a `TextAnalyzer`; all-null when none is configured.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageIntent {
    Purchase,
    DemoRequest,
    PricingInquiry,
    Support,
    Information,
    Unsubscribe,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFeatures {
    pub sentiment: Option<Sentiment>,
    pub intent: Option<MessageIntent>,
    pub urgency_level: Option<UrgencyLevel>,
    pub topic_tags: Vec<String>,
    pub has_message: bool,
    /// Total characters across all messages
    pub message_length: usize,
}

impl TextFeatures {
    /// True when no analyzer supplied anything
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
