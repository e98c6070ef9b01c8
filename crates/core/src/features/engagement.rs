//! Engagement features derived from outreach sequence metrics

use serde::{Deserialize, Serialize};

use super::{FeatureCategory, FeatureGroup, FeatureValue, NamedValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementFeatures {
    /// Composite 0-100
    pub total_engagement_score: f64,
    /// Opens / sent, 0 when nothing was sent
    pub email_open_rate: f64,
    /// Clicks / opens, 0 when nothing was opened
    pub email_click_rate: f64,
    /// Steps completed / total steps
    pub sequence_engagement: f64,
    /// Mean reply latency in hours
    pub avg_response_time: Option<f64>,
    pub current_sequence_step: Option<u32>,
}

impl FeatureGroup for EngagementFeatures {
    const CATEGORY: FeatureCategory = FeatureCategory::Engagement;

    fn values(&self) -> Vec<NamedValue> {
        vec![
            (
                "total_engagement_score",
                FeatureValue::Numeric(Some(self.total_engagement_score)),
            ),
            ("email_open_rate", FeatureValue::Numeric(Some(self.email_open_rate))),
            ("email_click_rate", FeatureValue::Numeric(Some(self.email_click_rate))),
            ("sequence_engagement", FeatureValue::Numeric(Some(self.sequence_engagement))),
            ("avg_response_time", FeatureValue::Numeric(self.avg_response_time)),
            (
                "current_sequence_step",
                FeatureValue::Numeric(self.current_sequence_step.map(f64::from)),
            ),
        ]
    }
}
