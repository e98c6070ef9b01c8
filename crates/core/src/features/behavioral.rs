//! Behavioral features derived from the activity history

use serde::{Deserialize, Serialize};

use super::{FeatureCategory, FeatureGroup, FeatureValue, NamedValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehavioralFeatures {
    pub email_open_count: u32,
    pub email_click_count: u32,
    pub page_view_count: u32,
    pub form_submit_count: u32,
    pub meeting_count: u32,
    pub call_count: u32,
    pub total_activities: u32,
    /// Activities per day of lead age
    pub activity_velocity: f64,
    /// Number of distinct activity types seen
    pub channel_diversity: u32,
    /// Form submits plus email clicks
    pub high_value_action_count: u32,
}

impl FeatureGroup for BehavioralFeatures {
    const CATEGORY: FeatureCategory = FeatureCategory::Behavioral;

    fn values(&self) -> Vec<NamedValue> {
        let count = |n: u32| FeatureValue::Numeric(Some(f64::from(n)));
        vec![
            ("email_open_count", count(self.email_open_count)),
            ("email_click_count", count(self.email_click_count)),
            ("page_view_count", count(self.page_view_count)),
            ("form_submit_count", count(self.form_submit_count)),
            ("meeting_count", count(self.meeting_count)),
            ("call_count", count(self.call_count)),
            ("total_activities", count(self.total_activities)),
            ("activity_velocity", FeatureValue::Numeric(Some(self.activity_velocity))),
            ("channel_diversity", count(self.channel_diversity)),
            ("high_value_action_count", count(self.high_value_action_count)),
        ]
    }
}
