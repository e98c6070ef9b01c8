//! Temporal features: lead age, recency and activity timing

use serde::{Deserialize, Serialize};

use super::{Categorical, FeatureCategory, FeatureGroup, FeatureValue, NamedValue};

/// `days_since_last_activity` for a lead that never had a timestamped activity
pub const NO_ACTIVITY_DAYS: i64 = 9999;

/// Weekday / weekend split of a lead's activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPattern {
    Weekday,
    Weekend,
    Mixed,
    /// No timestamped activity to classify
    #[default]
    Unknown,
}

impl Categorical for DayPattern {
    const LABELS: &'static [&'static str] = &["weekday", "weekend", "mixed", "unknown"];

    fn label(&self) -> &'static str {
        match self {
            DayPattern::Weekday => "weekday",
            DayPattern::Weekend => "weekend",
            DayPattern::Mixed => "mixed",
            DayPattern::Unknown => "unknown",
        }
    }
}

/// Business-hours / after-hours split of a lead's activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePattern {
    BusinessHours,
    AfterHours,
    Mixed,
    #[default]
    Unknown,
}

impl Categorical for TimePattern {
    const LABELS: &'static [&'static str] = &["business_hours", "after_hours", "mixed", "unknown"];

    fn label(&self) -> &'static str {
        match self {
            TimePattern::BusinessHours => "business_hours",
            TimePattern::AfterHours => "after_hours",
            TimePattern::Mixed => "mixed",
            TimePattern::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalFeatures {
    pub days_since_created: i64,
    pub days_since_last_activity: i64,
    /// 0-100, decays exponentially with `days_since_last_activity`
    pub recency_score: f64,
    /// At least the burst threshold of activities inside one window
    pub activity_burst: bool,
    pub day_pattern: DayPattern,
    pub time_pattern: TimePattern,
}

impl Default for TemporalFeatures {
    fn default() -> Self {
        Self {
            days_since_created: 0,
            days_since_last_activity: NO_ACTIVITY_DAYS,
            recency_score: 0.0,
            activity_burst: false,
            day_pattern: DayPattern::Unknown,
            time_pattern: TimePattern::Unknown,
        }
    }
}

impl FeatureGroup for TemporalFeatures {
    const CATEGORY: FeatureCategory = FeatureCategory::Temporal;

    fn values(&self) -> Vec<NamedValue> {
        vec![
            ("days_since_created", FeatureValue::Numeric(Some(self.days_since_created as f64))),
            (
                "days_since_last_activity",
                FeatureValue::Numeric(Some(self.days_since_last_activity as f64)),
            ),
            ("recency_score", FeatureValue::Numeric(Some(self.recency_score))),
            ("activity_burst", FeatureValue::Flag(self.activity_burst)),
            ("day_pattern", FeatureValue::category(self.day_pattern)),
            ("time_pattern", FeatureValue::category(self.time_pattern)),
        ]
    }
}
