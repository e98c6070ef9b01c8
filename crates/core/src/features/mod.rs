//! Lead feature model
//!
//! `LeadFeatures` is the read-only snapshot the extractor derives from a
//! `LeadRecord` at scoring time. It is never persisted.
//!
//! Every weighted feature is listed in [`CATALOG`]. Weight tables are
//! validated against the catalog at load time, and each feature group emits
//! its values in catalog order so the scorer can walk both side by side.

mod behavioral;
mod demographic;
mod engagement;
mod temporal;
mod text;

pub use behavioral::BehavioralFeatures;
pub use demographic::{CompanySize, DemographicFeatures, EmailDomainType, TitleSeniority};
pub use engagement::EngagementFeatures;
pub use temporal::{DayPattern, TemporalFeatures, TimePattern, NO_ACTIVITY_DAYS};
pub use text::{MessageIntent, Sentiment, TextFeatures, UrgencyLevel};

use serde::{Deserialize, Serialize};

/// Weighted feature categories (text is informational and has no category)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureCategory {
    Demographic,
    Behavioral,
    Temporal,
    Engagement,
}

impl FeatureCategory {
    pub const ALL: [FeatureCategory; 4] = [
        FeatureCategory::Demographic,
        FeatureCategory::Behavioral,
        FeatureCategory::Temporal,
        FeatureCategory::Engagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::Demographic => "demographic",
            FeatureCategory::Behavioral => "behavioral",
            FeatureCategory::Temporal => "temporal",
            FeatureCategory::Engagement => "engagement",
        }
    }
}

/// How a feature turns into a score contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Contributes its weight when true
    Flag,
    /// Contributes weight times value, saturated at a configured cap
    Numeric,
    /// Contributes weight times the configured rank of the category
    Categorical(&'static [&'static str]),
}

/// Static description of one weighted feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub name: &'static str,
    pub category: FeatureCategory,
    pub kind: FeatureKind,
}

const fn flag(category: FeatureCategory, name: &'static str) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        category,
        kind: FeatureKind::Flag,
    }
}

const fn numeric(category: FeatureCategory, name: &'static str) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        category,
        kind: FeatureKind::Numeric,
    }
}

const fn categorical(
    category: FeatureCategory,
    name: &'static str,
    labels: &'static [&'static str],
) -> FeatureDescriptor {
    FeatureDescriptor {
        name,
        category,
        kind: FeatureKind::Categorical(labels),
    }
}

use FeatureCategory::{Behavioral, Demographic, Engagement, Temporal};

/// Every weighted feature, in the order feature groups emit their values
pub const CATALOG: &[FeatureDescriptor] = &[
    flag(Demographic, "has_company"),
    flag(Demographic, "has_title"),
    flag(Demographic, "has_phone"),
    categorical(Demographic, "email_domain_type", EmailDomainType::LABELS),
    categorical(Demographic, "title_seniority", TitleSeniority::LABELS),
    categorical(Demographic, "company_size_estimate", CompanySize::LABELS),
    flag(Demographic, "email_domain"),
    numeric(Behavioral, "email_open_count"),
    numeric(Behavioral, "email_click_count"),
    numeric(Behavioral, "page_view_count"),
    numeric(Behavioral, "form_submit_count"),
    numeric(Behavioral, "meeting_count"),
    numeric(Behavioral, "call_count"),
    numeric(Behavioral, "total_activities"),
    numeric(Behavioral, "activity_velocity"),
    numeric(Behavioral, "channel_diversity"),
    numeric(Behavioral, "high_value_action_count"),
    numeric(Temporal, "days_since_created"),
    numeric(Temporal, "days_since_last_activity"),
    numeric(Temporal, "recency_score"),
    flag(Temporal, "activity_burst"),
    categorical(Temporal, "day_pattern", DayPattern::LABELS),
    categorical(Temporal, "time_pattern", TimePattern::LABELS),
    numeric(Engagement, "total_engagement_score"),
    numeric(Engagement, "email_open_rate"),
    numeric(Engagement, "email_click_rate"),
    numeric(Engagement, "sequence_engagement"),
    numeric(Engagement, "avg_response_time"),
    numeric(Engagement, "current_sequence_step"),
];

/// Look up a catalog entry by feature name
pub fn descriptor(name: &str) -> Option<&'static FeatureDescriptor> {
    CATALOG.iter().find(|d| d.name == name)
}

/// Catalog entries belonging to one category
pub fn descriptors_for(
    category: FeatureCategory,
) -> impl Iterator<Item = &'static FeatureDescriptor> {
    CATALOG.iter().filter(move |d| d.category == category)
}

/// A categorical enum with a fixed, ordered label set
pub trait Categorical: Copy {
    const LABELS: &'static [&'static str];

    fn label(&self) -> &'static str;
}

/// Value of a single weighted feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue {
    Flag(bool),
    /// `None` for nullable features with no data
    Numeric(Option<f64>),
    Category(&'static str),
}

impl FeatureValue {
    pub fn category<C: Categorical>(value: C) -> Self {
        FeatureValue::Category(value.label())
    }
}

/// A named feature value as emitted by a feature group
pub type NamedValue = (&'static str, FeatureValue);

/// A fixed-shape group of weighted features
pub trait FeatureGroup {
    const CATEGORY: FeatureCategory;

    /// Values in catalog order
    fn values(&self) -> Vec<NamedValue>;
}

/// Complete feature snapshot for one lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadFeatures {
    pub demographic: DemographicFeatures,
    pub behavioral: BehavioralFeatures,
    pub temporal: TemporalFeatures,
    pub engagement: EngagementFeatures,
    /// Informational only, never weighted
    pub text: TextFeatures,
}

impl LeadFeatures {
    /// All weighted feature values, in catalog order
    pub fn weighted_values(&self) -> Vec<NamedValue> {
        let mut values = Vec::with_capacity(CATALOG.len());
        values.extend(self.demographic.values());
        values.extend(self.behavioral.values());
        values.extend(self.temporal.values());
        values.extend(self.engagement.values());
        values
    }
}
