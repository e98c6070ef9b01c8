//! Core types for lead scoring
//!
//! This crate provides the types shared by the other crates:
//! - Lead input records (profile, activities, sequence engagement)
//! - Feature groups and their categorical sum types
//! - Qualification levels
//! - The feature catalog every weight table is validated against
//! - Collaborator traits (text understanding)

pub mod features;
pub mod lead;
mod lenient;
pub mod qualification;
pub mod traits;

pub use features::{
    descriptor, descriptors_for, BehavioralFeatures, Categorical, CompanySize, DayPattern,
    DemographicFeatures, EmailDomainType, EngagementFeatures, FeatureCategory, FeatureDescriptor,
    FeatureGroup, FeatureKind, FeatureValue, LeadFeatures, MessageIntent, NamedValue, Sentiment,
    TemporalFeatures, TextFeatures, TimePattern, TitleSeniority, UrgencyLevel, CATALOG,
    NO_ACTIVITY_DAYS,
};
pub use lead::{parse_utc_offset, Activity, ActivityType, LeadProfile, LeadRecord, SequenceEngagement};
pub use qualification::QualificationLevel;
pub use traits::TextAnalyzer;
