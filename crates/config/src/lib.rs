//! Configuration management for lead scoring
//!
//! Supports loading configuration from:
//! - YAML/TOML/JSON files
//! - Environment variables (LEAD_SCORING__ prefix)
//! - Runtime overrides (weight profiles, admin reload)
//!
//! # Scoring Configuration
//!
//! Weights, ranks, caps, profiles and qualification thresholds live in a
//! separate scoring file (`config/scoring.yaml` by default) so they can be
//! reloaded without restarting the service.

pub mod extraction;
pub mod scoring;
pub mod settings;
pub mod weights;

pub use extraction::{
    BurstConfig, BusinessHours, CompanySizeThresholds, EngagementMix, ExtractionConfig,
    IntentKeywords, SeniorityKeywords, TextKeywords, TopicKeywords, MAX_BURST_WINDOW_HOURS,
};
pub use scoring::{QualificationThresholds, ScoringConfig};
pub use settings::{
    load_settings, FeatureFlags, ObservabilityConfig, RuntimeEnvironment, ServerConfig, Settings,
};
pub use weights::{default_weights, FeatureWeights, RankTable, WeightOverrides};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Missing weight for {category} feature '{feature}'")]
    MissingWeight { category: String, feature: String },

    #[error("Unknown feature '{feature}' in {section}")]
    UnknownFeature { section: String, feature: String },

    #[error("Missing rank for '{category}' of feature '{feature}'")]
    MissingRank { feature: String, category: String },

    #[error("Missing cap for numeric feature '{feature}'")]
    MissingCap { feature: String },

    #[error("Unknown weight profile: {0}")]
    UnknownProfile(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => ConfigError::MissingField(key),
            config::ConfigError::Foreign(e) => ConfigError::Environment(e.to_string()),
            other => ConfigError::ParseError(other.to_string()),
        }
    }
}
