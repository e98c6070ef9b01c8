//! Lead scoring engine
//!
//! Converts a raw lead record and its activity history into a normalized
//! 0-100 score with a per-feature breakdown:
//! - [`LeadFeatureExtractor`]: lead record -> `LeadFeatures`
//! - [`WeightedScorer`]: `LeadFeatures` x `FeatureWeights` -> [`LeadScore`]
//! - [`KeywordTextAnalyzer`]: informational text features
//! - [`LeadScoringEngine`]: profiles, single and batch scoring
//!
//! Scoring is a pure function of the features and the weight table; every
//! type here is `Send + Sync` and safe to share across request handlers.

pub mod engine;
pub mod extractor;
mod keywords;
pub mod scorer;
pub mod text;

pub use engine::{LeadEvaluation, LeadScoringEngine, RankedLead};
pub use extractor::LeadFeatureExtractor;
pub use scorer::{LeadScore, ScoreDomain, WeightedScorer};
pub use text::KeywordTextAnalyzer;

use lead_scoring_config::ConfigError;
use thiserror::Error;

/// Scoring errors
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid keyword pattern in {field}: {source}")]
    Pattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("Unknown weight profile: {0}")]
    UnknownProfile(String),
}
