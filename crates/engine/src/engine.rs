//! Lead Scoring Engine
//!
//! Binds one extractor to the default weight table and every configured
//! profile. Scorers for all profiles are built and validated up front, so a
//! bad profile surfaces when the engine is constructed, not when a request
//! selects it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lead_scoring_config::{ExtractionConfig, FeatureWeights, ScoringConfig};
use lead_scoring_core::{LeadFeatures, LeadRecord, TextAnalyzer};
use serde::{Deserialize, Serialize};

use crate::extractor::LeadFeatureExtractor;
use crate::scorer::{LeadScore, WeightedScorer};
use crate::ScoringError;

/// Features and score of one lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadEvaluation {
    pub features: LeadFeatures,
    pub score: LeadScore,
}

/// One entry of a ranked batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLead {
    /// 1-based position after ranking
    pub rank: usize,
    /// Position in the submitted batch
    pub index: usize,
    pub lead_id: Option<String>,
    #[serde(flatten)]
    pub score: LeadScore,
}

#[derive(Debug, Clone)]
pub struct LeadScoringEngine {
    extractor: LeadFeatureExtractor,
    config: ScoringConfig,
    default_scorer: WeightedScorer,
    profiles: BTreeMap<String, WeightedScorer>,
}

impl LeadScoringEngine {
    pub fn new(extraction: ExtractionConfig, config: ScoringConfig) -> Result<Self, ScoringError> {
        let extractor = LeadFeatureExtractor::new(extraction)?;
        Self::with_extractor(extractor, config)
    }

    /// Build around an existing extractor (e.g. one with a text analyzer)
    pub fn with_extractor(
        extractor: LeadFeatureExtractor,
        config: ScoringConfig,
    ) -> Result<Self, ScoringError> {
        config.validate()?;
        let thresholds = config.qualification_thresholds.clone();

        let default_scorer = WeightedScorer::new(config.weights.clone(), thresholds.clone())?;

        let mut profiles = BTreeMap::new();
        for name in config.profiles.keys() {
            let weights = config.resolve_profile(Some(name))?;
            profiles.insert(name.clone(), WeightedScorer::new(weights, thresholds.clone())?);
        }

        tracing::info!(
            profiles = profiles.len(),
            text_analyzer = extractor.text_analyzer_name().unwrap_or("none"),
            min = default_scorer.domain().min,
            max = default_scorer.domain().max,
            "Lead scoring engine ready"
        );

        Ok(Self {
            extractor,
            config,
            default_scorer,
            profiles,
        })
    }

    /// Attach a text analyzer to the extractor
    pub fn with_text_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.extractor = self.extractor.with_text_analyzer(analyzer);
        self
    }

    pub fn extractor(&self) -> &LeadFeatureExtractor {
        &self.extractor
    }

    pub fn scoring_config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    /// Scorer for a profile; `None` selects the default weights
    pub fn scorer(&self, profile: Option<&str>) -> Result<&WeightedScorer, ScoringError> {
        match profile {
            None => Ok(&self.default_scorer),
            Some(name) => self
                .profiles
                .get(name)
                .ok_or_else(|| ScoringError::UnknownProfile(name.to_string())),
        }
    }

    /// Effective weight table of a profile
    pub fn weights(&self, profile: Option<&str>) -> Result<&FeatureWeights, ScoringError> {
        Ok(self.scorer(profile)?.weights())
    }

    pub fn extract(&self, lead: &LeadRecord, now: DateTime<Utc>) -> LeadFeatures {
        self.extractor.extract(lead, now)
    }

    /// Score with the default weights
    pub fn score_lead(&self, lead: &LeadRecord, now: DateTime<Utc>) -> LeadScore {
        let features = self.extractor.extract(lead, now);
        self.default_scorer.score(&features)
    }

    /// Extract and score with the selected profile
    pub fn evaluate(
        &self,
        lead: &LeadRecord,
        profile: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<LeadEvaluation, ScoringError> {
        let scorer = self.scorer(profile)?;
        let features = self.extractor.extract(lead, now);
        let score = scorer.score(&features);

        tracing::debug!(
            lead_id = ?lead.profile.id,
            profile = profile.unwrap_or("default"),
            score = score.score,
            qualification = score.qualification.display_name(),
            "Scored lead"
        );

        Ok(LeadEvaluation { features, score })
    }

    /// Score many leads and rank them by score, highest first.
    ///
    /// Ties keep their submission order.
    pub fn score_batch(
        &self,
        leads: &[LeadRecord],
        profile: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<RankedLead>, ScoringError> {
        let scorer = self.scorer(profile)?;

        let mut ranked: Vec<RankedLead> = leads
            .iter()
            .enumerate()
            .map(|(index, lead)| RankedLead {
                rank: 0,
                index,
                lead_id: lead.profile.id.clone(),
                score: scorer.score(&self.extractor.extract(lead, now)),
            })
            .collect();

        ranked.sort_by(|a, b| b.score.score.total_cmp(&a.score.score));
        for (position, entry) in ranked.iter_mut().enumerate() {
            entry.rank = position + 1;
        }

        tracing::debug!(
            leads = ranked.len(),
            profile = profile.unwrap_or("default"),
            "Ranked lead batch"
        );

        Ok(ranked)
    }
}
