//! Weighted Scorer
//!
//! Turns a feature snapshot into a 0-100 score:
//! - flag: `weight` when true, else 0
//! - numeric: `weight * clamp(value, 0, cap)`, null contributes 0
//! - categorical: `weight * rank(label)`
//!
//! The raw sum is rescaled linearly from the attainable domain
//! `[min, max]`, which is derived from the weights, caps and ranks and
//! recomputed whenever the weights change.

use std::collections::BTreeMap;

use lead_scoring_config::{FeatureWeights, QualificationThresholds};
use lead_scoring_core::{FeatureKind, FeatureValue, LeadFeatures, QualificationLevel, CATALOG};
use serde::{Deserialize, Serialize};

use crate::ScoringError;

/// Score plus its explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadScore {
    /// Normalized score, 0-100
    pub score: f64,
    /// Weighted sum before normalization
    pub raw_score: f64,
    pub qualification: QualificationLevel,
    /// Contribution of every weighted feature
    pub breakdown: BTreeMap<String, f64>,
}

impl LeadScore {
    /// The `n` largest contributions by magnitude, zero contributions excluded
    pub fn top_factors(&self, n: usize) -> Vec<(&str, f64)> {
        let mut factors: Vec<(&str, f64)> = self
            .breakdown
            .iter()
            .filter(|(_, contribution)| **contribution != 0.0)
            .map(|(name, contribution)| (name.as_str(), *contribution))
            .collect();

        factors.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        factors.truncate(n);
        factors
    }
}

/// Range of raw sums the current weights can produce
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreDomain {
    pub min: f64,
    pub max: f64,
}

impl ScoreDomain {
    pub fn is_degenerate(&self) -> bool {
        (self.max - self.min).abs() <= f64::EPSILON
    }

    /// Rescale a raw sum to [0, 100]; a degenerate domain scores 0
    pub fn normalize(&self, raw: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let score = (raw - self.min) / (self.max - self.min) * 100.0;
        if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        }
    }
}

/// How one catalog feature contributes, resolved from the weight table
#[derive(Debug, Clone)]
enum Term {
    Flag,
    Numeric { cap: f64 },
    Categorical { ranks: Vec<(&'static str, f64)> },
}

#[derive(Debug, Clone)]
struct CompiledFeature {
    name: &'static str,
    weight: f64,
    term: Term,
}

impl CompiledFeature {
    fn contribution(&self, value: &FeatureValue) -> f64 {
        match (&self.term, value) {
            (Term::Flag, FeatureValue::Flag(set)) => {
                if *set {
                    self.weight
                } else {
                    0.0
                }
            }
            (Term::Numeric { cap }, FeatureValue::Numeric(value)) => match value {
                Some(v) if v.is_finite() => self.weight * v.clamp(0.0, *cap),
                _ => 0.0,
            },
            (Term::Categorical { ranks }, FeatureValue::Category(label)) => ranks
                .iter()
                .find(|(l, _)| l == label)
                .map_or(0.0, |(_, rank)| self.weight * rank),
            (_, value) => {
                tracing::warn!(
                    feature = self.name,
                    ?value,
                    "Feature value does not match its catalog kind"
                );
                0.0
            }
        }
    }

    /// Smallest and largest contribution this feature can make
    fn bounds(&self) -> (f64, f64) {
        let extremes = match &self.term {
            Term::Flag => vec![0.0, self.weight],
            Term::Numeric { cap } => vec![0.0, self.weight * cap],
            Term::Categorical { ranks } => ranks.iter().map(|(_, r)| self.weight * r).collect(),
        };
        let min = extremes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = extremes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (min, max)
    }
}

fn compile(weights: &FeatureWeights) -> Vec<CompiledFeature> {
    CATALOG
        .iter()
        .map(|entry| {
            let term = match entry.kind {
                FeatureKind::Flag => Term::Flag,
                FeatureKind::Numeric => Term::Numeric {
                    cap: weights.cap(entry.name).unwrap_or(0.0),
                },
                FeatureKind::Categorical(labels) => Term::Categorical {
                    ranks: labels
                        .iter()
                        .map(|label| (*label, weights.rank(entry.name, label).unwrap_or(0.0)))
                        .collect(),
                },
            };
            CompiledFeature {
                name: entry.name,
                weight: weights.weight(entry.name).unwrap_or(0.0),
                term,
            }
        })
        .collect()
}

fn domain_of(features: &[CompiledFeature]) -> ScoreDomain {
    features
        .iter()
        .map(CompiledFeature::bounds)
        .fold(ScoreDomain { min: 0.0, max: 0.0 }, |domain, (lo, hi)| ScoreDomain {
            min: domain.min + lo,
            max: domain.max + hi,
        })
}

/// Deterministic weighted scorer for one weight table
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: FeatureWeights,
    thresholds: QualificationThresholds,
    features: Vec<CompiledFeature>,
    domain: ScoreDomain,
}

impl WeightedScorer {
    /// Build a scorer; the weights and thresholds are validated here so
    /// scoring itself cannot fail
    pub fn new(
        weights: FeatureWeights,
        thresholds: QualificationThresholds,
    ) -> Result<Self, ScoringError> {
        weights.validate()?;
        thresholds.validate()?;

        let features = compile(&weights);
        let domain = domain_of(&features);
        if domain.is_degenerate() {
            tracing::warn!(
                min = domain.min,
                max = domain.max,
                "Weight table has a degenerate score domain, every lead will score 0"
            );
        }

        Ok(Self {
            weights,
            thresholds,
            features,
            domain,
        })
    }

    /// Replace the weight table; on error the current table stays in place
    pub fn update_weights(&mut self, weights: FeatureWeights) -> Result<(), ScoringError> {
        weights.validate()?;

        self.features = compile(&weights);
        self.domain = domain_of(&self.features);
        self.weights = weights;

        tracing::debug!(
            min = self.domain.min,
            max = self.domain.max,
            "Recomputed score domain"
        );
        Ok(())
    }

    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &QualificationThresholds {
        &self.thresholds
    }

    pub fn domain(&self) -> ScoreDomain {
        self.domain
    }

    pub fn score(&self, features: &LeadFeatures) -> LeadScore {
        let values = features.weighted_values();
        let mut breakdown = BTreeMap::new();
        let mut raw_score = 0.0;

        for (compiled, (name, value)) in self.features.iter().zip(&values) {
            debug_assert_eq!(compiled.name, *name);
            let contribution = compiled.contribution(value);
            raw_score += contribution;
            breakdown.insert(compiled.name.to_string(), contribution);
        }

        let score = self.domain.normalize(raw_score);

        LeadScore {
            score,
            raw_score,
            qualification: self.thresholds.level(score),
            breakdown,
        }
    }
}
