//! Feature weight tables
//!
//! A `FeatureWeights` value is the complete scoring configuration for one
//! profile: a signed coefficient per weighted feature, a rank table per
//! categorical feature and a saturation cap per numeric feature. Caps and
//! ranks bound every contribution, which is what lets the scorer derive the
//! attainable raw-score domain from configuration alone.
//!
//! Tables are checked against `lead_scoring_core::CATALOG` by
//! [`FeatureWeights::validate`]; a feature without a weight, a category
//! without a rank or a key the catalog does not know is a load-time error.

use std::collections::BTreeMap;

use lead_scoring_core::{descriptor, descriptors_for, FeatureCategory, FeatureKind, CATALOG};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Ordinal ranks for one categorical feature (label -> rank)
pub type RankTable = BTreeMap<String, f64>;

/// Weights, ranks and caps for every weighted feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    #[serde(default)]
    pub demographic: BTreeMap<String, f64>,
    #[serde(default)]
    pub behavioral: BTreeMap<String, f64>,
    #[serde(default)]
    pub temporal: BTreeMap<String, f64>,
    #[serde(default)]
    pub engagement: BTreeMap<String, f64>,
    /// Rank tables keyed by categorical feature name
    #[serde(default)]
    pub ranks: BTreeMap<String, RankTable>,
    /// Saturation caps keyed by numeric feature name
    #[serde(default)]
    pub caps: BTreeMap<String, f64>,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        default_weights()
    }
}

impl FeatureWeights {
    /// An empty table (fails validation until populated)
    pub fn empty() -> Self {
        Self {
            demographic: BTreeMap::new(),
            behavioral: BTreeMap::new(),
            temporal: BTreeMap::new(),
            engagement: BTreeMap::new(),
            ranks: BTreeMap::new(),
            caps: BTreeMap::new(),
        }
    }

    /// Weight table for one category
    pub fn table(&self, category: FeatureCategory) -> &BTreeMap<String, f64> {
        match category {
            FeatureCategory::Demographic => &self.demographic,
            FeatureCategory::Behavioral => &self.behavioral,
            FeatureCategory::Temporal => &self.temporal,
            FeatureCategory::Engagement => &self.engagement,
        }
    }

    fn table_mut(&mut self, category: FeatureCategory) -> &mut BTreeMap<String, f64> {
        match category {
            FeatureCategory::Demographic => &mut self.demographic,
            FeatureCategory::Behavioral => &mut self.behavioral,
            FeatureCategory::Temporal => &mut self.temporal,
            FeatureCategory::Engagement => &mut self.engagement,
        }
    }

    /// Weight of a feature by name
    pub fn weight(&self, feature: &str) -> Option<f64> {
        let entry = descriptor(feature)?;
        self.table(entry.category).get(feature).copied()
    }

    /// Rank of a category label for a categorical feature
    pub fn rank(&self, feature: &str, label: &str) -> Option<f64> {
        self.ranks.get(feature)?.get(label).copied()
    }

    /// Saturation cap of a numeric feature
    pub fn cap(&self, feature: &str) -> Option<f64> {
        self.caps.get(feature).copied()
    }

    /// Set the weight of a catalog feature
    pub fn set_weight(&mut self, feature: &str, weight: f64) -> Result<(), ConfigError> {
        let entry = descriptor(feature).ok_or_else(|| ConfigError::UnknownFeature {
            section: "weights".to_string(),
            feature: feature.to_string(),
        })?;
        self.table_mut(entry.category)
            .insert(feature.to_string(), weight);
        Ok(())
    }

    /// Merge a partial override on top of this table
    pub fn apply(&mut self, overrides: &WeightOverrides) -> Result<(), ConfigError> {
        for (feature, weight) in &overrides.weights {
            self.set_weight(feature, *weight)?;
        }
        for (feature, ranks) in &overrides.ranks {
            let table = self.ranks.entry(feature.clone()).or_default();
            for (label, rank) in ranks {
                table.insert(label.clone(), *rank);
            }
        }
        for (feature, cap) in &overrides.caps {
            self.caps.insert(feature.clone(), *cap);
        }
        Ok(())
    }

    /// Check the table against the feature catalog
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in FeatureCategory::ALL {
            let table = self.table(category);

            for entry in descriptors_for(category) {
                let weight = table.get(entry.name).ok_or_else(|| ConfigError::MissingWeight {
                    category: category.as_str().to_string(),
                    feature: entry.name.to_string(),
                })?;
                if !weight.is_finite() {
                    return Err(ConfigError::InvalidValue {
                        field: format!("weights.{}.{}", category.as_str(), entry.name),
                        message: format!("weight must be finite, got {}", weight),
                    });
                }
            }

            for feature in table.keys() {
                let known = descriptor(feature).is_some_and(|d| d.category == category);
                if !known {
                    return Err(ConfigError::UnknownFeature {
                        section: format!("weights.{}", category.as_str()),
                        feature: feature.clone(),
                    });
                }
            }
        }

        for entry in CATALOG {
            match entry.kind {
                FeatureKind::Flag => {}
                FeatureKind::Numeric => {
                    let cap = self.cap(entry.name).ok_or_else(|| ConfigError::MissingCap {
                        feature: entry.name.to_string(),
                    })?;
                    if !cap.is_finite() || cap <= 0.0 {
                        return Err(ConfigError::InvalidValue {
                            field: format!("caps.{}", entry.name),
                            message: format!("cap must be positive and finite, got {}", cap),
                        });
                    }
                }
                FeatureKind::Categorical(labels) => {
                    self.validate_ranks(entry.name, labels)?;
                }
            }
        }

        for feature in self.ranks.keys() {
            let categorical = descriptor(feature)
                .is_some_and(|d| matches!(d.kind, FeatureKind::Categorical(_)));
            if !categorical {
                return Err(ConfigError::UnknownFeature {
                    section: "ranks".to_string(),
                    feature: feature.clone(),
                });
            }
        }

        for feature in self.caps.keys() {
            let numeric = descriptor(feature).is_some_and(|d| d.kind == FeatureKind::Numeric);
            if !numeric {
                return Err(ConfigError::UnknownFeature {
                    section: "caps".to_string(),
                    feature: feature.clone(),
                });
            }
        }

        Ok(())
    }

    fn validate_ranks(&self, feature: &str, labels: &[&str]) -> Result<(), ConfigError> {
        let table = self
            .ranks
            .get(feature)
            .ok_or_else(|| ConfigError::MissingRank {
                feature: feature.to_string(),
                category: labels.join(", "),
            })?;

        for label in labels {
            let rank = table.get(*label).ok_or_else(|| ConfigError::MissingRank {
                feature: feature.to_string(),
                category: label.to_string(),
            })?;
            if !rank.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: format!("ranks.{}.{}", feature, label),
                    message: format!("rank must be finite, got {}", rank),
                });
            }
        }

        if let Some(extra) = table.keys().find(|k| !labels.contains(&k.as_str())) {
            return Err(ConfigError::UnknownFeature {
                section: format!("ranks.{}", feature),
                feature: extra.clone(),
            });
        }

        Ok(())
    }
}

/// Partial weight table applied over the defaults (per tenant or experiment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightOverrides {
    /// Feature name -> weight
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub ranks: BTreeMap<String, RankTable>,
    #[serde(default)]
    pub caps: BTreeMap<String, f64>,
}

fn table(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Built-in weight table
///
/// Stale leads are penalized through negative weights on lead age, days
/// since last activity and reply latency.
pub fn default_weights() -> FeatureWeights {
    let demographic = table(&[
        ("has_company", 5.0),
        ("has_title", 3.0),
        ("has_phone", 4.0),
        ("email_domain_type", 3.0),
        ("title_seniority", 10.0),
        ("company_size_estimate", 2.0),
        ("email_domain", 0.0),
    ]);

    let behavioral = table(&[
        ("email_open_count", 1.0),
        ("email_click_count", 3.0),
        ("page_view_count", 0.5),
        ("form_submit_count", 8.0),
        ("meeting_count", 12.0),
        ("call_count", 6.0),
        ("total_activities", 0.2),
        ("activity_velocity", 4.0),
        ("channel_diversity", 2.0),
        ("high_value_action_count", 3.0),
    ]);

    let temporal = table(&[
        ("days_since_created", -0.02),
        ("days_since_last_activity", -0.15),
        ("recency_score", 0.2),
        ("activity_burst", 5.0),
        ("day_pattern", 1.0),
        ("time_pattern", 1.0),
    ]);

    let engagement = table(&[
        ("total_engagement_score", 0.15),
        ("email_open_rate", 5.0),
        ("email_click_rate", 8.0),
        ("sequence_engagement", 5.0),
        ("avg_response_time", -0.02),
        ("current_sequence_step", 0.5),
    ]);

    let mut ranks = BTreeMap::new();
    ranks.insert(
        "email_domain_type".to_string(),
        table(&[
            ("corporate", 3.0),
            ("government", 2.0),
            ("edu", 1.0),
            ("free", 0.5),
            ("unknown", 0.0),
        ]),
    );
    ranks.insert(
        "title_seniority".to_string(),
        table(&[
            ("c_level", 4.0),
            ("vp", 3.0),
            ("director", 2.0),
            ("manager", 1.0),
            ("individual", 0.5),
            ("unknown", 0.0),
        ]),
    );
    ranks.insert(
        "company_size_estimate".to_string(),
        table(&[
            ("enterprise", 4.0),
            ("mid_market", 3.0),
            ("smb", 2.0),
            ("startup", 1.0),
            ("unknown", 0.0),
        ]),
    );
    ranks.insert(
        "day_pattern".to_string(),
        table(&[
            ("weekday", 2.0),
            ("mixed", 1.5),
            ("weekend", 1.0),
            ("unknown", 0.0),
        ]),
    );
    ranks.insert(
        "time_pattern".to_string(),
        table(&[
            ("business_hours", 2.0),
            ("mixed", 1.5),
            ("after_hours", 1.0),
            ("unknown", 0.0),
        ]),
    );

    let caps = table(&[
        ("email_open_count", 20.0),
        ("email_click_count", 10.0),
        ("page_view_count", 50.0),
        ("form_submit_count", 5.0),
        ("meeting_count", 3.0),
        ("call_count", 5.0),
        ("total_activities", 100.0),
        ("activity_velocity", 5.0),
        ("channel_diversity", 7.0),
        ("high_value_action_count", 10.0),
        ("days_since_created", 365.0),
        ("days_since_last_activity", 90.0),
        ("recency_score", 100.0),
        ("total_engagement_score", 100.0),
        ("email_open_rate", 1.0),
        ("email_click_rate", 1.0),
        ("sequence_engagement", 1.0),
        ("avg_response_time", 168.0),
        ("current_sequence_step", 10.0),
    ]);

    FeatureWeights {
        demographic,
        behavioral,
        temporal,
        engagement,
        ranks,
        caps,
    }
}
