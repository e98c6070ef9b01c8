//! Lead Scoring Configuration
//!
//! Loaded from a scoring file (YAML, JSON or TOML). Holds the default
//! weight table, named weight profiles applied over it, and the
//! qualification thresholds.
//!
//! ```yaml
//! qualification_thresholds:
//!   warm: 30
//!   hot: 60
//!   qualified: 80
//! profiles:
//!   enterprise_push:
//!     weights:
//!       company_size_estimate: 6.0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use lead_scoring_core::QualificationLevel;
use serde::{Deserialize, Serialize};

use crate::weights::{FeatureWeights, WeightOverrides};
use crate::ConfigError;

/// Scoring configuration loaded from scoring.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Qualification thresholds (score ranges)
    #[serde(default)]
    pub qualification_thresholds: QualificationThresholds,
    /// Default weight table
    #[serde(default)]
    pub weights: FeatureWeights,
    /// Named overrides (per tenant or experiment)
    #[serde(default)]
    pub profiles: BTreeMap<String, WeightOverrides>,
}

impl ScoringConfig {
    /// Load from a file; the format follows the extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileNotFound(format!("{}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("yaml")
            .to_lowercase();

        let config = match extension.as_str() {
            "json" => Self::from_json(&content)?,
            "toml" => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?
            }
            _ => Self::from_yaml(&content)?,
        };

        config.validate()?;
        tracing::info!(
            path = %path.display(),
            profiles = config.profiles.len(),
            "Loaded scoring configuration"
        );
        Ok(config)
    }

    /// Parse YAML without validating
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse JSON without validating
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate thresholds, the default table and every profile
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.qualification_thresholds.validate()?;
        self.weights.validate()?;

        for name in self.profiles.keys() {
            self.resolve_profile(Some(name))?;
        }

        let zeroed: Vec<&str> = lead_scoring_core::CATALOG
            .iter()
            .filter(|entry| self.weights.weight(entry.name) == Some(0.0))
            .map(|entry| entry.name)
            .collect();
        if !zeroed.is_empty() {
            tracing::debug!(features = ?zeroed, "Features carrying zero weight");
        }

        Ok(())
    }

    /// Weight table for a profile; `None` selects the defaults
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<FeatureWeights, ConfigError> {
        let mut weights = self.weights.clone();

        if let Some(name) = name {
            let overrides = self
                .profiles
                .get(name)
                .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;
            weights.apply(overrides)?;
            weights.validate().map_err(|e| ConfigError::InvalidValue {
                field: format!("profiles.{}", name),
                message: e.to_string(),
            })?;
        }

        Ok(weights)
    }

    /// Names of all configured profiles
    pub fn profile_names(&self) -> Vec<&str> {
        self.profiles.keys().map(|s| s.as_str()).collect()
    }

    /// Get qualification level from score
    pub fn qualification_level(&self, score: f64) -> QualificationLevel {
        self.qualification_thresholds.level(score)
    }
}

/// Minimum score for each qualification level above cold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationThresholds {
    pub warm: f64,
    pub hot: f64,
    pub qualified: f64,
}

impl Default for QualificationThresholds {
    fn default() -> Self {
        Self {
            warm: 30.0,
            hot: 60.0,
            qualified: 80.0,
        }
    }
}

impl QualificationThresholds {
    pub fn level(&self, score: f64) -> QualificationLevel {
        if score >= self.qualified {
            QualificationLevel::Qualified
        } else if score >= self.hot {
            QualificationLevel::Hot
        } else if score >= self.warm {
            QualificationLevel::Warm
        } else {
            QualificationLevel::Cold
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ascending = 0.0 < self.warm && self.warm < self.hot && self.hot < self.qualified;
        if !ascending || self.qualified > 100.0 {
            return Err(ConfigError::InvalidValue {
                field: "qualification_thresholds".to_string(),
                message: format!(
                    "Need 0 < warm < hot < qualified <= 100, got {}/{}/{}",
                    self.warm, self.hot, self.qualified
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_qualification_level() {
        let config = ScoringConfig::default();
        assert_eq!(config.qualification_level(0.0), QualificationLevel::Cold);
        assert_eq!(config.qualification_level(29.9), QualificationLevel::Cold);
        assert_eq!(config.qualification_level(30.0), QualificationLevel::Warm);
        assert_eq!(config.qualification_level(65.0), QualificationLevel::Hot);
        assert_eq!(config.qualification_level(100.0), QualificationLevel::Qualified);
    }

    #[test]
    fn test_thresholds_must_ascend() {
        let thresholds = QualificationThresholds {
            warm: 50.0,
            hot: 40.0,
            qualified: 80.0,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn test_yaml_profiles() {
        let yaml = r#"
qualification_thresholds:
  warm: 25
  hot: 50
  qualified: 75
profiles:
  enterprise_push:
    weights:
      company_size_estimate: 6.0
    ranks:
      company_size_estimate:
        startup: 0.0
"#;
        let config = ScoringConfig::from_yaml(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.qualification_thresholds.hot, 50.0);
        assert_eq!(config.profile_names(), vec!["enterprise_push"]);

        let weights = config.resolve_profile(Some("enterprise_push")).unwrap();
        assert_eq!(weights.weight("company_size_estimate"), Some(6.0));
        assert_eq!(weights.rank("company_size_estimate", "startup"), Some(0.0));
        assert_eq!(weights.weight("has_company"), Some(5.0));

        let defaults = config.resolve_profile(None).unwrap();
        assert_eq!(defaults.weight("company_size_estimate"), Some(2.0));
    }

    #[test]
    fn test_unknown_profile() {
        let config = ScoringConfig::default();
        assert!(matches!(
            config.resolve_profile(Some("missing")),
            Err(ConfigError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_invalid_profile_fails_validation() {
        let yaml = r#"
profiles:
  broken:
    caps:
      page_view_count: -5
"#;
        let config = ScoringConfig::from_yaml(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_explicit_weights_must_be_complete() {
        let yaml = r#"
weights:
  demographic:
    has_company: 5.0
"#;
        let config = ScoringConfig::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingWeight { .. })
        ));
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "qualification_thresholds:\n  warm: 20\n  hot: 50\n  qualified: 90").unwrap();

        let config = ScoringConfig::load(file.path()).unwrap();
        assert_eq!(config.qualification_thresholds.warm, 20.0);
        assert_eq!(config.weights, FeatureWeights::default());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[profiles.slow_burn.weights]\nrecency_score = 0.05").unwrap();

        let config = ScoringConfig::load(file.path()).unwrap();
        let weights = config.resolve_profile(Some("slow_burn")).unwrap();
        assert_eq!(weights.weight("recency_score"), Some(0.05));
    }

    #[test]
    fn test_load_json_rejects_bad_config() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"qualification_thresholds": {{"warm": 90, "hot": 60, "qualified": 80}}}}"#
        )
        .unwrap();

        assert!(ScoringConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            ScoringConfig::load("/nonexistent/scoring.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
