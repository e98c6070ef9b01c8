//! Lead Feature Extractor
//!
//! Derives a [`LeadFeatures`] snapshot from a [`LeadRecord`] at an
//! evaluation instant. Extraction never fails: missing or malformed fields
//! degrade to `unknown`, `false`, `0` or null. Only building the extractor
//! can fail, when a configured keyword list does not compile.

mod behavioral;
mod demographic;
mod engagement;
mod temporal;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lead_scoring_config::ExtractionConfig;
use lead_scoring_core::{LeadFeatures, LeadRecord, TextAnalyzer};

use crate::ScoringError;
use demographic::DemographicRules;
use temporal::{TemporalInput, TemporalRules};

/// Builds feature snapshots from lead records
#[derive(Clone)]
pub struct LeadFeatureExtractor {
    config: ExtractionConfig,
    demographic: DemographicRules,
    text_analyzer: Option<Arc<dyn TextAnalyzer>>,
}

impl fmt::Debug for LeadFeatureExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadFeatureExtractor")
            .field("config", &self.config)
            .field(
                "text_analyzer",
                &self.text_analyzer.as_ref().map(|a| a.name().to_string()),
            )
            .finish()
    }
}

impl LeadFeatureExtractor {
    /// Create an extractor without text analysis
    pub fn new(config: ExtractionConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        let demographic = DemographicRules::new(&config)?;

        Ok(Self {
            config,
            demographic,
            text_analyzer: None,
        })
    }

    /// Attach a text analyzer
    pub fn with_text_analyzer(mut self, analyzer: Arc<dyn TextAnalyzer>) -> Self {
        self.text_analyzer = Some(analyzer);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Name of the attached text analyzer, if any
    pub fn text_analyzer_name(&self) -> Option<&str> {
        self.text_analyzer.as_deref().map(|a| a.name())
    }

    /// Extract all features of a lead as of `now`
    pub fn extract(&self, lead: &LeadRecord, now: DateTime<Utc>) -> LeadFeatures {
        let timestamps: Vec<DateTime<Utc>> =
            lead.activities.iter().filter_map(|a| a.occurred_at).collect();

        // Lead age falls back to the earliest activity when created_at is absent
        let lead_age_days = lead
            .profile
            .created_at
            .or_else(|| timestamps.iter().min().copied())
            .map_or(0, |created| temporal::whole_days(now, created));

        let demographic = self.demographic.extract(&lead.profile);
        let behavioral = behavioral::extract(&lead.activities, lead_age_days);
        let temporal = temporal::extract(
            &TemporalInput {
                timestamps: &timestamps,
                lead_age_days,
                offset: lead.profile.utc_offset(),
                now,
            },
            &TemporalRules {
                half_life_days: self.config.recency_half_life_days,
                burst: &self.config.burst,
                business_hours: &self.config.business_hours,
            },
        );
        let engagement =
            engagement::extract(&lead.engagement, &behavioral, &self.config.engagement_mix);
        let text = self.analyze_text(lead);

        LeadFeatures {
            demographic,
            behavioral,
            temporal,
            engagement,
            text,
        }
    }

    fn analyze_text(&self, lead: &LeadRecord) -> lead_scoring_core::TextFeatures {
        let Some(analyzer) = self.text_analyzer.as_deref() else {
            return Default::default();
        };

        match analyzer.analyze(&lead.messages) {
            Some(text) => text,
            None => {
                if !lead.messages.is_empty() {
                    tracing::debug!(
                        analyzer = analyzer.name(),
                        lead_id = ?lead.profile.id,
                        "Text analyzer returned nothing, using default text features"
                    );
                }
                Default::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use lead_scoring_core::{
        Activity, ActivityType, DayPattern, EmailDomainType, LeadProfile, MessageIntent,
        TextFeatures, TitleSeniority, NO_ACTIVITY_DAYS,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 12, 0, 0).unwrap()
    }

    fn extractor() -> LeadFeatureExtractor {
        LeadFeatureExtractor::new(ExtractionConfig::default()).unwrap()
    }

    struct FixedAnalyzer(Option<TextFeatures>);

    impl TextAnalyzer for FixedAnalyzer {
        fn analyze(&self, _messages: &[String]) -> Option<TextFeatures> {
            self.0.clone()
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_empty_record_degrades_to_defaults() {
        let features = extractor().extract(&LeadRecord::default(), now());

        assert_eq!(features.demographic.email_domain_type, EmailDomainType::Unknown);
        assert_eq!(features.demographic.title_seniority, TitleSeniority::Unknown);
        assert_eq!(features.behavioral.total_activities, 0);
        assert_eq!(features.temporal.days_since_created, 0);
        assert_eq!(features.temporal.days_since_last_activity, NO_ACTIVITY_DAYS);
        assert!(!features.temporal.activity_burst);
        assert_eq!(features.temporal.day_pattern, DayPattern::Unknown);
        assert_eq!(features.engagement.avg_response_time, None);
        assert!(features.text.is_empty());
    }

    #[test]
    fn test_full_record() {
        let created = now() - Duration::days(10);
        let lead = LeadRecord::new(LeadProfile {
            company: Some("Acme".to_string()),
            title: Some("VP Operations".to_string()),
            email: Some("jo@acme.io".to_string()),
            created_at: Some(created),
            ..Default::default()
        })
        .with_activities(vec![
            Activity::new(ActivityType::PageView, now() - Duration::hours(30)),
            Activity::new(ActivityType::FormSubmit, now() - Duration::hours(28)),
            Activity::new(ActivityType::EmailClick, now() - Duration::hours(26)),
            Activity::untimed(ActivityType::EmailOpen),
        ]);

        let features = extractor().extract(&lead, now());

        assert!(features.demographic.has_company);
        assert_eq!(features.demographic.title_seniority, TitleSeniority::Vp);
        assert_eq!(features.behavioral.total_activities, 4);
        assert!((features.behavioral.activity_velocity - 0.4).abs() < 1e-9);
        assert_eq!(features.temporal.days_since_created, 10);
        assert_eq!(features.temporal.days_since_last_activity, 1);
        assert!(features.temporal.activity_burst);
        assert!((features.engagement.email_click_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_lead_age_falls_back_to_earliest_activity() {
        let lead = LeadRecord::default().with_activities(vec![
            Activity::new(ActivityType::Call, now() - Duration::days(4)),
            Activity::new(ActivityType::Call, now() - Duration::days(2)),
        ]);

        let features = extractor().extract(&lead, now());
        assert_eq!(features.temporal.days_since_created, 4);
        assert!((features.behavioral.activity_velocity - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_text_analyzer_is_optional() {
        let lead = LeadRecord::default().with_messages(vec!["Can we get a demo?".to_string()]);

        let silent = extractor().with_text_analyzer(Arc::new(FixedAnalyzer(None)));
        assert!(silent.extract(&lead, now()).text.is_empty());

        let text = TextFeatures {
            intent: Some(MessageIntent::DemoRequest),
            has_message: true,
            message_length: 18,
            ..Default::default()
        };
        let analyzing = extractor().with_text_analyzer(Arc::new(FixedAnalyzer(Some(text.clone()))));
        assert_eq!(analyzing.text_analyzer_name(), Some("fixed"));
        assert_eq!(analyzing.extract(&lead, now()).text, text);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = ExtractionConfig::default();
        config.recency_half_life_days = -1.0;
        assert!(LeadFeatureExtractor::new(config).is_err());

        let mut config = ExtractionConfig::default();
        config.burst.window_hours = 1_000_000_000_000_000;
        assert!(LeadFeatureExtractor::new(config).is_err());
    }
}
