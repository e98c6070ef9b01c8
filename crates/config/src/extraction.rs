//! Feature extraction configuration
//!
//! Classification lists and constants used by the feature extractor. All
//! of it can be overridden from settings files or environment variables.

use lead_scoring_core::MessageIntent;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Domains classified as free mail
    pub free_mail_domains: Vec<String>,
    /// Suffixes classified as educational (".edu" also matches ".edu.au")
    pub edu_suffixes: Vec<String>,
    /// Suffixes classified as government
    pub government_suffixes: Vec<String>,
    pub seniority_keywords: SeniorityKeywords,
    pub company_size: CompanySizeThresholds,
    /// Recency score halves every this many days
    pub recency_half_life_days: f64,
    pub burst: BurstConfig,
    pub business_hours: BusinessHours,
    pub engagement_mix: EngagementMix,
    pub text: TextKeywords,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            free_mail_domains: strings(&[
                "gmail.com",
                "googlemail.com",
                "yahoo.com",
                "hotmail.com",
                "outlook.com",
                "live.com",
                "aol.com",
                "icloud.com",
                "me.com",
                "protonmail.com",
                "proton.me",
                "gmx.com",
                "mail.com",
                "yandex.com",
                "zoho.com",
                "rediffmail.com",
            ]),
            edu_suffixes: strings(&[".edu", ".ac.uk", ".ac.in"]),
            government_suffixes: strings(&[".gov", ".mil", ".gov.uk", ".gov.in", ".nic.in"]),
            seniority_keywords: SeniorityKeywords::default(),
            company_size: CompanySizeThresholds::default(),
            recency_half_life_days: 7.0,
            burst: BurstConfig::default(),
            business_hours: BusinessHours::default(),
            engagement_mix: EngagementMix::default(),
            text: TextKeywords::default(),
        }
    }
}

impl ExtractionConfig {
    /// Validate extractor constants
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.recency_half_life_days.is_finite() || self.recency_half_life_days <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.recency_half_life_days".to_string(),
                message: format!("Must be positive, got {}", self.recency_half_life_days),
            });
        }

        if self.burst.window_hours <= 0 || self.burst.window_hours > MAX_BURST_WINDOW_HOURS {
            return Err(ConfigError::InvalidValue {
                field: "extraction.burst.window_hours".to_string(),
                message: format!(
                    "Must be in 1..={}, got {}",
                    MAX_BURST_WINDOW_HOURS, self.burst.window_hours
                ),
            });
        }

        if self.burst.min_events < 2 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.burst.min_events".to_string(),
                message: format!("Must be at least 2, got {}", self.burst.min_events),
            });
        }

        let hours = &self.business_hours;
        if hours.start_hour >= hours.end_hour || hours.end_hour > 24 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.business_hours".to_string(),
                message: format!(
                    "Need start < end <= 24, got {}..{}",
                    hours.start_hour, hours.end_hour
                ),
            });
        }

        let size = &self.company_size;
        if !(size.enterprise > size.mid_market
            && size.mid_market > size.smb
            && size.smb > size.startup
            && size.startup >= 1)
        {
            return Err(ConfigError::InvalidValue {
                field: "extraction.company_size".to_string(),
                message: "Thresholds must be strictly descending from enterprise to startup (>= 1)"
                    .to_string(),
            });
        }

        self.engagement_mix.validate()?;

        Ok(())
    }
}

/// Title keywords per seniority tier, matched as whole words
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeniorityKeywords {
    pub c_level: Vec<String>,
    pub vp: Vec<String>,
    pub director: Vec<String>,
    pub manager: Vec<String>,
}

impl Default for SeniorityKeywords {
    fn default() -> Self {
        Self {
            // "president" is left out so "Vice President" cannot match c-level first
            c_level: strings(&[
                "chief", "ceo", "cto", "cfo", "coo", "cmo", "cio", "ciso", "cro", "founder",
                "business owner", "co-owner", "managing partner",
            ]),
            vp: strings(&["vice president", "vp", "svp", "evp", "avp"]),
            director: strings(&["director", "head of", "head"]),
            manager: strings(&["manager", "lead", "supervisor", "team lead"]),
        }
    }
}

/// Minimum employee count per company size bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySizeThresholds {
    pub enterprise: u32,
    pub mid_market: u32,
    pub smb: u32,
    pub startup: u32,
}

impl Default for CompanySizeThresholds {
    fn default() -> Self {
        Self {
            enterprise: 1000,
            mid_market: 100,
            smb: 10,
            startup: 1,
        }
    }
}

/// Largest accepted burst window (one year)
pub const MAX_BURST_WINDOW_HOURS: i64 = 24 * 365;

/// Activity burst detection window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstConfig {
    pub window_hours: i64,
    pub min_events: usize,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            min_events: 3,
        }
    }
}

/// Local business hours, `[start_hour, end_hour)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// Points each engagement signal adds to `total_engagement_score`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMix {
    pub open_rate: f64,
    pub click_rate: f64,
    pub sequence: f64,
    pub responsiveness: f64,
    /// Reply latency at which responsiveness reaches zero
    pub response_horizon_hours: f64,
}

impl Default for EngagementMix {
    fn default() -> Self {
        Self {
            open_rate: 30.0,
            click_rate: 30.0,
            sequence: 25.0,
            responsiveness: 15.0,
            response_horizon_hours: 168.0,
        }
    }
}

impl EngagementMix {
    fn validate(&self) -> Result<(), ConfigError> {
        let parts = [
            ("open_rate", self.open_rate),
            ("click_rate", self.click_rate),
            ("sequence", self.sequence),
            ("responsiveness", self.responsiveness),
        ];
        for (name, value) in parts {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("extraction.engagement_mix.{}", name),
                    message: format!("Must be non-negative, got {}", value),
                });
            }
        }

        if !self.response_horizon_hours.is_finite() || self.response_horizon_hours <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "extraction.engagement_mix.response_horizon_hours".to_string(),
                message: format!("Must be positive, got {}", self.response_horizon_hours),
            });
        }

        Ok(())
    }
}

/// Keyword lists for the built-in text analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextKeywords {
    pub urgency_high: Vec<String>,
    pub urgency_medium: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Checked in order; first intent with a matching keyword wins
    pub intents: Vec<IntentKeywords>,
    pub topics: Vec<TopicKeywords>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentKeywords {
    pub intent: MessageIntent,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicKeywords {
    pub tag: String,
    pub keywords: Vec<String>,
}

impl Default for TextKeywords {
    fn default() -> Self {
        let intent = |intent, keywords: &[&str]| IntentKeywords {
            intent,
            keywords: strings(keywords),
        };
        let topic = |tag: &str, keywords: &[&str]| TopicKeywords {
            tag: tag.to_string(),
            keywords: strings(keywords),
        };

        Self {
            urgency_high: strings(&["urgent", "asap", "immediately", "today", "right away"]),
            urgency_medium: strings(&["soon", "this week", "this month", "quickly", "deadline"]),
            positive: strings(&[
                "interested", "great", "excited", "love", "perfect", "thanks", "looking forward",
            ]),
            negative: strings(&[
                "not interested", "unhappy", "disappointed", "expensive", "too much", "cancel",
                "stop",
            ]),
            intents: vec![
                intent(MessageIntent::Unsubscribe, &["unsubscribe", "remove me", "opt out"]),
                intent(MessageIntent::Purchase, &["buy", "purchase", "sign up", "contract", "order"]),
                intent(MessageIntent::DemoRequest, &["demo", "walkthrough", "trial"]),
                intent(MessageIntent::PricingInquiry, &["price", "pricing", "quote", "cost"]),
                intent(MessageIntent::Support, &["help", "issue", "problem", "support", "broken"]),
                intent(MessageIntent::Information, &["information", "details", "brochure", "learn more"]),
            ],
            topics: vec![
                topic("pricing", &["price", "pricing", "cost", "budget", "quote"]),
                topic("integration", &["integration", "api", "connect", "sync"]),
                topic("security", &["security", "compliance", "gdpr", "sso"]),
                topic("onboarding", &["onboarding", "training", "setup", "migration"]),
            ],
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
