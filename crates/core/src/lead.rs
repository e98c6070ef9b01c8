//! Lead input records
//!
//! These are the shapes handed over by the CRM data-access layer. Every
//! field is optional so partially populated leads deserialize cleanly; the
//! extractor decides how missing data degrades.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lenient;

static UTC_OFFSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i:utc|gmt)?\s*([+-])(\d{1,2})(?::?(\d{2}))?$").unwrap());

/// Lead profile as stored by the CRM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadProfile {
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub created_at: Option<DateTime<Utc>>,
    /// Declared timezone as a UTC offset ("+05:30", "UTC-8", "Z")
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub timezone: Option<String>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub employee_count: Option<u32>,
}

impl LeadProfile {
    /// Offset used to localize activity timestamps.
    ///
    /// Falls back to UTC when the lead has no timezone or it cannot be parsed.
    pub fn utc_offset(&self) -> FixedOffset {
        self.timezone
            .as_deref()
            .and_then(parse_utc_offset)
            .unwrap_or_else(utc)
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Parse a declared timezone into a fixed offset
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if ["utc", "gmt", "z"].contains(&raw.to_lowercase().as_str()) {
        return Some(utc());
    }

    let caps = UTC_OFFSET.captures(raw)?;
    let hours: i32 = caps.get(2)?.as_str().parse().ok()?;
    let minutes: i32 = caps
        .get(3)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(0);
    if hours > 14 || minutes > 59 {
        return None;
    }

    let seconds = hours * 3600 + minutes * 60;
    match caps.get(1)?.as_str() {
        "-" => FixedOffset::west_opt(seconds),
        _ => FixedOffset::east_opt(seconds),
    }
}

/// Kind of tracked lead activity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    EmailOpen,
    EmailClick,
    PageView,
    FormSubmit,
    Meeting,
    Call,
    /// Anything the CRM tracks that scoring has no dedicated counter for
    #[default]
    #[serde(other)]
    Other,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::EmailOpen => "email_open",
            ActivityType::EmailClick => "email_click",
            ActivityType::PageView => "page_view",
            ActivityType::FormSubmit => "form_submit",
            ActivityType::Meeting => "meeting",
            ActivityType::Call => "call",
            ActivityType::Other => "other",
        }
    }
}

/// A timestamped lead activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(
        rename = "type",
        alias = "activity_type",
        default,
        deserialize_with = "lenient::default_on_error"
    )]
    pub activity_type: ActivityType,
    /// Missing or unparseable timestamps still count toward totals but not
    /// toward timing features
    #[serde(default, deserialize_with = "lenient::default_on_error")]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn new(activity_type: ActivityType, occurred_at: DateTime<Utc>) -> Self {
        Self {
            activity_type,
            occurred_at: Some(occurred_at),
        }
    }

    pub fn untimed(activity_type: ActivityType) -> Self {
        Self {
            activity_type,
            occurred_at: None,
        }
    }
}

/// Outreach sequence metrics for a lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceEngagement {
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub emails_sent: u32,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub steps_completed: u32,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub total_steps: u32,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub current_step: Option<u32>,
    /// Observed reply latencies in hours
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub response_latencies_hours: Vec<f64>,
}

/// Everything the scorer needs to know about one lead
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadRecord {
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub profile: LeadProfile,
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "lenient::default_on_error")]
    pub engagement: SequenceEngagement,
    /// Free-text messages from the lead (forms, replies)
    #[serde(deserialize_with = "lenient::skip_invalid")]
    pub messages: Vec<String>,
}

impl LeadRecord {
    pub fn new(profile: LeadProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn with_activities(mut self, activities: Vec<Activity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_engagement(mut self, engagement: SequenceEngagement) -> Self {
        self.engagement = engagement;
        self
    }

    pub fn with_messages(mut self, messages: Vec<String>) -> Self {
        self.messages = messages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("UTC"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("+05:30"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("-0800"), FixedOffset::west_opt(8 * 3600));
        assert_eq!(parse_utc_offset("UTC+2"), FixedOffset::east_opt(2 * 3600));
        assert_eq!(parse_utc_offset("GMT-03:00"), FixedOffset::west_opt(3 * 3600));
    }

    #[test]
    fn test_parse_utc_offset_rejects_garbage() {
        assert!(parse_utc_offset("").is_none());
        assert!(parse_utc_offset("America/New_York").is_none());
        assert!(parse_utc_offset("+25:00").is_none());
        assert!(parse_utc_offset("+05:75").is_none());
    }

    #[test]
    fn test_profile_offset_defaults_to_utc() {
        let profile = LeadProfile {
            timezone: Some("not a zone".to_string()),
            ..Default::default()
        };
        assert_eq!(profile.utc_offset().local_minus_utc(), 0);
        assert_eq!(LeadProfile::default().utc_offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_lead_record_deserializes_partial_input() {
        let json = r#"{
            "profile": { "email": "jane@acme.io" },
            "activities": [
                { "type": "form_submit", "occurred_at": "2024-03-04T10:00:00Z" },
                { "type": "webinar" }
            ]
        }"#;
        let record: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.profile.email.as_deref(), Some("jane@acme.io"));
        assert!(record.profile.company.is_none());
        assert_eq!(record.activities[0].activity_type, ActivityType::FormSubmit);
        assert_eq!(record.activities[1].activity_type, ActivityType::Other);
        assert!(record.activities[1].occurred_at.is_none());
        assert_eq!(record.engagement, SequenceEngagement::default());
    }

    #[test]
    fn test_malformed_fields_degrade_to_defaults() {
        let json = r#"{
            "profile": {
                "email": "jane@acme.io",
                "created_at": "last tuesday",
                "employee_count": "250",
                "phone": 4155550100
            },
            "activities": [
                { "type": "meeting", "occurred_at": "yesterday" },
                { "type": 7, "occurred_at": "2024-03-04T10:00:00Z" },
                "not an activity",
                { "occurred_at": "2024-03-05T10:00:00Z" }
            ],
            "engagement": { "emails_sent": -3, "total_steps": 6, "response_latencies_hours": [4.5, "n/a", 12] },
            "messages": ["Need pricing", 42]
        }"#;
        let record: LeadRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.profile.email.as_deref(), Some("jane@acme.io"));
        assert!(record.profile.created_at.is_none());
        assert!(record.profile.employee_count.is_none());
        assert!(record.profile.phone.is_none());

        assert_eq!(record.activities.len(), 3);
        assert_eq!(record.activities[0].activity_type, ActivityType::Meeting);
        assert!(record.activities[0].occurred_at.is_none());
        assert_eq!(record.activities[1].activity_type, ActivityType::Other);
        assert!(record.activities[1].occurred_at.is_some());
        assert_eq!(record.activities[2].activity_type, ActivityType::Other);

        assert_eq!(record.engagement.emails_sent, 0);
        assert_eq!(record.engagement.total_steps, 6);
        assert_eq!(record.engagement.response_latencies_hours, vec![4.5, 12.0]);
        assert_eq!(record.messages, vec!["Need pricing".to_string()]);
    }

    #[test]
    fn test_wrongly_shaped_sections_become_empty() {
        let json = r#"{ "profile": "acme", "activities": {}, "engagement": [], "messages": null }"#;
        let record: LeadRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, LeadRecord::default());
    }
}
