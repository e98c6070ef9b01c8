//! Behavioral feature extraction

use std::collections::BTreeSet;

use lead_scoring_core::{Activity, ActivityType, BehavioralFeatures};

/// Count activities by type; `lead_age_days` drives the velocity
pub(crate) fn extract(activities: &[Activity], lead_age_days: i64) -> BehavioralFeatures {
    let mut features = BehavioralFeatures::default();
    let mut channels = BTreeSet::new();

    for activity in activities {
        let counter = match activity.activity_type {
            ActivityType::EmailOpen => Some(&mut features.email_open_count),
            ActivityType::EmailClick => Some(&mut features.email_click_count),
            ActivityType::PageView => Some(&mut features.page_view_count),
            ActivityType::FormSubmit => Some(&mut features.form_submit_count),
            ActivityType::Meeting => Some(&mut features.meeting_count),
            ActivityType::Call => Some(&mut features.call_count),
            ActivityType::Other => None,
        };
        if let Some(counter) = counter {
            *counter = counter.saturating_add(1);
        }
        channels.insert(activity.activity_type);
    }

    features.total_activities = u32::try_from(activities.len()).unwrap_or(u32::MAX);
    features.channel_diversity = channels.len() as u32;
    features.high_value_action_count = features
        .form_submit_count
        .saturating_add(features.email_click_count);
    features.activity_velocity = f64::from(features.total_activities) / lead_age_days.max(1) as f64;

    features
}
