//! Engagement feature extraction from sequence metrics

use lead_scoring_config::EngagementMix;
use lead_scoring_core::{BehavioralFeatures, EngagementFeatures, SequenceEngagement};

pub(crate) fn extract(
    sequence: &SequenceEngagement,
    behavioral: &BehavioralFeatures,
    mix: &EngagementMix,
) -> EngagementFeatures {
    let email_open_rate = rate(behavioral.email_open_count, sequence.emails_sent);
    let email_click_rate = rate(behavioral.email_click_count, behavioral.email_open_count);
    let sequence_engagement = rate(sequence.steps_completed, sequence.total_steps);
    let avg_response_time = mean_latency(&sequence.response_latencies_hours);

    let responsiveness = avg_response_time
        .map_or(0.0, |hours| (1.0 - hours / mix.response_horizon_hours).clamp(0.0, 1.0));

    let total = mix.open_rate * email_open_rate
        + mix.click_rate * email_click_rate
        + mix.sequence * sequence_engagement
        + mix.responsiveness * responsiveness;

    EngagementFeatures {
        total_engagement_score: if total.is_finite() {
            total.clamp(0.0, 100.0)
        } else {
            0.0
        },
        email_open_rate,
        email_click_rate,
        sequence_engagement,
        avg_response_time,
        current_sequence_step: sequence.current_step,
    }
}

/// `numerator / denominator` clamped to [0, 1]; 0 for a zero denominator
fn rate(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (f64::from(numerator) / f64::from(denominator)).clamp(0.0, 1.0)
}

/// Mean of the usable (finite, non-negative) latencies
fn mean_latency(latencies: &[f64]) -> Option<f64> {
    let usable: Vec<f64> = latencies
        .iter()
        .copied()
        .filter(|h| h.is_finite() && *h >= 0.0)
        .collect();

    if usable.is_empty() {
        None
    } else {
        Some(usable.iter().sum::<f64>() / usable.len() as f64)
    }
}
