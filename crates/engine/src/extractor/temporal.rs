//! Temporal feature extraction: lead age, recency, bursts and activity timing

use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike, Utc, Weekday};
use lead_scoring_config::{BurstConfig, BusinessHours};
use lead_scoring_core::{DayPattern, TemporalFeatures, TimePattern, NO_ACTIVITY_DAYS};

pub(crate) struct TemporalInput<'a> {
    /// Activity timestamps, in input order
    pub timestamps: &'a [DateTime<Utc>],
    pub lead_age_days: i64,
    pub offset: FixedOffset,
    pub now: DateTime<Utc>,
}

pub(crate) struct TemporalRules<'a> {
    pub half_life_days: f64,
    pub burst: &'a BurstConfig,
    pub business_hours: &'a BusinessHours,
}

pub(crate) fn extract(input: &TemporalInput<'_>, rules: &TemporalRules<'_>) -> TemporalFeatures {
    let days_since_last_activity = input
        .timestamps
        .iter()
        .max()
        .map_or(NO_ACTIVITY_DAYS, |last| whole_days(input.now, *last));

    TemporalFeatures {
        days_since_created: input.lead_age_days,
        days_since_last_activity,
        recency_score: recency_score(days_since_last_activity, rules.half_life_days),
        activity_burst: has_burst(input.timestamps, rules.burst),
        day_pattern: day_pattern(input.timestamps, input.offset),
        time_pattern: time_pattern(input.timestamps, input.offset, rules.business_hours),
    }
}

/// Whole days from `earlier` to `now`; future timestamps count as today
pub(crate) fn whole_days(now: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (now - earlier).num_days().max(0)
}

/// `100 * 0.5^(days / half_life)`, clamped to [0, 100]
pub(crate) fn recency_score(days: i64, half_life_days: f64) -> f64 {
    let score = 100.0 * 0.5_f64.powf(days.max(0) as f64 / half_life_days);
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// True if some window shorter than `burst.window_hours` holds at least
/// `burst.min_events` timestamps.
///
/// Two-pointer scan; the input is only copied and sorted when it is not
/// already in time order.
pub(crate) fn has_burst(timestamps: &[DateTime<Utc>], burst: &BurstConfig) -> bool {
    if timestamps.len() < burst.min_events {
        return false;
    }

    let sorted;
    let ordered = if timestamps.windows(2).all(|w| w[0] <= w[1]) {
        timestamps
    } else {
        let mut copy = timestamps.to_vec();
        copy.sort_unstable();
        sorted = copy;
        &sorted[..]
    };

    let Some(window) = Duration::try_hours(burst.window_hours) else {
        tracing::warn!(
            window_hours = burst.window_hours,
            "Burst window out of range, burst detection skipped"
        );
        return false;
    };
    let mut left = 0;
    for right in 0..ordered.len() {
        while ordered[right] - ordered[left] >= window {
            left += 1;
        }
        if right - left + 1 >= burst.min_events {
            return true;
        }
    }
    false
}

fn day_pattern(timestamps: &[DateTime<Utc>], offset: FixedOffset) -> DayPattern {
    let split = Split::of(timestamps.iter().map(|ts| {
        let weekday = ts.with_timezone(&offset).weekday();
        !matches!(weekday, Weekday::Sat | Weekday::Sun)
    }));

    match split {
        Split::Empty => DayPattern::Unknown,
        Split::AllTrue => DayPattern::Weekday,
        Split::AllFalse => DayPattern::Weekend,
        Split::Mixed => DayPattern::Mixed,
    }
}

fn time_pattern(
    timestamps: &[DateTime<Utc>],
    offset: FixedOffset,
    hours: &BusinessHours,
) -> TimePattern {
    let split = Split::of(timestamps.iter().map(|ts| {
        let hour = ts.with_timezone(&offset).hour();
        hours.start_hour <= hour && hour < hours.end_hour
    }));

    match split {
        Split::Empty => TimePattern::Unknown,
        Split::AllTrue => TimePattern::BusinessHours,
        Split::AllFalse => TimePattern::AfterHours,
        Split::Mixed => TimePattern::Mixed,
    }
}

enum Split {
    Empty,
    AllTrue,
    AllFalse,
    Mixed,
}

impl Split {
    fn of(flags: impl Iterator<Item = bool>) -> Self {
        let (mut yes, mut no) = (0usize, 0usize);
        for flag in flags {
            if flag {
                yes += 1;
            } else {
                no += 1;
            }
        }
        match (yes, no) {
            (0, 0) => Split::Empty,
            (_, 0) => Split::AllTrue,
            (0, _) => Split::AllFalse,
            _ => Split::Mixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        // 2024-06-03 is a Monday
        Utc.with_ymd_and_hms(2024, 6, day, hour, minute, 0).unwrap()
    }

    fn burst() -> BurstConfig {
        BurstConfig::default()
    }

    #[test]
    fn test_recency_score() {
        assert!((recency_score(0, 7.0) - 100.0).abs() < 1e-9);
        assert!((recency_score(7, 7.0) - 50.0).abs() < 1e-9);
        assert!((recency_score(14, 7.0) - 25.0).abs() < 1e-9);
        assert!(recency_score(NO_ACTIVITY_DAYS, 7.0) < 1e-9);
    }

    #[test]
    fn test_burst_three_within_a_day() {
        let timestamps = vec![at(3, 9, 0), at(3, 15, 0), at(4, 8, 59)];
        assert!(has_burst(&timestamps, &burst()));
    }

    #[test]
    fn test_no_burst_when_a_day_apart() {
        let timestamps = vec![at(3, 9, 0), at(4, 9, 0), at(5, 9, 0), at(6, 9, 0)];
        assert!(!has_burst(&timestamps, &burst()));
    }

    #[test]
    fn test_window_is_exclusive_at_24_hours() {
        let timestamps = vec![at(3, 9, 0), at(3, 20, 0), at(4, 9, 0)];
        assert!(!has_burst(&timestamps, &burst()));
    }

    #[test]
    fn test_burst_on_unsorted_input() {
        let timestamps = vec![at(10, 12, 0), at(3, 9, 0), at(10, 13, 0), at(6, 9, 0), at(10, 11, 0)];
        assert!(has_burst(&timestamps, &burst()));
    }

    #[test]
    fn test_out_of_range_window_does_not_panic() {
        let timestamps = vec![at(3, 9, 0), at(3, 10, 0), at(3, 11, 0)];
        let huge = BurstConfig {
            window_hours: 1_000_000_000_000_000,
            min_events: 3,
        };
        assert!(!has_burst(&timestamps, &huge));
    }

    #[test]
    fn test_burst_needs_min_events() {
        assert!(!has_burst(&[], &burst()));
        assert!(!has_burst(&[at(3, 9, 0), at(3, 9, 1)], &burst()));
    }

    #[test]
    fn test_day_pattern() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(day_pattern(&[], utc), DayPattern::Unknown);
        assert_eq!(day_pattern(&[at(3, 10, 0), at(4, 10, 0)], utc), DayPattern::Weekday);
        assert_eq!(day_pattern(&[at(8, 10, 0), at(9, 10, 0)], utc), DayPattern::Weekend);
        assert_eq!(day_pattern(&[at(3, 10, 0), at(8, 10, 0)], utc), DayPattern::Mixed);
    }

    #[test]
    fn test_day_pattern_uses_lead_offset() {
        // Monday 02:00 UTC is still Sunday in UTC-5
        let new_york = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(day_pattern(&[at(3, 2, 0)], new_york), DayPattern::Weekend);
    }

    #[test]
    fn test_time_pattern() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let hours = BusinessHours::default();
        assert_eq!(time_pattern(&[], utc, &hours), TimePattern::Unknown);
        assert_eq!(
            time_pattern(&[at(3, 9, 0), at(3, 16, 59)], utc, &hours),
            TimePattern::BusinessHours
        );
        assert_eq!(
            time_pattern(&[at(3, 17, 0), at(3, 8, 59)], utc, &hours),
            TimePattern::AfterHours
        );
        assert_eq!(
            time_pattern(&[at(3, 10, 0), at(3, 22, 0)], utc, &hours),
            TimePattern::Mixed
        );

        // 10:00 UTC is 15:30 in +05:30
        let india = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        assert_eq!(time_pattern(&[at(3, 10, 0)], india, &hours), TimePattern::BusinessHours);
        assert_eq!(time_pattern(&[at(3, 12, 0)], india, &hours), TimePattern::AfterHours);
    }

    #[test]
    fn test_extract_without_activity() {
        let features = extract(
            &TemporalInput {
                timestamps: &[],
                lead_age_days: 12,
                offset: FixedOffset::east_opt(0).unwrap(),
                now: at(20, 0, 0),
            },
            &TemporalRules {
                half_life_days: 7.0,
                burst: &burst(),
                business_hours: &BusinessHours::default(),
            },
        );

        assert_eq!(features.days_since_created, 12);
        assert_eq!(features.days_since_last_activity, NO_ACTIVITY_DAYS);
        assert!(features.recency_score < 1e-9);
        assert!(!features.activity_burst);
        assert_eq!(features.day_pattern, DayPattern::Unknown);
        assert_eq!(features.time_pattern, TimePattern::Unknown);
    }

    #[test]
    fn test_future_activity_counts_as_today() {
        assert_eq!(whole_days(at(3, 0, 0), at(5, 0, 0)), 0);
    }
}
