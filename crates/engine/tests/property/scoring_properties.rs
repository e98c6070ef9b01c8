use chrono::{DateTime, Duration, TimeZone, Utc};
use lead_scoring_config::{ExtractionConfig, FeatureWeights, QualificationThresholds};
use lead_scoring_core::{
    Activity, ActivityType, BehavioralFeatures, CompanySize, DayPattern, DemographicFeatures,
    EmailDomainType, EngagementFeatures, LeadFeatures, LeadRecord, TemporalFeatures, TimePattern,
    TitleSeniority, CATALOG,
};
use lead_scoring_engine::{LeadFeatureExtractor, WeightedScorer};
use proptest::prelude::*;

fn scorer() -> WeightedScorer {
    WeightedScorer::new(FeatureWeights::default(), QualificationThresholds::default()).unwrap()
}

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

fn email_domain_type() -> impl Strategy<Value = EmailDomainType> {
    prop_oneof![
        Just(EmailDomainType::Corporate),
        Just(EmailDomainType::Free),
        Just(EmailDomainType::Edu),
        Just(EmailDomainType::Government),
        Just(EmailDomainType::Unknown),
    ]
}

fn title_seniority() -> impl Strategy<Value = TitleSeniority> {
    prop_oneof![
        Just(TitleSeniority::CLevel),
        Just(TitleSeniority::Vp),
        Just(TitleSeniority::Director),
        Just(TitleSeniority::Manager),
        Just(TitleSeniority::Individual),
        Just(TitleSeniority::Unknown),
    ]
}

fn company_size() -> impl Strategy<Value = CompanySize> {
    prop_oneof![
        Just(CompanySize::Enterprise),
        Just(CompanySize::MidMarket),
        Just(CompanySize::Smb),
        Just(CompanySize::Startup),
        Just(CompanySize::Unknown),
    ]
}

fn day_pattern() -> impl Strategy<Value = DayPattern> {
    prop_oneof![
        Just(DayPattern::Weekday),
        Just(DayPattern::Weekend),
        Just(DayPattern::Mixed),
        Just(DayPattern::Unknown),
    ]
}

fn time_pattern() -> impl Strategy<Value = TimePattern> {
    prop_oneof![
        Just(TimePattern::BusinessHours),
        Just(TimePattern::AfterHours),
        Just(TimePattern::Mixed),
        Just(TimePattern::Unknown),
    ]
}

prop_compose! {
    fn demographic()(
        flags in any::<(bool, bool, bool)>(),
        email_domain_type in email_domain_type(),
        title_seniority in title_seniority(),
        company_size_estimate in company_size(),
        email_domain in proptest::option::of("[a-z]{1,10}\\.(com|io|edu)"),
    ) -> DemographicFeatures {
        DemographicFeatures {
            has_company: flags.0,
            has_title: flags.1,
            has_phone: flags.2,
            email_domain_type,
            title_seniority,
            company_size_estimate,
            email_domain,
        }
    }
}

prop_compose! {
    fn behavioral()(
        counts in proptest::collection::vec(0u32..500, 6),
        activity_velocity in 0.0f64..100.0,
        channel_diversity in 0u32..8,
    ) -> BehavioralFeatures {
        let total: u32 = counts.iter().sum();
        BehavioralFeatures {
            email_open_count: counts[0],
            email_click_count: counts[1],
            page_view_count: counts[2],
            form_submit_count: counts[3],
            meeting_count: counts[4],
            call_count: counts[5],
            total_activities: total,
            activity_velocity,
            channel_diversity,
            high_value_action_count: counts[1] + counts[3],
        }
    }
}

prop_compose! {
    fn temporal()(
        days_since_created in 0i64..20_000,
        days_since_last_activity in 0i64..10_000,
        recency_score in 0.0f64..=100.0,
        activity_burst in any::<bool>(),
        day_pattern in day_pattern(),
        time_pattern in time_pattern(),
    ) -> TemporalFeatures {
        TemporalFeatures {
            days_since_created,
            days_since_last_activity,
            recency_score,
            activity_burst,
            day_pattern,
            time_pattern,
        }
    }
}

prop_compose! {
    fn engagement()(
        total_engagement_score in 0.0f64..=100.0,
        rates in (0.0f64..=1.0, 0.0f64..=1.0, 0.0f64..=1.0),
        avg_response_time in proptest::option::of(0.0f64..1000.0),
        current_sequence_step in proptest::option::of(0u32..50),
    ) -> EngagementFeatures {
        EngagementFeatures {
            total_engagement_score,
            email_open_rate: rates.0,
            email_click_rate: rates.1,
            sequence_engagement: rates.2,
            avg_response_time,
            current_sequence_step,
        }
    }
}

prop_compose! {
    fn lead_features()(
        demographic in demographic(),
        behavioral in behavioral(),
        temporal in temporal(),
        engagement in engagement(),
    ) -> LeadFeatures {
        LeadFeatures {
            demographic,
            behavioral,
            temporal,
            engagement,
            text: Default::default(),
        }
    }
}

proptest! {
    #[test]
    fn score_is_always_within_bounds(features in lead_features()) {
        let score = scorer().score(&features);
        prop_assert!((0.0..=100.0).contains(&score.score), "score {}", score.score);
        let domain = scorer().domain();
        prop_assert!(score.raw_score >= domain.min - 1e-9);
        prop_assert!(score.raw_score <= domain.max + 1e-9);
    }

    #[test]
    fn scoring_is_deterministic(features in lead_features()) {
        let a = scorer().score(&features);
        let b = scorer().score(&features);
        prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        prop_assert_eq!(a.raw_score.to_bits(), b.raw_score.to_bits());
        for (name, contribution) in &a.breakdown {
            prop_assert_eq!(contribution.to_bits(), b.breakdown[name].to_bits());
        }
    }

    #[test]
    fn zero_weight_removes_only_that_feature(
        features in lead_features(),
        index in 0..CATALOG.len(),
    ) {
        let feature = CATALOG[index].name;
        let mut weights = FeatureWeights::default();
        weights.set_weight(feature, 0.0).unwrap();
        let zeroed = WeightedScorer::new(weights, QualificationThresholds::default()).unwrap();

        let before = scorer().score(&features);
        let after = zeroed.score(&features);

        prop_assert_eq!(after.breakdown[feature], 0.0);
        for (name, contribution) in &before.breakdown {
            if name != feature {
                prop_assert_eq!(contribution.to_bits(), after.breakdown[name].to_bits());
            }
        }
        let expected = before.raw_score - before.breakdown[feature];
        prop_assert!((after.raw_score - expected).abs() < 1e-6);
    }

    #[test]
    fn activities_a_day_apart_never_burst(
        gaps in proptest::collection::vec(24i64..500, 0..20),
    ) {
        let mut at = base_time();
        let mut activities = vec![Activity::new(ActivityType::PageView, at)];
        for gap in gaps {
            at += Duration::hours(gap);
            activities.push(Activity::new(ActivityType::PageView, at));
        }
        activities.reverse();

        let extractor = LeadFeatureExtractor::new(ExtractionConfig::default()).unwrap();
        let lead = LeadRecord::default().with_activities(activities);
        let features = extractor.extract(&lead, at + Duration::days(1));
        prop_assert!(!features.temporal.activity_burst);
    }

    #[test]
    fn three_activities_inside_a_day_burst(
        offsets in proptest::collection::vec(0i64..(24 * 60), 3),
        noise in proptest::collection::vec(0i64..(365 * 24), 0..10),
    ) {
        let start = base_time() + Duration::days(400);
        let mut activities: Vec<Activity> = offsets
            .iter()
            .map(|m| Activity::new(ActivityType::EmailOpen, start + Duration::minutes(*m)))
            .collect();
        activities.extend(
            noise
                .iter()
                .map(|h| Activity::new(ActivityType::Call, base_time() + Duration::hours(*h))),
        );

        let extractor = LeadFeatureExtractor::new(ExtractionConfig::default()).unwrap();
        let lead = LeadRecord::default().with_activities(activities);
        let features = extractor.extract(&lead, start + Duration::days(2));
        prop_assert!(features.temporal.activity_burst);
    }

    #[test]
    fn extraction_never_panics_on_arbitrary_profiles(
        email in proptest::option::of(".{0,40}"),
        title in proptest::option::of(".{0,40}"),
        timezone in proptest::option::of(".{0,12}"),
        employee_count in proptest::option::of(any::<u32>()),
    ) {
        let mut lead = LeadRecord::default();
        lead.profile.email = email;
        lead.profile.title = title;
        lead.profile.timezone = timezone;
        lead.profile.employee_count = employee_count;

        let extractor = LeadFeatureExtractor::new(ExtractionConfig::default()).unwrap();
        let features = extractor.extract(&lead, base_time());
        let score = scorer().score(&features);
        prop_assert!((0.0..=100.0).contains(&score.score));
    }
}
