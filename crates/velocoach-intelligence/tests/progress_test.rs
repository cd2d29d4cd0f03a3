// ABOUTME: Tests for the progress assessment state machine and its side signals
// ABOUTME: Covers break detection, EF trends, goal zone tables, BP and weight insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use velocoach_core::models::{
    Activity, BloodPressureReading, BodyMeasurement, TrainingGoal,
};
use velocoach_intelligence::config::ProgressConfig;
use velocoach_intelligence::progress::{
    analyze_blood_pressure, assess_progress, BloodPressureTrend, ProgressStatus,
};
use velocoach_intelligence::weekly::{EnrichedActivity, WeeklyStats};
use velocoach_intelligence::zones::{ZoneMinutes, ZonePercentages};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap()
}

fn monday(offset_weeks: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 20).unwrap() + Duration::weeks(offset_weeks as i64)
}

fn pcts(z2: f64, z3: f64, z4: f64, z5: f64) -> ZonePercentages {
    ZonePercentages {
        z1: (100.0 - z2 - z3 - z4 - z5).max(0.0),
        z2,
        z3,
        z4,
        z5,
    }
}

fn ride_on(date: DateTime<Utc>) -> EnrichedActivity {
    EnrichedActivity {
        activity: Activity {
            id: 1,
            name: "Ride".to_owned(),
            sport: "Ride".to_owned(),
            start_date: date,
            moving_time_seconds: 3600,
            elapsed_time_seconds: 3600,
            distance_meters: 30_000.0,
            elevation_gain_meters: 200.0,
            average_heart_rate: Some(140),
            max_heart_rate: Some(160),
            average_watts: Some(200.0),
            weighted_average_watts: Some(205.0),
            average_cadence: Some(85.0),
            laps: Vec::new(),
        },
        efficiency_factor: 200.0 / 140.0,
        estimated_calories: 720.0,
        primary_zone: None,
        zone_minutes: None,
        zone_percentages: None,
    }
}

fn week(
    offset_weeks: u64,
    ef: f64,
    calories: f64,
    zone_percentages: ZonePercentages,
    last_ride: Option<DateTime<Utc>>,
) -> WeeklyStats {
    let activities = last_ride.map(ride_on).into_iter().collect::<Vec<_>>();
    WeeklyStats {
        week_start: monday(offset_weeks),
        avg_power: 200.0,
        avg_heart_rate: if ef > 0.0 { 200.0 / ef } else { 0.0 },
        avg_cadence: 85.0,
        efficiency_factor: ef,
        total_calories: calories,
        total_time_seconds: 10_800,
        zone_minutes: ZoneMinutes::default(),
        zone_percentages,
        count: activities.len(),
        activities,
    }
}

fn bp(offset_weeks: u64, systolic: f64, diastolic: f64) -> BloodPressureReading {
    BloodPressureReading {
        week_start: monday(offset_weeks),
        systolic: Some(systolic),
        diastolic: Some(diastolic),
        pulse: Some(55.0),
    }
}

fn balanced() -> ZonePercentages {
    pcts(50.0, 10.0, 7.0, 3.0)
}

#[test]
fn one_week_is_insufficient_data() {
    let stats = vec![week(5, 1.4, 1000.0, balanced(), None)];
    let readings = vec![bp(3, 125.0, 82.0), bp(5, 118.0, 76.0)];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &readings,
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::InsufficientData);
    assert_eq!(result.color, "bg-gray-50 border-gray-200");
    // The blood-pressure trend is independent of the training signals
    assert!(result.blood_pressure.is_some());
}

#[test]
fn improving_efficiency_is_building_fitness() {
    let stats = vec![
        week(3, 0.77, 1000.0, balanced(), None),
        week(4, 0.81, 1000.0, balanced(), None),
        week(5, 0.95, 1000.0, balanced(), Some(now() - Duration::days(1))),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::BuildingFitness);
    assert_eq!(result.color, "bg-green-50 border-green-200");
    assert!(result.message.contains("verbessert"));
    assert!(result.next_step.contains("Super Balance"));
}

#[test]
fn long_idle_gap_is_a_training_break() {
    let stats = vec![
        week(2, 1.4, 1000.0, balanced(), Some(now() - Duration::days(25))),
        week(3, 1.4, 1000.0, balanced(), Some(now() - Duration::days(20))),
    ];
    let measurement = BodyMeasurement {
        week_start: monday(3),
        weight_kg: Some(70.5),
        fat_ratio_pct: Some(18.0),
        muscle_mass_kg: None,
    };

    let result = assess_progress(
        &stats,
        now(),
        Some(&measurement),
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::TrainingBreak);
    assert_eq!(result.color, "bg-orange-50 border-orange-200");
    assert!(result.message.contains("20 Tage"));
    // 2 idle weeks at 1.5%/week: suggest 194W instead of 200W
    assert!(result.next_step.contains("**194W**"));

    let weight = result.weight_insight.unwrap();
    assert!((weight.current_kg - 70.5).abs() < 1e-9);
    assert!(weight.message.contains("gut"));
}

#[test]
fn week_long_gap_is_a_short_break() {
    let stats = vec![
        week(3, 1.4, 1000.0, balanced(), Some(now() - Duration::days(12))),
        week(4, 1.4, 1000.0, balanced(), Some(now() - Duration::days(8))),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::ShortBreak);
    assert_eq!(result.color, "bg-yellow-50 border-yellow-200");
    assert!(result.message.contains("8 Tage"));
    assert!(result.next_step.contains("**194W**"));
}

#[test]
fn declining_efficiency_under_high_volume_is_fatigue() {
    let stats = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(5, 0.9, 3000.0, balanced(), Some(now() - Duration::days(1))),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::HighLoadFatigue);
    assert!(result.message.contains("ermüdet"));
    assert!(result.next_step.contains("Erholungswoche"));
}

#[test]
fn declining_efficiency_at_normal_volume_is_stagnation() {
    let stats = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(5, 0.9, 900.0, balanced(), Some(now() - Duration::days(1))),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::Stagnating);
    assert!(result.next_step.contains("Reiz verändern"));
}

#[test]
fn rising_volume_at_stable_efficiency_is_productive() {
    let stats = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(5, 1.0, 1200.0, balanced(), Some(now() - Duration::days(1))),
    ];

    let productive = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );
    assert_eq!(productive.status, ProgressStatus::ProductiveLoad);

    let flat = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(5, 1.0, 1000.0, balanced(), Some(now() - Duration::days(1))),
    ];
    let maintenance = assess_progress(
        &flat,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );
    assert_eq!(maintenance.status, ProgressStatus::Maintenance);
    assert!(maintenance.next_step.contains("Plateau durchbrechen"));
}

#[test]
fn ftp_goal_pushes_threshold_work_on_a_strong_base() {
    let stats = vec![
        week(3, 0.9, 1000.0, balanced(), None),
        week(4, 0.9, 1000.0, balanced(), None),
        week(
            5,
            1.0,
            1000.0,
            pcts(55.0, 5.0, 3.0, 2.0),
            Some(now() - Duration::days(1)),
        ),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::IncreaseFtp,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.status, ProgressStatus::BuildingFitness);
    assert!(result.next_step.contains("Schwellenreize"));
}

#[test]
fn global_grey_zone_warning_prefixes_other_verdicts() {
    let stats = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(
            5,
            1.0,
            1200.0,
            pcts(40.0, 35.0, 3.0, 2.0),
            Some(now() - Duration::days(1)),
        ),
    ];

    // BuildBase wants 65% Z2, so the goal verdict is the thin base; the global
    // grey-zone warning is prepended on top
    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::BuildBase,
        200.0,
        &ProgressConfig::default(),
    );

    assert!(result.next_step.starts_with("⚠️ **Vermeide 'Junk Miles'!** 35%"));
    assert!(result.next_step.contains("Basisphase heißt Zone 2"));
}

#[test]
fn grey_zone_verdict_is_not_warned_twice() {
    let stats = vec![
        week(3, 1.0, 1000.0, balanced(), None),
        week(4, 1.0, 1000.0, balanced(), None),
        week(
            5,
            1.0,
            1200.0,
            pcts(45.0, 35.0, 3.0, 2.0),
            Some(now() - Duration::days(1)),
        ),
    ];

    let result = assess_progress(
        &stats,
        now(),
        None,
        &[],
        TrainingGoal::GeneralFitness,
        200.0,
        &ProgressConfig::default(),
    );

    assert_eq!(result.next_step.matches("Vermeide 'Junk Miles'").count(), 1);
}

#[test]
fn blood_pressure_improving_trend() {
    let readings = vec![bp(1, 130.0, 85.0), bp(3, 128.0, 84.0), bp(5, 120.0, 78.0)];

    let insight = analyze_blood_pressure(&readings).unwrap();
    assert_eq!(insight.trend, BloodPressureTrend::Improving);
    assert!(insight.message.contains("120/78"));
    assert!(insight.note.is_none());
}

#[test]
fn blood_pressure_worsening_with_referral() {
    let readings = vec![bp(1, 120.0, 80.0), bp(3, 122.0, 80.0), bp(5, 145.0, 95.0)];

    let insight = analyze_blood_pressure(&readings).unwrap();
    assert_eq!(insight.trend, BloodPressureTrend::Worsening);
    assert!(insight.note.unwrap().contains("ärztlich"));
}

#[test]
fn blood_pressure_stable_is_classified() {
    let readings = vec![bp(1, 118.0, 78.0), bp(3, 117.0, 77.0), bp(5, 118.0, 79.0)];

    let insight = analyze_blood_pressure(&readings).unwrap();
    assert_eq!(insight.trend, BloodPressureTrend::Stable);
    assert!(insight.message.contains("optimal"));
}

#[test]
fn blood_pressure_needs_two_complete_readings() {
    let incomplete = BloodPressureReading {
        week_start: monday(4),
        systolic: Some(120.0),
        diastolic: None,
        pulse: None,
    };
    assert!(analyze_blood_pressure(&[bp(5, 120.0, 80.0), incomplete]).is_none());
    assert!(analyze_blood_pressure(&[]).is_none());
}
