// ABOUTME: Tests for trailing-window weekly aggregation and duration weighting
// ABOUTME: Covers bucketing, partial metric data, EF as ratio of sums, determinism
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use velocoach_core::models::Activity;
use velocoach_intelligence::config::ZoneEstimatorConfig;
use velocoach_intelligence::weekly::{aggregate_weekly, week_monday};
use velocoach_intelligence::zones::HrZones;

fn zones() -> HrZones {
    HrZones::karvonen(190, 50).unwrap()
}

fn now() -> DateTime<Utc> {
    // A Wednesday; current week starts Monday 2026-08-24
    Utc.with_ymd_and_hms(2026, 8, 26, 10, 0, 0).unwrap()
}

fn ride(
    id: i64,
    start: DateTime<Utc>,
    seconds: u64,
    watts: Option<f64>,
    hr: Option<u32>,
) -> Activity {
    Activity {
        id,
        name: format!("Ride {id}"),
        sport: "Ride".to_owned(),
        start_date: start,
        moving_time_seconds: seconds,
        elapsed_time_seconds: seconds,
        distance_meters: 30_000.0,
        elevation_gain_meters: 200.0,
        average_heart_rate: hr,
        max_heart_rate: hr.map(|value| value + 15),
        average_watts: watts,
        weighted_average_watts: watts,
        average_cadence: Some(85.0),
        laps: Vec::new(),
    }
}

fn day(year: i32, month: u32, dayofmonth: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, dayofmonth, 9, 0, 0).unwrap()
}

#[test]
fn week_monday_aligns_to_monday() {
    let wednesday = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
    let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();

    assert_eq!(week_monday(wednesday), monday);
    assert_eq!(week_monday(monday), monday);
    assert_eq!(week_monday(sunday), monday);
}

#[test]
fn activities_land_in_their_calendar_week() {
    let activities = vec![
        ride(1, day(2026, 8, 25), 3600, Some(200.0), Some(140)),
        ride(2, day(2026, 8, 18), 3600, Some(180.0), Some(135)),
        ride(3, day(2026, 7, 21), 3600, Some(170.0), Some(130)),
        // Outside the 6-week window, must be dropped
        ride(4, day(2026, 5, 1), 3600, Some(250.0), Some(150)),
    ];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());

    assert_eq!(stats.len(), 6);
    assert_eq!(stats[0].week_start, NaiveDate::from_ymd_opt(2026, 7, 20).unwrap());
    assert_eq!(stats[5].week_start, NaiveDate::from_ymd_opt(2026, 8, 24).unwrap());

    let total: usize = stats.iter().map(|week| week.count).sum();
    assert_eq!(total, 3);
    assert_eq!(stats[0].count, 1);
    assert_eq!(stats[4].count, 1);
    assert_eq!(stats[5].count, 1);
    // Empty weeks inside the window stay as zero-valued buckets
    assert_eq!(stats[1].count, 0);
    assert!(stats[1].avg_power.abs() < f64::EPSILON);
}

#[test]
fn empty_current_week_is_dropped() {
    let activities = vec![ride(1, day(2026, 8, 18), 3600, Some(200.0), Some(140))];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());

    assert_eq!(stats.len(), 5);
    assert_eq!(
        stats.last().unwrap().week_start,
        NaiveDate::from_ymd_opt(2026, 8, 17).unwrap()
    );
}

#[test]
fn weekly_ef_is_ratio_of_weighted_sums() {
    // One hour at 100W/50bpm plus one hour at 300W/150bpm.
    // Weighted avg power 200, weighted avg HR 100, EF exactly 2.0.
    // The mean of per-activity EFs would also be 2.0 here, so vary durations:
    // two hours of the second activity shift both averages but EF stays the
    // ratio of the sums.
    let activities = vec![
        ride(1, day(2026, 8, 24), 3600, Some(100.0), Some(50)),
        ride(2, day(2026, 8, 25), 7200, Some(300.0), Some(150)),
    ];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());
    let week = stats.last().unwrap();

    let expected_power = (100.0 * 3600.0 + 300.0 * 7200.0) / 10_800.0;
    let expected_hr = (50.0 * 3600.0 + 150.0 * 7200.0) / 10_800.0;
    assert!((week.avg_power - expected_power).abs() < 1e-9);
    assert!((week.avg_heart_rate - expected_hr).abs() < 1e-9);
    assert!((week.efficiency_factor - expected_power / expected_hr).abs() < 1e-9);
}

#[test]
fn missing_metric_does_not_dilute_the_average() {
    let activities = vec![
        ride(1, day(2026, 8, 24), 3600, Some(200.0), Some(140)),
        ride(2, day(2026, 8, 25), 7200, None, Some(120)),
    ];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());
    let week = stats.last().unwrap();

    // The power-less activity contributes to neither the power value sum nor
    // the power duration sum
    assert!((week.avg_power - 200.0).abs() < 1e-9);
    let expected_hr = (140.0 * 3600.0 + 120.0 * 7200.0) / 10_800.0;
    assert!((week.avg_heart_rate - expected_hr).abs() < 1e-9);
    assert_eq!(week.count, 2);
}

#[test]
fn activities_within_a_week_are_newest_first() {
    let activities = vec![
        ride(1, day(2026, 8, 24), 3600, Some(200.0), Some(140)),
        ride(3, day(2026, 8, 26), 1800, Some(210.0), Some(145)),
        ride(2, day(2026, 8, 25), 3600, Some(190.0), Some(138)),
    ];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());
    let week = stats.last().unwrap();
    let ids: Vec<i64> = week.activities.iter().map(|a| a.activity.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn enrichment_fills_zone_fields() {
    let activities = vec![ride(1, day(2026, 8, 24), 3600, Some(200.0), Some(140))];

    let stats = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());
    let activity = &stats.last().unwrap().activities[0];

    assert!(activity.efficiency_factor > 0.0);
    assert!(activity.estimated_calories > 0.0);
    assert!(activity.primary_zone.is_some());
    let minutes = activity.zone_minutes.unwrap();
    assert!((minutes.total() - 60.0).abs() < 1e-6);
}

#[test]
fn aggregation_is_deterministic() {
    let activities = vec![
        ride(5, day(2026, 8, 24), 3600, Some(200.0), Some(140)),
        ride(2, day(2026, 8, 24), 3600, Some(180.0), Some(130)),
        ride(9, day(2026, 8, 11), 5400, None, Some(125)),
        ride(1, day(2026, 7, 28), 2700, Some(160.0), None),
    ];

    let first = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());
    let second = aggregate_weekly(&activities, now(), 6, &zones(), &ZoneEstimatorConfig::default());

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn zero_weeks_yields_empty_series() {
    let activities = vec![ride(1, day(2026, 8, 24), 3600, Some(200.0), Some(140))];
    let stats = aggregate_weekly(&activities, now(), 0, &zones(), &ZoneEstimatorConfig::default());
    assert!(stats.is_empty());
}
