// ABOUTME: Tests for the Karvonen zone table and the zone-distribution estimator
// ABOUTME: Covers partition contiguity, classification, and minute-sum guarantees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use velocoach_core::models::Lap;
use velocoach_intelligence::config::ZoneEstimatorConfig;
use velocoach_intelligence::zones::{
    analyze_lap_zones, estimate_zone_minutes, HrZones, Zone, ALL_ZONES,
};

fn zones() -> HrZones {
    // HRR = 140: boundaries at 134 / 148 / 162 / 176
    HrZones::karvonen(190, 50).unwrap()
}

fn lap(seconds: u64, hr: Option<f64>) -> Lap {
    Lap {
        moving_time_seconds: seconds,
        elapsed_time_seconds: seconds,
        distance_meters: 0.0,
        average_watts: None,
        average_heart_rate: hr,
        max_heart_rate: None,
        average_cadence: None,
    }
}

#[test]
fn karvonen_is_a_contiguous_partition() {
    let table = zones();
    for pair in ALL_ZONES.windows(2) {
        let lower = table.band(pair[0]);
        let upper = table.band(pair[1]);
        assert!(
            (lower.max - upper.min).abs() < f64::EPSILON,
            "gap between {:?} and {:?}",
            pair[0],
            pair[1]
        );
    }
    assert!((table.band(Zone::Z1).min - 0.0).abs() < f64::EPSILON);
    assert!(table.band(Zone::Z5).max.is_infinite());
}

#[test]
fn karvonen_boundaries_follow_heart_rate_reserve() {
    let table = zones();
    assert!((table.band(Zone::Z1).max - 134.0).abs() < 1e-9);
    assert!((table.band(Zone::Z2).max - 148.0).abs() < 1e-9);
    assert!((table.band(Zone::Z3).max - 162.0).abs() < 1e-9);
    assert!((table.band(Zone::Z4).max - 176.0).abs() < 1e-9);
}

#[test]
fn karvonen_rejects_inverted_profile() {
    assert!(HrZones::karvonen(60, 80).is_err());
    assert!(HrZones::karvonen(60, 60).is_err());
}

#[test]
fn zone_classification_picks_first_zone_above_value() {
    let table = zones();
    assert_eq!(table.zone_for(100.0), Zone::Z1);
    assert_eq!(table.zone_for(140.0), Zone::Z2);
    assert_eq!(table.zone_for(150.0), Zone::Z3);
    assert_eq!(table.zone_for(170.0), Zone::Z4);
    assert_eq!(table.zone_for(200.0), Zone::Z5);
    // Boundary value belongs to the upper zone
    assert_eq!(table.zone_for(134.0), Zone::Z2);
}

#[test]
fn estimated_minutes_sum_to_duration() {
    let table = zones();
    let cfg = ZoneEstimatorConfig::default();

    for (avg, max, duration) in [
        (140, Some(170), 60.0),
        (140, Some(140), 100.0),
        (100, None, 45.0),
        (180, Some(185), 90.0),
        (130, Some(200), 120.0),
    ] {
        let minutes = estimate_zone_minutes(Some(avg), max, duration, &table, &cfg).unwrap();
        assert!(
            (minutes.total() - duration).abs() < 1e-6,
            "sum {} != duration {duration} for avg {avg}",
            minutes.total()
        );
    }
}

#[test]
fn estimator_spreads_between_primary_and_peak() {
    let table = zones();
    let cfg = ZoneEstimatorConfig::default();

    // avg in Z2, max in Z4: 12% warmup, 50% primary, 10% peak, Z3 takes
    // the intermediate share plus the spillover
    let minutes = estimate_zone_minutes(Some(140), Some(170), 60.0, &table, &cfg).unwrap();
    assert!((minutes.z1 - 7.2).abs() < 1e-6);
    assert!((minutes.z2 - 30.0).abs() < 1e-6);
    assert!((minutes.z3 - 16.8).abs() < 1e-6);
    assert!((minutes.z4 - 6.0).abs() < 1e-6);
    assert!(minutes.z5.abs() < 1e-6);
}

#[test]
fn estimator_splits_neighbors_when_avg_equals_max_zone() {
    let table = zones();
    let cfg = ZoneEstimatorConfig::default();

    let minutes = estimate_zone_minutes(Some(140), Some(142), 100.0, &table, &cfg).unwrap();
    // remainder 0.38 splits 60/40 to Z1 and Z3
    assert!((minutes.z1 - 34.8).abs() < 1e-6);
    assert!((minutes.z2 - 50.0).abs() < 1e-6);
    assert!((minutes.z3 - 15.2).abs() < 1e-6);
}

#[test]
fn estimator_requires_avg_hr_and_duration() {
    let table = zones();
    let cfg = ZoneEstimatorConfig::default();

    assert!(estimate_zone_minutes(None, Some(150), 60.0, &table, &cfg).is_none());
    assert!(estimate_zone_minutes(Some(0), None, 60.0, &table, &cfg).is_none());
    assert!(estimate_zone_minutes(Some(140), None, 0.0, &table, &cfg).is_none());
}

#[test]
fn lap_zone_analysis_weights_by_duration() {
    let table = zones();
    let laps = vec![
        lap(1200, Some(140.0)),
        lap(600, Some(150.0)),
        lap(600, Some(140.0)),
    ];

    let analysis = analyze_lap_zones(&laps, &table).unwrap();
    assert_eq!(analysis.primary_zone, Zone::Z2);
    assert!((analysis.minutes.z2 - 30.0).abs() < 1e-9);
    assert!((analysis.minutes.z3 - 10.0).abs() < 1e-9);
    assert!((analysis.total_minutes - 40.0).abs() < 1e-9);
    assert!((analysis.percentages.z2 - 75.0).abs() < f64::EPSILON);
    assert!(analysis.message().contains("Zone 2"));
}

#[test]
fn lap_zone_analysis_needs_heart_rate() {
    let table = zones();
    assert!(analyze_lap_zones(&[lap(600, None)], &table).is_none());
    assert!(analyze_lap_zones(&[], &table).is_none());
}
