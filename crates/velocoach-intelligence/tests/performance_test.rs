// ABOUTME: Tests for power-to-weight metrics and body-composition trend analysis
// ABOUTME: Covers graceful degradation, trend bands, and German insight rendering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;
use velocoach_core::models::BodyMeasurement;
use velocoach_intelligence::performance::{
    calculate_performance_metrics, RatioDirection, TrendDirection,
};
use velocoach_intelligence::weekly::WeeklyStats;
use velocoach_intelligence::zones::{ZoneMinutes, ZonePercentages};

fn monday(offset_weeks: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 20).unwrap() + chrono::Duration::weeks(offset_weeks as i64)
}

fn week(offset_weeks: u64, avg_power: f64, ef: f64) -> WeeklyStats {
    WeeklyStats {
        week_start: monday(offset_weeks),
        avg_power,
        avg_heart_rate: if ef > 0.0 { avg_power / ef } else { 0.0 },
        avg_cadence: 85.0,
        efficiency_factor: ef,
        total_calories: 1500.0,
        total_time_seconds: 10_800,
        zone_minutes: ZoneMinutes::default(),
        zone_percentages: ZonePercentages::default(),
        activities: Vec::new(),
        count: 2,
    }
}

fn body(
    offset_weeks: u64,
    weight: Option<f64>,
    fat: Option<f64>,
    muscle: Option<f64>,
) -> BodyMeasurement {
    BodyMeasurement {
        week_start: monday(offset_weeks),
        weight_kg: weight,
        fat_ratio_pct: fat,
        muscle_mass_kg: muscle,
    }
}

#[test]
fn power_to_weight_uses_current_week_and_latest_weight() {
    let current = week(5, 210.0, 1.4);
    let latest = body(5, Some(70.0), None, None);

    let metrics = calculate_performance_metrics(Some(&current), Some(&latest), &[], &[]);

    assert!((metrics.power_to_weight.unwrap() - 3.0).abs() < 1e-9);
    assert!((metrics.efficiency_per_kg.unwrap() - 2.0).abs() < 1e-9);
    assert!(metrics
        .insights
        .iter()
        .any(|text| text.contains("3.00 W/kg") && text.contains("Ambitioniert")));
}

#[test]
fn missing_weight_returns_empty_metrics() {
    let current = week(5, 210.0, 1.4);
    let no_weight = body(5, None, Some(18.0), None);

    let metrics = calculate_performance_metrics(Some(&current), Some(&no_weight), &[], &[]);
    assert!(metrics.power_to_weight.is_none());
    assert!(metrics.insights.is_empty());

    let metrics = calculate_performance_metrics(None, None, &[], &[]);
    assert!(metrics.power_to_weight.is_none());
}

#[test]
fn weight_trend_compares_series_endpoints() {
    let current = week(5, 210.0, 1.4);
    let series = vec![
        body(1, Some(72.0), None, None),
        body(3, Some(71.0), None, None),
        body(5, Some(70.0), None, None),
    ];
    let latest = series.last().unwrap().clone();

    let metrics = calculate_performance_metrics(Some(&current), Some(&latest), &series, &[]);
    let trend = metrics.weight_trend.unwrap();

    assert!((trend.change_kg - (-2.0)).abs() < 1e-9);
    assert_eq!(trend.direction, TrendDirection::Down);
    assert_eq!(trend.weeks_spanned, 3);
    assert!(metrics.insights.iter().any(|text| text.contains("Gewicht")));
}

#[test]
fn small_weight_change_is_stable() {
    let current = week(5, 210.0, 1.4);
    let series = vec![body(3, Some(70.2), None, None), body(5, Some(70.0), None, None)];
    let latest = series.last().unwrap().clone();

    let metrics = calculate_performance_metrics(Some(&current), Some(&latest), &series, &[]);
    assert_eq!(
        metrics.weight_trend.unwrap().direction,
        TrendDirection::Stable
    );
}

#[test]
fn fat_down_with_stable_muscle_is_the_optimal_insight() {
    let current = week(5, 210.0, 1.4);
    let series = vec![
        body(1, Some(72.0), Some(20.0), Some(34.0)),
        body(5, Some(70.0), Some(18.5), Some(34.2)),
    ];
    let latest = series.last().unwrap().clone();

    let metrics = calculate_performance_metrics(Some(&current), Some(&latest), &series, &[]);
    let comp = metrics.body_comp_trend.unwrap();

    assert_eq!(comp.fat_direction, Some(TrendDirection::Down));
    assert_eq!(comp.muscle_direction, Some(TrendDirection::Stable));
    assert!(metrics.insights.iter().any(|text| text.contains("optimal")));
}

#[test]
fn muscle_loss_during_weight_loss_is_flagged() {
    let current = week(5, 210.0, 1.4);
    let series = vec![
        body(1, Some(74.0), Some(19.0), Some(36.0)),
        body(5, Some(71.0), Some(19.2), Some(33.0)),
    ];
    let latest = series.last().unwrap().clone();

    let metrics = calculate_performance_metrics(Some(&current), Some(&latest), &series, &[]);
    assert!(metrics
        .insights
        .iter()
        .any(|text| text.contains("Muskelverlust")));
}

#[test]
fn power_to_weight_trend_matches_weeks_to_measurements() {
    let stats = vec![week(1, 200.0, 1.3), week(3, 205.0, 1.35), week(5, 215.0, 1.4)];
    let series = vec![
        body(1, Some(72.0), None, None),
        body(3, Some(71.0), None, None),
        body(5, Some(70.0), None, None),
    ];
    let latest = series.last().unwrap().clone();

    let metrics =
        calculate_performance_metrics(stats.last(), Some(&latest), &series, &stats);
    let trend = metrics.power_to_weight_trend.unwrap();

    // 200/72 = 2.778 to 215/70 = 3.071, about +10.6%
    assert_eq!(trend.direction, RatioDirection::Improving);
    assert!(trend.change_pct > 10.0);
    assert!(metrics
        .insights
        .iter()
        .any(|text| text.contains("W/kg verbessert")));
}

#[test]
fn unmatched_weeks_leave_ratio_trend_empty() {
    let stats = vec![week(1, 200.0, 1.3), week(5, 215.0, 1.4)];
    // Measurements from different weeks never match
    let series = vec![body(0, Some(72.0), None, None), body(2, Some(71.0), None, None)];
    let latest = series.last().unwrap().clone();

    let metrics =
        calculate_performance_metrics(stats.last(), Some(&latest), &series, &stats);
    assert!(metrics.power_to_weight_trend.is_none());
}
