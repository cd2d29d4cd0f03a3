// ABOUTME: Trailing-window weekly aggregation of activities with duration-weighted averages
// ABOUTME: Produces the WeeklyStats series every downstream analysis consumes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Weekly Aggregation
//!
//! Buckets activities into Monday-aligned calendar weeks over a trailing
//! window anchored on a caller-supplied `now`. Averages are duration-weighted:
//! an activity missing a metric contributes zero to both that metric's value
//! sum and its duration sum, so partial data degrades the affected average
//! gracefully instead of corrupting it. The weekly efficiency factor is the
//! ratio of the weighted power and HR sums, not the mean of per-activity
//! ratios.

use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;
use velocoach_core::models::Activity;

use crate::config::ZoneEstimatorConfig;
use crate::zones::{estimate_zone_minutes, HrZones, Zone, ZoneMinutes, ZonePercentages};

/// An activity plus the derived values computed once during aggregation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedActivity {
    /// The immutable source record
    #[serde(flatten)]
    pub activity: Activity,
    /// Average power over average heart rate, 0 when either is missing
    pub efficiency_factor: f64,
    /// Estimated work in kcal from average power and moving time
    pub estimated_calories: f64,
    /// Zone containing the average heart rate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_zone: Option<Zone>,
    /// Estimated minutes per zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_minutes: Option<ZoneMinutes>,
    /// Estimated whole-number percentage per zone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone_percentages: Option<ZonePercentages>,
}

impl EnrichedActivity {
    /// Derive the enriched view of an activity
    #[must_use]
    pub fn derive(activity: &Activity, zones: &HrZones, cfg: &ZoneEstimatorConfig) -> Self {
        let zone_minutes = estimate_zone_minutes(
            activity.average_heart_rate,
            activity.max_heart_rate,
            activity.moving_time_minutes(),
            zones,
            cfg,
        );
        Self {
            efficiency_factor: activity.efficiency_factor(),
            estimated_calories: activity.estimated_calories(),
            primary_zone: activity
                .average_heart_rate
                .map(|hr| zones.zone_for(f64::from(hr))),
            zone_minutes,
            zone_percentages: zone_minutes.as_ref().map(ZoneMinutes::percentages),
            activity: activity.clone(),
        }
    }
}

/// Aggregated statistics for one Monday-aligned calendar week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyStats {
    /// Monday of this week
    pub week_start: NaiveDate,
    /// Duration-weighted average power, watts (0 with no power data)
    pub avg_power: f64,
    /// Duration-weighted average heart rate, BPM (0 with no HR data)
    pub avg_heart_rate: f64,
    /// Duration-weighted average cadence, RPM (0 with no cadence data)
    pub avg_cadence: f64,
    /// Weighted avg power over weighted avg HR, 0 when either is 0
    pub efficiency_factor: f64,
    /// Sum of estimated per-activity kcal
    pub total_calories: f64,
    /// Sum of moving time in seconds
    pub total_time_seconds: u64,
    /// Accumulated estimated minutes per zone
    pub zone_minutes: ZoneMinutes,
    /// Whole-number percentage share per zone
    pub zone_percentages: ZonePercentages,
    /// This week's activities, newest first
    pub activities: Vec<EnrichedActivity>,
    /// Number of activities in this week
    pub count: usize,
}

/// The Monday of the week containing a date
#[must_use]
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date.week(Weekday::Mon).first_day()
}

#[derive(Default)]
struct WeekAccumulator {
    power_sum: f64,
    power_duration: f64,
    hr_sum: f64,
    hr_duration: f64,
    cadence_sum: f64,
    cadence_duration: f64,
    total_calories: f64,
    total_time_seconds: u64,
    zone_minutes: ZoneMinutes,
    activities: Vec<EnrichedActivity>,
}

impl WeekAccumulator {
    fn add(&mut self, enriched: EnrichedActivity) {
        let duration = enriched.activity.moving_time_seconds as f64;

        if let Some(watts) = enriched.activity.average_watts {
            self.power_sum += watts * duration;
            self.power_duration += duration;
        }
        if let Some(hr) = enriched.activity.average_heart_rate {
            self.hr_sum += f64::from(hr) * duration;
            self.hr_duration += duration;
        }
        if let Some(cadence) = enriched.activity.average_cadence {
            self.cadence_sum += cadence * duration;
            self.cadence_duration += duration;
        }
        if let Some(minutes) = &enriched.zone_minutes {
            self.zone_minutes.accumulate(minutes);
        }

        self.total_calories += enriched.estimated_calories;
        self.total_time_seconds += enriched.activity.moving_time_seconds;
        self.activities.push(enriched);
    }

    fn finalize(mut self, week_start: NaiveDate) -> WeeklyStats {
        let weighted = |sum: f64, duration: f64| if duration > 0.0 { sum / duration } else { 0.0 };

        let avg_power = weighted(self.power_sum, self.power_duration);
        let avg_heart_rate = weighted(self.hr_sum, self.hr_duration);
        let efficiency_factor = if avg_power > 0.0 && avg_heart_rate > 0.0 {
            avg_power / avg_heart_rate
        } else {
            0.0
        };

        // Newest first; id breaks start-date ties so output is deterministic
        self.activities.sort_by(|a, b| {
            b.activity
                .start_date
                .cmp(&a.activity.start_date)
                .then(b.activity.id.cmp(&a.activity.id))
        });

        WeeklyStats {
            week_start,
            avg_power,
            avg_heart_rate,
            avg_cadence: weighted(self.cadence_sum, self.cadence_duration),
            efficiency_factor,
            total_calories: self.total_calories,
            total_time_seconds: self.total_time_seconds,
            zone_minutes: self.zone_minutes,
            zone_percentages: self.zone_minutes.percentages(),
            count: self.activities.len(),
            activities: self.activities,
        }
    }
}

/// Bucket activities into the trailing `weeks` Monday-aligned weeks ending at
/// `now` and finalize duration-weighted statistics per week.
///
/// Activities outside the window are dropped. Empty weeks inside the window
/// are retained as zero-valued buckets, except the current (possibly partial)
/// week, which is dropped when empty to avoid a misleading empty row. The
/// result is ordered oldest to newest and is fully deterministic for a given
/// input.
#[must_use]
pub fn aggregate_weekly(
    activities: &[Activity],
    now: DateTime<Utc>,
    weeks: usize,
    zones: &HrZones,
    cfg: &ZoneEstimatorConfig,
) -> Vec<WeeklyStats> {
    if weeks == 0 {
        return Vec::new();
    }

    let current_monday = week_monday(now.date_naive());
    let oldest_monday = current_monday - Duration::weeks(weeks as i64 - 1);

    // Enrichment is per-activity pure work; order-preserving map keeps the
    // output deterministic.
    let enriched: Vec<EnrichedActivity> = activities
        .par_iter()
        .map(|activity| EnrichedActivity::derive(activity, zones, cfg))
        .collect();

    let mut buckets: Vec<WeekAccumulator> =
        (0..weeks).map(|_| WeekAccumulator::default()).collect();

    for item in enriched {
        let monday = week_monday(item.activity.start_date.date_naive());
        let offset_days = (monday - oldest_monday).num_days();
        if offset_days < 0 || monday > current_monday {
            debug!(
                activity_id = item.activity.id,
                start = %item.activity.start_date,
                "activity outside trailing window, dropped"
            );
            continue;
        }
        buckets[(offset_days / 7) as usize].add(item);
    }

    let mut stats: Vec<WeeklyStats> = buckets
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| bucket.finalize(oldest_monday + Duration::weeks(index as i64)))
        .collect();

    // The current week may be one day old; an empty row there reads as a
    // missed week rather than a week in progress.
    if stats.last().is_some_and(|week| week.count == 0) {
        stats.pop();
    }

    stats
}
