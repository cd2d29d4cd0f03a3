// ABOUTME: Per-activity deep analysis: cardiac drift, pacing, historical context, training load
// ABOUTME: Independent optional sub-analyses composed into one feedback report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Activity Analysis
//!
//! Four independent sub-analyses over an activity's laps and the weekly
//! history, each returning `None` on insufficient data and simply omitted from
//! the combined report. The numeric results are kept separate from their text
//! rendering so alternate renderers can reuse the numbers.

use serde::{Deserialize, Serialize};
use tracing::warn;
use velocoach_core::constants::{cardiac_drift, compliance, training_load};
use velocoach_core::models::Lap;

use crate::weekly::{EnrichedActivity, WeeklyStats};
use crate::zones::{analyze_lap_zones, HrZones, LapZoneAnalysis};

/// Aerobic decoupling between the first and second half of a session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardiacDrift {
    /// Percentage drop in efficiency factor from first to second half
    pub decoupling_pct: f64,
    /// Mean lap EF over the first half of the work laps
    pub ef_first_half: f64,
    /// Mean lap EF over the second half of the work laps
    pub ef_second_half: f64,
    /// Second-half minus first-half average power, watts
    pub power_difference_watts: f64,
}

impl CardiacDrift {
    /// Drift is unreliable when the power changed materially between halves
    #[must_use]
    pub fn is_reliable(&self) -> bool {
        self.power_difference_watts.abs() <= cardiac_drift::UNRELIABLE_POWER_DELTA_WATTS
    }

    /// Rendered verdict for the feedback report
    #[must_use]
    pub fn message(&self) -> &'static str {
        if !self.is_reliable() {
            return "Power output varied between halves, so drift analysis is less reliable.";
        }
        if self.decoupling_pct > cardiac_drift::SIGNIFICANT_DRIFT_PCT {
            "Significant cardiac drift detected (>5%). HR rose relative to Power in the second half."
        } else if self.decoupling_pct < -cardiac_drift::SIGNIFICANT_DRIFT_PCT {
            "Your efficiency improved in the second half."
        } else {
            "Good aerobic stability. HR/Power relationship remained constant."
        }
    }
}

/// First-vs-last-lap cadence comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PacingCompliance {
    /// First-lap cadence minus last-lap cadence, rpm
    pub cadence_drop_rpm: f64,
}

impl PacingCompliance {
    /// Rendered verdict for the feedback report
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.cadence_drop_rpm > compliance::CADENCE_DELTA_RPM {
            "Cadence dropped >5rpm towards the end. Try to hold the prescribed RPM even when fatigued."
        } else if self.cadence_drop_rpm < -compliance::CADENCE_DELTA_RPM {
            "You spun faster at the end of the session."
        } else {
            "Great execution! You held the cadence steady throughout the session, matching the workout demands."
        }
    }
}

/// Activity EF compared to the trailing-window average
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoricalComparison {
    /// Mean EF across weeks with a positive EF
    pub avg_ef: f64,
    /// This activity's EF
    pub current_ef: f64,
    /// Percent difference of current vs average
    pub improvement_pct: f64,
}

impl HistoricalComparison {
    /// Rendered verdict for the feedback report
    #[must_use]
    pub fn message(&self) -> String {
        if self.improvement_pct > training_load::EF_DEVIATION_PCT {
            format!("Strong (+{:.1}%) vs 6wk avg.", self.improvement_pct)
        } else if self.improvement_pct < -training_load::EF_DEVIATION_PCT {
            format!(
                "Lower ({:.1}%) vs avg. Monitor fatigue.",
                self.improvement_pct.abs()
            )
        } else {
            "Consistent with history.".to_owned()
        }
    }
}

/// Session work compared to the per-session average across the history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrainingLoadAssessment {
    /// Mean estimated kcal per session across all recorded weeks
    pub avg_session_calories: f64,
    /// This session's estimated kcal
    pub session_calories: f64,
    /// Session-to-average ratio
    pub load_ratio: f64,
}

impl TrainingLoadAssessment {
    /// Rendered verdict for the feedback report
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.load_ratio > training_load::HIGH_LOAD_RATIO {
            "High load session (>40% above avg). **Prioritize recovery.**"
        } else if self.load_ratio < training_load::LOW_LOAD_RATIO {
            "Recovery session. **Fresh for tomorrow.**"
        } else {
            "Maintain rhythm."
        }
    }
}

/// The combined per-activity analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityAnalysis {
    /// Exact lap-weighted zone distribution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zones: Option<LapZoneAnalysis>,
    /// Aerobic decoupling analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardiac_drift: Option<CardiacDrift>,
    /// Cadence pacing analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compliance: Option<PacingCompliance>,
    /// EF vs trailing-window average
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<HistoricalComparison>,
    /// Session load vs per-session average
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<TrainingLoadAssessment>,
    /// Rendered Markdown-like feedback report
    pub feedback: String,
}

fn mean_lap_ef(laps: &[&Lap]) -> f64 {
    if laps.is_empty() {
        return 0.0;
    }
    laps.iter().map(|lap| lap.efficiency_factor()).sum::<f64>() / laps.len() as f64
}

fn mean_lap_power(laps: &[&Lap]) -> f64 {
    if laps.is_empty() {
        return 0.0;
    }
    laps.iter()
        .map(|lap| lap.average_watts.unwrap_or(0.0))
        .sum::<f64>()
        / laps.len() as f64
}

/// Cardiac drift over the work laps of a session.
///
/// Work laps are long enough and hard enough to carry an aerobic signal;
/// freewheeling and traffic-light laps are excluded. Returns `None` with
/// fewer than two work laps or a zero first-half EF.
#[must_use]
pub fn analyze_cardiac_drift(laps: &[Lap]) -> Option<CardiacDrift> {
    let work_laps: Vec<&Lap> = laps
        .iter()
        .filter(|lap| {
            lap.moving_time_seconds > cardiac_drift::MIN_WORK_LAP_SECONDS
                && lap.average_watts.unwrap_or(0.0) > cardiac_drift::MIN_WORK_LAP_WATTS
        })
        .collect();

    if work_laps.len() < 2 {
        return None;
    }

    let mid = work_laps.len() / 2;
    let (first, second) = work_laps.split_at(mid);

    let ef_first = mean_lap_ef(first);
    let ef_second = mean_lap_ef(second);
    if ef_first <= 0.0 {
        return None;
    }

    let power_difference = mean_lap_power(second) - mean_lap_power(first);
    let drift = CardiacDrift {
        decoupling_pct: (ef_first - ef_second) / ef_first * 100.0,
        ef_first_half: ef_first,
        ef_second_half: ef_second,
        power_difference_watts: power_difference,
    };

    if !drift.is_reliable() {
        warn!(
            power_difference_watts = power_difference,
            "power changed between halves, drift verdict downgraded"
        );
    }

    Some(drift)
}

/// First-vs-last-lap cadence comparison; needs at least three laps with
/// cadence on both ends
#[must_use]
pub fn analyze_compliance(laps: &[Lap]) -> Option<PacingCompliance> {
    if laps.len() < compliance::MIN_LAPS {
        return None;
    }
    let first = laps.first()?.average_cadence?;
    let last = laps.last()?.average_cadence?;
    Some(PacingCompliance {
        cadence_drop_rpm: first - last,
    })
}

/// Activity EF against the mean EF of all positive-EF weeks
#[must_use]
pub fn analyze_history(
    activity: &EnrichedActivity,
    stats: &[WeeklyStats],
) -> Option<HistoricalComparison> {
    let valid: Vec<f64> = stats
        .iter()
        .map(|week| week.efficiency_factor)
        .filter(|ef| *ef > 0.0)
        .collect();
    if valid.is_empty() {
        return None;
    }

    let avg_ef = valid.iter().sum::<f64>() / valid.len() as f64;
    let current_ef = activity.efficiency_factor;
    if avg_ef <= 0.0 || current_ef <= 0.0 {
        return None;
    }

    Some(HistoricalComparison {
        avg_ef,
        current_ef,
        improvement_pct: (current_ef - avg_ef) / avg_ef * 100.0,
    })
}

/// Session calories against the per-session mean across all recorded weeks
#[must_use]
pub fn analyze_training_load(
    activity: &EnrichedActivity,
    stats: &[WeeklyStats],
) -> Option<TrainingLoadAssessment> {
    let total_calories: f64 = stats.iter().map(|week| week.total_calories).sum();
    let total_count: usize = stats.iter().map(|week| week.count).sum();
    if total_count == 0 {
        return None;
    }

    let avg_session_calories = total_calories / total_count as f64;
    if avg_session_calories <= 0.0 {
        return None;
    }

    Some(TrainingLoadAssessment {
        avg_session_calories,
        session_calories: activity.estimated_calories,
        load_ratio: activity.estimated_calories / avg_session_calories,
    })
}

/// Run all sub-analyses for one activity and compose the feedback report.
///
/// Never fails: any sub-analysis without enough data is omitted, and an
/// activity with no laps still yields a minimal report.
#[must_use]
pub fn analyze_activity(
    activity: &EnrichedActivity,
    history: &[WeeklyStats],
    zones: &HrZones,
) -> ActivityAnalysis {
    let laps = &activity.activity.laps;

    let zone_analysis = analyze_lap_zones(laps, zones);
    let drift = analyze_cardiac_drift(laps);
    let pacing = analyze_compliance(laps);
    let historical = analyze_history(activity, history);
    let load = analyze_training_load(activity, history);

    let feedback = render_feedback(
        activity,
        zone_analysis.as_ref(),
        drift.as_ref(),
        pacing.as_ref(),
        historical.as_ref(),
        load.as_ref(),
    );

    ActivityAnalysis {
        zones: zone_analysis,
        cardiac_drift: drift,
        compliance: pacing,
        history: historical,
        load,
        feedback,
    }
}

fn render_feedback(
    activity: &EnrichedActivity,
    zones: Option<&LapZoneAnalysis>,
    drift: Option<&CardiacDrift>,
    pacing: Option<&PacingCompliance>,
    history: Option<&HistoricalComparison>,
    load: Option<&TrainingLoadAssessment>,
) -> String {
    let mut lines = vec![
        format!("## {}", activity.activity.name),
        format!("**Work Done**: {:.0} kcal", activity.estimated_calories),
    ];

    if let Some(zone_analysis) = zones {
        lines.push(format!("\n**Heart Rate Zones**: {}", zone_analysis.message()));
    }
    if let Some(assessment) = load {
        lines.push(format!("\n**Training Load**: {}", assessment.message()));
    }
    if let Some(comparison) = history {
        lines.push(format!("\n**Historical Context**: {}", comparison.message()));
    }
    if let Some(drift_result) = drift {
        lines.push(format!("\n**Cardiac Drift**: {}", drift_result.message()));
        if drift_result.is_reliable()
            && drift_result.decoupling_pct > cardiac_drift::SIGNIFICANT_DRIFT_PCT
        {
            lines.push(format!("(Decoupling: {:.1}%)", drift_result.decoupling_pct));
        }
    }
    if let Some(compliance_result) = pacing {
        lines.push(format!(
            "\n**Workout Compliance**: {}",
            compliance_result.message()
        ));
    }

    lines.join("\n")
}
