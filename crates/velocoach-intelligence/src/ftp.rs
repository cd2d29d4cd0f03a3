// ABOUTME: FTP estimation from training data via a reliability-ordered method cascade
// ABOUTME: Break adjustment, efficiency decline, threshold workouts, long rides, best efforts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # FTP Estimation
//!
//! An ordered cascade where the first applicable method wins. Breaks and
//! efficiency declines are checked before the power-based methods because a
//! detrained or fatigued athlete invalidates those estimates. Every result
//! compares the estimate against the currently configured FTP and phrases the
//! recommendation as confirm, raise, or lower.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::FtpEstimatorConfig;
use crate::weekly::{EnrichedActivity, WeeklyStats};

/// Reliability of an FTP estimate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Derived from dedicated threshold work
    High,
    /// Derived from sustained riding or break heuristics
    Medium,
    /// Fallback estimate, verify with a structured test
    Low,
}

/// An FTP estimate with the method that produced it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FtpEstimate {
    /// Estimated FTP, watts (rounded)
    pub estimated_ftp: f64,
    /// Reliability of the estimate
    pub confidence: Confidence,
    /// Which cascade branch fired
    pub method: String,
    /// How the estimate was derived
    pub explanation: String,
    /// Rendered German recommendation
    pub recommendation: String,
}

enum Phrasing {
    Threshold,
    LongRide,
}

fn compare_recommendation(
    estimated: f64,
    current_ftp: f64,
    tolerance: f64,
    phrasing: &Phrasing,
) -> String {
    if estimated > current_ftp * (1.0 + tolerance) {
        match phrasing {
            Phrasing::Threshold => format!(
                "🎉 Dein FTP ist wahrscheinlich **{estimated:.0}W** (aktuell: {current_ftp:.0}W). Erwäge einen FTP-Test zur Bestätigung!"
            ),
            Phrasing::LongRide => format!(
                "🔄 Geschätzter FTP: **{estimated:.0}W** (aktuell: {current_ftp:.0}W). Mache einen 20min-Test zur Bestätigung!"
            ),
        }
    } else if estimated < current_ftp * (1.0 - tolerance) {
        match phrasing {
            Phrasing::Threshold => format!(
                "⚠️ Geschätzter FTP: **{estimated:.0}W** (aktuell: {current_ftp:.0}W). Möglicherweise zu hoch eingestellt oder du bist ermüdet."
            ),
            Phrasing::LongRide => format!(
                "⚠️ Geschätzter FTP: **{estimated:.0}W** (aktuell: {current_ftp:.0}W). Prüfe deine Einstellung."
            ),
        }
    } else {
        format!(
            "✅ Dein FTP von **{current_ftp:.0}W** scheint gut zu passen (geschätzt: {estimated:.0}W)."
        )
    }
}

fn check_detraining(
    stats: &[WeeklyStats],
    current_ftp: f64,
    now: DateTime<Utc>,
    cfg: &FtpEstimatorConfig,
) -> Option<FtpEstimate> {
    let last_activity = stats
        .iter()
        .flat_map(|week| &week.activities)
        .map(|activity| activity.activity.start_date)
        .max()?;

    let idle_days = (now - last_activity).num_days();

    if idle_days >= cfg.long_break_days {
        let weeks_off = idle_days / 7;
        let loss_pct = (weeks_off as f64 * cfg.ftp_loss_pct_per_week).min(cfg.max_ftp_loss_pct);
        let estimated = (current_ftp * (1.0 - loss_pct / 100.0)).round();
        return Some(FtpEstimate {
            estimated_ftp: estimated,
            confidence: Confidence::Medium,
            method: "Trainingspause-Anpassung".to_owned(),
            explanation: format!("{idle_days} Tage ohne Training (≈{weeks_off} Wochen)"),
            recommendation: format!(
                "⚠️ Nach {idle_days} Tagen Pause empfehle ich FTP auf **{estimated:.0}W** zu senken (war: {current_ftp:.0}W). Detraining-Effekt: ~{loss_pct:.0}%. Starte sanft und teste nach 2-3 Wochen neu!"
            ),
        });
    }

    if idle_days >= cfg.short_break_days {
        let estimated = (current_ftp * cfg.short_break_ftp_factor).round();
        return Some(FtpEstimate {
            estimated_ftp: estimated,
            confidence: Confidence::Low,
            method: "Kurze Pause".to_owned(),
            explanation: format!("{idle_days} Tage Trainingspause"),
            recommendation: format!(
                "💡 Nach {idle_days} Tagen Pause: Starte mit reduzierten Intensitäten. Wenn die ersten Einheiten schwerfallen, senke FTP vorübergehend auf **{estimated:.0}W**."
            ),
        });
    }

    None
}

/// Activities oldest to newest across the given weeks
fn chronological(weeks: &[WeeklyStats]) -> Vec<&EnrichedActivity> {
    weeks
        .iter()
        .flat_map(|week| week.activities.iter().rev())
        .collect()
}

fn mean_ef(activities: &[&EnrichedActivity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    activities
        .iter()
        .map(|activity| activity.efficiency_factor)
        .sum::<f64>()
        / activities.len() as f64
}

fn mean_weighted_watts(activities: &[&EnrichedActivity]) -> f64 {
    if activities.is_empty() {
        return 0.0;
    }
    activities
        .iter()
        .map(|activity| activity.activity.weighted_average_watts.unwrap_or(0.0))
        .sum::<f64>()
        / activities.len() as f64
}

fn check_efficiency_decline(
    stats: &[WeeklyStats],
    recent: &[&EnrichedActivity],
    current_ftp: f64,
    cfg: &FtpEstimatorConfig,
) -> Option<FtpEstimate> {
    let recent_qualifying: Vec<&EnrichedActivity> = recent
        .iter()
        .copied()
        .filter(|activity| activity.efficiency_factor > 0.0)
        .collect();
    if recent_qualifying.len() < cfg.ef_sample_count {
        return None;
    }

    // Compare against the band just before the recent window, not the whole
    // history; with a wide window the oldest weeks no longer reflect the
    // baseline the decline is measured from.
    let older_end = stats.len().saturating_sub(cfg.recent_weeks);
    let older_start = stats.len().saturating_sub(cfg.recent_weeks * 2);
    let older_weeks = &stats[older_start..older_end];
    let older_qualifying: Vec<&EnrichedActivity> = chronological(older_weeks)
        .into_iter()
        .filter(|activity| activity.efficiency_factor > 0.0)
        .collect();
    if older_qualifying.len() < cfg.ef_sample_count {
        return None;
    }

    let recent_avg = mean_ef(&recent_qualifying[recent_qualifying.len() - cfg.ef_sample_count..]);
    let older_avg = mean_ef(&older_qualifying[older_qualifying.len() - cfg.ef_sample_count..]);
    if older_avg <= 0.0 || recent_avg >= older_avg * cfg.ef_decline_ratio {
        return None;
    }

    let decline_pct = ((1.0 - recent_avg / older_avg) * 100.0).round();
    let estimated = (current_ftp * (recent_avg / older_avg)).round();
    debug!(recent_avg, older_avg, "efficiency decline detected");

    Some(FtpEstimate {
        estimated_ftp: estimated,
        confidence: Confidence::Medium,
        method: "Effizienz-Analyse".to_owned(),
        explanation: format!(
            "Effizienz-Faktor gefallen: {older_avg:.1} → {recent_avg:.1} (-{decline_pct:.0}%)"
        ),
        recommendation: format!(
            "⚠️ Deine Effizienz ist um {decline_pct:.0}% gesunken. Das deutet auf Ermüdung, Übertraining oder Krankheit hin. Reduziere FTP vorübergehend auf **{estimated:.0}W** und gönne dir mehr Erholung."
        ),
    })
}

/// Estimate current FTP from the weekly history.
///
/// Returns `None` when no method's data-availability condition is met.
#[must_use]
pub fn estimate_ftp(
    stats: &[WeeklyStats],
    current_ftp: f64,
    now: DateTime<Utc>,
    cfg: &FtpEstimatorConfig,
) -> Option<FtpEstimate> {
    if stats.is_empty() {
        return None;
    }

    if let Some(estimate) = check_detraining(stats, current_ftp, now, cfg) {
        return Some(estimate);
    }

    let start = stats.len().saturating_sub(cfg.recent_weeks);
    let recent = chronological(&stats[start..]);
    if recent.is_empty() {
        return None;
    }

    if let Some(estimate) = check_efficiency_decline(stats, &recent, current_ftp, cfg) {
        return Some(estimate);
    }

    // Method 1: dedicated threshold work, the most direct FTP signal
    let threshold_workouts: Vec<&EnrichedActivity> = recent
        .iter()
        .copied()
        .filter(|activity| {
            let z4_pct = activity
                .zone_percentages
                .map_or(0.0, |pcts| pcts.z4);
            z4_pct > cfg.threshold_z4_pct
                && activity.activity.moving_time_minutes() > cfg.threshold_min_minutes
                && activity.activity.weighted_average_watts.is_some()
        })
        .collect();

    if !threshold_workouts.is_empty() {
        let avg_watts = mean_weighted_watts(&threshold_workouts);
        let estimated = (avg_watts * cfg.threshold_ftp_factor).round();
        return Some(FtpEstimate {
            estimated_ftp: estimated,
            confidence: Confidence::High,
            method: "Schwellenintervalle".to_owned(),
            explanation: format!(
                "Basierend auf {} Schwellen-Einheiten mit ≥30% Z4-Zeit",
                threshold_workouts.len()
            ),
            recommendation: compare_recommendation(
                estimated,
                current_ftp,
                cfg.ftp_confirm_tolerance,
                &Phrasing::Threshold,
            ),
        });
    }

    // Method 2: sustained long rides
    let long_rides: Vec<&EnrichedActivity> = recent
        .iter()
        .copied()
        .filter(|activity| {
            activity.activity.moving_time_minutes() > cfg.long_ride_min_minutes
                && activity
                    .activity
                    .weighted_average_watts
                    .is_some_and(|watts| watts > cfg.min_meaningful_watts)
        })
        .collect();

    if !long_rides.is_empty() {
        let avg_watts = mean_weighted_watts(&long_rides);
        let estimated = (avg_watts * cfg.long_ride_ftp_factor).round();
        return Some(FtpEstimate {
            estimated_ftp: estimated,
            confidence: Confidence::Medium,
            method: "Lange Ausfahrten".to_owned(),
            explanation: format!(
                "Basierend auf {} Fahrten >45min (Ø{avg_watts:.0}W)",
                long_rides.len()
            ),
            recommendation: compare_recommendation(
                estimated,
                current_ftp,
                cfg.ftp_confirm_tolerance,
                &Phrasing::LongRide,
            ),
        });
    }

    // Method 3: top efforts, conservative fallback
    let mut with_power: Vec<&EnrichedActivity> = recent
        .iter()
        .copied()
        .filter(|activity| {
            activity
                .activity
                .weighted_average_watts
                .is_some_and(|watts| watts > cfg.min_meaningful_watts)
        })
        .collect();

    if with_power.is_empty() {
        return None;
    }

    with_power.sort_by(|a, b| {
        let a_watts = a.activity.weighted_average_watts.unwrap_or(0.0);
        let b_watts = b.activity.weighted_average_watts.unwrap_or(0.0);
        b_watts
            .total_cmp(&a_watts)
            .then(a.activity.id.cmp(&b.activity.id))
    });
    let top: Vec<&EnrichedActivity> = with_power
        .into_iter()
        .take(cfg.best_effort_count)
        .collect();
    let avg_best = mean_weighted_watts(&top);
    let estimated = (avg_best * cfg.best_effort_ftp_factor).round();

    Some(FtpEstimate {
        estimated_ftp: estimated,
        confidence: Confidence::Low,
        method: "Beste Leistungen".to_owned(),
        explanation: format!(
            "Basierend auf Top-{} gewichteten Durchschnittsleistungen (Ø{avg_best:.0}W)",
            top.len()
        ),
        recommendation: format!(
            "💡 Geschätzter FTP: **{estimated:.0}W** (aktuell: {current_ftp:.0}W). Unsichere Schätzung - mache einen strukturierten 20min-Test für genaue Werte!"
        ),
    })
}
