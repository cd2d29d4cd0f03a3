// ABOUTME: Multi-signal training progress assessment over the recent weekly stats
// ABOUTME: Break detection, EF baseline comparison, goal-driven zone balance, BP trend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Progress Assessment
//!
//! A state machine over the last weeks of [`WeeklyStats`]. Break detection
//! runs first and short-circuits the efficiency logic; the blood-pressure
//! trend is independent and appended to every outcome. The function is total:
//! every branch produces a complete [`ProgressAssessment`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use velocoach_core::constants::blood_pressure;
use velocoach_core::models::{BloodPressureReading, BodyMeasurement, TrainingGoal};

use crate::config::ProgressConfig;
use crate::weekly::WeeklyStats;
use crate::zones::ZonePercentages;

/// Classified training status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Fewer than two weeks of data
    InsufficientData,
    /// Two weeks or more without an activity
    TrainingBreak,
    /// Seven to thirteen days without an activity
    ShortBreak,
    /// Efficiency clearly improving
    BuildingFitness,
    /// Efficiency falling under high volume
    HighLoadFatigue,
    /// Efficiency falling without high volume
    Stagnating,
    /// Volume rising at stable efficiency
    ProductiveLoad,
    /// Stable efficiency and volume
    Maintenance,
}

impl ProgressStatus {
    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InsufficientData => "Insufficient Data",
            Self::TrainingBreak => "Training Break",
            Self::ShortBreak => "Short Break",
            Self::BuildingFitness => "Building Fitness",
            Self::HighLoadFatigue => "High Load / Fatigue",
            Self::Stagnating => "Stagnating",
            Self::ProductiveLoad => "Productive Load",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Severity color tag consumed by the presentation layer
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::InsufficientData => "bg-gray-50 border-gray-200",
            Self::TrainingBreak | Self::HighLoadFatigue => "bg-orange-50 border-orange-200",
            Self::ShortBreak => "bg-yellow-50 border-yellow-200",
            Self::BuildingFitness => "bg-green-50 border-green-200",
            Self::Stagnating => "bg-gray-100 border-gray-300",
            Self::ProductiveLoad => "bg-indigo-50 border-indigo-200",
            Self::Maintenance => "bg-blue-50 border-blue-200",
        }
    }
}

/// Current weight with a rendered framing message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightInsight {
    /// Current weight, kg
    pub current_kg: f64,
    /// Rendered German message
    pub message: String,
}

/// Direction of the blood-pressure trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BloodPressureTrend {
    /// Latest reading clearly below the earlier mean
    Improving,
    /// Latest reading clearly above the earlier mean
    Worsening,
    /// Latest reading near the earlier mean
    Stable,
}

/// Latest blood-pressure reading compared against the earlier mean
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureInsight {
    /// Latest systolic pressure, mmHg
    pub systolic: f64,
    /// Latest diastolic pressure, mmHg
    pub diastolic: f64,
    /// Trend classification
    pub trend: BloodPressureTrend,
    /// Rendered German message
    pub message: String,
    /// Additional note (absolute classification or medical referral)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// The complete progress assessment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressAssessment {
    /// Classified training status
    pub status: ProgressStatus,
    /// Rendered status message
    pub message: String,
    /// Actionable next step (usually the zone-balance recommendation)
    pub next_step: String,
    /// Severity color tag
    pub color: String,
    /// Current weight framing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_insight: Option<WeightInsight>,
    /// Blood-pressure trend, independent of the training signals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressureInsight>,
}

impl ProgressAssessment {
    fn new(status: ProgressStatus, message: String, next_step: String) -> Self {
        Self {
            status,
            message,
            next_step,
            color: status.color().to_owned(),
            weight_insight: None,
            blood_pressure: None,
        }
    }
}

fn render_template(template: &str, pcts: &ZonePercentages) -> String {
    template
        .replace("{z2}", &format!("{:.0}", pcts.z2))
        .replace("{z3}", &format!("{:.0}", pcts.z3))
        .replace("{z5}", &format!("{:.0}", pcts.z5))
}

#[derive(PartialEq, Eq)]
enum ZoneVerdict {
    LowZ2,
    IntensityPush,
    GreyZone,
    HighZ5,
    Balanced,
}

/// Goal-specific zone-balance recommendation for the current week.
///
/// The global grey-zone and burnout warnings take precedence over the
/// goal-specific sentence and are prepended to it, unless that sentence
/// already covers the same condition.
fn zone_recommendation(
    goal: TrainingGoal,
    pcts: &ZonePercentages,
    cfg: &ProgressConfig,
) -> String {
    let targets = cfg.targets_for(goal);
    let intensity = pcts.intensity();

    let (verdict, template) = if pcts.z2 < targets.min_z2_pct {
        (ZoneVerdict::LowZ2, &targets.low_z2_text)
    } else if pcts.z2 >= targets.strong_z2_pct && intensity < targets.max_intensity_pct {
        (ZoneVerdict::IntensityPush, &targets.intensity_push_text)
    } else if pcts.z3 > targets.max_z3_pct {
        (ZoneVerdict::GreyZone, &targets.grey_zone_text)
    } else if pcts.z5 > targets.max_z5_pct {
        (ZoneVerdict::HighZ5, &targets.high_z5_text)
    } else {
        (ZoneVerdict::Balanced, &targets.balanced_text)
    };

    let rendered = render_template(template, pcts);

    if pcts.z3 > cfg.grey_zone_warn_pct && verdict != ZoneVerdict::GreyZone {
        return format!("{} {rendered}", render_template(&cfg.grey_zone_warning, pcts));
    }
    if pcts.z5 > cfg.z5_warn_pct && verdict != ZoneVerdict::HighZ5 {
        return format!("{} {rendered}", render_template(&cfg.z5_warning, pcts));
    }
    rendered
}

fn weight_insight(latest: Option<&BodyMeasurement>) -> Option<WeightInsight> {
    let measurement = latest?;
    let weight = measurement.weight_kg?;

    let mut message = format!("Aktuelles Gewicht: **{weight:.1} kg**");
    if let Some(fat) = measurement.fat_ratio_pct {
        let framing = if fat < 15.0 {
            format!(" (Fett: {fat:.1}% - athletisch)")
        } else if fat < 20.0 {
            format!(" (Fett: {fat:.1}% - gut)")
        } else if fat < 25.0 {
            format!(" (Fett: {fat:.1}% - moderat)")
        } else {
            format!(" (Fett: {fat:.1}%)")
        };
        message.push_str(&framing);
    }

    Some(WeightInsight {
        current_kg: weight,
        message,
    })
}

/// Trend of the latest reading against the mean of all earlier readings.
///
/// Needs at least two readings with both pressures present; otherwise `None`.
#[must_use]
pub fn analyze_blood_pressure(
    readings: &[BloodPressureReading],
) -> Option<BloodPressureInsight> {
    let mut valid: Vec<(&BloodPressureReading, (f64, f64))> = readings
        .iter()
        .filter_map(|reading| reading.values().map(|values| (reading, values)))
        .collect();
    valid.sort_by_key(|(reading, _)| reading.week_start);

    if valid.len() < 2 {
        return None;
    }

    let (_, (systolic, diastolic)) = valid[valid.len() - 1];
    let earlier = &valid[..valid.len() - 1];
    let mean_systolic =
        earlier.iter().map(|(_, (sys, _))| sys).sum::<f64>() / earlier.len() as f64;
    let mean_diastolic =
        earlier.iter().map(|(_, (_, dia))| dia).sum::<f64>() / earlier.len() as f64;

    let systolic_delta = systolic - mean_systolic;
    let diastolic_delta = diastolic - mean_diastolic;

    if systolic_delta < -blood_pressure::SYSTOLIC_TREND_DELTA
        || diastolic_delta < -blood_pressure::DIASTOLIC_TREND_DELTA
    {
        return Some(BloodPressureInsight {
            systolic,
            diastolic,
            trend: BloodPressureTrend::Improving,
            message: format!(
                "✅ Blutdruck verbessert sich: **{systolic:.0}/{diastolic:.0} mmHg** (Ø vorher {mean_systolic:.0}/{mean_diastolic:.0})."
            ),
            note: None,
        });
    }

    if systolic_delta > blood_pressure::SYSTOLIC_TREND_DELTA
        || diastolic_delta > blood_pressure::DIASTOLIC_TREND_DELTA
    {
        let note = (systolic >= blood_pressure::REFERRAL_SYSTOLIC
            || diastolic >= blood_pressure::REFERRAL_DIASTOLIC)
            .then(|| {
                "🩺 Werte ≥140/90 mmHg. Bitte lass den Blutdruck ärztlich abklären.".to_owned()
            });
        return Some(BloodPressureInsight {
            systolic,
            diastolic,
            trend: BloodPressureTrend::Worsening,
            message: format!(
                "⚠️ Blutdruck steigt: **{systolic:.0}/{diastolic:.0} mmHg** (Ø vorher {mean_systolic:.0}/{mean_diastolic:.0})."
            ),
            note,
        });
    }

    let classification = if systolic < blood_pressure::OPTIMAL_SYSTOLIC
        && diastolic < blood_pressure::OPTIMAL_DIASTOLIC
    {
        "optimal"
    } else if systolic < blood_pressure::GOOD_SYSTOLIC && diastolic < blood_pressure::GOOD_DIASTOLIC
    {
        "gut"
    } else {
        "grenzwertig"
    };

    Some(BloodPressureInsight {
        systolic,
        diastolic,
        trend: BloodPressureTrend::Stable,
        message: format!(
            "Blutdruck stabil: **{systolic:.0}/{diastolic:.0} mmHg** ({classification})."
        ),
        note: None,
    })
}

fn detect_break(
    stats: &[WeeklyStats],
    now: DateTime<Utc>,
    current_ftp: f64,
    cfg: &ProgressConfig,
) -> Option<ProgressAssessment> {
    let last_activity = stats
        .iter()
        .flat_map(|week| &week.activities)
        .map(|activity| activity.activity.start_date)
        .max()?;

    let idle_days = (now - last_activity).num_days();

    if idle_days >= cfg.long_break_days {
        let weeks_off = idle_days / 7;
        let loss_pct = (weeks_off as f64 * cfg.ftp_loss_pct_per_week).min(cfg.max_ftp_loss_pct);
        let suggested_ftp = (current_ftp * (1.0 - loss_pct / 100.0)).round();
        debug!(idle_days, loss_pct, "training break detected");
        return Some(ProgressAssessment::new(
            ProgressStatus::TrainingBreak,
            format!(
                "⚠️ {idle_days} Tage ohne Training (≈{weeks_off} Wochen). Detraining-Effekt: ~{loss_pct:.0}%."
            ),
            format!(
                "Senke die FTP auf **{suggested_ftp:.0}W** (war: {current_ftp:.0}W), starte sanft mit Z1/Z2-Einheiten und teste nach 2-3 Wochen neu."
            ),
        ));
    }

    if idle_days >= cfg.short_break_days {
        let suggested_ftp = (current_ftp * cfg.short_break_ftp_factor).round();
        return Some(ProgressAssessment::new(
            ProgressStatus::ShortBreak,
            format!("💡 {idle_days} Tage Trainingspause."),
            format!(
                "Starte mit reduzierten Intensitäten. Wenn die ersten Einheiten schwerfallen, senke die FTP vorübergehend auf **{suggested_ftp:.0}W**."
            ),
        ));
    }

    None
}

/// Assess overall training progress over the recent weeks.
///
/// Total function: every input combination yields a complete assessment. The
/// blood-pressure trend is computed independently and attached to whatever
/// status the training signals produce.
#[must_use]
pub fn assess_progress(
    stats: &[WeeklyStats],
    now: DateTime<Utc>,
    latest_weight: Option<&BodyMeasurement>,
    blood_pressure_readings: &[BloodPressureReading],
    goal: TrainingGoal,
    current_ftp: f64,
    cfg: &ProgressConfig,
) -> ProgressAssessment {
    let bp_insight = analyze_blood_pressure(blood_pressure_readings);

    if stats.len() < 2 {
        let mut assessment = ProgressAssessment::new(
            ProgressStatus::InsufficientData,
            "Keep training! I need a few more weeks of data to analyze your long-term trends."
                .to_owned(),
            "Keep logging consistent rides.".to_owned(),
        );
        assessment.blood_pressure = bp_insight;
        return assessment;
    }

    if let Some(mut assessment) = detect_break(stats, now, current_ftp, cfg) {
        assessment.weight_insight = weight_insight(latest_weight);
        assessment.blood_pressure = bp_insight;
        return assessment;
    }

    let start = stats.len().saturating_sub(cfg.assessment_weeks);
    let recent = &stats[start..];
    let Some((current, previous)) = recent.split_last() else {
        // unreachable: stats.len() >= 2 is checked above
        let mut assessment = ProgressAssessment::new(
            ProgressStatus::InsufficientData,
            "Keep training! I need a few more weeks of data to analyze your long-term trends."
                .to_owned(),
            "Keep logging consistent rides.".to_owned(),
        );
        assessment.blood_pressure = bp_insight;
        return assessment;
    };

    let positive_ef: Vec<f64> = previous
        .iter()
        .map(|week| week.efficiency_factor)
        .filter(|ef| *ef > 0.0)
        .collect();
    let baseline_ef = if positive_ef.is_empty() {
        0.0
    } else {
        positive_ef.iter().sum::<f64>() / positive_ef.len() as f64
    };
    let current_ef = current.efficiency_factor;

    let baseline_work = if previous.is_empty() {
        0.0
    } else {
        previous.iter().map(|week| week.total_calories).sum::<f64>() / previous.len() as f64
    };
    let current_work = current.total_calories;

    let zone_rec = zone_recommendation(goal, &current.zone_percentages, cfg);

    let mut assessment = if baseline_ef > 0.0 && current_ef > 0.0 {
        let ef_change = (current_ef - baseline_ef) / baseline_ef * 100.0;

        if ef_change > cfg.ef_improvement_pct {
            ProgressAssessment::new(
                ProgressStatus::BuildingFitness,
                format!(
                    "Starker Trend! Deine Effizienz hat sich um **{ef_change:.1}%** verbessert."
                ),
                zone_rec,
            )
        } else if ef_change < -cfg.ef_decline_pct {
            if current_work > baseline_work * cfg.high_volume_ratio {
                ProgressAssessment::new(
                    ProgressStatus::HighLoadFatigue,
                    format!(
                        "Deine Effizienz sinkt bei hohem Volumen (-{:.1}%). Du könntest ermüdet sein.",
                        ef_change.abs()
                    ),
                    "**Erholungswoche einplanen!** Kürze das Volumen um 30-50% und fahre nur locker (Z1/Z2), damit sich der Körper anpassen kann.".to_owned(),
                )
            } else {
                ProgressAssessment::new(
                    ProgressStatus::Stagnating,
                    format!("Deine Effizienz ist leicht gesunken (-{:.1}%).", ef_change.abs()),
                    format!(
                        "**Reiz verändern!** Dein Training könnte zu monoton sein. {zone_rec}"
                    ),
                )
            }
        } else if current_work > baseline_work * cfg.productive_volume_ratio {
            ProgressAssessment::new(
                ProgressStatus::ProductiveLoad,
                "Du steigerst das Volumen erfolgreich und hältst dabei deine Effizienz."
                    .to_owned(),
                zone_rec,
            )
        } else {
            ProgressAssessment::new(
                ProgressStatus::Maintenance,
                "Deine Fitness ist stabil. Keine großen Sprünge, aber auch kein Einbruch."
                    .to_owned(),
                "**Plateau durchbrechen.** Wenn du dich frisch fühlst, erhöhe die Dauer der langen Ausfahrt oder die Intensität der Intervalle.".to_owned(),
            )
        }
    } else {
        // No usable EF on one side of the comparison; fall back to the
        // zone-balance recommendation alone.
        ProgressAssessment::new(
            ProgressStatus::Maintenance,
            "Deine Fitness ist stabil.".to_owned(),
            zone_rec,
        )
    };

    assessment.weight_insight = weight_insight(latest_weight);
    assessment.blood_pressure = bp_insight;
    assessment
}
