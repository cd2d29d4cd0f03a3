// ABOUTME: Power-to-weight and body-composition performance metrics
// ABOUTME: Combines weekly training stats with the external body-measurement series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Performance Metrics
//!
//! Every sub-result is independently optional: a missing weight, a short
//! body-composition series, or a week without power each degrade only their
//! own field to `None` instead of failing the calculation.

use serde::{Deserialize, Serialize};
use velocoach_core::constants::body_trends;
use velocoach_core::models::BodyMeasurement;

use crate::weekly::WeeklyStats;

/// Direction of an absolute-valued trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Value increased beyond the stability band
    Up,
    /// Value decreased beyond the stability band
    Down,
    /// Value stayed within the stability band
    Stable,
}

/// Direction of a ratio trend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RatioDirection {
    /// Ratio improved beyond the stability band
    Improving,
    /// Ratio declined beyond the stability band
    Declining,
    /// Ratio stayed within the stability band
    Stable,
}

/// Earliest-vs-latest weight comparison over the body-measurement series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightTrend {
    /// Latest minus earliest weight, kg
    pub change_kg: f64,
    /// Trend classification at the ±0.5 kg stability band
    pub direction: TrendDirection,
    /// Earliest weight in the series, kg
    pub start_kg: f64,
    /// Latest weight in the series, kg
    pub end_kg: f64,
    /// Number of weekly entries spanned
    pub weeks_spanned: usize,
}

/// Independent fat-ratio and muscle-mass trends
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BodyCompositionTrend {
    /// Latest minus earliest fat ratio, percentage points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_change_pct: Option<f64>,
    /// Fat trend classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_direction: Option<TrendDirection>,
    /// Latest minus earliest muscle mass, kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_change_kg: Option<f64>,
    /// Muscle trend classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_direction: Option<TrendDirection>,
}

impl BodyCompositionTrend {
    fn is_empty(&self) -> bool {
        self.fat_direction.is_none() && self.muscle_direction.is_none()
    }
}

/// Power-to-weight ratio trend over weeks with both power and weight data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PowerToWeightTrend {
    /// Percent change of the ratio from the first to the last matched week
    pub change_pct: f64,
    /// Trend classification at the ±2% stability band
    pub direction: RatioDirection,
}

/// Combined performance metrics for the current week
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceMetrics {
    /// Current avg power over current weight, W/kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_to_weight: Option<f64>,
    /// Efficiency factor scaled per kg of body weight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency_per_kg: Option<f64>,
    /// Weight trend over the measurement series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_trend: Option<WeightTrend>,
    /// Fat and muscle trends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_comp_trend: Option<BodyCompositionTrend>,
    /// W/kg trend over matched weeks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_to_weight_trend: Option<PowerToWeightTrend>,
    /// Rendered German insight strings, highest priority first
    pub insights: Vec<String>,
}

fn direction(change: f64, stable_delta: f64) -> TrendDirection {
    if change > stable_delta {
        TrendDirection::Up
    } else if change < -stable_delta {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    }
}

/// Combine the current week's stats with the body-measurement series.
///
/// Returns an empty metrics structure when the current week or the latest
/// weight is unavailable; the remaining fields are each computed only when
/// their own inputs suffice.
#[must_use]
pub fn calculate_performance_metrics(
    current_week: Option<&WeeklyStats>,
    latest: Option<&BodyMeasurement>,
    body_series: &[BodyMeasurement],
    all_stats: &[WeeklyStats],
) -> PerformanceMetrics {
    let mut metrics = PerformanceMetrics::default();

    let (Some(current), Some(weight)) = (current_week, latest.and_then(|m| m.weight_kg)) else {
        return metrics;
    };
    if weight <= 0.0 {
        return metrics;
    }

    if current.avg_power > 0.0 {
        metrics.power_to_weight = Some(current.avg_power / weight);
    }
    if current.efficiency_factor > 0.0 {
        metrics.efficiency_per_kg = Some(current.efficiency_factor * 100.0 / weight);
    }

    let mut sorted: Vec<&BodyMeasurement> = body_series
        .iter()
        .filter(|entry| entry.weight_kg.is_some())
        .collect();
    sorted.sort_by_key(|entry| entry.week_start);

    if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
        if sorted.len() >= 2 {
            if let (Some(start_kg), Some(end_kg)) = (first.weight_kg, last.weight_kg) {
                let change_kg = end_kg - start_kg;
                metrics.weight_trend = Some(WeightTrend {
                    change_kg,
                    direction: direction(change_kg, body_trends::WEIGHT_STABLE_DELTA_KG),
                    start_kg,
                    end_kg,
                    weeks_spanned: sorted.len(),
                });
            }
        }
    }

    if body_series.len() >= 2 {
        let mut comp = BodyCompositionTrend::default();

        let mut with_fat: Vec<&BodyMeasurement> = body_series
            .iter()
            .filter(|entry| entry.fat_ratio_pct.is_some())
            .collect();
        with_fat.sort_by_key(|entry| entry.week_start);
        if with_fat.len() >= 2 {
            if let (Some(first), Some(last)) = (
                with_fat.first().and_then(|e| e.fat_ratio_pct),
                with_fat.last().and_then(|e| e.fat_ratio_pct),
            ) {
                let change = last - first;
                comp.fat_change_pct = Some(change);
                comp.fat_direction =
                    Some(direction(change, body_trends::COMPOSITION_STABLE_DELTA));
            }
        }

        let mut with_muscle: Vec<&BodyMeasurement> = body_series
            .iter()
            .filter(|entry| entry.muscle_mass_kg.is_some())
            .collect();
        with_muscle.sort_by_key(|entry| entry.week_start);
        if with_muscle.len() >= 2 {
            if let (Some(first), Some(last)) = (
                with_muscle.first().and_then(|e| e.muscle_mass_kg),
                with_muscle.last().and_then(|e| e.muscle_mass_kg),
            ) {
                let change = last - first;
                comp.muscle_change_kg = Some(change);
                comp.muscle_direction =
                    Some(direction(change, body_trends::COMPOSITION_STABLE_DELTA));
            }
        }

        if !comp.is_empty() {
            metrics.body_comp_trend = Some(comp);
        }
    }

    if all_stats.len() >= 2 && !body_series.is_empty() {
        let matched: Vec<f64> = all_stats
            .iter()
            .filter(|week| week.avg_power > 0.0)
            .filter_map(|week| {
                body_series
                    .iter()
                    .find(|entry| entry.week_start == week.week_start)
                    .and_then(|entry| entry.weight_kg)
                    .filter(|kg| *kg > 0.0)
                    .map(|kg| week.avg_power / kg)
            })
            .collect();

        if let (Some(first), Some(last)) = (matched.first(), matched.last()) {
            if matched.len() >= 2 && *first > 0.0 {
                let change_pct = (last - first) / first * 100.0;
                let dir = if change_pct > body_trends::POWER_TO_WEIGHT_STABLE_PCT {
                    RatioDirection::Improving
                } else if change_pct < -body_trends::POWER_TO_WEIGHT_STABLE_PCT {
                    RatioDirection::Declining
                } else {
                    RatioDirection::Stable
                };
                metrics.power_to_weight_trend = Some(PowerToWeightTrend {
                    change_pct,
                    direction: dir,
                });
            }
        }
    }

    metrics.insights = render_insights(&metrics);
    metrics
}

/// W/kg tier label used in the insight list
fn power_to_weight_tier(ratio: f64) -> &'static str {
    if ratio >= 4.0 {
        "Spitzenniveau"
    } else if ratio >= 3.5 {
        "Fortgeschritten"
    } else if ratio >= 3.0 {
        "Ambitioniert"
    } else if ratio >= 2.5 {
        "Moderat"
    } else {
        "Einsteiger"
    }
}

fn render_insights(metrics: &PerformanceMetrics) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(ratio) = metrics.power_to_weight {
        insights.push(format!(
            "**{ratio:.2} W/kg** ({})",
            power_to_weight_tier(ratio)
        ));
    }

    let comp = metrics.body_comp_trend.as_ref();
    let fat_dir = comp.and_then(|c| c.fat_direction);
    let muscle_dir = comp.and_then(|c| c.muscle_direction);
    let fat_change = comp.and_then(|c| c.fat_change_pct).unwrap_or(0.0);
    let muscle_change = comp.and_then(|c| c.muscle_change_kg).unwrap_or(0.0);

    if let Some(trend) = &metrics.weight_trend {
        match trend.direction {
            TrendDirection::Down => {
                if muscle_dir == Some(TrendDirection::Down)
                    && fat_dir != Some(TrendDirection::Down)
                {
                    insights.push(format!(
                        "⚠️ Gewicht: **{:.1} kg** – Achtung: Muskelverlust ({muscle_change:.1} kg)!",
                        trend.change_kg
                    ));
                } else if fat_dir == Some(TrendDirection::Down) {
                    insights.push(format!(
                        "✅ Gewicht: **{:.1} kg** – Fett ↓ {:.1}% (optimal!)",
                        trend.change_kg,
                        fat_change.abs()
                    ));
                } else {
                    insights.push(format!(
                        "📉 Gewicht: **{:.1} kg** über {} Wochen – gut für W/kg!",
                        trend.change_kg, trend.weeks_spanned
                    ));
                }
            }
            TrendDirection::Up => {
                let gained = trend.change_kg.abs();
                if muscle_dir == Some(TrendDirection::Up) && fat_dir != Some(TrendDirection::Up) {
                    insights.push(format!(
                        "💪 Gewicht: **+{gained:.1} kg** – davon +{muscle_change:.1} kg Muskeln!"
                    ));
                } else if muscle_dir == Some(TrendDirection::Up)
                    && fat_dir == Some(TrendDirection::Up)
                {
                    insights.push(format!(
                        "📈 Gewicht: **+{gained:.1} kg** – Muskeln +{muscle_change:.1} kg, Fett +{fat_change:.1}%"
                    ));
                } else if fat_dir == Some(TrendDirection::Up) {
                    insights.push(format!(
                        "📈 Gewicht: **+{gained:.1} kg** – hauptsächlich Fett (+{fat_change:.1}%)"
                    ));
                } else {
                    insights.push(format!(
                        "📈 Gewicht: **+{gained:.1} kg** – prüfe ob Muskelaufbau oder Fett."
                    ));
                }
            }
            TrendDirection::Stable => {}
        }
    } else if let Some(comp) = comp {
        if comp.fat_direction == Some(TrendDirection::Down)
            && comp.muscle_direction != Some(TrendDirection::Down)
        {
            insights.push(format!(
                "✅ Ideale Körperkomposition: Fett ↓ {:.1}%",
                fat_change.abs()
            ));
        } else if comp.muscle_direction == Some(TrendDirection::Up) {
            insights.push(format!("💪 Muskelaufbau: +{muscle_change:.1} kg"));
        }
    }

    if let Some(trend) = &metrics.power_to_weight_trend {
        if trend.direction == RatioDirection::Improving {
            insights.push(format!(
                "🚀 W/kg verbessert sich um {:.1}%!",
                trend.change_pct
            ));
        }
    }

    insights
}
