// ABOUTME: Goal-driven scoring of workout templates against the current weekly balance
// ABOUTME: Additive 0-100 score, top-3 shortlist with assembled German reasoning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Workout Recommendations
//!
//! Scores every template in the workout library against the athlete's goal,
//! the current week's zone distribution, how many intensity and endurance
//! sessions already happened this week, and how long ago the last ride was.
//! Scoring is purely additive from a base value, capped, and fully determined
//! by its inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use velocoach_core::models::{TrainingGoal, WorkoutIntensity, WorkoutTemplate};

use crate::config::RecommendationConfig;
use crate::weekly::WeeklyStats;

/// Priority tier of a recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Clearly the right next session
    High,
    /// A solid choice
    Medium,
    /// Acceptable filler
    Low,
}

/// A scored workout recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutRecommendation {
    /// The recommended template
    pub workout: WorkoutTemplate,
    /// Additive score, 0 to 100
    pub score: f64,
    /// Assembled German justification
    pub reasoning: String,
    /// Priority tier derived from the score
    pub priority: Priority,
}

/// Weekly context the scoring rules evaluate against
struct WeekContext {
    z2_pct: f64,
    z3_pct: f64,
    intensity_pct: f64,
    days_since_last_activity: i64,
    intensity_sessions: usize,
    endurance_sessions: usize,
}

impl WeekContext {
    fn build(
        current_week: &WeeklyStats,
        last_activity_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        cfg: &RecommendationConfig,
    ) -> Self {
        let pcts = &current_week.zone_percentages;

        let intensity_sessions = current_week
            .activities
            .iter()
            .filter(|activity| {
                activity
                    .zone_percentages
                    .is_some_and(|p| p.intensity() > cfg.session_intensity_pct)
            })
            .count();
        let endurance_sessions = current_week
            .activities
            .iter()
            .filter(|activity| {
                activity
                    .zone_percentages
                    .is_some_and(|p| p.z2 > cfg.session_endurance_pct)
            })
            .count();

        Self {
            z2_pct: pcts.z2,
            z3_pct: pcts.z3,
            intensity_pct: pcts.intensity(),
            days_since_last_activity: last_activity_date
                .map_or(0, |date| (now - date).num_days()),
            intensity_sessions,
            endurance_sessions,
        }
    }
}

const fn is_easy(intensity: WorkoutIntensity) -> bool {
    intensity.is_endurance()
}

const fn is_hard_interval(intensity: WorkoutIntensity) -> bool {
    matches!(
        intensity,
        WorkoutIntensity::Threshold | WorkoutIntensity::Vo2max
    )
}

fn score_workout(
    workout: &WorkoutTemplate,
    goal: TrainingGoal,
    ctx: &WeekContext,
    cfg: &RecommendationConfig,
) -> f64 {
    let mut score = cfg.base_score;
    let intensity = workout.intensity;

    // 1. Goal alignment
    if cfg.types_for(goal).contains(&workout.workout_type) {
        score += cfg.goal_match_bonus;
    }

    // 2. Zone-distribution correction
    if ctx.z3_pct > cfg.grey_zone_pct {
        if is_easy(intensity) {
            score += cfg.grey_zone_easy_bonus;
        } else if is_hard_interval(intensity) {
            score += cfg.grey_zone_hard_bonus;
        }
    }
    if goal == TrainingGoal::IncreaseFtp
        && ctx.intensity_pct < cfg.low_intensity_pct
        && matches!(
            intensity,
            WorkoutIntensity::SweetSpot | WorkoutIntensity::Threshold
        )
    {
        score += cfg.ftp_intensity_bonus;
    }
    let endurance_goal =
        matches!(goal, TrainingGoal::BuildEndurance | TrainingGoal::BuildBase);
    if endurance_goal
        && ctx.z2_pct < cfg.low_z2_pct
        && intensity == WorkoutIntensity::Endurance
    {
        score += cfg.endurance_z2_bonus;
    }

    // 3. Weekly balance
    if goal == TrainingGoal::IncreaseFtp {
        if ctx.intensity_sessions < cfg.ftp_weekly_intensity_target && intensity.is_intensity() {
            score += cfg.balance_primary_bonus;
        } else if ctx.intensity_sessions >= cfg.ftp_weekly_intensity_target && is_easy(intensity) {
            score += cfg.balance_primary_bonus;
        } else if ctx.endurance_sessions < cfg.ftp_weekly_intensity_target && is_easy(intensity) {
            score += cfg.balance_base_bonus;
        }
    }
    if endurance_goal {
        if ctx.endurance_sessions < cfg.endurance_weekly_target && is_easy(intensity) {
            score += cfg.balance_primary_bonus;
        } else if ctx.endurance_sessions >= cfg.endurance_weekly_target
            && ctx.intensity_sessions == 0
            && matches!(
                intensity,
                WorkoutIntensity::Tempo | WorkoutIntensity::SweetSpot
            )
        {
            score += cfg.balance_intensity_slot_bonus;
        }
    }

    // 4. Recovery
    if ctx.days_since_last_activity > cfg.comeback_break_days {
        if is_easy(intensity) {
            score += cfg.comeback_bonus;
        }
    } else if ctx.days_since_last_activity < 1 && intensity == WorkoutIntensity::Recovery {
        score += cfg.recovery_bonus;
    }

    // 5. Duration
    let duration_min = workout.duration_minutes();
    if duration_min >= cfg.duration_min_minutes && duration_min <= cfg.duration_max_minutes {
        score += cfg.duration_bonus;
    }

    score.min(cfg.max_score)
}

fn session_word(count: usize) -> &'static str {
    if count == 1 {
        "Einheit"
    } else {
        "Einheiten"
    }
}

fn generate_reasoning(
    workout: &WorkoutTemplate,
    goal: TrainingGoal,
    ctx: &WeekContext,
    cfg: &RecommendationConfig,
) -> String {
    let mut parts = vec![format!("**Passt zu deinem Ziel \"{}\"**", goal.label())];
    let intensity = workout.intensity;
    let endurance_goal =
        matches!(goal, TrainingGoal::BuildEndurance | TrainingGoal::BuildBase);

    if goal == TrainingGoal::IncreaseFtp {
        if ctx.intensity_sessions < cfg.ftp_weekly_intensity_target && intensity.is_intensity() {
            parts.push(format!(
                "Diese Woche erst {} Intervall-{}. Ziel: 2x Intensität + 2x Basis pro Woche.",
                ctx.intensity_sessions,
                session_word(ctx.intensity_sessions)
            ));
        } else if ctx.intensity_sessions >= cfg.ftp_weekly_intensity_target && is_easy(intensity) {
            parts.push(format!(
                "Schon {} intensive Einheiten diese Woche - jetzt lockere Kilometer für Erholung.",
                ctx.intensity_sessions
            ));
        }
    }

    if endurance_goal && ctx.endurance_sessions < cfg.endurance_weekly_target && is_easy(intensity)
    {
        parts.push(format!(
            "Bisher {} Grundlagen-{}. Ziel: 3-4x Z2-Training pro Woche.",
            ctx.endurance_sessions,
            session_word(ctx.endurance_sessions)
        ));
    }

    if ctx.z3_pct > cfg.grey_zone_pct {
        if is_easy(intensity) {
            parts.push(format!(
                "Du hast aktuell {:.0}% in Zone 3 (Junk Miles). Dieses Workout bringt dich zurück in Zone 2.",
                ctx.z3_pct
            ));
        } else if is_hard_interval(intensity) {
            parts.push(
                "Statt weiter in Zone 3 zu fahren, nutze dieses Workout für echte Intensität in Z4/Z5."
                    .to_owned(),
            );
        }
    }

    if goal == TrainingGoal::IncreaseFtp && ctx.intensity_pct < cfg.low_intensity_pct {
        parts.push(format!(
            "Aktuell nur {:.0}% in Z4/Z5. Dieses {}-Training hebt deine FTP.",
            ctx.intensity_pct,
            intensity.label()
        ));
    }

    if endurance_goal && ctx.z2_pct < cfg.low_z2_pct {
        parts.push(format!(
            "Für Ausdauer-Aufbau brauchst du mehr Z2 (aktuell {:.0}%). Dieses Workout hilft dabei.",
            ctx.z2_pct
        ));
    }

    if ctx.days_since_last_activity > cfg.comeback_break_days {
        parts.push(format!(
            "Nach {} Tagen Pause ein idealer Wiedereinstieg.",
            ctx.days_since_last_activity
        ));
    } else if ctx.days_since_last_activity < 1 && intensity == WorkoutIntensity::Recovery {
        parts.push("Aktive Erholung nach deiner letzten Einheit - sanft aber effektiv.".to_owned());
    }

    parts.push(format!(
        "**{}** @ ~{:.0}% FTP",
        workout.duration_formatted(),
        workout.avg_power_fraction * 100.0
    ));

    parts.join(" • ")
}

/// Score the workout library and return the top recommendations.
///
/// Returns an empty list when the library or the weekly history is empty.
#[must_use]
pub fn recommend_workouts(
    library: &[WorkoutTemplate],
    stats: &[WeeklyStats],
    goal: TrainingGoal,
    last_activity_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cfg: &RecommendationConfig,
) -> Vec<WorkoutRecommendation> {
    let Some(current_week) = stats.last() else {
        return Vec::new();
    };
    if library.is_empty() {
        return Vec::new();
    }

    let ctx = WeekContext::build(current_week, last_activity_date, now, cfg);

    let mut scored: Vec<(&WorkoutTemplate, f64)> = library
        .iter()
        .map(|workout| (workout, score_workout(workout, goal, &ctx, cfg)))
        .collect();

    // Highest score first; template id breaks ties deterministically
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.id.cmp(&b.0.id)));

    scored
        .into_iter()
        .take(cfg.top_count)
        .map(|(workout, score)| WorkoutRecommendation {
            reasoning: generate_reasoning(workout, goal, &ctx, cfg),
            priority: if score > cfg.high_priority_score {
                Priority::High
            } else if score > cfg.medium_priority_score {
                Priority::Medium
            } else {
                Priority::Low
            },
            workout: workout.clone(),
            score,
        })
        .collect()
}
