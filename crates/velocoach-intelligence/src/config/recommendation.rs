// ABOUTME: Workout recommendation scoring weights and the goal-to-workout-type table
// ABOUTME: Additive 0-100 scoring; every bonus and threshold is tunable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use velocoach_core::models::{TrainingGoal, WorkoutType};

/// Scoring weights and thresholds for the workout recommender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Starting score for every template
    pub base_score: f64,
    /// Maximum total score
    pub max_score: f64,
    /// Bonus when the template type matches the goal's type set
    pub goal_match_bonus: f64,
    /// Bonus for easy templates when the week is grey-zone heavy
    pub grey_zone_easy_bonus: f64,
    /// Bonus for hard templates when the week is grey-zone heavy
    pub grey_zone_hard_bonus: f64,
    /// Z3 percentage above which grey-zone correction kicks in
    pub grey_zone_pct: f64,
    /// Bonus for sweet-spot/threshold templates when an FTP goal lacks intensity
    pub ftp_intensity_bonus: f64,
    /// Z4+Z5 percentage below which an FTP goal lacks intensity
    pub low_intensity_pct: f64,
    /// Bonus for endurance templates when an endurance goal lacks Z2
    pub endurance_z2_bonus: f64,
    /// Z2 percentage below which an endurance goal lacks base
    pub low_z2_pct: f64,
    /// Weekly-balance bonus when the needed session class is missing
    pub balance_primary_bonus: f64,
    /// Weekly-balance bonus for base work behind schedule
    pub balance_base_bonus: f64,
    /// Weekly-balance bonus for the single allowed intensity session
    pub balance_intensity_slot_bonus: f64,
    /// Intensity sessions per week targeted by FTP goals
    pub ftp_weekly_intensity_target: usize,
    /// Endurance sessions per week targeted by base/endurance goals
    pub endurance_weekly_target: usize,
    /// Per-activity Z4+Z5 percentage above which a session counts as intensity
    pub session_intensity_pct: f64,
    /// Per-activity Z2 percentage above which a session counts as endurance
    pub session_endurance_pct: f64,
    /// Bonus for easy templates after a break longer than a week
    pub comeback_bonus: f64,
    /// Bonus for recovery templates the day after a session
    pub recovery_bonus: f64,
    /// Break length in days triggering the comeback bonus
    pub comeback_break_days: i64,
    /// Bonus for templates inside the preferred duration window
    pub duration_bonus: f64,
    /// Preferred duration window lower bound, minutes
    pub duration_min_minutes: f64,
    /// Preferred duration window upper bound, minutes
    pub duration_max_minutes: f64,
    /// Recommendations returned
    pub top_count: usize,
    /// Score above which a recommendation is high priority
    pub high_priority_score: f64,
    /// Score above which a recommendation is medium priority
    pub medium_priority_score: f64,
    /// Workout types serving each training goal
    pub goal_types: HashMap<TrainingGoal, Vec<WorkoutType>>,
}

impl RecommendationConfig {
    /// Workout types serving a goal; empty when the goal has no mapping
    #[must_use]
    pub fn types_for(&self, goal: TrainingGoal) -> &[WorkoutType] {
        self.goal_types.get(&goal).map_or(&[], Vec::as_slice)
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            base_score: 50.0,
            max_score: 100.0,
            goal_match_bonus: 40.0,
            grey_zone_easy_bonus: 30.0,
            grey_zone_hard_bonus: 25.0,
            grey_zone_pct: 30.0,
            ftp_intensity_bonus: 30.0,
            low_intensity_pct: 15.0,
            endurance_z2_bonus: 30.0,
            low_z2_pct: 70.0,
            balance_primary_bonus: 25.0,
            balance_base_bonus: 20.0,
            balance_intensity_slot_bonus: 15.0,
            ftp_weekly_intensity_target: 2,
            endurance_weekly_target: 3,
            session_intensity_pct: 20.0,
            session_endurance_pct: 50.0,
            comeback_bonus: 20.0,
            recovery_bonus: 15.0,
            comeback_break_days: 7,
            duration_bonus: 10.0,
            duration_min_minutes: 45.0,
            duration_max_minutes: 75.0,
            top_count: 3,
            high_priority_score: 70.0,
            medium_priority_score: 50.0,
            goal_types: default_goal_types(),
        }
    }
}

fn default_goal_types() -> HashMap<TrainingGoal, Vec<WorkoutType>> {
    use TrainingGoal as G;
    use WorkoutType as W;

    HashMap::from([
        (G::WeightLoss, vec![W::Endurance, W::Recovery]),
        (G::IncreaseFtp, vec![W::FtpBuilder, W::Sweetspot, W::Tempo]),
        (G::BuildEndurance, vec![W::Endurance, W::Mixed]),
        (G::ImproveVo2max, vec![W::Vo2max]),
        (G::BuildBase, vec![W::Endurance, W::Recovery]),
        (G::RacePrep, vec![W::Mixed, W::FtpBuilder, W::Vo2max]),
        (G::Maintenance, vec![W::Tempo, W::Mixed]),
        (G::GeneralFitness, vec![W::Mixed, W::Endurance, W::Tempo]),
    ])
}
