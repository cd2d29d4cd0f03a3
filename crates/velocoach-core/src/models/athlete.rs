// ABOUTME: Athlete profile settings and training goal selection
// ABOUTME: Drives zone boundaries, power-to-weight, and goal-specific coaching targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use serde::{Deserialize, Serialize};

/// The athlete's currently selected training goal.
///
/// Each goal carries its own target zone distribution used by the progress
/// assessment and the workout recommender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// Maximize caloric burn with mostly aerobic riding
    WeightLoss,
    /// Raise functional threshold power
    IncreaseFtp,
    /// Extend aerobic endurance
    BuildEndurance,
    /// Improve maximal aerobic capacity
    ImproveVo2max,
    /// Early-season aerobic base building
    BuildBase,
    /// Sharpen toward a race date
    RacePrep,
    /// Hold current fitness
    Maintenance,
    /// Ride for health without a structured focus
    GeneralFitness,
}

impl TrainingGoal {
    /// German display label, matching the coaching-report language
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeightLoss => "Gewichtsreduktion",
            Self::IncreaseFtp => "FTP steigern",
            Self::BuildEndurance => "Ausdauer aufbauen",
            Self::ImproveVo2max => "VO2max verbessern",
            Self::BuildBase => "Grundlagen aufbauen",
            Self::RacePrep => "Wettkampfvorbereitung",
            Self::Maintenance => "Form erhalten",
            Self::GeneralFitness => "Allgemeine Fitness",
        }
    }
}

/// Athlete profile: physiological settings every calculation depends on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AthleteSettings {
    /// Maximum heart rate in BPM
    pub max_hr: u32,
    /// Resting heart rate in BPM
    pub resting_hr: u32,
    /// Current body weight in kg
    pub weight_kg: f64,
    /// Configured functional threshold power in watts
    pub ftp_watts: f64,
    /// Selected training goal
    pub training_goal: TrainingGoal,
    /// Number of trailing weeks shown in the weekly view
    pub weeks_to_show: usize,
}

impl Default for AthleteSettings {
    fn default() -> Self {
        Self {
            max_hr: 185,
            resting_hr: 60,
            weight_kg: 75.0,
            ftp_watts: 200.0,
            training_goal: TrainingGoal::GeneralFitness,
            weeks_to_show: 6,
        }
    }
}
