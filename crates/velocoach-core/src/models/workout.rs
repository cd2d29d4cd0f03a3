// ABOUTME: Workout template records parsed from the external structured workout library
// ABOUTME: Type and intensity classes drive the recommendation engine scoring
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use serde::{Deserialize, Serialize};

/// Structural category of a workout template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutType {
    /// Steady aerobic riding
    Endurance,
    /// Threshold-raising interval structures
    FtpBuilder,
    /// Mixed-intensity sessions
    Mixed,
    /// Easy spinning
    Recovery,
    /// Sweet-spot blocks (88-94% FTP)
    Sweetspot,
    /// Sustained tempo work
    Tempo,
    /// Short maximal intervals
    Vo2max,
}

/// Estimated physiological intensity class of a workout template
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum WorkoutIntensity {
    /// Below endurance pace
    Recovery,
    /// Zone 2 aerobic work
    Endurance,
    /// Zone 3 sustained effort
    Tempo,
    /// Just below threshold
    SweetSpot,
    /// At threshold
    Threshold,
    /// Above threshold
    Vo2max,
}

impl WorkoutIntensity {
    /// Kebab-case name as used in library files and reasoning text
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Endurance => "endurance",
            Self::Tempo => "tempo",
            Self::SweetSpot => "sweet-spot",
            Self::Threshold => "threshold",
            Self::Vo2max => "vo2max",
        }
    }

    /// Whether this intensity counts as an interval/intensity session
    #[must_use]
    pub const fn is_intensity(self) -> bool {
        matches!(self, Self::SweetSpot | Self::Threshold | Self::Vo2max)
    }

    /// Whether this intensity counts as an easy/base session
    #[must_use]
    pub const fn is_endurance(self) -> bool {
        matches!(self, Self::Recovery | Self::Endurance)
    }
}

/// A workout template from the external structured workout library.
///
/// Parsing the workout-description format happens upstream; the engine only
/// sees the already-derived summary fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutTemplate {
    /// Library identifier (e.g. "sweetspot-01")
    pub id: String,
    /// Display name
    pub name: String,
    /// Human-readable description of the interval structure
    pub description: String,
    /// Structural category
    pub workout_type: WorkoutType,
    /// Total duration in seconds
    pub duration_seconds: u64,
    /// Average power as a fraction of FTP (0.88 = 88%)
    pub avg_power_fraction: f64,
    /// Peak power as a fraction of FTP
    pub max_power_fraction: f64,
    /// Estimated intensity class
    pub intensity: WorkoutIntensity,
}

impl WorkoutTemplate {
    /// Duration in whole minutes
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds as f64 / 60.0
    }

    /// Duration formatted as "mm:ss" for display in reasoning text
    #[must_use]
    pub fn duration_formatted(&self) -> String {
        let minutes = self.duration_seconds / 60;
        let seconds = self.duration_seconds % 60;
        format!("{minutes}:{seconds:02}")
    }
}
