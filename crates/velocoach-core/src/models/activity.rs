// ABOUTME: Activity and lap source records as delivered by the upstream fitness provider
// ABOUTME: Immutable per-activity summaries, no per-sample sensor streams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded activity as delivered by the upstream fitness provider.
///
/// This is the immutable source record: only pre-aggregated per-activity
/// averages are available, never second-by-second sample arrays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Provider-assigned activity identifier
    pub id: i64,
    /// Activity name as entered or generated upstream
    pub name: String,
    /// Sport type string (e.g. "Ride", "VirtualRide")
    pub sport: String,
    /// When the activity started (UTC)
    pub start_date: DateTime<Utc>,
    /// Moving time in seconds (excludes stopped time)
    pub moving_time_seconds: u64,
    /// Elapsed wall-clock time in seconds
    pub elapsed_time_seconds: u64,
    /// Distance covered in meters
    pub distance_meters: f64,
    /// Total elevation gain in meters
    pub elevation_gain_meters: f64,
    /// Average heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum heart rate in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Average power in watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    /// Weighted (normalized-style) average power in watts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_average_watts: Option<f64>,
    /// Average cadence in RPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
    /// Per-lap summaries; empty when the provider returned none
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub laps: Vec<Lap>,
}

impl Activity {
    /// Moving time in whole minutes as a float
    #[must_use]
    pub fn moving_time_minutes(&self) -> f64 {
        self.moving_time_seconds as f64 / 60.0
    }

    /// Estimated work in kilocalories from average power and moving time.
    ///
    /// `avg_watts x seconds / 1000` — kJ of mechanical work, which for
    /// cycling approximates kcal burned closely enough for load tracking.
    #[must_use]
    pub fn estimated_calories(&self) -> f64 {
        self.average_watts
            .map_or(0.0, |w| (w * self.moving_time_seconds as f64 / 1000.0).round())
    }

    /// Efficiency factor: average power over average heart rate, 0 when either is missing
    #[must_use]
    pub fn efficiency_factor(&self) -> f64 {
        match (self.average_watts, self.average_heart_rate) {
            (Some(watts), Some(hr)) if hr > 0 => watts / f64::from(hr),
            _ => 0.0,
        }
    }
}

/// Per-lap summary within an activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lap {
    /// Moving time in seconds
    pub moving_time_seconds: u64,
    /// Elapsed time in seconds
    pub elapsed_time_seconds: u64,
    /// Distance covered in meters
    pub distance_meters: f64,
    /// Average power during the lap (watts)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_watts: Option<f64>,
    /// Average heart rate during the lap (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<f64>,
    /// Maximum heart rate during the lap (BPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<f64>,
    /// Average cadence during the lap (RPM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_cadence: Option<f64>,
}

impl Lap {
    /// Lap efficiency factor (power over heart rate), 0 when either is missing
    #[must_use]
    pub fn efficiency_factor(&self) -> f64 {
        match (self.average_watts, self.average_heart_rate) {
            (Some(watts), Some(hr)) if hr > 0.0 => watts / hr,
            _ => 0.0,
        }
    }
}
