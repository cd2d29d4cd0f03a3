// ABOUTME: Body composition and blood pressure series from the secondary metrics source
// ABOUTME: One row per ISO week, values already averaged from raw readings upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekly body-composition entry from the external body-metrics source.
///
/// Keyed by the Monday of its ISO week, matching the weekly-stats convention.
/// Values are averages of possibly multiple raw readings within the week.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BodyMeasurement {
    /// Monday of the ISO week this entry belongs to
    pub week_start: NaiveDate,
    /// Body weight in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Body fat ratio in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_ratio_pct: Option<f64>,
    /// Muscle mass in kg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muscle_mass_kg: Option<f64>,
}

/// Weekly blood-pressure entry from the external body-metrics source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureReading {
    /// Monday of the ISO week this entry belongs to
    pub week_start: NaiveDate,
    /// Systolic pressure in mmHg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<f64>,
    /// Diastolic pressure in mmHg
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<f64>,
    /// Resting pulse in BPM
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<f64>,
}

impl BloodPressureReading {
    /// A reading is usable for trend analysis only with both pressures present
    #[must_use]
    pub fn values(&self) -> Option<(f64, f64)> {
        match (self.systolic, self.diastolic) {
            (Some(sys), Some(dia)) => Some((sys, dia)),
            _ => None,
        }
    }
}
