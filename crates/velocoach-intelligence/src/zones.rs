// ABOUTME: Karvonen heart-rate zone table and time-in-zone estimation
// ABOUTME: Reconstructs a plausible zone distribution from avg/max HR when sample streams are absent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Heart-Rate Zones
//!
//! The zone table is derived from the athlete's max and resting heart rate via
//! the Karvonen heart-rate-reserve formula. The distribution estimator is a
//! deliberate approximation: the upstream provider delivers only per-activity
//! average and maximum heart rate, never second-by-second samples, so the
//! percentage splits here are tunable policy (see [`crate::config::ZoneEstimatorConfig`])
//! rather than measurements.

use serde::{Deserialize, Serialize};
use velocoach_core::constants::karvonen;
use velocoach_core::errors::{AppError, AppResult};
use velocoach_core::models::Lap;

use crate::config::ZoneEstimatorConfig;

/// The five heart-rate training zones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Zone {
    /// Zone 1, active recovery
    Z1,
    /// Zone 2, endurance
    Z2,
    /// Zone 3, tempo (the "grey zone")
    Z3,
    /// Zone 4, threshold
    Z4,
    /// Zone 5, VO2 max
    Z5,
}

/// All zones in ascending order, for iteration
pub const ALL_ZONES: [Zone; 5] = [Zone::Z1, Zone::Z2, Zone::Z3, Zone::Z4, Zone::Z5];

impl Zone {
    /// Zero-based index into zone-ordered arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Z1 => 0,
            Self::Z2 => 1,
            Self::Z3 => 2,
            Self::Z4 => 3,
            Self::Z5 => 4,
        }
    }

    /// Zone from a zero-based index, clamped into the valid range
    #[must_use]
    pub const fn from_index_clamped(index: usize) -> Self {
        match index {
            0 => Self::Z1,
            1 => Self::Z2,
            2 => Self::Z3,
            3 => Self::Z4,
            _ => Self::Z5,
        }
    }

    /// One-based zone number for display
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// English training-zone label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Z1 => "Active Recovery",
            Self::Z2 => "Endurance",
            Self::Z3 => "Tempo",
            Self::Z4 => "Threshold",
            Self::Z5 => "VO2 Max",
        }
    }
}

/// A single zone's heart-rate band in BPM; the top band is unbounded
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HrZoneBand {
    /// Lower bound, inclusive
    pub min: f64,
    /// Upper bound, exclusive (`f64::INFINITY` for Z5)
    pub max: f64,
}

/// Five contiguous, non-overlapping heart-rate zones.
///
/// Invariant: `band(i).max == band(i + 1).min` for every adjacent pair, so the
/// table is a continuous partition of `[0, ∞)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HrZones {
    bands: [HrZoneBand; 5],
}

impl HrZones {
    /// Build the zone table from max and resting HR via the Karvonen formula.
    ///
    /// Zone boundary = `resting_hr + (max_hr - resting_hr) * pct` at the cut
    /// points 0.60 / 0.70 / 0.80 / 0.90 of heart-rate reserve.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] when `max_hr <= resting_hr`; an
    /// inverted heart-rate profile is a settings-store contract violation.
    pub fn karvonen(max_hr: u32, resting_hr: u32) -> AppResult<Self> {
        if max_hr <= resting_hr {
            return Err(AppError::invalid_input(format!(
                "max_hr ({max_hr}) must exceed resting_hr ({resting_hr})"
            )));
        }

        let reserve = f64::from(max_hr - resting_hr);
        let bound = |pct: f64| f64::from(resting_hr) + reserve * pct;

        let z1_top = bound(karvonen::ZONE1_UPPER_PCT);
        let z2_top = bound(karvonen::ZONE2_UPPER_PCT);
        let z3_top = bound(karvonen::ZONE3_UPPER_PCT);
        let z4_top = bound(karvonen::ZONE4_UPPER_PCT);

        Ok(Self {
            bands: [
                HrZoneBand { min: 0.0, max: z1_top },
                HrZoneBand { min: z1_top, max: z2_top },
                HrZoneBand { min: z2_top, max: z3_top },
                HrZoneBand { min: z3_top, max: z4_top },
                HrZoneBand { min: z4_top, max: f64::INFINITY },
            ],
        })
    }

    /// The band for a given zone
    #[must_use]
    pub const fn band(&self, zone: Zone) -> HrZoneBand {
        self.bands[zone.index()]
    }

    /// Classify a heart rate: the first zone whose upper bound exceeds it wins
    #[must_use]
    pub fn zone_for(&self, hr: f64) -> Zone {
        for zone in ALL_ZONES {
            if hr < self.bands[zone.index()].max {
                return zone;
            }
        }
        Zone::Z5
    }
}

/// Minutes spent in each zone; every key is always present
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ZoneMinutes {
    /// Minutes in Zone 1
    pub z1: f64,
    /// Minutes in Zone 2
    pub z2: f64,
    /// Minutes in Zone 3
    pub z3: f64,
    /// Minutes in Zone 4
    pub z4: f64,
    /// Minutes in Zone 5
    pub z5: f64,
}

impl ZoneMinutes {
    pub(crate) const fn from_array(values: [f64; 5]) -> Self {
        Self {
            z1: values[0],
            z2: values[1],
            z3: values[2],
            z4: values[3],
            z5: values[4],
        }
    }

    /// Minutes in a single zone
    #[must_use]
    pub const fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Z1 => self.z1,
            Zone::Z2 => self.z2,
            Zone::Z3 => self.z3,
            Zone::Z4 => self.z4,
            Zone::Z5 => self.z5,
        }
    }

    /// Add minutes to a single zone
    pub fn add(&mut self, zone: Zone, minutes: f64) {
        match zone {
            Zone::Z1 => self.z1 += minutes,
            Zone::Z2 => self.z2 += minutes,
            Zone::Z3 => self.z3 += minutes,
            Zone::Z4 => self.z4 += minutes,
            Zone::Z5 => self.z5 += minutes,
        }
    }

    /// Accumulate another distribution into this one
    pub fn accumulate(&mut self, other: &Self) {
        self.z1 += other.z1;
        self.z2 += other.z2;
        self.z3 += other.z3;
        self.z4 += other.z4;
        self.z5 += other.z5;
    }

    /// Total minutes across all zones
    #[must_use]
    pub fn total(&self) -> f64 {
        self.z1 + self.z2 + self.z3 + self.z4 + self.z5
    }

    /// Whole-number percentage share per zone; all zeros when the total is zero
    #[must_use]
    pub fn percentages(&self) -> ZonePercentages {
        let total = self.total();
        if total <= 0.0 {
            return ZonePercentages::default();
        }
        let pct = |minutes: f64| (minutes / total * 100.0).round();
        ZonePercentages {
            z1: pct(self.z1),
            z2: pct(self.z2),
            z3: pct(self.z3),
            z4: pct(self.z4),
            z5: pct(self.z5),
        }
    }

    /// The zone holding the most minutes (lowest zone wins ties)
    #[must_use]
    pub fn plurality_zone(&self) -> Zone {
        let mut best = Zone::Z1;
        for zone in ALL_ZONES {
            if self.get(zone) > self.get(best) {
                best = zone;
            }
        }
        best
    }
}

/// Percentage share per zone, rounded to whole numbers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct ZonePercentages {
    /// Percent of time in Zone 1
    pub z1: f64,
    /// Percent of time in Zone 2
    pub z2: f64,
    /// Percent of time in Zone 3
    pub z3: f64,
    /// Percent of time in Zone 4
    pub z4: f64,
    /// Percent of time in Zone 5
    pub z5: f64,
}

impl ZonePercentages {
    /// Percentage for a single zone
    #[must_use]
    pub const fn get(&self, zone: Zone) -> f64 {
        match zone {
            Zone::Z1 => self.z1,
            Zone::Z2 => self.z2,
            Zone::Z3 => self.z3,
            Zone::Z4 => self.z4,
            Zone::Z5 => self.z5,
        }
    }

    /// Combined Z4 + Z5 share
    #[must_use]
    pub const fn intensity(&self) -> f64 {
        self.z4 + self.z5
    }
}

/// Estimate per-zone minutes from average and maximum heart rate.
///
/// Allocates a fixed warm-up share to Z1 and half the session to the zone
/// containing the average HR. When the max HR sits above that zone, a small
/// peak share goes to its zone and the rest is spread across the intermediate
/// zones with spillover to the zone just above the primary. When avg and max
/// fall in the same zone, the remainder splits between the neighboring zones.
/// The result is normalized so the minutes sum to `duration_minutes`.
///
/// Returns `None` when the average HR is missing or the duration is not
/// positive; zone estimation without an average HR is meaningless.
#[must_use]
pub fn estimate_zone_minutes(
    avg_hr: Option<u32>,
    max_hr: Option<u32>,
    duration_minutes: f64,
    zones: &HrZones,
    cfg: &ZoneEstimatorConfig,
) -> Option<ZoneMinutes> {
    let avg = avg_hr?;
    if avg == 0 || duration_minutes <= 0.0 {
        return None;
    }

    let primary = zones.zone_for(f64::from(avg));
    let peak = max_hr.map_or(primary, |max| zones.zone_for(f64::from(max)));
    let p = primary.index();
    let k = peak.index();

    let peak_fraction = if k > p { cfg.peak_fraction } else { 0.0 };
    let mut remaining = 1.0 - cfg.warmup_fraction - cfg.primary_fraction - peak_fraction;

    let mut dist = [0.0_f64; 5];
    dist[0] = cfg.warmup_fraction;
    // Overwrites the warm-up share when the whole session sat in Z1
    dist[p] = cfg.primary_fraction;

    if k > p {
        dist[k] = peak_fraction;
        let intermediate = k - p - 1;
        if intermediate > 0 {
            let per_zone = remaining / (intermediate + 1) as f64;
            for slot in dist.iter_mut().take(k).skip(p + 1) {
                *slot += per_zone;
                remaining -= per_zone;
            }
        }
        if p < 4 {
            // Leftover spills into the zone just above the primary
            dist[p + 1] += remaining;
        }
    } else {
        if p > 0 {
            dist[p - 1] += remaining * cfg.below_primary_share;
        }
        if p < 4 {
            dist[p + 1] += remaining * cfg.above_primary_share;
        }
    }

    let total: f64 = dist.iter().sum();
    if total <= 0.0 {
        return None;
    }
    for slot in &mut dist {
        *slot = *slot / total * duration_minutes;
    }

    Some(ZoneMinutes::from_array(dist))
}

/// Exact lap-weighted zone distribution for an activity with lap data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LapZoneAnalysis {
    /// Minutes per zone accumulated from lap averages
    pub minutes: ZoneMinutes,
    /// Total minutes with a usable heart rate
    pub total_minutes: f64,
    /// Whole-number percentage share per zone
    pub percentages: ZonePercentages,
    /// The zone holding the most time
    pub primary_zone: Zone,
}

impl LapZoneAnalysis {
    /// Rendered one-line summary for the feedback report
    #[must_use]
    pub fn message(&self) -> String {
        let pct = self.percentages.get(self.primary_zone);
        format!(
            "You spent **{pct:.0}%** of this activity in **Zone {}** ({}).",
            self.primary_zone.number(),
            self.primary_zone.label()
        )
    }
}

/// Classify each lap's average HR into a zone, weighted by lap duration.
///
/// Unlike [`estimate_zone_minutes`] this is exact, not estimated: each lap's
/// average is a measurement. Returns `None` when no lap carries a heart rate.
#[must_use]
pub fn analyze_lap_zones(laps: &[Lap], zones: &HrZones) -> Option<LapZoneAnalysis> {
    let mut minutes = ZoneMinutes::default();
    let mut total_minutes = 0.0;

    for lap in laps {
        let Some(avg_hr) = lap.average_heart_rate else {
            continue;
        };
        if avg_hr <= 0.0 {
            continue;
        }
        let duration_min = lap.moving_time_seconds as f64 / 60.0;
        minutes.add(zones.zone_for(avg_hr), duration_min);
        total_minutes += duration_min;
    }

    if total_minutes <= 0.0 {
        return None;
    }

    Some(LapZoneAnalysis {
        minutes,
        total_minutes,
        percentages: minutes.percentages(),
        primary_zone: minutes.plurality_zone(),
    })
}
