// ABOUTME: Tunable percentage splits for the avg/max-HR zone distribution estimator
// ABOUTME: Policy values, not measurements; defaults from core constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use serde::{Deserialize, Serialize};
use velocoach_core::constants::zone_estimation;

/// Percentage splits for the zone-distribution estimator.
///
/// These reconstruct a plausible time-in-zone distribution from only two
/// scalar statistics (average and maximum heart rate). They are tunable
/// policy, not ground truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneEstimatorConfig {
    /// Session fraction assumed to be Z1 warm-up/cool-down
    pub warmup_fraction: f64,
    /// Session fraction allocated to the zone containing the average HR
    pub primary_fraction: f64,
    /// Fraction allocated to the peak zone when max HR sits above the primary zone
    pub peak_fraction: f64,
    /// Share of the leftover placed one zone below the primary when avg and max share a zone
    pub below_primary_share: f64,
    /// Share of the leftover placed one zone above the primary when avg and max share a zone
    pub above_primary_share: f64,
}

impl Default for ZoneEstimatorConfig {
    fn default() -> Self {
        Self {
            warmup_fraction: zone_estimation::WARMUP_FRACTION,
            primary_fraction: zone_estimation::PRIMARY_FRACTION,
            peak_fraction: zone_estimation::PEAK_FRACTION,
            below_primary_share: zone_estimation::BELOW_PRIMARY_SHARE,
            above_primary_share: zone_estimation::ABOVE_PRIMARY_SHARE,
        }
    }
}
