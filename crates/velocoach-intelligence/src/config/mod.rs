// ABOUTME: Data-driven configuration for the analytics engine
// ABOUTME: Thresholds, weights, and coaching text tables with defaults from core constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Intelligence Configuration
//!
//! Every heuristic threshold, scoring weight, and goal-specific coaching table
//! lives here as data rather than inline literals. Entry points take their
//! config explicitly, which keeps the analytics decoupled from any settings
//! store and makes threshold changes testable without touching algorithm code.

mod ftp;
mod progress;
mod recommendation;
mod zone_estimator;

pub use ftp::FtpEstimatorConfig;
pub use progress::{GoalZoneTargets, ProgressConfig};
pub use recommendation::RecommendationConfig;
pub use zone_estimator::ZoneEstimatorConfig;

use serde::{Deserialize, Serialize};

/// Aggregated configuration for the whole intelligence layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Zone-distribution estimator splits
    pub zone_estimator: ZoneEstimatorConfig,
    /// Progress assessment thresholds and goal tables
    pub progress: ProgressConfig,
    /// FTP estimation cascade thresholds
    pub ftp: FtpEstimatorConfig,
    /// Workout recommendation scoring weights
    pub recommendation: RecommendationConfig,
}
