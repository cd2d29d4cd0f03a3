// ABOUTME: Analytics engine for the velocoach training platform
// ABOUTME: Zone estimation, weekly aggregation, progress/FTP analysis, and workout recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![deny(unsafe_code)]

//! # velocoach Intelligence
//!
//! The analytics engine of the velocoach platform. Every entry point is a
//! pure, synchronous transform of a complete input snapshot: activities and
//! body metrics come in, serializable analysis structures come out. No hidden
//! clock reads, no ambient settings, no persistence. The only internal state
//! is an optional short-lived cache of the parsed workout template library.
//!
//! ## Modules
//!
//! - **zones**: Karvonen heart-rate zone table and the zone-distribution estimator
//! - **weekly**: trailing-window weekly aggregation with duration-weighted averages
//! - **activity_analyzer**: per-activity cardiac drift, pacing, history, and load analysis
//! - **performance**: power-to-weight and body-composition trend metrics
//! - **progress**: multi-signal training progress assessment
//! - **ftp**: FTP estimation cascade ordered by reliability
//! - **recommendation_engine**: goal-driven workout template scoring
//! - **template_cache**: short-TTL cache for the parsed workout library
//! - **config**: data-driven thresholds, weights, and coaching text tables

pub mod activity_analyzer;
pub mod config;
pub mod ftp;
pub mod performance;
pub mod progress;
pub mod recommendation_engine;
pub mod template_cache;
pub mod weekly;
pub mod zones;

pub use activity_analyzer::{
    analyze_activity, ActivityAnalysis, CardiacDrift, HistoricalComparison, PacingCompliance,
    TrainingLoadAssessment,
};
pub use config::{
    FtpEstimatorConfig, GoalZoneTargets, IntelligenceConfig, ProgressConfig,
    RecommendationConfig, ZoneEstimatorConfig,
};
pub use ftp::{estimate_ftp, Confidence, FtpEstimate};
pub use performance::{
    calculate_performance_metrics, BodyCompositionTrend, PerformanceMetrics,
    PowerToWeightTrend, RatioDirection, TrendDirection, WeightTrend,
};
pub use progress::{
    assess_progress, BloodPressureInsight, BloodPressureTrend, ProgressAssessment,
    ProgressStatus, WeightInsight,
};
pub use recommendation_engine::{recommend_workouts, Priority, WorkoutRecommendation};
pub use template_cache::WorkoutLibraryCache;
pub use weekly::{aggregate_weekly, EnrichedActivity, WeeklyStats};
pub use zones::{
    analyze_lap_zones, estimate_zone_minutes, HrZoneBand, HrZones, LapZoneAnalysis, Zone,
    ZoneMinutes, ZonePercentages,
};
