// ABOUTME: FTP estimation cascade thresholds
// ABOUTME: Defaults from core constants; every factor is tunable policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

use serde::{Deserialize, Serialize};
use velocoach_core::constants::{detraining, ftp_estimation, time_periods};

/// Thresholds for the FTP estimation cascade
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpEstimatorConfig {
    /// Days without activity constituting a significant break
    pub long_break_days: i64,
    /// Days without activity constituting a short break
    pub short_break_days: i64,
    /// Estimated FTP loss per idle week, percent
    pub ftp_loss_pct_per_week: f64,
    /// Cap on total estimated FTP loss, percent
    pub max_ftp_loss_pct: f64,
    /// FTP multiplier suggested after a short break
    pub short_break_ftp_factor: f64,
    /// Weeks of recent activities fed into the cascade
    pub recent_weeks: usize,
    /// Positive-EF activities required on each side of the decline comparison
    pub ef_sample_count: usize,
    /// Recent-to-older EF ratio below which a decline fires
    pub ef_decline_ratio: f64,
    /// Z4 time percentage above which an activity is a threshold workout
    pub threshold_z4_pct: f64,
    /// Minimum threshold-workout duration in minutes
    pub threshold_min_minutes: f64,
    /// FTP as a fraction of weighted average power in threshold workouts
    pub threshold_ftp_factor: f64,
    /// Minimum long-ride duration in minutes
    pub long_ride_min_minutes: f64,
    /// Minimum weighted average power for long rides and best efforts, watts
    pub min_meaningful_watts: f64,
    /// FTP as a fraction of weighted average power on long rides
    pub long_ride_ftp_factor: f64,
    /// Best efforts averaged by the fallback method
    pub best_effort_count: usize,
    /// FTP as a fraction of mean best-effort power
    pub best_effort_ftp_factor: f64,
    /// Tolerance around the configured FTP within which an estimate confirms it
    pub ftp_confirm_tolerance: f64,
}

impl Default for FtpEstimatorConfig {
    fn default() -> Self {
        Self {
            long_break_days: time_periods::LONG_BREAK_DAYS,
            short_break_days: time_periods::SHORT_BREAK_DAYS,
            ftp_loss_pct_per_week: detraining::FTP_LOSS_PCT_PER_WEEK,
            max_ftp_loss_pct: detraining::MAX_FTP_LOSS_PCT,
            short_break_ftp_factor: detraining::SHORT_BREAK_FTP_FACTOR,
            recent_weeks: time_periods::ASSESSMENT_WEEKS,
            ef_sample_count: ftp_estimation::EF_SAMPLE_COUNT,
            ef_decline_ratio: ftp_estimation::EF_DECLINE_RATIO,
            threshold_z4_pct: ftp_estimation::THRESHOLD_Z4_PCT,
            threshold_min_minutes: ftp_estimation::THRESHOLD_MIN_MINUTES,
            threshold_ftp_factor: ftp_estimation::THRESHOLD_FTP_FACTOR,
            long_ride_min_minutes: ftp_estimation::LONG_RIDE_MIN_MINUTES,
            min_meaningful_watts: ftp_estimation::MIN_MEANINGFUL_WATTS,
            long_ride_ftp_factor: ftp_estimation::LONG_RIDE_FTP_FACTOR,
            best_effort_count: ftp_estimation::BEST_EFFORT_COUNT,
            best_effort_ftp_factor: ftp_estimation::BEST_EFFORT_FTP_FACTOR,
            ftp_confirm_tolerance: ftp_estimation::FTP_CONFIRM_TOLERANCE,
        }
    }
}
