// ABOUTME: Physiological constants and heuristic thresholds organized by domain
// ABOUTME: Single source of truth for zone cut points, drift/load thresholds, and cascade factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! Physiological constants and heuristic thresholds.
//!
//! Values here are policy, not physiology textbook truth — in particular the
//! zone-estimation splits reconstruct a plausible distribution from only two
//! scalar statistics (average and maximum heart rate) because per-sample HR
//! streams are not available upstream.

/// Karvonen heart-rate-reserve zone boundaries
pub mod karvonen {
    /// HRR fraction marking the top of Zone 1 (Recovery)
    pub const ZONE1_UPPER_PCT: f64 = 0.60;
    /// HRR fraction marking the top of Zone 2 (Endurance)
    pub const ZONE2_UPPER_PCT: f64 = 0.70;
    /// HRR fraction marking the top of Zone 3 (Tempo)
    pub const ZONE3_UPPER_PCT: f64 = 0.80;
    /// HRR fraction marking the top of Zone 4 (Threshold)
    pub const ZONE4_UPPER_PCT: f64 = 0.90;
}

/// Splits used by the avg/max-HR zone distribution estimator
pub mod zone_estimation {
    /// Fraction of the session assumed to be Zone 1 warm-up/cool-down
    pub const WARMUP_FRACTION: f64 = 0.12;
    /// Fraction of the session allocated to the zone containing the average HR
    pub const PRIMARY_FRACTION: f64 = 0.50;
    /// Fraction allocated to the peak zone when max HR sits above the primary zone
    pub const PEAK_FRACTION: f64 = 0.10;
    /// Share of the leftover placed one zone below the primary when avg == max zone
    pub const BELOW_PRIMARY_SHARE: f64 = 0.6;
    /// Share of the leftover placed one zone above the primary when avg == max zone
    pub const ABOVE_PRIMARY_SHARE: f64 = 0.4;
}

/// Cardiac drift (aerobic decoupling) analysis thresholds
pub mod cardiac_drift {
    /// Minimum lap duration in seconds to count as a work lap
    pub const MIN_WORK_LAP_SECONDS: u64 = 120;
    /// Minimum lap average power in watts to count as a work lap
    pub const MIN_WORK_LAP_WATTS: f64 = 50.0;
    /// Power difference between halves (watts) above which drift is unreliable
    pub const UNRELIABLE_POWER_DELTA_WATTS: f64 = 20.0;
    /// Decoupling percentage above which drift is significant
    pub const SIGNIFICANT_DRIFT_PCT: f64 = 5.0;
}

/// Pacing compliance thresholds
pub mod compliance {
    /// Minimum lap count for a meaningful first-vs-last comparison
    pub const MIN_LAPS: usize = 3;
    /// Cadence change in rpm treated as a deliberate pacing shift
    pub const CADENCE_DELTA_RPM: f64 = 5.0;
}

/// Training load classification thresholds
pub mod training_load {
    /// Session-to-average work ratio above which a session is high load
    pub const HIGH_LOAD_RATIO: f64 = 1.4;
    /// Session-to-average work ratio below which a session is recovery
    pub const LOW_LOAD_RATIO: f64 = 0.6;
    /// Efficiency-factor deviation (percent) separating strong/weak from consistent
    pub const EF_DEVIATION_PCT: f64 = 5.0;
}

/// Training break and detraining windows
pub mod time_periods {
    /// Days without activity that constitute a significant training break
    pub const LONG_BREAK_DAYS: i64 = 14;
    /// Days without activity that constitute a short break
    pub const SHORT_BREAK_DAYS: i64 = 7;
    /// Trailing weeks aggregated into the weekly view
    pub const TRAILING_WEEKS: usize = 6;
    /// Weeks of stats considered by the progress assessment
    pub const ASSESSMENT_WEEKS: usize = 4;
}

/// Detraining FTP adjustment factors
pub mod detraining {
    /// Estimated FTP loss per idle week, percent
    pub const FTP_LOSS_PCT_PER_WEEK: f64 = 1.5;
    /// Cap on total estimated FTP loss, percent
    pub const MAX_FTP_LOSS_PCT: f64 = 15.0;
    /// FTP multiplier suggested after a short (7-13 day) break
    pub const SHORT_BREAK_FTP_FACTOR: f64 = 0.97;
}

/// FTP estimation cascade constants
pub mod ftp_estimation {
    /// Z4 time percentage above which an activity counts as a threshold workout
    pub const THRESHOLD_Z4_PCT: f64 = 30.0;
    /// Minimum threshold-workout duration in minutes
    pub const THRESHOLD_MIN_MINUTES: f64 = 30.0;
    /// FTP as a fraction of weighted average power in threshold workouts
    pub const THRESHOLD_FTP_FACTOR: f64 = 0.95;
    /// Minimum long-ride duration in minutes
    pub const LONG_RIDE_MIN_MINUTES: f64 = 45.0;
    /// Minimum weighted average power (watts) for long rides and best efforts
    pub const MIN_MEANINGFUL_WATTS: f64 = 100.0;
    /// FTP as a fraction of weighted average power on long rides
    pub const LONG_RIDE_FTP_FACTOR: f64 = 0.90;
    /// Number of best efforts averaged by the fallback method
    pub const BEST_EFFORT_COUNT: usize = 3;
    /// FTP as a fraction of mean best-effort power (conservative)
    pub const BEST_EFFORT_FTP_FACTOR: f64 = 0.85;
    /// Relative EF drop marking a performance decline
    pub const EF_DECLINE_RATIO: f64 = 0.90;
    /// Activities with positive EF required on each side of the decline comparison
    pub const EF_SAMPLE_COUNT: usize = 3;
    /// Tolerance around the configured FTP within which an estimate confirms it
    pub const FTP_CONFIRM_TOLERANCE: f64 = 0.05;
}

/// Blood pressure classification and trend thresholds (mmHg)
pub mod blood_pressure {
    /// Systolic change treated as a real trend
    pub const SYSTOLIC_TREND_DELTA: f64 = 5.0;
    /// Diastolic change treated as a real trend
    pub const DIASTOLIC_TREND_DELTA: f64 = 3.0;
    /// Optimal classification upper bounds
    pub const OPTIMAL_SYSTOLIC: f64 = 120.0;
    /// Optimal diastolic upper bound
    pub const OPTIMAL_DIASTOLIC: f64 = 80.0;
    /// Good classification upper bounds
    pub const GOOD_SYSTOLIC: f64 = 130.0;
    /// Good diastolic upper bound
    pub const GOOD_DIASTOLIC: f64 = 85.0;
    /// Hypertension referral bounds
    pub const REFERRAL_SYSTOLIC: f64 = 140.0;
    /// Hypertension referral diastolic bound
    pub const REFERRAL_DIASTOLIC: f64 = 90.0;
}

/// Body composition trend thresholds
pub mod body_trends {
    /// Weight change in kg below which the trend is stable
    pub const WEIGHT_STABLE_DELTA_KG: f64 = 0.5;
    /// Fat-ratio / muscle-mass change below which the trend is stable
    pub const COMPOSITION_STABLE_DELTA: f64 = 0.5;
    /// Power-to-weight change in percent below which the trend is stable
    pub const POWER_TO_WEIGHT_STABLE_PCT: f64 = 2.0;
}
