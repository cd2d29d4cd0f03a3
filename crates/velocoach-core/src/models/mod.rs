// ABOUTME: Core data models for the velocoach analytics engine
// ABOUTME: Activities, body metrics, workout templates, and athlete settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! Core data models.
//!
//! Everything in here is a plain, serializable data structure with no
//! behavior beyond small accessors — suitable for direct rendering or JSON
//! transport by the (excluded) presentation layer.

mod activity;
mod athlete;
mod body;
mod workout;

pub use activity::{Activity, Lap};
pub use athlete::{AthleteSettings, TrainingGoal};
pub use body::{BloodPressureReading, BodyMeasurement};
pub use workout::{WorkoutIntensity, WorkoutTemplate, WorkoutType};
