// ABOUTME: Core types and constants for the velocoach training analytics engine
// ABOUTME: Foundation crate with data models, error handling, and physiological constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![deny(unsafe_code)]

//! # velocoach Core
//!
//! Foundation crate providing shared types and constants for the velocoach
//! cycling training analytics engine. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `AppResult`
//! - **constants**: Physiological constants and heuristic thresholds organized by domain
//! - **models**: Core data models (`Activity`, `Lap`, `BodyMeasurement`, `WorkoutTemplate`, ...)

/// Unified error handling for contract violations on required inputs
pub mod errors;

/// Physiological constants and heuristic thresholds organized by domain
pub mod constants;

/// Core data models (`Activity`, `Lap`, body metrics, workout templates, athlete settings)
pub mod models;
