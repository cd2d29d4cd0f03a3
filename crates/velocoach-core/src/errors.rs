// ABOUTME: Unified error type for the velocoach analytics engine
// ABOUTME: Reserved for contract violations on required inputs, never for missing optional data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Error Types
//!
//! The analytics core is built around total functions: missing or partial
//! optional data degrades individual results to `None` rather than failing the
//! pipeline. `AppError` exists for the remaining class of failures — malformed
//! *required* inputs (an inverted heart-rate profile, a failing workout-library
//! loader). Those are contract violations that should fail fast during
//! integration instead of being silently swallowed by analysis logic.

use thiserror::Error;

/// Result alias used throughout the velocoach workspace
pub type AppResult<T> = Result<T, AppError>;

/// Unified application error
#[derive(Debug, Error)]
pub enum AppError {
    /// A required input violated its contract (e.g. `max_hr <= resting_hr`)
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of the violated contract
        message: String,
    },

    /// An internal invariant failed or an injected collaborator errored
    #[error("internal error: {message}")]
    Internal {
        /// Details about the failure
        message: String,
    },
}

impl AppError {
    /// Create an "invalid input" error
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an "internal" error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
