// ABOUTME: Short-TTL cache of the parsed workout template library
// ABOUTME: The only internal state in the engine; always safe to invalidate and recompute
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

//! # Workout Library Cache
//!
//! Parsing the workout library is upstream work the engine should not repeat
//! on every recommendation call. This single-entry cache holds the parsed
//! templates for a configurable TTL (an hour by default). Invalidation and
//! recomputation are always safe because the library is read-only input.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;
use velocoach_core::errors::{AppError, AppResult};
use velocoach_core::models::WorkoutTemplate;

/// Default time-to-live for the cached library
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

struct CacheEntry {
    templates: Arc<Vec<WorkoutTemplate>>,
    loaded_at: Instant,
}

/// Thread-safe single-entry cache for the parsed workout library
pub struct WorkoutLibraryCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl Default for WorkoutLibraryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl WorkoutLibraryCache {
    /// Create a cache with the given TTL
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// Return the cached library, invoking `loader` when the entry is missing
    /// or expired.
    ///
    /// A loader failure propagates without touching the cached entry, so a
    /// stale-but-valid library is never replaced by an error.
    ///
    /// # Errors
    ///
    /// Returns the loader's error, or [`AppError::Internal`] when the cache
    /// lock was poisoned by a panicking thread.
    pub fn get_or_load<F>(&self, loader: F) -> AppResult<Arc<Vec<WorkoutTemplate>>>
    where
        F: FnOnce() -> AppResult<Vec<WorkoutTemplate>>,
    {
        {
            let guard = self
                .entry
                .read()
                .map_err(|_| AppError::internal("workout library cache lock poisoned"))?;
            if let Some(entry) = guard.as_ref() {
                if entry.loaded_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&entry.templates));
                }
            }
        }

        let mut guard = self
            .entry
            .write()
            .map_err(|_| AppError::internal("workout library cache lock poisoned"))?;

        // Another thread may have refreshed while we waited for the lock
        if let Some(entry) = guard.as_ref() {
            if entry.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.templates));
            }
        }

        let templates = Arc::new(loader()?);
        debug!(count = templates.len(), "workout library (re)loaded");
        *guard = Some(CacheEntry {
            templates: Arc::clone(&templates),
            loaded_at: Instant::now(),
        });
        Ok(templates)
    }

    /// Drop the cached entry; the next access reloads
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = None;
        }
    }
}
