// ABOUTME: Tests for the workout library cache: TTL expiry, invalidation, load errors
// ABOUTME: Loader call counts are observed through an atomic counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 velocoach

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use velocoach_core::errors::AppError;
use velocoach_core::models::{WorkoutIntensity, WorkoutTemplate, WorkoutType};
use velocoach_intelligence::template_cache::WorkoutLibraryCache;

fn sample_library() -> Vec<WorkoutTemplate> {
    vec![WorkoutTemplate {
        id: "end-01".to_owned(),
        name: "Aerobic Base".to_owned(),
        description: "steady Z2".to_owned(),
        workout_type: WorkoutType::Endurance,
        duration_seconds: 5400,
        avg_power_fraction: 0.68,
        max_power_fraction: 0.75,
        intensity: WorkoutIntensity::Endurance,
    }]
}

#[test]
fn second_access_within_ttl_hits_the_cache() {
    let cache = WorkoutLibraryCache::new(Duration::from_secs(3600));
    let calls = AtomicUsize::new(0);

    let load = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(sample_library())
    };

    let first = cache.get_or_load(load).unwrap();
    let second = cache
        .get_or_load(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_library())
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].id, second[0].id);
}

#[test]
fn expired_entry_is_reloaded() {
    let cache = WorkoutLibraryCache::new(Duration::ZERO);
    let calls = AtomicUsize::new(0);

    for _ in 0..2 {
        cache
            .get_or_load(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_library())
            })
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn invalidate_forces_a_reload() {
    let cache = WorkoutLibraryCache::new(Duration::from_secs(3600));
    let calls = AtomicUsize::new(0);

    cache
        .get_or_load(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_library())
        })
        .unwrap();
    cache.invalidate();
    cache
        .get_or_load(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_library())
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn loader_error_propagates_and_leaves_cache_usable() {
    let cache = WorkoutLibraryCache::new(Duration::from_secs(3600));

    let result = cache.get_or_load(|| Err(AppError::invalid_input("library file unreadable")));
    assert!(result.is_err());

    // A later successful load is unaffected by the earlier failure
    let templates = cache.get_or_load(|| Ok(sample_library())).unwrap();
    assert_eq!(templates.len(), 1);
}
