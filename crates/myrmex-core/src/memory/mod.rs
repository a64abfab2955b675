// Copyright 2025 the myrmex authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Provides a public interface for querying chunk-storage memory statistics.
//!
//! This module defines a set of global atomic counters for storage memory
//! tracking. It forms a contract: chunk implementations report their growth
//! and release events here, and any part of an embedding application can
//! read the counters in a thread-safe manner to monitor how much memory
//! component storage holds resident.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

// --- Global Storage Counters ---

/// Tracks the total number of bytes currently resident across all live chunks.
pub static CHUNK_RESIDENT_BYTES: AtomicUsize = AtomicUsize::new(0);

/// Tracks the peak number of bytes ever resident simultaneously.
pub static PEAK_CHUNK_RESIDENT_BYTES: AtomicU64 = AtomicU64::new(0);

/// Tracks the total number of growth (reallocation) events across all chunks.
pub static TOTAL_GROWTH_EVENTS: AtomicU64 = AtomicU64::new(0);

/// Tracks the total number of chunk construction events.
pub static TOTAL_CHUNK_CONSTRUCTIONS: AtomicU64 = AtomicU64::new(0);

/// Tracks the total number of chunk release events (chunks dropped).
pub static TOTAL_CHUNK_RELEASES: AtomicU64 = AtomicU64::new(0);

/// Tracks the cumulative total of bytes ever made resident over the process lifetime.
pub static BYTES_GROWN_LIFETIME: AtomicU64 = AtomicU64::new(0);

// --- Reporting API (called by chunk implementations) ---

/// Records a freshly constructed chunk with `bytes` already resident.
///
/// Construction is counted separately from growth: the per-chunk growth
/// counters only ever reflect add-triggered reallocations.
pub fn record_chunk_construction(bytes: usize) {
    let current = CHUNK_RESIDENT_BYTES.fetch_add(bytes, Ordering::Relaxed) + bytes;
    TOTAL_CHUNK_CONSTRUCTIONS.fetch_add(1, Ordering::Relaxed);
    BYTES_GROWN_LIFETIME.fetch_add(bytes as u64, Ordering::Relaxed);
    PEAK_CHUNK_RESIDENT_BYTES.fetch_max(current as u64, Ordering::Relaxed);
}

/// Records one growth event that took a chunk from `old_bytes` to `new_bytes` resident.
pub fn record_chunk_growth(old_bytes: usize, new_bytes: usize) {
    let grown = new_bytes.saturating_sub(old_bytes);
    let current = CHUNK_RESIDENT_BYTES.fetch_add(grown, Ordering::Relaxed) + grown;
    TOTAL_GROWTH_EVENTS.fetch_add(1, Ordering::Relaxed);
    BYTES_GROWN_LIFETIME.fetch_add(grown as u64, Ordering::Relaxed);
    PEAK_CHUNK_RESIDENT_BYTES.fetch_max(current as u64, Ordering::Relaxed);
}

/// Records a dropped chunk returning `bytes` to the allocator.
pub fn record_chunk_release(bytes: usize) {
    CHUNK_RESIDENT_BYTES.fetch_sub(bytes, Ordering::Relaxed);
    TOTAL_CHUNK_RELEASES.fetch_add(1, Ordering::Relaxed);
}

// --- Data Structures for Reporting ---

/// A snapshot of chunk-storage memory statistics, including derived metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageMemoryStats {
    /// The number of bytes currently resident across all live chunks.
    pub resident_bytes: usize,
    /// The maximum number of bytes that were ever resident simultaneously.
    pub peak_resident_bytes: u64,
    /// The total number of growth events recorded.
    pub growth_events: u64,
    /// The total number of chunk constructions recorded.
    pub chunk_constructions: u64,
    /// The total number of chunk releases recorded.
    pub chunk_releases: u64,
    /// The cumulative sum of all bytes ever made resident.
    pub bytes_grown_lifetime: u64,
    /// The average number of bytes added per growth event.
    pub average_growth_bytes: f64,
}

impl StorageMemoryStats {
    /// Populates the derived metrics based on the raw counter values.
    pub fn calculate_derived_metrics(&mut self) {
        if self.growth_events > 0 {
            self.average_growth_bytes =
                self.bytes_grown_lifetime as f64 / self.growth_events as f64;
        }
    }
}

// --- Public API for Reading Stats ---

/// Takes a snapshot of all storage counters and returns them in a structured format.
///
/// Reads every counter with `Ordering::Relaxed`; the snapshot is consistent
/// enough for monitoring but is not a linearizable view across counters.
pub fn get_storage_memory_stats() -> StorageMemoryStats {
    let mut stats = StorageMemoryStats {
        resident_bytes: CHUNK_RESIDENT_BYTES.load(Ordering::Relaxed),
        peak_resident_bytes: PEAK_CHUNK_RESIDENT_BYTES.load(Ordering::Relaxed),
        growth_events: TOTAL_GROWTH_EVENTS.load(Ordering::Relaxed),
        chunk_constructions: TOTAL_CHUNK_CONSTRUCTIONS.load(Ordering::Relaxed),
        chunk_releases: TOTAL_CHUNK_RELEASES.load(Ordering::Relaxed),
        bytes_grown_lifetime: BYTES_GROWN_LIFETIME.load(Ordering::Relaxed),
        ..Default::default()
    };

    stats.calculate_derived_metrics();
    stats
}

/// Gets the total number of bytes currently resident in chunk storage.
///
/// This is a lightweight alternative to `get_storage_memory_stats` for when
/// only the current usage is needed.
pub fn get_resident_chunk_bytes() -> usize {
    CHUNK_RESIDENT_BYTES.load(Ordering::Relaxed)
}
