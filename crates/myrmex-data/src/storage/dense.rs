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

//! The dense baseline chunk: a growable, contiguous component block.

use super::chunk::{ComponentChunk, DenseMetadata};
use super::component::Component;
use super::error::StorageError;
use super::settings::StorageSettings;
use myrmex_core::{memory, EntityId};
use std::fmt;
use std::mem;

/// Multiplier applied to the current capacity when computing a growth target.
pub const GROWTH_FACTOR: usize = 2;

/// Extra slots added past the strict minimum on every growth, so ids just
/// beyond the triggering one don't immediately grow again.
pub const GROWTH_SLACK: usize = 10;

/// A growable, contiguous, entity-id-indexed block of `T` values.
///
/// Capacity equals the length of the backing storage: every index in
/// `[0, capacity)` holds a live (possibly default) value with $O(1)$
/// access. Growth is driven by [`add`](DenseChunk::add) and follows
///
/// ```text
/// target = max(GROWTH_FACTOR * capacity + GROWTH_SLACK, index + GROWTH_SLACK)
/// ```
///
/// which keeps the new capacity strictly above the triggering index and
/// doubles on monotonically increasing ids, so a sequence of N increasing
/// `add`s reallocates only O(log N) times at amortized O(1) cost each.
///
/// Growth failure is recoverable: the reservation is attempted before any
/// slot moves, so a failed `add` leaves the chunk exactly as it was.
pub struct DenseChunk<T> {
    data: Vec<T>,
    growth_events: u64,
}

impl<T> DenseChunk<T>
where
    T: Component + Default,
{
    /// Constructs a chunk sized from `settings.initial_capacity`.
    ///
    /// Postcondition: every index in `[0, initial_capacity)` is valid and
    /// holds `T::default()`.
    pub fn with_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        Self::with_initial_capacity(settings.initial_capacity)
    }

    /// Constructs a chunk with exactly `capacity` valid, default-filled slots.
    pub fn with_initial_capacity(capacity: usize) -> Result<Self, StorageError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|source| StorageError::Growth {
                target: capacity,
                source,
            })?;
        data.resize_with(capacity, T::default);

        log::debug!("Constructed dense chunk: initial capacity {capacity}");
        memory::record_chunk_construction(data.capacity() * mem::size_of::<T>());

        Ok(Self {
            data,
            growth_events: 0,
        })
    }

    /// Current capacity: the number of valid indices.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of add-triggered growth (reallocation) events so far.
    ///
    /// Construction does not count; only growth driven by
    /// [`add`](DenseChunk::add) or [`reserve_for`](DenseChunk::reserve_for)
    /// does.
    pub fn growth_events(&self) -> u64 {
        self.growth_events
    }

    /// Bytes the backing storage currently holds resident.
    ///
    /// Measured over the allocation, which may slightly exceed
    /// `capacity() * size_of::<T>()` when the allocator over-reserves.
    pub fn resident_bytes(&self) -> usize {
        self.data.capacity() * mem::size_of::<T>()
    }

    /// Returns the component at `id`.
    pub fn get(&self, id: EntityId, _metadata: &DenseMetadata) -> Result<&T, StorageError> {
        self.data.get(id.index()).ok_or(StorageError::OutOfRange {
            id,
            capacity: self.data.len(),
        })
    }

    /// Returns the component at `id` mutably.
    pub fn get_mut(
        &mut self,
        id: EntityId,
        _metadata: &DenseMetadata,
    ) -> Result<&mut T, StorageError> {
        let capacity = self.data.len();
        self.data
            .get_mut(id.index())
            .ok_or(StorageError::OutOfRange { id, capacity })
    }

    /// Returns the component at `id` without a bounds check.
    ///
    /// # Safety
    ///
    /// The caller must guarantee `id.index() < self.capacity()`. Use the
    /// checked [`get`](DenseChunk::get) unless the bound is already proven,
    /// e.g. by a preceding [`reserve_for`](DenseChunk::reserve_for) covering
    /// the whole pass.
    pub unsafe fn get_unchecked(&self, id: EntityId) -> &T {
        // SAFETY: bound guaranteed by the caller.
        unsafe { self.data.get_unchecked(id.index()) }
    }

    /// Returns the component at `id` mutably, without a bounds check.
    ///
    /// # Safety
    ///
    /// Same contract as [`get_unchecked`](DenseChunk::get_unchecked).
    pub unsafe fn get_unchecked_mut(&mut self, id: EntityId) -> &mut T {
        // SAFETY: bound guaranteed by the caller.
        unsafe { self.data.get_unchecked_mut(id.index()) }
    }

    /// Returns the slot at `id`, growing the chunk first if `id` lies past
    /// the current capacity.
    ///
    /// The returned reference borrows the chunk; re-resolve by id rather
    /// than caching it across later `add` calls.
    pub fn add(
        &mut self,
        id: EntityId,
        _metadata: &mut DenseMetadata,
    ) -> Result<&mut T, StorageError> {
        self.grow_if_required(id)?;
        Ok(&mut self.data[id.index()])
    }

    /// Grows the chunk, if needed, so `id` is within capacity.
    pub fn reserve_for(&mut self, id: EntityId) -> Result<(), StorageError> {
        self.grow_if_required(id)
    }

    fn grow_if_required(&mut self, id: EntityId) -> Result<(), StorageError> {
        let index = id.index();
        let capacity = self.data.len();
        if index < capacity {
            return Ok(());
        }

        // Strictly exceeds `index` in both arms, so capacity > id holds for
        // every id ever added.
        let target = (GROWTH_FACTOR * capacity + GROWTH_SLACK).max(index + GROWTH_SLACK);
        log::debug!("Growing dense chunk for {id}: capacity {capacity} -> {target}");

        let old_bytes = self.resident_bytes();
        self.data
            .try_reserve_exact(target - capacity)
            .map_err(|source| StorageError::Growth { target, source })?;
        self.data.resize_with(target, T::default);
        self.growth_events += 1;

        let new_bytes = self.resident_bytes();
        memory::record_chunk_growth(old_bytes, new_bytes);
        log::trace!(
            "Dense chunk resident size: {:.2} MB",
            new_bytes as f64 / (1024.0 * 1024.0)
        );
        Ok(())
    }
}

impl<T> ComponentChunk for DenseChunk<T>
where
    T: Component + Default,
{
    type Item = T;
    type Metadata = DenseMetadata;

    fn capacity(&self) -> usize {
        DenseChunk::capacity(self)
    }

    fn get(&self, id: EntityId, metadata: &DenseMetadata) -> Result<&T, StorageError> {
        DenseChunk::get(self, id, metadata)
    }

    fn get_mut(&mut self, id: EntityId, metadata: &DenseMetadata) -> Result<&mut T, StorageError> {
        DenseChunk::get_mut(self, id, metadata)
    }

    fn add(&mut self, id: EntityId, metadata: &mut DenseMetadata) -> Result<&mut T, StorageError> {
        DenseChunk::add(self, id, metadata)
    }

    fn reserve_for(&mut self, id: EntityId) -> Result<(), StorageError> {
        DenseChunk::reserve_for(self, id)
    }
}

impl<T> fmt::Debug for DenseChunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DenseChunk")
            .field("capacity", &self.data.len())
            .field("growth_events", &self.growth_events)
            .finish()
    }
}

impl<T> Drop for DenseChunk<T> {
    fn drop(&mut self) {
        memory::record_chunk_release(self.data.capacity() * mem::size_of::<T>());
    }
}
