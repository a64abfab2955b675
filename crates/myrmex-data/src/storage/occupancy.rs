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

//! An occupancy-tracking chunk: the dense baseline plus write bookkeeping.

use super::bitset::OccupancyBitset;
use super::chunk::{ComponentChunk, DenseMetadata};
use super::component::Component;
use super::dense::DenseChunk;
use super::error::StorageError;
use super::settings::StorageSettings;
use myrmex_core::EntityId;
use std::fmt;

/// Bookkeeping carried alongside an [`OccupancyChunk`].
///
/// Records which ids have been written through `add`. This is the
/// non-empty end of the chunk metadata contract: same operations as the
/// dense baseline, with per-id occupancy riding along.
#[derive(Debug, Default, Clone)]
pub struct OccupancyMetadata {
    bits: OccupancyBitset,
}

impl OccupancyMetadata {
    /// Whether `id` has ever been written through `add`.
    pub fn is_occupied(&self, id: EntityId) -> bool {
        self.bits.is_set(id.as_raw())
    }

    /// Number of distinct ids written through `add`.
    ///
    /// Schedulers use this as a live-workload heuristic where the raw
    /// capacity would overestimate the pass size.
    pub fn occupied_count(&self) -> usize {
        self.bits.count_ones()
    }
}

/// A dense chunk whose metadata records which ids hold written values.
///
/// Reads follow the dense semantics unchanged: any id within capacity
/// resolves, returning the default value until something is written there.
/// The occupancy bits are bookkeeping for schedulers, never an access
/// filter, so the error taxonomy is identical to [`DenseChunk`]'s.
pub struct OccupancyChunk<T> {
    inner: DenseChunk<T>,
}

impl<T> OccupancyChunk<T>
where
    T: Component + Default,
{
    /// Constructs a chunk sized from `settings.initial_capacity`.
    pub fn with_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        Ok(Self {
            inner: DenseChunk::with_settings(settings)?,
        })
    }

    /// Constructs a chunk with exactly `capacity` valid, default-filled slots.
    pub fn with_initial_capacity(capacity: usize) -> Result<Self, StorageError> {
        Ok(Self {
            inner: DenseChunk::with_initial_capacity(capacity)?,
        })
    }

    /// Current capacity: the number of valid indices.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Number of add-triggered growth events so far.
    pub fn growth_events(&self) -> u64 {
        self.inner.growth_events()
    }
}

impl<T> ComponentChunk for OccupancyChunk<T>
where
    T: Component + Default,
{
    type Item = T;
    type Metadata = OccupancyMetadata;

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn get(&self, id: EntityId, _metadata: &OccupancyMetadata) -> Result<&T, StorageError> {
        self.inner.get(id, &DenseMetadata)
    }

    fn get_mut(
        &mut self,
        id: EntityId,
        _metadata: &OccupancyMetadata,
    ) -> Result<&mut T, StorageError> {
        self.inner.get_mut(id, &DenseMetadata)
    }

    fn add(
        &mut self,
        id: EntityId,
        metadata: &mut OccupancyMetadata,
    ) -> Result<&mut T, StorageError> {
        let mut dense = DenseMetadata;
        let slot = self.inner.add(id, &mut dense)?;
        // Only mark after growth has succeeded; a failed add must not
        // leave a phantom occupancy bit behind.
        metadata.bits.set(id.as_raw());
        Ok(slot)
    }

    fn reserve_for(&mut self, id: EntityId) -> Result<(), StorageError> {
        self.inner.reserve_for(id)
    }
}

impl<T> fmt::Debug for OccupancyChunk<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupancyChunk")
            .field("inner", &self.inner)
            .finish()
    }
}
