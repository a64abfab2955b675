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

//! The seam between chunk storage strategies.

use super::component::Component;
use super::error::StorageError;
use myrmex_core::EntityId;

/// Bookkeeping carried alongside the dense baseline chunk.
///
/// The dense strategy needs none, so this type is empty. It exists because
/// the metadata parameter is part of the chunk contract: alternative
/// strategies (see [`OccupancyMetadata`](super::OccupancyMetadata)) carry
/// real state through the same operations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DenseMetadata;

/// Contract implemented by every per-component storage strategy.
///
/// A chunk owns one contiguous, entity-id-indexed block of `Item` values.
/// Every operation takes the strategy's `Metadata` alongside it; the owning
/// [`ComponentSlot`](super::ComponentSlot) keeps the two paired so callers
/// never wire metadata by hand.
///
/// # Reference validity
///
/// References returned by `get`, `get_mut`, and `add` borrow the chunk, so
/// holding one across a later `add` (which may reallocate) is rejected at
/// compile time. The durable handle is the [`EntityId`] itself: re-resolve
/// it on every access instead of caching references.
pub trait ComponentChunk {
    /// The component type stored in this chunk.
    type Item: Component;

    /// Per-strategy bookkeeping passed alongside every operation.
    type Metadata: Default;

    /// Current capacity: the number of valid indices, `[0, capacity)`.
    ///
    /// Monotonically non-decreasing over the chunk's lifetime.
    fn capacity(&self) -> usize;

    /// Returns the component at `id`.
    ///
    /// Fails with [`StorageError::OutOfRange`] when `id` resolves past the
    /// current capacity.
    fn get(&self, id: EntityId, metadata: &Self::Metadata) -> Result<&Self::Item, StorageError>;

    /// Returns the component at `id` mutably.
    ///
    /// Same range contract as [`get`](ComponentChunk::get).
    fn get_mut(
        &mut self,
        id: EntityId,
        metadata: &Self::Metadata,
    ) -> Result<&mut Self::Item, StorageError>;

    /// Returns the component slot at `id`, growing the chunk first when the
    /// id lies past the current capacity.
    ///
    /// On an already-covered id this is an in-place access: no growth, no
    /// effect on any other slot, so repeated `add` on one id is an
    /// overwrite. Fails with [`StorageError::Growth`] when the backing
    /// storage cannot be resized; the chunk is unchanged in that case.
    fn add(
        &mut self,
        id: EntityId,
        metadata: &mut Self::Metadata,
    ) -> Result<&mut Self::Item, StorageError>;

    /// Grows the chunk, if needed, so that `id` is within capacity, without
    /// touching any slot.
    ///
    /// This is the single-threaded pre-pass step schedulers run to cover
    /// the maximum live entity id before fanning read access out across
    /// worker threads.
    fn reserve_for(&mut self, id: EntityId) -> Result<(), StorageError>;
}
