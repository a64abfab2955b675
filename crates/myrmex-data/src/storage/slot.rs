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

//! The component-storage slot: exclusive owner of one chunk.

use super::chunk::ComponentChunk;
use super::error::StorageError;
use myrmex_core::EntityId;
use std::fmt;

/// Exclusive owner of one chunk and the metadata its strategy carries.
///
/// There is exactly one slot per component type; nothing else holds the
/// chunk. The slot threads the paired metadata into every operation so
/// callers never wire it by hand, and the exclusive ownership is what makes
/// the concurrency contract enforceable: growth needs `&mut self`, so no
/// reader can hold a reference into the chunk while another thread grows
/// it. Once a pass's growth has stabilized, any number of threads may read
/// through `&self`.
pub struct ComponentSlot<C: ComponentChunk> {
    chunk: C,
    metadata: C::Metadata,
}

impl<C: ComponentChunk> ComponentSlot<C> {
    /// Takes ownership of `chunk`, pairing it with fresh metadata.
    pub fn new(chunk: C) -> Self {
        Self {
            chunk,
            metadata: C::Metadata::default(),
        }
    }

    /// Current capacity of the owned chunk.
    pub fn capacity(&self) -> usize {
        self.chunk.capacity()
    }

    /// Returns the component at `id`.
    pub fn get(&self, id: EntityId) -> Result<&C::Item, StorageError> {
        self.chunk.get(id, &self.metadata)
    }

    /// Returns the component at `id` mutably.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut C::Item, StorageError> {
        self.chunk.get_mut(id, &self.metadata)
    }

    /// Returns the slot at `id`, growing the chunk first when needed.
    pub fn add(&mut self, id: EntityId) -> Result<&mut C::Item, StorageError> {
        self.chunk.add(id, &mut self.metadata)
    }

    /// Grows the chunk, if needed, so `id` is within capacity.
    ///
    /// Run this single-threaded over the pass's maximum live id before
    /// handing `&self` out to parallel readers.
    pub fn reserve_for(&mut self, id: EntityId) -> Result<(), StorageError> {
        self.chunk.reserve_for(id)
    }

    /// The owned chunk.
    pub fn chunk(&self) -> &C {
        &self.chunk
    }

    /// The strategy metadata paired with the chunk.
    pub fn metadata(&self) -> &C::Metadata {
        &self.metadata
    }
}

impl<C: ComponentChunk> fmt::Debug for ComponentSlot<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentSlot")
            .field("capacity", &self.chunk.capacity())
            .finish()
    }
}
