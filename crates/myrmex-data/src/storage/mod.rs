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

//! Implements myrmex's per-component **chunk storage**.
//!
//! Each component type gets one chunk: a contiguous, entity-id-indexed block
//! of values that grows on demand instead of requiring a pre-sized
//! allocation. A chunk never stores *which* entities exist; it guarantees
//! that every id the external allocator can hand out resolves to a slot
//! once [`ComponentChunk::add`] has covered it.
//!
//! The [`ComponentChunk`] trait is the seam between storage strategies. The
//! baseline is [`DenseChunk`], whose metadata carries nothing;
//! [`OccupancyChunk`] shows the extensible side of the same contract by
//! keeping a per-id occupancy bitset in its metadata. One
//! [`ComponentSlot`] owns each chunk together with the metadata its
//! strategy needs.

mod bitset;
mod chunk;
mod component;
mod dense;
mod error;
mod occupancy;
mod settings;
mod slot;

pub use bitset::OccupancyBitset;
pub use chunk::{ComponentChunk, DenseMetadata};
pub use component::Component;
pub use dense::{DenseChunk, GROWTH_FACTOR, GROWTH_SLACK};
pub use error::StorageError;
pub use occupancy::{OccupancyChunk, OccupancyMetadata};
pub use settings::{StorageSettings, DEFAULT_INITIAL_CAPACITY};
pub use slot::ComponentSlot;
