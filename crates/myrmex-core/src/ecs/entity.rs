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

//! Defines core types related to entities processed by the storage and
//! dispatch layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique identifier for a live entity, supplied by an external allocator.
///
/// Myrmex never creates, validates, or recycles these handles; it only
/// converts them to storage indices. `index()` is that deterministic
/// conversion, and the unsigned representation is what makes the
/// "never negative" invariant structural rather than checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct EntityId(u32);

impl EntityId {
    /// Wraps the raw value handed out by the external allocator.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw allocator value.
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// The storage index this id resolves to.
    ///
    /// Every chunk operation goes through this conversion; a component for
    /// entity `i` always lives at index `i` of its chunk.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {}", self.0)
    }
}

/// A contiguous, half-open range of entity ids: `[start, end)`.
///
/// A scheduling pass describes the ids it touches with one of these. The
/// parallel execution path carves it into slices with
/// [`split_evenly`](EntityRange::split_evenly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRange {
    start: u32,
    end: u32,
}

impl EntityRange {
    /// Creates the range `[start, end)`. An `end` below `start` collapses
    /// to the empty range starting at `start`.
    pub const fn new(start: u32, end: u32) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// The range `[0, count)`, covering a whole pass of `count` entities.
    pub const fn from_count(count: u32) -> Self {
        Self {
            start: 0,
            end: count,
        }
    }

    /// First id in the range. Meaningless when the range is empty.
    pub const fn first(self) -> EntityId {
        EntityId(self.start)
    }

    /// Number of ids in the range.
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    /// `true` when the range contains no ids.
    pub const fn is_empty(self) -> bool {
        self.start >= self.end
    }

    /// Whether `id` falls within the range.
    pub const fn contains(self, id: EntityId) -> bool {
        id.0 >= self.start && id.0 < self.end
    }

    /// Whether every id of `self` also falls within `outer`.
    ///
    /// The empty range is within every range.
    pub const fn is_within(self, outer: EntityRange) -> bool {
        self.is_empty() || (self.start >= outer.start && self.end <= outer.end)
    }

    /// Iterates every id in the range in ascending order.
    pub fn iter(self) -> impl Iterator<Item = EntityId> {
        (self.start..self.end).map(EntityId)
    }

    /// Splits the range into at most `slices` contiguous, near-equal,
    /// non-empty parts, in ascending order.
    ///
    /// `slices` is clamped to `1..=len`; an empty range yields no parts.
    /// The parts partition the range exactly: no id is dropped or
    /// duplicated, which is what makes per-slice fan-out equivalent to one
    /// in-line pass.
    pub fn split_evenly(self, slices: usize) -> Vec<EntityRange> {
        let len = self.len();
        if len == 0 {
            return Vec::new();
        }
        let slices = slices.clamp(1, len);
        let base = len / slices;
        let remainder = len % slices;

        let mut parts = Vec::with_capacity(slices);
        let mut cursor = self.start;
        for i in 0..slices {
            let size = base + usize::from(i < remainder);
            let next = cursor + size as u32;
            parts.push(EntityRange {
                start: cursor,
                end: next,
            });
            cursor = next;
        }
        parts
    }
}

impl fmt::Display for EntityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
