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

//! Configuration consumed at chunk construction.

use serde::{Deserialize, Serialize};

/// Initial capacity used when no explicit settings are supplied.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Settings a chunk consumes exactly once, at construction.
///
/// Where these values come from is the embedder's concern; this crate only
/// defines the shape. The serde derives let embedders deserialize chunk
/// settings from whatever configuration layer they already have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Number of valid, default-filled slots a fresh chunk starts with.
    ///
    /// Zero is allowed: the chunk then allocates nothing until the first
    /// `add`.
    pub initial_capacity: usize,
}

impl StorageSettings {
    /// Settings with a specific initial capacity.
    pub const fn with_initial_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}
