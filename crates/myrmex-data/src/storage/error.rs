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

//! Error types for chunk storage operations.

use myrmex_core::EntityId;
use std::collections::TryReserveError;
use std::fmt;

/// Error type for chunk storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// An access referenced an id whose index lies beyond the chunk's
    /// current capacity.
    OutOfRange {
        /// The id that was being accessed.
        id: EntityId,
        /// The chunk capacity observed at the time of the access.
        capacity: usize,
    },
    /// Growing the backing storage failed. The chunk is left exactly as it
    /// was before the attempt.
    Growth {
        /// The capacity the growth was trying to reach.
        target: usize,
        /// The underlying reservation failure.
        source: TryReserveError,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::OutOfRange { id, capacity } => {
                write!(f, "Out-of-range access: {id} exceeds chunk capacity {capacity}")
            }
            StorageError::Growth { target, source } => {
                write!(f, "Chunk growth to capacity {target} failed: {source}")
            }
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Growth { source, .. } => Some(source),
            StorageError::OutOfRange { .. } => None,
        }
    }
}
