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

//! Configuration consumed when a composer is assembled.

use serde::{Deserialize, Serialize};

/// Entity threshold used when no explicit settings are supplied.
pub const DEFAULT_ENTITY_THRESHOLD: usize = 64;

/// Settings a composer consumes exactly once, when its parameters are
/// assembled.
///
/// As with storage settings, the source of these values is the embedder's
/// concern. Once parameters are built from them, later edits to a settings
/// value have no effect on existing composers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    /// Entity count a pass must strictly exceed to run the
    /// greater-than-threshold strategy.
    ///
    /// Zero is allowed: every non-empty pass then selects the greater
    /// strategy, and only empty passes fall back to the lower one.
    pub entity_threshold: usize,
}

impl DispatchSettings {
    /// Settings with a specific entity threshold.
    pub const fn with_entity_threshold(entity_threshold: usize) -> Self {
        Self { entity_threshold }
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            entity_threshold: DEFAULT_ENTITY_THRESHOLD,
        }
    }
}
