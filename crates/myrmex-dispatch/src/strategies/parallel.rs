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

//! The fan-out strategy: the pass is split across worker threads and joined.

use myrmex_core::{ExecutionStrategy, StrategyError, StrategyKind, Workload};
use rayon::prelude::*;

/// Splits the workload range into contiguous slices and runs them on
/// rayon's global thread pool, joining before returning.
///
/// Every id is still visited exactly once; only the assignment of ids to
/// threads changes, so operations run under this strategy must not rely on
/// cross-id ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParallelStrategy {
    slice_count: Option<usize>,
}

impl ParallelStrategy {
    /// Creates a strategy that sizes its slices from the worker pool at
    /// each pass.
    pub const fn new() -> Self {
        Self { slice_count: None }
    }

    /// Creates a strategy that always splits a pass into at most
    /// `slice_count` slices.
    ///
    /// Values above the pass's entity count are clamped down so no slice
    /// is ever empty.
    pub const fn with_slice_count(slice_count: usize) -> Self {
        Self {
            slice_count: Some(slice_count),
        }
    }
}

impl ExecutionStrategy for ParallelStrategy {
    fn strategy_name(&self) -> &'static str {
        "Parallel"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Parallel
    }

    fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
        let slice_count = self
            .slice_count
            .unwrap_or_else(rayon::current_num_threads);
        let slices = workload.range().split_evenly(slice_count);
        log::trace!(
            "Parallel pass over {range}: {count} slice(s)",
            range = workload.range(),
            count = slices.len()
        );

        slices
            .par_iter()
            .for_each(|slice| workload.run_slice(*slice));
        Ok(())
    }
}
