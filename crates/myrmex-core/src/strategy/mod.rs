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

//! # Execution Strategy Abstraction
//!
//! The unified contract for all workload execution strategies.
//!
//! An **execution strategy** is a reusable, swappable policy for running one
//! scheduling pass: given a [`Workload`] (an entity range plus the operation
//! to apply per entity), it processes every entity and returns when the pass
//! has completed. The built-in strategies live in `myrmex-dispatch`; custom
//! ones only need to implement [`ExecutionStrategy`].
//!
//! Strategies carry no selection logic of their own. Choosing *which*
//! strategy runs a pass belongs to the threshold composer in
//! `myrmex-dispatch`, which binds two strategies and picks one per pass from
//! the live entity count.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use myrmex_core::strategy::{ExecutionStrategy, StrategyError, StrategyKind, Workload};
//!
//! struct NoopStrategy;
//!
//! impl ExecutionStrategy for NoopStrategy {
//!     fn strategy_name(&self) -> &'static str { "Noop" }
//!     fn kind(&self) -> StrategyKind { StrategyKind::Sequential }
//!
//!     fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
//!         workload.run_slice(workload.range());
//!         Ok(())
//!     }
//! }
//! ```

use crate::ecs::{EntityId, EntityRange};
use std::fmt;

/// Error type for strategy execution.
#[derive(Debug)]
pub enum StrategyError {
    /// A domain-specific error occurred while the strategy ran the pass.
    ExecutionFailed {
        /// Name of the strategy that raised the failure.
        strategy: &'static str,
        /// The underlying domain error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::ExecutionFailed { strategy, source } => {
                write!(f, "Strategy '{strategy}' execution failed: {source}")
            }
        }
    }
}

impl std::error::Error for StrategyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StrategyError::ExecutionFailed { source, .. } => Some(source.as_ref()),
        }
    }
}

impl StrategyError {
    /// Convenience constructor for a failed execution.
    pub fn execution_failed(
        strategy: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        StrategyError::ExecutionFailed {
            strategy,
            source: source.into(),
        }
    }

    /// Name of the strategy that raised this error.
    pub fn strategy(&self) -> &'static str {
        match self {
            StrategyError::ExecutionFailed { strategy, .. } => strategy,
        }
    }
}

/// Classification of execution strategies, used for logging and diagnostics.
///
/// The threshold composer never consults this: its selection rule is purely
/// the entity count against the configured threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Runs the whole workload in-line on the calling thread.
    Sequential,
    /// Fans the workload out across worker threads and joins.
    Parallel,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Sequential => write!(f, "Sequential"),
            StrategyKind::Parallel => write!(f, "Parallel"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Workload: the description of one scheduling pass
// ─────────────────────────────────────────────────────────────────────────────

/// The work one scheduling pass must perform: an entity range plus the
/// operation to apply to each id in it.
///
/// The operation is borrowed, not owned: a `Workload` is a stack-scoped
/// value built by the scheduler for a single `execute` call. The `Sync`
/// bound on the operation is what lets parallel strategies share it across
/// worker threads.
///
/// All strategies funnel through [`run_slice`](Workload::run_slice), so a
/// sequential pass and the per-slice bodies of a parallel pass run the same
/// inner loop.
pub struct Workload<'a> {
    range: EntityRange,
    op: &'a (dyn Fn(EntityId) + Send + Sync),
}

impl<'a> Workload<'a> {
    /// Creates a workload covering `range`, applying `op` to each id.
    pub fn new(range: EntityRange, op: &'a (dyn Fn(EntityId) + Send + Sync)) -> Self {
        Self { range, op }
    }

    /// The full id range of the pass.
    pub fn range(&self) -> EntityRange {
        self.range
    }

    /// Number of entities the pass covers.
    pub fn entity_count(&self) -> usize {
        self.range.len()
    }

    /// Applies the operation to every id in `slice`, in ascending order.
    ///
    /// `slice` must lie within the workload's range; slices produced by
    /// [`EntityRange::split_evenly`] on [`range`](Workload::range) always
    /// do.
    pub fn run_slice(&self, slice: EntityRange) {
        debug_assert!(
            slice.is_within(self.range),
            "workload slice {slice} out of pass range {range}",
            range = self.range
        );
        for id in slice.iter() {
            (self.op)(id);
        }
    }
}

impl fmt::Debug for Workload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workload")
            .field("range", &self.range)
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExecutionStrategy: the strategy contract
// ─────────────────────────────────────────────────────────────────────────────

/// Contract implemented by every workload execution strategy.
///
/// Implementations must be shareable (`Send + Sync`) because one strategy
/// value is bound once at configuration time and then read by every pass
/// that selects it, potentially from worker threads.
pub trait ExecutionStrategy: Send + Sync {
    /// Human-readable name identifying this strategy.
    ///
    /// Used for logging and for error attribution when execution fails.
    fn strategy_name(&self) -> &'static str;

    /// The dispatch class this strategy belongs to.
    fn kind(&self) -> StrategyKind;

    /// Processes every entity the workload describes.
    ///
    /// Blocks until the whole pass has completed, whether the work ran
    /// in-line or fanned out to worker threads and joined. Failures
    /// propagate to the caller unchanged.
    fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError>;
}

impl ExecutionStrategy for Box<dyn ExecutionStrategy> {
    fn strategy_name(&self) -> &'static str {
        self.as_ref().strategy_name()
    }

    fn kind(&self) -> StrategyKind {
        self.as_ref().kind()
    }

    fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
        self.as_ref().execute(workload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RecordingStrategy {
        visited: AtomicUsize,
    }

    impl ExecutionStrategy for RecordingStrategy {
        fn strategy_name(&self) -> &'static str {
            "Recording"
        }

        fn kind(&self) -> StrategyKind {
            StrategyKind::Sequential
        }

        fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
            self.visited
                .fetch_add(workload.entity_count(), Ordering::Relaxed);
            workload.run_slice(workload.range());
            Ok(())
        }
    }

    #[test]
    fn test_run_slice_applies_op_to_each_id_in_order() {
        let seen = std::sync::Mutex::new(Vec::new());
        let op = |id: EntityId| seen.lock().unwrap().push(id.as_raw());
        let workload = Workload::new(EntityRange::new(2, 6), &op);

        workload.run_slice(workload.range());

        assert_eq!(*seen.lock().unwrap(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_run_slice_over_subrange_touches_only_that_slice() {
        let seen = std::sync::Mutex::new(Vec::new());
        let op = |id: EntityId| seen.lock().unwrap().push(id.as_raw());
        let workload = Workload::new(EntityRange::new(0, 10), &op);

        workload.run_slice(EntityRange::new(4, 7));

        assert_eq!(*seen.lock().unwrap(), vec![4, 5, 6]);
    }

    #[test]
    fn test_boxed_strategy_forwards_to_inner() {
        let boxed: Box<dyn ExecutionStrategy> = Box::new(RecordingStrategy {
            visited: AtomicUsize::new(0),
        });
        assert_eq!(boxed.strategy_name(), "Recording");
        assert_eq!(boxed.kind(), StrategyKind::Sequential);

        let op = |_: EntityId| {};
        let workload = Workload::new(EntityRange::from_count(5), &op);
        assert!(boxed.execute(&workload).is_ok());
    }

    #[test]
    fn test_strategy_error_reports_name_and_source() {
        let err = StrategyError::execution_failed("Parallel", "worker panicked");

        assert_eq!(err.strategy(), "Parallel");
        let message = err.to_string();
        assert!(
            message.contains("Parallel"),
            "Display should name the failing strategy: {message}"
        );
        assert!(
            std::error::Error::source(&err).is_some(),
            "source() must expose the underlying error"
        );
    }
}
