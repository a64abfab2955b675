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

//! # Threshold Dispatch
//!
//! The composer that picks one of two bound strategies per pass.
//!
//! Binding happens once: [`ThresholdParams`] captures the threshold and
//! both strategy values at configuration time, typically in a `const` or
//! `static` context so the pairing is fixed before any pass runs. Each
//! pass then calls [`ThresholdComposer::execute`] with the live entity
//! count, and the composer selects:
//!
//! * count strictly greater than the threshold: the *greater* strategy,
//! * count equal to or below the threshold (ties included): the *lower*
//!   strategy.
//!
//! Selection reads nothing but its arguments and the bound parameters.
//! The composer holds no counters or history, so equal inputs always
//! select the same strategy, and a composer can be shared or copied
//! freely.

use crate::settings::DispatchSettings;
use myrmex_core::{ExecutionStrategy, StrategyError, Workload};
use std::fmt;

/// The configuration a threshold composer dispatches from: one threshold
/// and the two strategies it arbitrates between.
///
/// Both strategies are owned, so a `ThresholdParams` built from `const`
/// constructors can live in a `static` and serve every pass of a run.
pub struct ThresholdParams<G, L> {
    entity_threshold: usize,
    strategy_greater: G,
    strategy_lower: L,
}

impl<G, L> ThresholdParams<G, L>
where
    G: ExecutionStrategy,
    L: ExecutionStrategy,
{
    /// Binds a threshold and two strategies.
    ///
    /// `strategy_greater` runs passes whose entity count strictly exceeds
    /// `entity_threshold`; `strategy_lower` runs everything else,
    /// including passes exactly at the threshold.
    pub const fn new(entity_threshold: usize, strategy_greater: G, strategy_lower: L) -> Self {
        Self {
            entity_threshold,
            strategy_greater,
            strategy_lower,
        }
    }

    /// Binds strategies with the threshold taken from `settings`.
    pub fn from_settings(settings: &DispatchSettings, strategy_greater: G, strategy_lower: L) -> Self {
        Self::new(settings.entity_threshold, strategy_greater, strategy_lower)
    }

    /// The bound entity threshold.
    pub const fn entity_threshold(&self) -> usize {
        self.entity_threshold
    }

    /// The selection rule: whether a pass of `entity_count` entities runs
    /// the greater-than-threshold strategy.
    ///
    /// Strictly greater; a count equal to the threshold answers `false`.
    pub const fn exceeds(&self, entity_count: usize) -> bool {
        entity_count > self.entity_threshold
    }

    /// The strategy bound to counts above the threshold.
    pub fn strategy_greater(&self) -> &G {
        &self.strategy_greater
    }

    /// The strategy bound to counts at or below the threshold.
    pub fn strategy_lower(&self) -> &L {
        &self.strategy_lower
    }

    /// A composer dispatching from these parameters.
    pub const fn composer(&self) -> ThresholdComposer<'_, G, L> {
        ThresholdComposer::new(self)
    }
}

impl<G, L> fmt::Debug for ThresholdParams<G, L>
where
    G: ExecutionStrategy,
    L: ExecutionStrategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdParams")
            .field("entity_threshold", &self.entity_threshold)
            .field("strategy_greater", &self.strategy_greater.strategy_name())
            .field("strategy_lower", &self.strategy_lower.strategy_name())
            .finish()
    }
}

/// Per-pass dispatcher over a bound [`ThresholdParams`].
///
/// A composer is a borrow of its parameters and nothing else. It is
/// `Copy`, costs nothing to hand around, and every [`execute`] is a pure
/// function of the entity count, the workload, and the bound parameters.
///
/// [`execute`]: ThresholdComposer::execute
pub struct ThresholdComposer<'p, G, L> {
    params: &'p ThresholdParams<G, L>,
}

impl<'p, G, L> ThresholdComposer<'p, G, L>
where
    G: ExecutionStrategy,
    L: ExecutionStrategy,
{
    /// Creates a composer dispatching from `params`.
    pub const fn new(params: &'p ThresholdParams<G, L>) -> Self {
        Self { params }
    }

    /// The parameters this composer dispatches from.
    pub const fn params(&self) -> &'p ThresholdParams<G, L> {
        self.params
    }

    /// Runs `workload` on the strategy selected by `entity_count`.
    ///
    /// The count is an explicit argument rather than being derived from
    /// the workload range, so schedulers can select on a live measure
    /// (an occupancy count, say) while the pass still covers its full
    /// range. Strategy failures propagate to the caller unchanged.
    pub fn execute(
        &self,
        entity_count: usize,
        workload: &Workload<'_>,
    ) -> Result<(), StrategyError> {
        let threshold = self.params.entity_threshold;
        if self.params.exceeds(entity_count) {
            let strategy = self.params.strategy_greater();
            log::trace!(
                "Pass of {entity_count} entities exceeds threshold {threshold}: '{name}'",
                name = strategy.strategy_name()
            );
            strategy.execute(workload)
        } else {
            let strategy = self.params.strategy_lower();
            log::trace!(
                "Pass of {entity_count} entities within threshold {threshold}: '{name}'",
                name = strategy.strategy_name()
            );
            strategy.execute(workload)
        }
    }
}

impl<G, L> Clone for ThresholdComposer<'_, G, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G, L> Copy for ThresholdComposer<'_, G, L> {}

impl<G, L> fmt::Debug for ThresholdComposer<'_, G, L>
where
    G: ExecutionStrategy,
    L: ExecutionStrategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThresholdComposer")
            .field("params", self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::{ParallelStrategy, SequentialStrategy};
    use myrmex_core::{EntityId, EntityRange, StrategyKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // --- TEST DOUBLES ---

    struct CountingStrategy {
        name: &'static str,
        executions: AtomicUsize,
    }

    impl CountingStrategy {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                executions: AtomicUsize::new(0),
            }
        }

        fn executions(&self) -> usize {
            self.executions.load(Ordering::SeqCst)
        }
    }

    impl ExecutionStrategy for CountingStrategy {
        fn strategy_name(&self) -> &'static str {
            self.name
        }

        fn kind(&self) -> StrategyKind {
            StrategyKind::Sequential
        }

        fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
            self.executions.fetch_add(1, Ordering::SeqCst);
            workload.run_slice(workload.range());
            Ok(())
        }
    }

    struct FailingStrategy;

    impl ExecutionStrategy for FailingStrategy {
        fn strategy_name(&self) -> &'static str {
            "Failing"
        }

        fn kind(&self) -> StrategyKind {
            StrategyKind::Sequential
        }

        fn execute(&self, _workload: &Workload<'_>) -> Result<(), StrategyError> {
            Err(StrategyError::execution_failed(
                "Failing",
                "chunk growth failed mid-pass",
            ))
        }
    }

    fn noop_workload_op() -> impl Fn(EntityId) + Send + Sync {
        |_| {}
    }

    // --- TESTS ---

    #[test]
    fn test_count_above_threshold_selects_the_greater_strategy() {
        // --- 1. SETUP ---
        let params = ThresholdParams::new(
            64,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(65), &op);

        // --- 2. ACTION ---
        composer.execute(65, &workload).expect("pass must succeed");

        // --- 3. ASSERTIONS ---
        assert_eq!(params.strategy_greater().executions(), 1);
        assert_eq!(
            params.strategy_lower().executions(),
            0,
            "only the selected strategy may run"
        );
    }

    #[test]
    fn test_count_at_threshold_ties_to_the_lower_strategy() {
        let params = ThresholdParams::new(
            64,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(64), &op);

        composer.execute(64, &workload).expect("pass must succeed");

        assert_eq!(
            params.strategy_lower().executions(),
            1,
            "a count equal to the threshold must not select the greater strategy"
        );
        assert_eq!(params.strategy_greater().executions(), 0);
    }

    #[test]
    fn test_count_below_threshold_selects_the_lower_strategy() {
        let params = ThresholdParams::new(
            64,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(10), &op);

        composer.execute(10, &workload).expect("pass must succeed");

        assert_eq!(params.strategy_lower().executions(), 1);
        assert_eq!(params.strategy_greater().executions(), 0);
    }

    #[test]
    fn test_selection_is_pure_across_repeated_calls() {
        let params = ThresholdParams::new(
            64,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(64), &op);

        for _ in 0..3 {
            composer.execute(64, &workload).expect("pass must succeed");
        }
        for _ in 0..2 {
            composer.execute(65, &workload).expect("pass must succeed");
        }

        assert_eq!(
            params.strategy_lower().executions(),
            3,
            "equal inputs must select equally; no history may leak in"
        );
        assert_eq!(params.strategy_greater().executions(), 2);
        assert!(!params.exceeds(64));
        assert!(params.exceeds(65));
    }

    #[test]
    fn test_zero_threshold_sends_every_nonempty_pass_to_greater() {
        let params = ThresholdParams::new(
            0,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(1), &op);

        composer.execute(0, &workload).expect("pass must succeed");
        composer.execute(1, &workload).expect("pass must succeed");

        assert_eq!(params.strategy_lower().executions(), 1, "only the empty pass ties");
        assert_eq!(params.strategy_greater().executions(), 1);
    }

    #[test]
    fn test_selection_uses_the_count_argument_not_the_workload_size() {
        let visits = AtomicUsize::new(0);
        let op = |_: EntityId| {
            visits.fetch_add(1, Ordering::SeqCst);
        };
        let params = ThresholdParams::new(
            64,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );
        let composer = params.composer();
        let workload = Workload::new(EntityRange::from_count(5), &op);

        composer.execute(100, &workload).expect("pass must succeed");

        assert_eq!(
            params.strategy_greater().executions(),
            1,
            "selection follows the explicit count"
        );
        assert_eq!(visits.load(Ordering::SeqCst), 5, "the pass still covers its range");
    }

    #[test]
    fn test_strategy_failure_propagates_verbatim() {
        let params = ThresholdParams::new(64, CountingStrategy::new("Greater"), FailingStrategy);
        let composer = params.composer();
        let op = noop_workload_op();
        let workload = Workload::new(EntityRange::from_count(10), &op);

        let err = composer
            .execute(10, &workload)
            .expect_err("the failing strategy was selected");

        assert_eq!(err.strategy(), "Failing");
        assert!(
            err.to_string().contains("chunk growth failed mid-pass"),
            "the domain error must survive composition: {err}"
        );
        assert_eq!(
            params.strategy_greater().executions(),
            0,
            "a failure must not trigger a fallback run"
        );
    }

    #[test]
    fn test_params_bind_in_const_context() {
        // --- 1. SETUP ---
        // The pairing is fixed before any pass exists.
        static PARAMS: ThresholdParams<ParallelStrategy, SequentialStrategy> =
            ThresholdParams::new(64, ParallelStrategy::new(), SequentialStrategy::new());

        let visits = AtomicUsize::new(0);
        let op = |_: EntityId| {
            visits.fetch_add(1, Ordering::SeqCst);
        };
        let workload = Workload::new(EntityRange::from_count(3), &op);

        // --- 2. ACTION ---
        PARAMS.composer().execute(3, &workload).expect("pass must succeed");

        // --- 3. ASSERTIONS ---
        assert_eq!(PARAMS.entity_threshold(), 64);
        assert_eq!(visits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_from_settings_takes_the_threshold_once() {
        let mut settings = DispatchSettings::with_entity_threshold(8);
        let params = ThresholdParams::from_settings(
            &settings,
            CountingStrategy::new("Greater"),
            CountingStrategy::new("Lower"),
        );

        // Later settings edits must not reach the bound parameters.
        settings.entity_threshold = 1_000;

        assert_eq!(params.entity_threshold(), 8);
        assert!(params.exceeds(9));
    }
}
