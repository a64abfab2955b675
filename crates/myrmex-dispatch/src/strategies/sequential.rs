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

//! The in-line strategy: the whole pass runs on the calling thread.

use myrmex_core::{ExecutionStrategy, StrategyError, StrategyKind, Workload};

/// Runs the whole workload in-line on the calling thread, in ascending id
/// order.
///
/// The baseline strategy for passes below the dispatch threshold, where
/// fan-out overhead would cost more than it saves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialStrategy;

impl SequentialStrategy {
    /// Creates the sequential strategy.
    pub const fn new() -> Self {
        Self
    }
}

impl ExecutionStrategy for SequentialStrategy {
    fn strategy_name(&self) -> &'static str {
        "Sequential"
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Sequential
    }

    fn execute(&self, workload: &Workload<'_>) -> Result<(), StrategyError> {
        workload.run_slice(workload.range());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use myrmex_core::{EntityId, EntityRange};
    use std::sync::Mutex;

    #[test]
    fn test_sequential_visits_every_id_in_ascending_order() {
        let seen = Mutex::new(Vec::new());
        let op = |id: EntityId| seen.lock().unwrap().push(id.as_raw());
        let workload = Workload::new(EntityRange::new(3, 8), &op);

        let strategy = SequentialStrategy::new();
        strategy.execute(&workload).expect("in-line pass cannot fail");

        assert_eq!(*seen.lock().unwrap(), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_sequential_empty_range_is_a_noop() {
        let seen = Mutex::new(Vec::new());
        let op = |id: EntityId| seen.lock().unwrap().push(id.as_raw());
        let workload = Workload::new(EntityRange::from_count(0), &op);

        SequentialStrategy::new()
            .execute(&workload)
            .expect("empty pass cannot fail");

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sequential_identity() {
        let strategy = SequentialStrategy::new();
        assert_eq!(strategy.strategy_name(), "Sequential");
        assert_eq!(strategy.kind(), StrategyKind::Sequential);
    }
}
