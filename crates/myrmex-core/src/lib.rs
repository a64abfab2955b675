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

//! # Myrmex Core
//!
//! Foundational crate containing the identity types and interface contracts
//! shared by the storage (`myrmex-data`) and dispatch (`myrmex-dispatch`)
//! layers.

#![warn(missing_docs)]

pub mod ecs;
pub mod memory;
pub mod strategy;

pub use ecs::{EntityId, EntityRange};
pub use strategy::{ExecutionStrategy, StrategyError, StrategyKind, Workload};
