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

//! # Myrmex Dispatch
//!
//! Execution composition for entity passes: concrete sequential and
//! parallel strategies, and the threshold composer that picks between two
//! strategies by comparing a pass's entity count against a configured
//! threshold. Selection is bound when a composer is configured, and each
//! `execute` call is a pure function of its arguments.

#![warn(missing_docs)]

pub mod settings;
pub mod strategies;
pub mod threshold;

pub use settings::{DispatchSettings, DEFAULT_ENTITY_THRESHOLD};
pub use strategies::{ParallelStrategy, SequentialStrategy};
pub use threshold::{ThresholdComposer, ThresholdParams};
