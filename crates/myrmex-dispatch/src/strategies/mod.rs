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

//! Built-in execution strategies.
//!
//! Both are stateless values meant to be bound into threshold parameters
//! once, at configuration time. Anything implementing
//! [`ExecutionStrategy`](myrmex_core::ExecutionStrategy) can stand in for
//! them.

mod parallel;
mod sequential;

pub use parallel::*;
pub use sequential::*;
