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

/// A marker trait for types that can be stored as components in a chunk.
///
/// Implement this for any struct you wish to attach to an entity. The
/// `'static` lifetime ensures that the component type does not contain any
/// non-static references, and `Send + Sync` are required so component data
/// can be read from multiple worker threads once a pass's growth has
/// stabilized.
///
/// Chunks additionally require `Default` at their construction and growth
/// sites: slots uncovered by any write are default-filled.
pub trait Component: 'static + Send + Sync {}
