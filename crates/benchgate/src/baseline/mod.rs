// Dweve Benchgate - Performance Regression Gate
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Baseline tables: data model, loading and resolution.
//!
//! # Modules
//!
//! - `table`: Baseline entries and the per-platform table
//! - `loader`: YAML/JSON loading with load-time validation
//! - `resolver`: Platform fallback and first-match key lookup

pub mod loader;
pub mod resolver;
pub mod table;

pub use loader::load_baseline_table;
pub use resolver::{resolve, Resolution, ResolutionNote};
pub use table::{BaselineEntry, BaselineTable, BoundKind, DEFAULT_TOLERANCE_PERCENT};
