// Dweve Wirebench - Wire-format Serialization Benchmark
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

//! Wirebench Core
//!
//! Shared vocabulary for the Wirebench workspace: the benchmarked record type,
//! the closed catalogue of wire formats, dataset size presets, and the codec
//! contract every format implementation satisfies.
//!
//! # Modules
//!
//! - [`model`]: the [`CalendarEvent`] record
//! - [`format`]: the [`Format`] catalogue with content types and labels
//! - [`size`]: [`DatasetSizePreset`] and the dataset size limit
//! - [`codec`]: the [`Codec`] trait
//! - [`generator`]: deterministic fixture generation
//!
//! # Example
//!
//! ```rust
//! use wirebench_core::{DatasetSizePreset, EventGenerator, Format};
//!
//! let size: DatasetSizePreset = "small".parse().unwrap();
//! let events = EventGenerator::default().generate(size.record_count());
//! assert_eq!(events.len(), 1_000);
//! assert_eq!(Format::Cbor.content_type(), "application/cbor");
//! ```

pub mod codec;
pub mod error;
pub mod format;
pub mod generator;
pub mod model;
pub mod size;

pub use codec::{guard_decode, Codec};
pub use error::{CodecError, CoreError, Result};
pub use format::Format;
pub use generator::{EventGenerator, DEFAULT_SEED};
pub use model::CalendarEvent;
pub use size::{validate_dataset_size, DatasetSizePreset, MAX_DATASET_SIZE};
