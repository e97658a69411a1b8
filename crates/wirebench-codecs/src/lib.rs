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

//! Wirebench Codecs
//!
//! The seven wire-format implementations of the
//! [`Codec`](wirebench_core::Codec) contract and the [`CodecRegistry`] that
//! maps each [`Format`](wirebench_core::Format) to its implementation.
//!
//! | Format | Strategy |
//! |---|---|
//! | `jsondom` | document tree built per record, strict key lookup on read |
//! | `jsonstream` | serde straight to and from bytes |
//! | `flexbuffers` | schema-less FlexBuffers maps |
//! | `flatbuffers` | fixed-slot FlatBuffers tables, verified on read |
//! | `messagepack` | MessagePack with named keys |
//! | `cbor` | CBOR via serde |
//! | `arrow` | one Arrow IPC record batch, column per field |
//!
//! # Example
//!
//! ```rust
//! use wirebench_codecs::CodecRegistry;
//! use wirebench_core::{EventGenerator, Format};
//!
//! let registry = CodecRegistry::standard();
//! let events = EventGenerator::default().generate(10);
//!
//! let codec = registry.get(Format::Cbor).unwrap();
//! let bytes = codec.encode(&events).unwrap();
//! assert_eq!(codec.decode(&bytes).unwrap(), events);
//! ```

mod arrow_ipc;
mod cbor;
mod flatbuf;
mod flexbuf;
mod json;
mod msgpack;
pub mod registry;

pub use arrow_ipc::ArrowCodec;
pub use cbor::CborCodec;
pub use flatbuf::FlatBuffersCodec;
pub use flexbuf::FlexBuffersCodec;
pub use json::{JsonDomCodec, JsonStreamCodec};
pub use msgpack::MessagePackCodec;
pub use registry::{CodecRegistry, RegistryError};
