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

//! Format-to-codec registry.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;
use wirebench_core::{Codec, Format};

use crate::{
    ArrowCodec, CborCodec, FlatBuffersCodec, FlexBuffersCodec, JsonDomCodec, JsonStreamCodec,
    MessagePackCodec,
};

/// Registry lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No codec is registered for the format.
    #[error("Format '{0}' is not implemented")]
    NotImplemented(Format),
}

/// Immutable map from [`Format`] to its codec.
///
/// Built once at startup and passed by reference. Iteration follows the
/// [`Format`] declaration order regardless of registration order.
#[derive(Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<Format, Box<dyn Codec>>,
}

impl CodecRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding all seven standard codecs.
    pub fn standard() -> Self {
        Self::new()
            .with(JsonDomCodec)
            .with(JsonStreamCodec)
            .with(FlexBuffersCodec)
            .with(FlatBuffersCodec)
            .with(MessagePackCodec)
            .with(CborCodec)
            .with(ArrowCodec)
    }

    /// Add a codec, replacing any codec previously registered for its format.
    pub fn with(mut self, codec: impl Codec + 'static) -> Self {
        self.register(Box::new(codec));
        self
    }

    /// Add a boxed codec, returning the one it replaced.
    pub fn register(&mut self, codec: Box<dyn Codec>) -> Option<Box<dyn Codec>> {
        self.codecs.insert(codec.format(), codec)
    }

    /// Look up the codec for `format`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotImplemented`] if no codec is registered.
    pub fn get(&self, format: Format) -> Result<&dyn Codec, RegistryError> {
        self.codecs
            .get(&format)
            .map(|codec| codec.as_ref())
            .ok_or(RegistryError::NotImplemented(format))
    }

    /// Whether a codec is registered for `format`.
    pub fn contains(&self, format: Format) -> bool {
        self.codecs.contains_key(&format)
    }

    /// Registered formats in [`Format`] order.
    pub fn formats(&self) -> impl Iterator<Item = Format> + '_ {
        self.codecs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.formats()).finish()
    }
}
