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

//! Codec commands.

use crate::commands;
use crate::error::Result;
use clap::Subcommand;
use wirebench_core::DEFAULT_SEED;

/// Codec inspection commands.
#[derive(Subcommand)]
pub enum CodecCommands {
    /// List supported formats
    Formats,

    /// Round-trip generated records through every codec
    ///
    /// Fails if any codec does not reproduce the records field for field.
    Verify {
        /// Number of generated records
        #[arg(short, long, default_value_t = 250)]
        records: usize,

        /// Fixture generator seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

impl CodecCommands {
    /// Execute the codec command.
    ///
    /// # Errors
    ///
    /// `verify` returns `Err` if any codec fails its round trip.
    pub fn execute(self) -> Result<()> {
        match self {
            CodecCommands::Formats => {
                commands::formats();
                Ok(())
            }
            CodecCommands::Verify { records, seed } => commands::verify(records, seed),
        }
    }
}
