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

//! Formats command - the supported format catalogue

use colored::Colorize;
use wirebench_codecs::CodecRegistry;
use wirebench_core::Format;

/// Print every format with its content type and traits.
///
/// Formats without a registered codec are marked as such.
pub fn formats() {
    let registry = CodecRegistry::standard();

    println!(
        "{}",
        format!(
            "{:<12} {:<18} {:<38} {:<8} {}",
            "ID", "LABEL", "CONTENT TYPE", "KIND", "SCHEMA"
        )
        .bold()
    );
    for format in Format::ALL {
        let kind = if format.is_textual() { "text" } else { "binary" };
        let schema = if format.is_schema_based() { "yes" } else { "no" };
        let line = format!(
            "{:<12} {:<18} {:<38} {:<8} {}",
            format.id(),
            format.label(),
            format.content_type(),
            kind,
            schema
        );
        if registry.contains(format) {
            println!("{}", line);
        } else {
            println!("{} {}", line, "(no codec)".dimmed());
        }
    }
}
