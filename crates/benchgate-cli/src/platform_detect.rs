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


//! Platform inference for result files.
//!
//! A record's platform tag is chosen in this order:
//!
//! 1. the record's own `platform` field
//! 2. the `--platform` flag
//! 3. a platform token in the file path (`linux`, `macos`/`darwin`/`osx`/`mac`,
//!    `windows`/`win`/`win32`/`win64`)
//! 4. the host operating system
//!
//! The chosen tag is passed to the engine unchanged, so an unrecognised tag
//! still shows up as a resolution note.

use benchgate::Platform;
use std::path::Path;

fn token_platform(token: &str) -> Option<Platform> {
    match token {
        "linux" | "ubuntu" => Some(Platform::Linux),
        "macos" | "darwin" | "osx" | "mac" => Some(Platform::Macos),
        "windows" | "win" | "win32" | "win64" => Some(Platform::Windows),
        _ => None,
    }
}

/// Infers a platform from path naming conventions.
///
/// Tokens are split on non-alphanumeric characters, so `results_linux.json`
/// and `ci/macos/ipc.json` are detected while `window_size.json` is not. The
/// file name is checked before its parent directories.
///
/// ```
/// use benchgate::Platform;
/// use benchgate_cli::platform_detect::detect_from_path;
/// use std::path::Path;
///
/// assert_eq!(detect_from_path(Path::new("out/bench-darwin.json")), Some(Platform::Macos));
/// assert_eq!(detect_from_path(Path::new("out/bench.json")), None);
/// ```
pub fn detect_from_path(path: &Path) -> Option<Platform> {
    path.components().rev().find_map(|component| {
        let part = component.as_os_str().to_string_lossy().to_lowercase();
        part.split(|c: char| !c.is_ascii_alphanumeric())
            .find_map(token_platform)
    })
}

/// Platform tag of the host running the CLI.
pub fn host_platform_tag() -> &'static str {
    std::env::consts::OS
}

/// Chooses the platform tag for one record.
pub fn platform_tag_for(record_platform: Option<&str>, flag: Option<&str>, path: &Path) -> String {
    if let Some(tag) = record_platform.or(flag) {
        return tag.to_string();
    }
    match detect_from_path(path) {
        Some(platform) => platform.as_str().to_string(),
        None => host_platform_tag().to_string(),
    }
}
