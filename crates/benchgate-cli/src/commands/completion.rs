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


//! Shell completion generation

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
///
/// # Errors
///
/// Never fails today; returns `Result` like the other commands.
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    let name = cmd.get_name().to_string();
    generate(generator, cmd, name, &mut io::stdout());
    Ok(())
}

/// Installation instructions for a shell's completion script.
///
/// Shell names are case-insensitive. Unknown shells yield `None`.
///
/// ```
/// use benchgate_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("ZSH").unwrap().contains("_benchgate"));
/// assert!(print_installation_instructions("tcsh").is_none());
/// ```
pub fn print_installation_instructions(shell: &str) -> Option<String> {
    let text = match shell.to_lowercase().as_str() {
        "bash" => "# Bash: current session\n\
             eval \"$(benchgate completion bash)\"\n\n\
             # Bash: persistent\n\
             benchgate completion bash > ~/.local/share/bash-completion/completions/benchgate\n"
            .to_string(),
        "zsh" => "# Zsh: current session\n\
             eval \"$(benchgate completion zsh)\"\n\n\
             # Zsh: persistent (directory must be in $fpath)\n\
             benchgate completion zsh > ~/.zsh/completions/_benchgate\n"
            .to_string(),
        "fish" => "# Fish: picked up by new sessions\n\
             benchgate completion fish > ~/.config/fish/completions/benchgate.fish\n"
            .to_string(),
        "powershell" | "pwsh" => "# PowerShell: add to $PROFILE for persistence\n\
             benchgate completion powershell | Out-String | Invoke-Expression\n"
            .to_string(),
        "elvish" => "# Elvish: add to ~/.elvish/rc.elv for persistence\n\
             eval (benchgate completion elvish)\n"
            .to_string(),
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installation_instructions_known_shells() {
        for shell in ["bash", "zsh", "fish", "powershell", "pwsh", "elvish"] {
            let instructions = print_installation_instructions(shell).unwrap();
            assert!(instructions.contains("benchgate completion"));
        }
    }

    #[test]
    fn test_installation_instructions_unknown_shell() {
        assert!(print_installation_instructions("cmd.exe").is_none());
    }
}
