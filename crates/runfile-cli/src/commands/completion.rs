// Dweve Runfile - Scenario Description Language Engine
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


//! Shell completion generation - Tab completion for various shells

use crate::error::CliError;
use clap::Command;
use clap_complete::{generate, Generator};
use std::io;

/// Write the completion script for `cmd` to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Command;
/// use clap_complete::shells::Bash;
/// use runfile_cli::commands::generate_completion_for_command;
///
/// # fn main() -> Result<(), runfile_cli::error::CliError> {
/// let mut cmd = Command::new("runfile");
/// generate_completion_for_command(Bash, &mut cmd)?;
/// # Ok(())
/// # }
/// ```
pub fn generate_completion_for_command<G: Generator>(
    generator: G,
    cmd: &mut Command,
) -> Result<(), CliError> {
    generate(generator, cmd, cmd.get_name().to_string(), &mut io::stdout());
    Ok(())
}

/// Shell-specific instructions for installing completions.
///
/// Shell names are case-insensitive.
///
/// ```
/// use runfile_cli::commands::print_installation_instructions;
///
/// assert!(print_installation_instructions("bash").contains("~/.bashrc"));
/// assert_eq!(print_installation_instructions("unknown"), "Unsupported shell");
/// ```
pub fn print_installation_instructions(shell: &str) -> String {
    match shell.to_lowercase().as_str() {
        "bash" => {
            r#"# Bash completion installation:

# For current session only:
eval "$(runfile completion bash)"

# For persistent installation, add to your ~/.bashrc:
echo 'eval "$(runfile completion bash)"' >> ~/.bashrc
"#
        }
        "zsh" => {
            r#"# Zsh completion installation:

# For current session only:
eval "$(runfile completion zsh)"

# Or save to a directory in $fpath:
runfile completion zsh > ~/.zsh/completions/_runfile
"#
        }
        "fish" => {
            r#"# Fish completion installation:

runfile completion fish > ~/.config/fish/completions/runfile.fish
"#
        }
        "powershell" | "pwsh" => {
            r#"# PowerShell completion installation:

# Add this line to the profile found at $PROFILE:
runfile completion powershell | Out-String | Invoke-Expression
"#
        }
        "elvish" => {
            r#"# Elvish completion installation:

# Add to ~/.elvish/rc.elv:
eval (runfile completion elvish | slurp)
"#
        }
        _ => "Unsupported shell",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_case_insensitive() {
        assert_eq!(
            print_installation_instructions("ZSH"),
            print_installation_instructions("zsh")
        );
        assert!(print_installation_instructions("pwsh").contains("Invoke-Expression"));
    }
}
