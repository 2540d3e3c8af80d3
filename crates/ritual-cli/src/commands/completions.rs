use clap_complete::{generate, Shell};

use super::CmdResult;

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell, command: &mut clap::Command) -> CmdResult {
    generate(shell, command, "ritual", &mut std::io::stdout());
    Ok(())
}
