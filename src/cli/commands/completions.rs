//! `completions` command
//!
//! Prints a completion script for `envschema` to stdout, covering the
//! subcommands, `--rule`/`--format` flags and the `human`/`json` format
//! values. Install it with e.g.
//! `envschema completions bash > ~/.local/share/bash-completion/completions/envschema`.

use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use crate::cli::args::{Cli, CompletionsArgs, Shell};

/// Generate and print a shell completion script to stdout.
pub fn run(args: &CompletionsArgs) {
    let shell = match args.shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "envschema", &mut std::io::stdout());
}
