//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Layout Manager - Check and install a project's file layout
#[derive(Parser, Debug)]
#[command(name = "layout")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory
    #[arg(
        short = 'C',
        long = "project",
        global = true,
        default_value = ".",
        env = "LAYOUT_PROJECT"
    )]
    pub project: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check the project against its manifest
    ///
    /// Verifies that required files exist, are under version control and
    /// match their recorded checksums, flags deprecated files, and lists
    /// files the manifest does not mention. Exits with status 1 when
    /// problems are found.
    Check {
        /// Offer to fix unversioned and deprecated files
        #[arg(long)]
        ask: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Regenerate the checksummed manifest from the original manifest
    ///
    /// Only needed by framework maintainers when cutting a release.
    CreateRelease,

    /// Install or upgrade framework files into a target directory
    ///
    /// Examples:
    ///   layout install ../framework .
    ///   layout -C ../framework install ../framework ../my-project
    Install {
        /// Directory the framework files are taken from
        source: PathBuf,

        /// Directory the framework is installed into
        target: PathBuf,
    },

    /// Check device files against the design they derive from
    DesignVsDevice {
        /// Generate empty stubs for missing device files
        #[arg(long)]
        generate: bool,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   layout completions bash > ~/.local/share/bash-completion/completions/layout
    ///   layout completions zsh > ~/.zfunc/_layout
    ///   layout completions fish > ~/.config/fish/completions/layout.fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
