//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API,
//! providing a type-safe and well-documented command interface.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Doxport CLI - Export API documentation models to versioned JSON
///
/// A command-line tool for exporting and checking documentation models
/// produced by a documentation host, with full diagnostic reporting for
/// everything the export schema cannot represent.
#[derive(Parser, Debug)]
#[command(
    name = "doxport",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "DOXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a documentation model to its JSON artifact
    Export(ExportArgs),

    /// Project a documentation model and report diagnostics without writing
    Check(CheckArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the export command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Path to the documentation model file (JSON or YAML)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Path the artifact is written to (falls back to the config file's export.out)
    #[arg(long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Fail when the export drops any fragment
    #[arg(long)]
    pub strict: bool,

    /// Show every recorded diagnostic instead of the summary
    #[arg(long)]
    pub show_diagnostics: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the documentation model file (JSON or YAML)
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Fail when the export would drop any fragment
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["doxport", "-vv", "check", "model.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let quiet_cli = Cli::parse_from(["doxport", "--quiet", "check", "model.json"]);
        assert_eq!(quiet_cli.verbosity_level(), 0);
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::parse_from(["doxport", "export", "model.json", "--out", "api.json"]);
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.model, PathBuf::from("model.json"));
                assert_eq!(args.out, Some(PathBuf::from("api.json")));
                assert!(!args.strict);
            }
            other => panic!("expected export command, got {:?}", other),
        }
    }
}
