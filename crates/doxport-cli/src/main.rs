//! Doxport CLI - Command-line interface for documentation model export
//!
//! This is the main entry point for the doxport CLI application, providing
//! commands for exporting documentation models to versioned JSON artifacts
//! and checking models for fragments the export schema cannot represent.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Load configuration
    let config = {
        let _config_timer = Timer::new("config_loading");
        tracing::debug!("Loading configuration");
        Config::load_with_file(cli.config.as_deref())?
    };

    // Create output writer
    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color(),
        cli.quiet,
        cli.verbosity_level(),
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Export(args) => handlers::handle_export(args, &config, &mut output),
        Commands::Check(args) => handlers::handle_check(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    // Create logging configuration from CLI args and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing_export() {
        let cli = Cli::parse_from(["doxport", "export", "model.json", "--out", "api.json"]);
        assert!(matches!(cli.command, Commands::Export(_)));
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_cli_parsing_check_with_verbosity() {
        let cli = Cli::parse_from(["doxport", "-vv", "check", "model.json", "--strict"]);
        assert_eq!(cli.verbosity_level(), 2);
        match &cli.command {
            Commands::Check(args) => {
                assert!(args.strict);
            }
            other => panic!("expected check command, got {:?}", other),
        }
    }
}
