//! CLI module for the tsz grammar tooling
//!
//! ## Commands
//!
//! - `parse <file>` - Print the syntax tree as an S-expression (or JSON)
//! - `lex <file>` - Print the token stream
//! - `check <file>...` - Report syntax errors, exit non-zero if any
//! - `highlight <file>` - Print highlight captures
//! - `node-types` - Print `node-types.json`
//! - `language` - Print grammar handle metadata
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Parser and tooling for the tsz language
#[derive(Parser, Debug)]
#[command(name = "tsz")]
#[command(version = VERSION)]
#[command(about = "Parser and tooling for the tsz language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a file and print its syntax tree
    Parse {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Only report errors, do not print the tree
        #[arg(short, long)]
        quiet: bool,
        /// Print the tree as JSON instead of an S-expression
        #[arg(long, conflicts_with = "quiet")]
        json: bool,
    },

    /// Tokenize a file and print the tokens (debug)
    Lex {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Check files for syntax errors
    Check {
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Print highlight captures for a file
    Highlight {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print node-types.json for the grammar
    NodeTypes,

    /// Print metadata about the grammar handle
    Language,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Parse { file, quiet, json } => {
            let format = if quiet {
                commands::TreeFormat::None
            } else if json {
                commands::TreeFormat::Json
            } else {
                commands::TreeFormat::Sexp
            };
            commands::parse_file(&file.to_string_lossy(), format)
        }
        Command::Lex { file } => commands::lex_file(&file.to_string_lossy()),
        Command::Check { files } => {
            let paths: Vec<String> = files.iter().map(|f| f.to_string_lossy().to_string()).collect();
            commands::check_files(&paths)
        }
        Command::Highlight { file } => commands::highlight_file(&file.to_string_lossy()),
        Command::NodeTypes => commands::print_node_types(),
        Command::Language => commands::print_language(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_parse() {
        let cli = Cli::try_parse_from(["tsz", "parse", "main.tsz"]).unwrap();
        if let Command::Parse { file, quiet, json } = cli.command {
            assert_eq!(file, PathBuf::from("main.tsz"));
            assert!(!quiet);
            assert!(!json);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::try_parse_from(["tsz", "parse", "--json", "main.tsz"]).unwrap();
        assert!(matches!(cli.command, Command::Parse { json: true, .. }));

        let cli = Cli::try_parse_from(["tsz", "parse", "-q", "main.tsz"]).unwrap();
        assert!(matches!(cli.command, Command::Parse { quiet: true, .. }));
    }

    #[test]
    fn test_cli_quiet_conflicts_with_json() {
        assert!(Cli::try_parse_from(["tsz", "parse", "--quiet", "--json", "main.tsz"]).is_err());
    }

    #[test]
    fn test_cli_check_requires_files() {
        assert!(Cli::try_parse_from(["tsz", "check"]).is_err());
        let cli = Cli::try_parse_from(["tsz", "check", "a.tsz", "b.tsz"]).unwrap();
        if let Command::Check { files } = cli.command {
            assert_eq!(files.len(), 2);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_metadata_commands() {
        let cli = Cli::try_parse_from(["tsz", "node-types"]).unwrap();
        assert!(matches!(cli.command, Command::NodeTypes));
        let cli = Cli::try_parse_from(["tsz", "language"]).unwrap();
        assert!(matches!(cli.command, Command::Language));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["tsz"]).is_err());
    }

    #[test]
    fn test_cli_error_codes() {
        assert_eq!(CliError::failure("x").exit_code, ExitCode::FAILURE);
        let err = CliError::with_code("bad", 2);
        assert_eq!(err.exit_code, ExitCode(2));
        assert_eq!(err.to_string(), "bad");
    }
}
