//! Command-line argument parsing.
//!
//! This module defines the command-line interface of the `tagopts` tool using
//! the `clap` crate.

use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

/// Command-line arguments for the tagopts developer tool.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use tagopts_cli::cli_args::{Args, Command};
///
/// let args = Args::parse_from(["tagopts", "inspect", "-n, --name"]);
/// assert!(matches!(args.command, Command::Inspect { .. }));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Raise the log level. Repeat for more detail.
    ///
    /// Must come before the subcommand, since `demo` passes `-v` through.
    /// `RUST_LOG` still takes precedence when set.
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parse tag strings and print the resulting descriptors.
    Inspect {
        /// Tag strings, e.g. `-s, --server, obligatory, description='Server'`
        #[arg(required = true, allow_hyphen_values = true)]
        tags: Vec<String>,
    },

    /// Parse arguments against the built-in demo options and print the result.
    ///
    /// Everything after `demo` is handed to the demo parser, including `-h`.
    #[command(disable_help_flag = true)]
    Demo {
        /// Program name shown in the demo's usage line.
        #[arg(long)]
        program_name: Option<String>,

        /// Arguments for the demo parser.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Args {
    /// The default log filter for the requested verbosity.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
