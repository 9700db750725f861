#[cfg(feature = "cli")]
pub mod cli;
pub mod paths;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::CodeOpen;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "boj")]
#[command(about = "boj-tool: a CLI tool for BOJ")]
pub struct CliConfig {
    /// Set log level to INFO
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level to DEBUG
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the saved session file
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and save the session
    Login,

    /// Remove the saved session
    Logout,

    /// Submit a source file and wait for the verdict
    Submit {
        /// The problem number
        number: u32,

        /// Filename to submit
        filename: PathBuf,

        /// Use this language code instead of detecting it from the extension
        #[arg(long)]
        language_code: Option<u32>,

        /// Source code visibility (overrides submit.code_open)
        #[arg(long, value_enum)]
        code_open: Option<CodeOpen>,

        /// Return right after submitting
        #[arg(long)]
        no_wait: bool,
    },

    /// Show a user's statistics
    Stats {
        /// The user to show stats (defaults to the logged-in user)
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Print version
    Version,
}
