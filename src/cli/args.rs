//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::manifest::DEFAULT_MANIFEST;

/// Blueprint - Inspect a Spin application manifest and its variables.
#[derive(Debug, Parser)]
#[command(name = "blueprint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the application summary, or one component's details
    Show(ShowArgs),
}

/// Arguments for the `show` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ShowArgs {
    /// Component to describe (omit for the application summary)
    #[arg(value_name = "COMPONENT", conflicts_with = "all")]
    pub component: Option<String>,

    /// Path to the manifest file, or a directory containing spin.toml
    #[arg(
        short,
        long,
        value_name = "PATH",
        env = "BLUEPRINT_MANIFEST",
        default_value = DEFAULT_MANIFEST
    )]
    pub file: PathBuf,

    /// Read variable overrides from a .env file instead of the process environment
    #[arg(short, long, value_name = "PATH", env = "BLUEPRINT_ENV_FILE")]
    pub env: Option<PathBuf>,

    /// Show the summary followed by every component
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl Default for ShowArgs {
    fn default() -> Self {
        Self {
            component: None,
            file: PathBuf::from(DEFAULT_MANIFEST),
            env: None,
            all: false,
            json: false,
        }
    }
}
