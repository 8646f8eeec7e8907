//! CLI argument definitions for pipcat.
//!
//! Uses `clap` derive macros to define the full command surface. Each
//! command corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pipcat",
    version,
    about = "Aggregate per-module Pipfiles into one canonical manifest",
    long_about = "pipcat folds the Pipfiles of independently maintained modules in a \
                  monorepo into a single canonical Pipfile and reconciles one target \
                  Python version across them."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge module Pipfiles into one canonical manifest
    Merge {
        /// Module directories, processed in order
        #[arg(required = true)]
        modules: Vec<PathBuf>,
        /// Alternate manifest filename to look for in each module
        #[arg(long)]
        pipfile: Option<String>,
        /// Emit the flattened dependency-list form instead of a Pipfile
        #[arg(long)]
        dist: bool,
        /// Baseline env file
        #[arg(long, default_value = ".pipcat.env")]
        env: PathBuf,
    },

    /// List installed packages that are not build-time tooling
    Freeze {
        /// Project directory containing the Pipfile
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
