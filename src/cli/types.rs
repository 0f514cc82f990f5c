//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::resolve::ResolveArgs;
use super::commands::scan::ScanArgs;
use super::commands::tier::TierArgs;

#[derive(Parser, Debug)]
#[command(name = "ccms-config")]
#[command(about = "Resolve indirection tags in YAML configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Settings file (defaults to ccms-config.yaml in the working directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve every indirection tag in a configuration file
    Resolve(ResolveArgs),

    /// List indirection tags without resolving them
    Scan(ScanArgs),

    /// Load the configuration file of a deployment tier
    Tier(TierArgs),
}
