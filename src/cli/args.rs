use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "notekeep",
    version,
    about = "Tagged notes kept in a hosted database"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Base URL of the note store, overriding the configuration
    #[clap(long, value_parser)]
    pub store_url: Option<String>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the notekeep application
    #[clap(subcommand)]
    pub command: Commands,
}
