use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface configuration
#[derive(Debug, Parser)]
#[command(name = "stamp", about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Print the build identity line and exit
    #[arg(short = 'V', long)]
    pub version: bool,

    /// Log file, or a directory to create `stamp-<pid>.log` in
    #[arg(long, env = "STAMP_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print build information
    Info {
        /// Print a JSON object instead of the identity line
        #[arg(long)]
        json: bool,
    },
    /// Print the VCS settings recorded at build time, one `key=value` per line
    Settings,
}
