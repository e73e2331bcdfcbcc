use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `tracewidgets` - ephemeral chat widgets with exactly-once completion.
#[derive(Parser, Debug)]
#[command(name = "tracewidgets")]
#[command(version = "0.1.0")]
#[command(about = "Drive trace-triggered chat widgets from the command line.", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ~/.tracewidgets/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a JSON script of traces and inputs against an in-memory surface
    Replay {
        /// Path to the script
        script: PathBuf,

        /// Record webhook deliveries instead of sending them
        #[arg(long)]
        dry_run: bool,

        /// Milliseconds to wait after the last step for deliveries to land
        #[arg(long, default_value = "1000")]
        settle_ms: u64,
    },

    /// Print the effective configuration
    Config,
}
