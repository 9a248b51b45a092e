//! Herd CLI - Inspect sequence libraries and simulate crowd scenes

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{sequences, simulate};

#[derive(Parser)]
#[command(name = "herd")]
#[command(about = "Cross-fade playback for instanced crowd animation", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the sequences of a library file
    Sequences {
        /// Path to a .seq.toml library
        library: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Run a scene at a fixed frame rate and print instance output
    Simulate {
        /// Path to scene file
        scene: String,

        /// Path to a .seq.toml library
        #[arg(long)]
        library: String,

        /// Simulation frame rate
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Seconds to simulate
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Report every Nth frame
        #[arg(long, default_value = "1")]
        every: u64,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose > 0 {
        builder.filter_level(match verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    } else if quiet {
        builder.filter_level(log::LevelFilter::Error);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Sequences { library, format } => sequences::run(&library, &format),
        Commands::Simulate {
            scene,
            library,
            fps,
            duration,
            format,
            every,
        } => simulate::run(simulate::SimulateArgs {
            scene,
            library,
            fps,
            duration,
            format,
            every,
        }),
    }
}
