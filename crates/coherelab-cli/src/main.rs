//! CLI for coherelab — drive the particle stabilization engine from
//! scripted or randomized scenarios.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "coherelab")]
#[command(about = "coherelab — particle stabilization control loop simulator")]
#[command(version = coherelab_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a scripted scenario of stabilization sessions
    Run {
        /// Path to a scenario JSON file
        scenario: String,

        /// Write the final stabilization report as pretty JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Drive randomized sessions through the engine
    Simulate {
        /// Number of sessions to run
        #[arg(long, default_value = "5")]
        sessions: usize,

        /// RNG seed for reproducible parameter draws
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final stabilization report as pretty JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Execute a scenario and print the full report JSON to stdout
    Report {
        /// Path to a scenario JSON file
        scenario: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, output } => {
            commands::run::run(&scenario, output.as_deref())
        }
        Commands::Simulate {
            sessions,
            seed,
            output,
        } => commands::simulate::run(sessions, seed, output.as_deref()),
        Commands::Report { scenario } => commands::report::run(&scenario),
    }
}
