use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use gatekeep_cli::commands::{check, rules};

#[derive(Parser)]
#[command(name = "gatekeep", version, about = "Validate gatekeep access-control settings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every access-control block of a settings file
    Check {
        /// Settings file (YAML)
        file: PathBuf,
        /// Env file to load before resolving `env:` secrets (default: `.env` if present)
        #[arg(long)]
        env_file: Option<PathBuf>,
    },
    /// List the recognized rule names
    Rules,
}

fn main() {
    gatekeep_core::init_tracing("warn");
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { file, env_file } => check::run(&file, env_file.as_deref()).map(|failures| {
            if failures > 0 {
                std::process::exit(1);
            }
        }),
        Commands::Rules => rules::run(),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").red());
        std::process::exit(1);
    }
}
