use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ignitool::AppError;

const DEFAULT_CONFIG: &str = "_build/ignition/config.ign";

#[derive(Parser)]
#[command(name = "ignitool")]
#[command(version)]
#[command(
    about = "Build and inspect Ignition-style provisioning configs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the Ignition config and Combustion script from templates
    #[clap(visible_alias = "b")]
    Build,
    /// Print decoded file entries from a built ignition config
    Files {
        /// Entry paths to filter by; prints all files when omitted
        paths: Vec<String>,
        /// Path to the ignition config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
    /// Print systemd dropins from a built ignition config
    SystemdDropins {
        /// Unit names to filter by; prints all dropins when omitted
        units: Vec<String>,
        /// Path to the ignition config file
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Build => ignitool::build(),
        Commands::Files { paths, config } => ignitool::print_files(&config, &paths),
        Commands::SystemdDropins { units, config } => {
            ignitool::print_systemd_dropins(&config, &units)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
