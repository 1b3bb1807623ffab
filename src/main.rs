use clap::{Parser, Subcommand};
use std::process::ExitCode;

use latch::commands::{run_install, run_uninstall};
use latch::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "latch",
    about = "Manage latch-guard hooks in Claude Code settings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Install the latch-guard hooks into the nearest settings file
    Install,
    /// Remove latch-guard hooks after a diff preview and confirmation
    Uninstall,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result: Result<()> = match cli.command {
        Commands::Install => run_install(),
        Commands::Uninstall => run_uninstall(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
