use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "liftlevel", about = "Lift weights, earn XP, level up your character")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Reset the character to level 1 and clear workout history
    Reset(commands::reset::ResetArgs),
    /// Run the liftlevel server
    Serve(commands::serve::ServeArgs),
    /// Show character level, XP and workout count
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Config(args) => commands::config::run(args),
        Commands::Reset(args) => commands::reset::run(args),
        Commands::Serve(args) => commands::serve::run(args).await,
        Commands::Status(args) => commands::status::run(args),
    }
}
