pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "barosign")]
#[command(about = "Barosign CLI - seeding and admin utilities for the contract API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Database seeding")]
    Seed {
        #[command(subcommand)]
        cmd: commands::seed::SeedCommands,
    },

    #[command(about = "Administrative one-shots")]
    Admin {
        #[command(subcommand)]
        cmd: commands::admin::AdminCommands,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Seed { cmd } => commands::seed::handle(cmd).await,
        Commands::Admin { cmd } => commands::admin::handle(cmd).await,
    }
}
