pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "onlysaid-api")]
#[command(about = "onlysaid HTTP API - chat, task and user endpoints")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Print or apply the reference database schema")]
    Schema(commands::schema::SchemaArgs),
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::handle(args, config).await,
        Some(Commands::Schema(args)) => commands::schema::handle(args, config).await,
        None => commands::serve::handle(commands::serve::ServeArgs::default(), config).await,
    }
}
