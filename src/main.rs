use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{AccountCommand, FoodCommand, ProfileCommand, UploadCommand};
use tastylog::{AppContext, Config};

#[derive(Parser)]
#[command(name = "tastylog")]
#[command(version)]
#[command(about = "Food journal client backed by Appwrite", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register, log in and inspect the session
    Account(AccountCommand),

    /// Show and update the user profile
    Profile(ProfileCommand),

    /// Manage food-log entries
    Food(FoodCommand),

    /// Upload an image and print its URL
    Upload(UploadCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration and any session saved by a previous login
    let config = Config::load(cli.config)?;
    let ctx = match commands::load_session() {
        Some(secret) => AppContext::with_session(config, secret)?,
        None => AppContext::new(config)?,
    };

    match cli.command {
        Some(Commands::Account(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Profile(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Food(cmd)) => cmd.run(&ctx).await?,
        Some(Commands::Upload(cmd)) => cmd.run(&ctx).await?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
