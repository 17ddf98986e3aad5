//! LaunchPay CLI - seeding and draft validation tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed a demo tenant (settings, coupons, a draft checkout)
//! lp-cli seed --tenant tnt_demo
//!
//! # Run the publish gate over a checkout exported as JSON
//! lp-cli validate --file checkout.json
//! ```
//!
//! # Commands
//!
//! - `seed` - Write sample data for a tenant into the store
//! - `validate` - Run full publish validation over a checkout JSON file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lp-cli")]
#[command(author, version, about = "LaunchPay CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed sample data for a tenant
    Seed {
        /// Tenant id to seed under
        #[arg(short, long, default_value = "tnt_demo")]
        tenant: String,
    },
    /// Validate a checkout JSON file against the publish gate
    Validate {
        /// Path to the checkout JSON file
        #[arg(short, long)]
        file: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { tenant } => commands::seed::sample_data(&tenant).await?,
        Commands::Validate { file } => commands::validate::checkout_file(&file).await?,
    }
    Ok(())
}
