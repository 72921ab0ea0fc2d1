//! E-Shop Brasil CLI - operator tools for the dashboard database.
//!
//! # Usage
//!
//! ```bash
//! # Insert the default batch (50 products, 100 users, 1000 logs)
//! eshop-cli seed
//!
//! # Insert a custom batch
//! eshop-cli seed --products 10 --users 20 --logs 200
//!
//! # Run an aggregation report
//! eshop-cli report stock
//! eshop-cli report actions
//!
//! # Document counts per collection
//! eshop-cli stats
//! ```
//!
//! Connection settings come from `MONGO_URL` and `MONGO_DATABASE`, the same
//! variables the dashboard reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use eshop_admin::services::generator::{LOG_COUNT, PRODUCT_COUNT, USER_COUNT};
use eshop_admin::services::SeedPlan;

mod commands;

#[derive(Parser)]
#[command(name = "eshop-cli")]
#[command(author, version, about = "E-Shop Brasil CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert fake products, users and activity logs
    Seed {
        /// Number of products to generate
        #[arg(long, default_value_t = PRODUCT_COUNT)]
        products: usize,

        /// Number of users to generate
        #[arg(long, default_value_t = USER_COUNT)]
        users: usize,

        /// Number of log entries to generate
        #[arg(long, default_value_t = LOG_COUNT)]
        logs: usize,
    },
    /// Run an aggregation report
    Report {
        #[command(subcommand)]
        report: ReportTarget,
    },
    /// Print document counts per collection
    Stats,
}

#[derive(Subcommand)]
enum ReportTarget {
    /// Products and stock grouped by category
    Stock,
    /// Log entries counted by action
    Actions,
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
    let db = commands::connect().await?;

    let result = match cli.command {
        Commands::Seed {
            products,
            users,
            logs,
        } => {
            let plan = SeedPlan {
                products,
                users,
                logs,
            };
            commands::seed::run(&db, plan).await.map(|_| ())
        }
        Commands::Report { report } => match report {
            ReportTarget::Stock => commands::report::stock(&db).await,
            ReportTarget::Actions => commands::report::actions(&db).await,
        },
        Commands::Stats => commands::stats::run(&db).await,
    };

    db.shutdown().await;
    Ok(result?)
}
