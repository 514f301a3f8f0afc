//! Finance CLI - command line access to the finance-core calculations.
//!
//! Prints JSON responses on stdout; logs go to stderr (`RUST_LOG`).

use anyhow::Result;
use clap::{Parser, Subcommand};
use finance_core::{
    classify, estimate, export, portfolio::final_capital, project, ApiResponse, AssetMetadata,
    FinanceConfig, InvestmentType,
};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "finance")]
#[command(about = "Personal finance calculations - growth, risk, and classification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project compound growth of yearly contributions
    Growth {
        /// Amount invested each year
        #[arg(short, long, default_value = "1000")]
        contribution: f64,
        /// Nominal yearly rate in percent
        #[arg(short, long, default_value = "5")]
        rate: f64,
        /// Number of years
        #[arg(short, long, default_value = "10")]
        years: u32,
        /// Investment type: equity or bond
        #[arg(short, long, default_value = "equity")]
        kind: InvestmentType,
        /// Print the schedule as CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
    /// Estimate volatility and 95% VaR from prices
    Risk {
        /// Close prices, oldest first (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        prices: Vec<f64>,
    },
    /// Classify an asset from its metadata
    Classify {
        #[arg(long)]
        quote_type: Option<String>,
        #[arg(long)]
        long_name: Option<String>,
        #[arg(long)]
        sector: Option<String>,
    },
    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Growth {
            contribution,
            rate,
            years,
            kind,
            csv,
        } => handle_growth(contribution, rate, years, kind, csv)?,
        Commands::Risk { prices } => respond(ApiResponse::ok(estimate(&prices)))?,
        Commands::Classify {
            quote_type,
            long_name,
            sector,
        } => {
            let metadata = AssetMetadata {
                quote_type,
                long_name,
                sector,
                ..Default::default()
            };
            respond(ApiResponse::ok(json!({ "category": classify(&metadata) })))?
        }
        Commands::Config => handle_config()?,
    };

    println!("{}", output);
    Ok(())
}

fn respond<T: Serialize>(response: ApiResponse<T>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&response)?)
}

fn handle_growth(
    contribution: f64,
    rate: f64,
    years: u32,
    kind: InvestmentType,
    csv: bool,
) -> Result<String> {
    let schedule = match project(contribution, rate, years, kind) {
        Ok(schedule) => schedule,
        Err(e) => return respond(ApiResponse::<()>::err(e.to_string())),
    };

    if csv {
        return Ok(export::to_csv_string(&schedule)?.trim_end().to_string());
    }

    respond(ApiResponse::ok(json!({
        "schedule": schedule,
        "final_capital": final_capital(&schedule),
    })))
}

fn handle_config() -> Result<String> {
    let path = FinanceConfig::default_path();
    match FinanceConfig::load_from_path(&path) {
        Ok(config) => respond(ApiResponse::ok(json!({
            "path": path,
            "config": config,
        }))),
        Err(e) => respond(ApiResponse::<()>::err(e.to_string())),
    }
}
