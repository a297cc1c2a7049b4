//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use log::warn;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use uuid::Uuid;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::file_storage_adapter::FileStorageAdapter;
use crate::adapters::finnhub_adapter::{FinnhubAdapter, DEFAULT_BASE_URL};
use crate::adapters::mock_quote_adapter::MockQuoteAdapter;
use crate::domain::config_validation::validate_app_config;
use crate::domain::error::StockfolioError;
use crate::domain::insights::portfolio_insights;
use crate::domain::portfolio::Portfolio;
use crate::domain::holding::Holding;
use crate::domain::record_parser::{generate_csv, parse_csv, parse_manual_rows};
use crate::domain::refresh::refresh_market_data;
use crate::domain::validation::validate_holdings;
use crate::domain::valuation::{allocation, gainers_and_losers, total_return};
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;

#[derive(Parser, Debug)]
#[command(name = "stockfolio", about = "Stock portfolio tracker")]
pub struct Cli {
    /// Path to the INI config file
    #[arg(short, long, global = true, default_value = "stockfolio.ini")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import holdings from a delimited file (replaces the portfolio)
    Import {
        /// CSV file with a ticker,quantity,price,date header
        file: PathBuf,
        /// Append to the existing portfolio instead of replacing it
        #[arg(long)]
        append: bool,
    },
    /// Add one holding from a manual row: ticker,quantity,price,date
    Add {
        /// e.g. "AAPL,10,150,2024-01-01"
        row: String,
    },
    /// Remove a holding by id
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// List current holdings
    List,
    /// Remove every holding
    Clear,
    /// Export holdings as CSV
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Refresh market data and show portfolio analytics
    Dashboard,
}

pub async fn run(cli: Cli) -> ExitCode {
    let config = match load_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let result = match cli.command {
        Command::Import { file, append } => run_import(&config, &file, append),
        Command::Add { row } => run_add(&config, &row),
        Command::Remove { id } => run_remove(&config, id),
        Command::List => run_list(&config),
        Command::Clear => run_clear(&config),
        Command::Export { output } => run_export(&config, output.as_deref()),
        Command::Dashboard => run_dashboard(&config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, StockfolioError> {
    let config =
        FileConfigAdapter::from_file(path).map_err(|e| StockfolioError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
    validate_app_config(&config)?;
    Ok(config)
}

fn open_storage(config: &dyn ConfigPort) -> Result<FileStorageAdapter, StockfolioError> {
    let path = config
        .get_string("storage", "path")
        .ok_or_else(|| StockfolioError::ConfigMissing {
            section: "storage".to_string(),
            key: "path".to_string(),
        })?;
    Ok(FileStorageAdapter::new(PathBuf::from(path)))
}

fn quote_port(config: &dyn ConfigPort) -> Result<Box<dyn QuotePort>, StockfolioError> {
    match config.get_string("market", "api_key") {
        Some(api_key) if !api_key.trim().is_empty() => {
            let base_url = config
                .get_string("market", "base_url")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            let timeout = config.get_int("market", "timeout_secs", 10).max(1) as u64;
            Ok(Box::new(FinnhubAdapter::new(
                &base_url,
                &api_key,
                Duration::from_secs(timeout),
            )?))
        }
        _ => {
            warn!("using mock market data - api key not configured");
            Ok(Box::new(MockQuoteAdapter))
        }
    }
}

fn insert_validated(
    portfolio: &mut Portfolio,
    candidates: Vec<Holding>,
) -> Result<usize, StockfolioError> {
    let errors = validate_holdings(&candidates);
    if !errors.is_empty() {
        return Err(StockfolioError::Validation { errors });
    }

    let count = candidates.len();
    for holding in candidates {
        portfolio.add(holding);
    }
    Ok(count)
}

pub fn run_import(
    config: &dyn ConfigPort,
    file: &PathBuf,
    append: bool,
) -> Result<(), StockfolioError> {
    let text = fs::read_to_string(file)?;
    let candidates = parse_csv(&text)?;

    let storage = open_storage(config)?;
    let mut portfolio = Portfolio::load(&storage);
    if !append {
        portfolio.clear();
    }

    let count = insert_validated(&mut portfolio, candidates)?;
    portfolio.save(&storage)?;

    println!(
        "Imported {count} holdings ({} total, value {:.2})",
        portfolio.len(),
        portfolio.total_value
    );
    Ok(())
}

pub fn run_add(config: &dyn ConfigPort, row: &str) -> Result<(), StockfolioError> {
    let candidates = parse_manual_rows(row)?;

    let storage = open_storage(config)?;
    let mut portfolio = Portfolio::load(&storage);
    insert_validated(&mut portfolio, candidates)?;
    portfolio.save(&storage)?;

    println!(
        "Added. Portfolio now holds {} positions (value {:.2})",
        portfolio.len(),
        portfolio.total_value
    );
    Ok(())
}

pub fn run_remove(config: &dyn ConfigPort, id: Uuid) -> Result<(), StockfolioError> {
    let storage = open_storage(config)?;
    let mut portfolio = Portfolio::load(&storage);

    let before = portfolio.len();
    portfolio.remove(id);
    portfolio.save(&storage)?;

    if portfolio.len() < before {
        println!("Removed {id}");
    } else {
        println!("No holding with id {id}");
    }
    Ok(())
}

pub fn run_list(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    let storage = open_storage(config)?;
    let portfolio = Portfolio::load(&storage);

    if portfolio.is_empty() {
        println!("Portfolio is empty");
        return Ok(());
    }

    println!("{:<38} {:<8} {:>12} {:>12} {:>12}", "id", "ticker", "quantity", "price", "date");
    for stock in &portfolio.stocks {
        println!(
            "{:<38} {:<8} {:>12} {:>12.2} {:>12}",
            stock.id, stock.ticker, stock.quantity, stock.purchase_price, stock.purchase_date
        );
    }
    println!(
        "Total value: {:.2} (as of {})",
        portfolio.total_value,
        portfolio.last_updated.as_deref().unwrap_or("never")
    );
    Ok(())
}

pub fn run_clear(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    let storage = open_storage(config)?;
    let mut portfolio = Portfolio::load(&storage);
    portfolio.clear();
    portfolio.save(&storage)?;
    println!("Portfolio cleared");
    Ok(())
}

pub fn run_export(config: &dyn ConfigPort, output: Option<&std::path::Path>) -> Result<(), StockfolioError> {
    let storage = open_storage(config)?;
    let portfolio = Portfolio::load(&storage);
    let csv = generate_csv(&portfolio.stocks);

    match output {
        Some(path) => {
            fs::write(path, &csv)?;
            println!("Exported {} holdings to {}", portfolio.len(), path.display());
        }
        None => println!("{csv}"),
    }
    Ok(())
}

pub async fn run_dashboard(config: &dyn ConfigPort) -> Result<(), StockfolioError> {
    let storage = open_storage(config)?;
    let portfolio = Portfolio::load(&storage);

    if portfolio.is_empty() {
        println!("No stocks in portfolio. Add holdings to see insights and performance data.");
        return Ok(());
    }

    let port = quote_port(config)?;
    let snapshot = refresh_market_data(&portfolio.stocks, port.as_ref()).await?;

    let slices = allocation(&portfolio.stocks, &snapshot.quotes);
    let current_value: f64 = slices.iter().map(|s| s.value).sum();
    let overall_return = total_return(&portfolio.stocks, &snapshot.quotes);
    let ranked = gainers_and_losers(&portfolio.stocks, &snapshot.quotes);

    println!("Portfolio value: {current_value:.2}");
    println!("Total return:    {overall_return:+.2}%");

    println!("\nAllocation:");
    for slice in &slices {
        println!("  {:<8} {:>12.2}  {:>6.2}%", slice.ticker, slice.value, slice.percentage);
    }

    if !ranked.gainers.is_empty() {
        println!("\nTop gainers:");
        for p in &ranked.gainers {
            println!("  {:<8} {:>+8.2}%  ({:+.2})", p.ticker, p.return_pct, p.gain_loss);
        }
    }
    if !ranked.losers.is_empty() {
        println!("\nTop losers:");
        for p in &ranked.losers {
            println!("  {:<8} {:>+8.2}%  ({:+.2})", p.ticker, p.return_pct, p.gain_loss);
        }
    }

    println!("\nMarket news:");
    for article in &snapshot.news {
        println!("  {} ({})", article.title, article.source);
    }

    let insights = portfolio_insights(overall_return, &slices);
    println!("\nInsights:");
    println!("  {}", insights.risk);
    println!("  {}", insights.diversification);
    println!("  {}", insights.performance);
    for recommendation in &insights.recommendations {
        println!("  - {recommendation}");
    }

    Ok(())
}
