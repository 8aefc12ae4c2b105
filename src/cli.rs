//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_price_source::CsvPriceSource;
use crate::adapters::ini_config::{load_simulation_config, load_strategy_config};
use crate::domain::error::TickfolioError;
use crate::domain::portfolio::Portfolio;
use crate::domain::simulation::{run_simulation, Strategy};
use crate::domain::transaction::Transaction;
use crate::ports::price_port::PricePort;

#[derive(Parser, Debug)]
#[command(
    name = "tickfolio",
    about = "Portfolio simulation engine for strategy backtesting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a buy-and-hold simulation over the configured window
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Override the configured strategy symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Override the configured share quantity
        #[arg(long)]
        shares: Option<f64>,
    },
    /// Show available symbols and their data ranges
    Info {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            config,
            symbol,
            shares,
        } => run_simulation_command(&config, symbol.as_deref(), shares),
        Command::Info { config } => run_info(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

/// Buys a fixed position on the first bar and holds it.
struct BuyAndHold {
    symbol: String,
    shares: f64,
    entered: bool,
}

impl Strategy for BuyAndHold {
    fn on_tick(&mut self, portfolio: &mut Portfolio) {
        if self.entered {
            return;
        }
        self.entered = true;
        match portfolio.market_order(&self.symbol, self.shares) {
            Ok(tx) => eprintln!("entry: {}", describe(&tx)),
            Err(err) => eprintln!("entry rejected: {err}"),
        }
    }
}

fn run_simulation_command(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    shares_override: Option<f64>,
) -> Result<(), TickfolioError> {
    eprintln!("Loading config from {}", config_path.display());
    let config = load_simulation_config(config_path)?;
    let strategy_config = load_strategy_config(config_path)?;

    let symbol = symbol_override
        .map(str::to_string)
        .unwrap_or(strategy_config.symbol);
    let shares = shares_override.unwrap_or(strategy_config.shares);

    eprintln!("Loading price data from {}", config.data_dir.display());
    let source = CsvPriceSource::load(&config.data_dir, config.resolution)?;
    let timeline = source.timeline(config.start, config.end);
    if timeline.is_empty() {
        return Err(TickfolioError::Data {
            reason: format!(
                "no price data between {} and {}",
                config.start, config.end
            ),
        });
    }
    eprintln!("Simulating {} bars...", timeline.len());

    let mut portfolio = Portfolio::new(
        config.start_balance,
        Box::new(source),
        config.slippage_percent,
        config.transaction_fees,
    );
    let mut strategy = BuyAndHold {
        symbol,
        shares,
        entered: false,
    };
    let result = run_simulation(&mut portfolio, &mut strategy, &timeline);

    println!("Transactions:");
    for tx in portfolio.transactions() {
        println!("  {}", describe(tx));
    }
    println!("Final balance: {:.2}", result.final_balance);
    println!("Profit: {:.2}%", result.percentage_profit);
    Ok(())
}

fn run_info(config_path: &PathBuf) -> Result<(), TickfolioError> {
    let config = load_simulation_config(config_path)?;
    let source = CsvPriceSource::load(&config.data_dir, config.resolution)?;

    println!(
        "Data in {} ({}):",
        config.data_dir.display(),
        config.resolution.as_str()
    );
    for symbol in source.symbols() {
        match source.data_range(&symbol) {
            Some((first, last)) => println!(
                "  {}: {} bars, {} to {}",
                symbol,
                source.bar_count(&symbol),
                first,
                last
            ),
            None => println!("  {}: no data", symbol),
        }
    }
    Ok(())
}

fn describe(tx: &Transaction) -> String {
    let when = tx
        .timestamp
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "-".to_string());
    let price = tx
        .simulated_price
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  {}  {} shares @ {}  {}  cash {:.2}",
        when, tx.order_type, tx.symbol, tx.shares, price, tx.status, tx.cash_balance
    )
}
