// src/main.rs
//! Wallet Risk Scorer entry point.
//!
//! One run fetches every configured wallet's transaction history, scores
//! the batch and writes the CSV deliverable. Configuration errors and an
//! unwritable output are fatal; individual wallet fetch failures are not.
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wallet_risk_scorer::blockchain::EtherscanClient;
use wallet_risk_scorer::cli::{Cli, Commands};
use wallet_risk_scorer::core::config::ScorerConfig;
use wallet_risk_scorer::pipeline::{Pipeline, RunSummary};
use wallet_risk_scorer::report::{CsvFileSink, ResultSink};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Score { config, output } => {
            let mut config = ScorerConfig::from_file(&config)?;
            if let Some(path) = output {
                config.output.path = path;
            }
            config.validate()?;
            run_scoring(config).await
        }
        Commands::CheckConfig { config } => {
            let config = ScorerConfig::from_file(&config)?;
            config.validate()?;
            println!("{}", toml::to_string_pretty(&config)?);
            info!("configuration OK");
            Ok(())
        }
    }
}

async fn run_scoring(config: ScorerConfig) -> Result<()> {
    info!("Starting wallet risk scorer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        wallets = config.scoring.wallets.len(),
        contracts = config.scoring.protocol_contracts.len(),
        "scoring batch"
    );

    let source = Arc::new(EtherscanClient::new(&config.provider)?);
    let pipeline = Pipeline::new(&config, source)?;

    let now = chrono::Utc::now().timestamp().max(0) as u64;
    let summary = pipeline.run(&config.scoring.wallets, now).await?;

    let sink = CsvFileSink::new(&config.output.path);
    sink.write(&summary.scored)?;

    print_summary(&summary, &config);
    Ok(())
}

fn print_summary(summary: &RunSummary, config: &ScorerConfig) {
    let scores: Vec<u32> = summary.scored.iter().map(|row| row.score).collect();
    let min = scores.iter().min().copied().unwrap_or(0);
    let max = scores.iter().max().copied().unwrap_or(0);
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64
    };

    println!(
        "Scored {} wallets ({} fetch failures degraded to the sentinel record)",
        summary.scored.len(),
        summary.failed_fetches.len()
    );
    println!("Score range {min}..{max}, mean {mean:.1}");
    for row in summary.scored.iter().take(5) {
        println!("  {}  {}", row.wallet, row.score);
    }
    println!("Wrote {}", config.output.path.display());
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
