use anyhow::Context;
use poolsight::config::Config;
use poolsight::correlate::{positions_from, TransactionCorrelator};
use poolsight::datasource::{EtherscanClient, ExplorerApi, Throttle};
use poolsight::domain::token::known;
use poolsight::domain::{Address, LpPosition};
use poolsight::orchestration::Summarizer;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("configuration")?;

    let throttle = Arc::new(Throttle::new(Duration::from_millis(config.throttle_ms)));
    let datasource: Arc<dyn ExplorerApi> = Arc::new(
        EtherscanClient::new(config.api_url.clone(), config.api_key.clone())
            .throttle(throttle)
            .max_retries(config.max_retries),
    );
    let wallet = Address::new(config.user_address.clone());

    let positions: Vec<LpPosition> = match &config.positions {
        Some(configured) => configured.clone(),
        None => {
            let correlator = TransactionCorrelator::new(
                datasource.clone(),
                wallet.clone(),
                Address::new(config.router_address.clone()),
                known::weth(),
                config.lp_token_symbol.clone(),
            );
            let transactions = correlator
                .correlate()
                .await
                .context("wallet reconstruction")?;
            positions_from(&transactions).context("position reconstruction")?
        }
    };
    tracing::info!(count = positions.len(), "evaluating positions");

    let summarizer = Summarizer::new(datasource, wallet);
    let outcomes = summarizer.run(&positions).await;

    let mut reports = Vec::new();
    let mut failures = 0usize;
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                failures += 1;
                tracing::error!(error = %e, "position evaluation failed");
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);

    if !reports.is_empty() || failures == 0 {
        Ok(())
    } else {
        anyhow::bail!("all {} position evaluations failed", failures)
    }
}
