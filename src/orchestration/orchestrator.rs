//! Evaluates positions against live pool state.

use crate::datasource::ExplorerApi;
use crate::domain::{Address, LpPosition, PoolSnapshot, PositionReport};
use crate::engine;
use crate::error::SummaryError;
use chrono::Utc;
use futures::future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Runs the live side of the pipeline: for each position, four concurrent
/// snapshot reads joined into a [`PoolSnapshot`], then the economics engine.
///
/// Positions are evaluated concurrently with each other and results come
/// back in input order. A failed read fails only its own position. There is
/// no internal timeout; callers cancel by dropping the `run` future.
pub struct Summarizer {
    datasource: Arc<dyn ExplorerApi>,
    wallet: Address,
}

impl Summarizer {
    pub fn new(datasource: Arc<dyn ExplorerApi>, wallet: Address) -> Self {
        Self { datasource, wallet }
    }

    pub async fn run(
        &self,
        positions: &[LpPosition],
    ) -> Vec<Result<PositionReport, SummaryError>> {
        let reports =
            future::join_all(positions.iter().map(|p| self.evaluate_position(p))).await;
        for (position, outcome) in positions.iter().zip(&reports) {
            if let Err(e) = outcome {
                warn!(pair = %position.pair.symbol, error = %e, "position evaluation failed");
            }
        }
        reports
    }

    async fn evaluate_position(
        &self,
        position: &LpPosition,
    ) -> Result<PositionReport, SummaryError> {
        let snapshot = self.snapshot(position).await?;
        debug!(pair = %position.pair.symbol, ?snapshot, "captured pool snapshot");
        Ok(engine::evaluate(position, &snapshot, Utc::now())?)
    }

    /// The four live reads of one position, issued concurrently: wallet's
    /// pool-share balance, pool-share supply, and the pool's two reserves.
    async fn snapshot(&self, position: &LpPosition) -> Result<PoolSnapshot, SummaryError> {
        let pair = &position.pair.address;
        let (balance, supply, reserve_a, reserve_b) = tokio::try_join!(
            self.datasource.token_balance(pair, &self.wallet),
            self.datasource.token_supply(pair),
            self.datasource.token_balance(&position.token_a.address, pair),
            self.datasource.token_balance(&position.token_b.address, pair),
        )?;

        Ok(PoolSnapshot {
            balance: position.pair.adjust(parse_quantity(&balance)?),
            supply: position.pair.adjust(parse_quantity(&supply)?),
            reserve_a: position.token_a.adjust(parse_quantity(&reserve_a)?),
            reserve_b: position.token_b.adjust(parse_quantity(&reserve_b)?),
        })
    }
}

fn parse_quantity(raw: &str) -> Result<f64, SummaryError> {
    raw.parse::<f64>()
        .map_err(|_| SummaryError::MalformedQuantity(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quantity_accepts_large_integers() {
        let q = parse_quantity("123456789000000000000000000").unwrap();
        assert!(q > 1e26 && q < 1.3e26);
    }

    #[test]
    fn parse_quantity_rejects_garbage() {
        let err = parse_quantity("NOTOK").unwrap_err();
        assert!(matches!(err, SummaryError::MalformedQuantity(_)));
    }
}
