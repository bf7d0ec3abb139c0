//! Terminal per-position output.

use super::{LpPosition, PoolSnapshot};
use serde::Serialize;

/// Derived economics of one position against one pool snapshot.
///
/// All percentage fields are in percent units (`29.1` means 29.1%).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionReport {
    pub position: LpPosition,
    pub snapshot: PoolSnapshot,

    /// Wallet's fraction of the pool-share supply.
    pub user_share: f64,
    /// Wallet-attributable reserves at snapshot time.
    pub final_qty_a: f64,
    pub final_qty_b: f64,
    /// Final minus initial quantity per side.
    pub increase_a: f64,
    pub increase_b: f64,

    pub initial_k: f64,
    pub total_k: f64,
    pub my_k: f64,
    pub ratio_k: f64,

    /// Trading-fee accrual isolated from K growth.
    pub fee_pct: f64,
    pub fee_a: f64,
    pub fee_b: f64,

    pub initial_price: f64,
    pub final_price: f64,
    pub price_ratio: f64,
    /// Impermanent loss relative to holding, as a (non-positive) percentage.
    pub divergence_loss_pct: f64,

    pub accrued_profit_pct: f64,
    pub days_elapsed: f64,
    pub yearly_profit_pct: f64,
}
