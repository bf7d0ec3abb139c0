//! Live pool state captured per position evaluation.

use serde::{Deserialize, Serialize};

/// Decimal-adjusted pool state, read once per position per run.
///
/// The four values come from four independent explorer reads, so the
/// snapshot is only best-effort atomic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    /// Wallet's balance of the pool-share token.
    pub balance: f64,
    /// Total supply of the pool-share token.
    pub supply: f64,
    /// Pool's reserve of underlying token A.
    pub reserve_a: f64,
    /// Pool's reserve of underlying token B.
    pub reserve_b: f64,
}
