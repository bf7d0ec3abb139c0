//! Liquidity-provider positions.

use super::Token;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An open liquidity-provider position: the pool-share token plus the two
/// underlying deposits, recorded at deposit time.
///
/// `initial_a`/`initial_b` are the deposited quantities (positive), i.e. the
/// negation of the wallet's net outflow in the deposit transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpPosition {
    pub pair: Token,
    /// Pool-share quantity received at deposit time. Informational; live
    /// balance is read fresh at evaluation time.
    #[serde(default)]
    pub initial_shares: f64,
    pub token_a: Token,
    pub initial_a: f64,
    pub token_b: Token,
    pub initial_b: f64,
    pub opened_at: DateTime<Utc>,
}

impl LpPosition {
    /// Product of the deposited quantities, the position's starting invariant.
    pub fn initial_k(&self) -> f64 {
        self.initial_a * self.initial_b
    }
}
