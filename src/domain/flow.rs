//! Net token flows within a wallet transaction.

use super::Token;
use serde::{Deserialize, Serialize};

/// Classification of a flow, assigned during correlation.
///
/// The pool-share token is tagged where it is recognized (by its marker
/// symbol) rather than inferred later from list position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowRole {
    /// The LP token minted by the pool.
    PoolShare,
    /// One of the two pooled assets.
    Underlying,
}

/// One signed token movement relative to the wallet within a transaction.
///
/// `amount` is decimal-adjusted; positive means the wallet received the
/// token, negative means it sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenFlow {
    pub token: Token,
    pub amount: f64,
    pub role: FlowRole,
}

impl TokenFlow {
    pub fn new(token: Token, amount: f64, role: FlowRole) -> Self {
        Self {
            token,
            amount,
            role,
        }
    }

    pub fn is_pool_share(&self) -> bool {
        self.role == FlowRole::PoolShare
    }
}
