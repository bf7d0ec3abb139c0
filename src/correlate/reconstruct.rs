//! Turns a qualifying transaction into an initial LP position.

use super::CorrelationError;
use crate::domain::{LpPosition, Token, WalletTransaction};
use tracing::debug;

/// Classify the three net flows of a deposit transaction and emit the
/// initial position.
///
/// The pool-share flow is the one tagged during correlation. The two
/// underlying flows become token A and token B in encounter order, which is
/// the explorer's log-index order for the transaction; pricing ratios
/// downstream depend on this assignment staying stable.
pub fn reconstruct(tx: &WalletTransaction) -> Result<LpPosition, CorrelationError> {
    if tx.flows.len() != 3 {
        return Err(CorrelationError::NotALiquidityDeposit {
            hash: tx.hash.to_string(),
            detail: format!("{} net flows, expected 3", tx.flows.len()),
        });
    }

    let mut pool_share = None;
    let mut underlying = Vec::with_capacity(2);
    for flow in &tx.flows {
        if flow.is_pool_share() {
            if pool_share.replace(flow).is_some() {
                return Err(CorrelationError::NotALiquidityDeposit {
                    hash: tx.hash.to_string(),
                    detail: "more than one pool-share flow".to_string(),
                });
            }
        } else {
            underlying.push(flow);
        }
    }

    let pair = pool_share.ok_or_else(|| CorrelationError::NotALiquidityDeposit {
        hash: tx.hash.to_string(),
        detail: "no pool-share flow".to_string(),
    })?;
    let (a, b) = (underlying[0], underlying[1]);

    let position = LpPosition {
        pair: Token {
            symbol: format!(
                "{} {} {}",
                pair.token.symbol, a.token.symbol, b.token.symbol
            ),
            address: pair.token.address.clone(),
            decimals: pair.token.decimals,
        },
        initial_shares: pair.amount,
        token_a: a.token.clone(),
        // Deposits are net outflows; store the deposited amount as positive.
        initial_a: -a.amount,
        token_b: b.token.clone(),
        initial_b: -b.amount,
        opened_at: tx.timestamp,
    };
    debug!(hash = %tx.hash, pair = %position.pair.symbol, "reconstructed position");
    Ok(position)
}

/// Reconstruct every qualifying transaction, preserving order.
pub fn positions_from(
    transactions: &[WalletTransaction],
) -> Result<Vec<LpPosition>, CorrelationError> {
    transactions.iter().map(reconstruct).collect()
}
