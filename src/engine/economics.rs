//! Constant-product pool economics.

use crate::domain::{LpPosition, PoolSnapshot, PositionReport};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Degenerate inputs for which the economics are undefined. These are
/// reported explicitly instead of letting NaN or infinity leak into reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomicsError {
    #[error("pool {pair} has zero share supply")]
    ZeroSupply { pair: String },
    #[error("wallet holds no {pair} pool shares")]
    ZeroBalance { pair: String },
    #[error("pool {pair} has an empty reserve")]
    ZeroReserve { pair: String },
    #[error("position in {pair} has non-positive initial K")]
    DegenerateInitialK { pair: String },
}

/// Evaluate a position against a live pool snapshot.
///
/// Fee accrual is isolated from price drift through the growth of the
/// wallet's share of the constant-product invariant K: absent fees, the
/// wallet's K would stay equal to the initial deposit product, so
/// `sqrt(my_k / initial_k) - 1` is the fee-driven growth per side.
/// Divergence loss is the closed-form impermanent-loss curve of a 50/50
/// constant-product pool over the price drift since deposit. The two combine
/// additively and are annualized by compounding over the elapsed days.
pub fn evaluate(
    position: &LpPosition,
    snapshot: &PoolSnapshot,
    now: DateTime<Utc>,
) -> Result<PositionReport, EconomicsError> {
    let pair = position.pair.symbol.clone();
    if snapshot.supply <= 0.0 {
        return Err(EconomicsError::ZeroSupply { pair });
    }
    if snapshot.balance <= 0.0 {
        return Err(EconomicsError::ZeroBalance { pair });
    }
    if snapshot.reserve_a <= 0.0 || snapshot.reserve_b <= 0.0 {
        return Err(EconomicsError::ZeroReserve { pair });
    }
    let initial_k = position.initial_k();
    if initial_k <= 0.0 {
        return Err(EconomicsError::DegenerateInitialK { pair });
    }

    let user_share = snapshot.balance / snapshot.supply;
    let final_qty_a = user_share * snapshot.reserve_a;
    let final_qty_b = user_share * snapshot.reserve_b;

    let total_k = snapshot.reserve_a * snapshot.reserve_b;
    let my_k = user_share * user_share * total_k;
    let ratio_k = my_k / initial_k;

    let fee_pct = (ratio_k.sqrt() - 1.0) * 100.0;
    let fee_a = final_qty_a * (1.0 - 1.0 / ratio_k.sqrt());
    let fee_b = final_qty_b * (1.0 - 1.0 / ratio_k.sqrt());

    let initial_price = position.initial_a / position.initial_b;
    let final_price = final_qty_a / final_qty_b;
    let price_ratio = final_price / initial_price;
    let divergence_loss_pct =
        (2.0 * price_ratio.sqrt() / (1.0 + price_ratio) - 1.0) * 100.0;

    let accrued_profit_pct = fee_pct + divergence_loss_pct;
    let days_elapsed = (now - position.opened_at).num_seconds() as f64 / 86_400.0;
    // Compounding over no elapsed time is undefined; report zero rather
    // than an infinite annualization. The additive fee + divergence
    // combination can also dip below -100% while the position itself stays
    // worth something; a negative compounding base is undefined, so the
    // annualized figure floors at total loss.
    let base = 1.0 + accrued_profit_pct / 100.0;
    let yearly_profit_pct = if days_elapsed <= 0.0 {
        0.0
    } else if base <= 0.0 {
        -100.0
    } else {
        (base.powf(365.0 / days_elapsed) - 1.0) * 100.0
    };

    Ok(PositionReport {
        position: position.clone(),
        snapshot: *snapshot,
        user_share,
        final_qty_a,
        final_qty_b,
        increase_a: final_qty_a - position.initial_a,
        increase_b: final_qty_b - position.initial_b,
        initial_k,
        total_k,
        my_k,
        ratio_k,
        fee_pct,
        fee_a,
        fee_b,
        initial_price,
        final_price,
        price_ratio,
        divergence_loss_pct,
        accrued_profit_pct,
        days_elapsed,
        yearly_profit_pct,
    })
}
