//! Wallet transactions assembled from the merged explorer streams.

use super::{TokenFlow, TxHash};
use chrono::{DateTime, Utc};

/// All token movement of one on-chain transaction, relative to the wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransaction {
    pub hash: TxHash,
    pub timestamp: DateTime<Utc>,
    pub gas_used: f64,
    pub gas_price: f64,
    pub flows: Vec<TokenFlow>,
}

impl WalletTransaction {
    /// Native-asset fee paid for this transaction, in raw wei.
    pub fn gas_cost(&self) -> f64 {
        self.gas_used * self.gas_price
    }

    /// Collapse flows that reference the same contract into one signed sum.
    ///
    /// First-encounter order of contracts is preserved; swap legs that cancel
    /// still leave a (zero-sum) entry for their contract. The result replaces
    /// `self.flows`.
    pub fn net_flows(&mut self) {
        let mut netted: Vec<TokenFlow> = Vec::new();
        for flow in self.flows.drain(..) {
            match netted
                .iter_mut()
                .find(|n| n.token.address == flow.token.address)
            {
                Some(existing) => existing.amount += flow.amount,
                None => netted.push(flow),
            }
        }
        self.flows = netted;
    }
}
