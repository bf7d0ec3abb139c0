//! Mock explorer for testing without network calls.

use super::{DataSourceError, ExplorerApi, InternalTx, NormalTx, TokenTransfer};
use crate::domain::Address;
use async_trait::async_trait;
use std::collections::HashMap;

/// Mock explorer returning predefined data.
///
/// Scalar queries for unscripted contracts fail with an API error, which is
/// how tests exercise per-position failure isolation.
#[derive(Debug, Clone, Default)]
pub struct MockExplorer {
    balances: HashMap<(Address, Address), String>,
    supplies: HashMap<Address, String>,
    normal_txs: Vec<NormalTx>,
    token_transfers: Vec<TokenTransfer>,
    internal_txs: Vec<InternalTx>,
}

impl MockExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the raw balance of `holder` for `contract`.
    pub fn with_balance(
        mut self,
        contract: impl Into<String>,
        holder: impl Into<String>,
        raw: impl Into<String>,
    ) -> Self {
        self.balances
            .insert((Address::new(contract), Address::new(holder)), raw.into());
        self
    }

    /// Script the raw total supply of `contract`.
    pub fn with_supply(mut self, contract: impl Into<String>, raw: impl Into<String>) -> Self {
        self.supplies.insert(Address::new(contract), raw.into());
        self
    }

    pub fn with_normal_tx(mut self, tx: NormalTx) -> Self {
        self.normal_txs.push(tx);
        self
    }

    pub fn with_token_transfer(mut self, transfer: TokenTransfer) -> Self {
        self.token_transfers.push(transfer);
        self
    }

    pub fn with_internal_tx(mut self, tx: InternalTx) -> Self {
        self.internal_txs.push(tx);
        self
    }
}

#[async_trait]
impl ExplorerApi for MockExplorer {
    async fn token_balance(
        &self,
        contract: &Address,
        holder: &Address,
    ) -> Result<String, DataSourceError> {
        self.balances
            .get(&(contract.clone(), holder.clone()))
            .cloned()
            .ok_or_else(|| DataSourceError::Api {
                endpoint: format!("tokenbalance({}, {})", contract, holder),
                message: "no scripted balance".to_string(),
            })
    }

    async fn token_supply(&self, contract: &Address) -> Result<String, DataSourceError> {
        self.supplies
            .get(contract)
            .cloned()
            .ok_or_else(|| DataSourceError::Api {
                endpoint: format!("tokensupply({})", contract),
                message: "no scripted supply".to_string(),
            })
    }

    async fn normal_transactions(
        &self,
        _wallet: &Address,
    ) -> Result<Vec<NormalTx>, DataSourceError> {
        Ok(self.normal_txs.clone())
    }

    async fn token_transfers(
        &self,
        _wallet: &Address,
    ) -> Result<Vec<TokenTransfer>, DataSourceError> {
        Ok(self.token_transfers.clone())
    }

    async fn internal_transactions(
        &self,
        _wallet: &Address,
    ) -> Result<Vec<InternalTx>, DataSourceError> {
        Ok(self.internal_txs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_balance_is_returned() {
        let mock = MockExplorer::new().with_balance("0xpair", "0xwallet", "5000");
        let balance = mock
            .token_balance(&Address::new("0xPAIR"), &Address::new("0xWallet"))
            .await
            .unwrap();
        assert_eq!(balance, "5000");
    }

    #[tokio::test]
    async fn unscripted_balance_fails() {
        let mock = MockExplorer::new();
        let err = mock
            .token_balance(&Address::new("0xpair"), &Address::new("0xwallet"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataSourceError::Api { .. }));
    }

    #[tokio::test]
    async fn transaction_lists_default_to_empty() {
        let mock = MockExplorer::new();
        let txs = mock
            .normal_transactions(&Address::new("0xwallet"))
            .await
            .unwrap();
        assert!(txs.is_empty());
    }
}
