//! Explorer API abstraction: live Etherscan-style client plus a mock.

use crate::domain::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod etherscan;
pub mod mock;
pub mod throttle;

pub use etherscan::{EtherscanClient, HttpTransport, Transport, TransportError};
pub use mock::MockExplorer;
pub use throttle::Throttle;

/// Chain-explorer queries needed by the summary pipeline.
///
/// Implementations own retry, backoff, and rate limiting; callers see only
/// the final result per logical query.
#[async_trait]
pub trait ExplorerApi: Send + Sync + fmt::Debug {
    /// Raw (non-decimal-adjusted) token balance of `holder` for `contract`.
    async fn token_balance(
        &self,
        contract: &Address,
        holder: &Address,
    ) -> Result<String, DataSourceError>;

    /// Raw total supply of `contract`.
    async fn token_supply(&self, contract: &Address) -> Result<String, DataSourceError>;

    /// Native-asset transaction list for `wallet`.
    async fn normal_transactions(
        &self,
        wallet: &Address,
    ) -> Result<Vec<NormalTx>, DataSourceError>;

    /// ERC-20 transfer event list for `wallet`.
    async fn token_transfers(
        &self,
        wallet: &Address,
    ) -> Result<Vec<TokenTransfer>, DataSourceError>;

    /// Internal (contract-triggered) native transfer list for `wallet`.
    async fn internal_transactions(
        &self,
        wallet: &Address,
    ) -> Result<Vec<InternalTx>, DataSourceError>;
}

/// A native-asset transaction as listed by the explorer.
///
/// All numeric fields arrive as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalTx {
    pub hash: String,
    pub time_stamp: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub gas_used: String,
    pub gas_price: String,
    pub is_error: String,
    #[serde(rename = "txreceipt_status")]
    pub txreceipt_status: String,
}

/// An ERC-20 transfer event as listed by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub contract_address: String,
    pub value: String,
    pub token_symbol: String,
    pub token_decimal: String,
}

/// An internal native transfer as listed by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalTx {
    pub hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
}

/// Error type for explorer operations.
#[derive(Debug, Clone, Error)]
pub enum DataSourceError {
    /// The explorer reported a non-success status or omitted `result`,
    /// and the retry budget is exhausted.
    #[error("explorer error for {endpoint}: {message}")]
    Api { endpoint: String, message: String },
    /// Transport-level failure (connection refused, timeout), retry budget
    /// exhausted.
    #[error("network error for {endpoint}: {message}")]
    Network { endpoint: String, message: String },
    /// A successful response did not have the expected shape.
    #[error("parse error for {endpoint}: {message}")]
    Parse { endpoint: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_names_the_endpoint() {
        let err = DataSourceError::Api {
            endpoint: "tokenbalance".to_string(),
            message: "status 0: NOTOK".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "explorer error for tokenbalance: status 0: NOTOK"
        );
    }

    #[test]
    fn normal_tx_deserializes_explorer_field_names() {
        let json = serde_json::json!({
            "blockNumber": "11723496",
            "hash": "0xabc",
            "timeStamp": "1611859740",
            "from": "0x1",
            "to": "0x2",
            "value": "75000000000000000",
            "gas": "210000",
            "gasUsed": "150000",
            "gasPrice": "50000000000",
            "isError": "0",
            "txreceipt_status": "1"
        });
        let tx: NormalTx = serde_json::from_value(json).unwrap();
        assert_eq!(tx.hash, "0xabc");
        assert_eq!(tx.time_stamp, "1611859740");
        assert_eq!(tx.txreceipt_status, "1");
    }

    #[test]
    fn token_transfer_deserializes_explorer_field_names() {
        let json = serde_json::json!({
            "hash": "0xabc",
            "from": "0x1",
            "to": "0x2",
            "contractAddress": "0x6b17",
            "value": "100000000000000000000",
            "tokenName": "Dai Stablecoin",
            "tokenSymbol": "DAI",
            "tokenDecimal": "18"
        });
        let tt: TokenTransfer = serde_json::from_value(json).unwrap();
        assert_eq!(tt.contract_address, "0x6b17");
        assert_eq!(tt.token_decimal, "18");
    }
}
