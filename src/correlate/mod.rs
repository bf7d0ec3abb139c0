//! Wallet-history correlation: from raw explorer streams to LP positions.

use crate::datasource::DataSourceError;
use thiserror::Error;

pub mod correlator;
pub mod reconstruct;

pub use correlator::TransactionCorrelator;
pub use reconstruct::{positions_from, reconstruct};

/// Errors raised while reconstructing positions from wallet history.
#[derive(Debug, Error)]
pub enum CorrelationError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// A transfer in a seeded transaction names the wallet on neither side.
    /// Indicates a correlation bug or unexpected data shape; never retried.
    #[error("transfer of {contract} in {hash} touches neither side of wallet {wallet}")]
    UnattributableTransfer {
        hash: String,
        contract: String,
        wallet: String,
    },

    /// A numeric field from the explorer failed to parse.
    #[error("malformed {field} in transaction {hash}: {value:?}")]
    MalformedField {
        hash: String,
        field: String,
        value: String,
    },

    /// A transaction reached reconstruction without the pool-share + two
    /// underlying flow shape.
    #[error("transaction {hash} is not a liquidity deposit ({detail})")]
    NotALiquidityDeposit { hash: String, detail: String },
}
