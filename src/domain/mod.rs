//! Domain types for LP position summaries.
//!
//! This module provides:
//! - Case-insensitive address and transaction-hash primitives
//! - Token metadata with decimal adjustment
//! - Role-tagged token flows and wallet transactions with netting
//! - Position, snapshot, and report records

pub mod flow;
pub mod position;
pub mod primitives;
pub mod report;
pub mod snapshot;
pub mod token;
pub mod transaction;

pub use flow::{FlowRole, TokenFlow};
pub use position::LpPosition;
pub use primitives::{Address, TxHash};
pub use report::PositionReport;
pub use snapshot::PoolSnapshot;
pub use token::Token;
pub use transaction::WalletTransaction;
