pub mod config;
pub mod correlate;
pub mod datasource;
pub mod domain;
pub mod engine;
pub mod error;
pub mod orchestration;

pub use config::Config;
pub use correlate::{positions_from, reconstruct, CorrelationError, TransactionCorrelator};
pub use datasource::{
    DataSourceError, EtherscanClient, ExplorerApi, MockExplorer, Throttle,
};
pub use domain::{
    Address, FlowRole, LpPosition, PoolSnapshot, PositionReport, Token, TokenFlow, TxHash,
    WalletTransaction,
};
pub use engine::{evaluate, EconomicsError};
pub use error::SummaryError;
pub use orchestration::Summarizer;
