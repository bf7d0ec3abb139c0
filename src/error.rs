use crate::correlate::CorrelationError;
use crate::datasource::DataSourceError;
use crate::engine::EconomicsError;
use thiserror::Error;

/// Crate-level error: everything a position evaluation or wallet
/// reconstruction can fail with.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    Correlation(#[from] CorrelationError),
    #[error(transparent)]
    Economics(#[from] EconomicsError),
    #[error("malformed quantity from explorer: {0:?}")]
    MalformedQuantity(String),
}
