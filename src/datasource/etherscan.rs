//! Etherscan-style explorer client with retry and shared throttling.

use super::{
    DataSourceError, ExplorerApi, InternalTx, NormalTx, Throttle, TokenTransfer,
};
use crate::domain::Address;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// One HTTP GET, isolated behind a trait so the retry loop is testable
/// without a network.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}

/// Transport-level failure. Always retryable.
#[derive(Debug, Clone)]
pub struct TransportError(pub String);

/// Live transport over a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| TransportError(e.to_string()))
    }
}

/// The explorer's JSON envelope. `result` is a string for scalar queries and
/// an array for the transaction listings.
#[derive(Debug, Deserialize)]
struct Envelope {
    status: Option<String>,
    message: Option<String>,
    result: Option<serde_json::Value>,
}

/// Explorer client implementing [`ExplorerApi`] against an Etherscan-shaped
/// HTTP API.
///
/// All concurrent calls share one [`Throttle`]; a failure on any in-flight
/// query slows every other one down for the throttle window.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    transport: Arc<dyn Transport>,
    throttle: Arc<Throttle>,
    base_url: String,
    api_key: String,
    max_retries: u32,
}

pub const DEFAULT_BASE_URL: &str = "https://api.etherscan.io/api";

/// Retries after the first attempt, matching the explorer's advertised
/// rate-limit behavior.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

impl EtherscanClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_transport(
            Arc::new(HttpTransport::default()),
            base_url,
            api_key,
            Arc::new(Throttle::default()),
            DEFAULT_MAX_RETRIES,
        )
    }

    /// Full constructor; used directly by tests with a scripted transport.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        throttle: Arc<Throttle>,
        max_retries: u32,
    ) -> Self {
        Self {
            transport,
            throttle,
            base_url: base_url.into(),
            api_key: api_key.into(),
            max_retries,
        }
    }

    pub fn throttle(mut self, throttle: Arc<Throttle>) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Run one logical query to completion: throttle, request, validate the
    /// envelope, retry on any failure up to the budget.
    ///
    /// `endpoint` is a short description for logs and errors; `url` carries
    /// the credential and is never logged.
    async fn get_result(
        &self,
        endpoint: &str,
        url: String,
    ) -> Result<serde_json::Value, DataSourceError> {
        let mut attempt = 0u32;
        loop {
            self.throttle.pause(attempt).await;
            debug!(endpoint, attempt, "fetching explorer endpoint");

            match self.attempt_once(&url).await {
                Ok(result) => return Ok(result),
                Err(failure) => {
                    self.throttle.record_failure();
                    if attempt >= self.max_retries {
                        return Err(failure.into_fatal(endpoint));
                    }
                    warn!(endpoint, attempt, error = %failure, "retrying explorer fetch");
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt_once(&self, url: &str) -> Result<serde_json::Value, Failure> {
        let body = self
            .transport
            .get(url)
            .await
            .map_err(|e| Failure::Network(e.0))?;

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| Failure::Api(format!("malformed envelope: {}", e)))?;

        if let Some(status) = &envelope.status {
            if status != "1" {
                let message = envelope.message.as_deref().unwrap_or("(no message)");
                return Err(Failure::Api(format!("status {}: {}", status, message)));
            }
        }

        match envelope.result {
            Some(result) if !result.is_null() => Ok(result),
            _ => Err(Failure::Api("missing `result` field".to_string())),
        }
    }

    fn scalar(endpoint: &str, result: serde_json::Value) -> Result<String, DataSourceError> {
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DataSourceError::Parse {
                endpoint: endpoint.to_string(),
                message: "expected string result".to_string(),
            })
    }

    fn list<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        result: serde_json::Value,
    ) -> Result<Vec<T>, DataSourceError> {
        serde_json::from_value(result).map_err(|e| DataSourceError::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

/// A single failed attempt, before the retry budget is consulted.
#[derive(Debug)]
enum Failure {
    Api(String),
    Network(String),
}

impl Failure {
    fn into_fatal(self, endpoint: &str) -> DataSourceError {
        match self {
            Failure::Api(message) => DataSourceError::Api {
                endpoint: endpoint.to_string(),
                message,
            },
            Failure::Network(message) => DataSourceError::Network {
                endpoint: endpoint.to_string(),
                message,
            },
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Api(msg) => write!(f, "api: {}", msg),
            Failure::Network(msg) => write!(f, "network: {}", msg),
        }
    }
}

#[async_trait]
impl ExplorerApi for EtherscanClient {
    async fn token_balance(
        &self,
        contract: &Address,
        holder: &Address,
    ) -> Result<String, DataSourceError> {
        let endpoint = format!("tokenbalance({}, {})", contract, holder);
        let url = format!(
            "{}?module=account&apikey={}&action=tokenbalance&contractaddress={}&address={}&tag=latest",
            self.base_url, self.api_key, contract, holder
        );
        let result = self.get_result(&endpoint, url).await?;
        Self::scalar(&endpoint, result)
    }

    async fn token_supply(&self, contract: &Address) -> Result<String, DataSourceError> {
        let endpoint = format!("tokensupply({})", contract);
        let url = format!(
            "{}?module=stats&apikey={}&action=tokensupply&contractaddress={}",
            self.base_url, self.api_key, contract
        );
        let result = self.get_result(&endpoint, url).await?;
        Self::scalar(&endpoint, result)
    }

    async fn normal_transactions(
        &self,
        wallet: &Address,
    ) -> Result<Vec<NormalTx>, DataSourceError> {
        let endpoint = format!("txlist({})", wallet);
        let url = format!(
            "{}?module=account&apikey={}&action=txlist&address={}&sort=asc",
            self.base_url, self.api_key, wallet
        );
        let result = self.get_result(&endpoint, url).await?;
        Self::list(&endpoint, result)
    }

    async fn token_transfers(
        &self,
        wallet: &Address,
    ) -> Result<Vec<TokenTransfer>, DataSourceError> {
        let endpoint = format!("tokentx({})", wallet);
        let url = format!(
            "{}?module=account&apikey={}&action=tokentx&address={}&sort=asc",
            self.base_url, self.api_key, wallet
        );
        let result = self.get_result(&endpoint, url).await?;
        Self::list(&endpoint, result)
    }

    async fn internal_transactions(
        &self,
        wallet: &Address,
    ) -> Result<Vec<InternalTx>, DataSourceError> {
        let endpoint = format!("txlistinternal({})", wallet);
        let url = format!(
            "{}?module=account&apikey={}&action=txlistinternal&address={}&sort=asc",
            self.base_url, self.api_key, wallet
        );
        let result = self.get_result(&endpoint, url).await?;
        Self::list(&endpoint, result)
    }
}
