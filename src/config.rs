use crate::datasource::etherscan::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES};
use crate::domain::LpPosition;
use std::collections::HashMap;
use thiserror::Error;

/// Uniswap V2 Router02.
pub const DEFAULT_ROUTER_ADDRESS: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";

/// Marker symbol of V2 pool-share tokens in explorer transfer listings.
pub const DEFAULT_LP_TOKEN_SYMBOL: &str = "UNI-V2";

const DEFAULT_THROTTLE_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub user_address: String,
    pub api_url: String,
    pub router_address: String,
    pub lp_token_symbol: String,
    pub max_retries: u32,
    pub throttle_ms: u64,
    /// Pre-configured positions; when `None`, positions are reconstructed
    /// from the wallet's transaction history.
    pub positions: Option<Vec<LpPosition>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let api_key = env_map
            .get("ETHERSCAN_API_KEY")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("ETHERSCAN_API_KEY".to_string()))?;

        let user_address = env_map
            .get("USER_ADDRESS")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("USER_ADDRESS".to_string()))?;

        let api_url = env_map
            .get("EXPLORER_API_URL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let router_address = env_map
            .get("ROUTER_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ROUTER_ADDRESS.to_string());

        let lp_token_symbol = env_map
            .get("LP_TOKEN_SYMBOL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LP_TOKEN_SYMBOL.to_string());

        let max_retries = match env_map.get("MAX_RETRIES") {
            Some(s) => s.parse::<u32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "MAX_RETRIES".to_string(),
                    "must be a valid u32".to_string(),
                )
            })?,
            None => DEFAULT_MAX_RETRIES,
        };

        let throttle_ms = match env_map.get("THROTTLE_MS") {
            Some(s) => s.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    "THROTTLE_MS".to_string(),
                    "must be a valid u64".to_string(),
                )
            })?,
            None => DEFAULT_THROTTLE_MS,
        };

        let positions = parse_positions_from_map(&env_map)?;

        Ok(Config {
            api_key,
            user_address,
            api_url,
            router_address,
            lp_token_symbol,
            max_retries,
            throttle_ms,
            positions,
        })
    }
}

fn parse_positions_from_map(
    env_map: &HashMap<String, String>,
) -> Result<Option<Vec<LpPosition>>, ConfigError> {
    let Some(file_path) = env_map.get("POSITIONS_FILE") else {
        return Ok(None);
    };
    let content = std::fs::read_to_string(file_path).map_err(|_| {
        ConfigError::InvalidValue(
            "POSITIONS_FILE".to_string(),
            "file not found or unreadable".to_string(),
        )
    })?;
    let positions: Vec<LpPosition> = serde_json::from_str(&content).map_err(|e| {
        ConfigError::InvalidValue("POSITIONS_FILE".to_string(), e.to_string())
    })?;
    Ok(Some(positions))
}
