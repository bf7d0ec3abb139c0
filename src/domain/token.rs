//! Token metadata and decimal adjustment.

use super::Address;
use serde::{Deserialize, Serialize};

/// An ERC-20 token: symbol, contract address, and decimal precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub address: Address,
    pub decimals: u32,
}

impl Token {
    pub fn new(symbol: impl Into<String>, address: impl Into<String>, decimals: u32) -> Self {
        Self {
            symbol: symbol.into(),
            address: Address::new(address),
            decimals,
        }
    }

    /// Decimal-adjust a raw on-chain integer quantity: `raw / 10^decimals`.
    pub fn adjust(&self, raw: f64) -> f64 {
        raw * 10f64.powi(-(self.decimals as i32))
    }

    /// Inverse of [`adjust`](Self::adjust), back to raw units.
    pub fn to_raw(&self, quantity: f64) -> f64 {
        quantity * 10f64.powi(self.decimals as i32)
    }
}

/// Well-known mainnet tokens used by the stock configuration.
pub mod known {
    use super::Token;

    pub fn dai() -> Token {
        Token::new("DAI", "0x6b175474e89094c44da98b954eedeac495271d0f", 18)
    }

    pub fn weth() -> Token {
        Token::new("WETH", "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", 18)
    }

    pub fn usdc() -> Token {
        Token::new("USDC", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", 6)
    }

    pub fn dai_usdc_lp() -> Token {
        Token::new(
            "DAI_USDC_LP",
            "0xae461ca67b15dc8dc81ce7615e0320da1a9ab8d5",
            18,
        )
    }

    pub fn dai_weth_lp() -> Token {
        Token::new(
            "DAI_WETH_LP",
            "0xa478c2975ab1ea89e8196811f51a7b7ade33eb11",
            18,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_scales_by_decimals() {
        let usdc = known::usdc();
        assert_eq!(usdc.adjust(1_500_000.0), 1.5);

        let weth = known::weth();
        assert_eq!(weth.adjust(75_000_000_000_000_000.0), 0.075);
    }

    #[test]
    fn adjust_round_trips_with_to_raw() {
        let token = Token::new("TST", "0x1", 18);
        let raw = 123_456_789_000_000_000_000.0;
        let adjusted = token.adjust(raw);
        assert!((token.to_raw(adjusted) - raw).abs() / raw < 1e-12);
    }

    #[test]
    fn zero_decimals_is_identity() {
        let token = Token::new("TST", "0x1", 0);
        assert_eq!(token.adjust(42.0), 42.0);
    }
}
