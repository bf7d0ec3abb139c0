//! Merges the wallet's three explorer streams into per-transaction flows.

use super::CorrelationError;
use crate::datasource::{ExplorerApi, InternalTx, NormalTx, TokenTransfer};
use crate::domain::{Address, FlowRole, Token, TokenFlow, TxHash, WalletTransaction};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Reconstructs a wallet's liquidity-deposit transactions.
///
/// Seeds candidate transactions from successful native transfers to the AMM
/// router, attaches ERC-20 and internal flows by hash, nets flows per
/// contract, and keeps only transactions whose netted flow count is exactly
/// three (pool-share token plus the two deposits). Swap-only transactions
/// net down to fewer entries and are discarded.
pub struct TransactionCorrelator {
    datasource: Arc<dyn ExplorerApi>,
    wallet: Address,
    router: Address,
    wrapped_native: Token,
    lp_symbol: String,
}

impl TransactionCorrelator {
    pub fn new(
        datasource: Arc<dyn ExplorerApi>,
        wallet: Address,
        router: Address,
        wrapped_native: Token,
        lp_symbol: impl Into<String>,
    ) -> Self {
        Self {
            datasource,
            wallet,
            router,
            wrapped_native,
            lp_symbol: lp_symbol.into(),
        }
    }

    /// Fetch the three transaction streams and merge them into qualifying
    /// wallet transactions, in the order the explorer listed them.
    pub async fn correlate(&self) -> Result<Vec<WalletTransaction>, CorrelationError> {
        let normal = self.datasource.normal_transactions(&self.wallet).await?;
        let mut transactions = self.seed_from_normal(&normal)?;
        debug!(
            seeded = transactions.len(),
            total = normal.len(),
            "seeded router-bound transactions"
        );

        let transfers = self.datasource.token_transfers(&self.wallet).await?;
        self.attach_token_transfers(&mut transactions, &transfers)?;

        let internal = self.datasource.internal_transactions(&self.wallet).await?;
        self.attach_internal_transfers(&mut transactions, &internal)?;

        let mut qualifying = Vec::new();
        for mut tx in transactions {
            tx.net_flows();
            if tx.flows.len() == 3 {
                qualifying.push(tx);
            } else {
                debug!(hash = %tx.hash, flows = tx.flows.len(), "discarding non-deposit transaction");
            }
        }
        info!(positions = qualifying.len(), "correlated liquidity deposits");
        Ok(qualifying)
    }

    /// A normal transaction seeds a candidate iff it succeeded on-chain and
    /// its direct counterparty is the router. An outgoing native amount
    /// becomes the wrapped-native "quote" leg.
    fn seed_from_normal(
        &self,
        normal: &[NormalTx],
    ) -> Result<Vec<WalletTransaction>, CorrelationError> {
        let mut transactions = Vec::new();
        for tx in normal {
            if tx.is_error != "0" || tx.txreceipt_status != "1" {
                continue;
            }
            if Address::new(tx.to.as_str()) != self.router {
                continue;
            }

            let mut flows = Vec::new();
            if tx.value != "0" {
                let raw = parse_f64(&tx.hash, "value", &tx.value)?;
                flows.push(TokenFlow::new(
                    self.wrapped_native.clone(),
                    -self.wrapped_native.adjust(raw),
                    FlowRole::Underlying,
                ));
            }

            transactions.push(WalletTransaction {
                hash: TxHash::new(tx.hash.clone()),
                timestamp: parse_timestamp(&tx.hash, &tx.time_stamp)?,
                gas_used: parse_f64(&tx.hash, "gasUsed", &tx.gas_used)?,
                gas_price: parse_f64(&tx.hash, "gasPrice", &tx.gas_price)?,
                flows,
            });
        }
        Ok(transactions)
    }

    /// Attach ERC-20 transfer events to seeded transactions by hash, signing
    /// each by its direction relative to the wallet.
    fn attach_token_transfers(
        &self,
        transactions: &mut [WalletTransaction],
        transfers: &[TokenTransfer],
    ) -> Result<(), CorrelationError> {
        for tx in transactions.iter_mut() {
            for transfer in transfers {
                if transfer.hash != tx.hash.as_str() {
                    continue;
                }

                let sign = if Address::new(transfer.to.as_str()) == self.wallet {
                    1.0
                } else if Address::new(transfer.from.as_str()) == self.wallet {
                    -1.0
                } else {
                    return Err(CorrelationError::UnattributableTransfer {
                        hash: transfer.hash.clone(),
                        contract: transfer.contract_address.clone(),
                        wallet: self.wallet.to_string(),
                    });
                };

                let role = if transfer.token_symbol == self.lp_symbol {
                    FlowRole::PoolShare
                } else {
                    FlowRole::Underlying
                };

                let decimals = parse_u32(&transfer.hash, "tokenDecimal", &transfer.token_decimal)?;
                let token = Token::new(
                    transfer.token_symbol.clone(),
                    transfer.contract_address.clone(),
                    decimals,
                );
                let raw = parse_f64(&transfer.hash, "value", &transfer.value)?;
                let amount = sign * token.adjust(raw);
                tx.flows.push(TokenFlow::new(token, amount, role));
            }
        }
        Ok(())
    }

    /// Internal transfers from the router are the router returning native
    /// funds to the wallet; they enter as positive wrapped-native flows.
    fn attach_internal_transfers(
        &self,
        transactions: &mut [WalletTransaction],
        internal: &[InternalTx],
    ) -> Result<(), CorrelationError> {
        for tx in transactions.iter_mut() {
            for itx in internal {
                if itx.hash != tx.hash.as_str() {
                    continue;
                }
                if Address::new(itx.from.as_str()) != self.router {
                    continue;
                }
                let raw = parse_f64(&itx.hash, "value", &itx.value)?;
                tx.flows.push(TokenFlow::new(
                    self.wrapped_native.clone(),
                    self.wrapped_native.adjust(raw),
                    FlowRole::Underlying,
                ));
            }
        }
        Ok(())
    }
}

fn parse_f64(hash: &str, field: &str, value: &str) -> Result<f64, CorrelationError> {
    value
        .parse::<f64>()
        .map_err(|_| CorrelationError::MalformedField {
            hash: hash.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_u32(hash: &str, field: &str, value: &str) -> Result<u32, CorrelationError> {
    value
        .parse::<u32>()
        .map_err(|_| CorrelationError::MalformedField {
            hash: hash.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_timestamp(hash: &str, value: &str) -> Result<DateTime<Utc>, CorrelationError> {
    let secs = value
        .parse::<i64>()
        .map_err(|_| CorrelationError::MalformedField {
            hash: hash.to_string(),
            field: "timeStamp".to_string(),
            value: value.to_string(),
        })?;
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| CorrelationError::MalformedField {
            hash: hash.to_string(),
            field: "timeStamp".to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_timestamp_accepts_unix_seconds() {
        let ts = parse_timestamp("0xabc", "1611859740").unwrap();
        assert_eq!(ts.timestamp(), 1_611_859_740);
    }

    #[test]
    fn parse_f64_reports_the_field() {
        let err = parse_f64("0xabc", "gasUsed", "bogus").unwrap_err();
        match err {
            CorrelationError::MalformedField { field, hash, .. } => {
                assert_eq!(field, "gasUsed");
                assert_eq!(hash, "0xabc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
