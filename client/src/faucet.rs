use std::time::Duration;

use async_trait::async_trait;
use moo_types::{AccountAddress, TxHash};
use tracing::info;

use crate::error::FaucetError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Funds accounts with native coin.
///
/// Returns the hashes of the transactions the faucet submitted; funding is
/// only done once those are confirmed through a ledger client.
#[async_trait]
pub trait FaucetClient: Send + Sync {
    async fn fund(&self, address: AccountAddress, amount: u64) -> Result<Vec<TxHash>, FaucetError>;
}

/// Client for a faucet's `POST /mint?amount=..&address=..` endpoint.
#[derive(Clone)]
pub struct HttpFaucet {
    http: reqwest::Client,
    base_url: String,
}

impl HttpFaucet {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FaucetError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl FaucetClient for HttpFaucet {
    async fn fund(&self, address: AccountAddress, amount: u64) -> Result<Vec<TxHash>, FaucetError> {
        let response = self
            .http
            .post(format!("{}/mint", self.base_url))
            .query(&[("amount", amount.to_string()), ("address", address.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaucetError::Rejected {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let hashes: Vec<TxHash> = response
            .json()
            .await
            .map_err(|e| FaucetError::InvalidResponse(e.to_string()))?;
        info!(%address, amount, transactions = hashes.len(), "faucet accepted funding request");
        Ok(hashes)
    }
}
