//! REST implementation of [`LedgerClient`].

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use moo_transactions::{ChainId, EntryFunction, EntryFunctionPayload, RawTransaction};
use moo_types::{AccountAddress, TxHash};
use moo_wallet_core::Account;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::LedgerError;
use crate::ledger::{LedgerClient, SubmitOptions};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const BCS_SIGNED_TRANSACTION: &str = "application/x.aptos.signed_transaction+bcs";
const COIN_STORE: &str = "0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>";
const PENDING_TRANSACTION: &str = "pending_transaction";

/// Client for a node's REST API, e.g. `http://127.0.0.1:8080/v1`.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    options: SubmitOptions,
}

#[derive(Deserialize)]
struct LedgerInfo {
    chain_id: u8,
}

#[derive(Deserialize)]
struct AccountData {
    sequence_number: String,
}

#[derive(Deserialize)]
struct PendingTransaction {
    hash: TxHash,
}

#[derive(Deserialize)]
struct TransactionStatus {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    vm_status: Option<String>,
}

#[derive(Deserialize)]
struct CoinStoreResource {
    data: CoinStoreData,
}

#[derive(Deserialize)]
struct CoinStoreData {
    coin: CoinValue,
}

#[derive(Deserialize)]
struct CoinValue {
    value: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

/// JSON submission body. `u64` fields travel as decimal strings.
#[derive(Serialize)]
struct SubmissionRequest<'a> {
    sender: AccountAddress,
    sequence_number: String,
    max_gas_amount: String,
    gas_unit_price: String,
    expiration_timestamp_secs: String,
    payload: &'a EntryFunctionPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    signature: Option<Ed25519Signature>,
}

#[derive(Serialize)]
struct Ed25519Signature {
    #[serde(rename = "type")]
    kind: &'static str,
    public_key: String,
    signature: String,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, options: SubmitOptions) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            options,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn options(&self) -> &SubmitOptions {
        &self.options
    }

    pub async fn chain_id(&self) -> Result<ChainId, LedgerError> {
        let info: LedgerInfo = self.get_required("/").await?;
        Ok(ChainId(info.chain_id))
    }

    pub async fn sequence_number(&self, address: AccountAddress) -> Result<u64, LedgerError> {
        let account: AccountData = self.get_required(&format!("/accounts/{address}")).await?;
        account.sequence_number.parse().map_err(|e| {
            LedgerError::InvalidResponse(format!(
                "sequence number '{}': {e}",
                account.sequence_number
            ))
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn expiration_timestamp_secs(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        (now + self.options.expiration_ttl).as_secs()
    }

    /// GET returning `None` for 404.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, LedgerError> {
        let response = self.http.get(self.url(path)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(response).await.map(Some)
    }

    async fn get_required<T: DeserializeOwned>(&self, path: &str) -> Result<T, LedgerError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_json(response).await
    }
}

/// Decode a successful response body, or turn an error status into
/// [`LedgerError::Api`] using the node's `message` field when present.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(LedgerError::Api {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json()
        .await
        .map_err(|e| LedgerError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl LedgerClient for RestClient {
    async fn submit(
        &self,
        signer: &Account,
        payload: &EntryFunctionPayload,
    ) -> Result<TxHash, LedgerError> {
        let sender = signer.address();
        let mut request = SubmissionRequest {
            sender,
            sequence_number: self.sequence_number(sender).await?.to_string(),
            max_gas_amount: self.options.max_gas_amount.to_string(),
            gas_unit_price: self.options.gas_unit_price.to_string(),
            expiration_timestamp_secs: self.expiration_timestamp_secs().to_string(),
            payload,
            signature: None,
        };

        let response = self
            .http
            .post(self.url("/transactions/encode_submission"))
            .json(&request)
            .send()
            .await?;
        let encoded: String = read_json(response).await?;
        let message = hex::decode(encoded.trim_start_matches("0x")).map_err(|e| {
            LedgerError::InvalidResponse(format!("signing message is not hex: {e}"))
        })?;

        let signature = signer.sign(&message);
        request.signature = Some(Ed25519Signature {
            kind: "ed25519_signature",
            public_key: signer.public_key().to_string(),
            signature: signature.to_string(),
        });

        let response = self
            .http
            .post(self.url("/transactions"))
            .json(&request)
            .send()
            .await?;
        let pending: PendingTransaction = read_json(response).await?;
        info!(hash = %pending.hash, function = %payload.function, %sender, "transaction submitted");
        Ok(pending.hash)
    }

    async fn submit_bcs(
        &self,
        signer: &Account,
        function: EntryFunction,
    ) -> Result<TxHash, LedgerError> {
        let sender = signer.address();
        let chain_id = self.chain_id().await?;
        let sequence_number = self.sequence_number(sender).await?;
        let label = format!("{}::{}", function.module, function.function);

        let signed = RawTransaction::new_entry_function(
            sender,
            sequence_number,
            function,
            self.options.max_gas_amount,
            self.options.gas_unit_price,
            self.expiration_timestamp_secs(),
            chain_id,
        )
        .sign(signer.keys())?;

        let response = self
            .http
            .post(self.url("/transactions"))
            .header(reqwest::header::CONTENT_TYPE, BCS_SIGNED_TRANSACTION)
            .body(signed.to_bcs_bytes()?)
            .send()
            .await?;
        let pending: PendingTransaction = read_json(response).await?;
        info!(hash = %pending.hash, function = %label, %sender, "transaction submitted");
        Ok(pending.hash)
    }

    async fn await_confirmation(&self, hash: &TxHash) -> Result<(), LedgerError> {
        let timeout = self.options.confirmation_timeout;
        let deadline = Instant::now() + timeout;
        let path = format!("/transactions/by_hash/{hash}");

        loop {
            match self.get_optional::<TransactionStatus>(&path).await? {
                Some(status) if status.kind != PENDING_TRANSACTION => {
                    if status.success == Some(true) {
                        info!(%hash, "transaction confirmed");
                        return Ok(());
                    }
                    return Err(LedgerError::Rejected {
                        hash: *hash,
                        vm_status: status
                            .vm_status
                            .unwrap_or_else(|| "unknown status".to_string()),
                    });
                }
                _ => debug!(%hash, "transaction pending"),
            }

            if Instant::now() >= deadline {
                return Err(LedgerError::Timeout {
                    hash: *hash,
                    timeout,
                });
            }
            tokio::time::sleep(self.options.poll_interval).await;
        }
    }

    async fn balance(&self, address: AccountAddress) -> Result<u64, LedgerError> {
        let path = format!("/accounts/{address}/resource/{COIN_STORE}");
        let Some(store) = self.get_optional::<CoinStoreResource>(&path).await? else {
            return Ok(0);
        };
        store.data.coin.value.parse().map_err(|e| {
            LedgerError::InvalidResponse(format!("coin value '{}': {e}", store.data.coin.value))
        })
    }
}
