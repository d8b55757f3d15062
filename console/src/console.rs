//! The operations an operator runs.
//!
//! Every mutating operation follows the same shape: resolve accounts
//! through the keystore, build a payload, submit it, then block until the
//! ledger reports it committed. Account creation additionally commits the
//! new key file only after that confirmation, and funds it afterwards.

use std::path::PathBuf;
use std::sync::Arc;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use moo_client::{
    FaucetClient, FaucetError, HttpFaucet, LedgerClient, LedgerError, RestClient, SubmitOptions,
};
use moo_config::ConsoleConfig;
use moo_transactions::{EntryFunction, EntryFunctionPayload, ModuleId};
use moo_types::{AccountAddress, TxHash};
use moo_wallet_core::{Account, CreateError};
use tracing::{info, warn};

use crate::error::ConsoleError;
use crate::session::Session;
use crate::status::{StatusSink, TracingStatus};

const CREATE_ACCOUNT: &str = "create account";
const MINT: &str = "mint";
const FUND: &str = "fund";
const REGISTER: &str = "register coin";

/// One line of the account listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountRow {
    pub name: String,
    pub address: AccountAddress,
    pub balance: u64,
}

/// Where the console is pointed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleInfo {
    pub settings_root: PathBuf,
    pub profile: String,
    pub rest_url: String,
    pub faucet_url: String,
    pub root_address: AccountAddress,
    pub coin_module: String,
    pub keystore_dir: PathBuf,
    pub move_package: Option<PathBuf>,
}

pub struct Console {
    session: Session,
    ledger: Arc<dyn LedgerClient>,
    faucet: Arc<dyn FaucetClient>,
    config: ConsoleConfig,
    status: Arc<dyn StatusSink>,
}

impl Console {
    pub fn new(
        session: Session,
        ledger: Arc<dyn LedgerClient>,
        faucet: Arc<dyn FaucetClient>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            session,
            ledger,
            faucet,
            config,
            status: Arc::new(TracingStatus),
        }
    }

    /// Console talking to the profile's REST node and faucet.
    pub fn connect(session: Session, config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let rest_url = session.profile().rest_url.clone();
        let faucet_url = session.profile().faucet_url.clone();

        let ledger = RestClient::new(&rest_url, SubmitOptions::from(&config)).map_err(|e| {
            ConsoleError::Client {
                url: rest_url,
                reason: e.to_string(),
            }
        })?;
        let faucet = HttpFaucet::new(&faucet_url).map_err(|e| ConsoleError::Client {
            url: faucet_url,
            reason: e.to_string(),
        })?;
        Ok(Self::new(session, Arc::new(ledger), Arc::new(faucet), config))
    }

    /// Replace the default tracing status reporter.
    pub fn with_status(mut self, status: Arc<dyn StatusSink>) -> Self {
        self.status = status;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The token module, published under the root account.
    pub fn coin_module(&self) -> ModuleId {
        ModuleId::new(self.session.root_address(), self.config.coin_module.clone())
    }

    /// Resolve `name`, failing with [`ConsoleError::AccountNotFound`].
    pub fn account(&self, name: &str) -> Result<Arc<Account>, ConsoleError> {
        self.session
            .keystore()
            .get(name)?
            .ok_or_else(|| ConsoleError::AccountNotFound(name.to_string()))
    }

    /// Create `name` on-chain (paid by root), persist it once confirmed,
    /// then fund it with `fund` coins if `fund > 0`.
    ///
    /// A funding failure leaves the created account in place and is
    /// reported as [`ConsoleError::FundingFailed`].
    pub async fn create_account(&self, name: &str, fund: u64) -> Result<Arc<Account>, ConsoleError> {
        let keystore = self.session.keystore();
        let (account, _) = keystore
            .create(name, |address| async move {
                let payload = EntryFunctionPayload::create_account(address);
                self.submit_and_confirm(CREATE_ACCOUNT, keystore.root(), &payload)
                    .await
            })
            .await
            .map_err(|e| match e {
                CreateError::Keystore(e) => ConsoleError::from(e),
                CreateError::OnChain(e) => e,
            })?;
        info!(name, address = %account.address(), "account created");

        if fund > 0 {
            if let Err(e) = self.fund_address(name, account.address(), fund).await {
                warn!(name, address = %account.address(), "account created but not funded");
                return Err(e);
            }
        }
        Ok(account)
    }

    /// Mint `amount` tokens to the account named `to`, signed by root.
    pub async fn mint(&self, amount: u64, to: &str) -> Result<TxHash, ConsoleError> {
        let recipient = self.account(to)?;
        let payload = EntryFunctionPayload::mint(&self.coin_module(), amount, recipient.address());
        self.submit_and_confirm(MINT, self.session.keystore().root(), &payload)
            .await
    }

    /// Fund the account named `name` through the faucet.
    pub async fn fund_account(&self, name: &str, amount: u64) -> Result<(), ConsoleError> {
        let account = self.account(name)?;
        self.fund_address(name, account.address(), amount).await
    }

    /// Register the account named `name` for the token, signed by that
    /// account.
    pub async fn register_coin(&self, name: &str) -> Result<TxHash, ConsoleError> {
        let account = self.account(name)?;
        let function = EntryFunction::register(&self.coin_module());
        let hash = self
            .ledger
            .submit_bcs(&account, function)
            .await
            .map_err(|source| transaction_failed(REGISTER, source))?;
        self.confirm(REGISTER, hash)
            .await
            .map_err(|source| transaction_failed(REGISTER, source))?;
        Ok(hash)
    }

    /// Every account with its balance, in keystore listing order.
    ///
    /// Balances are fetched concurrently, at most `balance_workers` at a
    /// time; rows stay aligned with the listing whatever order the
    /// queries complete in.
    pub async fn list_accounts(&self) -> Result<Vec<AccountRow>, ConsoleError> {
        let accounts = self.session.keystore().list_all()?;
        let ledger = &self.ledger;

        stream::iter(accounts)
            .map(|(name, account)| async move {
                let address = account.address();
                match ledger.balance(address).await {
                    Ok(balance) => Ok(AccountRow {
                        name,
                        address,
                        balance,
                    }),
                    Err(source) => Err(ConsoleError::BalanceQuery {
                        account: name,
                        source,
                    }),
                }
            })
            .buffered(self.config.balance_workers())
            .try_collect()
            .await
    }

    pub fn info(&self) -> ConsoleInfo {
        let profile = self.session.profile();
        ConsoleInfo {
            settings_root: self.session.settings_root().to_path_buf(),
            profile: profile.name.clone(),
            rest_url: profile.rest_url.clone(),
            faucet_url: profile.faucet_url.clone(),
            root_address: self.session.root_address(),
            coin_module: self.coin_module().to_string(),
            keystore_dir: self.session.keystore().dir().to_path_buf(),
            move_package: self.session.move_package().map(PathBuf::from),
        }
    }

    async fn submit_and_confirm(
        &self,
        operation: &'static str,
        signer: &Account,
        payload: &EntryFunctionPayload,
    ) -> Result<TxHash, ConsoleError> {
        let hash = self
            .ledger
            .submit(signer, payload)
            .await
            .map_err(|source| transaction_failed(operation, source))?;
        self.confirm(operation, hash)
            .await
            .map_err(|source| transaction_failed(operation, source))?;
        Ok(hash)
    }

    async fn confirm(&self, operation: &str, hash: TxHash) -> Result<(), LedgerError> {
        self.status.waiting(operation, &hash);
        self.ledger.await_confirmation(&hash).await?;
        self.status.done(operation, &hash);
        Ok(())
    }

    /// Ask the faucet for `amount` and wait for every transaction it
    /// reports.
    async fn fund_address(
        &self,
        name: &str,
        address: AccountAddress,
        amount: u64,
    ) -> Result<(), ConsoleError> {
        let funding_failed = |source: FaucetError| ConsoleError::FundingFailed {
            account: name.to_string(),
            address,
            source,
        };

        let hashes = self
            .faucet
            .fund(address, amount)
            .await
            .map_err(funding_failed)?;
        for hash in hashes {
            self.confirm(FUND, hash)
                .await
                .map_err(|e| funding_failed(FaucetError::Confirmation(e)))?;
        }
        info!(name, %address, amount, "account funded");
        Ok(())
    }
}

fn transaction_failed(operation: &'static str, source: LedgerError) -> ConsoleError {
    ConsoleError::TransactionFailed { operation, source }
}
