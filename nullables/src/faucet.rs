//! Nullable faucet that records funding requests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use moo_client::{FaucetClient, FaucetError};
use moo_types::{AccountAddress, TxHash};

use crate::journal::{Event, Journal};
use crate::ledger::tagged_hash;

const FAUCET_HASH_TAG: u8 = 0xfa;

type FundObserver = Box<dyn Fn(AccountAddress, u64) + Send>;

#[derive(Default)]
struct FaucetState {
    requests: u64,
    failure: Option<String>,
    observer: Option<FundObserver>,
}

/// A test faucet. Each successful request yields one transaction hash.
#[derive(Default)]
pub struct NullFaucet {
    journal: Journal,
    state: Mutex<FaucetState>,
}

impl NullFaucet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            state: Mutex::default(),
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Successful funding requests so far.
    pub fn funded(&self) -> Vec<(AccountAddress, u64)> {
        self.journal.funded()
    }

    /// Refuse every later request with `message`.
    pub fn fail(&self, message: impl Into<String>) {
        self.state().failure = Some(message.into());
    }

    /// Run `observer` at the start of every request, before it succeeds or
    /// fails. Lets a test inspect the world at the moment funding happens.
    pub fn on_fund(&self, observer: impl Fn(AccountAddress, u64) + Send + 'static) {
        self.state().observer = Some(Box::new(observer));
    }

    fn state(&self) -> MutexGuard<'_, FaucetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl FaucetClient for NullFaucet {
    async fn fund(&self, address: AccountAddress, amount: u64) -> Result<Vec<TxHash>, FaucetError> {
        let hash = {
            let mut state = self.state();
            if let Some(observer) = &state.observer {
                observer(address, amount);
            }
            if let Some(message) = &state.failure {
                return Err(FaucetError::Rejected {
                    status: 500,
                    message: message.clone(),
                });
            }
            state.requests += 1;
            tagged_hash(FAUCET_HASH_TAG, state.requests)
        };
        self.journal.record(Event::Funded {
            address,
            amount,
            hash,
        });
        Ok(vec![hash])
    }
}
