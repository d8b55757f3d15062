//! Nullable ledger that records submissions instead of sending them.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use moo_client::{LedgerClient, LedgerError};
use moo_transactions::{EntryFunction, EntryFunctionPayload};
use moo_types::{AccountAddress, TxHash};
use moo_wallet_core::Account;

use crate::journal::{Call, Event, Journal, Submission};

/// First byte of every hash this ledger hands out.
const LEDGER_HASH_TAG: u8 = 0x1e;

#[derive(Default)]
struct LedgerState {
    submitted: u64,
    submit_failure: Option<String>,
    reject_all: Option<String>,
    rejected: HashMap<TxHash, String>,
    balances: HashMap<AccountAddress, u64>,
    balance_delays: HashMap<AccountAddress, Duration>,
    balance_failures: HashSet<AccountAddress>,
}

/// A test ledger: every submission is accepted and confirmed unless told
/// otherwise, and balances are whatever the test sets.
#[derive(Default)]
pub struct NullLedger {
    journal: Journal,
    state: Mutex<LedgerState>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record into `journal`, typically one shared with a [`crate::NullFaucet`].
    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal,
            state: Mutex::default(),
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.journal.submissions()
    }

    /// Refuse every later submission with `message`.
    pub fn fail_submissions(&self, message: impl Into<String>) {
        self.state().submit_failure = Some(message.into());
    }

    /// Report every later confirmation as a failed transaction.
    pub fn reject_all(&self, vm_status: impl Into<String>) {
        self.state().reject_all = Some(vm_status.into());
    }

    /// Report `hash` as a failed transaction when confirmed.
    pub fn reject(&self, hash: TxHash, vm_status: impl Into<String>) {
        self.state().rejected.insert(hash, vm_status.into());
    }

    pub fn set_balance(&self, address: AccountAddress, amount: u64) {
        self.state().balances.insert(address, amount);
    }

    /// Make balance queries for `address` take at least `delay`.
    pub fn delay_balance(&self, address: AccountAddress, delay: Duration) {
        self.state().balance_delays.insert(address, delay);
    }

    pub fn fail_balance(&self, address: AccountAddress) {
        self.state().balance_failures.insert(address);
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_submission(&self, sender: AccountAddress, call: Call) -> Result<TxHash, LedgerError> {
        let hash = {
            let mut state = self.state();
            if let Some(message) = &state.submit_failure {
                return Err(LedgerError::Api {
                    status: 400,
                    message: message.clone(),
                });
            }
            state.submitted += 1;
            tagged_hash(LEDGER_HASH_TAG, state.submitted)
        };
        self.journal.record(Event::Submitted(Submission { hash, sender, call }));
        Ok(hash)
    }
}

/// Deterministic hash: a tag byte, then a big-endian counter at the end.
pub(crate) fn tagged_hash(tag: u8, counter: u64) -> TxHash {
    let mut bytes = [0u8; 32];
    bytes[0] = tag;
    bytes[24..].copy_from_slice(&counter.to_be_bytes());
    TxHash::new(bytes)
}

#[async_trait]
impl LedgerClient for NullLedger {
    async fn submit(
        &self,
        signer: &Account,
        payload: &EntryFunctionPayload,
    ) -> Result<TxHash, LedgerError> {
        self.record_submission(signer.address(), Call::Json(payload.clone()))
    }

    async fn submit_bcs(
        &self,
        signer: &Account,
        function: EntryFunction,
    ) -> Result<TxHash, LedgerError> {
        self.record_submission(signer.address(), Call::Bcs(function))
    }

    async fn await_confirmation(&self, hash: &TxHash) -> Result<(), LedgerError> {
        let rejection = {
            let state = self.state();
            let status = state.rejected.get(hash).or(state.reject_all.as_ref()).cloned();
            status
        };
        if let Some(vm_status) = rejection {
            return Err(LedgerError::Rejected {
                hash: *hash,
                vm_status,
            });
        }
        self.journal.record(Event::Confirmed(*hash));
        Ok(())
    }

    async fn balance(&self, address: AccountAddress) -> Result<u64, LedgerError> {
        let delay = self.state().balance_delays.get(&address).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let state = self.state();
        if state.balance_failures.contains(&address) {
            return Err(LedgerError::Api {
                status: 500,
                message: format!("balance lookup for {address} failed"),
            });
        }
        Ok(state.balances.get(&address).copied().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moo_types::PrivateKey;

    fn signer() -> Account {
        Account::from_private_key(PrivateKey([5u8; 32]))
    }

    #[tokio::test]
    async fn submissions_are_recorded_with_distinct_hashes() {
        let ledger = NullLedger::new();
        let payload = EntryFunctionPayload::create_account(AccountAddress::ONE);

        let first = ledger.submit(&signer(), &payload).await.unwrap();
        let second = ledger.submit(&signer(), &payload).await.unwrap();

        assert_ne!(first, second);
        let submissions = ledger.submissions();
        assert_eq!(submissions.len(), 2);
        assert_eq!(submissions[0].sender, signer().address());
        assert_eq!(submissions[0].call, Call::Json(payload));
    }

    #[tokio::test]
    async fn failed_submission_records_nothing() {
        let ledger = NullLedger::new();
        ledger.fail_submissions("out of gas");

        let err = ledger
            .submit(&signer(), &EntryFunctionPayload::create_account(AccountAddress::ONE))
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::Api { message, .. } if message == "out of gas"));
        assert!(ledger.journal().events().is_empty());
    }

    #[tokio::test]
    async fn rejected_hash_fails_confirmation() {
        let ledger = NullLedger::new();
        let hash = ledger
            .submit(&signer(), &EntryFunctionPayload::create_account(AccountAddress::ONE))
            .await
            .unwrap();
        ledger.reject(hash, "ABORTED");

        let err = ledger.await_confirmation(&hash).await.unwrap_err();
        assert!(matches!(err, LedgerError::Rejected { vm_status, .. } if vm_status == "ABORTED"));
    }

    #[tokio::test]
    async fn unknown_balances_read_as_zero() {
        let ledger = NullLedger::new();
        ledger.set_balance(AccountAddress::ONE, 42);

        assert_eq!(ledger.balance(AccountAddress::ONE).await.unwrap(), 42);
        assert_eq!(ledger.balance(signer().address()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn delayed_balance_still_answers() {
        use futures_util::future::join;

        let ledger = NullLedger::new();
        let slow = signer().address();
        ledger.set_balance(slow, 7);
        ledger.delay_balance(slow, Duration::from_millis(30));

        let (a, b) = join(ledger.balance(slow), ledger.balance(AccountAddress::ONE)).await;
        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 0);
    }
}
