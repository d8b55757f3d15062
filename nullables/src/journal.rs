//! Shared record of calls made to the nullable collaborators.

use std::sync::{Arc, Mutex, PoisonError};

use moo_transactions::{EntryFunction, EntryFunctionPayload};
use moo_types::{AccountAddress, TxHash};

/// What was submitted.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Json(EntryFunctionPayload),
    Bcs(EntryFunction),
}

impl Call {
    /// Fully qualified function, `<address>::<module>::<function>`.
    pub fn function(&self) -> String {
        match self {
            Self::Json(payload) => payload.function.to_string(),
            Self::Bcs(function) => format!("{}::{}", function.module, function.function),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub hash: TxHash,
    pub sender: AccountAddress,
    pub call: Call,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Submitted(Submission),
    Confirmed(TxHash),
    Funded {
        address: AccountAddress,
        amount: u64,
        hash: TxHash,
    },
}

/// Append-only event log, cheap to clone and share.
#[derive(Clone, Debug, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// All events so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Submitted(submission) => Some(submission),
                _ => None,
            })
            .collect()
    }

    pub fn funded(&self) -> Vec<(AccountAddress, u64)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Funded {
                    address, amount, ..
                } => Some((address, amount)),
                _ => None,
            })
            .collect()
    }
}
