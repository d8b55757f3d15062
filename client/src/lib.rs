//! Clients for the remote collaborators of the console.
//!
//! [`LedgerClient`] covers everything the console asks of a node (submit,
//! wait for finality, read balance) and [`FaucetClient`] covers funding.
//! [`RestClient`] and [`HttpFaucet`] speak the node's REST API and the
//! faucet's HTTP API; tests substitute in-memory doubles.

pub mod error;
pub mod faucet;
pub mod ledger;
pub mod rest;

pub use error::{FaucetError, LedgerError};
pub use faucet::{FaucetClient, HttpFaucet};
pub use ledger::{LedgerClient, SubmitOptions};
pub use rest::RestClient;
