//! Nullable infrastructure for deterministic testing.
//!
//! The console's remote collaborators (ledger node, faucet) sit behind
//! traits. This crate provides test-friendly implementations that:
//! - Never touch the network
//! - Record every call into a shared [`Journal`] so ordering across
//!   collaborators can be asserted
//! - Can be told to fail, reject or stall programmatically
//!
//! Usage: hand `Arc<NullLedger>` / `Arc<NullFaucet>` to the console in
//! place of the REST clients.

pub mod faucet;
pub mod journal;
pub mod ledger;

pub use faucet::NullFaucet;
pub use journal::{Call, Event, Journal, Submission};
pub use ledger::NullLedger;
