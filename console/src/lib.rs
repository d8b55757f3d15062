//! Operator console core.
//!
//! A [`Session`] is everything discovered from disk (settings root,
//! profile, keystore); a [`Console`] adds the ledger and faucet clients
//! and exposes the operations an operator runs.

pub mod console;
pub mod error;
pub mod session;
pub mod status;

pub use console::{AccountRow, Console, ConsoleInfo};
pub use error::ConsoleError;
pub use session::Session;
pub use status::{StatusSink, TracingStatus};
