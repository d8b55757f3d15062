//! Transaction payloads submitted by the console.
//!
//! Two encodings are supported:
//! - **JSON entry-function payloads** ([`EntryFunctionPayload`]), which the
//!   node turns into a signing message for us (`encode_submission`).
//! - **BCS signed transactions** ([`SignedTransaction`]), built and signed
//!   locally and submitted as raw bytes.
//!
//! Payloads have no local persistence: they are built, submitted and then
//! either confirmed or rejected.

pub mod error;
pub mod module;
pub mod payload;
pub mod raw;

pub use error::TransactionError;
pub use module::{EntryFunctionId, ModuleId};
pub use payload::EntryFunctionPayload;
pub use raw::{
    ChainId, EntryFunction, RawTransaction, SignedTransaction, TransactionAuthenticator, TypeTag,
};
