//! BCS-encoded raw and signed transactions.
//!
//! Field order and enum variant indices follow the ledger's canonical
//! layout; `bcs` derives the encoding from the declarations, so do not
//! reorder fields or variants.

use moo_crypto::{domain_separated, sign_message};
use moo_types::{AccountAddress, KeyPair};
use serde::{Serialize, Serializer};

use crate::{ModuleId, TransactionError};

/// Domain separator hashed in front of every raw transaction before signing.
const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// Variant index of entry-function payloads (0 = script, 1 = module bundle).
const ENTRY_FUNCTION_VARIANT: u32 = 2;

/// Move type argument.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
}

/// A call to a public entry function with BCS-encoded arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: String,
    pub ty_args: Vec<TypeTag>,
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    /// Parameterless `<coin module>::register`, opting the signer into
    /// holding the coin.
    pub fn register(coin_module: &ModuleId) -> Self {
        Self {
            module: coin_module.clone(),
            function: "register".to_string(),
            ty_args: Vec::new(),
            args: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum TransactionPayload {
    EntryFunction(EntryFunction),
}

impl Serialize for TransactionPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::EntryFunction(function) => serializer.serialize_newtype_variant(
                "TransactionPayload",
                ENTRY_FUNCTION_VARIANT,
                "EntryFunction",
                function,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChainId(pub u8);

/// An unsigned transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawTransaction {
    sender: AccountAddress,
    sequence_number: u64,
    payload: TransactionPayload,
    max_gas_amount: u64,
    gas_unit_price: u64,
    expiration_timestamp_secs: u64,
    chain_id: ChainId,
}

impl RawTransaction {
    pub fn new_entry_function(
        sender: AccountAddress,
        sequence_number: u64,
        function: EntryFunction,
        max_gas_amount: u64,
        gas_unit_price: u64,
        expiration_timestamp_secs: u64,
        chain_id: ChainId,
    ) -> Self {
        Self {
            sender,
            sequence_number,
            payload: TransactionPayload::EntryFunction(function),
            max_gas_amount,
            gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        }
    }

    pub fn sender(&self) -> AccountAddress {
        self.sender
    }

    /// The exact bytes a signer signs: `SHA3-256(salt) || bcs(self)`.
    pub fn signing_message(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(domain_separated(RAW_TRANSACTION_SALT, &bcs::to_bytes(self)?))
    }

    /// Sign with a single Ed25519 key.
    pub fn sign(self, keys: &KeyPair) -> Result<SignedTransaction, TransactionError> {
        let signature = sign_message(&self.signing_message()?, &keys.private);
        Ok(SignedTransaction {
            raw_txn: self,
            authenticator: TransactionAuthenticator::Ed25519 {
                public_key: keys.public.as_bytes().to_vec(),
                signature: signature.as_bytes().to_vec(),
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Vec<u8>,
        signature: Vec<u8>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    raw_txn: RawTransaction,
    authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub fn raw(&self) -> &RawTransaction {
        &self.raw_txn
    }

    pub fn authenticator(&self) -> &TransactionAuthenticator {
        &self.authenticator
    }

    /// Body for the node's BCS submission endpoint.
    pub fn to_bcs_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        Ok(bcs::to_bytes(self)?)
    }
}
