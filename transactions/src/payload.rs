//! JSON entry-function payloads.

use moo_types::AccountAddress;
use serde::Serialize;
use serde_json::Value;

use crate::{EntryFunctionId, ModuleId};

/// Framework function that creates an account at a given address.
const CREATE_ACCOUNT_MODULE: &str = "aptos_account";
const CREATE_ACCOUNT_FUNCTION: &str = "create_account";

/// Operation descriptor: target function, type arguments and positional
/// arguments, in the JSON shape the node's REST API accepts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EntryFunctionPayload {
    #[serde(rename = "type")]
    kind: &'static str,
    pub function: EntryFunctionId,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl EntryFunctionPayload {
    pub fn new(function: EntryFunctionId, type_arguments: Vec<String>, arguments: Vec<Value>) -> Self {
        Self {
            kind: "entry_function_payload",
            function,
            type_arguments,
            arguments,
        }
    }

    /// System-level account creation for `address`.
    pub fn create_account(address: AccountAddress) -> Self {
        let function = ModuleId::new(AccountAddress::ONE, CREATE_ACCOUNT_MODULE)
            .function(CREATE_ACCOUNT_FUNCTION);
        Self::new(function, Vec::new(), vec![Value::String(address.to_string())])
    }

    /// `<coin module>::mint(amount, to)`.
    ///
    /// `u64` arguments travel as decimal strings so large amounts survive
    /// JSON number handling.
    pub fn mint(coin_module: &ModuleId, amount: u64, to: AccountAddress) -> Self {
        Self::new(
            coin_module.function("mint"),
            Vec::new(),
            vec![
                Value::String(amount.to_string()),
                Value::String(to.to_string()),
            ],
        )
    }
}
