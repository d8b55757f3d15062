//! Move module and function identifiers.

use moo_types::AccountAddress;
use serde::{Serialize, Serializer};
use std::fmt;

/// A published Move module: `<address>::<name>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
        }
    }

    /// Function `name` inside this module.
    pub fn function(&self, name: impl Into<String>) -> EntryFunctionId {
        EntryFunctionId {
            module: self.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

/// A fully qualified entry function: `<address>::<module>::<function>`.
///
/// Serialises as that string, the form JSON payloads expect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryFunctionId {
    pub module: ModuleId,
    pub name: String,
}

impl fmt::Display for EntryFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

impl Serialize for EntryFunctionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
