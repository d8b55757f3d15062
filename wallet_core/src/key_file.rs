//! On-disk form of a named account.
//!
//! One JSON document per account:
//!
//! ```json
//! { "account_address": "0x…", "private_key": "0x…" }
//! ```
//!
//! The recorded address is checked against the one derived from the key
//! on load, so a hand-edited or truncated file is reported instead of
//! silently signing as a different account.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use moo_crypto::parse_private_key;
use moo_types::AccountAddress;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::account::Account;
use crate::error::KeystoreError;

#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct KeyFile {
    #[zeroize(skip)]
    account_address: AccountAddress,
    private_key: String,
}

/// Write `account` to `path`, failing if the file already exists.
///
/// Returns [`KeystoreError::AlreadyExists`] when another writer got there
/// first; `name` is only used to label that error.
pub fn save_key_file(path: &Path, name: &str, account: &Account) -> Result<(), KeystoreError> {
    let file = KeyFile {
        account_address: account.address(),
        private_key: account.keys().private.to_hex_literal(),
    };
    let mut json = serde_json::to_string_pretty(&file).map_err(|e| KeystoreError::Corrupt {
        path: path.to_path_buf(),
        reason: format!("JSON serialization failed: {e}"),
    })?;
    json.push('\n');

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = options.open(path).and_then(|mut out| {
        out.write_all(json.as_bytes())?;
        out.sync_all()
    });
    json.zeroize();

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(KeystoreError::AlreadyExists(name.to_string()))
        }
        Err(e) => Err(KeystoreError::io(path, e)),
    }
}

/// Load the account stored at `path`.
pub fn load_key_file(path: &Path) -> Result<Account, KeystoreError> {
    let mut json = std::fs::read_to_string(path).map_err(|e| KeystoreError::io(path, e))?;
    let parsed: Result<KeyFile, _> = serde_json::from_str(&json);
    json.zeroize();

    let file = parsed.map_err(|e| KeystoreError::Corrupt {
        path: path.to_path_buf(),
        reason: format!("invalid key file JSON: {e}"),
    })?;
    let private = parse_private_key(&file.private_key).map_err(|e| KeystoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let account = Account::from_private_key(private);
    if account.address() != file.account_address {
        return Err(KeystoreError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "recorded address {} does not match key (derives {})",
                file.account_address,
                account.address()
            ),
        });
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use moo_types::PrivateKey;
    use std::fs;

    #[test]
    fn saved_file_loads_back_to_same_address() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        let account = Account::generate();

        save_key_file(&path, "alice", &account).unwrap();
        let loaded = load_key_file(&path).unwrap();

        assert_eq!(loaded.address(), account.address());
        assert_eq!(loaded.public_key(), account.public_key());
    }

    #[test]
    fn saved_file_has_expected_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        let account = Account::from_private_key(PrivateKey([3u8; 32]));
        save_key_file(&path, "alice", &account).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            value["account_address"].as_str().unwrap(),
            account.address().to_string()
        );
        assert_eq!(
            value["private_key"].as_str().unwrap(),
            format!("0x{}", "03".repeat(32))
        );
    }

    #[test]
    fn save_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        save_key_file(&path, "alice", &Account::generate()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = save_key_file(&path, "alice", &Account::generate()).unwrap_err();
        assert!(matches!(err, KeystoreError::AlreadyExists(name) if name == "alice"));
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }

    #[test]
    fn mismatched_address_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        fs::write(
            &path,
            format!(
                r#"{{"account_address":"0x1","private_key":"0x{}"}}"#,
                "03".repeat(32)
            ),
        )
        .unwrap();

        assert!(matches!(
            load_key_file(&path),
            Err(KeystoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            load_key_file(&path),
            Err(KeystoreError::Corrupt { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn key_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alice.json");
        save_key_file(&path, "alice", &Account::generate()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
