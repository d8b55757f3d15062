//! Profile-scoped keystore.
//!
//! Named accounts live as one key file per name under
//! `<settings_root>/keys/<profile>/`. The `root` account is never stored
//! there: it is handed in from the profile settings and synthesized into
//! every lookup and listing.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moo_types::AccountAddress;
use tracing::{debug, info, warn};

use crate::account::{Account, AccountRef, ROOT_ACCOUNT};
use crate::error::{CreateError, KeystoreError};
use crate::key_file::{load_key_file, save_key_file};

/// Directory under the settings root that holds per-profile keystores.
pub const KEYS_DIR: &str = "keys";

const KEY_FILE_EXTENSION: &str = "json";

pub struct KeyStore {
    dir: PathBuf,
    root: Arc<Account>,
}

impl KeyStore {
    /// Keystore for `profile`. Nothing is touched on disk until the first
    /// account is persisted.
    pub fn open(settings_root: &Path, profile: &str, root: Account) -> Self {
        Self {
            dir: settings_root.join(KEYS_DIR).join(profile),
            root: Arc::new(root),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn root(&self) -> &Arc<Account> {
        &self.root
    }

    /// Create a named account, committing it locally only once
    /// `on_chain_create` has succeeded for its address.
    ///
    /// Name checks (reserved, malformed, already persisted) happen before
    /// the callback runs, so a refused name never costs a network call.
    /// If the callback fails nothing is written. The callback's success
    /// value is passed back alongside the account.
    pub async fn create<F, Fut, T, E>(
        &self,
        name: &str,
        on_chain_create: F,
    ) -> Result<(Arc<Account>, T), CreateError<E>>
    where
        F: FnOnce(AccountAddress) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let name = match AccountRef::parse(name) {
            AccountRef::Root => return Err(KeystoreError::ReservedName(name.to_string()).into()),
            AccountRef::Named(name) => name,
        };
        let path = self.key_path(name)?;
        if path
            .try_exists()
            .map_err(|e| KeystoreError::io(&path, e))?
        {
            return Err(KeystoreError::AlreadyExists(name.to_string()).into());
        }

        let account = Account::generate();
        let address = account.address();
        debug!(name, %address, "generated key pair");

        let created = on_chain_create(address)
            .await
            .map_err(CreateError::OnChain)?;

        std::fs::create_dir_all(&self.dir).map_err(|e| KeystoreError::io(&self.dir, e))?;
        if let Err(e) = save_key_file(&path, name, &account) {
            if matches!(e, KeystoreError::AlreadyExists(_)) {
                warn!(
                    name,
                    %address,
                    "name was taken while creating on-chain; the new on-chain account is orphaned"
                );
            }
            return Err(e.into());
        }
        info!(name, %address, path = %path.display(), "account persisted");

        Ok((Arc::new(account), created))
    }

    /// Look up an account by name. `Ok(None)` means no such account.
    pub fn get(&self, name: &str) -> Result<Option<Arc<Account>>, KeystoreError> {
        match AccountRef::parse(name) {
            AccountRef::Root => Ok(Some(Arc::clone(&self.root))),
            AccountRef::Named(name) => {
                let path = self.key_path(name)?;
                if !path.try_exists().map_err(|e| KeystoreError::io(&path, e))? {
                    return Ok(None);
                }
                load_key_file(&path).map(|account| Some(Arc::new(account)))
            }
        }
    }

    /// Every known account, `root` first, then persisted names in sorted
    /// order.
    pub fn list_all(&self) -> Result<Vec<(String, Arc<Account>)>, KeystoreError> {
        let mut accounts = vec![(ROOT_ACCOUNT.to_string(), Arc::clone(&self.root))];

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(accounts),
            Err(e) => return Err(KeystoreError::io(&self.dir, e)),
        };

        let mut named = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| KeystoreError::io(&self.dir, e))?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(KEY_FILE_EXTENSION)
            {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "ignoring key file with non UTF-8 name");
                continue;
            };
            if name == ROOT_ACCOUNT {
                warn!(path = %path.display(), "ignoring stored key file for reserved name");
                continue;
            }
            named.push((name.to_string(), path));
        }
        named.sort();

        for (name, path) in named {
            let account = load_key_file(&path)?;
            accounts.push((name, Arc::new(account)));
        }
        Ok(accounts)
    }

    fn key_path(&self, name: &str) -> Result<PathBuf, KeystoreError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.{KEY_FILE_EXTENSION}")))
    }
}

/// Names become file names, so anything that could escape the keystore
/// directory or hide the file is refused.
fn validate_name(name: &str) -> Result<(), KeystoreError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains(['/', '\\']) {
        "name contains a path separator"
    } else if name.starts_with('.') {
        "name starts with '.'"
    } else {
        return Ok(());
    };
    Err(KeystoreError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
