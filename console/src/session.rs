//! Everything a command needs from disk before it talks to the network.

use std::path::{Path, PathBuf};

use moo_config::{find_move_package, find_settings_dir, load_profile, ProfileConfig};
use moo_crypto::parse_private_key;
use moo_types::AccountAddress;
use moo_wallet_core::{Account, KeyStore};
use tracing::debug;

use crate::error::ConsoleError;

pub struct Session {
    settings_root: PathBuf,
    profile: ProfileConfig,
    keystore: KeyStore,
    move_package: Option<PathBuf>,
}

impl Session {
    /// Resolve the settings root (explicit `settings_override`, else the
    /// nearest settings directory above `start_dir`), load `profile` from
    /// it and decode its root key.
    pub fn discover(
        start_dir: &Path,
        profile: &str,
        settings_override: Option<&Path>,
    ) -> Result<Self, ConsoleError> {
        let settings_root = match settings_override {
            Some(dir) => dir.to_path_buf(),
            None => find_settings_dir(start_dir).ok_or_else(|| ConsoleError::SettingsNotFound {
                start: start_dir.to_path_buf(),
            })?,
        };
        let mut session = Self::open(settings_root, profile)?;
        session.move_package = find_move_package(start_dir);
        Ok(session)
    }

    /// Load `profile` from a known settings root.
    pub fn open(settings_root: PathBuf, profile: &str) -> Result<Self, ConsoleError> {
        let profile = load_profile(&settings_root, profile)?;
        let root_key = parse_private_key(profile.private_key.expose()).map_err(|source| {
            ConsoleError::InvalidRootKey {
                profile: profile.name.clone(),
                source,
            }
        })?;
        let root = Account::from_private_key(root_key);
        debug!(
            settings_root = %settings_root.display(),
            profile = %profile.name,
            root = %root.address(),
            "session opened"
        );

        let keystore = KeyStore::open(&settings_root, &profile.name, root);
        Ok(Self {
            settings_root,
            profile,
            keystore,
            move_package: None,
        })
    }

    pub fn settings_root(&self) -> &Path {
        &self.settings_root
    }

    pub fn profile(&self) -> &ProfileConfig {
        &self.profile
    }

    pub fn keystore(&self) -> &KeyStore {
        &self.keystore
    }

    pub fn root_address(&self) -> AccountAddress {
        self.keystore.root().address()
    }

    /// Nearest `Move.toml` at or above the directory the session was
    /// discovered from.
    pub fn move_package(&self) -> Option<&Path> {
        self.move_package.as_deref()
    }
}
