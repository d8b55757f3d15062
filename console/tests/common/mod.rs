#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moo_config::ConsoleConfig;
use moo_console::{Console, Session};
use moo_nullables::{Journal, NullFaucet, NullLedger};
use moo_types::{AccountAddress, PrivateKey};
use moo_wallet_core::Account;
use tempfile::TempDir;

pub const ROOT_KEY: [u8; 32] = [1u8; 32];

pub fn root_address() -> AccountAddress {
    Account::from_private_key(PrivateKey(ROOT_KEY)).address()
}

/// `<tmp>/x/.aptos/config.yaml` with a `default` profile, and an empty
/// project directory `<tmp>/x/project/src` to start discovery from.
pub struct Workspace {
    pub dir: TempDir,
    pub settings_root: PathBuf,
    pub start: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings_root = dir.path().join("x").join(".aptos");
        let start = dir.path().join("x").join("project").join("src");
        fs::create_dir_all(&settings_root).unwrap();
        fs::create_dir_all(&start).unwrap();
        fs::write(
            settings_root.join("config.yaml"),
            format!(
                "---\nprofiles:\n  default:\n    private_key: \"0x{}\"\n    public_key: \"0x00\"\n    account: \"{}\"\n    rest_url: \"http://node/\"\n    faucet_url: \"http://faucet/\"\n  empty: {{}}\n",
                "01".repeat(32),
                root_address(),
            ),
        )
        .unwrap();
        Self {
            dir,
            settings_root,
            start,
        }
    }

    pub fn key_file(&self, name: &str) -> PathBuf {
        self.settings_root
            .join("keys")
            .join("default")
            .join(format!("{name}.json"))
    }

    pub fn session(&self) -> Session {
        Session::discover(&self.start, "default", None).unwrap()
    }
}

pub struct Harness {
    pub workspace: Workspace,
    pub journal: Journal,
    pub ledger: Arc<NullLedger>,
    pub faucet: Arc<NullFaucet>,
    pub console: Console,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ConsoleConfig::default())
    }

    pub fn with_config(config: ConsoleConfig) -> Self {
        let workspace = Workspace::new();
        let journal = Journal::new();
        let ledger = Arc::new(NullLedger::with_journal(journal.clone()));
        let faucet = Arc::new(NullFaucet::with_journal(journal.clone()));
        let console = Console::new(workspace.session(), ledger.clone(), faucet.clone(), config);
        Self {
            workspace,
            journal,
            ledger,
            faucet,
            console,
        }
    }

    pub fn settings_root(&self) -> &Path {
        &self.workspace.settings_root
    }
}
