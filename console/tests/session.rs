mod common;

use std::fs;

use common::{root_address, Workspace};
use moo_config::ConsoleConfig;
use moo_console::{Console, ConsoleError, Session};

#[test]
fn discovery_walks_up_to_the_settings_root() {
    let workspace = Workspace::new();
    let session = Session::discover(&workspace.start, "default", None).unwrap();

    assert_eq!(session.settings_root(), workspace.settings_root);
    assert_eq!(session.profile().rest_url, "http://node");
    assert_eq!(session.profile().faucet_url, "http://faucet");
    assert_eq!(session.root_address(), root_address());
    assert_eq!(
        session.keystore().dir(),
        workspace.settings_root.join("keys").join("default")
    );
}

#[test]
fn explicit_settings_dir_skips_the_search() {
    let workspace = Workspace::new();
    let elsewhere = tempfile::tempdir().unwrap();

    let session =
        Session::discover(elsewhere.path(), "default", Some(&workspace.settings_root)).unwrap();
    assert_eq!(session.settings_root(), workspace.settings_root);
}

#[test]
fn missing_settings_root_is_reported_with_the_start_dir() {
    let dir = tempfile::tempdir().unwrap();
    let start = dir.path().join("a").join("b");
    fs::create_dir_all(&start).unwrap();

    let err = Session::discover(&start, "default", None).err().unwrap();
    assert!(
        matches!(&err, ConsoleError::SettingsNotFound { start: reported } if *reported == start),
        "unexpected {err:?}"
    );
}

#[test]
fn settings_root_without_document_is_unreadable() {
    let dir = tempfile::tempdir().unwrap();
    let err = Session::discover(dir.path(), "default", Some(dir.path()))
        .err()
        .unwrap();
    assert!(matches!(err, ConsoleError::SettingsUnreadable { .. }));
}

#[test]
fn absent_and_empty_profiles_are_not_found() {
    let workspace = Workspace::new();
    for profile in ["testnet", "empty"] {
        let err = Session::discover(&workspace.start, profile, None)
            .err()
            .unwrap();
        assert!(
            matches!(&err, ConsoleError::ProfileNotFound(name) if name == profile),
            "unexpected {err:?}"
        );
    }
}

#[test]
fn undecodable_root_key_is_rejected() {
    let workspace = Workspace::new();
    fs::write(
        workspace.settings_root.join("config.yaml"),
        "profiles:\n  default:\n    private_key: \"0xnothex\"\n    rest_url: \"http://node\"\n    faucet_url: \"http://faucet\"\n",
    )
    .unwrap();

    let err = Session::discover(&workspace.start, "default", None)
        .err()
        .unwrap();
    assert!(matches!(err, ConsoleError::InvalidRootKey { profile, .. } if profile == "default"));
}

#[test]
fn move_package_is_reported_in_info() {
    let workspace = Workspace::new();
    let manifest = workspace.dir.path().join("x").join("project").join("Move.toml");
    fs::write(&manifest, "[package]\nname = \"MooCoin\"\n").unwrap();

    let console = Console::connect(workspace.session(), ConsoleConfig::default()).unwrap();
    let info = console.info();

    assert_eq!(info.move_package.as_deref(), Some(manifest.as_path()));
    assert_eq!(info.profile, "default");
    assert_eq!(info.rest_url, "http://node");
    assert_eq!(info.root_address, root_address());
    assert_eq!(info.coin_module, format!("{}::MooCoin", root_address()));
}
