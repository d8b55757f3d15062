//! Discovery and loading of profile settings from a real directory tree.

use std::fs;
use std::path::Path;

use moo_config::{find_settings_dir, load_profile, ConfigError, SETTINGS_DIR, SETTINGS_FILE};

fn write_settings(root: &Path, body: &str) {
    let settings = root.join(SETTINGS_DIR);
    fs::create_dir_all(&settings).unwrap();
    fs::write(settings.join(SETTINGS_FILE), body).unwrap();
}

#[test]
fn profile_is_loaded_from_ancestor_settings() {
    let tmp = tempfile::tempdir().unwrap();
    write_settings(
        tmp.path(),
        "profiles:\n  default:\n    rest_url: http://node/\n    faucet_url: http://faucet/\n    private_key: '0x01'\n",
    );
    let cwd = tmp.path().join("sources").join("coin");
    fs::create_dir_all(&cwd).unwrap();

    let settings_root = find_settings_dir(&cwd).expect("settings root");
    let profile = load_profile(&settings_root, "default").unwrap();

    assert_eq!(settings_root, tmp.path().join(SETTINGS_DIR));
    assert_eq!(profile.rest_url, "http://node");
    assert_eq!(profile.faucet_url, "http://faucet");
}

#[test]
fn missing_document_profile_absent_and_profile_empty_are_distinct() {
    let tmp = tempfile::tempdir().unwrap();
    let settings_root = tmp.path().join(SETTINGS_DIR);
    fs::create_dir_all(&settings_root).unwrap();

    let missing = load_profile(&settings_root, "default").unwrap_err();
    assert!(matches!(missing, ConfigError::SettingsUnreadable { ref path, .. } if path == &settings_root.join(SETTINGS_FILE)));

    write_settings(tmp.path(), "profiles:\n  other:\n    rest_url: x\n  default: {}\n");
    let absent = load_profile(&settings_root, "devnet").unwrap_err();
    assert!(matches!(absent, ConfigError::ProfileNotFound(ref name) if name == "devnet"));

    let empty = load_profile(&settings_root, "default").unwrap_err();
    assert!(matches!(empty, ConfigError::ProfileNotFound(ref name) if name == "default"));
}

#[test]
fn unparsable_document_reports_its_path() {
    let tmp = tempfile::tempdir().unwrap();
    write_settings(tmp.path(), "profiles: [oops");
    let settings_root = tmp.path().join(SETTINGS_DIR);

    match load_profile(&settings_root, "default") {
        Err(ConfigError::SettingsUnreadable { path, .. }) => {
            assert_eq!(path, settings_root.join(SETTINGS_FILE));
        }
        other => panic!("expected SettingsUnreadable, got {other:?}"),
    }
}
