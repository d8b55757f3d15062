//! Ascending directory search.
//!
//! Every lookup starts at a directory, checks `dir/name`, then repeats for
//! each ancestor until the filesystem root. The first existing path wins,
//! so the nearest anchor always shadows anchors further out.

use std::path::{Path, PathBuf};

/// Directory holding profile settings and generated key files.
pub const SETTINGS_DIR: &str = ".aptos";
/// Settings document inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "config.yaml";
/// Manifest marking the root of a Move package.
pub const MOVE_MANIFEST: &str = "Move.toml";
/// Optional console settings file.
pub const CONSOLE_CONFIG_FILE: &str = "moo.toml";

/// Find `name` in `start` or the closest ancestor that contains it.
///
/// Returns `None` when no directory up to the filesystem root has it.
/// Pure lookup: nothing is created or cached.
pub fn find_upward(start: &Path, name: impl AsRef<Path>) -> Option<PathBuf> {
    find_upward_where(start, name.as_ref(), |candidate| candidate.exists())
}

fn find_upward_where(
    start: &Path,
    name: &Path,
    accept: impl Fn(&Path) -> bool,
) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(name))
        .find(|candidate| accept(candidate))
}

/// Locate the settings root (the nearest `.aptos` directory).
///
/// A plain file named `.aptos` is not a settings root and does not stop
/// the search.
pub fn find_settings_dir(start: &Path) -> Option<PathBuf> {
    find_upward_where(start, Path::new(SETTINGS_DIR), Path::is_dir)
}

/// Locate the nearest `Move.toml`, returning the manifest path.
pub fn find_move_package(start: &Path) -> Option<PathBuf> {
    find_upward(start, MOVE_MANIFEST)
}

/// Locate the nearest `moo.toml`.
pub fn find_console_config(start: &Path) -> Option<PathBuf> {
    find_upward(start, CONSOLE_CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn nested(root: &Path, depth: usize) -> PathBuf {
        (1..=depth).fold(root.to_path_buf(), |dir, level| dir.join(format!("d{level}")))
    }

    #[test]
    fn finds_anchor_in_start_dir() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("Move.toml"), "").unwrap();
        assert_eq!(
            find_move_package(tmp.path()),
            Some(tmp.path().join("Move.toml"))
        );
    }

    #[test]
    fn nearest_ancestor_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let depth2 = nested(tmp.path(), 2);
        let depth5 = nested(tmp.path(), 5);
        let depth6 = nested(tmp.path(), 6);
        fs::create_dir_all(&depth6).unwrap();
        fs::create_dir(depth2.join(".anchor")).unwrap();
        fs::create_dir(depth5.join(".anchor")).unwrap();

        assert_eq!(find_upward(&depth6, ".anchor"), Some(depth5.join(".anchor")));
    }

    #[test]
    fn missing_anchor_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = nested(tmp.path(), 3);
        fs::create_dir_all(&deep).unwrap();
        assert_eq!(find_upward(&deep, "definitely-not-here-7f3a.marker"), None);
    }

    #[test]
    fn repeated_lookups_agree() {
        let tmp = tempfile::tempdir().unwrap();
        let deep = nested(tmp.path(), 4);
        fs::create_dir_all(&deep).unwrap();
        fs::create_dir(tmp.path().join(".aptos")).unwrap();

        let first = find_settings_dir(&deep);
        let second = find_settings_dir(&deep);
        assert_eq!(first, Some(tmp.path().join(".aptos")));
        assert_eq!(first, second);
    }

    #[test]
    fn settings_search_skips_plain_files() {
        let tmp = tempfile::tempdir().unwrap();
        let inner = tmp.path().join("inner");
        fs::create_dir_all(inner.join(".aptos")).unwrap();

        let project = inner.join("project");
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join(".aptos"), "not a directory").unwrap();

        assert_eq!(find_settings_dir(&project), Some(inner.join(".aptos")));
    }
}
