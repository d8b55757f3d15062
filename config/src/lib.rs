//! Configuration for the moo console.
//!
//! - [`locator`]: ascending directory search for anchor files and directories
//! - [`profile`]: the multi-profile settings document (`config.yaml`)
//! - [`console`]: console tuning knobs (`moo.toml`)

pub mod console;
pub mod error;
pub mod locator;
pub mod profile;

pub use console::ConsoleConfig;
pub use error::ConfigError;
pub use locator::{
    find_console_config, find_move_package, find_settings_dir, find_upward, CONSOLE_CONFIG_FILE,
    MOVE_MANIFEST, SETTINGS_DIR, SETTINGS_FILE,
};
pub use profile::{load_profile, parse_profile, PrivateKeyText, ProfileConfig, DEFAULT_PROFILE};
