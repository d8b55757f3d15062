use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings document {}: {reason}", path.display())]
    SettingsUnreadable { path: PathBuf, reason: String },

    #[error("profile '{0}' does not exist or is empty")]
    ProfileNotFound(String),

    #[error("profile '{profile}' has no {field}")]
    MissingField {
        profile: String,
        field: &'static str,
    },

    #[error("profile '{profile}' is malformed: {reason}")]
    InvalidProfile { profile: String, reason: String },

    #[error("invalid console config {}: {reason}", path.display())]
    ConsoleConfig { path: PathBuf, reason: String },
}
