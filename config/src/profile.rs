//! Profile settings document.
//!
//! The settings root holds a YAML document shaped like
//!
//! ```yaml
//! profiles:
//!   default:
//!     private_key: "0x…"
//!     rest_url: "https://node.example/v1"
//!     faucet_url: "https://faucet.example"
//! ```
//!
//! Only the three fields the console needs are read; everything else in a
//! profile is ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::locator::SETTINGS_FILE;
use crate::ConfigError;

/// Profile used when none is named.
pub const DEFAULT_PROFILE: &str = "default";

/// Private key text exactly as it appears in the settings document.
///
/// Decoding is left to the signing layer. The text is redacted from
/// `Debug` output and wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeyText(String);

impl PrivateKeyText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKeyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKeyText(<redacted>)")
    }
}

/// Endpoints and root key material of a single profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
    pub name: String,
    /// Ledger REST endpoint, without trailing `/`.
    pub rest_url: String,
    /// Faucet endpoint, without trailing `/`.
    pub faucet_url: String,
    pub private_key: PrivateKeyText,
}

#[derive(Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    profiles: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Deserialize)]
struct RawProfile {
    rest_url: Option<String>,
    faucet_url: Option<String>,
    private_key: Option<String>,
}

/// Read `<settings_root>/config.yaml` and extract `profile_name`.
///
/// A missing or unparsable document is [`ConfigError::SettingsUnreadable`];
/// an absent, null or empty profile is [`ConfigError::ProfileNotFound`].
pub fn load_profile(settings_root: &Path, profile_name: &str) -> Result<ProfileConfig, ConfigError> {
    let path = settings_root.join(SETTINGS_FILE);
    let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::SettingsUnreadable {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), profile = profile_name, "loading profile");
    parse_profile(&text, profile_name).map_err(|err| match err {
        ConfigError::SettingsUnreadable { reason, .. } => {
            ConfigError::SettingsUnreadable { path, reason }
        }
        other => other,
    })
}

/// Extract `profile_name` from settings document text.
pub fn parse_profile(text: &str, profile_name: &str) -> Result<ProfileConfig, ConfigError> {
    let unreadable = |reason: String| ConfigError::SettingsUnreadable {
        path: SETTINGS_FILE.into(),
        reason,
    };

    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| unreadable(e.to_string()))?;
    if value.is_null() {
        return Err(ConfigError::ProfileNotFound(profile_name.to_string()));
    }
    let document: SettingsDocument =
        serde_yaml::from_value(value).map_err(|e| unreadable(e.to_string()))?;

    let raw = match document.profiles.get(profile_name) {
        None | Some(serde_yaml::Value::Null) => {
            return Err(ConfigError::ProfileNotFound(profile_name.to_string()))
        }
        Some(serde_yaml::Value::Mapping(map)) if map.is_empty() => {
            return Err(ConfigError::ProfileNotFound(profile_name.to_string()))
        }
        Some(value) => serde_yaml::from_value::<RawProfile>(value.clone()).map_err(|e| {
            ConfigError::InvalidProfile {
                profile: profile_name.to_string(),
                reason: e.to_string(),
            }
        })?,
    };

    let required = |field: &'static str, value: Option<String>| {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                profile: profile_name.to_string(),
                field,
            })
    };

    let rest_url = required("rest_url", raw.rest_url)?;
    let faucet_url = required("faucet_url", raw.faucet_url)?;
    let private_key = required("private_key", raw.private_key)?;

    Ok(ProfileConfig {
        name: profile_name.to_string(),
        rest_url: rest_url.trim_end_matches('/').to_string(),
        faucet_url: faucet_url.trim_end_matches('/').to_string(),
        private_key: PrivateKeyText::new(private_key),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
profiles:
  default:
    private_key: "0x1111111111111111111111111111111111111111111111111111111111111111"
    public_key: "0xabc"
    account: "0xdef"
    rest_url: "http://node/"
    faucet_url: "http://faucet//"
  empty: {}
  nulled:
  partial:
    rest_url: "http://node"
    private_key: "0x11"
"#;

    #[test]
    fn strips_trailing_separators() {
        let profile = parse_profile(DOC, "default").unwrap();
        assert_eq!(profile.rest_url, "http://node");
        assert_eq!(profile.faucet_url, "http://faucet");
        assert_eq!(profile.name, "default");
    }

    #[test]
    fn private_key_passes_through_untouched() {
        let profile = parse_profile(DOC, "default").unwrap();
        assert_eq!(
            profile.private_key.expose(),
            "0x1111111111111111111111111111111111111111111111111111111111111111"
        );
    }

    #[test]
    fn absent_profile_is_not_found() {
        assert!(matches!(
            parse_profile(DOC, "testnet"),
            Err(ConfigError::ProfileNotFound(name)) if name == "testnet"
        ));
    }

    #[test]
    fn empty_and_null_profiles_are_not_found() {
        assert!(matches!(parse_profile(DOC, "empty"), Err(ConfigError::ProfileNotFound(_))));
        assert!(matches!(parse_profile(DOC, "nulled"), Err(ConfigError::ProfileNotFound(_))));
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        assert!(matches!(
            parse_profile(DOC, "partial"),
            Err(ConfigError::MissingField { field: "faucet_url", .. })
        ));
    }

    #[test]
    fn empty_document_has_no_profiles() {
        assert!(matches!(parse_profile("", "default"), Err(ConfigError::ProfileNotFound(_))));
        assert!(matches!(
            parse_profile("profiles: {}", "default"),
            Err(ConfigError::ProfileNotFound(_))
        ));
    }

    #[test]
    fn garbage_is_unreadable() {
        assert!(matches!(
            parse_profile("profiles: [unclosed", "default"),
            Err(ConfigError::SettingsUnreadable { .. })
        ));
        assert!(matches!(
            parse_profile("- just\n- a list\n", "default"),
            Err(ConfigError::SettingsUnreadable { .. })
        ));
    }

    #[test]
    fn non_mapping_profile_is_invalid() {
        assert!(matches!(
            parse_profile("profiles:\n  default: 42\n", "default"),
            Err(ConfigError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn debug_output_hides_key() {
        let profile = parse_profile(DOC, "default").unwrap();
        let debug = format!("{profile:?}");
        assert!(!debug.contains("1111"));
        assert!(debug.contains("redacted"));
    }
}
