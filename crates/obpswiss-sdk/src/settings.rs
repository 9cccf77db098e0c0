//! Settings provider contract
//!
//! The request core only needs to read the access token. Storage is owned by
//! the caller: the CLI keeps a JSON file, tests use [`MemorySettings`].

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io;
use std::str::FromStr;

/// Recognized setting names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    AccessToken,
    ConsentId,
}

impl SettingKey {
    pub const ALL: [SettingKey; 2] = [SettingKey::AccessToken, SettingKey::ConsentId];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "accessToken",
            Self::ConsentId => "consentId",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accessToken" | "access-token" | "token" => Ok(Self::AccessToken),
            "consentId" | "consent-id" => Ok(Self::ConsentId),
            other => Err(format!("unknown setting: {}", other)),
        }
    }
}

/// Named string settings store
///
/// Implementations must not cache: every `get` reflects the latest `set`,
/// including writes made by another process.
pub trait SettingsProvider: Send + Sync {
    /// Current value, `""` when unset
    fn get(&self, key: SettingKey) -> String;

    fn set(&self, key: SettingKey, value: &str) -> io::Result<()>;

    /// Remove every stored value
    fn clear(&self) -> io::Result<()>;

    /// True when the key holds a non-empty value
    fn has(&self, key: SettingKey) -> bool {
        !self.get(key).is_empty()
    }

    /// Whether an access token is configured
    fn has_token(&self) -> bool {
        self.has(SettingKey::AccessToken)
    }

    /// Snapshot of all recognized keys
    fn all(&self) -> BTreeMap<SettingKey, String> {
        SettingKey::ALL.iter().map(|k| (*k, self.get(*k))).collect()
    }
}

/// In-memory settings
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<SettingKey, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings holding the given access token
    pub fn with_token(token: impl Into<String>) -> Self {
        let settings = Self::new();
        settings
            .values
            .write()
            .insert(SettingKey::AccessToken, token.into());
        settings
    }
}

impl SettingsProvider for MemorySettings {
    fn get(&self, key: SettingKey) -> String {
        self.values.read().get(&key).cloned().unwrap_or_default()
    }

    fn set(&self, key: SettingKey, value: &str) -> io::Result<()> {
        self.values.write().insert(key, value.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        self.values.write().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_empty() {
        let settings = MemorySettings::new();
        assert_eq!(settings.get(SettingKey::AccessToken), "");
        assert_eq!(settings.get(SettingKey::ConsentId), "");
        assert!(!settings.has_token());
    }

    #[test]
    fn test_set_get_clear() {
        let settings = MemorySettings::new();
        settings.set(SettingKey::AccessToken, "tok").unwrap();
        settings.set(SettingKey::ConsentId, "c1").unwrap();
        assert!(settings.has_token());
        assert_eq!(settings.get(SettingKey::ConsentId), "c1");

        settings.clear().unwrap();
        assert!(!settings.has_token());
        assert!(!settings.has(SettingKey::ConsentId));
    }

    #[test]
    fn test_empty_token_is_absent() {
        let settings = MemorySettings::with_token("");
        assert!(!settings.has_token());
    }

    #[test]
    fn test_key_names() {
        assert_eq!("accessToken".parse::<SettingKey>().unwrap(), SettingKey::AccessToken);
        assert_eq!("consent-id".parse::<SettingKey>().unwrap(), SettingKey::ConsentId);
        assert!("password".parse::<SettingKey>().is_err());
        assert_eq!(SettingKey::ConsentId.to_string(), "consentId");
    }

    #[test]
    fn test_all_lists_every_key() {
        let settings = MemorySettings::with_token("abc");
        let all = settings.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[&SettingKey::AccessToken], "abc");
        assert_eq!(all[&SettingKey::ConsentId], "");
    }
}
