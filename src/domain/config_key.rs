// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host configuration key newtype.
//!
//! This module provides the `ConfigKey` type. Host configuration mappings are keyed by
//! upper-case names (`SECRET_KEY`, `DEBUG`), while INI option names are lower-cased by
//! the document. `ConfigKey` performs that conversion once, at construction.

use serde::Serialize;
use std::fmt;

/// An upper-cased key in a host configuration mapping.
///
/// Every constructor upper-cases its input, so keys compare equal regardless of the
/// case they were written in.
///
/// # Examples
///
/// ```
/// use hexini::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("secret_key");
/// assert_eq!(key.as_str(), "SECRET_KEY");
/// assert_eq!(key, ConfigKey::from("Secret_Key"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey`, upper-casing the given name.
    pub fn new(key: impl AsRef<str>) -> Self {
        ConfigKey(key.as_ref().to_uppercase())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey::new(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey::new(s)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
