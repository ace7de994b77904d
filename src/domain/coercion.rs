// SPDX-License-Identifier: MIT OR Apache-2.0

//! Known-key type coercion.
//!
//! A `CoercionTable` maps upper-cased host keys to the type their raw INI string is
//! converted into before being written to the host mapping. Keys absent from the
//! table are passed through as strings.

use crate::domain::errors::{IniError, Result};
use crate::domain::{ConfigKey, ConfigValue};
use chrono::TimeDelta;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// The conversion applied to a raw value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coercion {
    /// Keep the string unchanged.
    String,
    /// Parse a boolean token (`1 yes true on` / `0 no false off`).
    Boolean,
    /// Parse a base-10 integer.
    Integer,
    /// Parse a base-10 integer number of days into a duration.
    Days,
}

/// A day count that does not fit a `TimeDelta`.
#[derive(Debug, Error)]
#[error("{days} days is outside the representable duration range")]
pub struct DurationRangeError {
    days: i64,
}

/// Parses a boolean token, case-insensitively.
///
/// Accepts the same tokens as INI boolean options everywhere in this crate.
pub fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => raw
            .parse::<bool>()
            .map_err(|e| IniError::from_parse_bool_error(key.to_string(), e)),
    }
}

/// Parses a base-10 integer.
pub fn parse_int(key: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|e| IniError::from_parse_int_error(key.to_string(), e))
}

impl Coercion {
    /// Converts `raw` into a `ConfigValue` for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexini::domain::{Coercion, ConfigKey, ConfigValue};
    ///
    /// let key = ConfigKey::from("debug");
    /// assert_eq!(Coercion::Boolean.apply(&key, "yes").unwrap(), ConfigValue::Boolean(true));
    /// assert!(Coercion::Integer.apply(&key, "lots").is_err());
    /// ```
    pub fn apply(self, key: &ConfigKey, raw: &str) -> Result<ConfigValue> {
        match self {
            Coercion::String => Ok(ConfigValue::String(raw.to_string())),
            Coercion::Boolean => parse_bool(key.as_str(), raw).map(ConfigValue::Boolean),
            Coercion::Integer => parse_int(key.as_str(), raw).map(ConfigValue::Integer),
            Coercion::Days => {
                let days = parse_int(key.as_str(), raw)?;
                TimeDelta::try_days(days)
                    .map(ConfigValue::Duration)
                    .ok_or_else(|| IniError::TypeConversionError {
                        key: key.to_string(),
                        target_type: "duration".to_string(),
                        source: Box::new(DurationRangeError { days }),
                    })
            }
        }
    }
}

/// Flask's built-in configuration keys that are not plain strings.
static FLASK_COERCIONS: Lazy<HashMap<&'static str, Coercion>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for key in [
        "DEBUG",
        "TESTING",
        "PROPAGATE_EXCEPTIONS",
        "PRESERVE_CONTEXT_ON_EXCEPTION",
        "SESSION_COOKIE_HTTPONLY",
        "SESSION_COOKIE_SECURE",
        "SESSION_REFRESH_EACH_REQUEST",
        "USE_X_SENDFILE",
        "TRAP_HTTP_EXCEPTIONS",
        "TRAP_BAD_REQUEST_ERRORS",
        "EXPLAIN_TEMPLATE_LOADING",
        "TEMPLATES_AUTO_RELOAD",
        "JSON_AS_ASCII",
        "JSON_SORT_KEYS",
        "JSONIFY_PRETTYPRINT_REGULAR",
    ] {
        map.insert(key, Coercion::Boolean);
    }
    map.insert("MAX_CONTENT_LENGTH", Coercion::Integer);
    map.insert("SEND_FILE_MAX_AGE_DEFAULT", Coercion::Integer);
    map.insert("PERMANENT_SESSION_LIFETIME", Coercion::Days);
    map
});

/// Lookup from upper-cased key to `Coercion`.
///
/// Lookups are total: keys without an entry coerce as `Coercion::String`.
///
/// # Examples
///
/// ```
/// use hexini::domain::{Coercion, CoercionTable, ConfigValue};
///
/// let table = CoercionTable::flask().with("workers", Coercion::Integer);
/// let (key, value) = table.coerce("workers", "4").unwrap();
/// assert_eq!(key.as_str(), "WORKERS");
/// assert_eq!(value, ConfigValue::Integer(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CoercionTable {
    kinds: HashMap<ConfigKey, Coercion>,
}

impl CoercionTable {
    /// Creates a table with no typed keys; every value stays a string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a table holding Flask's built-in typed keys.
    pub fn flask() -> Self {
        Self {
            kinds: FLASK_COERCIONS
                .iter()
                .map(|(key, kind)| (ConfigKey::from(*key), *kind))
                .collect(),
        }
    }

    /// Adds or replaces the coercion for `key`.
    pub fn with(mut self, key: impl Into<ConfigKey>, kind: Coercion) -> Self {
        self.insert(key, kind);
        self
    }

    /// Adds or replaces the coercion for `key` in place.
    pub fn insert(&mut self, key: impl Into<ConfigKey>, kind: Coercion) {
        self.kinds.insert(key.into(), kind);
    }

    /// Returns the coercion for `key`.
    pub fn kind_for(&self, key: &ConfigKey) -> Coercion {
        self.kinds.get(key).copied().unwrap_or(Coercion::String)
    }

    /// Upper-cases `option` and coerces `raw` for the resulting key.
    pub fn coerce(&self, option: &str, raw: &str) -> Result<(ConfigKey, ConfigValue)> {
        let key = ConfigKey::from(option);
        let value = self.kind_for(&key).apply(&key, raw)?;
        Ok((key, value))
    }

    /// Number of typed keys in the table.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` when no key is typed.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_true_variants() {
        for val in ["true", "True", "TRUE", "yes", "Yes", "1", "on", "ON"] {
            assert!(parse_bool("k", val).unwrap(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_bool_false_variants() {
        for val in ["false", "False", "no", "NO", "0", "off", "Off"] {
            assert!(!parse_bool("k", val).unwrap(), "Failed for value: {}", val);
        }
    }

    #[test]
    fn test_bool_invalid() {
        let err = parse_bool("DEBUG", "maybe").unwrap_err();
        assert!(matches!(err, IniError::TypeConversionError { .. }));
        assert!(err.to_string().contains("DEBUG"));
    }

    #[test]
    fn test_int_invalid() {
        assert!(parse_int("k", "3.5").is_err());
        assert!(parse_int("k", "").is_err());
        assert_eq!(parse_int("k", "-12").unwrap(), -12);
    }

    #[test]
    fn test_flask_table_kinds() {
        let table = CoercionTable::flask();
        assert_eq!(table.kind_for(&"debug".into()), Coercion::Boolean);
        assert_eq!(
            table.kind_for(&"send_file_max_age_default".into()),
            Coercion::Integer
        );
        assert_eq!(
            table.kind_for(&"PERMANENT_SESSION_LIFETIME".into()),
            Coercion::Days
        );
        assert_eq!(table.kind_for(&"secret_key".into()), Coercion::String);
        assert_eq!(table.kind_for(&"anything_else".into()), Coercion::String);
        assert_eq!(table.len(), 18);
    }

    #[test]
    fn test_coerce_upper_cases_key() {
        let table = CoercionTable::flask();
        let (key, value) = table.coerce("Debug", "true").unwrap();
        assert_eq!(key.as_str(), "DEBUG");
        assert_eq!(value, ConfigValue::Boolean(true));
    }

    #[test]
    fn test_coerce_days() {
        let table = CoercionTable::flask();
        let (_, value) = table.coerce("permanent_session_lifetime", "100").unwrap();
        assert_eq!(value, ConfigValue::Duration(TimeDelta::days(100)));
    }

    #[test]
    fn test_coerce_days_invalid() {
        let table = CoercionTable::flask();
        assert!(table.coerce("permanent_session_lifetime", "soon").is_err());

        let err = table
            .coerce("permanent_session_lifetime", &i64::MAX.to_string())
            .unwrap_err();
        assert!(err.to_string().contains("duration"));
    }

    #[test]
    fn test_coerce_string_untouched() {
        let table = CoercionTable::flask();
        let (_, value) = table
            .coerce("some_other_flask_var", "something with multiple words")
            .unwrap();
        assert_eq!(value, ConfigValue::from("something with multiple words"));
    }

    #[test]
    fn test_override_coercion() {
        let table = CoercionTable::flask().with("debug", Coercion::String);
        let (_, value) = table.coerce("debug", "true").unwrap();
        assert_eq!(value, ConfigValue::from("true"));
    }

    #[test]
    fn test_empty_table() {
        let table = CoercionTable::empty();
        assert!(table.is_empty());
        let (_, value) = table.coerce("debug", "true").unwrap();
        assert_eq!(value, ConfigValue::from("true"));
    }
}
