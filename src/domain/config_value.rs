// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed configuration values written into a host mapping.
//!
//! INI documents only hold strings. Once a value has been coerced for its key it is
//! stored in the host mapping as a `ConfigValue`, which keeps the resulting type.

use chrono::TimeDelta;
use serde::{Serialize, Serializer};
use std::fmt;

/// A typed value in a host configuration mapping.
///
/// # Examples
///
/// ```
/// use hexini::domain::config_value::ConfigValue;
/// use chrono::TimeDelta;
///
/// let value = ConfigValue::from(true);
/// assert_eq!(value.as_bool(), Some(true));
/// assert_eq!(value.as_str(), None);
///
/// let value = ConfigValue::Duration(TimeDelta::days(100));
/// assert_eq!(value.as_duration().map(|d| d.num_days()), Some(100));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    /// A string, used for every key without a known type.
    String(String),
    /// A boolean flag such as `DEBUG`.
    Boolean(bool),
    /// An integer such as `SEND_FILE_MAX_AGE_DEFAULT`.
    Integer(i64),
    /// A duration such as `PERMANENT_SESSION_LIFETIME`.
    Duration(TimeDelta),
}

impl ConfigValue {
    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is an integer value.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the duration if this is a duration value.
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            ConfigValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns a short name for the kind of value held.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Duration(_) => "duration",
        }
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(i: i64) -> Self {
        ConfigValue::Integer(i)
    }
}

impl From<TimeDelta> for ConfigValue {
    fn from(d: TimeDelta) -> Self {
        ConfigValue::Duration(d)
    }
}

// Durations serialize as whole seconds.
impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::Boolean(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(i) => serializer.serialize_i64(*i),
            ConfigValue::Duration(d) => serializer.serialize_i64(d.num_seconds()),
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
            ConfigValue::Integer(i) => write!(f, "{}", i),
            ConfigValue::Duration(d) => write!(f, "{} days", d.num_days()),
        }
    }
}
