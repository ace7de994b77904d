// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory web application host.
//!
//! `Application` owns an [`AppConfig`] mapping. It only accepts mirrored configuration
//! through an [`AppContext`], a guard returned by [`Application::app_context`] that
//! keeps the application mutably borrowed while it is alive.

use crate::domain::{ConfigKey, ConfigValue};
use crate::ports::ConfigHost;
use chrono::TimeDelta;
use serde::Serialize;
use std::collections::BTreeMap;

/// Session lifetime used when `PERMANENT_SESSION_LIFETIME` is not configured.
pub const DEFAULT_SESSION_LIFETIME_DAYS: i64 = 31;

/// A host configuration mapping keyed by upper-case names.
///
/// # Examples
///
/// ```
/// use hexini::adapters::AppConfig;
/// use hexini::domain::ConfigValue;
///
/// let mut config = AppConfig::new();
/// config.insert("debug", ConfigValue::from(true));
/// assert_eq!(config.get_bool("DEBUG"), Some(true));
/// assert!(config.contains_key("Debug"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AppConfig {
    values: BTreeMap<ConfigKey, ConfigValue>,
}

impl AppConfig {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<ConfigKey>, value: ConfigValue) -> Option<ConfigValue> {
        self.values.insert(key.into(), value)
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: impl Into<ConfigKey>) -> Option<&ConfigValue> {
        self.values.get(&key.into())
    }

    /// Returns the value for `key` if it is a string.
    pub fn get_str(&self, key: impl Into<ConfigKey>) -> Option<&str> {
        self.get(key).and_then(ConfigValue::as_str)
    }

    /// Returns the value for `key` if it is a boolean.
    pub fn get_bool(&self, key: impl Into<ConfigKey>) -> Option<bool> {
        self.get(key).and_then(ConfigValue::as_bool)
    }

    /// Returns the value for `key` if it is an integer.
    pub fn get_i64(&self, key: impl Into<ConfigKey>) -> Option<i64> {
        self.get(key).and_then(ConfigValue::as_i64)
    }

    /// Returns the value for `key` if it is a duration.
    pub fn get_duration(&self, key: impl Into<ConfigKey>) -> Option<TimeDelta> {
        self.get(key).and_then(ConfigValue::as_duration)
    }

    /// Returns `true` if `key` is set.
    pub fn contains_key(&self, key: impl Into<ConfigKey>) -> bool {
        self.values.contains_key(&key.into())
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &ConfigValue)> {
        self.values.iter()
    }

    /// Number of keys set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no key is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A web application owning its configuration mapping.
///
/// The application itself reports no active context, so loading configuration
/// directly into it fails; push a context with [`app_context`](Self::app_context)
/// first.
///
/// # Examples
///
/// ```
/// use hexini::adapters::Application;
/// use hexini::service::IniConfigLoader;
///
/// # fn main() -> hexini::domain::Result<()> {
/// let mut app = Application::new("webapp");
/// let mut loader = IniConfigLoader::new();
///
/// // No context: rejected
/// assert!(loader.read_str(&mut app, "[flask]\ndebug = true").is_err());
///
/// loader.read_str(&mut app.app_context(), "[flask]\ndebug = true")?;
/// assert!(app.debug());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Application {
    name: String,
    config: AppConfig,
}

impl Application {
    /// Creates an application with an empty configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: AppConfig::new(),
        }
    }

    /// Returns the application name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration mapping.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the configuration mapping for direct mutation.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Pushes an application context; it is popped when the guard drops.
    pub fn app_context(&mut self) -> AppContext<'_> {
        tracing::trace!("Pushed application context for '{}'", self.name);
        AppContext { app: self }
    }

    /// `DEBUG`, or `false` when unset.
    pub fn debug(&self) -> bool {
        self.config.get_bool("DEBUG").unwrap_or(false)
    }

    /// `SECRET_KEY`, if set.
    pub fn secret_key(&self) -> Option<&str> {
        self.config.get_str("SECRET_KEY")
    }

    /// `SERVER_NAME`, if set.
    pub fn server_name(&self) -> Option<&str> {
        self.config.get_str("SERVER_NAME")
    }

    /// `PERMANENT_SESSION_LIFETIME`, or 31 days when unset.
    pub fn permanent_session_lifetime(&self) -> TimeDelta {
        self.config
            .get_duration("PERMANENT_SESSION_LIFETIME")
            .unwrap_or_else(|| TimeDelta::days(DEFAULT_SESSION_LIFETIME_DAYS))
    }
}

impl ConfigHost for Application {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_active_context(&self) -> bool {
        false
    }

    fn set_config(&mut self, key: ConfigKey, value: ConfigValue) {
        self.config.insert(key, value);
    }
}

/// An active application context.
#[derive(Debug)]
pub struct AppContext<'a> {
    app: &'a mut Application,
}

impl AppContext<'_> {
    /// Returns the application this context belongs to.
    pub fn app(&self) -> &Application {
        &*self.app
    }
}

impl ConfigHost for AppContext<'_> {
    fn name(&self) -> &str {
        &self.app.name
    }

    fn has_active_context(&self) -> bool {
        true
    }

    fn set_config(&mut self, key: ConfigKey, value: ConfigValue) {
        self.app.config.insert(key, value);
    }
}

impl Drop for AppContext<'_> {
    fn drop(&mut self) {
        tracing::trace!("Popped application context for '{}'", self.app.name);
    }
}
