// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration host trait definition.
//!
//! A host is the application whose configuration mapping receives mirrored options.
//! The loader never owns the mapping; it is handed a `&mut` host for the duration
//! of a read and writes through this trait.

use crate::domain::{ConfigKey, ConfigValue};

/// The application side of mirroring.
///
/// A host may only be written to while it has an active application context. The
/// loader checks [`has_active_context`](ConfigHost::has_active_context) before it
/// reads anything and fails with `UnboundContext` when it returns `false`.
///
/// # Examples
///
/// ```rust
/// use hexini::domain::{ConfigKey, ConfigValue};
/// use hexini::ports::ConfigHost;
/// use std::collections::BTreeMap;
///
/// struct MapHost(BTreeMap<ConfigKey, ConfigValue>);
///
/// impl ConfigHost for MapHost {
///     fn name(&self) -> &str {
///         "map"
///     }
///
///     fn has_active_context(&self) -> bool {
///         true
///     }
///
///     fn set_config(&mut self, key: ConfigKey, value: ConfigValue) {
///         self.0.insert(key, value);
///     }
/// }
///
/// let mut host = MapHost(BTreeMap::new());
/// host.set_config(ConfigKey::from("debug"), ConfigValue::from(true));
/// assert_eq!(host.0[&ConfigKey::from("DEBUG")], ConfigValue::Boolean(true));
/// ```
pub trait ConfigHost {
    /// Returns the name of the host, used in logs and errors.
    fn name(&self) -> &str;

    /// Returns `true` while the host's configuration may be mutated.
    fn has_active_context(&self) -> bool;

    /// Assigns `value` to `key` in the host's configuration mapping.
    fn set_config(&mut self, key: ConfigKey, value: ConfigValue);
}

impl<H: ConfigHost + ?Sized> ConfigHost for &mut H {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn has_active_context(&self) -> bool {
        (**self).has_active_context()
    }

    fn set_config(&mut self, key: ConfigKey, value: ConfigValue) {
        (**self).set_config(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingHost {
        active: bool,
        writes: Vec<(ConfigKey, ConfigValue)>,
    }

    impl ConfigHost for RecordingHost {
        fn name(&self) -> &str {
            "recording"
        }

        fn has_active_context(&self) -> bool {
            self.active
        }

        fn set_config(&mut self, key: ConfigKey, value: ConfigValue) {
            self.writes.push((key, value));
        }
    }

    fn write_through<H: ConfigHost>(mut host: H) {
        host.set_config(ConfigKey::from("testing"), ConfigValue::from(false));
    }

    #[test]
    fn test_host_records_writes() {
        let mut host = RecordingHost {
            active: true,
            writes: Vec::new(),
        };
        host.set_config(ConfigKey::from("secret_key"), ConfigValue::from("abc"));
        assert_eq!(host.writes.len(), 1);
        assert_eq!(host.writes[0].0.as_str(), "SECRET_KEY");
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut host = RecordingHost {
            active: false,
            writes: Vec::new(),
        };
        assert!(!(&mut host).has_active_context());
        assert_eq!((&mut host).name(), "recording");
        write_through(&mut host);
        assert_eq!(host.writes[0].1, ConfigValue::Boolean(false));
    }
}
