// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

use hexini::domain::{ConfigKey, ConfigValue};
use hexini::ports::ConfigHost;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// The two-section document most tests read.
#[allow(dead_code)]
pub const BASIC_INI: &str = "
[flask]
; should be a string
secret_key                 : 12345678
debug                      : true
permanent_session_lifetime : 100
server_name                = testserv
send_file_max_age_default  : 3600
some_other_flask_var       : something with multiple words

[wibble]
wobble : woo
warble = 123

[foo bar]
bar : http://baz/qux
interp : %(bar)s/hi
";

/// A host that records every write, in order.
///
/// Its context can be toggled to exercise the unbound path.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub active: bool,
    pub writes: Vec<(ConfigKey, ConfigValue)>,
}

#[allow(dead_code)]
impl RecordingHost {
    /// Creates a host with an active context.
    pub fn active() -> Self {
        Self {
            active: true,
            writes: Vec::new(),
        }
    }

    /// Creates a host without an active context.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Returns the final state of the mapping.
    pub fn mapping(&self) -> BTreeMap<ConfigKey, ConfigValue> {
        self.writes.iter().cloned().collect()
    }
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

/// Writes `content` to a temporary `.ini` file.
#[allow(dead_code)]
pub fn write_temp_ini(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".ini")
        .tempfile()
        .expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// Returns the path of a file under `tests/fixtures`.
#[allow(dead_code)]
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
