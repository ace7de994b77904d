// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI file adapter.
//!
//! This module provides the `rust-ini` backed [`DocumentParser`] and the helpers the
//! loader uses to locate and read INI files from disk.

use crate::domain::{IniDocument, IniError, Result};
use crate::ports::DocumentParser;
use ini::{Ini, ParseOption};
use std::fs;
use std::path::Path;

/// Maximum allowed file size for INI configuration files (10MB)
pub const MAX_INI_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// INI parser implementation.
///
/// Accepts `[section]` headers, `key = value` and `key: value` lines, full-line `;`
/// and `#` comments, and indented continuation lines. Quotes and backslashes are
/// kept verbatim, and `%(name)s` placeholders are left for the document to resolve.
///
/// # Examples
///
/// ```rust
/// use hexini::adapters::IniParser;
/// use hexini::ports::DocumentParser;
///
/// let parser = IniParser::new();
/// let doc = parser.parse("[flask]\ndebug: true\nserver_name = testserv").unwrap();
/// assert_eq!(doc.get("flask", "debug").unwrap(), "true");
/// assert_eq!(doc.get("flask", "server_name").unwrap(), "testserv");
/// ```
#[derive(Debug, Clone, Default)]
pub struct IniParser;

impl IniParser {
    /// Creates a new INI parser.
    pub fn new() -> Self {
        IniParser
    }

    fn options() -> ParseOption {
        ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            enabled_indented_mutiline_value: true,
            ..ParseOption::default()
        }
    }

    /// Moves indented `;` and `#` lines to column zero.
    ///
    /// The grammar only recognises comments at the start of a line; an indented one
    /// would otherwise continue the previous value or start a key. Line numbers in
    /// parse errors stay unchanged.
    fn unindent_comments(content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        for line in content.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with(';') || trimmed.starts_with('#') {
                out.push_str(trimmed);
            } else {
                out.push_str(line);
            }
            out.push('\n');
        }
        out
    }
}

fn missing_separator(section: &str, key: &str) -> IniError {
    let line = key.lines().next().unwrap_or(key).trim();
    IniError::ParseError {
        message: format!(
            "line '{}' in section '{}' has no '=' or ':' separator",
            line, section
        ),
        source: None,
    }
}

impl DocumentParser for IniParser {
    fn parse_into(&self, content: &str, document: &mut IniDocument) -> Result<()> {
        let content = Self::unindent_comments(content);
        let ini = Ini::load_from_str_opt(&content, Self::options()).map_err(|e| {
            IniError::ParseError {
                message: format!("Failed to parse INI: {}", e),
                source: Some(Box::new(e)),
            }
        })?;

        for (section, properties) in ini.iter() {
            let Some(section) = section else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(IniError::ParseError {
                        message: format!("option '{}' appears before any section header", key),
                        source: None,
                    });
                }
                continue;
            };

            document.touch_section(section);
            for (key, value) in properties.iter() {
                if key.contains(['\n', '\r']) {
                    return Err(missing_separator(section, key));
                }
                document.insert(section, key, value);
            }
            tracing::debug!(
                "Parsed section '{}' with {} option(s)",
                section,
                properties.len()
            );
        }
        Ok(())
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ini", "cfg", "conf"]
    }
}

/// Reads an INI file into a string.
///
/// Fails with `FileNotReadable` when the file cannot be opened or read, and with
/// `FileTooLarge` when it exceeds [`MAX_INI_FILE_SIZE`].
pub fn read_file(path: &Path) -> Result<String> {
    let not_readable = |source: std::io::Error| IniError::FileNotReadable {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(not_readable)?;
    if metadata.len() > MAX_INI_FILE_SIZE {
        return Err(IniError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: MAX_INI_FILE_SIZE,
        });
    }

    fs::read_to_string(path).map_err(not_readable)
}

/// Returns `<config dir>/config.ini` for the application, as resolved by the
/// `directories` crate, or `None` when no home directory can be determined.
#[cfg(feature = "dirs")]
pub fn default_location(app_name: &str, qualifier: &str) -> Option<std::path::PathBuf> {
    default_location_with_filename(app_name, qualifier, "config.ini")
}

/// Returns `<config dir>/<filename>` for the application.
#[cfg(feature = "dirs")]
pub fn default_location_with_filename(
    app_name: &str,
    qualifier: &str,
    filename: &str,
) -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from(qualifier, "", app_name)
        .map(|dirs| dirs.config_dir().join(filename))
}
