// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document parser trait definition.
//!
//! This module defines the `DocumentParser` trait, which turns INI text into an
//! [`IniDocument`]. The loader depends only on this trait, so the grammar can come
//! from any library.

use crate::domain::{IniDocument, Result};
use std::path::Path;

/// A trait for parsing INI text.
///
/// Implementations add what they parse to an existing document, so a loader can merge
/// several files into one document. Later values for the same option replace earlier
/// ones.
///
/// # Examples
///
/// ```rust
/// use hexini::domain::{IniDocument, Result};
/// use hexini::ports::DocumentParser;
///
/// struct OneLineParser;
///
/// impl DocumentParser for OneLineParser {
///     fn parse_into(&self, content: &str, document: &mut IniDocument) -> Result<()> {
///         if let Some((k, v)) = content.split_once('=') {
///             document.insert("flask", k.trim(), v.trim());
///         }
///         Ok(())
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["line"]
///     }
/// }
///
/// let doc = OneLineParser.parse("debug = true").unwrap();
/// assert_eq!(doc.get("flask", "debug").unwrap(), "true");
/// ```
pub trait DocumentParser: Send + Sync {
    /// Parses `content` and merges its sections into `document`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The content was parsed and merged
    /// * `Err(IniError)` - The content is not a valid document
    fn parse_into(&self, content: &str, document: &mut IniDocument) -> Result<()>;

    /// Parses `content` into a fresh document.
    fn parse(&self, content: &str) -> Result<IniDocument> {
        let mut document = IniDocument::new();
        self.parse_into(content, &mut document)?;
        Ok(document)
    }

    /// Returns the file extensions (without the leading dot) this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if the path's extension is one this parser handles.
    ///
    /// Extensions compare case-insensitively. Paths without an extension never match.
    fn supports_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.supported_extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IniError;

    // Parser that reads "section.option=value" lines
    struct DottedParser;

    impl DocumentParser for DottedParser {
        fn parse_into(&self, content: &str, document: &mut IniDocument) -> Result<()> {
            for line in content.lines().filter(|l| !l.trim().is_empty()) {
                let (path, value) = line.split_once('=').ok_or_else(|| IniError::ParseError {
                    message: format!("missing '=' in {:?}", line),
                    source: None,
                })?;
                let (section, option) =
                    path.split_once('.').ok_or_else(|| IniError::ParseError {
                        message: format!("missing section in {:?}", path),
                        source: None,
                    })?;
                document.insert(section, option, value);
            }
            Ok(())
        }

        fn supported_extensions(&self) -> &[&str] {
            &["dotted", "dot"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let doc = DottedParser.parse("flask.debug=true\nwibble.wobble=woo").unwrap();
        assert_eq!(doc.sections(), vec!["flask", "wibble"]);
        assert_eq!(doc.get("wibble", "wobble").unwrap(), "woo");
    }

    #[test]
    fn test_parser_parse_into_merges() {
        let mut doc = DottedParser.parse("flask.debug=true").unwrap();
        DottedParser
            .parse_into("flask.debug=false\nflask.testing=1", &mut doc)
            .unwrap();
        assert_eq!(doc.get("flask", "debug").unwrap(), "false");
        assert_eq!(doc.get("flask", "testing").unwrap(), "1");
    }

    #[test]
    fn test_parser_error() {
        assert!(DottedParser.parse("no equals sign").is_err());
    }

    #[test]
    fn test_parser_parse_empty_content() {
        let doc = DottedParser.parse("").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parser_supported_extensions() {
        assert_eq!(DottedParser.supported_extensions(), &["dotted", "dot"]);
    }

    #[test]
    fn test_parser_supports_path() {
        assert!(DottedParser.supports_path(Path::new("app.dotted")));
        assert!(DottedParser.supports_path(Path::new("/etc/app.DOT")));
        assert!(!DottedParser.supports_path(Path::new("app.ini")));
        assert!(!DottedParser.supports_path(Path::new("dotted")));
    }
}
