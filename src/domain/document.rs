// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory INI document.
//!
//! `IniDocument` holds the sections read from one or more INI sources, in the order
//! they were first seen. Option names are lower-cased on insertion. The `DEFAULT`
//! section supplies fallback options to every other section, and values may refer
//! to other options of their section with `%(name)s` placeholders, which are
//! resolved on retrieval.

use crate::domain::coercion::{parse_bool, parse_int};
use crate::domain::errors::{IniError, Result};
use std::fmt;

/// Name of the section whose options every other section inherits.
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Maximum nesting of `%(name)s` references.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Section {
    name: String,
    options: Vec<(String, String)>,
}

impl Section {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    fn get(&self, option: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(name, _)| name == option)
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, option: String, value: String) {
        match self.options.iter_mut().find(|(name, _)| *name == option) {
            Some(entry) => entry.1 = value,
            None => self.options.push((option, value)),
        }
    }

    fn remove(&mut self, option: &str) -> bool {
        match self.options.iter().position(|(name, _)| name == option) {
            Some(index) => {
                self.options.remove(index);
                true
            }
            None => false,
        }
    }
}

fn normalize_option(option: &str) -> String {
    option.to_lowercase()
}

fn or_fallback<T>(result: Result<T>, fallback: T) -> Result<T> {
    match result {
        Err(e) if e.is_missing() => Ok(fallback),
        other => other,
    }
}

/// An ordered INI document with `DEFAULT` fallbacks and `%(name)s` interpolation.
///
/// # Examples
///
/// ```
/// use hexini::domain::IniDocument;
///
/// let mut doc = IniDocument::new();
/// doc.insert("foo bar", "bar", "http://baz/qux");
/// doc.insert("foo bar", "interp", "%(bar)s/hi");
///
/// assert_eq!(doc.get("foo bar", "interp").unwrap(), "http://baz/qux/hi");
/// assert_eq!(doc.get_raw("foo bar", "interp").unwrap(), "%(bar)s/hi");
/// assert_eq!(doc.get_or("foo bar", "missing", "value").unwrap(), "value");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Section,
    sections: Vec<Section>,
}

impl IniDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self {
            defaults: Section::named(DEFAULT_SECTION),
            sections: Vec::new(),
        }
    }

    /// Returns `true` when the document holds no sections and no defaults.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.defaults.options.is_empty()
    }

    /// Returns the section names in document order, excluding `DEFAULT`.
    pub fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.name.as_str()).collect()
    }

    /// Returns `true` if the section exists. `DEFAULT` is never reported.
    pub fn has_section(&self, section: &str) -> bool {
        self.find(section).is_some()
    }

    /// Adds an empty section.
    ///
    /// Fails with `DuplicateSection` if it exists and `InvalidSectionName` for
    /// `DEFAULT`.
    pub fn add_section(&mut self, section: &str) -> Result<()> {
        if section == DEFAULT_SECTION {
            return Err(IniError::InvalidSectionName {
                section: section.to_string(),
            });
        }
        if self.has_section(section) {
            return Err(IniError::DuplicateSection {
                section: section.to_string(),
            });
        }
        self.sections.push(Section::named(section));
        Ok(())
    }

    /// Removes a section, returning `true` if it existed.
    pub fn remove_section(&mut self, section: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != section);
        self.sections.len() != before
    }

    /// Sets an option in an existing section (or `DEFAULT`).
    pub fn set(&mut self, section: &str, option: &str, value: &str) -> Result<()> {
        let target = self.section_mut(section)?;
        target.set(normalize_option(option), value.to_string());
        Ok(())
    }

    /// Sets an option, creating the section when it does not exist yet.
    ///
    /// Parsers use this to build documents; a later value for the same option
    /// replaces the earlier one.
    pub fn insert(&mut self, section: &str, option: &str, value: &str) {
        let target = if section == DEFAULT_SECTION {
            &mut self.defaults
        } else {
            match self.sections.iter().position(|s| s.name == section) {
                Some(index) => &mut self.sections[index],
                None => {
                    self.sections.push(Section::named(section));
                    let last = self.sections.len() - 1;
                    &mut self.sections[last]
                }
            }
        };
        target.set(normalize_option(option), value.to_string());
    }

    /// Ensures a section exists, without touching its options.
    pub fn touch_section(&mut self, section: &str) {
        if section != DEFAULT_SECTION && !self.has_section(section) {
            self.sections.push(Section::named(section));
        }
    }

    /// Removes an option, returning `true` if it existed in that section.
    pub fn remove_option(&mut self, section: &str, option: &str) -> Result<bool> {
        let target = self.section_mut(section)?;
        Ok(target.remove(&normalize_option(option)))
    }

    /// Returns `true` if the option is visible from the section, `DEFAULT` included.
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        let option = normalize_option(option);
        match self.lookup_section(section) {
            Ok(s) => self.lookup(s, &option).is_some(),
            Err(_) => false,
        }
    }

    /// Returns the option names visible from the section: its own, then
    /// inherited `DEFAULT` options it does not override.
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        let s = self.lookup_section(section)?;
        let mut names: Vec<String> = s.options.iter().map(|(k, _)| k.clone()).collect();
        if !std::ptr::eq(s, &self.defaults) {
            for (k, _) in &self.defaults.options {
                if s.get(k).is_none() {
                    names.push(k.clone());
                }
            }
        }
        Ok(names)
    }

    /// Returns every visible `(option, value)` pair of the section, interpolated.
    pub fn items(&self, section: &str) -> Result<Vec<(String, String)>> {
        let s = self.lookup_section(section)?;
        self.options(section)?
            .into_iter()
            .map(|option| {
                let raw = self.lookup(s, &option).unwrap_or_default();
                let value = self.interpolate(s, &option, raw)?;
                Ok((option, value))
            })
            .collect()
    }

    /// Returns the raw value, without interpolation.
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str> {
        let s = self.lookup_section(section)?;
        let option = normalize_option(option);
        self.lookup(s, &option)
            .ok_or_else(|| IniError::MissingOption {
                section: section.to_string(),
                option,
            })
    }

    /// Returns the interpolated value.
    ///
    /// Fails with `MissingSection` or `MissingOption` when it is absent.
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        let s = self.lookup_section(section)?;
        let raw = self.get_raw(section, option)?;
        self.interpolate(s, &normalize_option(option), raw)
    }

    /// Returns the interpolated value, or `fallback` when it is absent.
    pub fn get_or(&self, section: &str, option: &str, fallback: &str) -> Result<String> {
        or_fallback(self.get(section, option), fallback.to_string())
    }

    /// Returns the value parsed as a base-10 integer.
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        let value = self.get(section, option)?;
        parse_int(option, &value)
    }

    /// Returns the value parsed as an integer, or `fallback` when it is absent.
    pub fn get_int_or(&self, section: &str, option: &str, fallback: i64) -> Result<i64> {
        or_fallback(self.get_int(section, option), fallback)
    }

    /// Returns the value parsed as a float.
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        let value = self.get(section, option)?;
        value
            .parse::<f64>()
            .map_err(|e| IniError::from_parse_float_error(option.to_string(), e))
    }

    /// Returns the value parsed as a boolean token.
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        let value = self.get(section, option)?;
        parse_bool(option, &value)
    }

    /// Returns the value parsed as a boolean, or `fallback` when it is absent.
    pub fn get_bool_or(&self, section: &str, option: &str, fallback: bool) -> Result<bool> {
        or_fallback(self.get_bool(section, option), fallback)
    }

    fn find(&self, section: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == section)
    }

    fn lookup_section(&self, section: &str) -> Result<&Section> {
        if section == DEFAULT_SECTION {
            return Ok(&self.defaults);
        }
        self.find(section).ok_or_else(|| IniError::MissingSection {
            section: section.to_string(),
        })
    }

    fn section_mut(&mut self, section: &str) -> Result<&mut Section> {
        if section == DEFAULT_SECTION {
            return Ok(&mut self.defaults);
        }
        self.sections
            .iter_mut()
            .find(|s| s.name == section)
            .ok_or_else(|| IniError::MissingSection {
                section: section.to_string(),
            })
    }

    fn lookup<'a>(&'a self, section: &'a Section, option: &str) -> Option<&'a str> {
        section.get(option).or_else(|| self.defaults.get(option))
    }

    fn interpolate(&self, section: &Section, option: &str, raw: &str) -> Result<String> {
        let mut out = String::with_capacity(raw.len());
        self.expand(section, option, raw, &mut out, 1)?;
        Ok(out)
    }

    fn expand(
        &self,
        section: &Section,
        option: &str,
        mut rest: &str,
        out: &mut String,
        depth: usize,
    ) -> Result<()> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(IniError::InterpolationDepth {
                section: section.name.clone(),
                option: option.to_string(),
            });
        }
        let syntax = |message: String| IniError::InterpolationSyntax {
            section: section.name.clone(),
            option: option.to_string(),
            message,
        };

        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if rest.starts_with("%%") {
                out.push('%');
                rest = &rest[2..];
            } else if rest.starts_with("%(") {
                let close = rest.find(')').ok_or_else(|| {
                    syntax(format!("bad interpolation variable reference {:?}", rest))
                })?;
                let name = &rest[2..close];
                if name.is_empty() || !rest[close + 1..].starts_with('s') {
                    return Err(syntax(format!(
                        "bad interpolation variable reference {:?}",
                        rest
                    )));
                }
                let name = normalize_option(name);
                rest = &rest[close + 2..];

                let value = self.lookup(section, &name).ok_or_else(|| {
                    IniError::InterpolationMissingOption {
                        section: section.name.clone(),
                        option: option.to_string(),
                        reference: name.clone(),
                    }
                })?;
                if value.contains('%') {
                    self.expand(section, option, value, out, depth + 1)?;
                } else {
                    out.push_str(value);
                }
            } else {
                return Err(syntax(format!(
                    "'%' must be followed by '%' or '(', found: {:?}",
                    rest
                )));
            }
        }
        out.push_str(rest);
        Ok(())
    }
}

impl Default for IniDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IniDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = std::iter::once(&self.defaults)
            .filter(|d| !d.options.is_empty())
            .chain(self.sections.iter());
        for section in sections {
            writeln!(f, "[{}]", section.name)?;
            for (k, v) in &section.options {
                writeln!(f, "{} = {}", k, v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IniDocument {
        let mut doc = IniDocument::new();
        doc.insert("wibble", "wobble", "woo");
        doc.insert("wibble", "warble", "123");
        doc.insert("foo bar", "bar", "http://baz/qux");
        doc.insert("foo bar", "interp", "%(bar)s/hi");
        doc
    }

    #[test]
    fn test_sections_in_order() {
        let doc = sample();
        assert_eq!(doc.sections(), vec!["wibble", "foo bar"]);
        assert!(doc.has_section("wibble"));
        assert!(!doc.has_section("WIBBLE"));
    }

    #[test]
    fn test_options_are_lower_cased() {
        let mut doc = IniDocument::new();
        doc.insert("flask", "Secret_Key", "abc");
        assert_eq!(doc.get("flask", "secret_key").unwrap(), "abc");
        assert_eq!(doc.get("flask", "SECRET_KEY").unwrap(), "abc");
        assert_eq!(doc.options("flask").unwrap(), vec!["secret_key"]);
    }

    #[test]
    fn test_get_and_int() {
        let doc = sample();
        assert_eq!(doc.get("wibble", "wobble").unwrap(), "woo");
        assert_eq!(doc.get_int("wibble", "warble").unwrap(), 123);
        assert!(doc.get_int("wibble", "wobble").is_err());
    }

    #[test]
    fn test_interpolation() {
        let doc = sample();
        assert_eq!(doc.get("foo bar", "interp").unwrap(), "http://baz/qux/hi");
    }

    #[test]
    fn test_nested_interpolation() {
        let mut doc = IniDocument::new();
        doc.insert("paths", "root", "/srv");
        doc.insert("paths", "app", "%(root)s/app");
        doc.insert("paths", "static", "%(app)s/static");
        assert_eq!(doc.get("paths", "static").unwrap(), "/srv/app/static");
    }

    #[test]
    fn test_escaped_percent() {
        let mut doc = IniDocument::new();
        doc.insert("s", "ratio", "50%% done");
        assert_eq!(doc.get("s", "ratio").unwrap(), "50% done");
        assert_eq!(doc.get_raw("s", "ratio").unwrap(), "50%% done");
    }

    #[test]
    fn test_interpolation_from_defaults() {
        let mut doc = IniDocument::new();
        doc.insert(DEFAULT_SECTION, "host", "example.org");
        doc.insert("site", "url", "https://%(host)s/");
        assert_eq!(doc.get("site", "url").unwrap(), "https://example.org/");
        assert_eq!(doc.get("site", "host").unwrap(), "example.org");
    }

    #[test]
    fn test_interpolation_missing_reference() {
        let mut doc = IniDocument::new();
        doc.insert("s", "a", "%(nope)s");
        let err = doc.get("s", "a").unwrap_err();
        assert!(matches!(err, IniError::InterpolationMissingOption { .. }));
    }

    #[test]
    fn test_interpolation_syntax_errors() {
        let mut doc = IniDocument::new();
        doc.insert("s", "lone", "100%");
        doc.insert("s", "unclosed", "%(name");
        doc.insert("s", "no_s", "%(lone)d");
        for option in ["lone", "unclosed", "no_s"] {
            let err = doc.get("s", option).unwrap_err();
            assert!(
                matches!(err, IniError::InterpolationSyntax { .. }),
                "Failed for option: {}",
                option
            );
        }
    }

    #[test]
    fn test_interpolation_depth() {
        let mut doc = IniDocument::new();
        doc.insert("loop", "a", "%(b)s");
        doc.insert("loop", "b", "%(a)s");
        let err = doc.get("loop", "a").unwrap_err();
        assert!(matches!(err, IniError::InterpolationDepth { .. }));
    }

    #[test]
    fn test_missing_option_and_fallback() {
        let doc = sample();
        let err = doc.get("wibble", "non-existent option").unwrap_err();
        assert!(matches!(err, IniError::MissingOption { .. }));
        assert_eq!(
            doc.get_or("wibble", "non-existent option", "value").unwrap(),
            "value"
        );
    }

    #[test]
    fn test_missing_section_and_fallback() {
        let doc = sample();
        let err = doc.get("flask", "debug").unwrap_err();
        assert!(matches!(err, IniError::MissingSection { .. }));
        assert_eq!(doc.get_or("flask", "debug", "x").unwrap(), "x");
        assert!(!doc.get_bool_or("flask", "debug", false).unwrap());
        assert_eq!(doc.get_int_or("flask", "port", 8080).unwrap(), 8080);
    }

    #[test]
    fn test_fallback_does_not_hide_conversion_errors() {
        let doc = sample();
        assert!(doc.get_int_or("wibble", "wobble", 1).is_err());
    }

    #[test]
    fn test_get_bool_and_float() {
        let mut doc = IniDocument::new();
        doc.insert("s", "flag", "Yes");
        doc.insert("s", "ratio", "0.25");
        assert!(doc.get_bool("s", "flag").unwrap());
        assert_eq!(doc.get_float("s", "ratio").unwrap(), 0.25);
    }

    #[test]
    fn test_items_include_defaults() {
        let mut doc = IniDocument::new();
        doc.insert(DEFAULT_SECTION, "shared", "1");
        doc.insert(DEFAULT_SECTION, "own", "default");
        doc.insert("s", "own", "mine");
        let items = doc.items("s").unwrap();
        assert_eq!(
            items,
            vec![
                ("own".to_string(), "mine".to_string()),
                ("shared".to_string(), "1".to_string()),
            ]
        );
        assert!(doc.sections().iter().all(|s| *s != DEFAULT_SECTION));
    }

    #[test]
    fn test_add_set_remove() {
        let mut doc = IniDocument::new();
        doc.add_section("extra").unwrap();
        assert!(matches!(
            doc.add_section("extra"),
            Err(IniError::DuplicateSection { .. })
        ));
        assert!(matches!(
            doc.add_section(DEFAULT_SECTION),
            Err(IniError::InvalidSectionName { .. })
        ));

        doc.set("extra", "Key", "v").unwrap();
        assert!(doc.has_option("extra", "key"));
        assert!(doc.set("absent", "key", "v").is_err());

        assert!(doc.remove_option("extra", "key").unwrap());
        assert!(!doc.remove_option("extra", "key").unwrap());
        assert!(doc.remove_section("extra"));
        assert!(!doc.remove_section("extra"));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_insert_replaces_value() {
        let mut doc = IniDocument::new();
        doc.insert("s", "k", "first");
        doc.insert("s", "K", "second");
        assert_eq!(doc.get("s", "k").unwrap(), "second");
        assert_eq!(doc.options("s").unwrap().len(), 1);
    }

    #[test]
    fn test_display() {
        let mut doc = IniDocument::new();
        doc.insert("a", "x", "1");
        assert_eq!(doc.to_string(), "[a]\nx = 1\n\n");
    }
}
