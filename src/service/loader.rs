// SPDX-License-Identifier: MIT OR Apache-2.0

//! INI configuration loader.
//!
//! This module provides `IniConfigLoader`, which reads INI documents and mirrors the
//! reserved section into a host's configuration mapping, and its builder.

use crate::adapters::ini_file::{self, IniParser};
use crate::domain::{
    Coercion, CoercionTable, IniDocument, IniError, Result, DEFAULT_SECTION,
};
use crate::ports::{ConfigHost, DocumentParser};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Section mirrored into the host when no other name is configured.
pub const DEFAULT_RESERVED_SECTION: &str = "flask";

/// Reads INI documents and mirrors the reserved section into a host.
///
/// Every `read*` call replaces the loader's document with a freshly parsed one, then
/// writes each option of the reserved section (matched case-insensitively) into the
/// host under its upper-cased name, coerced according to the loader's
/// [`CoercionTable`]. Other sections are only reachable through the accessors.
///
/// # Examples
///
/// ```rust
/// use hexini::adapters::Application;
/// use hexini::service::IniConfigLoader;
///
/// # fn main() -> hexini::domain::Result<()> {
/// let mut app = Application::new("webapp");
/// let mut loader = IniConfigLoader::new();
///
/// loader.read_str(
///     &mut app.app_context(),
///     "[flask]\nsecret_key: 12345678\ndebug: true\n\n[wibble]\nwobble = woo\n",
/// )?;
///
/// assert!(app.debug());
/// assert_eq!(app.secret_key(), Some("12345678"));
/// assert_eq!(loader.get("wibble", "wobble")?, "woo");
/// assert!(!app.config().contains_key("WOBBLE"));
/// # Ok(())
/// # }
/// ```
pub struct IniConfigLoader {
    reserved_section: String,
    coercions: CoercionTable,
    parser: Box<dyn DocumentParser>,
    document: IniDocument,
}

impl IniConfigLoader {
    /// Creates a loader for the `flask` section with Flask's typed keys.
    pub fn new() -> Self {
        Self {
            reserved_section: DEFAULT_RESERVED_SECTION.to_string(),
            coercions: CoercionTable::flask(),
            parser: Box::new(IniParser::new()),
            document: IniDocument::new(),
        }
    }

    /// Creates a new loader builder.
    pub fn builder() -> IniConfigLoaderBuilder {
        IniConfigLoaderBuilder::new()
    }

    /// Returns the name of the section mirrored into hosts.
    pub fn reserved_section(&self) -> &str {
        &self.reserved_section
    }

    /// Returns the coercion table used while mirroring.
    pub fn coercions(&self) -> &CoercionTable {
        &self.coercions
    }

    /// Reads and parses each path in order, then mirrors into `host`.
    ///
    /// Paths that cannot be read are skipped. Returns the paths that were read.
    ///
    /// # Errors
    ///
    /// * `UnboundContext` - `host` has no active context; nothing is read
    /// * `FileTooLarge` / `ParseError` - a readable file could not be used
    /// * `TypeConversionError` and interpolation errors from mirroring
    pub fn read<H, I, P>(&mut self, host: &mut H, paths: I) -> Result<Vec<PathBuf>>
    where
        H: ConfigHost + ?Sized,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::ensure_bound(host)?;

        let mut document = IniDocument::new();
        let mut read_ok = Vec::new();
        for path in paths {
            let path = path.as_ref();
            let content = match ini_file::read_file(path) {
                Ok(content) => content,
                Err(e @ IniError::FileNotReadable { .. }) => {
                    tracing::debug!("Skipping configuration file: {}", e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            if !self.parser.supports_path(path) {
                tracing::debug!(
                    "Parsing '{}' as INI despite its extension",
                    path.display()
                );
            }
            self.parser.parse_into(&content, &mut document)?;
            read_ok.push(path.to_path_buf());
        }

        tracing::info!(
            "Read {} configuration file(s) for host '{}'",
            read_ok.len(),
            host.name()
        );
        self.document = document;
        self.mirror(host)?;
        Ok(read_ok)
    }

    /// Parses an already-open stream, then mirrors into `host`.
    pub fn read_stream<H, R>(&mut self, host: &mut H, mut reader: R) -> Result<()>
    where
        H: ConfigHost + ?Sized,
        R: Read,
    {
        Self::ensure_bound(host)?;

        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.load(host, &content)
    }

    /// Parses in-memory text, then mirrors into `host`.
    pub fn read_str<H>(&mut self, host: &mut H, content: &str) -> Result<()>
    where
        H: ConfigHost + ?Sized,
    {
        Self::ensure_bound(host)?;
        self.load(host, content)
    }

    /// Reads `config.ini` from the platform configuration directory of the
    /// application, then mirrors into `host`.
    ///
    /// A missing file is skipped like any other unreadable path.
    #[cfg(feature = "dirs")]
    pub fn read_default_location<H>(
        &mut self,
        host: &mut H,
        app_name: &str,
        qualifier: &str,
    ) -> Result<Vec<PathBuf>>
    where
        H: ConfigHost + ?Sized,
    {
        let paths = ini_file::default_location(app_name, qualifier);
        if paths.is_none() {
            tracing::warn!("Failed to determine project directories for '{}'", app_name);
        }
        self.read(host, paths)
    }

    /// Returns the document from the last read.
    pub fn document(&self) -> &IniDocument {
        &self.document
    }

    /// Returns the document from the last read for mutation.
    pub fn document_mut(&mut self) -> &mut IniDocument {
        &mut self.document
    }

    /// See [`IniDocument::sections`].
    pub fn sections(&self) -> Vec<&str> {
        self.document.sections()
    }

    /// See [`IniDocument::has_section`].
    pub fn has_section(&self, section: &str) -> bool {
        self.document.has_section(section)
    }

    /// See [`IniDocument::has_option`].
    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.document.has_option(section, option)
    }

    /// See [`IniDocument::options`].
    pub fn options(&self, section: &str) -> Result<Vec<String>> {
        self.document.options(section)
    }

    /// See [`IniDocument::items`].
    pub fn items(&self, section: &str) -> Result<Vec<(String, String)>> {
        self.document.items(section)
    }

    /// See [`IniDocument::get`].
    pub fn get(&self, section: &str, option: &str) -> Result<String> {
        self.document.get(section, option)
    }

    /// See [`IniDocument::get_or`].
    pub fn get_or(&self, section: &str, option: &str, fallback: &str) -> Result<String> {
        self.document.get_or(section, option, fallback)
    }

    /// See [`IniDocument::get_raw`].
    pub fn get_raw(&self, section: &str, option: &str) -> Result<&str> {
        self.document.get_raw(section, option)
    }

    /// See [`IniDocument::get_int`].
    pub fn get_int(&self, section: &str, option: &str) -> Result<i64> {
        self.document.get_int(section, option)
    }

    /// See [`IniDocument::get_int_or`].
    pub fn get_int_or(&self, section: &str, option: &str, fallback: i64) -> Result<i64> {
        self.document.get_int_or(section, option, fallback)
    }

    /// See [`IniDocument::get_float`].
    pub fn get_float(&self, section: &str, option: &str) -> Result<f64> {
        self.document.get_float(section, option)
    }

    /// See [`IniDocument::get_bool`].
    pub fn get_bool(&self, section: &str, option: &str) -> Result<bool> {
        self.document.get_bool(section, option)
    }

    /// See [`IniDocument::get_bool_or`].
    pub fn get_bool_or(&self, section: &str, option: &str, fallback: bool) -> Result<bool> {
        self.document.get_bool_or(section, option, fallback)
    }

    fn ensure_bound<H: ConfigHost + ?Sized>(host: &H) -> Result<()> {
        if host.has_active_context() {
            Ok(())
        } else {
            Err(IniError::UnboundContext {
                host: host.name().to_string(),
            })
        }
    }

    fn load<H: ConfigHost + ?Sized>(&mut self, host: &mut H, content: &str) -> Result<()> {
        self.document = self.parser.parse(content)?;
        self.mirror(host)?;
        Ok(())
    }

    /// Writes the reserved section(s) into `host`, returning the number of keys set.
    ///
    /// Keys written before a failing key stay written.
    fn mirror<H: ConfigHost + ?Sized>(&self, host: &mut H) -> Result<usize> {
        let sections: Vec<&str> = self
            .document
            .sections()
            .into_iter()
            .filter(|name| name.eq_ignore_ascii_case(&self.reserved_section))
            .collect();
        if sections.is_empty() {
            tracing::debug!(
                "No '{}' section found; host '{}' left unchanged",
                self.reserved_section,
                host.name()
            );
            return Ok(0);
        }

        let mut count = 0;
        for section in sections {
            for (option, raw) in self.document.items(section)? {
                let (key, value) = self.coercions.coerce(&option, &raw)?;
                tracing::trace!("Mirroring {} as {}", key, value.kind());
                host.set_config(key, value);
                count += 1;
            }
        }
        tracing::debug!("Mirrored {} key(s) into host '{}'", count, host.name());
        Ok(count)
    }
}

impl Default for IniConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IniConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IniConfigLoader")
            .field("reserved_section", &self.reserved_section)
            .field("coercions", &self.coercions.len())
            .field("sections", &self.document.sections())
            .finish()
    }
}

/// Builder for constructing an `IniConfigLoader`.
///
/// # Examples
///
/// ```rust
/// use hexini::domain::Coercion;
/// use hexini::service::IniConfigLoaderBuilder;
///
/// # fn main() -> hexini::domain::Result<()> {
/// let loader = IniConfigLoaderBuilder::new()
///     .reserved_section("webapp")
///     .coercion("workers", Coercion::Integer)
///     .build()?;
/// assert_eq!(loader.reserved_section(), "webapp");
/// # Ok(())
/// # }
/// ```
pub struct IniConfigLoaderBuilder {
    reserved_section: String,
    coercions: CoercionTable,
    parser: Option<Box<dyn DocumentParser>>,
}

impl IniConfigLoaderBuilder {
    /// Creates a new builder with the `flask` section and Flask's typed keys.
    pub fn new() -> Self {
        Self {
            reserved_section: DEFAULT_RESERVED_SECTION.to_string(),
            coercions: CoercionTable::flask(),
            parser: None,
        }
    }

    /// Sets the section mirrored into hosts.
    pub fn reserved_section(mut self, name: impl Into<String>) -> Self {
        self.reserved_section = name.into();
        self
    }

    /// Adds or replaces the coercion for one key.
    pub fn coercion(mut self, key: &str, kind: Coercion) -> Self {
        self.coercions.insert(key, kind);
        self
    }

    /// Replaces the whole coercion table.
    pub fn coercions(mut self, table: CoercionTable) -> Self {
        self.coercions = table;
        self
    }

    /// Uses a custom document parser instead of [`IniParser`].
    pub fn parser(mut self, parser: Box<dyn DocumentParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Builds the loader.
    ///
    /// Fails with `InvalidSectionName` when the reserved section is empty or
    /// `DEFAULT`.
    pub fn build(self) -> Result<IniConfigLoader> {
        let name = self.reserved_section.trim();
        if name.is_empty() || name == DEFAULT_SECTION {
            return Err(IniError::InvalidSectionName {
                section: self.reserved_section,
            });
        }

        Ok(IniConfigLoader {
            reserved_section: name.to_string(),
            coercions: self.coercions,
            parser: self
                .parser
                .unwrap_or_else(|| Box::new(IniParser::new())),
            document: IniDocument::new(),
        })
    }
}

impl Default for IniConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
