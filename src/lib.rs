// SPDX-License-Identifier: MIT OR Apache-2.0

//! Populate a web application's configuration mapping from INI files.
//!
//! An [`IniConfigLoader`](service::IniConfigLoader) reads INI documents from paths,
//! streams or strings. The reserved section (`[flask]` by default, matched
//! case-insensitively) is mirrored into the host application's configuration under
//! upper-cased keys, with well-known keys coerced to booleans, integers or
//! durations. All other sections stay in the loader and are read through its
//! accessors.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: `IniDocument`, `ConfigKey`, `ConfigValue`, `CoercionTable`, errors
//! - **Ports**: Trait definitions for parsers and hosts (`DocumentParser`, `ConfigHost`)
//! - **Adapters**: The `rust-ini` parser and an in-memory `Application` host
//! - **Service**: The loader that reads and mirrors
//!
//! # Feature Flags
//!
//! - `dirs`: Enable reading from the platform configuration directory (default)
//!
//! # Quick Start
//!
//! ```rust
//! use hexini::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut app = Application::new("webapp");
//! let mut loader = IniConfigLoader::new();
//!
//! loader.read_str(
//!     &mut app.app_context(),
//!     "[flask]\nsecret_key: 12345678\ndebug: true\npermanent_session_lifetime: 100\n",
//! )?;
//!
//! assert!(app.debug());
//! assert_eq!(app.secret_key(), Some("12345678"));
//! assert_eq!(app.permanent_session_lifetime().num_days(), 100);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{AppConfig, AppContext, Application, IniParser};
    pub use crate::domain::{
        Coercion, CoercionTable, ConfigKey, ConfigValue, IniDocument, IniError, Result,
    };
    pub use crate::ports::{ConfigHost, DocumentParser};
    pub use crate::service::{IniConfigLoader, IniConfigLoaderBuilder};
}
