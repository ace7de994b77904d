// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the INI configuration loader.
//!
//! This module composes a document parser, a coercion table and a host into the
//! read-then-mirror operations applications call at startup.

pub mod loader;

// Re-export commonly used types
pub use loader::{IniConfigLoader, IniConfigLoaderBuilder, DEFAULT_RESERVED_SECTION};
