// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module contains the INI document model, the typed host values and keys, and
//! the known-key coercion table. It is independent of any parsing library or host
//! framework.

pub mod coercion;
pub mod config_key;
pub mod config_value;
pub mod document;
pub mod errors;

// Re-export commonly used types
pub use coercion::{Coercion, CoercionTable};
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use document::{IniDocument, DEFAULT_SECTION};
pub use errors::{IniError, Result};
