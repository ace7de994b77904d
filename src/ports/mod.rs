// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) the loader is written against:
//! how INI text becomes a document, and how mirrored values reach an application.
//! They are implemented by adapters in the adapters layer.

pub mod host;
pub mod parser;

// Re-export commonly used types
pub use host::ConfigHost;
pub use parser::DocumentParser;
