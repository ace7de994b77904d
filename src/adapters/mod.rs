// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer: the `rust-ini` backed document parser and an in-memory application host.

pub mod app;
pub mod ini_file;

pub use app::{AppConfig, AppContext, Application};
pub use ini_file::IniParser;
