//! # Printer Module
//!
//! This module provides printer-specific configurations and utilities.
//!
//! ## Modules
//!
//! - [`config`]: Resolution presets and millimeter/dot conversion

pub mod config;

pub use config::{DEFAULT_DPI, PrinterConfig, dots_to_mm, mm_to_dots};
