//! Scheme Language Server
//!
//! A small Language Server Protocol implementation for Scheme files.
//!
//! This library provides:
//! - A range-formatting provider that pipes the selection through an
//!   external formatting script
//! - A native Scheme formatter and its command-line driver
//! - LSP protocol implementation
//! - Configuration management

pub mod bridge;
pub mod cli;
pub mod config;
pub mod fmt;
pub mod lsp;

// Re-exports for clean public API
pub use bridge::ExternalFormatter;
pub use config::Config;
pub use fmt::{format_source, FormatOptions};
