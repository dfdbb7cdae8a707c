//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module handles:
//!
//! - Reading the TOML configuration file from `$XDG_CONFIG_HOME/xtap`.
//! - Writing it back when asked to.
//! - Providing defaults when the file does not exist yet (first run).

pub mod config;
