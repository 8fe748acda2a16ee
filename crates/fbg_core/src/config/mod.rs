//! Configuration management for FreeBASIC Compiler GUI.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use fbg_core::config::{ConfigManager, ConfigSection};
//!
//! let mut config = ConfigManager::new(".config/settings.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Compiler dir: {}", config.settings().compiler.search_dir);
//!
//! config.settings_mut().options.debug = true;
//! config.update_section(ConfigSection::Options).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    CompilerSettings, ConfigSection, LoggingSettings, OptionSettings, PathSettings, Settings,
};
