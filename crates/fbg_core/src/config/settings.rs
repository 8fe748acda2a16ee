//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

use crate::compiler::{default_candidates, default_search_dir, CompileOptions, DEFAULT_TIMEOUT_SECS};
use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Compiler discovery and invocation.
    #[serde(default)]
    pub compiler: CompilerSettings,

    /// Remembered compiler option toggles.
    #[serde(default)]
    pub options: OptionSettings,

    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where to look for the compiler and how long to let it run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerSettings {
    /// Directory probed for the compiler executable.
    #[serde(default = "default_search_dir_string")]
    pub search_dir: String,

    /// Executable names tried in order.
    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    /// Wall-clock bound for one compilation.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_search_dir_string() -> String {
    default_search_dir().to_string_lossy().into_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            search_dir: default_search_dir_string(),
            candidates: default_candidates(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Option toggles restored on the next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSettings {
    /// Emit debug info (`-g`).
    #[serde(default)]
    pub debug: bool,

    /// Console subsystem; windowed when false.
    #[serde(default = "default_true")]
    pub console: bool,

    /// Optimize (`-O 2`).
    #[serde(default)]
    pub optimize: bool,

    /// Link statically (`-static`).
    #[serde(default)]
    pub static_link: bool,
}

impl Default for OptionSettings {
    fn default() -> Self {
        Self::from(CompileOptions::default())
    }
}

impl From<CompileOptions> for OptionSettings {
    fn from(options: CompileOptions) -> Self {
        Self {
            debug: options.debug,
            console: options.console,
            optimize: options.optimize,
            static_link: options.static_link,
        }
    }
}

impl From<&OptionSettings> for CompileOptions {
    fn from(settings: &OptionSettings) -> Self {
        Self {
            debug: settings.debug,
            console: settings.console,
            optimize: settings.optimize,
            static_link: settings.static_link,
        }
    }
}

/// Path configuration for logs and remembered picker locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSettings {
    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Directory the source picker opened last.
    #[serde(default)]
    pub last_source_dir: String,

    /// Output folder chosen last.
    #[serde(default)]
    pub last_output_dir: String,
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            logs_folder: default_logs_folder(),
            last_source_dir: String::new(),
            last_output_dir: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum level for the tracing subscriber.
    #[serde(default)]
    pub level: LogLevel,

    /// Auto-scroll the log pane.
    #[serde(default = "default_true")]
    pub autoscroll: bool,

    /// Prefix log pane lines with the local time.
    #[serde(default = "default_true")]
    pub timestamps: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            autoscroll: true,
            timestamps: true,
        }
    }
}

/// Config sections that can be updated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Compiler,
    Options,
    Paths,
    Logging,
}

impl ConfigSection {
    /// All sections, in file order.
    pub const ALL: [ConfigSection; 4] = [
        ConfigSection::Compiler,
        ConfigSection::Options,
        ConfigSection::Paths,
        ConfigSection::Logging,
    ];

    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Compiler => "compiler",
            ConfigSection::Options => "options",
            ConfigSection::Paths => "paths",
            ConfigSection::Logging => "logging",
        }
    }

    /// Comment written above the section in a freshly generated file.
    pub fn description(&self) -> &'static str {
        match self {
            ConfigSection::Compiler => "Compiler discovery and time limit",
            ConfigSection::Options => "Compiler options restored at startup",
            ConfigSection::Paths => "Log folder and remembered locations",
            ConfigSection::Logging => "Logging configuration",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serializes() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();
        assert!(toml.contains("[compiler]"));
        assert!(toml.contains("[options]"));
        assert!(toml.contains("timeout_secs = 30"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let minimal = "[compiler]\nsearch_dir = \"/opt/fbc\"";
        let parsed: Settings = toml::from_str(minimal).unwrap();
        assert_eq!(parsed.compiler.search_dir, "/opt/fbc");
        assert_eq!(parsed.compiler.candidates, default_candidates());
        assert!(parsed.options.console);
        assert!(!parsed.options.debug);
        assert_eq!(parsed.logging.level, LogLevel::Info);
    }

    #[test]
    fn option_settings_convert_both_ways() {
        let options = CompileOptions {
            debug: true,
            console: false,
            optimize: true,
            static_link: false,
        };
        let saved = OptionSettings::from(options);
        assert_eq!(CompileOptions::from(&saved), options);
    }
}
