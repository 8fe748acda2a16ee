//! FreeBASIC Compiler GUI - Main entry point
//!
//! This is the application entry point using iced. It handles:
//! - Configuration loading
//! - Application-level logging initialization
//! - Compiler discovery
//! - Application launch

use std::path::PathBuf;

use iced::Size;

use fbg_core::compiler::CompilerLocator;
use fbg_core::config::ConfigManager;
use fbg_core::logging::init_tracing_with_file;

mod app;
mod handlers;
mod theme;
mod widgets;
mod windows;

use app::{App, AppInit};

/// Default config path: .config/settings.toml (relative to current working directory)
fn default_config_path() -> PathBuf {
    PathBuf::from(".config").join("settings.toml")
}

fn main() -> iced::Result {
    // Load configuration first (needed for logs directory path)
    let config_path = default_config_path();
    let mut config_manager = ConfigManager::new(&config_path);

    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let settings = config_manager.settings().clone();
    let logs_dir = config_manager.logs_folder();
    let _log_guard = init_tracing_with_file(settings.logging.level, &logs_dir);

    tracing::info!("FreeBASIC Compiler GUI starting");
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", fbg_core::version());

    if let Err(e) = config_manager.ensure_logs_dir() {
        tracing::error!("Failed to create logs folder: {}", e);
    }

    let locator = CompilerLocator::new(
        &settings.compiler.search_dir,
        settings.compiler.candidates.clone(),
    );
    let compiler = locator.locate();

    let version_info = format!(
        "FreeBASIC Compiler GUI started.\nCore version: {}\nConfig: {}\nCompiler: {}",
        fbg_core::version(),
        config_path.display(),
        compiler.display()
    );

    let init = AppInit {
        config: config_manager,
        compiler,
        version_info,
    };

    tracing::info!("Application initialized, starting iced event loop");

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .theme(App::theme)
        .window_size(Size::new(720.0, 640.0))
        .run_with(move || App::new(init))
}
