//! Main application module for FreeBASIC Compiler GUI.
//!
//! Holds the application state and the iced `update`/`view`/`subscription`
//! entry points. Behaviour lives in the `handlers` modules, layout in
//! `windows`.

use std::path::PathBuf;
use std::sync::Arc;

use iced::{event, window, Element, Event, Subscription, Task, Theme};

use fbg_core::compiler::{CompileReport, ProcessRunner, SystemRunner};
use fbg_core::config::ConfigManager;
use fbg_core::logging::MessagePrefix;
use fbg_core::session::CompileSession;

use crate::windows::main_window;

/// Initialization data for the App.
pub struct AppInit {
    pub config: ConfigManager,
    pub compiler: PathBuf,
    pub version_info: String,
}

/// One of the four compiler toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileOption {
    Debug,
    Console,
    Optimize,
    StaticLink,
}

/// All possible messages the application can receive.
#[derive(Debug, Clone)]
pub enum Message {
    // Source file
    BrowseSource,
    SourceSelected(Option<PathBuf>),
    SourcePathChanged(String),
    PasteSource,
    FileDropped(PathBuf),

    // Output folder
    BrowseOutput,
    OutputSelected(PathBuf),
    ResetOutput,

    // Options
    OptionToggled(CompileOption, bool),

    // Compilation
    Compile,
    CompileFinished(CompileReport),

    // Log
    ClearLog,

    // Internal
    Noop,
}

/// Main application state.
pub struct App {
    pub config: ConfigManager,
    pub session: CompileSession,
    /// Contents of the source path field.
    pub source_text: String,
    pub autoscroll: bool,
    pub runner: Arc<dyn ProcessRunner>,
}

impl App {
    /// Build the initial state.
    pub fn new(init: AppInit) -> (Self, Task<Message>) {
        let settings = init.config.settings().clone();
        let timeout = std::time::Duration::from_secs(settings.compiler.timeout_secs);

        let mut session = CompileSession::new(init.compiler, timeout, (&settings.options).into());
        session.log_mut().set_timestamps(settings.logging.timestamps);
        session.log_mut().push(MessagePrefix::None, &init.version_info);

        if !settings.paths.last_output_dir.is_empty() {
            let dir = PathBuf::from(&settings.paths.last_output_dir);
            if dir.is_dir() {
                session.set_output_dir(Some(dir));
            }
        }

        let app = Self {
            config: init.config,
            session,
            source_text: String::new(),
            autoscroll: settings.logging.autoscroll,
            runner: Arc::new(SystemRunner),
        };

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        String::from("FreeBASIC Compiler GUI")
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseSource => self.browse_source(),
            Message::SourceSelected(path) => self.handle_source_selected(path),
            Message::SourcePathChanged(text) => {
                self.handle_source_path_changed(text);
                Task::none()
            }
            Message::PasteSource => {
                self.handle_paste_source();
                Task::none()
            }
            Message::FileDropped(path) => self.handle_file_dropped(path),

            Message::BrowseOutput => self.browse_output(),
            Message::OutputSelected(dir) => {
                self.handle_output_selected(Some(dir));
                Task::none()
            }
            Message::ResetOutput => {
                self.handle_output_selected(None);
                Task::none()
            }

            Message::OptionToggled(option, value) => {
                self.handle_option_toggled(option, value);
                Task::none()
            }

            Message::Compile => self.start_compile(),
            Message::CompileFinished(report) => self.handle_compile_finished(report),

            Message::ClearLog => {
                self.session.log_mut().clear();
                Task::none()
            }

            Message::Noop => Task::none(),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        main_window::view(self)
    }

    /// Window-level events: file drops onto the main window.
    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, _id| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        })
    }
}
