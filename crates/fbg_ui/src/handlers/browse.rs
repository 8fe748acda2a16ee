//! Source file and output folder selection handlers.

use std::path::{Path, PathBuf};

use iced::Task;

use fbg_core::compiler::{SourceError, SOURCE_EXTENSION};
use fbg_core::config::ConfigSection;
use fbg_core::logging::MessagePrefix;
use fbg_core::session::Notification;

use super::helpers::clean_file_url;
use super::notify;
use crate::app::{App, Message};

impl App {
    /// Browse for a source file.
    pub fn browse_source(&self) -> Task<Message> {
        let start_dir = self.remembered_dir(&self.config.settings().paths.last_source_dir);

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new()
                    .set_title("Select a .bas file")
                    .add_filter("FreeBASIC files", &[SOURCE_EXTENSION])
                    .add_filter("All files", &["*"]);
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                dialog.pick_file().await.map(|f| f.path().to_path_buf())
            },
            Message::SourceSelected,
        )
    }

    /// Handle file selected from the picker.
    pub fn handle_source_selected(&mut self, path: Option<PathBuf>) -> Task<Message> {
        match path {
            Some(path) => self.accept_source(path),
            None => Task::none(),
        }
    }

    /// Handle a file dropped onto the window.
    pub fn handle_file_dropped(&mut self, path: PathBuf) -> Task<Message> {
        tracing::debug!("File dropped: {}", path.display());
        self.accept_source(path)
    }

    /// Handle edits to the source path field.
    ///
    /// Typed paths are only checked when compiling.
    pub fn handle_source_path_changed(&mut self, text: String) {
        let clean = clean_file_url(&text);
        self.session
            .set_source_path((!clean.is_empty()).then(|| PathBuf::from(&clean)));
        self.source_text = text;
    }

    /// Paste a path from the clipboard into the source field.
    pub fn handle_paste_source(&mut self) {
        let pasted = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match pasted {
            Ok(text) => {
                let clean = clean_file_url(&text);
                self.handle_source_path_changed(clean);
            }
            Err(e) => {
                tracing::warn!("Clipboard read failed: {}", e);
                self.session
                    .log_mut()
                    .push(MessagePrefix::Warning, "Could not read the clipboard");
            }
        }
    }

    /// Browse for the output folder.
    pub fn browse_output(&self) -> Task<Message> {
        let start_dir = self
            .session
            .output_dir()
            .map(Path::to_path_buf)
            .or_else(|| self.remembered_dir(&self.config.settings().paths.last_output_dir));

        Task::perform(
            async move {
                let mut dialog = rfd::AsyncFileDialog::new().set_title("Select output folder");
                if let Some(dir) = start_dir {
                    dialog = dialog.set_directory(dir);
                }
                dialog.pick_folder().await.map(|f| f.path().to_path_buf())
            },
            |dir| dir.map_or(Message::Noop, Message::OutputSelected),
        )
    }

    /// Handle folder selected from the picker, or `None` to reset.
    pub fn handle_output_selected(&mut self, path: Option<PathBuf>) {
        let remembered = path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &path {
            Some(dir) => tracing::info!("Output folder: {}", dir.display()),
            None => tracing::info!("Output folder reset to source folder"),
        }
        self.session.set_output_dir(path);

        self.config.settings_mut().paths.last_output_dir = remembered;
        self.persist(ConfigSection::Paths);
    }

    /// Validate and select a source path from the picker or a drop.
    fn accept_source(&mut self, path: PathBuf) -> Task<Message> {
        match self.session.select_source(&path) {
            Ok(()) => {
                self.source_text = path.to_string_lossy().into_owned();
                if let Some(parent) = path.parent() {
                    self.config.settings_mut().paths.last_source_dir =
                        parent.to_string_lossy().into_owned();
                    self.persist(ConfigSection::Paths);
                }
                Task::none()
            }
            Err(e) => {
                tracing::warn!("Rejected source {}: {}", path.display(), e);
                let message = match e {
                    SourceError::WrongExtension(_) | SourceError::NoSourceSelected => {
                        "You must choose an existing .bas file".to_string()
                    }
                    SourceError::NotFound(p) => {
                        format!("You must choose an existing .bas file\n{}", p.display())
                    }
                };
                notify::show(Notification::error("Error", message))
            }
        }
    }

    /// A remembered directory, if it still exists.
    fn remembered_dir(&self, dir: &str) -> Option<PathBuf> {
        if dir.is_empty() {
            return None;
        }
        let path = PathBuf::from(dir);
        path.is_dir().then_some(path)
    }
}
