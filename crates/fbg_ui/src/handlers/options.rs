//! Option toggle and settings persistence handlers.

use fbg_core::config::ConfigSection;

use crate::app::{App, CompileOption};

impl App {
    /// Handle a toggled compiler option; the new state is remembered.
    pub fn handle_option_toggled(&mut self, option: CompileOption, value: bool) {
        let mut options = self.session.options();
        match option {
            CompileOption::Debug => options.debug = value,
            CompileOption::Console => options.console = value,
            CompileOption::Optimize => options.optimize = value,
            CompileOption::StaticLink => options.static_link = value,
        }
        self.session.set_options(options);

        self.config.settings_mut().options = options.into();
        self.persist(ConfigSection::Options);
    }

    /// Write one config section, logging instead of failing.
    pub fn persist(&mut self, section: ConfigSection) {
        if let Err(e) = self.config.update_section(section) {
            tracing::warn!("Failed to save [{}] settings: {}", section.table_name(), e);
        }
    }
}
