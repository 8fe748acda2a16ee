//! Append-only log backing the GUI log pane.

use chrono::{DateTime, Local};

use super::types::MessagePrefix;

/// One line in the log pane.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: DateTime<Local>,
    pub text: String,
}

/// Append-only list of log lines.
///
/// Only `clear()` removes lines; compiling never does.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    entries: Vec<LogEntry>,
    timestamps: bool,
}

impl LogBuffer {
    pub fn new(timestamps: bool) -> Self {
        Self {
            entries: Vec::new(),
            timestamps,
        }
    }

    /// Append a message; multi-line text becomes one entry per line.
    pub fn push(&mut self, prefix: MessagePrefix, message: &str) {
        let time = Local::now();
        let formatted = prefix.format(message);
        for line in formatted.lines() {
            self.entries.push(LogEntry {
                time,
                text: line.to_string(),
            });
        }
    }

    /// Append a block of captured process output under a header.
    ///
    /// Nothing is written when `body` is blank.
    pub fn push_block(&mut self, header: &str, body: &str) {
        if body.trim().is_empty() {
            return;
        }
        self.push(MessagePrefix::None, header);
        self.push(MessagePrefix::None, body.trim_end());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn set_timestamps(&mut self, timestamps: bool) {
        self.timestamps = timestamps;
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(needle))
    }

    /// Render the whole log as text for the log pane.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            if self.timestamps {
                out.push_str(&entry.time.format("[%H:%M:%S] ").to_string());
            }
            out.push_str(&entry.text);
            out.push('\n');
        }
        out
    }
}
