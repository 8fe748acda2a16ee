//! Turning compile outcomes into status text, log lines and notifications.

use crate::compiler::{CompileOutcome, CompileReport};
use crate::logging::{LogBuffer, MessagePrefix};

/// Colour class of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Idle, nothing selected.
    Info,
    /// A compilation is in flight.
    Progress,
    Success,
    Warning,
    Error,
}

/// Single-line status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

impl StatusLine {
    pub fn new(text: impl Into<String>, tone: StatusTone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    pub fn ready() -> Self {
        Self::new("Ready", StatusTone::Info)
    }

    pub fn file_ready() -> Self {
        Self::new("File ready to compile", StatusTone::Info)
    }

    pub fn compiling() -> Self {
        Self::new("Compiling...", StatusTone::Progress)
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::ready()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// A modal message the UI should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Info, title, message)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Warning, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, title, message)
    }

    fn with_level(level: NotificationLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Append the report to `log` and compute the new status line.
///
/// Returns the notification to raise, if the outcome warrants one.
pub fn render_report(
    report: &CompileReport,
    log: &mut LogBuffer,
) -> (StatusLine, Option<Notification>) {
    log.push_block("STDOUT:", &report.stdout);
    log.push_block("STDERR:", &report.stderr);

    match &report.outcome {
        CompileOutcome::Succeeded { artifact } => {
            log.push(
                MessagePrefix::Success,
                &format!("File created: {}", artifact.display()),
            );
            let name = artifact
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let dir = artifact
                .parent()
                .map(|d| d.display().to_string())
                .unwrap_or_default();
            (
                StatusLine::new("✓ Compilation finished successfully", StatusTone::Success),
                Some(Notification::info(
                    "Done",
                    format!("{} was created successfully in:\n{}", name, dir),
                )),
            )
        }
        CompileOutcome::FailedMissingArtifact { artifact } => {
            log.push(
                MessagePrefix::Warning,
                &format!(
                    "The compiler exited without error, but the output file was not found: {}",
                    artifact.display()
                ),
            );
            (
                StatusLine::new("⚠ Warning: output file not found", StatusTone::Warning),
                None,
            )
        }
        CompileOutcome::FailedExitCode { code } => {
            log.push(
                MessagePrefix::Error,
                &format!("Compilation failed with code: {}", code),
            );
            (
                StatusLine::new("✗ Compilation error", StatusTone::Error),
                Some(Notification::error(
                    "Compilation error",
                    format!(
                        "Compilation failed with code {}.\nCheck the log for details.",
                        code
                    ),
                )),
            )
        }
        CompileOutcome::TimedOut { timeout } => {
            log.push(
                MessagePrefix::Error,
                &format!(
                    "Compilation took too long (timeout {}s)",
                    timeout.as_secs()
                ),
            );
            (
                StatusLine::new("✗ Compilation timed out", StatusTone::Error),
                Some(Notification::error(
                    "Timeout",
                    "Compilation took too long and was cancelled.",
                )),
            )
        }
        CompileOutcome::NotFound { compiler } => {
            log.push(
                MessagePrefix::Error,
                &format!("Compiler not found: {}", compiler.display()),
            );
            (
                StatusLine::new("✗ Compiler not found", StatusTone::Error),
                Some(Notification::error(
                    "Error",
                    format!("Compiler not found:\n{}", compiler.display()),
                )),
            )
        }
        CompileOutcome::UnexpectedError { message } => {
            log.push(
                MessagePrefix::Error,
                &format!("Unexpected error: {}", message),
            );
            (
                StatusLine::new("✗ Compilation error", StatusTone::Error),
                Some(Notification::error(
                    "Error",
                    format!("Unexpected error:\n{}", message),
                )),
            )
        }
    }
}
