//! Classification of a finished compiler run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::runner::{ProcessOutput, RunError};

/// Terminal state of one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    /// Exit code 0 and the artifact exists.
    Succeeded { artifact: PathBuf },
    /// Non-zero exit code.
    FailedExitCode { code: i32 },
    /// Exit code 0 but no artifact; a warning, not a hard failure.
    FailedMissingArtifact { artifact: PathBuf },
    /// Killed after exceeding the time limit.
    TimedOut { timeout: Duration },
    /// The compiler could not be executed.
    NotFound { compiler: PathBuf },
    /// Any other launch or wait failure.
    UnexpectedError { message: String },
}

impl CompileOutcome {
    /// Classify a runner result, checking for `artifact` on a clean exit.
    pub fn classify(
        result: &Result<ProcessOutput, RunError>,
        compiler: &Path,
        artifact: &Path,
    ) -> Self {
        match result {
            Ok(output) if output.success() => {
                if artifact.is_file() {
                    CompileOutcome::Succeeded {
                        artifact: artifact.to_path_buf(),
                    }
                } else {
                    CompileOutcome::FailedMissingArtifact {
                        artifact: artifact.to_path_buf(),
                    }
                }
            }
            Ok(output) => CompileOutcome::FailedExitCode {
                code: output.exit_code,
            },
            Err(RunError::TimedOut { timeout }) => CompileOutcome::TimedOut { timeout: *timeout },
            Err(RunError::NotFound(_)) => CompileOutcome::NotFound {
                compiler: compiler.to_path_buf(),
            },
            Err(RunError::Io(e)) => CompileOutcome::UnexpectedError {
                message: e.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Succeeded { .. })
    }

    /// Short name used in tracing output.
    pub fn label(&self) -> &'static str {
        match self {
            CompileOutcome::Succeeded { .. } => "succeeded",
            CompileOutcome::FailedExitCode { .. } => "failed",
            CompileOutcome::FailedMissingArtifact { .. } => "missing-artifact",
            CompileOutcome::TimedOut { .. } => "timed-out",
            CompileOutcome::NotFound { .. } => "not-found",
            CompileOutcome::UnexpectedError { .. } => "unexpected-error",
        }
    }
}

/// Everything a finished run reports back to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub outcome: CompileOutcome,
    pub stdout: String,
    pub stderr: String,
    pub command_line: String,
    pub artifact: PathBuf,
}
