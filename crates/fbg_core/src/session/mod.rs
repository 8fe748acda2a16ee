//! Compile session: the UI-independent state behind the main window.
//!
//! A session holds the selected source, output folder, option toggles, the
//! status line and the log, and moves through
//! `Idle -> Running -> Idle`. A run is split in three parts so the blocking
//! process call can happen off the UI thread:
//!
//! 1. [`CompileSession::begin`] validates and switches to `Running`
//! 2. [`PreparedRun::execute`] runs the compiler (blocking)
//! 3. [`CompileSession::finish`] renders the report and returns to `Idle`

mod render;

pub use render::{render_report, Notification, NotificationLevel, StatusLine, StatusTone};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::compiler::{
    build_args, command_line, validate_source, CompileOptions, CompileOutcome, CompileReport,
    CompileRequest, ProcessRunner, SourceError,
};
use crate::logging::{LogBuffer, MessagePrefix};

/// Where the session is in its run cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
}

/// Reasons a compile action was refused before launching anything.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("No source file selected")]
    NoSource,

    #[error("Compiler not found: {}", .0.display())]
    CompilerMissing(PathBuf),

    #[error("Source file not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Not a .bas file: {}", .0.display())]
    WrongExtension(PathBuf),

    #[error("Output would overwrite the source: {}", .0.display())]
    OverwritesSource(PathBuf),

    #[error("A compilation is already running")]
    AlreadyRunning,
}

impl Rejection {
    /// Dialog to show for this rejection.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Rejection::NoSource => Some(Notification::warning(
                "Notice",
                "Select a .bas file first.",
            )),
            Rejection::CompilerMissing(path) => Some(Notification::error(
                "Error",
                format!(
                    "Compiler not found: {}\nCheck the compiler folder in the settings file.",
                    path.display()
                ),
            )),
            Rejection::SourceMissing(path) => Some(Notification::error(
                "Error",
                format!("Source file not found: {}", path.display()),
            )),
            Rejection::WrongExtension(path) => Some(Notification::error(
                "Error",
                format!("You must choose an existing .bas file\n{}", path.display()),
            )),
            Rejection::OverwritesSource(path) => Some(Notification::error(
                "Error",
                format!(
                    "The executable would overwrite the source file: {}\nChoose another output folder.",
                    path.display()
                ),
            )),
            // The trigger is disabled while running; nothing to tell the user
            Rejection::AlreadyRunning => None,
        }
    }
}

/// A validated compiler invocation, ready to execute.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    pub request: CompileRequest,
    pub compiler: PathBuf,
    pub args: Vec<OsString>,
    pub artifact: PathBuf,
    pub command_line: String,
    pub timeout: Duration,
}

impl PreparedRun {
    /// Run the compiler and classify the result. Blocks.
    pub fn execute(&self, runner: &dyn ProcessRunner) -> CompileReport {
        let result = runner.run(&self.compiler, &self.args, self.timeout);
        let outcome = CompileOutcome::classify(&result, &self.compiler, &self.artifact);
        tracing::info!("Compilation {}: {}", outcome.label(), self.request.source.display());

        let (stdout, stderr) = match result {
            Ok(output) => (output.stdout, output.stderr),
            Err(_) => (String::new(), String::new()),
        };

        CompileReport {
            outcome,
            stdout,
            stderr,
            command_line: self.command_line.clone(),
            artifact: self.artifact.clone(),
        }
    }

    /// Report for a run whose worker died before producing a result.
    pub fn aborted(&self, message: impl Into<String>) -> CompileReport {
        CompileReport {
            outcome: CompileOutcome::UnexpectedError {
                message: message.into(),
            },
            stdout: String::new(),
            stderr: String::new(),
            command_line: self.command_line.clone(),
            artifact: self.artifact.clone(),
        }
    }
}

/// Result of a full begin/execute/finish cycle.
#[derive(Debug, Clone)]
pub struct Completed {
    pub report: CompileReport,
    pub notification: Option<Notification>,
}

/// State of the main window, minus the widgets.
#[derive(Debug, Clone)]
pub struct CompileSession {
    compiler: PathBuf,
    timeout: Duration,
    source: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    options: CompileOptions,
    state: SessionState,
    status: StatusLine,
    log: LogBuffer,
    runs: u32,
}

impl CompileSession {
    pub fn new(compiler: impl Into<PathBuf>, timeout: Duration, options: CompileOptions) -> Self {
        Self {
            compiler: compiler.into(),
            timeout,
            source: None,
            output_dir: None,
            options,
            state: SessionState::Idle,
            status: StatusLine::ready(),
            log: LogBuffer::new(true),
            runs: 0,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Select a source from the picker or a drop; must be an existing `.bas` file.
    pub fn select_source(&mut self, path: impl Into<PathBuf>) -> Result<(), SourceError> {
        let path = path.into();
        validate_source(&path)?;
        tracing::info!("Source selected: {}", path.display());
        self.source = Some(path);
        self.status = StatusLine::file_ready();
        Ok(())
    }

    /// Set the source from free text; checked only when compiling.
    pub fn set_source_path(&mut self, path: Option<PathBuf>) {
        self.source = path.filter(|p| !p.as_os_str().is_empty());
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// `None` writes the artifact next to the source.
    pub fn set_output_dir(&mut self, dir: Option<PathBuf>) {
        self.output_dir = dir;
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    pub fn set_options(&mut self, options: CompileOptions) {
        self.options = options;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn log(&self) -> &LogBuffer {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut LogBuffer {
        &mut self.log
    }

    /// Number of runs started in this session.
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Build the request from current state.
    pub fn request(&self) -> Option<CompileRequest> {
        let source = self.source.clone()?;
        let mut request = CompileRequest::new(source, self.options);
        request.output_dir = self.output_dir.clone();
        Some(request)
    }

    /// Validate and enter `Running`.
    ///
    /// On rejection nothing changes: no launch, status and log untouched.
    pub fn begin(&mut self) -> Result<PreparedRun, Rejection> {
        if self.is_running() {
            return Err(Rejection::AlreadyRunning);
        }
        let request = self.request().ok_or(Rejection::NoSource)?;
        if !self.compiler.is_file() {
            tracing::warn!("Compiler missing at {}", self.compiler.display());
            return Err(Rejection::CompilerMissing(self.compiler.clone()));
        }
        validate_source(&request.source).map_err(|e| match e {
            SourceError::NoSourceSelected => Rejection::NoSource,
            SourceError::WrongExtension(path) => Rejection::WrongExtension(path),
            SourceError::NotFound(path) => Rejection::SourceMissing(path),
        })?;

        let artifact = request.artifact_path();
        if same_file(&artifact, &request.source) {
            tracing::warn!("Artifact {} is the source file", artifact.display());
            return Err(Rejection::OverwritesSource(artifact));
        }

        let args = build_args(&request);
        let command_line = command_line(&self.compiler, &args);

        self.runs += 1;
        self.state = SessionState::Running;
        self.status = StatusLine::compiling();
        self.log.push(
            MessagePrefix::Phase,
            &format!("Compilation #{}: {}", self.runs, request.source.display()),
        );
        self.log.push(MessagePrefix::Command, &command_line);
        tracing::info!("Starting compilation: {}", command_line);

        Ok(PreparedRun {
            request,
            compiler: self.compiler.clone(),
            args,
            artifact,
            command_line,
            timeout: self.timeout,
        })
    }

    /// Render the report and return to `Idle`, whatever the outcome.
    pub fn finish(&mut self, report: &CompileReport) -> Option<Notification> {
        let (status, notification) = render_report(report, &mut self.log);
        self.status = status;
        self.state = SessionState::Idle;
        notification
    }

    /// Begin, execute and finish on the calling thread.
    pub fn compile_blocking(&mut self, runner: &dyn ProcessRunner) -> Result<Completed, Rejection> {
        let run = self.begin()?;
        let report = run.execute(runner);
        let notification = self.finish(&report);
        Ok(Completed {
            report,
            notification,
        })
    }
}

/// True when both paths name the same file, following links.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{ProcessOutput, RunError};
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::{tempdir, TempDir};

    /// What the fake compiler does when launched.
    #[derive(Clone)]
    enum Script {
        Exit { code: i32, stdout: &'static str, write_artifact: bool },
        Timeout,
        Vanished,
    }

    struct FakeRunner {
        script: Script,
        launches: AtomicUsize,
    }

    impl FakeRunner {
        fn new(script: Script) -> Self {
            Self {
                script,
                launches: AtomicUsize::new(0),
            }
        }

        fn launches(&self) -> usize {
            self.launches.load(Ordering::SeqCst)
        }
    }

    impl ProcessRunner for FakeRunner {
        fn run(
            &self,
            program: &Path,
            args: &[OsString],
            timeout: Duration,
        ) -> Result<ProcessOutput, RunError> {
            self.launches.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Exit {
                    code,
                    stdout,
                    write_artifact,
                } => {
                    if *write_artifact {
                        let pos = args.iter().position(|a| a == "-x").unwrap();
                        fs::write(&args[pos + 1], b"MZ").unwrap();
                    }
                    Ok(ProcessOutput {
                        exit_code: *code,
                        stdout: stdout.to_string(),
                        stderr: String::new(),
                    })
                }
                Script::Timeout => Err(RunError::TimedOut { timeout }),
                Script::Vanished => Err(RunError::NotFound(program.to_path_buf())),
            }
        }
    }

    /// Temp dir with a fake compiler file and a source file.
    fn workspace() -> (TempDir, CompileSession) {
        let dir = tempdir().unwrap();
        let compiler = dir.path().join("fbc");
        fs::write(&compiler, b"").unwrap();
        fs::write(dir.path().join("hello.bas"), "print \"hi\"").unwrap();

        let session = CompileSession::new(
            compiler,
            Duration::from_secs(30),
            CompileOptions::default(),
        );
        (dir, session)
    }

    #[test]
    fn no_source_launches_nothing() {
        let (_dir, mut session) = workspace();
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "",
            write_artifact: true,
        });
        let before = session.status().clone();

        let err = session.compile_blocking(&runner).unwrap_err();

        assert_eq!(err, Rejection::NoSource);
        assert_eq!(err.notification().unwrap().level, NotificationLevel::Warning);
        assert_eq!(runner.launches(), 0);
        assert_eq!(session.status(), &before);
        assert!(session.log().is_empty());
        assert!(!session.is_running());
    }

    #[test]
    fn missing_compiler_launches_nothing() {
        let (dir, _) = workspace();
        let mut session = CompileSession::new(
            dir.path().join("fbc64"),
            Duration::from_secs(30),
            CompileOptions::default(),
        );
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Timeout);

        let err = session.compile_blocking(&runner).unwrap_err();

        assert!(matches!(err, Rejection::CompilerMissing(_)));
        let note = err.notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert!(note.message.contains("fbc64"));
        assert_eq!(runner.launches(), 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn deleted_source_is_rejected() {
        let (dir, mut session) = workspace();
        let source = dir.path().join("hello.bas");
        session.select_source(&source).unwrap();
        fs::remove_file(&source).unwrap();

        let runner = FakeRunner::new(Script::Timeout);
        assert_eq!(
            session.compile_blocking(&runner).unwrap_err(),
            Rejection::SourceMissing(source)
        );
        assert_eq!(runner.launches(), 0);
    }

    #[test]
    fn typed_source_without_bas_extension_is_rejected() {
        let (dir, mut session) = workspace();
        let plain = dir.path().join("hello");
        fs::write(&plain, "print 1").unwrap();
        session.set_source_path(Some(plain.clone()));
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "",
            write_artifact: true,
        });

        let err = session.compile_blocking(&runner).unwrap_err();

        assert_eq!(err, Rejection::WrongExtension(plain.clone()));
        assert_eq!(err.notification().unwrap().level, NotificationLevel::Error);
        assert_eq!(runner.launches(), 0);
        assert_eq!(fs::read_to_string(&plain).unwrap(), "print 1");
        assert!(session.log().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn artifact_linked_to_source_is_rejected() {
        let (dir, mut session) = workspace();
        let source = dir.path().join("hello.bas");
        std::os::unix::fs::symlink(&source, dir.path().join("hello")).unwrap();
        session.select_source(&source).unwrap();
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "",
            write_artifact: true,
        });

        let err = session.compile_blocking(&runner).unwrap_err();

        assert!(matches!(err, Rejection::OverwritesSource(_)));
        assert_eq!(runner.launches(), 0);
        assert!(!session.is_running());
    }

    #[test]
    fn artifact_never_equals_a_valid_source() {
        let (dir, mut session) = workspace();
        session.set_source_path(Some(dir.path().join("hello.bas")));

        let run = session.begin().unwrap();

        assert_ne!(run.artifact, run.request.source);
        let target = run.args.iter().position(|a| a == "-x").unwrap() + 1;
        assert_ne!(run.args[target].as_os_str(), run.request.source.as_os_str());
    }

    #[test]
    fn select_source_rejects_other_extensions() {
        let (dir, mut session) = workspace();
        let notes = dir.path().join("readme.txt");
        fs::write(&notes, "").unwrap();

        assert!(matches!(
            session.select_source(&notes),
            Err(SourceError::WrongExtension(_))
        ));
        assert!(session.source().is_none());
        assert_eq!(session.status(), &StatusLine::ready());

        session.select_source(dir.path().join("hello.bas")).unwrap();
        assert_eq!(session.status(), &StatusLine::file_ready());
    }

    #[test]
    fn successful_run_logs_stdout() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "FreeBASIC Compiler - Version 1.10.1",
            write_artifact: true,
        });

        let done = session.compile_blocking(&runner).unwrap();

        assert!(done.report.outcome.is_success());
        assert_eq!(done.notification.unwrap().level, NotificationLevel::Info);
        assert_eq!(session.status().tone, StatusTone::Success);
        assert!(session.log().contains("FreeBASIC Compiler - Version 1.10.1"));
        assert!(session.log().contains("$ "));
        assert!(!session.is_running());
        assert_eq!(runner.launches(), 1);
    }

    #[test]
    fn clean_exit_without_artifact_warns() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "",
            write_artifact: false,
        });

        let done = session.compile_blocking(&runner).unwrap();

        assert!(matches!(
            done.report.outcome,
            CompileOutcome::FailedMissingArtifact { .. }
        ));
        assert!(done.notification.is_none());
        assert_eq!(session.status().tone, StatusTone::Warning);
    }

    #[test]
    fn timeout_returns_to_idle() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Timeout);

        let run = session.begin().unwrap();
        assert!(session.is_running());
        assert_eq!(session.status(), &StatusLine::compiling());
        assert_eq!(session.begin().unwrap_err(), Rejection::AlreadyRunning);

        let report = run.execute(&runner);
        assert!(matches!(report.outcome, CompileOutcome::TimedOut { .. }));
        let note = session.finish(&report).unwrap();

        assert_eq!(note.title, "Timeout");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.status().tone, StatusTone::Error);
    }

    #[test]
    fn vanished_compiler_reports_not_found() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Vanished);

        let done = session.compile_blocking(&runner).unwrap();

        assert!(matches!(done.report.outcome, CompileOutcome::NotFound { .. }));
        assert!(!session.is_running());
    }

    #[test]
    fn repeated_runs_append_independent_entries() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "built",
            write_artifact: true,
        });

        let first = session.compile_blocking(&runner).unwrap();
        let after_first = session.log().len();
        let second = session.compile_blocking(&runner).unwrap();

        assert_eq!(first.report.artifact, second.report.artifact);
        assert!(second.report.outcome.is_success());
        assert_eq!(session.log().len(), after_first * 2);
        assert!(session.log().contains("Compilation #1"));
        assert!(session.log().contains("Compilation #2"));
        assert_eq!(session.runs(), 2);
        assert!(!session.is_running());
    }

    #[test]
    fn output_dir_override_moves_artifact() {
        let (dir, mut session) = workspace();
        let out = dir.path().join("bin");
        fs::create_dir(&out).unwrap();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        session.set_output_dir(Some(out.clone()));
        let runner = FakeRunner::new(Script::Exit {
            code: 0,
            stdout: "",
            write_artifact: true,
        });

        let done = session.compile_blocking(&runner).unwrap();
        assert_eq!(done.report.artifact.parent(), Some(out.as_path()));
        assert!(done.report.artifact.is_file());
    }

    #[test]
    fn aborted_run_is_unexpected_error() {
        let (dir, mut session) = workspace();
        session.select_source(dir.path().join("hello.bas")).unwrap();
        let run = session.begin().unwrap();

        let report = run.aborted("worker panicked");
        let note = session.finish(&report).unwrap();

        assert!(note.message.contains("worker panicked"));
        assert!(!session.is_running());
    }
}
