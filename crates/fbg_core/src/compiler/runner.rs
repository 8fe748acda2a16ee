//! Blocking external process execution with a wall-clock limit.
//!
//! `ProcessRunner` is the seam between compilation logic and the operating
//! system; tests substitute a scripted fake.

use std::ffi::OsString;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Default wall-clock bound for one compilation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How often a running child is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of a process that exited on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; -1 when the process was ended by a signal.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Reasons a process produced no `ProcessOutput`.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Cannot execute {}", .0.display())]
    NotFound(PathBuf),

    #[error("Process exceeded the {}s time limit and was killed", .timeout.as_secs())]
    TimedOut { timeout: Duration },

    #[error("Process error: {0}")]
    Io(#[from] io::Error),
}

/// Runs an external program to completion.
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args`, capturing stdout and stderr as text.
    ///
    /// Blocks until the process exits or `timeout` elapses; on timeout the
    /// process is killed before returning.
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Duration,
    ) -> Result<ProcessOutput, RunError>;
}

/// `ProcessRunner` backed by `std::process`.
///
/// On unix the child leads its own process group, so a timeout also ends
/// whatever it spawned.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Duration,
    ) -> Result<ProcessOutput, RunError> {
        tracing::debug!("Spawning {} with {} args", program.display(), args.len());

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                RunError::NotFound(program.to_path_buf())
            }
            _ => RunError::Io(e),
        })?;

        // Both pipes drain concurrently; a full pipe blocks the child
        let (tx, rx) = mpsc::channel();
        if let Some(pipe) = child.stdout.take() {
            spawn_reader(pipe, Stream::Stdout, tx.clone());
        }
        if let Some(pipe) = child.stderr.take() {
            spawn_reader(pipe, Stream::Stderr, tx.clone());
        }
        drop(tx);

        let deadline = Instant::now() + timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {}
                Err(e) => {
                    terminate(&mut child);
                    return Err(RunError::Io(e));
                }
            }
            if Instant::now() >= deadline {
                tracing::warn!(
                    "{} exceeded {:?}, killing pid {}",
                    program.display(),
                    timeout,
                    child.id()
                );
                terminate(&mut child);
                return Err(RunError::TimedOut { timeout });
            }
            thread::sleep(POLL_INTERVAL);
        };

        // A grandchild holding an inherited pipe keeps it open past the exit
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok((Stream::Stdout, bytes)) => stdout = bytes,
                Ok((Stream::Stderr, bytes)) => stderr = bytes,
                Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {
                    tracing::warn!(
                        "{} exited but its output stayed open past {:?}",
                        program.display(),
                        timeout
                    );
                    kill_group(child.id());
                    return Err(RunError::TimedOut { timeout });
                }
            }
        }

        let stdout = String::from_utf8_lossy(&stdout).into_owned();
        let stderr = String::from_utf8_lossy(&stderr).into_owned();
        let exit_code = status.code().unwrap_or(-1);

        tracing::debug!(
            "{} exited with {} ({} bytes stdout, {} bytes stderr)",
            program.display(),
            exit_code,
            stdout.len(),
            stderr.len()
        );

        Ok(ProcessOutput {
            exit_code,
            stdout,
            stderr,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

fn spawn_reader<R: Read + Send + 'static>(
    mut pipe: R,
    stream: Stream,
    tx: Sender<(Stream, Vec<u8>)>,
) {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Err(e) = pipe.read_to_end(&mut buffer) {
            tracing::debug!("Pipe read ended early: {}", e);
        }
        // The receiver is gone once the run has given up waiting
        let _ = tx.send((stream, buffer));
    });
}

/// Kill the child and its process group, then reap it.
fn terminate(child: &mut Child) {
    kill_group(child.id());
    if let Err(e) = child.kill() {
        tracing::warn!("Failed to kill process: {}", e);
    }
    if let Err(e) = child.wait() {
        tracing::warn!("Failed to reap process: {}", e);
    }
}

#[cfg(unix)]
fn kill_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal; the group was created for this child.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        tracing::debug!(
            "killpg({}) failed: {}",
            pgid,
            io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_group(_pid: u32) {}
