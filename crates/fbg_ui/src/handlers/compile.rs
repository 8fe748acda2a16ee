//! Compilation handlers.

use std::future::Future;
use std::sync::Arc;

use iced::Task;

use fbg_core::compiler::{CompileReport, ProcessRunner};
use fbg_core::session::{PreparedRun, Rejection};

use super::notify;
use crate::app::{App, Message};

impl App {
    /// Start compiling the selected source.
    ///
    /// The compiler runs on the blocking pool; the compile button stays
    /// disabled until `CompileFinished` arrives.
    pub fn start_compile(&mut self) -> Task<Message> {
        match self.launch_compile() {
            Ok(job) => Task::perform(job, Message::CompileFinished),
            Err(rejection) => {
                tracing::warn!("Compile rejected: {}", rejection);
                notify::show_maybe(rejection.notification())
            }
        }
    }

    /// Enter `Running` and return the job that produces the report.
    pub fn launch_compile(
        &mut self,
    ) -> Result<impl Future<Output = CompileReport> + Send + 'static, Rejection> {
        let run = self.session.begin()?;
        Ok(run_on_blocking_pool(run, Arc::clone(&self.runner)))
    }

    /// Handle a finished compilation.
    pub fn handle_compile_finished(&mut self, report: CompileReport) -> Task<Message> {
        let notification = self.session.finish(&report);
        notify::show_maybe(notification)
    }
}

async fn run_on_blocking_pool(run: PreparedRun, runner: Arc<dyn ProcessRunner>) -> CompileReport {
    let fallback = run.clone();
    match tokio::task::spawn_blocking(move || run.execute(runner.as_ref())).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Compiler worker failed: {}", e);
            fallback.aborted(format!("Compiler worker failed: {}", e))
        }
    }
}
