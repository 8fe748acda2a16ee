//! FreeBASIC compiler discovery and invocation.
//!
//! - [`CompilerLocator`] finds the `fbc` executable in a fixed directory
//! - [`CompileRequest`] / [`CompileOptions`] describe one build
//! - [`build_args`] turns a request into the compiler command line
//! - [`ProcessRunner`] runs it with a time limit ([`SystemRunner`] for real use)
//! - [`CompileOutcome`] classifies what happened

mod args;
mod locator;
mod outcome;
mod request;
mod runner;

pub use args::{build_args, command_line};
pub use locator::{default_candidates, default_search_dir, CompilerLocator};
pub use outcome::{CompileOutcome, CompileReport};
pub use request::{validate_source, CompileOptions, CompileRequest, SourceError, SOURCE_EXTENSION};
pub use runner::{
    ProcessOutput, ProcessRunner, RunError, SystemRunner, DEFAULT_TIMEOUT_SECS,
};
