//! FBG Core - Backend logic for FreeBASIC Compiler GUI
//!
//! This crate contains all non-UI logic: finding the compiler, building its
//! command line, running it with a time limit and interpreting the result.
//! It can be used by the GUI application or a CLI tool.

pub mod compiler;
pub mod config;
pub mod logging;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
