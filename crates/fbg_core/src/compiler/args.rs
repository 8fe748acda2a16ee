//! Compiler command-line construction.
//!
//! The argument order is fixed:
//! `[-g] -s {console|gui} [-O 2] [-static] -x <output> <input>`.

use std::ffi::OsString;
use std::path::Path;

use super::request::CompileRequest;

/// Build the argument list for `request`.
pub fn build_args(request: &CompileRequest) -> Vec<OsString> {
    let options = &request.options;
    let mut args: Vec<OsString> = Vec::with_capacity(10);

    if options.debug {
        args.push("-g".into());
    }

    args.push("-s".into());
    args.push(if options.console { "console" } else { "gui" }.into());

    if options.optimize {
        args.push("-O".into());
        args.push("2".into());
    }

    if options.static_link {
        args.push("-static".into());
    }

    args.push("-x".into());
    args.push(request.artifact_path().into_os_string());
    args.push(request.source.clone().into_os_string());

    args
}

/// Space-joined command line for display in the log.
pub fn command_line(compiler: &Path, args: &[OsString]) -> String {
    std::iter::once(compiler.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| part.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
