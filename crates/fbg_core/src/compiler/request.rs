//! Compilation request, option toggles, and source file validation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extension of FreeBASIC source files.
pub const SOURCE_EXTENSION: &str = "bas";

/// Problems with a user-chosen source file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("No source file selected")]
    NoSourceSelected,

    #[error("Not a .bas file: {}", .0.display())]
    WrongExtension(PathBuf),

    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Check that `path` names an existing `.bas` file.
pub fn validate_source(path: &Path) -> Result<(), SourceError> {
    if path.as_os_str().is_empty() {
        return Err(SourceError::NoSourceSelected);
    }

    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
    if !has_extension {
        return Err(SourceError::WrongExtension(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(SourceError::NotFound(path.to_path_buf()));
    }

    Ok(())
}

/// The four independent compiler toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// `-g`
    pub debug: bool,
    /// `-s console` when true, `-s gui` when false.
    pub console: bool,
    /// `-O 2`
    pub optimize: bool,
    /// `-static`
    pub static_link: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            debug: false,
            console: true,
            optimize: false,
            static_link: false,
        }
    }
}

/// Everything needed for one compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub source: PathBuf,
    /// Output folder; `None` means next to the source file.
    pub output_dir: Option<PathBuf>,
    pub options: CompileOptions,
}

impl CompileRequest {
    pub fn new(source: impl Into<PathBuf>, options: CompileOptions) -> Self {
        Self {
            source: source.into(),
            output_dir: None,
            options,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Folder the artifact is written to.
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        }
    }

    /// Expected executable: source stem with the platform executable suffix.
    ///
    /// Only the final extension is replaced, so `my.game.bas` gives `my.game`.
    pub fn artifact_path(&self) -> PathBuf {
        let mut name = OsString::from(self.source.file_stem().unwrap_or_default());
        name.push(std::env::consts::EXE_SUFFIX);
        self.resolved_output_dir().join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn options_default_to_console_only() {
        let options = CompileOptions::default();
        assert!(options.console);
        assert!(!options.debug && !options.optimize && !options.static_link);
    }

    #[test]
    fn output_dir_defaults_to_source_dir() {
        let request = CompileRequest::new("/work/games/snake.bas", CompileOptions::default());
        assert_eq!(request.resolved_output_dir(), PathBuf::from("/work/games"));

        let request = request.with_output_dir("/out");
        assert_eq!(request.resolved_output_dir(), PathBuf::from("/out"));
    }

    #[test]
    fn artifact_replaces_extension() {
        let request = CompileRequest::new("/work/snake.bas", CompileOptions::default())
            .with_output_dir("/out");
        let expected = if cfg!(windows) {
            PathBuf::from("/out/snake.exe")
        } else {
            PathBuf::from("/out/snake")
        };
        assert_eq!(request.artifact_path(), expected);
    }

    #[test]
    fn dotted_stem_keeps_inner_dots() {
        let v1 = CompileRequest::new("/work/app.v1.bas", CompileOptions::default())
            .with_output_dir("/out");
        let v2 = CompileRequest::new("/work/app.v2.bas", CompileOptions::default())
            .with_output_dir("/out");

        let expected = if cfg!(windows) {
            PathBuf::from("/out/app.v1.exe")
        } else {
            PathBuf::from("/out/app.v1")
        };
        assert_eq!(v1.artifact_path(), expected);
        assert_ne!(v1.artifact_path(), v2.artifact_path());
    }

    #[test]
    fn validate_source_checks_extension_and_existence() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("Main.BAS");
        fs::write(&good, "print 1").unwrap();
        let text = dir.path().join("notes.txt");
        fs::write(&text, "").unwrap();

        assert_eq!(validate_source(&good), Ok(()));
        assert_eq!(
            validate_source(&text),
            Err(SourceError::WrongExtension(text.clone()))
        );
        let missing = dir.path().join("gone.bas");
        assert_eq!(
            validate_source(&missing),
            Err(SourceError::NotFound(missing.clone()))
        );
        assert_eq!(
            validate_source(Path::new("")),
            Err(SourceError::NoSourceSelected)
        );
    }

    #[test]
    fn directory_with_bas_name_is_rejected() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("odd.bas");
        fs::create_dir(&folder).unwrap();
        assert_eq!(validate_source(&folder), Err(SourceError::NotFound(folder)));
    }
}
