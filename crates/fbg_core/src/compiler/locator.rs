//! Compiler executable discovery.

use std::path::PathBuf;

#[cfg(windows)]
const DEFAULT_SEARCH_DIR: &str = r"C:\FreeBASIC";
#[cfg(not(windows))]
const DEFAULT_SEARCH_DIR: &str = "/usr/local/bin";

const CANDIDATE_STEMS: [&str; 3] = ["fbc", "fbc32", "fbc64"];

/// Directory probed when the config names none.
pub fn default_search_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SEARCH_DIR)
}

/// Compiler file names tried in order, with the platform executable suffix.
pub fn default_candidates() -> Vec<String> {
    CANDIDATE_STEMS
        .iter()
        .map(|stem| format!("{}{}", stem, std::env::consts::EXE_SUFFIX))
        .collect()
}

/// Finds the compiler in a fixed directory by trying candidate names.
#[derive(Debug, Clone)]
pub struct CompilerLocator {
    search_dir: PathBuf,
    candidates: Vec<String>,
}

impl CompilerLocator {
    pub fn new(search_dir: impl Into<PathBuf>, candidates: Vec<String>) -> Self {
        Self {
            search_dir: search_dir.into(),
            candidates,
        }
    }

    /// Return the first candidate that is a regular file.
    ///
    /// Falls back to the first candidate's path without checking it exists;
    /// a missing compiler is reported when a compilation is attempted.
    pub fn locate(&self) -> PathBuf {
        for name in &self.candidates {
            let path = self.search_dir.join(name);
            if path.is_file() {
                tracing::info!("Found compiler: {}", path.display());
                return path;
            }
        }

        let fallback = match self.candidates.first() {
            Some(name) => self.search_dir.join(name),
            None => {
                tracing::warn!("No compiler candidates configured, using default name");
                self.search_dir.join(&default_candidates()[0])
            }
        };
        tracing::warn!(
            "No compiler found in {}, assuming {}",
            self.search_dir.display(),
            fallback.display()
        );
        fallback
    }
}

impl Default for CompilerLocator {
    fn default() -> Self {
        Self::new(default_search_dir(), default_candidates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn returns_first_existing_in_listed_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fbc32"), b"").unwrap();
        fs::write(dir.path().join("fbc64"), b"").unwrap();

        let locator = CompilerLocator::new(dir.path(), names(&["fbc", "fbc32", "fbc64"]));
        assert_eq!(locator.locate(), dir.path().join("fbc32"));

        let reversed = CompilerLocator::new(dir.path(), names(&["fbc64", "fbc32", "fbc"]));
        assert_eq!(reversed.locate(), dir.path().join("fbc64"));
    }

    #[test]
    fn falls_back_to_first_candidate() {
        let dir = tempdir().unwrap();
        let locator = CompilerLocator::new(dir.path(), names(&["fbc", "fbc32"]));
        let path = locator.locate();
        assert_eq!(path, dir.path().join("fbc"));
        assert!(!path.exists());
    }

    #[test]
    fn directories_are_not_candidates() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("fbc")).unwrap();
        fs::write(dir.path().join("fbc64"), b"").unwrap();

        let locator = CompilerLocator::new(dir.path(), names(&["fbc", "fbc64"]));
        assert_eq!(locator.locate(), dir.path().join("fbc64"));
    }

    #[test]
    fn empty_candidate_list_uses_default_name() {
        let dir = tempdir().unwrap();
        let locator = CompilerLocator::new(dir.path(), Vec::new());
        assert_eq!(locator.locate(), dir.path().join(&default_candidates()[0]));
    }

    #[test]
    fn default_candidates_carry_platform_suffix() {
        let candidates = default_candidates();
        assert_eq!(candidates.len(), 3);
        assert!(candidates[0].starts_with("fbc"));
        assert!(candidates
            .iter()
            .all(|c| c.ends_with(std::env::consts::EXE_SUFFIX)));
    }
}
