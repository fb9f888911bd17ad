//! Dev-tool collaborators: locating its snapshot and recognizing its commands.
//!
//! Both are traits so the dispatch logic can be tested without a real SDK
//! layout on disk.

use std::path::{Path, PathBuf};

use crate::config::DevToolConfig;

/// File name of the dev-tool snapshot inside an SDK `bin/` directory.
pub const DEV_TOOL_SNAPSHOT: &str = "dartdev.dart.snapshot";

/// Finds the dev-tool executable.
pub trait DevToolLocator {
    /// Resolve the dev-tool for running `candidate` (a command or script).
    fn resolve(&self, candidate: &str) -> Option<PathBuf>;

    /// Resolve the dev-tool for printing the default help message.
    fn resolve_for_help(&self) -> Option<PathBuf>;
}

/// Decides whether a candidate token names a dev-tool command.
pub trait CommandRecognizer {
    fn looks_like_command(&self, token: &str) -> bool;
}

/// Probes the filesystem for the dev-tool snapshot.
///
/// Checks, in order: the configured snapshot path, then
/// `<dir>/snapshots/dartdev.dart.snapshot` and `<dir>/dartdev.dart.snapshot`
/// for every search directory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLocator {
    explicit: Option<PathBuf>,
    search_dirs: Vec<PathBuf>,
}

impl SnapshotLocator {
    pub fn new(explicit: Option<PathBuf>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            explicit,
            search_dirs,
        }
    }

    /// Configured locations first, then the directory of the running executable.
    pub fn from_config(config: &DevToolConfig, exe_dir: Option<PathBuf>) -> Self {
        let mut search_dirs = config.search_dirs.clone();
        search_dirs.extend(exe_dir);
        Self::new(config.snapshot.clone(), search_dirs)
    }

    /// Directory containing the current executable, if it can be determined.
    pub fn current_exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
    }

    fn probe(&self) -> Option<PathBuf> {
        let candidates = self.explicit.iter().cloned().chain(
            self.search_dirs.iter().flat_map(|dir| {
                [
                    dir.join("snapshots").join(DEV_TOOL_SNAPSHOT),
                    dir.join(DEV_TOOL_SNAPSHOT),
                ]
            }),
        );

        for path in candidates {
            if path.is_file() {
                return Some(path);
            }
            tracing::trace!(path = %path.display(), "dev-tool snapshot not found");
        }
        None
    }
}

impl DevToolLocator for SnapshotLocator {
    fn resolve(&self, candidate: &str) -> Option<PathBuf> {
        let found = self.probe();
        tracing::debug!(candidate, found = ?found, "resolving dev-tool");
        found
    }

    fn resolve_for_help(&self) -> Option<PathBuf> {
        self.probe()
    }
}

/// URI prefixes that always denote a script rather than a command.
const SCRIPT_URI_PREFIXES: &[&str] = &["http://", "https://", "file://", "package:", "google3://"];

/// Treats a token as a command unless it is an existing path or a script URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptPathRecognizer;

impl CommandRecognizer for ScriptPathRecognizer {
    fn looks_like_command(&self, token: &str) -> bool {
        !SCRIPT_URI_PREFIXES.iter().any(|p| token.starts_with(p)) && !Path::new(token).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locator_prefers_explicit_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("custom.snapshot");
        std::fs::write(&explicit, b"").unwrap();
        std::fs::write(dir.path().join(DEV_TOOL_SNAPSHOT), b"").unwrap();

        let locator = SnapshotLocator::new(Some(explicit.clone()), vec![dir.path().to_path_buf()]);
        assert_eq!(locator.resolve("run"), Some(explicit));
    }

    #[test]
    fn locator_searches_snapshots_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        let snapshots = dir.path().join("snapshots");
        std::fs::create_dir(&snapshots).unwrap();
        std::fs::write(snapshots.join(DEV_TOOL_SNAPSHOT), b"").unwrap();

        let locator = SnapshotLocator::new(None, vec![dir.path().to_path_buf()]);
        assert_eq!(locator.resolve_for_help(), Some(snapshots.join(DEV_TOOL_SNAPSHOT)));
    }

    #[test]
    fn locator_skips_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEV_TOOL_SNAPSHOT), b"").unwrap();

        let locator = SnapshotLocator::new(
            Some(dir.path().join("missing")),
            vec![dir.path().to_path_buf()],
        );
        assert_eq!(locator.resolve("run"), Some(dir.path().join(DEV_TOOL_SNAPSHOT)));
    }

    #[test]
    fn locator_with_nothing_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let locator = SnapshotLocator::new(None, vec![dir.path().to_path_buf()]);
        assert_eq!(locator.resolve("run"), None);
        assert_eq!(locator.resolve_for_help(), None);
    }

    #[test]
    fn recognizer_treats_uris_and_existing_files_as_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("main.dart");
        std::fs::write(&script, b"void main() {}").unwrap();

        let recognizer = ScriptPathRecognizer;
        assert!(!recognizer.looks_like_command(script.to_str().unwrap()));
        assert!(!recognizer.looks_like_command("https://example.com/main.dart"));
        assert!(!recognizer.looks_like_command("package:app/main.dart"));
        assert!(recognizer.looks_like_command("pub"));
        assert!(recognizer.looks_like_command("definitely-missing-file.dart"));
    }
}
