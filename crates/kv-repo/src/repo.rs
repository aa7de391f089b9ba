use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{RepoError, RepoResult};

/// Name of the metadata subtree marking a repository root.
pub const META_DIR: &str = ".kv";
/// Staging ledger file, inside the metadata subtree.
pub const LEDGER_FILE: &str = "staging-area.txt";
/// Directory holding one `v<N>` subdirectory per snapshot.
pub const COMMITS_DIR: &str = "commit";
/// Exclusive lock file, present only while a mutating command runs.
pub const LOCK_FILE: &str = "lock";
/// Advisory fingerprint cache.
pub const CACHE_FILE: &str = "hash-cache.txt";

/// Ancestor levels searched above the starting directory.
const MAX_ASCENT: usize = 5;

/// Result of an idempotent `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The metadata subtree was created.
    Created,
    /// The directory already held a repository; nothing was changed.
    AlreadyInitialized,
}

/// A located repository root and the metadata paths derived from it.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Locate the repository root by checking `start` and up to five
    /// ancestor levels for the metadata subtree.
    pub fn discover(start: &Path) -> RepoResult<Self> {
        let start = start.canonicalize().map_err(RepoError::Io)?;
        let mut candidate = start.as_path();
        for _ in 0..=MAX_ASCENT {
            if candidate.join(META_DIR).is_dir() {
                debug!(root = %candidate.display(), "repository located");
                return Ok(Self {
                    root: candidate.to_path_buf(),
                });
            }
            match candidate.parent() {
                Some(parent) => candidate = parent,
                None => break,
            }
        }
        Err(RepoError::NotFound { start })
    }

    /// Bootstrap the metadata subtree under `dir`.
    ///
    /// Idempotent: an already-initialized directory is left untouched and
    /// reported as such.
    pub fn init(dir: &Path) -> RepoResult<InitOutcome> {
        if dir.join(META_DIR).is_dir() {
            return Ok(InitOutcome::AlreadyInitialized);
        }
        let meta = dir.join(META_DIR);
        fs::create_dir_all(meta.join(COMMITS_DIR))?;
        fs::write(meta.join(LEDGER_FILE), "")?;
        debug!(meta = %meta.display(), "repository initialized");
        Ok(InitOutcome::Created)
    }

    /// The repository root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.kv` metadata directory.
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(META_DIR)
    }

    /// The staging ledger file.
    pub fn ledger_path(&self) -> PathBuf {
        self.meta_dir().join(LEDGER_FILE)
    }

    /// The directory holding snapshot directories.
    pub fn commits_dir(&self) -> PathBuf {
        self.meta_dir().join(COMMITS_DIR)
    }

    /// The exclusive lock file.
    pub fn lock_path(&self) -> PathBuf {
        self.meta_dir().join(LOCK_FILE)
    }

    /// The advisory fingerprint cache file.
    pub fn hash_cache_path(&self) -> PathBuf {
        self.meta_dir().join(CACHE_FILE)
    }

    /// Turn an existing filesystem path into the root-relative,
    /// `/`-separated form used by the ledger and the snapshot store.
    pub fn relativize(&self, path: &Path) -> RepoResult<String> {
        let canonical = path.canonicalize().map_err(RepoError::Io)?;
        let rel = canonical
            .strip_prefix(&self.root)
            .map_err(|_| RepoError::OutsideRoot {
                path: path.to_path_buf(),
            })?;
        if rel.as_os_str().is_empty() {
            return Err(RepoError::OutsideRoot {
                path: path.to_path_buf(),
            });
        }
        let parts: Vec<String> = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Ok(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = Repository::init(dir.path()).unwrap();
        assert_eq!(outcome, InitOutcome::Created);
        assert!(dir.path().join(".kv").is_dir());
        assert!(dir.path().join(".kv/commit").is_dir());
        assert!(dir.path().join(".kv/staging-area.txt").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let outcome = Repository::init(dir.path()).unwrap();
        assert_eq!(outcome, InitOutcome::AlreadyInitialized);
    }

    #[test]
    fn discover_at_root() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::discover(dir.path()).unwrap();
        assert_eq!(repo.root(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn discover_from_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        let repo = Repository::discover(&nested).unwrap();
        assert_eq!(repo.root(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn discovery_is_bounded() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        // Five levels down still finds the root; six does not.
        let five = dir.path().join("1/2/3/4/5");
        let six = five.join("6");
        fs::create_dir_all(&six).unwrap();

        assert!(Repository::discover(&five).is_ok());
        assert!(matches!(
            Repository::discover(&six),
            Err(RepoError::NotFound { .. })
        ));
    }

    #[test]
    fn unlocated_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Repository::discover(dir.path()),
            Err(RepoError::NotFound { .. })
        ));
    }

    #[test]
    fn relativize_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::discover(dir.path()).unwrap();

        let nested = dir.path().join("src");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("main.rs"), "fn main() {}").unwrap();

        let rel = repo.relativize(&nested.join("main.rs")).unwrap();
        assert_eq!(rel, "src/main.rs");
    }

    #[test]
    fn relativize_rejects_outside_paths() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::discover(dir.path()).unwrap();

        fs::write(other.path().join("x.txt"), "x").unwrap();
        let result = repo.relativize(&other.path().join("x.txt"));
        assert!(matches!(result, Err(RepoError::OutsideRoot { .. })));
    }

    #[test]
    fn relativize_rejects_the_root_itself() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        let repo = Repository::discover(dir.path()).unwrap();
        assert!(matches!(
            repo.relativize(dir.path()),
            Err(RepoError::OutsideRoot { .. })
        ));
    }
}
