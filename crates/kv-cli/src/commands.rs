use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::warn;

use kv_hash::HashCache;
use kv_index::{IndexError, StagingLedger};
use kv_repo::{InitOutcome, RepoError, RepoLock, Repository, META_DIR};
use kv_status::{classify, scan_working_tree, ChangeKind, StatusReport};
use kv_store::{SnapshotStore, StoreError};

use crate::cli::{AddArgs, Cli, Command, InitArgs, OutputFormat};

/// Directories never scanned as part of the working tree.
const SCAN_EXCLUDES: &[&str] = &[META_DIR, ".git"];

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    match cli.command {
        Command::Init(args) => cmd_init(&cwd, args),
        Command::Add(args) => cmd_add(&cwd, args),
        Command::Status(_) => cmd_status(&cwd, cli.format),
        Command::Commit(_) => cmd_commit(&cwd),
    }
}

fn cmd_init(cwd: &Path, args: InitArgs) -> anyhow::Result<()> {
    let dir = match args.path {
        Some(path) => cwd.join(path),
        None => cwd.to_path_buf(),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create {}", dir.display()))?;
    match Repository::init(&dir)? {
        InitOutcome::Created => println!(
            "{} Initialized empty kv repository in {}/",
            "✓".green().bold(),
            dir.join(META_DIR).display()
        ),
        InitOutcome::AlreadyInitialized => println!("Directory already initialized!"),
    }
    Ok(())
}

fn cmd_add(cwd: &Path, args: AddArgs) -> anyhow::Result<()> {
    if args.paths.is_empty() {
        println!("Nothing to add.");
        return Ok(());
    }

    let repo = Repository::discover(cwd)?;
    let _lock = RepoLock::acquire(&repo.lock_path())?;
    let mut ledger = StagingLedger::load(repo.ledger_path())?;

    let mut staged = 0usize;
    for path in &args.paths {
        let abs = cwd.join(path);
        let rel = match repo.relativize(&abs) {
            Ok(rel) => rel,
            Err(RepoError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                println!("{} does not exist.", path.display());
                continue;
            }
            Err(RepoError::OutsideRoot { .. }) => {
                println!(
                    "{} {} is outside the repository.",
                    "skipped:".yellow(),
                    path.display()
                );
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match ledger.stage(repo.root(), &rel) {
            Ok(_) => {
                staged += 1;
                println!("Added {rel} to the repository.");
            }
            Err(IndexError::FileMissing(p)) => println!("{p} does not exist."),
            Err(e @ (IndexError::InvalidPath(_) | IndexError::Hash(_))) => {
                println!("{} {rel}: {e}", "skipped:".yellow());
            }
            Err(e) => return Err(e.into()),
        }
    }

    if staged > 0 {
        ledger.save()?;
    }
    Ok(())
}

fn cmd_status(cwd: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let repo = Repository::discover(cwd)?;
    let ledger = StagingLedger::load(repo.ledger_path())?;
    let store = SnapshotStore::new(repo.commits_dir());
    let snapshot = store.manifest()?;

    let mut cache = HashCache::load(repo.hash_cache_path());
    let working = scan_working_tree(repo.root(), SCAN_EXCLUDES, &mut cache)?;
    let live: Vec<&str> = working.keys().map(String::as_str).collect();
    cache.retain_paths(&live);
    if let Err(e) = cache.save() {
        warn!(error = %e, "could not persist fingerprint cache");
    }

    let report = classify(&working, ledger.entries(), snapshot.as_ref());
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => render_status(&report),
    }
    Ok(())
}

fn render_status(report: &StatusReport) {
    if report.is_clean() {
        if report.has_commits {
            println!("Working tree clean.");
        } else {
            println!("No commits yet. Working tree clean.");
        }
        return;
    }

    let mut first_section = true;
    if !report.staged.is_empty() {
        first_section = false;
        println!("Staged for commit:");
        for file in &report.staged {
            let label = format!("{:<9}", file.state.as_str());
            println!(
                "  {} {}  ({})",
                label.green(),
                file.path,
                file.timestamp.dimmed()
            );
        }
    }

    if !report.changes.is_empty() {
        if !first_section {
            println!();
        }
        first_section = false;
        println!("Changes not staged:");
        for change in &report.changes {
            let label = format!("{:<9}", change.kind.as_str());
            let label = match change.kind {
                ChangeKind::Modified => label.yellow(),
                ChangeKind::Untracked => label.red(),
            };
            println!("  {} {}", label, change.path);
        }
    }

    if !report.deleted.is_empty() {
        if !first_section {
            println!();
        }
        println!("Deleted:");
        for path in &report.deleted {
            println!("  {} {}", format!("{:<9}", "deleted").red(), path);
        }
    }
}

fn cmd_commit(cwd: &Path) -> anyhow::Result<()> {
    let repo = Repository::discover(cwd)?;
    let _lock = RepoLock::acquire(&repo.lock_path())?;
    let mut ledger = StagingLedger::load(repo.ledger_path())?;

    if ledger.is_empty() {
        println!("Nothing to commit.");
        return Ok(());
    }

    let store = SnapshotStore::new(repo.commits_dir());
    match store.commit(repo.root(), ledger.entries()) {
        Ok(summary) => {
            // Clearing strictly after a fully successful commit keeps the
            // ledger recoverable when anything above failed.
            ledger.clear()?;
            println!(
                "{} Committed snapshot v{} ({} staged, {} carried forward)",
                "✓".green().bold(),
                summary.version,
                summary.staged,
                summary.carried
            );
            Ok(())
        }
        Err(e @ StoreError::PartialCommit { .. }) => {
            eprintln!(
                "{} the staging ledger was left intact; fix the cause and commit again",
                "warning:".yellow().bold()
            );
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use kv_hash::ContentHasher;

    fn init_repo() -> (tempfile::TempDir, Repository) {
        let dir = tempfile::tempdir().unwrap();
        cmd_init(dir.path(), InitArgs { path: None }).unwrap();
        let repo = Repository::discover(dir.path()).unwrap();
        (dir, repo)
    }

    fn add(cwd: &Path, paths: &[&str]) {
        cmd_add(
            cwd,
            AddArgs {
                paths: paths.iter().map(|p| PathBuf::from(*p)).collect(),
            },
        )
        .unwrap();
    }

    #[test]
    fn init_creates_metadata_subtree() {
        let (dir, repo) = init_repo();
        assert!(dir.path().join(".kv/commit").is_dir());
        assert!(repo.ledger_path().is_file());
    }

    #[test]
    fn init_twice_is_a_noop() {
        let (dir, _repo) = init_repo();
        cmd_init(dir.path(), InitArgs { path: None }).unwrap();
    }

    #[test]
    fn end_to_end_two_commit_scenario() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("f.txt"), "hello").unwrap();

        add(dir.path(), &["f.txt"]);
        let ledger_text = fs::read_to_string(repo.ledger_path()).unwrap();
        let lines: Vec<&str> = ledger_text.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("f.txt;"));
        assert!(lines[0].contains(&ContentHasher::fingerprint_bytes(b"hello").to_hex()));
        assert!(lines[0].ends_with(";created"));

        cmd_commit(dir.path()).unwrap();
        assert_eq!(
            fs::read(dir.path().join(".kv/commit/v1/f.txt")).unwrap(),
            b"hello"
        );
        assert!(fs::read_to_string(repo.ledger_path()).unwrap().is_empty());

        fs::write(dir.path().join("f.txt"), "world").unwrap();
        add(dir.path(), &["f.txt"]);
        let ledger_text = fs::read_to_string(repo.ledger_path()).unwrap();
        assert_eq!(ledger_text.lines().count(), 1);
        assert!(ledger_text.contains(&ContentHasher::fingerprint_bytes(b"world").to_hex()));

        cmd_commit(dir.path()).unwrap();
        assert_eq!(
            fs::read(dir.path().join(".kv/commit/v2/f.txt")).unwrap(),
            b"world"
        );
        // Prior snapshots are immutable.
        assert_eq!(
            fs::read(dir.path().join(".kv/commit/v1/f.txt")).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn add_skips_missing_paths_and_stages_the_rest() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("good.txt"), "g").unwrap();

        add(dir.path(), &["good.txt", "missing.txt"]);

        let ledger = StagingLedger::load(repo.ledger_path()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(ledger.get("good.txt").is_some());
    }

    #[test]
    fn add_nothing_reports_and_succeeds() {
        let (dir, repo) = init_repo();
        cmd_add(dir.path(), AddArgs { paths: vec![] }).unwrap();
        let ledger = StagingLedger::load(repo.ledger_path()).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn commit_with_empty_ledger_is_a_noop() {
        let (dir, repo) = init_repo();
        cmd_commit(dir.path()).unwrap();
        let store = SnapshotStore::new(repo.commits_dir());
        assert_eq!(store.commit_number().unwrap(), 0);
    }

    #[test]
    fn status_runs_without_any_commit() {
        let (dir, _repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        add(dir.path(), &["a.txt"]);
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        cmd_status(dir.path(), OutputFormat::Text).unwrap();
        cmd_status(dir.path(), OutputFormat::Json).unwrap();
    }

    #[test]
    fn add_fails_while_repository_is_locked() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        let _lock = RepoLock::acquire(&repo.lock_path()).unwrap();

        let err = cmd_add(
            dir.path(),
            AddArgs {
                paths: vec!["a.txt".into()],
            },
        )
        .unwrap_err();
        assert!(err
            .chain()
            .any(|c| matches!(c.downcast_ref::<RepoError>(), Some(RepoError::Locked { .. }))));
    }

    #[test]
    fn add_without_repository_fails_with_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = cmd_add(
            dir.path(),
            AddArgs {
                paths: vec!["a.txt".into()],
            },
        )
        .unwrap_err();
        assert!(err
            .chain()
            .any(|c| matches!(c.downcast_ref::<RepoError>(), Some(RepoError::NotFound { .. }))));
    }

    #[test]
    fn partial_commit_keeps_the_ledger() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("f.txt"), "data").unwrap();
        add(dir.path(), &["f.txt"]);

        // The staged file vanishes before the commit runs.
        fs::remove_file(dir.path().join("f.txt")).unwrap();
        let err = cmd_commit(dir.path()).unwrap_err();
        assert!(err
            .chain()
            .any(|c| matches!(c.downcast_ref::<StoreError>(), Some(StoreError::PartialCommit { .. }))));

        let ledger = StagingLedger::load(repo.ledger_path()).unwrap();
        assert_eq!(ledger.len(), 1, "ledger must survive a failed commit");
    }

    #[test]
    fn commit_carries_forward_unstaged_files() {
        let (dir, _repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        add(dir.path(), &["a.txt", "b.txt"]);
        cmd_commit(dir.path()).unwrap();

        fs::write(dir.path().join("a.txt"), "a2").unwrap();
        add(dir.path(), &["a.txt"]);
        cmd_commit(dir.path()).unwrap();

        assert_eq!(fs::read(dir.path().join(".kv/commit/v2/a.txt")).unwrap(), b"a2");
        assert_eq!(fs::read(dir.path().join(".kv/commit/v2/b.txt")).unwrap(), b"b");
    }
}
