use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "kv",
    about = "Snapshot-based local change tracking",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty kv repository
    Init(InitArgs),
    /// Stage files for the next commit
    Add(AddArgs),
    /// Show staged, changed, and deleted paths
    Status(StatusArgs),
    /// Write staged files into a new snapshot
    Commit(CommitArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Files to stage
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct CommitArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["kv", "init"]).unwrap();
        assert!(matches!(cli.command, Command::Init(_)));
    }

    #[test]
    fn parse_init_with_path() {
        let cli = Cli::try_parse_from(["kv", "init", "/tmp/project"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.path, Some(PathBuf::from("/tmp/project")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_add_multiple_paths() {
        let cli = Cli::try_parse_from(["kv", "add", "a.txt", "b.txt"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.paths.len(), 2);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_add_without_paths() {
        let cli = Cli::try_parse_from(["kv", "add"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert!(args.paths.is_empty());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_status() {
        let cli = Cli::try_parse_from(["kv", "status"]).unwrap();
        assert!(matches!(cli.command, Command::Status(_)));
    }

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["kv", "commit"]).unwrap();
        assert!(matches!(cli.command, Command::Commit(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["kv", "--verbose", "status"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["kv", "--format", "json", "status"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert!(Cli::try_parse_from(["kv", "push"]).is_err());
    }
}
