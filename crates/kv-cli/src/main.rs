use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use kv_repo::RepoError;

mod cli;
mod commands;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match commands::run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(repo_err) = cause.downcast_ref::<RepoError>() {
            return match repo_err {
                RepoError::NotFound { .. } => 2,
                RepoError::Locked { .. } => 3,
                _ => 1,
            };
        }
    }
    1
}
