//! # ccommits
//!
//! Command-line front end for the Conventional Commits checker.
//!
//! `ccommits check <FILE>` validates a commit message the way git hands it to
//! a `commit-msg` hook; `ccommits install` writes such a hook.

mod config;
mod errors;

use anyhow::{Context, Result, bail};
use ccommits_syntax::{header_is_empty, parse_commit};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use config::Config;
use errors::enhance_error;

const HOOK_SCRIPT: &str = r#"#!/bin/sh
# Installed by ccommits: rejects commits whose header is not a Conventional Commit.
exec ccommits check "$1"
"#;

#[derive(Parser)]
#[command(name = "ccommits")]
#[command(about = "Conventional Commits checker for git commit messages", long_about = None)]
#[command(version)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a commit message file ("-" or nothing reads stdin)
    Check {
        file: Option<PathBuf>,
    },
    /// Install a commit-msg hook that runs `ccommits check`
    Install {
        /// Overwrite an existing commit-msg hook
        #[arg(short, long)]
        force: bool,
        /// Hooks directory (defaults to `git rev-parse --git-path hooks`)
        #[arg(long, value_name = "DIR")]
        hooks_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    config.merge_cli_args(cli.no_color);
    if !config.colored {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Check { file } => {
            if !check(file)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Install { force, hooks_dir } => install(force, hooks_dir),
    }
}

fn read_message(file: Option<&Path>) -> Result<(String, String)> {
    match file {
        Some(path) if path != Path::new("-") => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("Failed to read commit message from {:?}", path))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read commit message from stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

/// Returns whether the message passed.
fn check(file: Option<PathBuf>) -> Result<bool> {
    let (name, source) = read_message(file.as_deref())?;

    if header_is_empty(&source) {
        println!("{} {}", "•".dimmed(), "Empty commit message, nothing to check".dimmed());
        return Ok(true);
    }

    match parse_commit(&source) {
        Ok(message) => {
            println!("{} {}", "✓".green().bold(), message.title.to_string().bold());
            Ok(true)
        }
        Err(err) => {
            enhance_error(&err, name, source).display();
            Ok(false)
        }
    }
}

fn git_hooks_dir() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-path", "hooks"])
        .output()
        .context("Failed to run git")?;

    if !output.status.success() {
        bail!("Not inside a git repository");
    }

    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok(PathBuf::from(path))
}

fn install(force: bool, hooks_dir: Option<PathBuf>) -> Result<()> {
    let hooks_dir = match hooks_dir {
        Some(dir) => dir,
        None => git_hooks_dir()?,
    };
    let hook_path = hooks_dir.join("commit-msg");

    if hook_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            hook_path.display()
        );
    }

    fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("Failed to create directory {:?}", hooks_dir))?;
    fs::write(&hook_path, HOOK_SCRIPT)
        .with_context(|| format!("Failed to write hook to {:?}", hook_path))?;
    make_executable(&hook_path)?;

    println!(
        "{} Installed commit-msg hook: {}",
        "✓".green().bold(),
        hook_path.display()
    );

    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("Failed to make {:?} executable", path))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
