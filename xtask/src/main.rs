// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! CI steps wrap cargo and the usual linters. Two commands help operators
//! prepare a deployment:
//!
//! - `cargo xtask hash-password` prints a bcrypt hash for a credential entry
//! - `cargo xtask check-config <path>` validates a configuration file
//!   without starting the server

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, path::PathBuf, process::Output, vec};

use agenda_api::{AgendaConfig, hash_password};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Default bcrypt cost for new credential hashes.
const DEFAULT_COST: u32 = 12;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Validate a configuration file
    #[command(visible_alias = "cc")]
    CheckConfig {
        /// Path to the JSON configuration file
        path: PathBuf,
    },

    /// Print a bcrypt hash for a credential entry
    #[command(visible_alias = "hp")]
    HashPassword {
        /// The password to hash. Read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,

        /// bcrypt cost factor
        #[arg(long, default_value_t = DEFAULT_COST)]
        cost: u32,
    },

    /// Lint formatting, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::CheckConfig { path } => check_config(&path),
            Self::HashPassword { password, cost } => print_password_hash(password, cost),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
        }
    }
}

/// Run CI checks (lint, build, test)
fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Load a configuration file and build every section from it
fn check_config(path: &std::path::Path) -> Result<()> {
    let config: AgendaConfig = AgendaConfig::load(path)
        .wrap_err_with(|| format!("failed to load {}", path.display()))?;
    config
        .validate()
        .wrap_err_with(|| format!("{} is not a usable configuration", path.display()))?;

    tracing::info!(
        courses = config.courses.len(),
        credentials = config.credentials.len(),
        daily_limit = config.daily_limit,
        timezone = %config.timezone,
        "configuration is valid"
    );
    Ok(())
}

/// Hash a password and print the hash on stdout
fn print_password_hash(password: Option<String>, cost: u32) -> Result<()> {
    let password: String = match password {
        Some(password) => password,
        None => {
            let mut line = String::new();
            io::stdin()
                .read_line(&mut line)
                .wrap_err("failed to read password from stdin")?;
            line.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let hash: String = hash_password(&password, cost).wrap_err("failed to hash password")?;
    println!("{hash}");
    Ok(())
}

/// Lint formatting, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    cmd(
        "cargo",
        ["doc", "--no-deps", "--all-features", "--workspace", "--exclude", "xtask"],
    )
    .env_remove("CARGO")
    .env("RUSTUP_TOOLCHAIN", "nightly")
    .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
    .run_with_trace()?;

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_arguments() {
        let args = Args::parse_from(["cargo xtask", "hash-password", "--password", "pw", "--cost", "4"]);
        match args.command {
            Command::HashPassword { password, cost } => {
                assert_eq!(password.as_deref(), Some("pw"));
                assert_eq!(cost, 4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_lint_alias_parses_and_removed_commands_are_rejected() {
        assert!(matches!(
            Args::parse_from(["cargo xtask", "l"]).command,
            Command::Lint
        ));
        assert!(Args::try_parse_from(["cargo xtask", "coverage"]).is_err());
        assert!(Args::try_parse_from(["cargo xtask", "lint-typos"]).is_err());
    }

    #[test]
    fn test_check_config_rejects_missing_file() {
        assert!(check_config(std::path::Path::new("/nonexistent/agenda.json")).is_err());
    }
}
