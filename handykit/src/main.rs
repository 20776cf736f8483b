//! Inspect and edit named process launch profiles.
//!
//! Profiles live in `handykit.toml`. `handykit show` prints the launch
//! description a profile resolves to, including the fixed flags; the process
//! itself is never started.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use handykit::MapError;
use handykit::exit_codes;
use handykit::io::config::{DEFAULT_CONFIG_FILE, LaunchProfile, load_config, write_config};

#[derive(Parser)]
#[command(
    name = "handykit",
    version,
    about = "Inspect and edit named process launch profiles"
)]
struct Cli {
    /// Path to the profile file.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the launch description of a profile as JSON.
    Show { profile: String },
    /// Print profile names, one per line.
    List,
    /// Add a new profile. Fails if the name is taken.
    Add {
        profile: String,
        /// Executable path or name.
        #[arg(long)]
        exe: String,
        /// Argument string (a command line, split into argv when launched).
        #[arg(long, allow_hyphen_values = true)]
        args: Option<String>,
        /// Working directory of the launched process.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Remove a profile and print it.
    Remove { profile: String },
    /// Check that the profile file parses and is valid.
    Validate,
}

fn main() {
    handykit::logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    debug!(config = %cli.config.display(), "starting");
    match cli.command {
        Command::Show { profile } => cmd_show(&cli.config, &profile),
        Command::List => cmd_list(&cli.config),
        Command::Add {
            profile,
            exe,
            args,
            dir,
        } => cmd_add(
            &cli.config,
            &profile,
            LaunchProfile {
                name: exe,
                args,
                working_directory: dir,
            },
        ),
        Command::Remove { profile } => cmd_remove(&cli.config, &profile),
        Command::Validate => cmd_validate(&cli.config),
    }
}

fn cmd_show(config: &Path, profile: &str) -> Result<()> {
    let cfg = load_config(config)?;
    let launch = cfg.launch(profile)?;
    print_json(&launch)
}

fn cmd_list(config: &Path) -> Result<()> {
    let cfg = load_config(config)?;
    for name in cfg.profiles.keys() {
        println!("{name}");
    }
    Ok(())
}

fn cmd_add(config: &Path, key: &str, profile: LaunchProfile) -> Result<()> {
    let mut cfg = load_config(config)?;
    cfg.add_profile(key, profile)?;
    write_config(config, &cfg).context("save profiles")
}

fn cmd_remove(config: &Path, key: &str) -> Result<()> {
    let mut cfg = load_config(config)?;
    let removed = cfg.remove_profile(key)?;
    write_config(config, &cfg).context("save profiles")?;
    print_json(&removed)
}

fn cmd_validate(config: &Path) -> Result<()> {
    let cfg = load_config(config)?;
    println!("ok: {} profile(s)", cfg.profiles.len());
    Ok(())
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<MapError>() {
        Some(MapError::KeyNotFound) => exit_codes::PROFILE_NOT_FOUND,
        Some(MapError::DuplicateKey) => exit_codes::PROFILE_EXISTS,
        _ => exit_codes::INVALID,
    }
}
