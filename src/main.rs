//! Command-line surface for grounds.
//!
//! Generates a ledger transaction for each given document, appends it to the
//! configured ledger file, and optionally opens the involved files in the
//! OS's default program.

use std::fs::OpenOptions;
use std::io::{stdin, Write};
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::{error, info};

use libgrounds::Config;

#[derive(Parser)]
#[command(version, about = "Generates ledger transactions from document filenames")]
struct Args {
    /// File containing grounds configuration.
    #[arg(short, long)]
    config_file: PathBuf,

    /// Document(s) for which to create a transaction.
    #[arg(short, long, required = true, num_args = 1..)]
    document: Vec<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => {}
        Err(err) => {
            error!("{:#}", err);
            exit(1);
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = Config::load(&args.config_file)
        .with_context(|| format!("unable to load configuration from `{}'", args.config_file.display()))?;

    let mut failed = 0;
    for document in &args.document {
        if let Err(err) = process(&config, document) {
            error!("skipping `{}': {:#}", document.display(), err);
            failed += 1;
        }
    }

    if config.settings().open_ledger_file {
        info!("opening ledger file...");
        open_in_default_program(config.default_ledger_file())?;
    }

    ensure!(
        failed == 0,
        "failed to process {} of {} documents",
        failed,
        args.document.len()
    );

    if config.settings().pause_when_successful {
        pause()?;
    }

    Ok(())
}

fn process(config: &Config, document: &Path) -> Result<()> {
    ensure!(
        document.exists(),
        "unable to find document at `{}'",
        document.display()
    );

    let filename = document
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("document `{}' has no usable filename", document.display()))?;
    let parsed = config.parse_filename(filename)?;

    info!("generating transaction for document `{}'...", filename);
    let transaction = config.generate(&parsed);
    print!("{}", transaction);

    let ledger_file = config.ledger_file_for(&parsed);
    info!("appending transaction to ledger file `{}'...", ledger_file.display());
    let mut ledger = OpenOptions::new()
        .create(true)
        .append(true)
        .open(ledger_file)
        .with_context(|| format!("unable to open ledger file `{}'", ledger_file.display()))?;
    write!(ledger, "{}", transaction)?;

    if config.settings().open_document {
        info!("opening document file...");
        open_in_default_program(document)?;
    }

    Ok(())
}

#[cfg(target_os = "windows")]
fn open_in_default_program(file: &Path) -> Result<()> {
    Command::new("cmd")
        .args(["/C", "start", ""])
        .arg(file)
        .spawn()
        .with_context(|| format!("unable to open `{}'", file.display()))?;
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn open_in_default_program(file: &Path) -> Result<()> {
    Command::new("xdg-open")
        .arg(file)
        .spawn()
        .with_context(|| format!("unable to open `{}'", file.display()))?;
    Ok(())
}

fn pause() -> Result<()> {
    println!("Press the Enter key to exit...");
    stdin().read_line(&mut String::new())?;
    Ok(())
}
