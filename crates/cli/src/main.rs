//! vmusb CLI
//!
//! Manages the USB passthrough list of a VM dev project: detects the devices
//! attached to the host through the platform's own tooling, offers the union
//! of configured and detected devices for selection, and reconciles the
//! result back into the project manifest.

mod logging;
mod project;
mod prompt;
mod runner;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt::TerminalSelector;
use runner::ProcessRunner;
use std::path::{Path, PathBuf};
use tracing::warn;
use vmusb_core::{
    DeviceSet, HostPlatform, ReconcileOutcome, Selector, build_choices, detect_devices, manifest,
    reconcile, remove_only, Choice,
};

#[derive(Parser, Debug)]
#[command(name = "vmusb")]
#[command(
    author,
    version,
    about = "Manage the USB devices a project exposes to its dev VM"
)]
#[command(long_about = "
Detects the USB devices attached to this machine using the host platform's
own tooling (lsusb, system_profiler/ioreg, or the Windows device query) and
reconciles the selection into the project's devvm.json manifest.

EXAMPLES:
    # Detect devices and update the project's USB list
    vmusb add

    # Show the configured devices
    vmusb list

    # Show configured devices with freshly detected names
    vmusb list --names

    # Remove configured devices interactively
    vmusb list --remove

The manifest is found by searching the working directory and its ancestors
for devvm.json, or given explicitly with --config.
")]
struct Args {
    /// Path to the project manifest (default: search ancestor directories)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Detect attached USB devices and update the project's device list
    Add,
    /// Show the configured USB devices
    List {
        /// Re-detect attached devices to decorate the listing with names
        #[arg(long)]
        names: bool,
        /// Offer a remove-only selection over the configured entries
        #[arg(long)]
        remove: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(&args.log_level).context("Failed to setup logging")?;

    let manifest_path = project::locate(args.config.as_deref())?;

    match args.command {
        Command::Add => run_add(&manifest_path),
        Command::List { names, remove } => run_list(&manifest_path, names, remove),
    }
}

/// Full detect -> select -> reconcile -> persist flow.
fn run_add(path: &Path) -> Result<()> {
    let mut doc = project::load(path)?;
    let existing = manifest::usb_entries(&doc);

    let host = HostPlatform::detect()?;
    let detected = detect_devices(host, &ProcessRunner)?;

    let choices = build_choices(&existing, &detected);
    if choices.is_empty() {
        println!("No USB devices detected and none configured.");
        return Ok(());
    }

    let Some(selection) =
        TerminalSelector.select("Select USB devices to expose to the VM", &choices)?
    else {
        println!("Selection cancelled; configuration unchanged.");
        return Ok(());
    };

    let outcome = reconcile(&existing, &selection);
    report(&outcome);
    if !outcome.changed() {
        println!("Nothing changed; {} left untouched.", path.display());
        return Ok(());
    }

    manifest::set_usb_entries(&mut doc, &outcome.entries);
    project::save(path, &doc)?;
    println!(
        "Updated {} ({} device(s) configured).",
        path.display(),
        outcome.entries.len()
    );
    Ok(())
}

/// Show configured devices; optionally re-detect names, optionally offer a
/// remove-only reconciliation.
fn run_list(path: &Path, names: bool, remove: bool) -> Result<()> {
    let mut doc = project::load(path)?;
    let existing = manifest::usb_entries(&doc);

    if existing.is_empty() {
        println!("No USB devices configured.");
        return Ok(());
    }

    // Name re-detection is display-only: failure degrades to a bare listing
    let detected: Option<DeviceSet> = if names {
        match HostPlatform::detect().and_then(|host| detect_devices(host, &ProcessRunner)) {
            Ok(devices) => Some(devices),
            Err(e) => {
                warn!("device detection failed, listing without names: {}", e);
                None
            }
        }
    } else {
        None
    };

    println!("Configured USB devices:");
    for entry in &existing {
        let key = entry.key();
        let name = detected
            .as_ref()
            .and_then(|devices| devices.get(&key))
            .and_then(|record| record.description.as_deref());
        match name {
            Some(name) => println!("  {}  {}", key, name),
            None => println!("  {}", key),
        }
    }

    if !remove {
        return Ok(());
    }

    let choices: Vec<Choice> = existing
        .iter()
        .map(|entry| {
            let key = entry.key();
            let name = detected
                .as_ref()
                .and_then(|devices| devices.get(&key))
                .and_then(|record| record.description.as_deref());
            Choice {
                label: match name {
                    Some(name) => format!("{}  {}", key, name),
                    None => key.to_string(),
                },
                key,
                selected: false,
            }
        })
        .collect();

    let Some(selection) = TerminalSelector.select("Select USB devices to remove", &choices)?
    else {
        println!("Selection cancelled; configuration unchanged.");
        return Ok(());
    };

    let outcome = remove_only(&existing, &selection);
    report(&outcome);
    if !outcome.changed() {
        println!("Nothing selected; {} left untouched.", path.display());
        return Ok(());
    }

    manifest::set_usb_entries(&mut doc, &outcome.entries);
    project::save(path, &doc)?;
    println!(
        "Updated {} ({} device(s) configured).",
        path.display(),
        outcome.entries.len()
    );
    Ok(())
}

/// Print the added/removed report. Dropped keys are logged by the core; the
/// operator only sees deliberate changes here.
fn report(outcome: &ReconcileOutcome) {
    for key in &outcome.added {
        println!("  + {}", key);
    }
    for key in &outcome.removed {
        println!("  - {}", key);
    }
}
