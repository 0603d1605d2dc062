//! Detection pipeline
//!
//! Runs the host's enumeration command, parses its output with the matching
//! parser, and deduplicates the result. Strictly sequential: the command
//! runs to completion before anything is parsed.

use crate::device::{self, DeviceSet};
use crate::error::Result;
use crate::host::HostPlatform;
use crate::runner::CommandRunner;
use tracing::{debug, warn};

/// Enumerate the USB devices visible on `host`.
///
/// A primary command failure is hard, except where the platform documents a
/// fallback (macOS): there the failure is logged and the fallback runs; the
/// fallback's own failure is then hard. A successful command that yields no
/// devices is a warning, not an error.
pub fn detect_devices(host: HostPlatform, runner: &dyn CommandRunner) -> Result<DeviceSet> {
    let primary = host.primary_command();

    let (command, stdout) = match runner.run(&primary) {
        Ok(stdout) => (primary, stdout),
        Err(primary_err) => match host.fallback_command() {
            Some(fallback) => {
                warn!(
                    "`{}` failed ({}); falling back to `{}`",
                    primary.display(),
                    primary_err,
                    fallback.display()
                );
                let stdout = runner.run(&fallback)?;
                (fallback, stdout)
            }
            None => return Err(primary_err),
        },
    };

    let records = command.format.parse(&stdout);
    let devices = device::dedupe(records);

    if devices.is_empty() {
        warn!("no devices detected via `{}`", command.display());
    } else {
        debug!("detected {} device(s) via `{}`", devices.len(), command.display());
    }

    Ok(devices)
}
