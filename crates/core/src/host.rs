//! Host platform detection and enumeration command table
//!
//! Each supported host has one primary enumeration command; macOS also has a
//! documented fallback. The output format enum selects the matching parser,
//! a plain function per platform format.

use crate::device::DeviceRecord;
use crate::error::{Error, Result};
use crate::parse;

/// Host platforms with a known USB enumeration strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPlatform {
    Linux,
    MacOs,
    Windows,
}

impl HostPlatform {
    /// Detect the running host from the compile-time OS identity.
    pub fn detect() -> Result<Self> {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Result<Self> {
        match os {
            "linux" => Ok(Self::Linux),
            "macos" => Ok(Self::MacOs),
            "windows" => Ok(Self::Windows),
            other => Err(Error::UnsupportedHost(other.to_string())),
        }
    }

    /// The primary enumeration command for this host.
    pub fn primary_command(&self) -> EnumerationCommand {
        match self {
            Self::Linux => EnumerationCommand {
                program: "lsusb",
                args: &[],
                format: OutputFormat::UsbList,
            },
            Self::MacOs => EnumerationCommand {
                program: "system_profiler",
                args: &["SPUSBDataType", "-json"],
                format: OutputFormat::ProfilerJson,
            },
            Self::Windows => EnumerationCommand {
                program: "powershell",
                args: &[
                    "-NoProfile",
                    "-NonInteractive",
                    "-Command",
                    "Get-PnpDevice -PresentOnly -Class USB | \
                     Select-Object InstanceId, FriendlyName | \
                     ConvertTo-Json -Compress",
                ],
                format: OutputFormat::PnpJson,
            },
        }
    }

    /// The fallback command, where the platform documents one (macOS only).
    pub fn fallback_command(&self) -> Option<EnumerationCommand> {
        match self {
            Self::MacOs => Some(EnumerationCommand {
                program: "ioreg",
                args: &["-p", "IOUSB", "-l", "-w", "0"],
                format: OutputFormat::IoregTree,
            }),
            _ => None,
        }
    }
}

/// One platform enumeration command and the shape of its stdout
#[derive(Debug, Clone, Copy)]
pub struct EnumerationCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
    pub format: OutputFormat,
}

impl EnumerationCommand {
    /// The command line as the operator would type it, for error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// The stdout shapes the platform tools produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `lsusb` line listing
    UsbList,
    /// `system_profiler` JSON device tree
    ProfilerJson,
    /// `ioreg` indented text tree
    IoregTree,
    /// Management-shell JSON array
    PnpJson,
}

impl OutputFormat {
    /// Parse raw command output with the matching parser.
    ///
    /// Malformed input degrades to an empty or partial result; per-entry
    /// failures are skipped, never fatal.
    pub fn parse(&self, raw: &str) -> Vec<DeviceRecord> {
        match self {
            Self::UsbList => parse::usb_list(raw),
            Self::ProfilerJson => parse::profiler_json(raw),
            Self::IoregTree => parse::ioreg_tree(raw),
            Self::PnpJson => parse::pnp_json(raw),
        }
    }
}
