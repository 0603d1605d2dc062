//! Command runner boundary
//!
//! Executing the platform enumeration command is an external concern; the
//! detection pipeline only sees this trait. The CLI provides the real
//! process-spawning implementation, tests provide scripted stubs.

use crate::error::Result;
use crate::host::EnumerationCommand;

/// Runs one enumeration command to completion and returns its stdout.
///
/// A non-zero exit must surface as [`crate::Error::CommandFailed`] carrying
/// the command's stderr; a process that cannot start at all surfaces as
/// [`crate::Error::CommandSpawn`]. There is no timeout: a hung platform
/// command hangs the whole operation.
pub trait CommandRunner {
    fn run(&self, command: &EnumerationCommand) -> Result<String>;
}
