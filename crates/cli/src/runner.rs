//! Process-based command runner
//!
//! Blocking execution of one platform enumeration command. No timeout: a
//! hung platform command hangs the run.

use std::process::Command;
use vmusb_core::host::EnumerationCommand;
use vmusb_core::{CommandRunner, Error, Result};

pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, command: &EnumerationCommand) -> Result<String> {
        let output = Command::new(command.program)
            .args(command.args)
            .output()
            .map_err(|source| Error::CommandSpawn {
                command: command.display(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: command.display(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
