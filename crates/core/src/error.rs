//! Core error types
//!
//! Parse-level failures never appear here: a malformed line or JSON entry is
//! absorbed by the parser that saw it. Only boundary failures (enumeration
//! command, project configuration, host support, selection) propagate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The enumeration command ran but exited non-zero
    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The enumeration command could not be started at all
    #[error("failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No project configuration file was found
    #[error("no project configuration found; vmusb must be run inside a project directory")]
    ConfigurationMissing,

    /// The project configuration file exists but is not valid JSON
    #[error("project configuration is malformed: {0}")]
    ConfigurationMalformed(String),

    /// The running host has no known enumeration strategy
    #[error("USB device enumeration is not supported on host platform `{0}`")]
    UnsupportedHost(String),

    /// The interactive selector failed (terminal unavailable, I/O error)
    #[error("interactive selection failed: {0}")]
    Selection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for core results
pub type Result<T> = std::result::Result<T, Error>;
