//! Interactive selection boundary
//!
//! Rendering a selection menu is an external concern; the reconciliation
//! flows only see this trait. The CLI provides a terminal implementation,
//! tests provide scripted ones.

use crate::device::DeviceKey;
use crate::error::Result;

/// One selectable row offered to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub key: DeviceKey,
    /// Rendered label, e.g. `046d:c52b  Logitech USB Receiver [configured]`
    pub label: String,
    /// Whether the row starts out selected
    pub selected: bool,
}

/// Presents labeled choices and returns the subset the operator chose.
///
/// `Ok(None)` means the operator cancelled; the caller must treat that as
/// "change nothing".
pub trait Selector {
    fn select(&mut self, title: &str, choices: &[Choice]) -> Result<Option<Vec<DeviceKey>>>;
}
