//! Configuration reconciliation
//!
//! Computes the symmetric difference between the persisted device list and
//! the operator's selection, and builds the replacement list. Everything is
//! computed in full before any persistence happens; the caller writes the
//! manifest only when the outcome reports a change.

use crate::device::{DeviceKey, DeviceSet};
use crate::manifest::PersistedDeviceEntry;
use crate::select::Choice;
use std::collections::HashSet;
use tracing::warn;

/// Result of reconciling a selection against the persisted list.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOutcome {
    /// The replacement persisted list, in selection order
    pub entries: Vec<PersistedDeviceEntry>,
    /// Keys newly added by this selection
    pub added: Vec<DeviceKey>,
    /// Previously configured keys the operator deselected
    pub removed: Vec<DeviceKey>,
    /// Selected keys that failed the normalizer round-trip. These are
    /// excluded from the new list but are NOT removals: the operator did
    /// not deselect them, the data did not survive.
    pub dropped: Vec<DeviceKey>,
}

impl ReconcileOutcome {
    /// Whether persisting this outcome would change the stored list.
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty() || !self.dropped.is_empty()
    }
}

/// Build the choice list for the add/update flow: configured entries first
/// (pre-selected), then newly detected devices (not pre-selected). Labels
/// prefer a name learned from the current detection pass.
pub fn build_choices(existing: &[PersistedDeviceEntry], detected: &DeviceSet) -> Vec<Choice> {
    let mut choices = Vec::new();
    let mut offered = HashSet::new();

    for entry in existing {
        let key = entry.key();
        if !offered.insert(key.clone()) {
            continue;
        }
        let name = detected
            .get(&key)
            .and_then(|record| record.description.as_deref());
        choices.push(Choice {
            label: format!("{}  {}[configured]", key, label_name(name)),
            key,
            selected: true,
        });
    }

    for record in detected.iter() {
        let key = record.key();
        if !offered.insert(key.clone()) {
            continue;
        }
        choices.push(Choice {
            label: format!(
                "{}  {}[new]",
                key,
                label_name(record.description.as_deref())
            ),
            key,
            selected: false,
        });
    }

    choices
}

fn label_name(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} ", name),
        None => String::new(),
    }
}

/// Reconcile the operator's selection against the persisted list.
pub fn reconcile(existing: &[PersistedDeviceEntry], selection: &[DeviceKey]) -> ReconcileOutcome {
    let existing_keys: HashSet<DeviceKey> = existing.iter().map(|e| e.key()).collect();
    let final_keys: HashSet<DeviceKey> = selection.iter().cloned().collect();

    let mut outcome = ReconcileOutcome::default();
    let mut seen = HashSet::new();

    for key in selection {
        if !seen.insert(key.clone()) {
            continue;
        }
        match PersistedDeviceEntry::from_key(key) {
            Some(entry) => {
                if !existing_keys.contains(key) {
                    outcome.added.push(key.clone());
                }
                outcome.entries.push(entry);
            }
            None => {
                warn!("dropping device key that does not round-trip: {}", key);
                outcome.dropped.push(key.clone());
            }
        }
    }

    for entry in existing {
        let key = entry.key();
        if !final_keys.contains(&key) && !outcome.removed.contains(&key) {
            outcome.removed.push(key);
        }
    }

    outcome
}

/// Listing-mode remove-only flow: the final list is the persisted list minus
/// the keys selected for removal. No detection or union step.
pub fn remove_only(
    existing: &[PersistedDeviceEntry],
    selected_for_removal: &[DeviceKey],
) -> ReconcileOutcome {
    let removal: HashSet<&DeviceKey> = selected_for_removal.iter().collect();

    let mut outcome = ReconcileOutcome::default();
    for entry in existing {
        let key = entry.key();
        if removal.contains(&key) {
            if !outcome.removed.contains(&key) {
                outcome.removed.push(key);
            }
        } else {
            outcome.entries.push(entry.clone());
        }
    }
    outcome
}
