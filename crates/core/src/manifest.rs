//! Project manifest handling (in-memory)
//!
//! The persisted configuration is a JSON document owned by the wider project
//! tooling; this tool only owns the `devices.usb` array inside it. File I/O
//! stays with the caller: everything here works on `serde_json::Value` so
//! the rest of the document passes through untouched.

use crate::device::DeviceKey;
use crate::ident::{self, CanonicalId, RawId};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::warn;

/// The standard manifest file name, searched for in ancestor directories.
pub const MANIFEST_FILE: &str = "devvm.json";

/// One persisted device entry. Names are ephemeral (re-detected each run)
/// and deliberately not part of the on-disk shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedDeviceEntry {
    pub vendor_id: CanonicalId,
    pub product_id: CanonicalId,
}

impl PersistedDeviceEntry {
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(&self.vendor_id, &self.product_id)
    }

    /// Rebuild an entry from a device key, round-tripping both halves
    /// through the normalizer. Keys that do not survive yield `None`.
    pub fn from_key(key: &DeviceKey) -> Option<Self> {
        let (vendor_id, product_id) = DeviceKey::parse(key.as_str())?;
        Some(Self {
            vendor_id,
            product_id,
        })
    }
}

/// Read the `devices.usb` array from a manifest document.
///
/// Both fields pass through the normalizer so historical non-canonical
/// entries self-heal on read; an entry that fails to normalize is skipped.
pub fn usb_entries(doc: &Value) -> Vec<PersistedDeviceEntry> {
    let Some(entries) = doc
        .get("devices")
        .and_then(|d| d.get("usb"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let vendor = entry.get("vendor_id").map(RawId::from).unwrap_or(RawId::Missing);
            let product = entry.get("product_id").map(RawId::from).unwrap_or(RawId::Missing);
            match (ident::normalize(vendor), ident::normalize(product)) {
                (Some(vendor_id), Some(product_id)) => Some(PersistedDeviceEntry {
                    vendor_id,
                    product_id,
                }),
                _ => {
                    warn!("skipping unparsable persisted device entry: {}", entry);
                    None
                }
            }
        })
        .collect()
}

/// Replace the `devices.usb` array, creating the `devices` object if the
/// document does not have one yet. Every unrelated field is left untouched.
pub fn set_usb_entries(doc: &mut Value, entries: &[PersistedDeviceEntry]) {
    let array = entries
        .iter()
        .map(|e| json!({ "vendor_id": e.vendor_id, "product_id": e.product_id }))
        .collect::<Vec<_>>();

    if !doc.is_object() {
        *doc = Value::Object(serde_json::Map::new());
    }
    let Some(root) = doc.as_object_mut() else {
        return;
    };
    let devices = root.entry("devices").or_insert_with(|| json!({}));
    if !devices.is_object() {
        *devices = Value::Object(serde_json::Map::new());
    }
    if let Some(devices) = devices.as_object_mut() {
        devices.insert("usb".to_string(), Value::Array(array));
    }
}

/// Render the whole document for persistence: pretty-printed, trailing
/// newline. The file is wholly replaced on write, never patched in place.
pub fn render(doc: &Value) -> String {
    let mut out = serde_json::to_string_pretty(doc).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}
