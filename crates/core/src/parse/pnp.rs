//! Management-shell (`Get-PnpDevice`) JSON array parser
//!
//! The shell emits one object for a single device and an array for several,
//! so both shapes are accepted. Identifiers are embedded in the instance id
//! string: `USB\VID_045E&PID_07A5\6&2b1c...`.

use crate::device::DeviceRecord;
use crate::ident;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

static VID_PID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)VID_([0-9A-F]{4}).*?PID_([0-9A-F]{4})").unwrap()
});

/// Alternate field spellings, first present wins.
const INSTANCE_FIELDS: [&str; 3] = ["InstanceId", "DeviceID", "PNPDeviceID"];
const NAME_FIELDS: [&str; 2] = ["FriendlyName", "Name"];

/// Parse the management-shell device listing. Malformed JSON yields an
/// empty result; objects without a `VID_/PID_` instance id are skipped.
pub fn pnp_json(raw: &str) -> Vec<DeviceRecord> {
    let root: Value = match serde_json::from_str(raw.trim()) {
        Ok(value) => value,
        Err(e) => {
            warn!("device query output is not valid JSON: {}", e);
            return Vec::new();
        }
    };

    // A single device serializes as a bare object
    let entries = match &root {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(&root),
        _ => return Vec::new(),
    };

    entries.iter().filter_map(parse_entry).collect()
}

fn parse_entry(entry: &Value) -> Option<DeviceRecord> {
    let obj = entry.as_object()?;
    let instance_id = INSTANCE_FIELDS
        .iter()
        .find_map(|name| obj.get(*name))
        .and_then(Value::as_str)?;

    let caps = VID_PID.captures(instance_id)?;
    // Both captures are known hex
    let vendor_id = ident::normalize_hex(&caps[1])?;
    let product_id = ident::normalize_hex(&caps[2])?;

    let description = NAME_FIELDS
        .iter()
        .find_map(|name| obj.get(*name))
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(DeviceRecord {
        vendor_id,
        product_id,
        description,
    })
}
