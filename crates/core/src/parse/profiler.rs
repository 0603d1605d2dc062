//! `system_profiler SPUSBDataType -json` device-tree parser
//!
//! The profiler reports a tree: controllers at the root, hubs and devices
//! nested under `_items` to arbitrary depth. Identifier fields vary between
//! OS releases, so several spellings are tried in priority order.

use crate::device::DeviceRecord;
use crate::ident::{self, CanonicalId, RawId};
use serde_json::Value;
use tracing::warn;

/// Recursion guard for adversarially deep `_items` nesting.
const MAX_DEPTH: usize = 16;

/// Alternate field spellings, first present wins.
const VENDOR_FIELDS: [&str; 2] = ["vendor_id", "idVendor"];
const PRODUCT_FIELDS: [&str; 2] = ["product_id", "idProduct"];

/// Parse the profiler's JSON tree. Malformed JSON yields an empty result.
pub fn profiler_json(raw: &str) -> Vec<DeviceRecord> {
    let root: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("system_profiler output is not valid JSON: {}", e);
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    if let Some(items) = root.get("SPUSBDataType").and_then(Value::as_array) {
        for item in items {
            walk(item, 0, &mut records);
        }
    }
    records
}

fn walk(node: &Value, depth: usize, records: &mut Vec<DeviceRecord>) {
    if depth > MAX_DEPTH {
        warn!("USB device tree deeper than {} levels, truncating", MAX_DEPTH);
        return;
    }
    let Some(obj) = node.as_object() else {
        return;
    };

    let vendor = first_field(obj, &VENDOR_FIELDS);
    let product = first_field(obj, &PRODUCT_FIELDS);
    if let (Some(vendor_id), Some(product_id)) = (vendor, product) {
        records.push(DeviceRecord {
            vendor_id,
            product_id,
            description: obj
                .get("_name")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    if let Some(children) = obj.get("_items").and_then(Value::as_array) {
        for child in children {
            walk(child, depth + 1, records);
        }
    }
}

fn first_field(
    obj: &serde_json::Map<String, Value>,
    names: &[&str],
) -> Option<CanonicalId> {
    names
        .iter()
        .find_map(|name| obj.get(*name))
        .and_then(|value| ident::normalize(RawId::from(value)))
}
