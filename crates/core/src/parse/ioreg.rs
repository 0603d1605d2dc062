//! `ioreg -p IOUSB -l -w 0` indented text-tree parser
//!
//! Fallback for hosts where the JSON profiler fails. The output is a
//! line-oriented tree: node lines open a device context, quoted property
//! lines fill it in, and a bare `}` closes the property block. A context is
//! flushed (emitted if both identifiers normalized) when the next node
//! starts, when its property block closes, and once more at end of input.

use crate::device::DeviceRecord;
use crate::ident::{self, RawId};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Tree-node markers at increasing nesting depth, matched against the
/// whitespace-trimmed line.
const NODE_PREFIXES: [&str; 3] = ["+-o", "| +-o", "|   +-o"];

static ID_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(idVendor|idProduct)" = (\S+)"#).unwrap());

static NAME_PROP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""USB Product Name" = "([^"]*)""#).unwrap());

#[derive(Default)]
struct Pending {
    name: Option<String>,
    vendor: Option<String>,
    product: Option<String>,
}

impl Pending {
    /// Emit a record if both identifiers were captured and normalize.
    fn flush(self, records: &mut Vec<DeviceRecord>) {
        let (Some(vendor), Some(product)) = (self.vendor, self.product) else {
            return;
        };
        // The raw values are 0x-prefixed hex or bare decimal; the
        // normalizer infers the form.
        let vendor_id = ident::normalize(RawId::Text(&vendor));
        let product_id = ident::normalize(RawId::Text(&product));
        let (Some(vendor_id), Some(product_id)) = (vendor_id, product_id) else {
            debug!("skipping ioreg node with unparsable ids {}/{}", vendor, product);
            return;
        };
        records.push(DeviceRecord {
            vendor_id,
            product_id,
            description: self.name,
        });
    }
}

/// Parse an `ioreg` tree listing.
pub fn ioreg_tree(raw: &str) -> Vec<DeviceRecord> {
    let mut records = Vec::new();
    let mut pending: Option<Pending> = None;

    for line in raw.lines() {
        let trimmed = line.trim_start();

        if NODE_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            if let Some(done) = pending.take() {
                done.flush(&mut records);
            }
            pending = Some(Pending {
                name: node_title(trimmed),
                ..Pending::default()
            });
            continue;
        }

        // A bare `}` (behind the `|` gutter) closes the property block
        if line.trim_start_matches([' ', '|']).trim_end() == "}" {
            if let Some(done) = pending.take() {
                done.flush(&mut records);
            }
            continue;
        }

        let Some(device) = pending.as_mut() else {
            continue;
        };
        if let Some(caps) = NAME_PROP.captures(line) {
            device.name = Some(caps[1].to_string());
        } else if let Some(caps) = ID_PROP.captures(line) {
            let value = caps[2].to_string();
            match &caps[1] {
                "idVendor" => device.vendor = Some(value),
                _ => device.product = Some(value),
            }
        }
    }

    // Trailing unflushed context
    if let Some(done) = pending {
        done.flush(&mut records);
    }

    records
}

/// Device title from a node line: the text between the node marker and the
/// `@` address (`+-o USB2.0 Hub@01100000  <class ...>`). Nodes without an
/// address (the registry root) carry no usable name.
fn node_title(trimmed: &str) -> Option<String> {
    let after_marker = trimmed.split_once("+-o ")?.1;
    let title = after_marker.split_once('@')?.0.trim();
    (!title.is_empty()).then(|| title.to_string())
}
