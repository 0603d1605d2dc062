//! `lsusb` line-listing parser
//!
//! Canonical line shape:
//! `Bus 001 Device 003: ID 046d:c52b Logitech USB Receiver`

use crate::device::DeviceRecord;
use crate::ident;
use regex::Regex;
use std::sync::LazyLock;

static ID_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ID\s+([0-9a-fA-F]{4}):([0-9a-fA-F]{4})\s*(.*)").unwrap()
});

/// Parse an `lsusb` listing. Lines without an `ID vvvv:pppp` match are
/// ignored.
pub fn usb_list(raw: &str) -> Vec<DeviceRecord> {
    let mut records = Vec::new();

    for line in raw.lines() {
        let Some(caps) = ID_LINE.captures(line) else {
            continue;
        };
        // Both captures are known hex
        let vendor = ident::normalize_hex(&caps[1]);
        let product = ident::normalize_hex(&caps[2]);
        let (Some(vendor_id), Some(product_id)) = (vendor, product) else {
            continue;
        };

        let description = caps[3].trim();
        records.push(DeviceRecord {
            vendor_id,
            product_id,
            description: (!description.is_empty()).then(|| description.to_string()),
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_line() {
        let records = usb_list("Bus 001 Device 003: ID 046d:c52b Logitech USB Receiver\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vendor_id.as_str(), "046d");
        assert_eq!(records[0].product_id.as_str(), "c52b");
        assert_eq!(
            records[0].description.as_deref(),
            Some("Logitech USB Receiver")
        );
    }

    #[test]
    fn test_description_absent() {
        let records = usb_list("Bus 002 Device 001: ID 1d6b:0003\n");
        assert_eq!(records.len(), 1);
        assert!(records[0].description.is_none());
    }

    #[test]
    fn test_uppercase_hex_is_canonicalized() {
        let records = usb_list("Bus 001 Device 004: ID 046D:C52B Logitech\n");
        assert_eq!(records[0].vendor_id.as_str(), "046d");
        assert_eq!(records[0].product_id.as_str(), "c52b");
    }

    #[test]
    fn test_non_matching_lines_ignored() {
        let raw = "\
Couldn't open device, some information will be missing
Bus 001 Device 003: ID 046d:c52b Logitech USB Receiver
garbage line
";
        assert_eq!(usb_list(raw).len(), 1);
    }

    #[test]
    fn test_empty_input() {
        assert!(usb_list("").is_empty());
    }
}
