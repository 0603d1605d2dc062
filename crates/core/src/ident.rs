//! Canonical USB identifier normalization
//!
//! Vendor and product identifiers arrive from the platform tools in wildly
//! inconsistent shapes: JSON numbers, bare hex, `0x`-prefixed hex, plain
//! decimal, and annotated strings like `"0x046d  (Logitech Inc.)"`. This
//! module collapses all of them into one canonical form: exactly four
//! lowercase hexadecimal characters.

use serde::Serialize;
use std::fmt;

/// A normalized USB identifier: exactly 4 lowercase hex characters.
///
/// Every identifier stored or emitted downstream is one of these; anything
/// that fails normalization is rejected before it can be stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CanonicalId(String);

impl CanonicalId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical rendering of a numeric identifier value: lowercase hex,
    /// zero-padded to width 4, truncated to the last 4 characters if wider.
    fn from_value(value: u64) -> Self {
        let hex = format!("{:04x}", value);
        Self(hex[hex.len() - 4..].to_string())
    }
}

impl fmt::Display for CanonicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An identifier value of unknown shape, as received from a platform tool.
#[derive(Debug, Clone, Copy)]
pub enum RawId<'a> {
    /// The field was absent entirely
    Missing,
    /// A numeric value (e.g. a JSON number)
    Number(u64),
    /// A textual value: decimal, bare hex, or `0x`-prefixed hex
    Text(&'a str),
}

impl<'a> From<&'a serde_json::Value> for RawId<'a> {
    fn from(value: &'a serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(v) => RawId::Number(v),
                None => RawId::Missing,
            },
            serde_json::Value::String(s) => RawId::Text(s),
            _ => RawId::Missing,
        }
    }
}

/// Normalize an identifier of unknown shape into its canonical form.
///
/// Textual inputs are disambiguated as follows:
/// - `0x`-prefixed: hex.
/// - Exactly 4 decimal digits: decimal, unless the decimal value is >= 4096,
///   in which case the digits are reinterpreted as hex. USB identifiers are
///   conventionally hex, and a 4-numeral value that large is far more likely
///   a hex id than a huge decimal vendor code. This threshold is a deliberate
///   trade-off; do not change it without real device data.
/// - 4 hex digits with at least one `a`-`f` letter: hex, unambiguously.
/// - Any-length hex-digit-only string: hex if it contains a letter,
///   decimal otherwise.
/// - Anything else: best-effort decimal (non-numeric content is invalid).
pub fn normalize(raw: RawId<'_>) -> Option<CanonicalId> {
    let value = match raw {
        RawId::Missing => return None,
        RawId::Number(n) => n,
        RawId::Text(s) => {
            let s = s.trim().to_ascii_lowercase();
            if let Some(rest) = s.strip_prefix("0x") {
                parse_leading(rest, 16)?
            } else if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
                let dec = parse_leading(&s, 10)?;
                if dec >= 4096 {
                    parse_leading(&s, 16)?
                } else {
                    dec
                }
            } else if !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit()) {
                if s.bytes().all(|b| b.is_ascii_digit()) {
                    parse_leading(&s, 10)?
                } else {
                    parse_leading(&s, 16)?
                }
            } else {
                parse_leading(&s, 10)?
            }
        }
    };

    Some(CanonicalId::from_value(value))
}

/// Normalize a string that is already known to be hex (e.g. a regex capture
/// of exactly four hex digits). Equivalent to prefixing with `0x`.
pub fn normalize_hex(s: &str) -> Option<CanonicalId> {
    let s = s.trim().to_ascii_lowercase();
    let digits = s.strip_prefix("0x").unwrap_or(&s);
    parse_leading(digits, 16).map(CanonicalId::from_value)
}

/// Parse the longest leading run of digits valid in `radix`.
///
/// The platform tools annotate values in place (`"0x046d  (Logitech Inc.)"`),
/// so strict whole-string parsing would reject real data. An empty run is
/// invalid, as is a run too wide for u64.
fn parse_leading(s: &str, radix: u32) -> Option<u64> {
    let end = s
        .bytes()
        .position(|b| !(b as char).is_digit(radix))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    u64::from_str_radix(&s[..end], radix).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm_text(s: &str) -> Option<String> {
        normalize(RawId::Text(s)).map(|id| id.as_str().to_string())
    }

    #[test]
    fn test_missing_is_invalid() {
        assert!(normalize(RawId::Missing).is_none());
    }

    #[test]
    fn test_numeric_input() {
        assert_eq!(
            normalize(RawId::Number(1133)).unwrap().as_str(),
            "046d" // Logitech
        );
        assert_eq!(normalize(RawId::Number(0)).unwrap().as_str(), "0000");
        assert_eq!(normalize(RawId::Number(65535)).unwrap().as_str(), "ffff");
        // Wider than 16 bits: rightmost 4 hex digits kept
        assert_eq!(normalize(RawId::Number(0x12345)).unwrap().as_str(), "2345");
    }

    #[test]
    fn test_numeric_round_trip() {
        for n in [0u64, 1, 255, 4095, 4096, 65535] {
            let id = normalize(RawId::Number(n)).unwrap();
            assert_eq!(u64::from_str_radix(id.as_str(), 16).unwrap(), n);
        }
    }

    #[test]
    fn test_prefixed_hex() {
        assert_eq!(norm_text("0x046d").unwrap(), "046d");
        assert_eq!(norm_text("0x46D").unwrap(), "046d");
        assert_eq!(norm_text("0x0").unwrap(), "0000");
    }

    #[test]
    fn test_prefixed_hex_with_annotation() {
        // system_profiler emits the vendor name inline
        assert_eq!(norm_text("0x046d  (Logitech Inc.)").unwrap(), "046d");
        assert!(norm_text("0xzzzz").is_none());
    }

    #[test]
    fn test_four_digit_decimal_below_threshold() {
        // 1008 decimal = 0x3f0 (HP's vendor id, as lsusb-style decimal)
        assert_eq!(norm_text("1008").unwrap(), "03f0");
        assert_eq!(norm_text("1507").unwrap(), "05e3");
        assert_eq!(norm_text("4095").unwrap(), "0fff");
    }

    #[test]
    fn test_four_digit_decimal_at_or_above_threshold_reads_as_hex() {
        assert_eq!(norm_text("5705").unwrap(), "5705");
        assert_eq!(norm_text("4096").unwrap(), "4096");
        assert_eq!(norm_text("9999").unwrap(), "9999");
    }

    #[test]
    fn test_four_hex_digits_with_letter() {
        assert_eq!(norm_text("c52b").unwrap(), "c52b");
        assert_eq!(norm_text("046d").unwrap(), "046d");
        assert_eq!(norm_text("C52B").unwrap(), "c52b");
    }

    #[test]
    fn test_longer_hex_digit_strings() {
        // All decimal digits, not 4 wide: decimal
        assert_eq!(norm_text("123456").unwrap(), "e240"); // 123456 = 0x1e240
        assert_eq!(norm_text("57").unwrap(), "0039");
        // Contains a hex letter: hex, last 4 kept
        assert_eq!(norm_text("12ab34").unwrap(), "ab34");
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(norm_text("").is_none());
        assert!(norm_text("   ").is_none());
        assert!(norm_text("usb device").is_none());
        assert!(norm_text("n/a").is_none());
    }

    #[test]
    fn test_idempotence_on_canonical_strings() {
        for s in ["0000", "046d", "c52b", "ffff", "5705", "03f0"] {
            let once = norm_text(s).unwrap();
            let twice = normalize(RawId::Text(&once)).unwrap();
            assert_eq!(once, twice.as_str());
        }
    }

    #[test]
    fn test_normalize_hex_entry_point() {
        assert_eq!(normalize_hex("046d").unwrap().as_str(), "046d");
        assert_eq!(normalize_hex("07A5").unwrap().as_str(), "07a5");
        // The digits are never re-read as decimal here
        assert_eq!(normalize_hex("1008").unwrap().as_str(), "1008");
        assert!(normalize_hex("xyz").is_none());
    }

    #[test]
    fn test_json_value_conversion() {
        let num = serde_json::json!(1133);
        assert_eq!(normalize(RawId::from(&num)).unwrap().as_str(), "046d");

        let text = serde_json::json!("0x046d");
        assert_eq!(normalize(RawId::from(&text)).unwrap().as_str(), "046d");

        let null = serde_json::Value::Null;
        assert!(normalize(RawId::from(&null)).is_none());

        let float = serde_json::json!(-1.5);
        assert!(normalize(RawId::from(&float)).is_none());
    }
}
