//! Device records, keys, and deduplication
//!
//! A [`DeviceKey`] identifies a device *class* (vendor:product), not a
//! physical unit: two identical peripherals collapse to one key.

use crate::ident::{self, CanonicalId, RawId};
use std::collections::HashSet;
use std::fmt;

/// One detected USB device, with both identifiers already canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub vendor_id: CanonicalId,
    pub product_id: CanonicalId,
    /// Human-readable name from the platform tool, if it reported one
    pub description: Option<String>,
}

impl DeviceRecord {
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(&self.vendor_id, &self.product_id)
    }
}

/// The `"<vendor>:<product>"` composite used for dedup and diffing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceKey(String);

impl DeviceKey {
    pub fn new(vendor: &CanonicalId, product: &CanonicalId) -> Self {
        Self(format!("{}:{}", vendor, product))
    }

    /// Split a key back into its canonical identifiers, round-tripping both
    /// through the normalizer. Keys that do not survive yield `None`.
    pub fn parse(key: &str) -> Option<(CanonicalId, CanonicalId)> {
        let (vendor, product) = key.split_once(':')?;
        let vendor = ident::normalize(RawId::Text(vendor))?;
        let product = ident::normalize(RawId::Text(product))?;
        Some((vendor, product))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Test-only: build a key that bypasses canonicalization.
    #[cfg(test)]
    pub(crate) fn raw(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key-unique, insertion-order-preserving set of device records.
#[derive(Debug, Clone, Default)]
pub struct DeviceSet {
    records: Vec<DeviceRecord>,
    keys: HashSet<DeviceKey>,
}

impl DeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record unless its key is already present.
    ///
    /// First occurrence wins, including its description.
    pub fn insert(&mut self, record: DeviceRecord) -> bool {
        let key = record.key();
        if !self.keys.insert(key) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn contains(&self, key: &DeviceKey) -> bool {
        self.keys.contains(key)
    }

    pub fn get(&self, key: &DeviceKey) -> Option<&DeviceRecord> {
        self.records.iter().find(|r| &r.key() == key)
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Collapse a sequence of records into a key-unique [`DeviceSet`].
///
/// Both identifiers are re-normalized on the way in; callers may hand us
/// values that were already canonical, or values a parser only partially
/// cleaned up. A record whose identifiers no longer normalize is dropped.
pub fn dedupe(records: impl IntoIterator<Item = DeviceRecord>) -> DeviceSet {
    let mut set = DeviceSet::new();
    for record in records {
        let vendor = ident::normalize(RawId::Text(record.vendor_id.as_str()));
        let product = ident::normalize(RawId::Text(record.product_id.as_str()));
        let (Some(vendor_id), Some(product_id)) = (vendor, product) else {
            continue;
        };
        set.insert(DeviceRecord {
            vendor_id,
            product_id,
            description: record.description,
        });
    }
    set
}
