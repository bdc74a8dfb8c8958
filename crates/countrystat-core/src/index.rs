//! Hash-keyed record index.
//!
//! The slot shape is decided once per index from its [`KeySpec`]: a key
//! built from one field collides across years and holds a bucket, a key
//! built from several fields identifies one row and holds it directly.

use std::collections::HashMap;

use crate::record::Record;

/// Field positions concatenated into a dataset's lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    fields: Vec<usize>,
}

impl KeySpec {
    /// Creates a key spec from field positions, in concatenation order.
    #[must_use]
    pub fn new(fields: Vec<usize>) -> Self {
        Self { fields }
    }

    /// Field positions in concatenation order.
    #[must_use]
    pub fn fields(&self) -> &[usize] {
        &self.fields
    }

    /// True when more than one field builds the key.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.fields.len() > 1
    }

    /// Highest position referenced, if any.
    #[must_use]
    pub fn max_field(&self) -> Option<usize> {
        self.fields.iter().copied().max()
    }
}

/// Contents stored under one key.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Composite keys: exactly one record.
    Single(Record),
    /// Single-field keys: every record sharing the key.
    Bucket(Vec<Record>),
}

impl Slot {
    /// Number of records in the slot.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Bucket(records) => records.len(),
        }
    }

    /// True for an empty bucket.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Key and record counts of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Distinct keys.
    pub keys: usize,
    /// Records across all slots.
    pub records: usize,
}

/// Mapping from hashed key to [`Slot`].
#[derive(Debug, Clone)]
pub struct RecordIndex {
    spec: KeySpec,
    slots: HashMap<String, Slot>,
}

impl RecordIndex {
    /// Creates an empty index for the given key layout.
    #[must_use]
    pub fn new(spec: KeySpec) -> Self {
        Self {
            spec,
            slots: HashMap::new(),
        }
    }

    /// Key layout of this index.
    #[must_use]
    pub fn spec(&self) -> &KeySpec {
        &self.spec
    }

    /// Stores a record under `key`.
    ///
    /// Composite indexes overwrite (last write wins); single-field indexes
    /// append to the key's bucket.
    pub fn insert(&mut self, key: String, record: Record) {
        if self.spec.is_composite() {
            self.slots.insert(key, Slot::Single(record));
            return;
        }
        let slot = self
            .slots
            .entry(key)
            .or_insert_with(|| Slot::Bucket(Vec::new()));
        if let Slot::Bucket(records) = slot {
            records.push(record);
        }
    }

    /// Raw slot lookup.
    #[must_use]
    pub fn slot(&self, key: &str) -> Option<&Slot> {
        self.slots.get(key)
    }

    /// The record stored under a composite key.
    #[must_use]
    pub fn single(&self, key: &str) -> Option<&Record> {
        match self.slots.get(key)? {
            Slot::Single(record) => Some(record),
            Slot::Bucket(_) => None,
        }
    }

    /// The bucket stored under a single-field key.
    #[must_use]
    pub fn bucket(&self, key: &str) -> Option<&[Record]> {
        match self.slots.get(key)? {
            Slot::Bucket(records) => Some(records),
            Slot::Single(_) => None,
        }
    }

    /// Mutable access to a bucket.
    pub fn bucket_mut(&mut self, key: &str) -> Option<&mut Vec<Record>> {
        match self.slots.get_mut(key)? {
            Slot::Bucket(records) => Some(records),
            Slot::Single(_) => None,
        }
    }

    /// Iterate all slots.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Orders every bucket most recent year first.
    pub fn sort_buckets_by_year(&mut self, year_field: &str) {
        for slot in self.slots.values_mut() {
            if let Slot::Bucket(records) = slot {
                sort_by_year_desc(records, year_field);
            }
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of records across all slots.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.slots.values().map(Slot::len).sum()
    }

    /// Key and record counts.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            keys: self.len(),
            records: self.record_count(),
        }
    }
}

/// Stable descending sort on the integer year; rows without a year sink.
pub(crate) fn sort_by_year_desc(records: &mut [Record], year_field: &str) {
    records.sort_by(|a, b| b.year(year_field).cmp(&a.year(year_field)));
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
