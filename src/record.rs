//! Record types produced by header extraction.
//!
//! A [`PacketRecord`] maps category keys (one per extracted layer, plus one
//! for the capture metadata) to [`FieldMap`]s of named [`FieldValue`]s.
//! Records hold copied strings and numbers only; they never borrow from the
//! packet they were derived from.

use std::fmt;

use compact_str::CompactString;
use smallvec::SmallVec;

/// A single extracted field value.
///
/// Absence is expressed by omitting the field from its map entirely; there
/// is no null variant.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value (formatted addresses, descriptions, HTTP tokens).
    /// Uses CompactString for small-string optimization.
    Text(CompactString),
    /// Unsigned numeric value.
    Num(u64),
    /// Boolean value.
    Bool(bool),
    /// Set of flag names, e.g. TCP flags whose bit is set.
    Flags(SmallVec<[&'static str; 9]>),
    /// Nested field map, e.g. the TCP timestamp sub-header.
    Map(Box<FieldMap>),
}

impl FieldValue {
    /// Create a text value from anything string-like.
    pub fn text(value: impl AsRef<str>) -> Self {
        FieldValue::Text(CompactString::new(value.as_ref()))
    }

    /// Try to get as a string slice.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_num(&self) -> Option<u64> {
        match self {
            FieldValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as a flag-name set.
    pub fn as_flags(&self) -> Option<&[&'static str]> {
        match self {
            FieldValue::Flags(names) => Some(names.as_slice()),
            _ => None,
        }
    }

    /// Try to get as a nested field map.
    pub fn as_map(&self) -> Option<&FieldMap> {
        match self {
            FieldValue::Map(map) => Some(map.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Num(n) => write!(f, "{n}"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Flags(names) => {
                write!(f, "{{")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}")?;
                }
                write!(f, "}}")
            }
            FieldValue::Map(map) => write!(f, "{map}"),
        }
    }
}

/// Named fields of one record category.
///
/// Backed by a small inline vector; layers have well under 16 fields.
/// Insertion replaces an existing entry of the same name, and equality is
/// order-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    entries: SmallVec<[(&'static str, FieldValue); 16]>,
}

impl FieldMap {
    /// Create an empty field map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing any existing field of the same name.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Get a field value by name (linear search, but N is small).
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Check whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the map holds no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

// Order-insensitive: two maps are equal when they hold the same fields,
// regardless of insertion order.
impl PartialEq for FieldMap {
    fn eq(&self, other: &FieldMap) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl fmt::Display for FieldMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// The extracted record for one packet: category key to field map.
///
/// Category keys are unique; inserting into an occupied key replaces the
/// previous map (last write wins). Key order carries no meaning and equality
/// is order-insensitive.
#[derive(Debug, Clone, Default)]
pub struct PacketRecord {
    categories: SmallVec<[(CompactString, FieldMap); 8]>,
}

impl PacketRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a category, replacing any existing category of the same key.
    pub fn insert(&mut self, category: impl AsRef<str>, fields: FieldMap) {
        let category = category.as_ref();
        if let Some(entry) = self
            .categories
            .iter_mut()
            .find(|(k, _)| k.as_str() == category)
        {
            entry.1 = fields;
        } else {
            self.categories.push((CompactString::new(category), fields));
        }
    }

    /// Get a category's field map by key.
    pub fn get(&self, category: &str) -> Option<&FieldMap> {
        self.categories
            .iter()
            .find(|(k, _)| k.as_str() == category)
            .map(|(_, v)| v)
    }

    /// Check whether a category is present.
    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check whether the record holds no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate over (category, field map) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMap)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over category keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(k, _)| k.as_str())
    }
}

impl PartialEq for PacketRecord {
    fn eq(&self, other: &PacketRecord) -> bool {
        self.categories.len() == other.categories.len()
            && self
                .categories
                .iter()
                .all(|(key, fields)| other.get(key) == Some(fields))
    }
}

impl fmt::Display for PacketRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, fields) in self.iter() {
            writeln!(f, "{category}: {fields}")?;
        }
        Ok(())
    }
}
