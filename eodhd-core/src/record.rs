//! Flat option records and the strategies that extract them from API payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One flattened contract row: field name to scalar JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionRecord(Map<String, Value>);

impl OptionRecord {
    /// Wrap an existing JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field lookup.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String field, if present and a JSON string.
    #[must_use]
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// Numeric field. Accepts JSON numbers and numeric strings.
    #[must_use]
    pub fn f64_field(&self, field: &str) -> Option<f64> {
        self.0.get(field).and_then(value_as_f64)
    }

    /// Field names, in map order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying JSON object.
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying JSON object.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for OptionRecord {
    fn from(m: Map<String, Value>) -> Self {
        Self(m)
    }
}

/// Interpret a JSON number or numeric string as `f64`.
#[must_use]
pub fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Ordered, in-memory table of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<OptionRecord>,
}

impl RecordSet {
    /// Empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in server order.
    #[must_use]
    pub fn records(&self) -> &[OptionRecord] {
        &self.records
    }

    /// Iterate rows in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionRecord> {
        self.records.iter()
    }

    /// Union of field names across all rows, in first-seen order.
    #[must_use]
    pub fn columns(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for name in self.records.iter().flat_map(OptionRecord::field_names) {
            if seen.insert(name) {
                out.push(name.to_string());
            }
        }
        out
    }

    /// Append a batch of rows.
    pub fn extend(&mut self, batch: impl IntoIterator<Item = OptionRecord>) {
        self.records.extend(batch);
    }

    /// Keep at most `len` rows.
    pub fn truncate(&mut self, len: usize) {
        self.records.truncate(len);
    }

    /// Consume into the row vector.
    #[must_use]
    pub fn into_records(self) -> Vec<OptionRecord> {
        self.records
    }
}

impl From<Vec<OptionRecord>> for RecordSet {
    fn from(records: Vec<OptionRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<OptionRecord> for RecordSet {
    fn from_iter<I: IntoIterator<Item = OptionRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for RecordSet {
    type Item = OptionRecord;
    type IntoIter = std::vec::IntoIter<OptionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a OptionRecord;
    type IntoIter = std::slice::Iter<'a, OptionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// How a response payload is turned into rows.
///
/// The listing and chain endpoints return differently shaped payloads, so each
/// keeps its own strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flattening {
    /// `{"data": [{"attributes": {...}}, ...]}`: one row per item's `attributes`.
    Attributes,
    /// `data` (or the whole payload when there is none) taken as-is.
    PassThrough,
}

impl Flattening {
    /// Flatten a payload.
    ///
    /// Returns `None` when the payload does not have the shape this strategy
    /// requires; for [`Attributes`](Self::Attributes) that is anything other
    /// than an object whose `data` is an array. [`PassThrough`](Self::PassThrough)
    /// accepts any payload.
    #[must_use]
    pub fn apply(self, payload: Value) -> Option<Vec<OptionRecord>> {
        match self {
            Self::Attributes => flatten_attributes(payload),
            Self::PassThrough => Some(flatten_pass_through(payload)),
        }
    }
}

fn flatten_attributes(payload: Value) -> Option<Vec<OptionRecord>> {
    let Value::Object(mut root) = payload else {
        return None;
    };
    let Value::Array(items) = root.remove("data")? else {
        return None;
    };
    Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(mut obj) => match obj.remove("attributes") {
                    Some(Value::Object(attrs)) => Some(OptionRecord(attrs)),
                    _ => None,
                },
                _ => None,
            })
            .collect(),
    )
}

fn flatten_pass_through(payload: Value) -> Vec<OptionRecord> {
    let body = match payload {
        Value::Object(mut root) if root.contains_key("data") => {
            root.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    match body {
        Value::Null => Vec::new(),
        Value::Array(items) => items.into_iter().map(row_from_value).collect(),
        other => vec![row_from_value(other)],
    }
}

fn row_from_value(v: Value) -> OptionRecord {
    match v {
        Value::Object(obj) => OptionRecord(obj),
        scalar => {
            let mut m = Map::new();
            m.insert("value".to_string(), scalar);
            OptionRecord(m)
        }
    }
}
