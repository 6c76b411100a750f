//! Text keyed document decoded from a byte keyed datum map.

use serde::{ser::SerializeMap, Serialize, Serializer};

use crate::{fixed_point::FixedPoint, plutus_data::PlutusData};

/// A decoded datum value.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Byte string that decoded as UTF-8 text.
    Text(String),
    /// Integer, kept as is.
    Integer(i128),
    /// List of decoded values, in encoded order.
    List(Vec<DocValue>),
    /// Nested document.
    Document(Document),
    /// Byte string that is not valid UTF-8.
    Bytes(Vec<u8>),
    /// Decoded `[significand, exponent]` pair.
    Number(FixedPoint),
}

impl DocValue {
    /// Decode a byte string to text, keeping the raw bytes when it is not UTF-8.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => DocValue::Text(text.to_owned()),
            Err(_) => DocValue::Bytes(bytes.to_vec()),
        }
    }

    /// Text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DocValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Encode the value back to the on-chain representation.
    ///
    /// Text is written as a byte string and numbers as constructor tagged pairs.
    #[must_use]
    pub fn to_plutus_data(&self) -> PlutusData {
        match self {
            DocValue::Text(text) => PlutusData::Bytes(text.as_bytes().to_vec()),
            DocValue::Integer(value) => PlutusData::Integer(*value),
            DocValue::List(items) => {
                PlutusData::List(items.iter().map(DocValue::to_plutus_data).collect())
            },
            DocValue::Document(doc) => doc.to_plutus_data(),
            DocValue::Bytes(bytes) => PlutusData::Bytes(bytes.clone()),
            DocValue::Number(number) => number.to_plutus_data(),
        }
    }
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocValue::Text(text) => serializer.serialize_str(text),
            DocValue::Integer(value) => serializer.serialize_i128(*value),
            DocValue::List(items) => items.serialize(serializer),
            DocValue::Document(doc) => doc.serialize(serializer),
            DocValue::Bytes(bytes) => serializer.serialize_str(&hex::encode(bytes)),
            DocValue::Number(number) => number.serialize(serializer),
        }
    }
}

/// Ordered map of text keys to decoded values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(Vec<(String, DocValue)>);

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field. An existing field with the same key is replaced in place.
    pub fn insert(&mut self, key: String, value: DocValue) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Remove a field, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<DocValue> {
        let pos = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(pos).1)
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the document has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the fields in order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Encode the document back to a byte keyed map.
    #[must_use]
    pub fn to_plutus_data(&self) -> PlutusData {
        PlutusData::Map(
            self.0
                .iter()
                .map(|(k, v)| (PlutusData::Bytes(k.as_bytes().to_vec()), v.to_plutus_data()))
                .collect(),
        )
    }
}

impl FromIterator<(String, DocValue)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, DocValue)>>(iter: T) -> Self {
        let mut doc = Document::new();
        for (key, value) in iter {
            doc.insert(key, value);
        }
        doc
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
