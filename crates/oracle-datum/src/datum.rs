//! Oracle datum decoding.
//!
//! The datum attached to an oracle UTxO is a Plutus constructor wrapping:
//!
//! 0. a byte keyed map holding the published fields,
//! 1. an internal identifier,
//! 2. a constructor wrapping the publication timestamp (POSIX milliseconds),
//!
//! optionally followed by further elements (the publisher credential on-chain).
//!
//! Field order inside the map is not preserved on-chain, so the decoded fields are put
//! back into a fixed canonical order.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    document::{DocValue, Document},
    error::{Error, Result},
    fixed_point::FixedPoint,
    plutus_data::PlutusData,
};

/// Constructor tag of the datum envelope.
const ENVELOPE_TAG: u64 = 121;
/// Constructor tag wrapping the timestamp.
const TIMESTAMP_TAG: u64 = 122;
/// Key of the field holding the fixed point pairs.
const VALUE_FIELD: &str = "value";
/// Separator between the two labels of the `name` field.
const NAME_SEPARATOR: char = '|';
/// Number of fixed point pairs a `value` field holds.
const PRICE_PAIR_LEN: usize = 2;

/// Canonical order of the top level datum fields.
pub const CANONICAL_FIELDS: [&str; 7] = [
    "@context",
    "type",
    "name",
    "value",
    "valueReference",
    "identifier",
    "_:contentSignature",
];

/// The datum envelope, with its field map still undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct OracleDatum {
    /// Constructor tag of the envelope.
    pub constructor: u64,
    /// Byte keyed field map.
    pub fields: PlutusData,
    /// Internal identifier of the datum.
    pub identifier: PlutusData,
    /// Publication timestamp in POSIX milliseconds.
    pub timestamp: u64,
    /// Envelope elements after the timestamp.
    pub trailing: Vec<PlutusData>,
}

impl OracleDatum {
    /// Parse the envelope of a datum.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cbor` if the bytes are not CBOR, and `Error::MalformedDatum` if the
    /// envelope is not a constructor holding at least a field map, an identifier and a
    /// timestamp.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        Self::from_plutus_data(PlutusData::from_cbor(bytes)?)
    }

    /// Parse the envelope from an already decoded value.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedDatum` if the value is not a datum envelope.
    pub fn from_plutus_data(value: PlutusData) -> Result<Self> {
        let PlutusData::Tagged(constructor, payload) = value else {
            return Err(Error::MalformedDatum(format!(
                "expected a constructor tagged datum, got a {}",
                value.kind()
            )));
        };
        let PlutusData::List(items) = *payload else {
            return Err(Error::MalformedDatum(format!(
                "expected the datum constructor to hold a list, got a {}",
                payload.kind()
            )));
        };
        let mut items = items.into_iter();
        let (Some(fields), Some(identifier), Some(timestamp)) =
            (items.next(), items.next(), items.next())
        else {
            return Err(Error::MalformedDatum(
                "the datum constructor must hold at least 3 elements".to_string(),
            ));
        };
        if !matches!(fields, PlutusData::Map(_)) {
            return Err(Error::MalformedDatum(format!(
                "expected the first datum element to be a map, got a {}",
                fields.kind()
            )));
        }

        Ok(Self {
            constructor,
            fields,
            identifier,
            timestamp: decode_timestamp(&timestamp)?,
            trailing: items.collect(),
        })
    }

    /// Build an envelope around a canonical datum.
    #[must_use]
    pub fn new(datum: &CanonicalDatum, identifier: PlutusData, timestamp: u64) -> Self {
        Self {
            constructor: ENVELOPE_TAG,
            fields: datum.to_plutus_data(),
            identifier,
            timestamp,
            trailing: Vec::new(),
        }
    }

    /// Decode the field map into the canonical datum and its price pair.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedDatum`, `Error::MissingField` or `Error::MalformedNumber`
    /// if the fields do not have the oracle datum shape. `Error::MissingField` is the
    /// malformed datum case where one of the canonical fields is absent; callers
    /// treating malformed datums alike should match both variants.
    pub fn decode(&self) -> Result<(CanonicalDatum, PricePair)> {
        let PlutusData::Map(entries) = &self.fields else {
            return Err(Error::MalformedDatum(format!(
                "expected the field map, got a {}",
                self.fields.kind()
            )));
        };
        let datum = CanonicalDatum::from_document(decode_map(entries)?)?;
        let prices = PricePair::from_datum(&datum)?;
        Ok((datum, prices))
    }

    /// Publication time, if the timestamp is in the representable range.
    #[must_use]
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.timestamp)
            .ok()
            .and_then(DateTime::from_timestamp_millis)
    }

    /// The internal identifier for display: text when it is a UTF-8 byte string, hex for
    /// other byte strings.
    #[must_use]
    pub fn identifier_display(&self) -> String {
        match &self.identifier {
            PlutusData::Bytes(bytes) => {
                match DocValue::from_bytes(bytes) {
                    DocValue::Text(text) => text,
                    _ => hex::encode(bytes),
                }
            },
            PlutusData::Integer(value) => value.to_string(),
            other => format!("{other:?}"),
        }
    }

    /// Encode the envelope back to its on-chain form.
    #[must_use]
    pub fn to_plutus_data(&self) -> PlutusData {
        let mut items = vec![
            self.fields.clone(),
            self.identifier.clone(),
            PlutusData::Tagged(
                TIMESTAMP_TAG,
                Box::new(PlutusData::List(vec![PlutusData::Integer(i128::from(
                    self.timestamp,
                ))])),
            ),
        ];
        items.extend(self.trailing.iter().cloned());
        PlutusData::Tagged(self.constructor, Box::new(PlutusData::List(items)))
    }

    /// Encode the envelope back to CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::CborEncode` if encoding fails.
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        self.to_plutus_data().to_cbor()
    }
}

/// Decode the datum bytes into the canonical datum and its price pair.
///
/// # Errors
///
/// Returns `Error::Cbor` if the bytes are not CBOR. A datum without the oracle datum
/// shape is reported as `Error::MalformedDatum`, or as `Error::MissingField` when one
/// of the canonical fields is absent, and a bad price pair as `Error::MalformedNumber`.
pub fn decode(raw: &[u8]) -> Result<(CanonicalDatum, PricePair)> {
    OracleDatum::from_cbor(raw)?.decode()
}

/// Datum fields in their canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalDatum {
    /// `@context` field.
    #[serde(rename = "@context")]
    pub context: DocValue,
    /// `type` field.
    #[serde(rename = "type")]
    pub kind: DocValue,
    /// `name` field, the two price labels separated by `|`.
    pub name: DocValue,
    /// `value` field, the two decoded fixed point pairs.
    pub value: DocValue,
    /// `valueReference` field.
    #[serde(rename = "valueReference")]
    pub value_reference: DocValue,
    /// `identifier` field.
    pub identifier: DocValue,
    /// `_:contentSignature` field.
    #[serde(rename = "_:contentSignature")]
    pub content_signature: DocValue,
}

impl CanonicalDatum {
    /// Put a decoded field map into canonical order.
    ///
    /// Fields outside the canonical set are not carried over.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingField` for the first canonical field that is absent.
    pub fn from_document(mut doc: Document) -> Result<Self> {
        let [context, kind, name, value, value_reference, identifier, content_signature] =
            CANONICAL_FIELDS;
        let mut take = |field: &'static str| doc.remove(field).ok_or(Error::MissingField(field));
        Ok(Self {
            context: take(context)?,
            kind: take(kind)?,
            name: take(name)?,
            value: take(value)?,
            value_reference: take(value_reference)?,
            identifier: take(identifier)?,
            content_signature: take(content_signature)?,
        })
    }

    /// The fields paired with their keys, in canonical order.
    #[must_use]
    pub fn fields(&self) -> [(&'static str, &DocValue); 7] {
        let [context, kind, name, value, value_reference, identifier, content_signature] =
            CANONICAL_FIELDS;
        [
            (context, &self.context),
            (kind, &self.kind),
            (name, &self.name),
            (value, &self.value),
            (value_reference, &self.value_reference),
            (identifier, &self.identifier),
            (content_signature, &self.content_signature),
        ]
    }

    /// Encode the fields back to a byte keyed map, in canonical order.
    #[must_use]
    pub fn to_plutus_data(&self) -> PlutusData {
        self.fields()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect::<Document>()
            .to_plutus_data()
    }

    /// Pretty printed JSON of the datum.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A decoded price with its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    /// Label taken from the datum `name` field, e.g. `ADA-USD`.
    pub label: String,
    /// The price.
    pub value: FixedPoint,
}

/// The two prices published by the oracle, one per direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePair {
    /// First price, labelled by the first half of `name`.
    pub forward: PriceQuote,
    /// Second price, labelled by the second half of `name`.
    pub inverse: PriceQuote,
}

impl PricePair {
    /// Extract the price pair from a canonical datum.
    ///
    /// # Errors
    ///
    /// Returns `Error::MalformedDatum` if `name` is not two labels or `value` is not two
    /// decoded numbers.
    pub fn from_datum(datum: &CanonicalDatum) -> Result<Self> {
        let name = datum.name.as_text().ok_or_else(|| {
            Error::MalformedDatum("the `name` field must be text".to_string())
        })?;
        let (forward_label, inverse_label) = split_labels(name)?;
        let DocValue::List(values) = &datum.value else {
            return Err(Error::MalformedDatum(
                "the `value` field must be a list".to_string(),
            ));
        };
        let [DocValue::Number(forward), DocValue::Number(inverse)] = values.as_slice() else {
            return Err(Error::MalformedDatum(format!(
                "the `value` field must hold exactly {PRICE_PAIR_LEN} numbers"
            )));
        };
        Ok(Self {
            forward: PriceQuote {
                label: forward_label,
                value: *forward,
            },
            inverse: PriceQuote {
                label: inverse_label,
                value: *inverse,
            },
        })
    }

    /// Both quotes, in datum order.
    #[must_use]
    pub fn quotes(&self) -> [&PriceQuote; 2] {
        [&self.forward, &self.inverse]
    }
}

/// Split a `name` field into its two labels.
///
/// # Errors
///
/// Returns `Error::MalformedDatum` unless the name holds exactly one `|` with a
/// non-empty label on each side.
pub fn split_labels(name: &str) -> Result<(String, String)> {
    match name.split_once(NAME_SEPARATOR) {
        Some((first, second))
            if !first.is_empty() && !second.is_empty() && !second.contains(NAME_SEPARATOR) =>
        {
            Ok((first.to_string(), second.to_string()))
        },
        _ => {
            Err(Error::MalformedDatum(format!(
                "name `{name}` must be two labels separated by a single `{NAME_SEPARATOR}`"
            )))
        },
    }
}

/// Read the timestamp out of its constructor wrapper.
fn decode_timestamp(value: &PlutusData) -> Result<u64> {
    let malformed = || {
        Error::MalformedDatum(format!(
            "expected a constructor wrapping the timestamp, got a {}",
            value.kind()
        ))
    };
    let PlutusData::Tagged(_, payload) = value else {
        return Err(malformed());
    };
    let PlutusData::List(items) = payload.as_ref() else {
        return Err(malformed());
    };
    match items.first() {
        Some(PlutusData::Integer(millis)) => {
            u64::try_from(*millis).map_err(|_| {
                Error::MalformedDatum(format!("timestamp {millis} is out of range"))
            })
        },
        _ => Err(malformed()),
    }
}

/// Decode a byte keyed map into a text keyed document.
fn decode_map(entries: &[(PlutusData, PlutusData)]) -> Result<Document> {
    let mut doc = Document::new();
    for (key, value) in entries {
        let key = decode_key(key)?;
        let value = decode_field(&key, value)?;
        doc.insert(key, value);
    }
    Ok(doc)
}

/// Decode a map key from bytes to text.
fn decode_key(key: &PlutusData) -> Result<String> {
    match key {
        PlutusData::Bytes(bytes) => {
            String::from_utf8(bytes.clone()).map_err(|_| {
                Error::MalformedDatum(format!("map key 0x{} is not UTF-8", hex::encode(bytes)))
            })
        },
        other => {
            Err(Error::MalformedDatum(format!(
                "expected a byte string map key, got a {}",
                other.kind()
            )))
        },
    }
}

/// Decode the value stored under `key` in a map.
fn decode_field(key: &str, value: &PlutusData) -> Result<DocValue> {
    match value {
        PlutusData::List(items) if key == VALUE_FIELD => decode_value_pairs(items),
        PlutusData::List(items) => decode_list(items),
        PlutusData::Bytes(bytes) => Ok(DocValue::from_bytes(bytes)),
        PlutusData::Integer(value) => Ok(DocValue::Integer(*value)),
        PlutusData::Map(entries) => Ok(DocValue::Document(decode_map(entries)?)),
        PlutusData::Text(_) | PlutusData::Tagged(..) => {
            Err(Error::MalformedDatum(format!(
                "unexpected {} under key `{key}`",
                value.kind()
            )))
        },
    }
}

/// Decode the list of fixed point pairs held by a `value` field.
fn decode_value_pairs(items: &[PlutusData]) -> Result<DocValue> {
    if items.len() != PRICE_PAIR_LEN {
        return Err(Error::MalformedDatum(format!(
            "`{VALUE_FIELD}` must hold exactly {PRICE_PAIR_LEN} fixed point pairs, found {}",
            items.len()
        )));
    }
    items
        .iter()
        .map(|pair| FixedPoint::from_plutus_data(pair).map(DocValue::Number))
        .collect::<Result<Vec<_>>>()
        .map(DocValue::List)
}

/// Decode the elements of a list, in order.
fn decode_list(items: &[PlutusData]) -> Result<DocValue> {
    items
        .iter()
        .map(decode_element)
        .collect::<Result<Vec<_>>>()
        .map(DocValue::List)
}

/// Decode a single list element. Tagged elements are unwrapped to their payload.
fn decode_element(item: &PlutusData) -> Result<DocValue> {
    match item {
        PlutusData::Tagged(_, payload) => decode_element(payload),
        PlutusData::Map(entries) => Ok(DocValue::Document(decode_map(entries)?)),
        PlutusData::List(items) => decode_list(items),
        PlutusData::Bytes(bytes) => Ok(DocValue::from_bytes(bytes)),
        PlutusData::Integer(value) => Ok(DocValue::Integer(*value)),
        PlutusData::Text(_) => {
            Err(Error::MalformedDatum(format!(
                "unexpected {} in a list",
                item.kind()
            )))
        },
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    /// Datum published by the preprod oracle contract.
    const PREPROD_DATUM: &str = include_str!("../tests/data/preprod_datum.hex");

    /// Bytes of the preprod datum.
    fn preprod_datum() -> Vec<u8> {
        hex::decode(PREPROD_DATUM.trim()).expect("Error decoding fixture hex")
    }

    /// Byte string value.
    fn bytes(text: &str) -> PlutusData {
        PlutusData::Bytes(text.as_bytes().to_vec())
    }

    /// Tagged `[significand, exponent]` pair with the exponent as a 64-bit pattern.
    fn fixed_point(significand: i64, exponent: i64) -> PlutusData {
        FixedPoint::new(significand, exponent).to_plutus_data()
    }

    /// Field map holding every canonical field, with `value` replaced by `value`.
    fn fields(value: Option<PlutusData>) -> PlutusData {
        let mut entries = vec![
            (bytes("name"), bytes("ADA-USD|USD-ADA")),
            (bytes("@context"), bytes("https://schema.org")),
            (bytes("type"), bytes("PropertyValue")),
            (
                bytes("valueReference"),
                PlutusData::List(vec![PlutusData::Map(vec![
                    (bytes("@type"), bytes("PropertyValue")),
                    (bytes("name"), bytes("validFrom")),
                    (bytes("value"), PlutusData::Integer(1_695_374_220_933)),
                ])]),
            ),
            (
                bytes("identifier"),
                PlutusData::Map(vec![(bytes("propertyID"), bytes("Arkly Identifier"))]),
            ),
            (bytes("_:contentSignature"), bytes("d10c6c31")),
        ];
        if let Some(value) = value {
            entries.push((bytes("value"), value));
        }
        PlutusData::Map(entries)
    }

    /// Encode an envelope around the given field map.
    fn envelope(fields: PlutusData) -> Vec<u8> {
        OracleDatum {
            constructor: ENVELOPE_TAG,
            fields,
            identifier: bytes("04CA0001"),
            timestamp: 1_695_377_820_933,
            trailing: Vec::new(),
        }
        .to_cbor()
        .expect("Error encoding datum")
    }

    #[test]
    fn test_decode_preprod_datum() {
        let (datum, prices) = decode(&preprod_datum()).expect("Error decoding datum");

        assert_eq!(datum.context, DocValue::Text("https://schema.org".to_string()));
        assert_eq!(datum.kind, DocValue::Text("PropertyValue".to_string()));
        assert_eq!(datum.name, DocValue::Text("ADA-USD|USD-ADA".to_string()));
        assert_eq!(
            datum.value,
            DocValue::List(vec![
                DocValue::Number(FixedPoint::new(24475, -5)),
                DocValue::Number(FixedPoint::new(4_085_801_838_610_827, -15)),
            ])
        );

        let DocValue::List(references) = &datum.value_reference else {
            panic!("valueReference should be a list");
        };
        assert_eq!(references.len(), 2);
        let Some(DocValue::Document(valid_through)) = references.get(1) else {
            panic!("valueReference should hold documents");
        };
        assert_eq!(
            valid_through.get("name"),
            Some(&DocValue::Text("validThrough".to_string()))
        );
        assert_eq!(
            valid_through.get("value"),
            Some(&DocValue::Integer(1_695_377_820_933))
        );

        let DocValue::Document(identifier) = &datum.identifier else {
            panic!("identifier should be a document");
        };
        assert_eq!(
            identifier.get("value"),
            Some(&DocValue::Text(
                "urn:orcfax:d72786af-d8fa-4488-8f53-d4578b2f6f23".to_string()
            ))
        );

        assert_eq!(prices.forward.label, "ADA-USD");
        assert_eq!(prices.forward.value.to_f64().to_bits(), 0.244_75_f64.to_bits());
        assert_eq!(prices.inverse.label, "USD-ADA");
        assert_eq!(
            prices.inverse.value.to_f64().to_bits(),
            4.085_801_838_610_827_f64.to_bits()
        );
    }

    #[test]
    fn test_preprod_envelope() {
        let datum = OracleDatum::from_cbor(&preprod_datum()).expect("Error decoding envelope");
        assert_eq!(datum.constructor, ENVELOPE_TAG);
        assert_eq!(datum.timestamp, 1_695_377_820_933);
        assert_eq!(datum.identifier_display(), "04CA0001HAY2VBEC6PP7P1DSEA2V2VHY");
        assert_eq!(datum.trailing.len(), 1);
        assert_eq!(
            datum.published_at().map(|t| t.to_rfc3339()),
            Some("2023-09-22T10:17:00.933+00:00".to_string())
        );
        // The envelope re-encodes to the bytes it was read from.
        assert_eq!(datum.to_cbor().expect("Error encoding envelope"), preprod_datum());
    }

    #[test]
    fn test_canonical_json_order() {
        let (datum, _) = decode(&preprod_datum()).expect("Error decoding datum");
        let json = datum.to_json_pretty().expect("Error serializing datum");

        let positions: Vec<_> = CANONICAL_FIELDS
            .iter()
            .map(|field| json.find(&format!("\"{field}\"")).expect("field missing from JSON"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn test_round_trip() {
        let (datum, prices) = decode(&preprod_datum()).expect("Error decoding datum");

        let reencoded = OracleDatum::new(&datum, bytes("04CA0001"), 1_695_377_820_933)
            .to_cbor()
            .expect("Error encoding datum");
        let (again, again_prices) = decode(&reencoded).expect("Error decoding re-encoded datum");

        assert_eq!(again, datum);
        assert_eq!(again_prices, prices);
    }

    #[test]
    fn test_missing_value_field() {
        let result = decode(&envelope(fields(None)));
        assert!(matches!(result, Err(Error::MissingField("value"))), "{result:?}");
    }

    #[test]
    fn test_missing_type_field() {
        let PlutusData::Map(mut entries) =
            fields(Some(PlutusData::List(vec![fixed_point(1, 0), fixed_point(1, 0)])))
        else {
            panic!("fields should be a map");
        };
        entries.retain(|(key, _)| *key != bytes("type"));
        let result = decode(&envelope(PlutusData::Map(entries)));
        assert!(matches!(result, Err(Error::MissingField("type"))), "{result:?}");
    }

    #[test_case(1 ; "one pair")]
    #[test_case(3 ; "three pairs")]
    #[test_case(0 ; "no pairs")]
    fn test_value_with_wrong_count(count: usize) {
        let pairs = PlutusData::List(vec![fixed_point(1, -1); count]);
        let result = decode(&envelope(fields(Some(pairs))));
        assert!(matches!(result, Err(Error::MalformedDatum(_))), "{result:?}");
    }

    #[test]
    fn test_malformed_pair() {
        let pairs = PlutusData::List(vec![
            fixed_point(1, -1),
            PlutusData::Tagged(124, Box::new(PlutusData::List(vec![PlutusData::Integer(1)]))),
        ]);
        let result = decode(&envelope(fields(Some(pairs))));
        assert!(matches!(result, Err(Error::MalformedNumber(_))), "{result:?}");
    }

    #[test]
    fn test_fields_are_reordered() {
        let pairs = PlutusData::List(vec![fixed_point(1059, -3), fixed_point(944, -3)]);
        let (datum, prices) = decode(&envelope(fields(Some(pairs)))).expect("Error decoding");

        let keys: Vec<_> = datum.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, CANONICAL_FIELDS);
        assert_eq!(prices.forward.value.to_f64().to_bits(), 1.059_f64.to_bits());
        assert_eq!(prices.inverse.value.to_f64().to_bits(), 0.944_f64.to_bits());
    }

    #[test]
    fn test_tagged_value_under_key_is_rejected() {
        let mut entries = match fields(Some(PlutusData::List(vec![
            fixed_point(1, 0),
            fixed_point(1, 0),
        ]))) {
            PlutusData::Map(entries) => entries,
            _ => unreachable!(),
        };
        entries.push((
            bytes("extra"),
            PlutusData::Tagged(121, Box::new(PlutusData::List(vec![]))),
        ));
        let result = decode(&envelope(PlutusData::Map(entries)));
        assert!(matches!(result, Err(Error::MalformedDatum(_))), "{result:?}");
    }

    #[test]
    fn test_text_key_is_rejected() {
        let map = PlutusData::Map(vec![(
            PlutusData::Text("name".to_string()),
            bytes("ADA-USD|USD-ADA"),
        )]);
        let result = decode(&envelope(map));
        assert!(matches!(result, Err(Error::MalformedDatum(_))), "{result:?}");
    }

    #[test]
    fn test_envelope_too_short() {
        let value = PlutusData::Tagged(
            ENVELOPE_TAG,
            Box::new(PlutusData::List(vec![PlutusData::Map(vec![]), bytes("id")])),
        );
        let result = decode(&value.to_cbor().expect("Error encoding"));
        assert!(matches!(result, Err(Error::MalformedDatum(_))), "{result:?}");
    }

    #[test_case("ADA-USD|USD-ADA", Some(("ADA-USD", "USD-ADA")) ; "two labels")]
    #[test_case("ADA-USD", None ; "no separator")]
    #[test_case("A|B|C", None ; "two separators")]
    #[test_case("|USD-ADA", None ; "empty first label")]
    fn test_split_labels(name: &str, expected: Option<(&str, &str)>) {
        let result = split_labels(name).ok();
        assert_eq!(
            result,
            expected.map(|(a, b)| (a.to_string(), b.to_string()))
        );
    }
}
