//! Untyped CBOR value as found in a datum attached to a UTxO.
//!
//! Plutus data uses a small subset of CBOR: maps, lists, constructor tags, byte strings
//! and integers. Long byte strings are chunked into indefinite length byte strings, and
//! lists are usually indefinite length, so both forms are accepted when decoding.

use minicbor::{
    data::{Int, Tag, Type},
    decode, encode,
    encode::Write,
    Decode, Decoder, Encode, Encoder,
};

use crate::error::{Error, Result};

/// Maximum chunk length of a byte string inside Plutus data.
const BYTES_CHUNK_SIZE: usize = 64;

/// Deepest nesting of arrays, maps and tags accepted when decoding.
pub(crate) const MAX_NESTING_DEPTH: usize = 128;

/// A decoded, untyped CBOR value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlutusData {
    /// Integer, covering the whole CBOR range (-2^64 .. 2^64-1).
    Integer(i128),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Text string. Not produced by Plutus itself, but valid CBOR.
    Text(String),
    /// List of values, in encoded order.
    List(Vec<PlutusData>),
    /// Map of key/value pairs, in encoded order.
    Map(Vec<(PlutusData, PlutusData)>),
    /// Tagged value, e.g. a Plutus constructor.
    Tagged(u64, Box<PlutusData>),
}

impl PlutusData {
    /// Decode a value from raw CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::Cbor` if the bytes are not CBOR, use an unsupported data type,
    /// are nested deeper than 128 levels or have trailing data.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let mut d = Decoder::new(bytes);
        let value = PlutusData::decode(&mut d, &mut ())?;
        if d.position() != bytes.len() {
            return Err(Error::Cbor(decode::Error::message(format!(
                "{} trailing bytes after the datum",
                bytes.len().saturating_sub(d.position())
            ))));
        }
        Ok(value)
    }

    /// Encode the value to CBOR bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::CborEncode` if an integer is out of the CBOR range.
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        minicbor::to_vec(self).map_err(|e| Error::CborEncode(e.to_string()))
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            PlutusData::Integer(_) => "integer",
            PlutusData::Bytes(_) => "byte string",
            PlutusData::Text(_) => "text string",
            PlutusData::List(_) => "list",
            PlutusData::Map(_) => "map",
            PlutusData::Tagged(..) => "tagged value",
        }
    }
}

impl<'b, C> Decode<'b, C> for PlutusData {
    fn decode(d: &mut Decoder<'b>, _ctx: &mut C) -> std::result::Result<Self, decode::Error> {
        decode_nested(d, 0)
    }
}

/// Decode a value found `depth` containers below the top level.
fn decode_nested(
    d: &mut Decoder<'_>, depth: usize,
) -> std::result::Result<PlutusData, decode::Error> {
    if depth > MAX_NESTING_DEPTH {
        return Err(decode::Error::message(format!(
            "datum is nested deeper than {MAX_NESTING_DEPTH} levels"
        ))
        .at(d.position()));
    }
    match d.datatype()? {
        Type::U8
        | Type::U16
        | Type::U32
        | Type::U64
        | Type::I8
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Int => Ok(PlutusData::Integer(i128::from(d.int()?))),
        Type::Bytes => Ok(PlutusData::Bytes(d.bytes()?.to_vec())),
        Type::BytesIndef => {
            let mut bytes = Vec::new();
            for chunk in d.bytes_iter()? {
                bytes.extend_from_slice(chunk?);
            }
            Ok(PlutusData::Bytes(bytes))
        },
        Type::String => Ok(PlutusData::Text(d.str()?.to_owned())),
        Type::StringIndef => {
            let mut text = String::new();
            for chunk in d.str_iter()? {
                text.push_str(chunk?);
            }
            Ok(PlutusData::Text(text))
        },
        Type::Array | Type::ArrayIndef => {
            let len = d.array()?;
            let mut items = Vec::new();
            decode_entries(d, len, |d| {
                items.push(decode_nested(d, depth + 1)?);
                Ok(())
            })?;
            Ok(PlutusData::List(items))
        },
        Type::Map | Type::MapIndef => {
            let len = d.map()?;
            let mut entries = Vec::new();
            decode_entries(d, len, |d| {
                let key = decode_nested(d, depth + 1)?;
                let value = decode_nested(d, depth + 1)?;
                entries.push((key, value));
                Ok(())
            })?;
            Ok(PlutusData::Map(entries))
        },
        Type::Tag => {
            let tag = d.tag()?;
            let payload = decode_nested(d, depth + 1)?;
            Ok(PlutusData::Tagged(tag.as_u64(), Box::new(payload)))
        },
        other => {
            Err(decode::Error::message(format!(
                "unsupported CBOR data type {other} in datum"
            ))
            .at(d.position()))
        },
    }
}

/// Run `entry` once per array item or map entry, for definite and indefinite lengths.
fn decode_entries<'b>(
    d: &mut Decoder<'b>, len: Option<u64>,
    mut entry: impl FnMut(&mut Decoder<'b>) -> std::result::Result<(), decode::Error>,
) -> std::result::Result<(), decode::Error> {
    match len {
        Some(len) => {
            for _ in 0..len {
                entry(d)?;
            }
        },
        None => {
            while d.datatype()? != Type::Break {
                entry(d)?;
            }
            // Consume the break marker.
            d.set_position(d.position() + 1);
        },
    }
    Ok(())
}

impl<C> Encode<C> for PlutusData {
    fn encode<W: Write>(
        &self, e: &mut Encoder<W>, ctx: &mut C,
    ) -> std::result::Result<(), encode::Error<W::Error>> {
        match self {
            PlutusData::Integer(value) => {
                let value = Int::try_from(*value).map_err(|_| {
                    encode::Error::message(format!("integer {value} is out of the CBOR range"))
                })?;
                e.int(value)?;
            },
            PlutusData::Bytes(bytes) => {
                if bytes.len() <= BYTES_CHUNK_SIZE {
                    e.bytes(bytes)?;
                } else {
                    e.begin_bytes()?;
                    for chunk in bytes.chunks(BYTES_CHUNK_SIZE) {
                        e.bytes(chunk)?;
                    }
                    e.end()?;
                }
            },
            PlutusData::Text(text) => {
                e.str(text)?;
            },
            PlutusData::List(items) => {
                e.begin_array()?;
                for item in items {
                    item.encode(e, ctx)?;
                }
                e.end()?;
            },
            PlutusData::Map(entries) => {
                e.map(entries.len() as u64)?;
                for (key, value) in entries {
                    key.encode(e, ctx)?;
                    value.encode(e, ctx)?;
                }
            },
            PlutusData::Tagged(tag, payload) => {
                e.tag(Tag::new(*tag))?;
                payload.encode(e, ctx)?;
            },
        }
        Ok(())
    }
}
