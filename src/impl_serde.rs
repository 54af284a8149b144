#![cfg_attr(docsrs, doc(cfg(feature = "serde")))]

//! Provides [`serde::Serialize`] support for the cursor types.
//!
//! Values are decoded while serializing; a decoding error or an
//! [`Unknown`](crate::Kind::Unknown) value becomes a serializer error. Keys
//! are serialized in normalized form. Strings that are not valid UTF-8 are
//! serialized as bytes.

use crate::{Entry, Key, Kind, Span, Table, Value};
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        (self.start, self.end).serialize(ser)
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(self.as_str())
    }
}

#[cfg(feature = "date")]
impl Serialize for crate::DateTime {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(self)
    }
}

fn serialize_bytes<S: Serializer>(bytes: &[u8], ser: S) -> Result<S::Ok, S::Error> {
    match std::str::from_utf8(bytes) {
        Ok(text) => ser.serialize_str(text),
        Err(_) => ser.serialize_bytes(bytes),
    }
}

fn normalized_key<E: serde::ser::Error>(key: &Key<'_>) -> Result<String, E> {
    let mut buf = vec![0u8; key.decoded_len().map_err(E::custom)?];
    key.decode(&mut buf).map_err(E::custom)?;
    Ok(String::from_utf8(buf)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
}

impl Serialize for Key<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let key = normalized_key::<S::Error>(self)?;
        ser.serialize_str(&key)
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self.kind() {
            Kind::True | Kind::False => {
                ser.serialize_bool(self.as_bool().map_err(S::Error::custom)?)
            }
            Kind::Integer => ser.serialize_i64(self.as_integer().map_err(S::Error::custom)?),
            #[cfg(feature = "float")]
            Kind::Float => ser.serialize_f64(self.as_float().map_err(S::Error::custom)?),
            #[cfg(feature = "date")]
            Kind::Date => self
                .as_datetime()
                .map_err(S::Error::custom)?
                .serialize(ser),
            Kind::String => {
                let text = self.string_cow().map_err(S::Error::custom)?;
                serialize_bytes(&text, ser)
            }
            Kind::Array => {
                let mut seq = ser.serialize_seq(None)?;
                for element in self.elements() {
                    seq.serialize_element(&element.map_err(S::Error::custom)?)?;
                }
                seq.end()
            }
            Kind::InlineTable => {
                let mut map = ser.serialize_map(None)?;
                for entry in self.entries() {
                    let entry = entry.map_err(S::Error::custom)?;
                    map.serialize_entry(&entry.key(), &entry.value())?;
                }
                map.end()
            }
            kind => Err(S::Error::custom(format_args!(
                "cannot serialize {} at {}..{}",
                kind.describe(),
                self.span().start,
                self.span().end
            ))),
        }
    }
}

impl Serialize for Entry<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(Some(1))?;
        map.serialize_entry(&self.key(), &self.value())?;
        map.end()
    }
}

/// Serializes the key lines of the table as a map, without merging dotted
/// keys.
impl Serialize for Table<'_> {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        let mut map = ser.serialize_map(None)?;
        for entry in self.keys() {
            let entry = entry.map_err(S::Error::custom)?;
            map.serialize_entry(&entry.key(), &entry.value())?;
        }
        map.end()
    }
}
