//! Dispatch payload union

use crate::datatypes::{BitString, Blob, CivilTime, Name};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A typed value crossing the dispatch boundary.
///
/// Encoders take a `Value` matching the structure identifier; decoders
/// produce one. The variant carried must agree with the identifier; the
/// dispatcher rejects, say, `STRUCT_NAME` with an `Int` payload.
///
/// Both time-valued identifiers (UTCTime and choice-of-time) carry
/// [`Value::Time`]; the identifier selects the wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value<'a> {
    /// Distinguished name (`STRUCT_NAME`)
    Name(#[serde(borrow)] Name<'a>),
    /// Octet string (`STRUCT_OCTETS`, subject key identifier)
    Blob(#[serde(with = "serde_bytes", borrow)] Blob<'a>),
    /// Bit string (`STRUCT_BITS`, `STRUCT_KEY_USAGE`, key usage)
    Bits(#[serde(borrow)] BitString<'a>),
    /// Small signed integer (`STRUCT_INTEGER`)
    Int(i32),
    /// Little-endian two's-complement integer (`STRUCT_MULTI_BYTE_INTEGER`)
    MultiByteInt(#[serde(with = "serde_bytes", borrow)] Blob<'a>),
    /// Little-endian unsigned magnitude (`STRUCT_MULTI_BYTE_UINT`)
    MultiByteUint(#[serde(with = "serde_bytes", borrow)] Blob<'a>),
    /// Enumerated value (`STRUCT_ENUMERATED`, CRL reason code)
    Enumerated(u32),
    /// Civil UTC time (`STRUCT_UTC_TIME`, `STRUCT_CHOICE_OF_TIME`, signing time)
    Time(CivilTime),
}

impl Value<'_> {
    /// Copy any borrowed bytes so the value outlives its decode input.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Name(name) => Value::Name(name.into_owned()),
            Value::Blob(blob) => Value::Blob(Cow::Owned(blob.into_owned())),
            Value::Bits(bits) => Value::Bits(bits.into_owned()),
            Value::Int(v) => Value::Int(v),
            Value::MultiByteInt(blob) => Value::MultiByteInt(Cow::Owned(blob.into_owned())),
            Value::MultiByteUint(blob) => Value::MultiByteUint(Cow::Owned(blob.into_owned())),
            Value::Enumerated(v) => Value::Enumerated(v),
            Value::Time(t) => Value::Time(t),
        }
    }
}
