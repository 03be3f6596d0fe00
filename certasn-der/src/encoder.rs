//! DER encoders for the structure catalog
//!
//! Each public encoder builds the value's content octets once, frames them
//! as a TLV, and hands the result to [`copy_out`], which owns the output
//! protocol: `None` is the sizing pass, a too-small buffer fails with
//! `MoreData { required }`, and a sufficient buffer receives the encoding.
//! Keeping the layout in a single content builder per type means the sizing
//! and writing passes cannot disagree.

use crate::types::{self, Tag};
use certasn_core::datatypes::{oid, BitString, CivilTime, Name, NameValue, Rdn, RdnAttribute, ValueType};
use certasn_core::{CodecError, CodecResult};

/// Resolve the output protocol for a finished encoding.
///
/// # Returns
///
/// The number of bytes the encoding occupies; written to `out[..n]` when a
/// buffer was supplied.
fn copy_out(encoded: &[u8], out: Option<&mut [u8]>) -> CodecResult<usize> {
    let required = encoded.len();
    match out {
        None => Ok(required),
        Some(buf) => {
            if buf.len() < required {
                return Err(CodecError::MoreData { required });
            }
            buf[..required].copy_from_slice(encoded);
            Ok(required)
        }
    }
}

/// Frame content octets as a TLV.
fn tlv(tag: Tag, content: Vec<u8>) -> Vec<u8> {
    let mut encoded =
        Vec::with_capacity(1 + types::length_of_length(content.len()) + content.len());
    encoded.push(tag.byte());
    types::write_length(&mut encoded, content.len());
    encoded.extend_from_slice(&content);
    encoded
}

/// Append a base-128 subidentifier: MSB-first, high bit set on every octet
/// but the last.
fn push_base128(out: &mut Vec<u8>, value: u32) {
    let bits = 32 - value.leading_zeros() as usize;
    let octets = bits.div_ceil(7).max(1);
    for i in (0..octets).rev() {
        let mut octet = ((value >> (7 * i)) & 0x7F) as u8;
        if i > 0 {
            octet |= 0x80;
        }
        out.push(octet);
    }
}

fn object_id_content(text: &str) -> CodecResult<Vec<u8>> {
    let components = oid::parse_components(text)?;
    let mut content = Vec::new();
    if let [first, second, rest @ ..] = components.as_slice() {
        content.push(first.wrapping_mul(40).wrapping_add(*second) as u8);
        for &component in rest {
            push_base128(&mut content, component);
        }
    }
    Ok(content)
}

/// Encode an OBJECT IDENTIFIER from dotted-decimal text.
///
/// The first two components collapse into the single octet `40*c1 + c2`;
/// the rest are base-128 subidentifiers. The caller is trusted to supply a
/// well-formed arc (`c1 in {0, 1, 2}`, `c2 < 40` under arc 0 and 1); only the
/// text shape is validated.
pub fn encode_object_id(text: &str, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::ObjectId, object_id_content(text)?), out)
}

fn int_content(value: i32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    // Drop sign-redundant leading octets until the minimal two's-complement
    // form remains.
    while start < 3
        && ((bytes[start] == 0x00 && bytes[start + 1] & 0x80 == 0)
            || (bytes[start] == 0xFF && bytes[start + 1] & 0x80 != 0))
    {
        start += 1;
    }
    bytes[start..].to_vec()
}

/// Encode a small signed INTEGER in minimal two's complement.
pub fn encode_int(value: i32, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::Integer, int_content(value)), out)
}

fn multi_byte_int_content(blob: &[u8]) -> Vec<u8> {
    let mut len = blob.len();
    // The blob is little-endian, so the sign-redundant octets are at the
    // high end.
    while len >= 2
        && ((blob[len - 1] == 0x00 && blob[len - 2] & 0x80 == 0)
            || (blob[len - 1] == 0xFF && blob[len - 2] & 0x80 != 0))
    {
        len -= 1;
    }
    if len == 0 {
        return vec![0x00];
    }
    blob[..len].iter().rev().copied().collect()
}

/// Encode a multi-byte signed INTEGER from a little-endian two's-complement
/// blob. An empty blob encodes as zero.
pub fn encode_multi_byte_int(blob: &[u8], out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::Integer, multi_byte_int_content(blob)), out)
}

fn multi_byte_uint_content(blob: &[u8]) -> Vec<u8> {
    let mut len = blob.len();
    while len > 0 && blob[len - 1] == 0x00 {
        len -= 1;
    }
    if len == 0 {
        return vec![0x00];
    }
    let mut content = Vec::with_capacity(len + 1);
    if blob[len - 1] & 0x80 != 0 {
        // Keep the value positive: an unsigned magnitude whose top bit is
        // set needs a zero sign octet.
        content.push(0x00);
    }
    content.extend(blob[..len].iter().rev());
    content
}

/// Encode a multi-byte unsigned INTEGER from a little-endian magnitude
/// blob. An empty blob encodes as zero.
pub fn encode_multi_byte_uint(blob: &[u8], out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::Integer, multi_byte_uint_content(blob)), out)
}

/// Encode an ENUMERATED value: the unsigned-integer content under the
/// ENUMERATED tag.
pub fn encode_enumerated(value: u32, out: Option<&mut [u8]>) -> CodecResult<usize> {
    let content = multi_byte_uint_content(&value.to_le_bytes());
    copy_out(&tlv(Tag::Enumerated, content), out)
}

fn bit_string_content(bits: &BitString<'_>) -> Vec<u8> {
    let data = &bits.data[..];
    let unused = bits.unused_bits as usize;
    // Unused-bit counts of 8 or more are tolerated: surplus whole octets
    // are dropped and the count folds to its low three bits.
    let (data_octets, unused_out) = if unused == 0 {
        (data.len(), 0u8)
    } else if data.len() * 8 > unused {
        ((data.len() * 8 - unused) / 8 + 1, (unused % 8) as u8)
    } else {
        (0, 0)
    };
    let mut content = Vec::with_capacity(1 + data_octets);
    content.push(unused_out);
    content.extend_from_slice(&data[..data_octets]);
    if data_octets > 0 {
        let last = content.len() - 1;
        content[last] &= 0xFFu8 << unused_out;
    }
    content
}

/// Encode a BIT STRING: the unused-bit octet followed by the data with
/// trailing unused bits zeroed.
pub fn encode_bit_string(bits: &BitString<'_>, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::BitString, bit_string_content(bits)), out)
}

/// Encode an OCTET STRING.
pub fn encode_octet_string(data: &[u8], out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::OctetString, data.to_vec()), out)
}

fn name_value_tag(value_type: ValueType) -> CodecResult<Tag> {
    match value_type {
        ValueType::Any => Err(CodecError::InvalidParameter(
            "name value requires a concrete string type",
        )),
        ValueType::Numeric => Ok(Tag::NumericString),
        ValueType::Printable => Ok(Tag::PrintableString),
        ValueType::Ia5 => Ok(Tag::Ia5String),
    }
}

/// Encode a tagged name string. The bytes pass through uninterpreted; the
/// value type only selects the tag.
pub fn encode_name_value(value: &NameValue<'_>, out: Option<&mut [u8]>) -> CodecResult<usize> {
    let tag = name_value_tag(value.value_type)?;
    copy_out(&tlv(tag, value.value.to_vec()), out)
}

fn utc_time_content(time: &CivilTime) -> CodecResult<Vec<u8>> {
    if time.year < 1950 || time.year > 2050 {
        return Err(CodecError::BadEncode("year outside the UTCTime window"));
    }
    let short_year = if time.year >= 2000 {
        time.year - 2000
    } else {
        time.year - 1900
    };
    Ok(format!(
        "{:02}{:02}{:02}{:02}{:02}{:02}Z",
        short_year, time.month, time.day, time.hour, time.minute, time.second
    )
    .into_bytes())
}

/// Encode a UTCTime (`YYMMDDHHMMSSZ`).
///
/// # Errors
///
/// `BadEncode` for years outside [1950, 2050]; two-digit years cannot
/// represent anything else.
pub fn encode_utc_time(time: &CivilTime, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&tlv(Tag::UtcTime, utc_time_content(time)?), out)
}

/// Encode a GeneralizedTime (`YYYYMMDDHHMMSSZ`).
pub fn encode_generalized_time(time: &CivilTime, out: Option<&mut [u8]>) -> CodecResult<usize> {
    let content = format!(
        "{:04}{:02}{:02}{:02}{:02}{:02}Z",
        time.year, time.month, time.day, time.hour, time.minute, time.second
    )
    .into_bytes();
    copy_out(&tlv(Tag::GeneralizedTime, content), out)
}

/// Encode a time as UTCTime when the year fits its window, GeneralizedTime
/// otherwise.
pub fn encode_choice_of_time(time: &CivilTime, out: Option<&mut [u8]>) -> CodecResult<usize> {
    if (1950..=2050).contains(&time.year) {
        encode_utc_time(time, out)
    } else {
        encode_generalized_time(time, out)
    }
}

fn rdn_attribute_tlv(attr: &RdnAttribute<'_>) -> CodecResult<Vec<u8>> {
    let mut content = tlv(Tag::ObjectId, object_id_content(&attr.object_id)?);
    let value_tag = name_value_tag(attr.value.value_type)?;
    content.extend(tlv(value_tag, attr.value.value.to_vec()));
    Ok(tlv(Tag::Sequence, content))
}

/// Encode one RDN attribute: `SEQUENCE { OID, name value }`.
pub fn encode_rdn_attribute(attr: &RdnAttribute<'_>, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&rdn_attribute_tlv(attr)?, out)
}

fn rdn_tlv(rdn: &Rdn<'_>) -> CodecResult<Vec<u8>> {
    let mut encoded_attrs = rdn
        .attributes
        .iter()
        .map(rdn_attribute_tlv)
        .collect::<CodecResult<Vec<_>>>()?;
    // DER SET OF: members ordered by their encoded octets, unsigned
    // bytewise, a shorter run before any longer run it prefixes.
    encoded_attrs.sort();
    Ok(tlv(Tag::SetOf, encoded_attrs.concat()))
}

/// Encode an RDN as a `SET OF` its attributes, sorted as DER requires.
/// Input order does not affect the output.
pub fn encode_rdn(rdn: &Rdn<'_>, out: Option<&mut [u8]>) -> CodecResult<usize> {
    copy_out(&rdn_tlv(rdn)?, out)
}

/// Encode a Name as a `SEQUENCE OF` its RDNs in input order.
pub fn encode_name(name: &Name<'_>, out: Option<&mut [u8]>) -> CodecResult<usize> {
    let mut content = Vec::new();
    for rdn in &name.rdns {
        content.extend(rdn_tlv(rdn)?);
    }
    copy_out(&tlv(Tag::Sequence, content), out)
}
