//! DER decoders for the structure catalog
//!
//! Each decoder verifies the leading tag, walks the length field, and
//! converts the content octets into the typed value. Byte-blob outputs
//! (octet string, bit string, name values) honor
//! [`DecodeFlags::no_copy`](certasn_core::DecodeFlags) by borrowing from the
//! input buffer instead of copying; everything else is owned. Top-level
//! decoders ignore bytes after the decoded element; constructed contents
//! must be consumed exactly.

use crate::types::{self, Tag};
use certasn_core::datatypes::{
    oid, BitString, Blob, CivilTime, Name, NameValue, Rdn, RdnAttribute, ValueType,
};
use certasn_core::datatypes::time::TICKS_PER_SECOND;
use certasn_core::{CodecError, CodecResult, DecodeFlags};
use std::borrow::Cow;

fn make_blob(content: &[u8], flags: DecodeFlags) -> Blob<'_> {
    if flags.no_copy {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(content.to_vec())
    }
}

fn object_id_components(content: &[u8]) -> CodecResult<Vec<u32>> {
    if content.is_empty() {
        return Ok(Vec::new());
    }
    let mut components = vec![(content[0] / 40) as u32, (content[0] % 40) as u32];
    let mut pos = 1;
    while pos < content.len() {
        let mut component = 0u32;
        loop {
            let octet = content[pos];
            pos += 1;
            component = component
                .checked_mul(128)
                .and_then(|v| v.checked_add((octet & 0x7F) as u32))
                .ok_or(CodecError::Corrupt(
                    "object identifier component overflows 32 bits",
                ))?;
            if octet & 0x80 == 0 {
                break;
            }
            if pos >= content.len() {
                return Err(CodecError::Corrupt(
                    "object identifier ends inside a component",
                ));
            }
        }
        components.push(component);
    }
    Ok(components)
}

/// Decode an OBJECT IDENTIFIER into dotted-decimal text.
pub fn decode_object_id(input: &[u8]) -> CodecResult<String> {
    let (content, _) = types::read_tlv(input, Tag::ObjectId)?;
    Ok(oid::format_components(&object_id_components(content)?))
}

/// Decode a small signed INTEGER.
///
/// # Errors
///
/// `Corrupt` on empty content, `TooLarge` past 32 bits; the value is
/// sign-extended from its top content octet.
pub fn decode_int(input: &[u8]) -> CodecResult<i32> {
    let (content, _) = types::read_tlv(input, Tag::Integer)?;
    if content.is_empty() {
        return Err(CodecError::Corrupt("integer content is empty"));
    }
    if content.len() > 4 {
        return Err(CodecError::TooLarge("integer wider than 32 bits"));
    }
    let mut value: i32 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    for &octet in content {
        value = (value << 8) | octet as i32;
    }
    Ok(value)
}

/// Decode a multi-byte signed INTEGER into a little-endian two's-complement
/// blob. Reversal forces a copy, so the output is always owned.
pub fn decode_multi_byte_int(input: &[u8]) -> CodecResult<Vec<u8>> {
    let (content, _) = types::read_tlv(input, Tag::Integer)?;
    Ok(content.iter().rev().copied().collect())
}

/// Decode a multi-byte unsigned INTEGER into a little-endian magnitude
/// blob, dropping the sign octet a padded encoding carries.
pub fn decode_multi_byte_uint(input: &[u8]) -> CodecResult<Vec<u8>> {
    let (content, _) = types::read_tlv(input, Tag::Integer)?;
    let magnitude = match content.split_first() {
        Some((0x00, rest)) => rest,
        _ => content,
    };
    Ok(magnitude.iter().rev().copied().collect())
}

/// Decode an ENUMERATED value as unsigned.
///
/// Content may be up to four octets, or five when the first is a zero sign
/// octet.
pub fn decode_enumerated(input: &[u8]) -> CodecResult<u32> {
    let (content, _) = types::read_tlv(input, Tag::Enumerated)?;
    let magnitude = match content.len() {
        0..=4 => content,
        5 if content[0] == 0x00 => &content[1..],
        _ => return Err(CodecError::TooLarge("enumerated wider than 32 bits")),
    };
    let mut value = 0u32;
    for &octet in magnitude {
        value = (value << 8) | octet as u32;
    }
    Ok(value)
}

/// Decode an OCTET STRING.
pub fn decode_octet_string<'a>(input: &'a [u8], flags: DecodeFlags) -> CodecResult<Blob<'a>> {
    let (content, _) = types::read_tlv(input, Tag::OctetString)?;
    Ok(make_blob(content, flags))
}

/// Decode a BIT STRING.
///
/// # Errors
///
/// `Corrupt` on empty content or an unused-bit count over seven.
pub fn decode_bit_string<'a>(input: &'a [u8], flags: DecodeFlags) -> CodecResult<BitString<'a>> {
    let (content, _) = types::read_tlv(input, Tag::BitString)?;
    let (&unused, data) = content
        .split_first()
        .ok_or(CodecError::Corrupt("bit string content is empty"))?;
    if unused > 7 {
        return Err(CodecError::Corrupt("bit string unused-bit count over 7"));
    }
    Ok(BitString {
        data: make_blob(data, flags),
        unused_bits: unused as u32,
    })
}

fn decode_name_value_at<'a>(
    input: &'a [u8],
    flags: DecodeFlags,
) -> CodecResult<(NameValue<'a>, usize)> {
    const NUMERIC: u8 = Tag::NumericString as u8;
    const PRINTABLE: u8 = Tag::PrintableString as u8;
    const IA5: u8 = Tag::Ia5String as u8;

    let (tag, value_type) = match types::peek_tag(input)? {
        NUMERIC => (Tag::NumericString, ValueType::Numeric),
        PRINTABLE => (Tag::PrintableString, ValueType::Printable),
        IA5 => (Tag::Ia5String, ValueType::Ia5),
        found => return Err(CodecError::BadTag { found }),
    };
    let (content, consumed) = types::read_tlv(input, tag)?;
    Ok((
        NameValue {
            value_type,
            value: make_blob(content, flags),
        },
        consumed,
    ))
}

/// Decode a tagged name string. Tags outside the Numeric/Printable/IA5
/// catalog fail with `BadTag`.
pub fn decode_name_value<'a>(input: &'a [u8], flags: DecodeFlags) -> CodecResult<NameValue<'a>> {
    decode_name_value_at(input, flags).map(|(value, _)| value)
}

fn decode_rdn_attribute_at<'a>(
    input: &'a [u8],
    flags: DecodeFlags,
) -> CodecResult<(RdnAttribute<'a>, usize)> {
    let (content, consumed) = types::read_tlv(input, Tag::Sequence)?;
    let (oid_content, oid_consumed) = types::read_tlv(content, Tag::ObjectId)?;
    let object_id = oid::format_components(&object_id_components(oid_content)?);
    let (value, value_consumed) = decode_name_value_at(&content[oid_consumed..], flags)?;
    if oid_consumed + value_consumed != content.len() {
        return Err(CodecError::Corrupt("attribute carries trailing bytes"));
    }
    Ok((
        RdnAttribute {
            object_id: Cow::Owned(object_id),
            value,
        },
        consumed,
    ))
}

/// Decode one RDN attribute: `SEQUENCE { OID, name value }`.
pub fn decode_rdn_attribute<'a>(
    input: &'a [u8],
    flags: DecodeFlags,
) -> CodecResult<RdnAttribute<'a>> {
    decode_rdn_attribute_at(input, flags).map(|(attr, _)| attr)
}

fn rdn_from_content<'a>(mut content: &'a [u8], flags: DecodeFlags) -> CodecResult<Rdn<'a>> {
    let mut attributes = Vec::new();
    while !content.is_empty() {
        let (attr, consumed) = decode_rdn_attribute_at(content, flags)?;
        attributes.push(attr);
        content = &content[consumed..];
    }
    Ok(Rdn { attributes })
}

/// Decode an RDN (`SET OF` attribute). Member order is preserved as
/// encountered.
pub fn decode_rdn<'a>(input: &'a [u8], flags: DecodeFlags) -> CodecResult<Rdn<'a>> {
    let (content, _) = types::read_tlv(input, Tag::SetOf)?;
    rdn_from_content(content, flags)
}

/// Decode a Name (`SEQUENCE OF` RDN).
pub fn decode_name<'a>(input: &'a [u8], flags: DecodeFlags) -> CodecResult<Name<'a>> {
    let (mut content, _) = types::read_tlv(input, Tag::Sequence)?;
    let mut rdns = Vec::new();
    while !content.is_empty() {
        let (set_content, consumed) = types::read_tlv(content, Tag::SetOf)?;
        rdns.push(rdn_from_content(set_content, flags)?);
        content = &content[consumed..];
    }
    Ok(Name { rdns })
}

/// Read exactly `count` ASCII digits from the front of `rest`.
fn get_digits(rest: &mut &[u8], count: usize) -> CodecResult<u16> {
    if rest.len() < count {
        return Err(CodecError::Corrupt("time string ends inside a field"));
    }
    let (digits, tail) = rest.split_at(count);
    let mut value = 0u16;
    for &octet in digits {
        if !octet.is_ascii_digit() {
            return Err(CodecError::Corrupt("non-digit in time string"));
        }
        value = value * 10 + (octet - b'0') as u16;
    }
    *rest = tail;
    Ok(value)
}

/// Consume the optional trailing timezone and fold the offset into UTC.
///
/// An offset is applied on the absolute time scale, so a borrow out of the
/// minute field propagates through hour, day, month, and year.
fn apply_zone(rest: &mut &[u8], time: &mut CivilTime) -> CodecResult<()> {
    let sign = match rest.first().copied() {
        None => return Ok(()),
        Some(b'Z') => {
            *rest = &rest[1..];
            return Ok(());
        }
        Some(sign @ (b'+' | b'-')) => {
            *rest = &rest[1..];
            sign
        }
        Some(_) => return Err(CodecError::Corrupt("unexpected octet after time fields")),
    };
    let hours = get_digits(rest, 2)? as i64;
    if hours >= 24 {
        return Err(CodecError::Corrupt("timezone hour over 23"));
    }
    let minutes = if rest.is_empty() {
        0
    } else {
        get_digits(rest, 2)? as i64
    };
    if minutes >= 60 {
        return Err(CodecError::Corrupt("timezone minute over 59"));
    }
    let offset = (hours * 3600 + minutes * 60) * TICKS_PER_SECOND;
    let ticks = time
        .to_ticks()
        .map_err(|_| CodecError::Corrupt("time fields do not normalize"))?;
    let utc = if sign == b'+' {
        ticks - offset
    } else {
        ticks + offset
    };
    *time = CivilTime::from_ticks(utc);
    Ok(())
}

/// Decode a UTCTime: `YYMMDDHHMM[SS][Z|+/-HH[MM]]`, two-digit years of 50 or more
/// mapping to 19xx.
pub fn decode_utc_time(input: &[u8]) -> CodecResult<CivilTime> {
    let (content, _) = types::read_tlv(input, Tag::UtcTime)?;
    if content.len() < 10 {
        return Err(CodecError::Corrupt("time content under ten octets"));
    }
    let mut rest = content;
    let short_year = get_digits(&mut rest, 2)?;
    let year = if short_year >= 50 {
        1900 + short_year
    } else {
        2000 + short_year
    };
    let mut time = CivilTime {
        year,
        month: get_digits(&mut rest, 2)? as u8,
        day: get_digits(&mut rest, 2)? as u8,
        hour: get_digits(&mut rest, 2)? as u8,
        minute: get_digits(&mut rest, 2)? as u8,
        second: 0,
        millisecond: 0,
    };
    if rest.first().is_some_and(u8::is_ascii_digit) {
        time.second = get_digits(&mut rest, 2)? as u8;
    }
    apply_zone(&mut rest, &mut time)?;
    if !rest.is_empty() {
        return Err(CodecError::Corrupt("trailing octets after time"));
    }
    Ok(time)
}

/// Decode a GeneralizedTime:
/// `YYYYMMDDHHMM[SS][.fff][Z|+/-HH[MM]]`.
pub fn decode_generalized_time(input: &[u8]) -> CodecResult<CivilTime> {
    let (content, _) = types::read_tlv(input, Tag::GeneralizedTime)?;
    if content.len() < 10 {
        return Err(CodecError::Corrupt("time content under ten octets"));
    }
    let mut rest = content;
    let mut time = CivilTime {
        year: get_digits(&mut rest, 4)?,
        month: get_digits(&mut rest, 2)? as u8,
        day: get_digits(&mut rest, 2)? as u8,
        hour: get_digits(&mut rest, 2)? as u8,
        minute: get_digits(&mut rest, 2)? as u8,
        second: 0,
        millisecond: 0,
    };
    if rest.first().is_some_and(u8::is_ascii_digit) {
        time.second = get_digits(&mut rest, 2)? as u8;
    }
    if rest.first() == Some(&b'.') {
        rest = &rest[1..];
        time.millisecond = get_digits(&mut rest, 3)?;
    }
    apply_zone(&mut rest, &mut time)?;
    if !rest.is_empty() {
        return Err(CodecError::Corrupt("trailing octets after time"));
    }
    Ok(time)
}

/// Decode whichever time form the leading tag announces.
pub fn decode_choice_of_time(input: &[u8]) -> CodecResult<CivilTime> {
    const UTC: u8 = Tag::UtcTime as u8;
    const GENERALIZED: u8 = Tag::GeneralizedTime as u8;

    match types::peek_tag(input)? {
        UTC => decode_utc_time(input),
        GENERALIZED => decode_generalized_time(input),
        found => Err(CodecError::BadTag { found }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_decode_object_id() {
        assert_eq!(
            decode_object_id(&hex!("06 06 2A 86 48 86 F7 0D")).unwrap(),
            "1.2.840.113549"
        );
        assert_eq!(
            decode_object_id(&hex!("06 03 55 04 03")).unwrap(),
            "2.5.4.3"
        );
    }

    #[test]
    fn test_decode_object_id_component_boundaries() {
        use crate::encoder::encode_object_id;
        for component in [0u32, 0x7F, 0x80, 0x3FFF, 0x4000, 0x1F_FFFF, 0x20_0000, 0xFFF_FFFF, 0x1000_0000] {
            let text = format!("1.2.{}", component);
            let required = encode_object_id(&text, None).unwrap();
            let mut buf = vec![0u8; required];
            encode_object_id(&text, Some(&mut buf)).unwrap();
            assert_eq!(decode_object_id(&buf).unwrap(), text);
        }
    }

    #[test]
    fn test_decode_object_id_dangling_component() {
        assert!(matches!(
            decode_object_id(&hex!("06 02 2A 86")),
            Err(CodecError::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_object_id_component_overflow() {
        assert!(matches!(
            decode_object_id(&hex!("06 07 2A 90 80 80 80 80 00")),
            Err(CodecError::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_int_vectors() {
        let cases: [(&[u8], i32); 6] = [
            (&hex!("02 01 00"), 0),
            (&hex!("02 01 7F"), 127),
            (&hex!("02 02 00 80"), 128),
            (&hex!("02 01 80"), -128),
            (&hex!("02 02 FF 7F"), -129),
            (&hex!("02 04 80 00 00 00"), i32::MIN),
        ];
        for (bytes, expected) in cases {
            assert_eq!(decode_int(bytes).unwrap(), expected);
        }
    }

    #[test]
    fn test_decode_int_limits() {
        assert_eq!(
            decode_int(&hex!("02 00")),
            Err(CodecError::Corrupt("integer content is empty"))
        );
        assert!(matches!(
            decode_int(&hex!("02 05 01 02 03 04 05")),
            Err(CodecError::TooLarge(_))
        ));
        assert_eq!(decode_int(&hex!("04 01 00")), Err(CodecError::BadTag { found: 0x04 }));
        assert_eq!(decode_int(&hex!("02 02 00")), Err(CodecError::UnexpectedEnd));
    }

    #[test]
    fn test_decode_multi_byte_int_reverses_to_little_endian() {
        assert_eq!(
            decode_multi_byte_int(&hex!("02 02 01 00")).unwrap(),
            vec![0x00, 0x01]
        );
    }

    #[test]
    fn test_decode_multi_byte_uint_drops_sign_octet() {
        assert_eq!(
            decode_multi_byte_uint(&hex!("02 02 00 80")).unwrap(),
            vec![0x80]
        );
        assert_eq!(
            decode_multi_byte_uint(&hex!("02 02 01 00")).unwrap(),
            vec![0x00, 0x01]
        );
    }

    #[test]
    fn test_decode_enumerated() {
        assert_eq!(decode_enumerated(&hex!("0A 01 01")).unwrap(), 1);
        assert_eq!(
            decode_enumerated(&hex!("0A 04 80 00 00 01")).unwrap(),
            0x8000_0001
        );
        // a zero sign octet makes five content octets acceptable
        assert_eq!(
            decode_enumerated(&hex!("0A 05 00 80 00 00 01")).unwrap(),
            0x8000_0001
        );
        assert!(matches!(
            decode_enumerated(&hex!("0A 05 01 80 00 00 01")),
            Err(CodecError::TooLarge(_))
        ));
    }

    #[test]
    fn test_decode_octet_string_copy_modes() {
        let input = hex!("04 02 DE AD");
        let owned = decode_octet_string(&input, DecodeFlags::default()).unwrap();
        assert!(matches!(owned, Cow::Owned(_)));
        assert_eq!(&owned[..], &[0xDE, 0xAD]);

        let borrowed = decode_octet_string(&input, DecodeFlags::borrowing()).unwrap();
        assert!(matches!(borrowed, Cow::Borrowed(_)));
        assert_eq!(&borrowed[..], &[0xDE, 0xAD]);
    }

    #[test]
    fn test_decode_bit_string() {
        let bits = decode_bit_string(&hex!("03 03 06 FF C0"), DecodeFlags::default()).unwrap();
        assert_eq!(bits.unused_bits, 6);
        assert_eq!(&bits.data[..], &[0xFF, 0xC0]);
    }

    #[test]
    fn test_decode_bit_string_rejects_bad_content() {
        assert!(matches!(
            decode_bit_string(&hex!("03 00"), DecodeFlags::default()),
            Err(CodecError::Corrupt(_))
        ));
        assert!(matches!(
            decode_bit_string(&hex!("03 02 08 FF"), DecodeFlags::default()),
            Err(CodecError::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_name_value() {
        let value = decode_name_value(&hex!("13 01 58"), DecodeFlags::default()).unwrap();
        assert_eq!(value.value_type, ValueType::Printable);
        assert_eq!(&value.value[..], b"X");

        assert_eq!(
            decode_name_value(&hex!("0C 01 58"), DecodeFlags::default()),
            Err(CodecError::BadTag { found: 0x0C })
        );
    }

    #[test]
    fn test_decode_name_round_trip() {
        let input = hex!("30 0C 31 0A 30 08 06 03 55 04 03 13 01 58");
        let name = decode_name(&input, DecodeFlags::default()).unwrap();
        assert_eq!(name.rdns.len(), 1);
        let attr = &name.rdns[0].attributes[0];
        assert_eq!(attr.object_id, "2.5.4.3");
        assert_eq!(attr.value.value_type, ValueType::Printable);
        assert_eq!(&attr.value.value[..], b"X");
    }

    #[test]
    fn test_decode_name_no_copy_borrows_values() {
        let input = hex!("30 0C 31 0A 30 08 06 03 55 04 03 13 01 58");
        let name = decode_name(&input, DecodeFlags::borrowing()).unwrap();
        assert!(matches!(
            name.rdns[0].attributes[0].value.value,
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_decode_attribute_trailing_bytes() {
        // attribute sequence with one slack octet after the value
        let input = hex!("30 0B 06 03 55 04 03 13 01 58 00");
        assert!(matches!(
            decode_rdn_attribute(&input, DecodeFlags::default()),
            Err(CodecError::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_utc_time() {
        let time = decode_utc_time(b"\x17\x0D000102030405Z").unwrap();
        assert_eq!(time, CivilTime::new(2000, 1, 2, 3, 4, 5, 0).unwrap());
    }

    #[test]
    fn test_decode_utc_time_year_pivot() {
        let t49 = decode_utc_time(b"\x17\x0D491231235959Z").unwrap();
        assert_eq!(t49.year, 2049);
        let t50 = decode_utc_time(b"\x17\x0D500101000000Z").unwrap();
        assert_eq!(t50.year, 1950);
    }

    #[test]
    fn test_decode_utc_time_without_seconds() {
        let time = decode_utc_time(b"\x17\x0B0001020304Z").unwrap();
        assert_eq!(time, CivilTime::new(2000, 1, 2, 3, 4, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_utc_time_positive_offset_borrows_backward() {
        // 00:30 at +01:00 is 23:30 the previous day, year included
        let time = decode_utc_time(b"\x17\x0F0001010030+0100").unwrap();
        assert_eq!(time, CivilTime::new(1999, 12, 31, 23, 30, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_utc_time_negative_offset_carries_forward() {
        let time = decode_utc_time(b"\x17\x0F9912312330-0030").unwrap();
        assert_eq!(time, CivilTime::new(2000, 1, 1, 0, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_utc_time_hour_only_offset() {
        let time = decode_utc_time(b"\x17\x0F000101120000+05").unwrap();
        assert_eq!(time, CivilTime::new(2000, 1, 1, 7, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_utc_time_rejects_bad_input() {
        // under ten content octets
        assert!(matches!(
            decode_utc_time(b"\x17\x09000102030"),
            Err(CodecError::Corrupt(_))
        ));
        // non-digit where a digit is required
        assert!(matches!(
            decode_utc_time(b"\x17\x0D0001x2030405Z"),
            Err(CodecError::Corrupt(_))
        ));
        // timezone hour out of range
        assert!(matches!(
            decode_utc_time(b"\x17\x0F0001020304+2400"),
            Err(CodecError::Corrupt(_))
        ));
        // timezone minute out of range
        assert!(matches!(
            decode_utc_time(b"\x17\x0F0001020304+0060"),
            Err(CodecError::Corrupt(_))
        ));
        // trailing octets after the zone
        assert!(matches!(
            decode_utc_time(b"\x17\x0E000102030405ZZ"),
            Err(CodecError::Corrupt(_))
        ));
    }

    #[test]
    fn test_decode_generalized_time() {
        let time = decode_generalized_time(b"\x18\x0F20510102030405Z").unwrap();
        assert_eq!(time, CivilTime::new(2051, 1, 2, 3, 4, 5, 0).unwrap());
    }

    #[test]
    fn test_decode_generalized_time_milliseconds() {
        let time = decode_generalized_time(b"\x18\x1320010203040506.789Z").unwrap();
        assert_eq!(time, CivilTime::new(2001, 2, 3, 4, 5, 6, 789).unwrap());
    }

    #[test]
    fn test_decode_generalized_time_offset() {
        let time = decode_generalized_time(b"\x18\x1320000101003000+0100").unwrap();
        assert_eq!(time, CivilTime::new(1999, 12, 31, 23, 30, 0, 0).unwrap());
    }

    #[test]
    fn test_decode_choice_of_time_by_tag() {
        let utc = decode_choice_of_time(b"\x17\x0D000102030405Z").unwrap();
        assert_eq!(utc.year, 2000);
        let generalized = decode_choice_of_time(b"\x18\x0F19490102030405Z").unwrap();
        assert_eq!(generalized.year, 1949);
        assert_eq!(
            decode_choice_of_time(&hex!("02 01 00")),
            Err(CodecError::BadTag { found: 0x02 })
        );
    }

    #[test]
    fn test_decoders_ignore_trailing_input() {
        let mut input = hex!("02 01 7F").to_vec();
        input.extend_from_slice(&[0xAA, 0xBB]);
        assert_eq!(decode_int(&input).unwrap(), 127);
    }
}
