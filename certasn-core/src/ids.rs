//! Encoding-type masks and structure identifiers
//!
//! Every codec operation is keyed by an [`EncodingType`] mask and a
//! [`StructId`]. The mask carries a certificate-encoding selector in its low
//! word and a message-encoding selector in its high word; the identifier is
//! either a small integer from the fixed structure catalog or the
//! dotted-decimal text of an object identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Encoding-type mask
///
/// The low 16 bits select a certificate encoding, the high 16 bits a message
/// encoding. Only the DER-based selectors are meaningful to this library;
/// a mask that sets neither is rejected by dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EncodingType(u32);

impl EncodingType {
    /// DER certificate encoding (low-word selector)
    pub const X509_ASN: EncodingType = EncodingType(0x0000_0001);
    /// DER message encoding (high-word selector)
    pub const PKCS7_ASN: EncodingType = EncodingType(0x0001_0000);

    /// Build a mask from its raw bit representation
    pub const fn from_bits(bits: u32) -> Self {
        EncodingType(bits)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The certificate-encoding word of the mask
    pub const fn cert_encoding(self) -> u32 {
        self.0 & 0x0000_FFFF
    }

    /// The message-encoding word of the mask
    pub const fn msg_encoding(self) -> u32 {
        self.0 & 0xFFFF_0000
    }

    /// Whether either word selects the DER encoding this library implements
    pub const fn supports_der(self) -> bool {
        self.cert_encoding() == Self::X509_ASN.0 || self.msg_encoding() == Self::PKCS7_ASN.0
    }
}

impl BitOr for EncodingType {
    type Output = EncodingType;

    fn bitor(self, rhs: Self) -> Self {
        EncodingType(self.0 | rhs.0)
    }
}

impl BitOrAssign for EncodingType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

/// Structure identifier: a small integer from the fixed catalog, or the
/// dotted-decimal text of an object identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructId<'a> {
    /// Small-integer identifier (see the `STRUCT_*` constants)
    Number(u32),
    /// Dotted-decimal object identifier text
    Oid(&'a str),
}

impl StructId<'_> {
    /// The registry key form: `#NNNN` for integer identifiers, the OID text
    /// verbatim otherwise. This is the `struct_id` component of a provider
    /// registration key.
    pub fn registry_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StructId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructId::Number(n) => write!(f, "#{}", n),
            StructId::Oid(oid) => f.write_str(oid),
        }
    }
}

/// X.509 distinguished name (`SEQUENCE OF` RDN)
pub const STRUCT_NAME: u32 = 7;
/// Key-usage bit string
pub const STRUCT_KEY_USAGE: u32 = 14;
/// UTCTime value
pub const STRUCT_UTC_TIME: u32 = 17;
/// Octet string
pub const STRUCT_OCTETS: u32 = 25;
/// Bit string
pub const STRUCT_BITS: u32 = 26;
/// Small signed integer
pub const STRUCT_INTEGER: u32 = 27;
/// Multi-byte two's-complement integer
pub const STRUCT_MULTI_BYTE_INTEGER: u32 = 28;
/// Enumerated value
pub const STRUCT_ENUMERATED: u32 = 29;
/// UTCTime or GeneralizedTime, chosen by year window
pub const STRUCT_CHOICE_OF_TIME: u32 = 30;
/// Multi-byte unsigned integer
pub const STRUCT_MULTI_BYTE_UINT: u32 = 38;

/// PKCS#9 signing time; routed to the UTCTime codec
pub const OID_SIGNING_TIME: &str = "1.2.840.113549.1.9.5";
/// CRL reason code; routed to the enumerated codec
pub const OID_CRL_REASON_CODE: &str = "2.5.29.21";
/// Key usage; routed to the bit-string codec
pub const OID_KEY_USAGE: &str = "2.5.29.15";
/// Subject key identifier; routed to the octet-string codec
pub const OID_SUBJECT_KEY_IDENTIFIER: &str = "2.5.29.14";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_type_words() {
        let both = EncodingType::X509_ASN | EncodingType::PKCS7_ASN;
        assert_eq!(both.cert_encoding(), 0x1);
        assert_eq!(both.msg_encoding(), 0x1_0000);
        assert!(both.supports_der());
    }

    #[test]
    fn test_encoding_type_unsupported() {
        assert!(!EncodingType::from_bits(0).supports_der());
        assert!(!EncodingType::from_bits(0x2).supports_der());
        assert!(!EncodingType::from_bits(0x0002_0000).supports_der());
    }

    #[test]
    fn test_struct_id_registry_key() {
        assert_eq!(StructId::Number(STRUCT_NAME).registry_key(), "#7");
        assert_eq!(StructId::Oid(OID_KEY_USAGE).registry_key(), "2.5.29.15");
    }
}
