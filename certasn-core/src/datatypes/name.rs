//! Distinguished-name value types
//!
//! A [`Name`] is an ordered list of [`Rdn`]s (`SEQUENCE OF` on the wire);
//! each RDN is an ordered list of [`RdnAttribute`]s (`SET OF` on the wire,
//! sorted by encoded bytes when emitted); each attribute pairs an object
//! identifier with a tagged string value. The inner [`NameValue`] is also a
//! standalone codec payload, so both the attribute codec and the name-value
//! codec share it.

use crate::datatypes::Blob;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// String flavor of a name value, selecting the wire tag.
///
/// `Any` is a placeholder meaning "pick for me"; the encoder rejects it
/// because this catalog never infers a string type from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Any,
    Numeric,
    Printable,
    Ia5,
}

/// Tagged string value: raw bytes, no character-set conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameValue<'a> {
    pub value_type: ValueType,
    #[serde(with = "serde_bytes", borrow)]
    pub value: Blob<'a>,
}

impl<'a> NameValue<'a> {
    pub fn new(value_type: ValueType, value: &'a [u8]) -> Self {
        Self {
            value_type,
            value: Cow::Borrowed(value),
        }
    }

    /// A PrintableString value over borrowed bytes.
    pub fn printable(value: &'a [u8]) -> Self {
        Self::new(ValueType::Printable, value)
    }

    /// A NumericString value over borrowed bytes.
    pub fn numeric(value: &'a [u8]) -> Self {
        Self::new(ValueType::Numeric, value)
    }

    /// An IA5String value over borrowed bytes.
    pub fn ia5(value: &'a [u8]) -> Self {
        Self::new(ValueType::Ia5, value)
    }

    pub fn into_owned(self) -> NameValue<'static> {
        NameValue {
            value_type: self.value_type,
            value: Cow::Owned(self.value.into_owned()),
        }
    }
}

/// One attribute of a relative distinguished name: `(OID, value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdnAttribute<'a> {
    /// Dotted-decimal object identifier text, e.g. `"2.5.4.3"`.
    #[serde(borrow)]
    pub object_id: Cow<'a, str>,
    #[serde(borrow)]
    pub value: NameValue<'a>,
}

impl<'a> RdnAttribute<'a> {
    pub fn new(object_id: &'a str, value: NameValue<'a>) -> Self {
        Self {
            object_id: Cow::Borrowed(object_id),
            value,
        }
    }

    pub fn into_owned(self) -> RdnAttribute<'static> {
        RdnAttribute {
            object_id: Cow::Owned(self.object_id.into_owned()),
            value: self.value.into_owned(),
        }
    }
}

/// Relative distinguished name: a set of attributes sharing one ordering
/// level. Attribute order here is the caller's; the encoder sorts the
/// serialized forms as DER requires, so two RDNs with the same attributes in
/// different order encode identically.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rdn<'a> {
    #[serde(borrow)]
    pub attributes: Vec<RdnAttribute<'a>>,
}

impl<'a> Rdn<'a> {
    pub fn new(attributes: Vec<RdnAttribute<'a>>) -> Self {
        Self { attributes }
    }

    pub fn into_owned(self) -> Rdn<'static> {
        Rdn {
            attributes: self.attributes.into_iter().map(RdnAttribute::into_owned).collect(),
        }
    }
}

/// X.509 distinguished name: RDNs in significance order, encoded in input
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Name<'a> {
    #[serde(borrow)]
    pub rdns: Vec<Rdn<'a>>,
}

impl<'a> Name<'a> {
    pub fn new(rdns: Vec<Rdn<'a>>) -> Self {
        Self { rdns }
    }

    pub fn into_owned(self) -> Name<'static> {
        Name {
            rdns: self.rdns.into_iter().map(Rdn::into_owned).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_value_constructors() {
        let value = NameValue::printable(b"X");
        assert_eq!(value.value_type, ValueType::Printable);
        assert_eq!(&value.value[..], b"X");
    }

    #[test]
    fn test_into_owned_severs_borrow() {
        let text = String::from("2.5.4.3");
        let bytes = vec![0x58];
        let attr = RdnAttribute::new(&text, NameValue::printable(&bytes)).into_owned();
        drop(text);
        drop(bytes);
        assert_eq!(attr.object_id, "2.5.4.3");
        assert_eq!(&attr.value.value[..], b"X");
    }
}
