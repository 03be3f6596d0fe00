//! Built-in codec catalog

use certasn_core::ids;
use certasn_core::StructId;

/// A built-in codec routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Name,
    Octets,
    Bits,
    Int,
    MultiByteInt,
    MultiByteUint,
    Enumerated,
    UtcTime,
    ChoiceOfTime,
}

/// Map a structure identifier to its built-in codec, if one exists.
///
/// The known textual identifiers alias catalog entries: signing time is a
/// UTCTime, the CRL reason code an enumerated value, key usage a bit
/// string, and the subject key identifier an octet string.
pub(crate) fn builtin_for(struct_id: StructId<'_>) -> Option<Builtin> {
    match struct_id {
        StructId::Number(ids::STRUCT_NAME) => Some(Builtin::Name),
        StructId::Number(ids::STRUCT_OCTETS) => Some(Builtin::Octets),
        StructId::Number(ids::STRUCT_BITS) | StructId::Number(ids::STRUCT_KEY_USAGE) => {
            Some(Builtin::Bits)
        }
        StructId::Number(ids::STRUCT_INTEGER) => Some(Builtin::Int),
        StructId::Number(ids::STRUCT_MULTI_BYTE_INTEGER) => Some(Builtin::MultiByteInt),
        StructId::Number(ids::STRUCT_MULTI_BYTE_UINT) => Some(Builtin::MultiByteUint),
        StructId::Number(ids::STRUCT_ENUMERATED) => Some(Builtin::Enumerated),
        StructId::Number(ids::STRUCT_UTC_TIME) => Some(Builtin::UtcTime),
        StructId::Number(ids::STRUCT_CHOICE_OF_TIME) => Some(Builtin::ChoiceOfTime),
        StructId::Oid(ids::OID_SIGNING_TIME) => Some(Builtin::UtcTime),
        StructId::Oid(ids::OID_CRL_REASON_CODE) => Some(Builtin::Enumerated),
        StructId::Oid(ids::OID_KEY_USAGE) => Some(Builtin::Bits),
        StructId::Oid(ids::OID_SUBJECT_KEY_IDENTIFIER) => Some(Builtin::Octets),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_catalog() {
        assert_eq!(builtin_for(StructId::Number(ids::STRUCT_NAME)), Some(Builtin::Name));
        assert_eq!(
            builtin_for(StructId::Number(ids::STRUCT_KEY_USAGE)),
            Some(Builtin::Bits)
        );
        assert_eq!(builtin_for(StructId::Number(9999)), None);
    }

    #[test]
    fn test_oid_aliases() {
        assert_eq!(
            builtin_for(StructId::Oid(ids::OID_SIGNING_TIME)),
            Some(Builtin::UtcTime)
        );
        assert_eq!(
            builtin_for(StructId::Oid(ids::OID_SUBJECT_KEY_IDENTIFIER)),
            Some(Builtin::Octets)
        );
        assert_eq!(builtin_for(StructId::Oid("1.2.3.4")), None);
    }
}
