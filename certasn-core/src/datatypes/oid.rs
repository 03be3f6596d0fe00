//! Dotted-decimal object identifier text helpers
//!
//! Object identifiers cross the codec API as text (`"1.2.840.113549"`); the
//! wire form is produced and consumed by the DER codec. These helpers do the
//! text half: splitting into numeric components and formatting back, with
//! the round trip preserving the dotted representation exactly.

use crate::error::{CodecError, CodecResult};

/// Parse dotted-decimal OID text into its numeric components.
///
/// Empty text parses to an empty component list (the degenerate OID, which
/// encodes to empty content). Non-empty text must contain at least two
/// components, each fitting in 32 bits.
///
/// # Errors
///
/// Returns `InvalidOid` on a non-numeric or oversized component, or on a
/// single-component identifier.
pub fn parse_components(text: &str) -> CodecResult<Vec<u32>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let mut components = Vec::new();
    for part in text.split('.') {
        let value = part
            .parse::<u32>()
            .map_err(|_| CodecError::InvalidOid(text.to_string()))?;
        components.push(value);
    }
    if components.len() < 2 {
        return Err(CodecError::InvalidOid(text.to_string()));
    }
    Ok(components)
}

/// Format numeric components as dotted-decimal text.
pub fn format_components(components: &[u32]) -> String {
    components
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_components() {
        assert_eq!(
            parse_components("1.2.840.113549").unwrap(),
            vec![1, 2, 840, 113549]
        );
    }

    #[test]
    fn test_parse_empty_is_degenerate() {
        assert_eq!(parse_components("").unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_parse_rejects_bad_text() {
        assert!(matches!(
            parse_components("1"),
            Err(CodecError::InvalidOid(_))
        ));
        assert!(matches!(
            parse_components("1.two.3"),
            Err(CodecError::InvalidOid(_))
        ));
        assert!(matches!(
            parse_components("1.2."),
            Err(CodecError::InvalidOid(_))
        ));
        assert!(matches!(
            parse_components("1.4294967296"),
            Err(CodecError::InvalidOid(_))
        ));
    }

    #[test]
    fn test_format_round_trip() {
        let text = "2.5.29.15";
        assert_eq!(format_components(&parse_components(text).unwrap()), text);
    }
}
