//! Bit string value type

use crate::datatypes::Blob;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A string of bits: a byte blob plus the count of unused low-order bits in
/// the final byte.
///
/// `unused_bits` is nominally 0-7, but the encoder also accepts larger
/// values, folding the count down (`unused_bits % 8`) and dropping the
/// surplus whole bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitString<'a> {
    #[serde(with = "serde_bytes", borrow)]
    pub data: Blob<'a>,
    pub unused_bits: u32,
}

impl<'a> BitString<'a> {
    /// Construct a bit string over borrowed bytes.
    pub fn new(data: &'a [u8], unused_bits: u32) -> Self {
        Self {
            data: Cow::Borrowed(data),
            unused_bits,
        }
    }

    /// Construct a bit string that owns its bytes.
    pub fn from_vec(data: Vec<u8>, unused_bits: u32) -> BitString<'static> {
        BitString {
            data: Cow::Owned(data),
            unused_bits,
        }
    }

    /// Number of significant bits.
    pub fn bit_len(&self) -> usize {
        let total = self.data.len() * 8;
        total.saturating_sub(self.unused_bits as usize)
    }

    /// Copy the data so the value no longer borrows from a decode input.
    pub fn into_owned(self) -> BitString<'static> {
        BitString {
            data: Cow::Owned(self.data.into_owned()),
            unused_bits: self.unused_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_len() {
        let bits = BitString::new(&[0x80, 0x40], 5);
        assert_eq!(bits.bit_len(), 11);
    }

    #[test]
    fn test_bit_len_oversized_unused() {
        let bits = BitString::new(&[0x80], 12);
        assert_eq!(bits.bit_len(), 0);
    }

    #[test]
    fn test_into_owned() {
        let data = vec![0xAA];
        let bits = BitString::new(&data, 0).into_owned();
        drop(data);
        assert_eq!(&bits.data[..], &[0xAA]);
    }
}
