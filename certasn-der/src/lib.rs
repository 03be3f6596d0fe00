//! DER (Distinguished Encoding Rules) encoder and decoder
//!
//! This crate implements the canonical DER wire form for the fixed structure
//! catalog of the certasn API: object identifiers, the integer variants, bit
//! and octet strings, enumerated values, tagged name strings, the three time
//! shapes, and the distinguished-name hierarchy.
//!
//! # Wire format overview
//!
//! Every encoded value is a TLV (Tag-Length-Value) triplet:
//!
//! ```text
//! [Tag] [Length] [Value]
//! ```
//!
//! Only single-octet tags occur in this catalog (see [`types::Tag`]).
//! Lengths use the shortest possible form:
//! - **Short form** (1 octet) for lengths 0-127: the length itself.
//! - **Long form** for larger lengths: `0x80 | n` followed by `n` big-endian
//!   octets, `n` at most 4.
//!
//! DER is the canonical subset of BER: for a given value there is exactly
//! one valid encoding. That is what makes the two hard requirements of this
//! catalog meaningful: integer contents are minimal (no redundant sign
//! octet), and `SET OF` members are emitted in bytewise order of their
//! encodings.
//!
//! # Output protocol
//!
//! Every encoder takes `out: Option<&mut [u8]>`. Passing `None` is the
//! sizing pass: the required byte count is returned and nothing is written.
//! Passing a buffer writes the encoding if it fits and otherwise fails with
//! `MoreData { required }`, so a caller can size, allocate, and retry.

pub mod decoder;
pub mod encoder;
pub mod types;

pub use types::Tag;
