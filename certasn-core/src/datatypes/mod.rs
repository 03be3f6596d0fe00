//! Typed values carried across the codec API
//!
//! Decoders can hand back either owned bytes or slices borrowed from the
//! input buffer (the no-copy mode), so every byte-blob field is a
//! [`Blob`], a clone-on-write slice.

pub mod bit_string;
pub mod name;
pub mod oid;
pub mod time;
pub mod value;

use std::borrow::Cow;

pub use bit_string::BitString;
pub use name::{Name, NameValue, Rdn, RdnAttribute, ValueType};
pub use time::CivilTime;
pub use value::Value;

/// Byte blob: owned after a copying decode, borrowed from the input buffer
/// in no-copy mode.
pub type Blob<'a> = Cow<'a, [u8]>;
