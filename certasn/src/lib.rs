//! certasn - DER codec for X.509 / PKCS-adjacent structures
//!
//! This library encodes typed in-memory values as canonical DER and decodes
//! DER back into typed values, for the fixed structure catalog a platform
//! cryptography API works with. Structure identifiers the built-in catalog
//! does not cover can be routed to externally registered codec providers.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `certasn-core`: Error catalog, identifiers, flags, and typed values
//! - `certasn-der`: The DER codec engine (tag/length, primitives, structures)
//! - `certasn-provider`: External codec provider registry and module loading
//! - `certasn-dispatch`: Identifier dispatch and the public entry points
//!
//! # Usage
//!
//! ```no_run
//! # fn main() -> certasn::CodecResult<()> {
//! use certasn::{Dispatcher, EncodingType, StructId, Value, ids};
//!
//! let dispatcher = Dispatcher::default();
//! let encoded = dispatcher.encode_object_alloc(
//!     EncodingType::X509_ASN,
//!     StructId::Number(ids::STRUCT_INTEGER),
//!     &Value::Int(42),
//! )?;
//! # Ok(())
//! # }
//! ```

// Re-export core types
pub use certasn_core::datatypes::{
    BitString, Blob, CivilTime, Name, NameValue, Rdn, RdnAttribute, Value, ValueType,
};
pub use certasn_core::{ids, CodecError, CodecResult, DecodeFlags, EncodingType, StructId};

// Re-export the dispatcher API
pub use certasn_dispatch::Dispatcher;

// Re-export the codec layer
pub mod der {
    pub use certasn_der::*;
}

// Re-export the provider interface
pub mod provider {
    pub use certasn_provider::*;
}
