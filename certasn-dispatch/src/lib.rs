//! Structure-identifier dispatch
//!
//! The dispatcher maps an (encoding type, structure identifier) pair to a
//! codec: first the built-in catalog, then externally registered providers.
//! It owns the four public entry points of the codec API: extended encode
//! and decode, and the legacy pair without allocation options.

mod builtin;
pub mod dispatcher;

pub use dispatcher::Dispatcher;
