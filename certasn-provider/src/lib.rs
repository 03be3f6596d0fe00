//! External codec provider interface
//!
//! Structure identifiers the dispatcher does not recognize natively can be
//! handled by externally registered providers. A registration lives in a
//! [`ProviderStore`] keyed by (encoding type, function name, structure id)
//! and names a loadable module plus an optional function-name override; at
//! dispatch time the module is loaded through a [`ModuleLoader`], the
//! function resolved by symbol name, invoked, and the module released again.
//!
//! Persistence of the store and genuine dynamic loading belong to the host
//! platform; this crate defines the seams and ships in-memory and in-process
//! implementations ([`InMemoryProviderStore`], [`StaticLoader`]).

pub mod loader;
pub mod registry;

pub use loader::{
    DecodeExFn, EncodeExFn, LegacyDecodeFn, LegacyEncodeFn, ModuleLoader, ProviderModule,
    StaticLoader, StaticModule,
};
pub use registry::{
    InMemoryProviderStore, ProviderEntry, ProviderKey, ProviderStore, ProviderValue,
    FUNC_DECODER, FUNC_ENCODER, FUNC_LEGACY_DECODER, FUNC_LEGACY_ENCODER,
};
