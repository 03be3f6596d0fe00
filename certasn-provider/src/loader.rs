//! Provider module loading and symbol resolution
//!
//! A provider module exposes codec functions under symbol names; the
//! dispatcher resolves the registry function name (or the registration's
//! override) against the loaded module. Module handles live for a single
//! dispatch call: the `Box<dyn ProviderModule>` is dropped on return,
//! releasing whatever the loader acquired.

use certasn_core::datatypes::Value;
use certasn_core::{CodecError, CodecResult, DecodeFlags, EncodingType, StructId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extended provider encoder: sizing pass on `None`, `MoreData` on a short
/// buffer, the written length otherwise.
pub type EncodeExFn =
    fn(EncodingType, StructId<'_>, &Value<'_>, Option<&mut [u8]>) -> CodecResult<usize>;

/// Extended provider decoder; the output may borrow from the input under
/// `DecodeFlags::no_copy`.
pub type DecodeExFn =
    for<'a, 'b> fn(EncodingType, StructId<'b>, &'a [u8], DecodeFlags) -> CodecResult<Value<'a>>;

/// Legacy provider encoder: the pre-flags entry shape.
pub type LegacyEncodeFn =
    fn(EncodingType, StructId<'_>, &Value<'_>, Option<&mut [u8]>) -> CodecResult<usize>;

/// Legacy provider decoder: no flags slot, output always owned.
pub type LegacyDecodeFn =
    for<'a, 'b> fn(EncodingType, StructId<'b>, &'a [u8]) -> CodecResult<Value<'a>>;

/// A loaded provider module. Dropping the handle releases the module.
pub trait ProviderModule {
    fn encode_ex_fn(&self, symbol: &str) -> Option<EncodeExFn>;
    fn decode_ex_fn(&self, symbol: &str) -> Option<DecodeExFn>;
    fn legacy_encode_fn(&self, symbol: &str) -> Option<LegacyEncodeFn>;
    fn legacy_decode_fn(&self, symbol: &str) -> Option<LegacyDecodeFn>;
}

/// Dynamic-loading seam. Real module loading belongs to the host platform;
/// [`StaticLoader`] serves in-process providers.
pub trait ModuleLoader {
    /// Load the module a registration points at.
    ///
    /// # Errors
    ///
    /// `CodecNotFound` when the path does not resolve to a loadable module.
    fn load(&self, path: &Path) -> CodecResult<Box<dyn ProviderModule>>;
}

/// In-process provider module: a symbol table of function pointers.
#[derive(Debug, Clone, Default)]
pub struct StaticModule {
    encode_ex: HashMap<String, EncodeExFn>,
    decode_ex: HashMap<String, DecodeExFn>,
    legacy_encode: HashMap<String, LegacyEncodeFn>,
    legacy_decode: HashMap<String, LegacyDecodeFn>,
}

impl StaticModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encode_ex(mut self, symbol: &str, func: EncodeExFn) -> Self {
        self.encode_ex.insert(symbol.to_string(), func);
        self
    }

    pub fn with_decode_ex(mut self, symbol: &str, func: DecodeExFn) -> Self {
        self.decode_ex.insert(symbol.to_string(), func);
        self
    }

    pub fn with_legacy_encode(mut self, symbol: &str, func: LegacyEncodeFn) -> Self {
        self.legacy_encode.insert(symbol.to_string(), func);
        self
    }

    pub fn with_legacy_decode(mut self, symbol: &str, func: LegacyDecodeFn) -> Self {
        self.legacy_decode.insert(symbol.to_string(), func);
        self
    }
}

impl ProviderModule for StaticModule {
    fn encode_ex_fn(&self, symbol: &str) -> Option<EncodeExFn> {
        self.encode_ex.get(symbol).copied()
    }

    fn decode_ex_fn(&self, symbol: &str) -> Option<DecodeExFn> {
        self.decode_ex.get(symbol).copied()
    }

    fn legacy_encode_fn(&self, symbol: &str) -> Option<LegacyEncodeFn> {
        self.legacy_encode.get(symbol).copied()
    }

    fn legacy_decode_fn(&self, symbol: &str) -> Option<LegacyDecodeFn> {
        self.legacy_decode.get(symbol).copied()
    }
}

/// [`ModuleLoader`] over a fixed table of in-process modules.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    modules: HashMap<PathBuf, StaticModule>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, path: impl Into<PathBuf>, module: StaticModule) -> Self {
        self.modules.insert(path.into(), module);
        self
    }
}

impl ModuleLoader for StaticLoader {
    fn load(&self, path: &Path) -> CodecResult<Box<dyn ProviderModule>> {
        self.modules
            .get(path)
            .cloned()
            .map(|module| Box::new(module) as Box<dyn ProviderModule>)
            .ok_or_else(|| {
                CodecError::CodecNotFound(format!(
                    "provider module {} is not loadable",
                    path.display()
                ))
            })
    }
}
