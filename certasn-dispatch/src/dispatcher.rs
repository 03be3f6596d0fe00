//! The dispatcher
//!
//! Dispatch order for both directions:
//! 1. Validate the encoding-type mask: at least one word must select a
//!    supported encoding.
//! 2. Try the built-in catalog (small-integer identifiers, then the known
//!    textual OID aliases).
//! 3. Fall back to the provider registry keyed by (encoding type, function
//!    name, identifier): load the module, resolve the function, invoke it,
//!    release the module when the call returns.
//! 4. Fail with `CodecNotFound`.
//!
//! The legacy entry points consult providers under their own function names
//! first and then forward to the extended dispatcher, so providers written
//! against the legacy shape keep working.

use crate::builtin::{builtin_for, Builtin};
use certasn_core::datatypes::Value;
use certasn_core::{CodecError, CodecResult, DecodeFlags, EncodingType, StructId};
use certasn_der::{decoder, encoder};
use certasn_provider::{
    InMemoryProviderStore, ModuleLoader, ProviderKey, ProviderModule, ProviderStore, StaticLoader,
    FUNC_DECODER, FUNC_ENCODER, FUNC_LEGACY_DECODER, FUNC_LEGACY_ENCODER,
};
use std::borrow::Cow;

fn check_encoding_type(encoding_type: EncodingType) -> CodecResult<()> {
    if encoding_type.supports_der() {
        Ok(())
    } else {
        Err(CodecError::CodecNotFound(format!(
            "unsupported encoding type {}",
            encoding_type
        )))
    }
}

fn encode_builtin(
    codec: Builtin,
    value: &Value<'_>,
    out: Option<&mut [u8]>,
) -> CodecResult<usize> {
    match (codec, value) {
        (Builtin::Name, Value::Name(name)) => encoder::encode_name(name, out),
        (Builtin::Octets, Value::Blob(blob)) => encoder::encode_octet_string(blob, out),
        (Builtin::Bits, Value::Bits(bits)) => encoder::encode_bit_string(bits, out),
        (Builtin::Int, Value::Int(value)) => encoder::encode_int(*value, out),
        (Builtin::MultiByteInt, Value::MultiByteInt(blob)) => {
            encoder::encode_multi_byte_int(blob, out)
        }
        (Builtin::MultiByteUint, Value::MultiByteUint(blob)) => {
            encoder::encode_multi_byte_uint(blob, out)
        }
        (Builtin::Enumerated, Value::Enumerated(value)) => {
            encoder::encode_enumerated(*value, out)
        }
        (Builtin::UtcTime, Value::Time(time)) => encoder::encode_utc_time(time, out),
        (Builtin::ChoiceOfTime, Value::Time(time)) => encoder::encode_choice_of_time(time, out),
        _ => Err(CodecError::InvalidParameter(
            "value does not match the structure identifier",
        )),
    }
}

fn decode_builtin<'a>(
    codec: Builtin,
    input: &'a [u8],
    flags: DecodeFlags,
) -> CodecResult<Value<'a>> {
    match codec {
        Builtin::Name => decoder::decode_name(input, flags).map(Value::Name),
        Builtin::Octets => decoder::decode_octet_string(input, flags).map(Value::Blob),
        Builtin::Bits => decoder::decode_bit_string(input, flags).map(Value::Bits),
        Builtin::Int => decoder::decode_int(input).map(Value::Int),
        Builtin::MultiByteInt => decoder::decode_multi_byte_int(input)
            .map(|blob| Value::MultiByteInt(Cow::Owned(blob))),
        Builtin::MultiByteUint => decoder::decode_multi_byte_uint(input)
            .map(|blob| Value::MultiByteUint(Cow::Owned(blob))),
        Builtin::Enumerated => decoder::decode_enumerated(input).map(Value::Enumerated),
        Builtin::UtcTime => decoder::decode_utc_time(input).map(Value::Time),
        Builtin::ChoiceOfTime => decoder::decode_choice_of_time(input).map(Value::Time),
    }
}

/// Maps (encoding type, structure identifier) pairs to codec routines.
///
/// Holds the provider store and module loader for the fallback path; a
/// default dispatcher carries an empty in-memory store and serves the
/// built-in catalog only.
pub struct Dispatcher<S: ProviderStore = InMemoryProviderStore, L: ModuleLoader = StaticLoader> {
    store: S,
    loader: L,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(InMemoryProviderStore::new(), StaticLoader::new())
    }
}

impl<S: ProviderStore, L: ModuleLoader> Dispatcher<S, L> {
    pub fn new(store: S, loader: L) -> Self {
        Self { store, loader }
    }

    /// The provider store, for lookups and value reads.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The provider store, for register/unregister/set-value.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Resolve a provider function: store lookup, module load, symbol
    /// resolution. Returns the module handle alongside the function so the
    /// module stays loaded for the duration of the call; on any failure the
    /// handle is already released and `None` comes back.
    fn resolve_provider<F>(
        &self,
        encoding_type: EncodingType,
        func_name: &str,
        struct_id: StructId<'_>,
        pick: impl Fn(&dyn ProviderModule, &str) -> Option<F>,
    ) -> Option<(Box<dyn ProviderModule>, F)> {
        let key = ProviderKey::new(encoding_type, func_name, struct_id);
        let entry = self.store.lookup(&key)?;
        let module = match self.loader.load(&entry.module_path) {
            Ok(module) => module,
            Err(err) => {
                log::warn!(
                    "provider module {} failed to load: {}",
                    entry.module_path.display(),
                    err
                );
                return None;
            }
        };
        let symbol = entry
            .func_override
            .clone()
            .unwrap_or_else(|| func_name.to_string());
        match pick(module.as_ref(), &symbol) {
            Some(func) => Some((module, func)),
            None => {
                log::warn!(
                    "provider module {} does not export {}",
                    entry.module_path.display(),
                    symbol
                );
                None
            }
        }
    }

    /// Encode a typed value as canonical DER.
    ///
    /// `out = None` is the sizing pass; a too-small buffer fails with
    /// `MoreData { required }`.
    pub fn encode_object_ex(
        &self,
        encoding_type: EncodingType,
        struct_id: StructId<'_>,
        value: &Value<'_>,
        out: Option<&mut [u8]>,
    ) -> CodecResult<usize> {
        check_encoding_type(encoding_type)?;
        match builtin_for(struct_id) {
            Some(codec) => encode_builtin(codec, value, out),
            None => {
                log::debug!("no built-in encoder for {}, consulting providers", struct_id);
                let (module, func) = self
                    .resolve_provider(encoding_type, FUNC_ENCODER, struct_id, |module, symbol| {
                        module.encode_ex_fn(symbol)
                    })
                    .ok_or_else(|| CodecError::CodecNotFound(struct_id.registry_key()))?;
                let result = func(encoding_type, struct_id, value, out);
                drop(module);
                result
            }
        }
    }

    /// Encode into a freshly allocated buffer, sized by the sizing pass.
    /// Ownership of the buffer transfers to the caller.
    pub fn encode_object_alloc(
        &self,
        encoding_type: EncodingType,
        struct_id: StructId<'_>,
        value: &Value<'_>,
    ) -> CodecResult<Vec<u8>> {
        let required = self.encode_object_ex(encoding_type, struct_id, value, None)?;
        let mut buf = vec![0u8; required];
        let written = self.encode_object_ex(encoding_type, struct_id, value, Some(&mut buf))?;
        buf.truncate(written);
        Ok(buf)
    }

    /// Decode DER bytes into a typed value.
    ///
    /// Under `DecodeFlags::no_copy` the value's byte blobs borrow from
    /// `input`.
    pub fn decode_object_ex<'a>(
        &self,
        encoding_type: EncodingType,
        struct_id: StructId<'_>,
        input: &'a [u8],
        flags: DecodeFlags,
    ) -> CodecResult<Value<'a>> {
        check_encoding_type(encoding_type)?;
        match builtin_for(struct_id) {
            Some(codec) => decode_builtin(codec, input, flags),
            None => {
                log::debug!("no built-in decoder for {}, consulting providers", struct_id);
                let (module, func) = self
                    .resolve_provider(encoding_type, FUNC_DECODER, struct_id, |module, symbol| {
                        module.decode_ex_fn(symbol)
                    })
                    .ok_or_else(|| CodecError::CodecNotFound(struct_id.registry_key()))?;
                let result = func(encoding_type, struct_id, input, flags);
                drop(module);
                result
            }
        }
    }

    /// Legacy encode entry point: no allocation options. Providers
    /// registered under the legacy function name are consulted before the
    /// extended dispatcher takes over.
    pub fn encode_object(
        &self,
        encoding_type: EncodingType,
        struct_id: StructId<'_>,
        value: &Value<'_>,
        out: Option<&mut [u8]>,
    ) -> CodecResult<usize> {
        check_encoding_type(encoding_type)?;
        if let Some((module, func)) = self.resolve_provider(
            encoding_type,
            FUNC_LEGACY_ENCODER,
            struct_id,
            |module, symbol| module.legacy_encode_fn(symbol),
        ) {
            let result = func(encoding_type, struct_id, value, out);
            drop(module);
            return result;
        }
        self.encode_object_ex(encoding_type, struct_id, value, out)
    }

    /// Legacy decode entry point: no flags slot, blobs always owned.
    pub fn decode_object<'a>(
        &self,
        encoding_type: EncodingType,
        struct_id: StructId<'_>,
        input: &'a [u8],
    ) -> CodecResult<Value<'a>> {
        check_encoding_type(encoding_type)?;
        if let Some((module, func)) = self.resolve_provider(
            encoding_type,
            FUNC_LEGACY_DECODER,
            struct_id,
            |module, symbol| module.legacy_decode_fn(symbol),
        ) {
            let result = func(encoding_type, struct_id, input);
            drop(module);
            return result;
        }
        self.decode_object_ex(encoding_type, struct_id, input, DecodeFlags::default())
    }
}
