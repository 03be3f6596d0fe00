//! Provider registration store
//!
//! Registrations are keyed by the triple (encoding type, function name,
//! structure id). The structure id is the registry form of a [`StructId`]:
//! dotted OID text, or `#NNNN` for integer identifiers. Each entry names the
//! provider's module path, an optional function-name override, and a bag of
//! named auxiliary values.

use certasn_core::{CodecError, CodecResult, EncodingType, StructId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Extended encoder function name.
pub const FUNC_ENCODER: &str = "encoder";
/// Extended decoder function name.
pub const FUNC_DECODER: &str = "decoder";
/// Legacy encoder function name (entry points without allocation options).
pub const FUNC_LEGACY_ENCODER: &str = "legacy-encoder";
/// Legacy decoder function name.
pub const FUNC_LEGACY_DECODER: &str = "legacy-decoder";

/// Registration key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderKey {
    pub encoding_type: EncodingType,
    pub func_name: String,
    /// Registry form of the structure identifier (`#NNNN` or OID text).
    pub struct_id: String,
}

impl ProviderKey {
    pub fn new(encoding_type: EncodingType, func_name: &str, struct_id: StructId<'_>) -> Self {
        Self {
            encoding_type,
            func_name: func_name.to_string(),
            struct_id: struct_id.registry_key(),
        }
    }
}

/// Auxiliary value attached to a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderValue {
    Text(String),
    Number(u32),
    Binary(Vec<u8>),
}

/// Resolved registration: where the provider lives and what the function is
/// called there when it is not the registry function name itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEntry {
    pub module_path: PathBuf,
    pub func_override: Option<String>,
}

/// Persistent-configuration seam for provider registrations.
///
/// The store backing real deployments is external; it is expected to bring
/// its own concurrency discipline. [`InMemoryProviderStore`] implements the
/// same contract for embedding and tests.
pub trait ProviderStore {
    /// Record a provider for `key`.
    ///
    /// Fails with `InvalidParameter` when the function name or structure id
    /// is empty. Succeeds as a no-op when the encoding type selects neither
    /// a certificate nor a message encoding. Re-registration overwrites.
    fn register(
        &mut self,
        key: &ProviderKey,
        module_path: &Path,
        func_override: Option<&str>,
    ) -> CodecResult<()>;

    /// Remove a registration. Fails with `CodecNotFound` for unknown keys.
    fn unregister(&mut self, key: &ProviderKey) -> CodecResult<()>;

    /// Read a named auxiliary value. `Ok(None)` when the registration exists
    /// but carries no such value.
    fn get_value(&self, key: &ProviderKey, name: &str) -> CodecResult<Option<ProviderValue>>;

    /// Write (`Some`) or remove (`None`) a named auxiliary value.
    fn set_value(
        &mut self,
        key: &ProviderKey,
        name: &str,
        value: Option<ProviderValue>,
    ) -> CodecResult<()>;

    /// Resolve a registration, if any.
    fn lookup(&self, key: &ProviderKey) -> Option<ProviderEntry>;
}

#[derive(Debug, Clone)]
struct StoredEntry {
    entry: ProviderEntry,
    values: HashMap<String, ProviderValue>,
}

/// In-memory [`ProviderStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryProviderStore {
    entries: HashMap<ProviderKey, StoredEntry>,
}

impl InMemoryProviderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProviderStore for InMemoryProviderStore {
    fn register(
        &mut self,
        key: &ProviderKey,
        module_path: &Path,
        func_override: Option<&str>,
    ) -> CodecResult<()> {
        if key.func_name.is_empty() || key.struct_id.is_empty() {
            return Err(CodecError::InvalidParameter(
                "provider registration requires a function name and structure id",
            ));
        }
        if !key.encoding_type.supports_der() {
            log::debug!(
                "ignoring provider registration for unsupported encoding type {}",
                key.encoding_type
            );
            return Ok(());
        }
        log::debug!(
            "registering provider {} for {}/{}",
            module_path.display(),
            key.func_name,
            key.struct_id
        );
        self.entries.insert(
            key.clone(),
            StoredEntry {
                entry: ProviderEntry {
                    module_path: module_path.to_path_buf(),
                    func_override: func_override.map(str::to_string),
                },
                values: HashMap::new(),
            },
        );
        Ok(())
    }

    fn unregister(&mut self, key: &ProviderKey) -> CodecResult<()> {
        match self.entries.remove(key) {
            Some(_) => {
                log::debug!("unregistered provider for {}/{}", key.func_name, key.struct_id);
                Ok(())
            }
            None => Err(CodecError::CodecNotFound(key.struct_id.clone())),
        }
    }

    fn get_value(&self, key: &ProviderKey, name: &str) -> CodecResult<Option<ProviderValue>> {
        let stored = self
            .entries
            .get(key)
            .ok_or_else(|| CodecError::CodecNotFound(key.struct_id.clone()))?;
        Ok(stored.values.get(name).cloned())
    }

    fn set_value(
        &mut self,
        key: &ProviderKey,
        name: &str,
        value: Option<ProviderValue>,
    ) -> CodecResult<()> {
        let stored = self
            .entries
            .get_mut(key)
            .ok_or_else(|| CodecError::CodecNotFound(key.struct_id.clone()))?;
        match value {
            Some(value) => {
                stored.values.insert(name.to_string(), value);
            }
            None => {
                stored.values.remove(name);
            }
        }
        Ok(())
    }

    fn lookup(&self, key: &ProviderKey) -> Option<ProviderEntry> {
        self.entries.get(key).map(|stored| stored.entry.clone())
    }
}
