// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Preference store and its storage port.
//!
//! Backends are fallible; [`PreferenceStore`] is not. Every failure is logged
//! and swallowed so that a private-browsing quota error can never take the
//! page down. The in-memory presentation simply stays at its last-applied
//! value and the previously persisted value stays authoritative on next load.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::prefs::{PrefKey, Preference};

/// Storage port for string key/value pairs (origin-scoped, survives reload).
pub trait StorageBackend {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Delete a single key. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
    /// Delete every key.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Error type for storage backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage cannot be reached at all (disabled, sandboxed, private mode).
    #[error("storage unavailable")]
    Unavailable,
    /// A write was rejected because the origin quota is exhausted.
    #[error("quota exceeded writing `{key}`")]
    QuotaExceeded {
        /// Key whose write was rejected.
        key: String,
    },
    /// Any other backend failure.
    #[error("storage backend: {0}")]
    Backend(String),
}

/// Shared, infallible handle over a [`StorageBackend`].
///
/// Clones share the same backend; the panel and the controller each hold one.
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Rc<dyn StorageBackend>,
}

impl fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore").finish_non_exhaustive()
    }
}

impl PreferenceStore {
    /// Wrap a backend.
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryBackend::new()))
    }

    /// Raw stored string for `key`, or `None` when absent or unreadable.
    pub fn get(&self, key: PrefKey) -> Option<String> {
        match self.backend.get_item(key.as_str()) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, %key, "preference read failed; using default");
                None
            }
        }
    }

    /// Persist `value` under `key`, logging and discarding any failure.
    pub fn set(&self, key: PrefKey, value: &str) {
        if let Err(err) = self.try_set(key, value) {
            warn!(%err, %key, "preference write dropped");
        }
    }

    /// Persist `value` under `key`, reporting failure to the caller.
    pub fn try_set(&self, key: PrefKey, value: &str) -> Result<(), StoreError> {
        self.backend.set_item(key.as_str(), value)
    }

    /// Forget the stored value for `key`.
    pub fn remove(&self, key: PrefKey) {
        if let Err(err) = self.backend.remove_item(key.as_str()) {
            warn!(%err, %key, "preference remove dropped");
        }
    }

    /// Forget every stored value, recognized or not.
    pub fn clear(&self) {
        if let Err(err) = self.backend.clear() {
            warn!(%err, "preference clear dropped");
        }
    }

    /// Typed read. `None` when absent or outside the preference's domain.
    pub fn read<P: Preference>(&self) -> Option<P> {
        let raw = self.get(P::KEY)?;
        let value = P::decode(&raw);
        if value.is_none() {
            debug!(key = %P::KEY, value = %raw, "ignoring unrecognized stored value");
        }
        value
    }

    /// Typed write.
    pub fn write<P: Preference>(&self, value: P) {
        self.set(P::KEY, value.encode());
    }

    /// Non-empty stored string for `key`.
    pub(crate) fn get_non_empty(&self, key: PrefKey) -> Option<String> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// In-process [`StorageBackend`].
///
/// Used as the fallback when durable storage is unavailable so settings still
/// work for the lifetime of the page, and as the store behind tests. Failure
/// injection mirrors the browser's quota and private-mode behavior.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    items: RefCell<BTreeMap<String, String>>,
    write_failure: RefCell<Option<StoreError>>,
    unavailable: Cell<bool>,
}

impl MemoryBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `items`.
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let backend = Self::new();
        backend
            .items
            .borrow_mut()
            .extend(items.into_iter().map(|(k, v)| (k.into(), v.into())));
        backend
    }

    /// Make every subsequent `set_item` fail with `err`; `None` restores writes.
    pub fn fail_writes(&self, err: Option<StoreError>) {
        *self.write_failure.borrow_mut() = err;
    }

    /// Make every operation fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// Current value for `key`, bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.get() {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(err) = self.write_failure.borrow().clone() {
            return Err(err);
        }
        self.items
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.check_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.check_available()?;
        self.items.borrow_mut().clear();
        Ok(())
    }
}
