// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `localStorage`-backed `StorageBackend` for the Canopy widget.
//!
//! Only meaningful on `wasm32` inside a browser window; on other targets
//! [`LocalStorageBackend::open`] reports [`StoreError::Unavailable`].

use canopy_core::store::{StorageBackend, StoreError};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// DOM exception names browsers use for an exhausted storage quota.
const QUOTA_ERROR_NAMES: [&str; 2] = ["QuotaExceededError", "NS_ERROR_DOM_QUOTA_REACHED"];

/// Wraps the window's origin-scoped `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    /// Resolve `window.localStorage`.
    ///
    /// Fails with [`StoreError::Unavailable`] when there is no window, the
    /// property is null, or the getter throws (sandboxed frames, disabled
    /// storage).
    pub fn open() -> Result<Self, StoreError> {
        if !cfg!(target_arch = "wasm32") {
            return Err(StoreError::Unavailable);
        }
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StoreError::Unavailable),
            Err(err) => {
                debug!(error = %describe(&err), "localStorage getter threw");
                Err(StoreError::Unavailable)
            }
        }
    }

    /// Wrap an already-resolved `Storage` object.
    pub fn from_storage(storage: Storage) -> Self {
        Self { storage }
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| classify(err_name(&err).as_deref(), &describe(&err), key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| classify(err_name(&err).as_deref(), &describe(&err), key))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|err| classify(err_name(&err).as_deref(), &describe(&err), key))
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.storage
            .clear()
            .map_err(|err| classify(err_name(&err).as_deref(), &describe(&err), ""))
    }
}

fn err_name(err: &JsValue) -> Option<String> {
    err.dyn_ref::<DomException>().map(DomException::name)
}

fn describe(err: &JsValue) -> String {
    if let Some(exception) = err.dyn_ref::<DomException>() {
        return format!("{}: {}", exception.name(), exception.message());
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

/// Map a thrown exception onto a [`StoreError`].
fn classify(name: Option<&str>, message: &str, key: &str) -> StoreError {
    match name {
        Some(name) if QUOTA_ERROR_NAMES.contains(&name) => StoreError::QuotaExceeded {
            key: key.to_owned(),
        },
        Some("SecurityError") => StoreError::Unavailable,
        _ => StoreError::Backend(message.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_exceptions_name_the_key() {
        for name in QUOTA_ERROR_NAMES {
            assert_eq!(
                classify(Some(name), "full", "customBackgroundImage"),
                StoreError::QuotaExceeded {
                    key: "customBackgroundImage".to_owned()
                }
            );
        }
    }

    #[test]
    fn security_errors_mean_unavailable() {
        assert_eq!(
            classify(Some("SecurityError"), "denied", "theme"),
            StoreError::Unavailable
        );
    }

    #[test]
    fn anything_else_keeps_its_message() {
        assert_eq!(
            classify(None, "boom", "font"),
            StoreError::Backend("boom".to_owned())
        );
        assert_eq!(
            classify(Some("InvalidStateError"), "InvalidStateError: gone", "font"),
            StoreError::Backend("InvalidStateError: gone".to_owned())
        );
    }

    #[test]
    fn native_targets_have_no_local_storage() {
        if !cfg!(target_arch = "wasm32") {
            assert_eq!(LocalStorageBackend::open().err(), Some(StoreError::Unavailable));
        }
    }
}
