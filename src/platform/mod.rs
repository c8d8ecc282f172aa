//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, data-dir files on native)
//! - Logger setup

use crate::persistence::{KeyValueStore, MemoryStore};

/// Browser LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, crate::error::StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| {
                crate::error::StorageError::Unavailable("LocalStorage not available".into())
            })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, crate::error::StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| crate::error::StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), crate::error::StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| crate::error::StorageError::Unavailable(format!("{e:?}")))
    }
}

/// Default durable store for this platform.
///
/// Falls back to an in-memory store (scores last for the session only)
/// when the durable one cannot be opened.
#[cfg(target_arch = "wasm32")]
pub fn default_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::storage() {
        Ok(_) => Box::new(LocalStorage),
        Err(e) => {
            log::warn!("{}, high scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Default durable store for this platform.
///
/// Falls back to an in-memory store (scores last for the session only)
/// when the durable one cannot be opened.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_store() -> Box<dyn KeyValueStore> {
    use crate::persistence::FileStore;

    let Some(dirs) = directories::ProjectDirs::from("", "", "safe-box") else {
        log::warn!("No home directory, high scores will not persist");
        return Box::new(MemoryStore::new());
    };

    match FileStore::open(dirs.data_dir()) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Could not open data dir: {}, high scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Install the platform logger
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the platform logger
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
