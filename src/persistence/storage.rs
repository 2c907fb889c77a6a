//! Key/value string storage
//!
//! Browser LocalStorage on wasm32. Native builds have no persistent store:
//! reads find nothing and writes are dropped.

use super::Result;

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::super::{PersistError, Result};

    fn local_storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| PersistError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| PersistError::Storage(format!("{e:?}")))?
            .ok_or_else(|| PersistError::Storage("LocalStorage disabled".into()))
    }

    pub fn read(key: &str) -> Result<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    pub fn write(key: &str, value: &str) -> Result<()> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    pub fn remove(key: &str) -> Result<()> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::super::Result;

    pub fn read(_key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    pub fn write(_key: &str, _value: &str) -> Result<()> {
        Ok(())
    }

    pub fn remove(_key: &str) -> Result<()> {
        Ok(())
    }
}

pub fn read(key: &str) -> Result<Option<String>> {
    backend::read(key)
}

/// Quota errors surface as `PersistError::Storage`
pub fn write(key: &str, value: &str) -> Result<()> {
    backend::write(key, value)
}

pub fn remove(key: &str) -> Result<()> {
    backend::remove(key)
}
