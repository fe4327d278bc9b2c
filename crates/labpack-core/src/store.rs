//! Injectable persistence seam for the mutable engines.
//!
//! The classification cache and the learning engine never touch a concrete
//! backend; they go through `Store<T>`. Tests use `MemoryStore`, the CLI uses
//! `JsonFileStore`.

use crate::error::LabpackError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::PathBuf;

pub trait Store<T> {
    /// Load the stored state. `Ok(None)` means nothing has been saved yet;
    /// `Err` means the backing data exists but could not be read or parsed.
    fn load(&self) -> Result<Option<T>, LabpackError>;
    fn save(&mut self, value: &T) -> Result<(), LabpackError>;
    fn clear(&mut self) -> Result<(), LabpackError>;
}

/// In-memory store, primarily for tests and per-request isolation.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: Option<T>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        MemoryStore { value: None }
    }
}

impl<T: Clone> Store<T> for MemoryStore<T> {
    fn load(&self) -> Result<Option<T>, LabpackError> {
        Ok(self.value.clone())
    }

    fn save(&mut self, value: &T) -> Result<(), LabpackError> {
        self.value = Some(value.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LabpackError> {
        self.value = None;
        Ok(())
    }
}

/// JSON-file-backed store.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore {
            path,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Store<T> for JsonFileStore<T> {
    fn load(&self) -> Result<Option<T>, LabpackError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value = serde_json::from_str(&content).map_err(|e| {
            LabpackError::Store(format!("{} is not valid JSON: {e}", self.path.display()))
        })?;
        Ok(Some(value))
    }

    fn save(&mut self, value: &T) -> Result<(), LabpackError> {
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LabpackError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
