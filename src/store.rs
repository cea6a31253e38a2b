// Whole-file JSON persistence shared by the three record collections

use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::Result;

// Backing-file locations for the three collections
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub customers_path: PathBuf,
    pub hotels_path: PathBuf,
    pub reservations_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            customers_path: PathBuf::from("customers.json"),
            hotels_path: PathBuf::from("hotels.json"),
            reservations_path: PathBuf::from("reservations.json"),
        }
    }
}

// One serialized document per collection, rewritten in full on every mutation.
// Lookups are linear scans; there is no index.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // A missing, unreadable, or unparseable file loads as an empty
    // collection. Only writes are fallible.
    pub fn load(&self) -> Vec<T> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    %err,
                    "store is corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    pub fn save(&self, records: &[T]) -> Result<()> {
        let raw = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

// Ids grow from the current maximum; ids freed below it are never handed
// out again.
pub fn next_id(ids: impl IntoIterator<Item = u32>) -> u32 {
    ids.into_iter().max().unwrap_or(0) + 1
}
