//! Durable key-value storage for client state.
//!
//! A small JSON object on disk (`~/.musicboxd/storage.json` by default) that
//! plays the role a browser's local storage plays for a web client: string
//! keys, string values, survives restarts.

use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// The storage directory name.
const STORAGE_DIR: &str = ".musicboxd";

/// The storage file name.
const STORAGE_FILE: &str = "storage.json";

/// JSON-file backed key-value store.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    /// Store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the user's home directory.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let home = dirs::home_dir().ok_or(StorageError::NoHomeDirectory)?;
        Ok(home.join(STORAGE_DIR).join(STORAGE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.read_map()?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    /// Store `value` under `key`, keeping every other key.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.write_map(&map)
    }

    /// Remove `key`. Succeeds if the key or the file doesn't exist.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }

    /// Load the whole object.
    ///
    /// A missing file is an empty store. An unreadable JSON document is also
    /// treated as empty so a corrupt file never locks the user out; the next
    /// write replaces it.
    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let file = File::open(&self.path).map_err(|e| StorageError::io(&self.path, e))?;
        match serde_json::from_reader::<_, Value>(BufReader::new(file)) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => {
                tracing::warn!("Storage file {:?} is not a JSON object, ignoring it", self.path);
                Ok(Map::new())
            }
            Err(e) => {
                tracing::warn!("Storage file {:?} is unreadable, ignoring it: {}", self.path, e);
                Ok(Map::new())
            }
        }
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let tmp_path = self.path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, map).map_err(|source| {
                StorageError::Corrupt {
                    path: tmp_path.clone(),
                    source,
                }
            })?;
            writer.flush().map_err(|e| StorageError::io(&tmp_path, e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::io(&self.path, e))
    }
}
