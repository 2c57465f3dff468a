// SPDX-License-Identifier: MPL-2.0
//! Preference storage in a CBOR file.
//!
//! The store is a flat string map serialized with `ciborium` at
//! `<data dir>/preferences.cbor`. Writes stay in memory until
//! [`PreferenceStore::flush`].
//!
//! # Path Resolution
//!
//! 1. Explicit directory passed to [`FileStore::open_in`]
//! 2. `--data-dir` / `REEL_PLAYER_DATA_DIR`
//! 3. Platform-specific data directory

use crate::app::paths;
use crate::application::port::PreferenceStore;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Preference file name within the app data directory.
const PREFERENCES_FILE: &str = "preferences.cbor";

/// File-backed [`PreferenceStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in the default data directory.
    ///
    /// Returns the store and an optional i18n warning key when the existing
    /// file could not be read; the store then starts empty.
    #[must_use]
    pub fn open() -> (Option<Self>, Option<String>) {
        match paths::get_app_data_dir() {
            Some(dir) => {
                let (store, warning) = Self::open_in(&dir);
                (Some(store), warning)
            }
            None => (None, Some("notification-preferences-path-error".to_string())),
        }
    }

    /// Opens the store in `dir`.
    #[must_use]
    pub fn open_in(dir: &Path) -> (Self, Option<String>) {
        Self::open_file(dir.join(PREFERENCES_FILE))
    }

    /// Opens the store at an explicit file path.
    #[must_use]
    pub fn open_file(path: PathBuf) -> (Self, Option<String>) {
        if !path.exists() {
            return (Self::empty(path), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(values) => (Self { path, values }, None),
                Err(_) => (
                    Self::empty(path),
                    Some("notification-preferences-parse-error".to_string()),
                ),
            },
            Err(_) => (
                Self::empty(path),
                Some("notification-preferences-read-error".to_string()),
            ),
        }
    }

    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(fs::File::create(&self.path)?);
        ciborium::into_writer(&self.values, &mut writer)
            .map_err(|e| Error::Io(e.to_string()))?;
        writer.flush()?;
        Ok(())
    }
}
