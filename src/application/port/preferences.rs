// SPDX-License-Identifier: MPL-2.0
//! Preference storage port.
//!
//! Values are plain strings, as in a browser-style key-value store; parsing
//! and defaults live in [`crate::app::preferences::Preferences`].

use crate::error::Result;

/// String key-value storage surviving process restarts.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String);

    fn remove(&mut self, key: &str);

    /// Persists pending writes.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn flush(&mut self) -> Result<()>;
}
