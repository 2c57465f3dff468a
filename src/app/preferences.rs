// SPDX-License-Identifier: MPL-2.0
//! Playback preferences persisted across sessions.
//!
//! [`Preferences`] is the typed view of a string key-value
//! [`PreferenceStore`]. Every key is optional; missing or unparsable values
//! fall back to defaults instead of failing the session.
//!
//! | Key | Format | Default |
//! |-----|--------|---------|
//! | `volume` | float | `0.5` |
//! | `lastVolume` | float | `0.5` |
//! | `isMuted` | `true`/`false` | `false` |
//! | `playlist` | JSON array of strings | `[]` |
//! | `currentFileIndex` | integer | `-1` |
//! | `lastPlayedSrc` | string | absent |
//! | `lastPlayedTime` | float | absent |

use crate::application::port::PreferenceStore;
use crate::error::Result;
use crate::media::PlaylistEntry;
use crate::video_player::{PlaybackState, ResumeBookmark, Volume};
use std::collections::BTreeMap;

pub const KEY_VOLUME: &str = "volume";
pub const KEY_LAST_VOLUME: &str = "lastVolume";
pub const KEY_MUTED: &str = "isMuted";
pub const KEY_PLAYLIST: &str = "playlist";
pub const KEY_CURRENT_INDEX: &str = "currentFileIndex";
pub const KEY_LAST_PLAYED_SRC: &str = "lastPlayedSrc";
pub const KEY_LAST_PLAYED_TIME: &str = "lastPlayedTime";

/// Typed playback preferences.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preferences {
    pub volume: Volume,
    pub last_volume: Volume,
    pub muted: bool,
    pub playlist: Vec<PlaylistEntry>,
    /// Always `None` or a valid index into `playlist`.
    pub current_index: Option<usize>,
    pub resume: Option<ResumeBookmark>,
}

impl Preferences {
    /// Reads preferences from `store`, tolerating missing and invalid values.
    #[must_use]
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let volume = parse_volume(store.get(KEY_VOLUME)).unwrap_or_default();
        let last_volume = parse_volume(store.get(KEY_LAST_VOLUME)).unwrap_or_default();
        let muted = store.get(KEY_MUTED).is_some_and(|v| v.trim() == "true");

        let playlist: Vec<PlaylistEntry> = store
            .get(KEY_PLAYLIST)
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        let current_index = store
            .get(KEY_CURRENT_INDEX)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|i| usize::try_from(i).ok())
            .filter(|i| *i < playlist.len());

        let resume = store.get(KEY_LAST_PLAYED_SRC).and_then(|source| {
            let position_secs = store
                .get(KEY_LAST_PLAYED_TIME)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|t| t.is_finite())?;
            Some(ResumeBookmark::new(PlaylistEntry::new(source), position_secs))
        });

        Self {
            volume,
            last_volume,
            muted,
            playlist,
            current_index,
            resume,
        }
    }

    /// Writes every key to `store` and flushes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the playlist cannot be encoded or the store fails
    /// to flush.
    pub fn save(&self, store: &mut dyn PreferenceStore) -> Result<()> {
        store.set(KEY_VOLUME, self.volume.value().to_string());
        store.set(KEY_LAST_VOLUME, self.last_volume.value().to_string());
        store.set(KEY_MUTED, self.muted.to_string());

        let playlist = serde_json::to_string(&self.playlist)
            .map_err(|e| crate::error::Error::Config(e.to_string()))?;
        store.set(KEY_PLAYLIST, playlist);

        let index = self
            .current_index
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1);
        store.set(KEY_CURRENT_INDEX, index.to_string());

        match &self.resume {
            Some(bookmark) => {
                store.set(KEY_LAST_PLAYED_SRC, bookmark.source.as_str().to_string());
                store.set(KEY_LAST_PLAYED_TIME, bookmark.position_secs.to_string());
            }
            None => {
                store.remove(KEY_LAST_PLAYED_SRC);
                store.remove(KEY_LAST_PLAYED_TIME);
            }
        }

        store.flush()
    }

    /// Captures the state to remember at shutdown.
    #[must_use]
    pub fn capture(state: &PlaybackState) -> Self {
        Self {
            volume: state.volume(),
            last_volume: state.last_volume(),
            muted: state.is_muted(),
            playlist: state.playlist().to_vec(),
            current_index: state.current_index(),
            resume: state.resume_point(),
        }
    }

    /// Builds an empty playback state carrying the volume settings and the
    /// pending resume bookmark. The playlist is restored separately so the
    /// element receives its load commands.
    #[must_use]
    pub fn initial_state(&self) -> PlaybackState {
        PlaybackState::new(self.volume, self.last_volume, self.muted)
            .with_bookmark(self.resume.clone())
    }

    /// Index in the `currentFileIndex` format, `-1` meaning no selection.
    #[must_use]
    pub fn current_index_value(&self) -> i64 {
        self.current_index
            .and_then(|i| i64::try_from(i).ok())
            .unwrap_or(-1)
    }
}

fn parse_volume(raw: Option<String>) -> Option<Volume> {
    raw.and_then(|v| v.trim().parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .map(Volume::new)
}

/// Preference store kept in memory only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    flushes: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful flushes, for tests asserting persistence.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    #[must_use]
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

impl PreferenceStore for MemoryStore {
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
        self.flushes += 1;
        Ok(())
    }
}
