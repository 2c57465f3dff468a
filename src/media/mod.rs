// SPDX-License-Identifier: MPL-2.0
//! Media entry types and format detection.
//!
//! Decoding is delegated to the platform media element; this module only
//! classifies file references by extension.

pub mod screenshot;

pub use screenshot::{RawFrame, Screenshot};

use crate::config::{AUDIO_EXTENSIONS, SUPPORTED_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kind of playable content behind an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    /// Audio only: shown as a placeholder, screenshots are refused.
    Audio,
    /// Video (possibly with audio).
    Video,
}

/// One playable file reference in the playlist.
///
/// Entries are immutable once created; the playlist is replaced wholesale
/// when a new selection arrives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistEntry(String);

impl PlaylistEntry {
    /// Creates an entry from a path or URL string.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    /// Creates an entry from a filesystem path.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    /// Returns the source reference handed to the media element.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment, accepting both `/` and `\` separators.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }

    /// Returns the lowercase text after the last dot of the last path
    /// segment. A dot-file such as `.mp3` counts as having that extension.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.display_name().rsplit_once('.')?;
        if ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Audio entries are matched against a fixed extension set; everything
    /// else is treated as video.
    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self.extension() {
            Some(ext) if AUDIO_EXTENSIONS.contains(&ext.as_str()) => MediaKind::Audio,
            _ => MediaKind::Video,
        }
    }

    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.kind() == MediaKind::Audio
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaylistEntry {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlaylistEntry {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Returns true if the path has one of the supported media extensions.
pub fn is_supported_media<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
