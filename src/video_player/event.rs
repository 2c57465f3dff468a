// SPDX-License-Identifier: MPL-2.0
//! Notifications emitted by the media element.

use super::LoadToken;
use crate::error::MediaError;

/// An event reported by the media element for a given load.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEvent {
    /// Load the event belongs to.
    pub token: LoadToken,
    pub kind: ElementEventKind,
}

impl ElementEvent {
    #[must_use]
    pub fn new(token: LoadToken, kind: ElementEventKind) -> Self {
        Self { token, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementEventKind {
    /// Metadata is available; `duration` in seconds.
    LoadedMetadata { duration: f64 },
    /// Periodic position update.
    TimeUpdate { current_time: f64 },
    /// Output volume changed, either by us or externally.
    VolumeChanged { volume: f32 },
    /// Playback actually started.
    Playing,
    /// Playback actually paused.
    Paused,
    /// The source played to its end.
    Ended,
    /// A play request failed (autoplay policy, unsupported codec, decode error).
    PlayRejected { error: MediaError },
}
