// SPDX-License-Identifier: MPL-2.0
//! Commands issued by the playback state to the media element.

use crate::media::PlaylistEntry;

/// Generation counter identifying one source load.
///
/// Every event coming back from the media element carries the token of the
/// load it belongs to; events with an older token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LoadToken(u64);

impl LoadToken {
    /// Returns the token following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// An imperative operation for the media element.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the element source. Implicitly stops the previous one.
    Load {
        entry: PlaylistEntry,
        token: LoadToken,
    },
    /// Start playback. Completion or rejection arrives as an event.
    Play,
    Pause,
    /// Seek to an absolute position; the element clamps to `[0, duration]`.
    Seek(f64),
    /// Set the element output volume (already accounts for mute).
    SetVolume(f32),
}
