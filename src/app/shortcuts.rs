// SPDX-License-Identifier: MPL-2.0
//! Keyboard shortcut mapping.
//!
//! | Key | Action |
//! |-----|--------|
//! | Space | Play/pause |
//! | Left / Right | Skip backward / forward |
//! | Up / Down | Volume up / down |
//! | `m` | Toggle mute |
//! | `s` | Screenshot (video only) |
//! | `p` / `n` | Previous / next entry |
//! | `f` | Toggle full screen |

/// A key press as reported by the host, independent of any toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Char(char),
}

/// Player action bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    TogglePlayback,
    SkipBackward,
    SkipForward,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    Screenshot,
    Previous,
    Next,
    ToggleFullScreen,
}

impl Shortcut {
    /// Maps a key to its action. Letters are case-insensitive.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        let shortcut = match key {
            Key::Space => Self::TogglePlayback,
            Key::ArrowLeft => Self::SkipBackward,
            Key::ArrowRight => Self::SkipForward,
            Key::ArrowUp => Self::VolumeUp,
            Key::ArrowDown => Self::VolumeDown,
            Key::Char(c) => match c.to_ascii_lowercase() {
                ' ' => Self::TogglePlayback,
                'm' => Self::ToggleMute,
                's' => Self::Screenshot,
                'p' => Self::Previous,
                'n' => Self::Next,
                'f' => Self::ToggleFullScreen,
                _ => return None,
            },
        };
        Some(shortcut)
    }
}
