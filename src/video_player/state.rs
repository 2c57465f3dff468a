// SPDX-License-Identifier: MPL-2.0
//! Playlist and transport state with pure transitions.
//!
//! Every operation mutates [`PlaybackState`] and returns the [`Command`]s the
//! media element must execute. Nothing here talks to the element directly,
//! so all invariants are testable without a rendering surface:
//!
//! - the current index is `None` or a valid playlist index,
//! - mute forces the effective volume to zero while the stored volume is kept,
//! - the last non-zero volume only changes on a non-zero volume,
//! - a resume bookmark is applied at most once,
//! - `is_playing` follows the element's own play/pause notifications.

use super::{Command, ElementEventKind, LoadToken, Volume};
use crate::config::DEFAULT_VOLUME;
use crate::media::PlaylistEntry;

/// Transport state derived from the playlist and playing flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// No current entry.
    #[default]
    Empty,
    /// An entry is loaded but not playing.
    Paused,
    Playing,
}

impl Transport {
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A remembered position used to restore playback across sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeBookmark {
    pub source: PlaylistEntry,
    pub position_secs: f64,
}

impl ResumeBookmark {
    #[must_use]
    pub fn new(source: PlaylistEntry, position_secs: f64) -> Self {
        Self {
            source,
            position_secs,
        }
    }

    /// Returns true if the bookmark points strictly inside `(0, duration)`.
    #[must_use]
    pub fn fits_within(&self, duration: f64) -> bool {
        self.position_secs > 0.0 && self.position_secs < duration
    }
}

/// Side effect of an element notification worth reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    None,
    /// The resume bookmark was consumed at the given position.
    ResumeApplied(f64),
    /// The last entry ended and playback stopped at its start.
    PlaylistFinished,
    /// Advanced to the next entry after the current one ended.
    Advanced(usize),
}

/// Cohesive playback state: playlist, transport, volume and resume bookmark.
#[derive(Debug, Clone)]
pub struct PlaybackState {
    playlist: Vec<PlaylistEntry>,
    current_index: Option<usize>,
    loaded: Option<PlaylistEntry>,
    token: LoadToken,
    is_playing: bool,
    current_time: f64,
    duration: f64,
    volume: Volume,
    last_volume: Volume,
    muted: bool,
    bookmark: Option<ResumeBookmark>,
    /// Set once `play_next` stopped the last entry; cleared by a new load or
    /// a `Playing` notification.
    stopped_at_end: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Volume::default(), Volume::default(), false)
    }
}

impl PlaybackState {
    /// Creates an empty state with restored volume settings.
    #[must_use]
    pub fn new(volume: Volume, last_volume: Volume, muted: bool) -> Self {
        Self {
            playlist: Vec::new(),
            current_index: None,
            loaded: None,
            token: LoadToken::default(),
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            last_volume,
            muted,
            bookmark: None,
            stopped_at_end: false,
        }
    }

    /// Attaches a bookmark to apply on the matching source's first metadata.
    #[must_use]
    pub fn with_bookmark(mut self, bookmark: Option<ResumeBookmark>) -> Self {
        self.bookmark = bookmark;
        self
    }

    // ======================================================================
    // Playlist
    // ======================================================================

    /// Replaces the playlist and selects its first entry.
    ///
    /// An empty selection is a no-op.
    pub fn load_selection(&mut self, entries: Vec<PlaylistEntry>) -> Vec<Command> {
        if entries.is_empty() {
            return Vec::new();
        }
        self.playlist = entries;
        self.select(0)
    }

    /// Restores a persisted playlist. An index outside the list leaves the
    /// state empty.
    pub fn restore_playlist(
        &mut self,
        entries: Vec<PlaylistEntry>,
        index: Option<usize>,
    ) -> Vec<Command> {
        self.playlist = entries;
        match index.filter(|i| *i < self.playlist.len()) {
            Some(i) => self.select(i),
            None => {
                self.current_index = None;
                Vec::new()
            }
        }
    }

    pub fn play_previous(&mut self) -> Vec<Command> {
        match self.current_index {
            Some(i) if i > 0 => self.select(i - 1),
            _ => Vec::new(),
        }
    }

    /// Advances to the next entry. At the last entry playback stops and
    /// rewinds without moving past the end, even while an autoplay request is
    /// still pending; once stopped, further calls do nothing.
    pub fn play_next(&mut self) -> Vec<Command> {
        let Some(i) = self.current_index else {
            return Vec::new();
        };
        if i + 1 < self.playlist.len() {
            return self.select(i + 1);
        }
        if self.stopped_at_end {
            return Vec::new();
        }
        self.stopped_at_end = true;
        self.is_playing = false;
        self.current_time = 0.0;
        vec![Command::Pause, Command::Seek(0.0)]
    }

    fn select(&mut self, index: usize) -> Vec<Command> {
        let Some(entry) = self.playlist.get(index).cloned() else {
            self.current_index = None;
            return Vec::new();
        };
        self.current_index = Some(index);
        if self.loaded.as_ref() == Some(&entry) {
            return Vec::new();
        }

        self.token = self.token.next();
        self.loaded = Some(entry.clone());
        self.is_playing = false;
        self.stopped_at_end = false;
        self.current_time = 0.0;
        self.duration = 0.0;

        vec![
            Command::Load {
                entry,
                token: self.token,
            },
            Command::SetVolume(self.effective_volume()),
            Command::Play,
        ]
    }

    // ======================================================================
    // Transport
    // ======================================================================

    pub fn play_pause(&mut self) -> Vec<Command> {
        if self.current_entry().is_none() {
            return Vec::new();
        }
        if self.is_playing {
            vec![Command::Pause]
        } else {
            vec![Command::Play]
        }
    }

    /// Seeks to `target_secs`. Range clamping is left to the element.
    pub fn seek(&mut self, target_secs: f64) -> Vec<Command> {
        if self.current_entry().is_none() || !target_secs.is_finite() {
            return Vec::new();
        }
        vec![Command::Seek(target_secs)]
    }

    /// Seeks relative to `from_secs`, the element's current position.
    pub fn skip(&mut self, delta_secs: f64, from_secs: f64) -> Vec<Command> {
        self.seek(from_secs + delta_secs)
    }

    // ======================================================================
    // Volume
    // ======================================================================

    pub fn set_volume(&mut self, volume: Volume) -> Vec<Command> {
        self.apply_volume(volume);
        vec![Command::SetVolume(self.effective_volume())]
    }

    /// Mute keeps the stored volume; unmute restores the last non-zero
    /// volume, or the default when none was ever set.
    pub fn toggle_mute(&mut self) -> Vec<Command> {
        if self.muted {
            self.muted = false;
            self.volume = if self.last_volume.is_silent() {
                Volume::new(DEFAULT_VOLUME)
            } else {
                self.last_volume
            };
        } else {
            self.muted = true;
        }
        vec![Command::SetVolume(self.effective_volume())]
    }

    /// Steps the volume from the effective level (zero while muted).
    pub fn step_volume(&mut self, delta: f32) -> Vec<Command> {
        let base = Volume::new(self.effective_volume());
        self.set_volume(base.step(delta))
    }

    fn apply_volume(&mut self, volume: Volume) {
        self.volume = volume;
        if !volume.is_silent() {
            self.last_volume = volume;
        }
        self.muted = volume.is_silent();
    }

    // ======================================================================
    // Element notifications
    // ======================================================================

    /// Returns true if `token` belongs to the source currently loaded.
    #[must_use]
    pub fn is_current(&self, token: LoadToken) -> bool {
        self.loaded.is_some() && token == self.token
    }

    /// Applies a notification from the current load.
    ///
    /// Callers must filter stale tokens with [`PlaybackState::is_current`].
    pub fn on_element_event(&mut self, kind: &ElementEventKind) -> (Vec<Command>, Outcome) {
        match kind {
            ElementEventKind::LoadedMetadata { duration } => {
                self.duration = if duration.is_finite() { *duration } else { 0.0 };
                match self.take_bookmark_for_loaded() {
                    Some(position) => {
                        (vec![Command::Seek(position)], Outcome::ResumeApplied(position))
                    }
                    None => (Vec::new(), Outcome::None),
                }
            }
            ElementEventKind::TimeUpdate { current_time } => {
                if current_time.is_finite() {
                    self.current_time = *current_time;
                }
                (Vec::new(), Outcome::None)
            }
            ElementEventKind::VolumeChanged { volume } => {
                // Echo of our own command
                if (volume - self.effective_volume()).abs() > f32::EPSILON {
                    self.apply_volume(Volume::new(*volume));
                }
                (Vec::new(), Outcome::None)
            }
            ElementEventKind::Playing => {
                self.is_playing = true;
                self.stopped_at_end = false;
                (Vec::new(), Outcome::None)
            }
            ElementEventKind::Paused | ElementEventKind::PlayRejected { .. } => {
                self.is_playing = false;
                (Vec::new(), Outcome::None)
            }
            ElementEventKind::Ended => {
                self.is_playing = false;
                let before = self.current_index;
                let commands = self.play_next();
                let outcome = match self.current_index {
                    Some(i) if before != Some(i) => Outcome::Advanced(i),
                    _ if commands.is_empty() => Outcome::None,
                    _ => Outcome::PlaylistFinished,
                };
                (commands, outcome)
            }
        }
    }

    fn take_bookmark_for_loaded(&mut self) -> Option<f64> {
        let loaded = self.loaded.as_ref()?;
        let bookmark = self.bookmark.as_ref()?;
        if &bookmark.source != loaded || !bookmark.fits_within(self.duration) {
            return None;
        }
        self.bookmark.take().map(|b| b.position_secs)
    }

    // ======================================================================
    // Selectors
    // ======================================================================

    #[must_use]
    pub fn playlist(&self) -> &[PlaylistEntry] {
        &self.playlist
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    #[must_use]
    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.current_index.and_then(|i| self.playlist.get(i))
    }

    #[must_use]
    pub fn has_media(&self) -> bool {
        self.current_entry().is_some()
    }

    #[must_use]
    pub fn transport(&self) -> Transport {
        match (self.has_media(), self.is_playing) {
            (false, _) => Transport::Empty,
            (true, true) => Transport::Playing,
            (true, false) => Transport::Paused,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Stored volume preference, possibly non-zero while muted.
    #[must_use]
    pub fn volume(&self) -> Volume {
        self.volume
    }

    #[must_use]
    pub fn last_volume(&self) -> Volume {
        self.last_volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level actually sent to the element.
    #[must_use]
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume.value()
        }
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.current_index.is_some_and(|i| i > 0)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_index.is_some_and(|i| i + 1 < self.playlist.len())
    }

    #[must_use]
    pub fn current_is_audio(&self) -> bool {
        self.current_entry().is_some_and(PlaylistEntry::is_audio)
    }

    #[must_use]
    pub fn token(&self) -> LoadToken {
        self.token
    }

    /// Pending bookmark not yet applied.
    #[must_use]
    pub fn bookmark(&self) -> Option<&ResumeBookmark> {
        self.bookmark.as_ref()
    }

    /// Position to remember for the next session: the current entry and
    /// time, or the still pending bookmark when nothing is current or the
    /// current entry has not started from it yet.
    #[must_use]
    pub fn resume_point(&self) -> Option<ResumeBookmark> {
        let Some(entry) = self.current_entry() else {
            return self.bookmark.clone();
        };
        match &self.bookmark {
            Some(pending) if &pending.source == entry && self.current_time == 0.0 => {
                Some(pending.clone())
            }
            _ => Some(ResumeBookmark::new(entry.clone(), self.current_time)),
        }
    }
}
