// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for activity tracking.
//!
//! This module defines the various types of events that can be captured
//! during a playback session for diagnostic purposes.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// User-initiated actions that can be captured for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UserAction {
    // ==========================================================================
    // Playlist Actions
    // ==========================================================================
    /// Replace the playlist with a new selection.
    LoadMedia {
        /// Optional context (e.g., `open_file`, `open_folder`, `cli`).
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },

    /// Navigate to the next entry.
    NavigateNext,

    /// Navigate to the previous entry.
    NavigatePrevious,

    // ==========================================================================
    // Transport Actions
    // ==========================================================================
    /// Toggle play/pause state.
    TogglePlayback,

    /// Seek to an absolute position.
    Seek {
        /// Target position in seconds.
        position_secs: f64,
    },

    /// Skip relative to the current position.
    Skip {
        /// Signed offset in seconds.
        delta_secs: f64,
    },

    // ==========================================================================
    // Audio Actions
    // ==========================================================================
    /// Change volume level.
    SetVolume {
        /// Volume level (0.0 to 1.0).
        volume: f32,
    },

    /// Toggle mute state.
    ToggleMute,

    // ==========================================================================
    // Window and Capture Actions
    // ==========================================================================
    /// Toggle fullscreen mode.
    ToggleFullscreen,

    /// Capture current video frame.
    CaptureScreenshot,

    /// Save the captured frame to disk.
    DownloadScreenshot,
}

/// Application state changes worth correlating with user actions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AppStateEvent {
    /// A new source was handed to the media element.
    MediaLoaded {
        /// Position in the playlist.
        index: usize,
        /// Whether the entry is audio-only.
        is_audio: bool,
    },
    /// The media element reported playback start.
    PlaybackStarted,
    /// The media element reported a pause.
    PlaybackPaused,
    /// The last entry ended and playback stopped.
    PlaylistFinished,
    /// A resume bookmark was applied.
    ResumeApplied {
        /// Restored position in seconds.
        position_secs: f64,
    },
    /// Full screen was entered or left.
    FullscreenChanged {
        /// New full-screen state.
        fullscreen: bool,
    },
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    /// The type and data of the event
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// User-initiated action.
    UserAction {
        /// The specific action performed.
        action: UserAction,
        /// Optional additional details (e.g., entry name, error context).
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    /// Application state change.
    AppState {
        /// The state transition.
        state: AppStateEvent,
    },

    /// Non-critical warning (stale completions, refused operations).
    Warning {
        /// Brief description of the warning
        message: String,
    },

    /// Media or I/O failure that did not abort the session.
    Error {
        /// Brief description of the error
        message: String,
    },
}
