// SPDX-License-Identifier: MPL-2.0
//! Playback controller driving a [`MediaElement`] from [`PlaybackState`].
//!
//! The controller is the single owner of the playback state. Each operation
//! runs the pure transition, then forwards the resulting commands to the
//! element in order.

use super::{Command, ElementEvent, ElementEventKind, Outcome, PlaybackState, Volume};
use crate::application::port::MediaElement;
use crate::diagnostics::{AppStateEvent, DiagnosticsHandle, UserAction};
use crate::media::PlaylistEntry;

pub struct PlaybackController<E> {
    state: PlaybackState,
    element: E,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<E: std::fmt::Debug> std::fmt::Debug for PlaybackController<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("element", &self.element)
            .field("has_diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

impl<E: MediaElement> PlaybackController<E> {
    #[must_use]
    pub fn new(element: E, state: PlaybackState) -> Self {
        Self {
            state,
            element,
            diagnostics: None,
        }
    }

    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Replaces the playlist. Returns false if `entries` was empty.
    pub fn load_selection(&mut self, entries: Vec<PlaylistEntry>) -> bool {
        if entries.is_empty() {
            return false;
        }
        let count = entries.len();
        let commands = self.state.load_selection(entries);
        self.log_action(UserAction::LoadMedia { source: None }, Some(format!("{count} entries")));
        self.apply(commands);
        true
    }

    /// Restores a persisted playlist and, when the index is valid, loads it.
    pub fn restore_playlist(&mut self, entries: Vec<PlaylistEntry>, index: Option<usize>) {
        let commands = self.state.restore_playlist(entries, index);
        self.apply(commands);
    }

    pub fn play_pause(&mut self) {
        if !self.state.has_media() {
            return;
        }
        self.log_action(UserAction::TogglePlayback, None);
        let commands = self.state.play_pause();
        self.apply(commands);
    }

    pub fn seek(&mut self, target_secs: f64) {
        let commands = self.state.seek(target_secs);
        if !commands.is_empty() {
            self.log_action(
                UserAction::Seek {
                    position_secs: target_secs,
                },
                None,
            );
        }
        self.apply(commands);
    }

    /// Seeks relative to the element's current position.
    pub fn skip(&mut self, delta_secs: f64) {
        let from = self.element.current_time();
        let commands = self.state.skip(delta_secs, from);
        if !commands.is_empty() {
            self.log_action(UserAction::Skip { delta_secs }, None);
        }
        self.apply(commands);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = Volume::new(volume);
        self.log_action(
            UserAction::SetVolume {
                volume: volume.value(),
            },
            None,
        );
        let commands = self.state.set_volume(volume);
        self.apply(commands);
    }

    pub fn toggle_mute(&mut self) {
        self.log_action(UserAction::ToggleMute, None);
        let commands = self.state.toggle_mute();
        self.apply(commands);
    }

    /// Moves the volume by `delta` from the effective level.
    pub fn step_volume(&mut self, delta: f32) {
        let commands = self.state.step_volume(delta);
        self.log_action(
            UserAction::SetVolume {
                volume: self.state.effective_volume(),
            },
            None,
        );
        self.apply(commands);
    }

    pub fn play_previous(&mut self) {
        if !self.state.can_go_previous() {
            return;
        }
        self.log_action(UserAction::NavigatePrevious, None);
        let commands = self.state.play_previous();
        self.apply(commands);
    }

    pub fn play_next(&mut self) {
        if !self.state.has_media() {
            return;
        }
        self.log_action(UserAction::NavigateNext, None);
        let commands = self.state.play_next();
        if commands.first() == Some(&Command::Pause) {
            self.log_state(AppStateEvent::PlaylistFinished);
        }
        self.apply(commands);
    }

    /// Applies a notification from the element, discarding stale ones.
    pub fn handle_event(&mut self, event: ElementEvent) -> Outcome {
        if !self.state.is_current(event.token) {
            self.log_warning(format!(
                "Discarded {:?} for stale load {}",
                event.kind,
                event.token.value()
            ));
            return Outcome::None;
        }

        match &event.kind {
            ElementEventKind::Playing => self.log_state(AppStateEvent::PlaybackStarted),
            ElementEventKind::Paused => self.log_state(AppStateEvent::PlaybackPaused),
            ElementEventKind::PlayRejected { error } => {
                self.log_error(format!("Playback failed: {error}"));
            }
            _ => {}
        }

        let (commands, outcome) = self.state.on_element_event(&event.kind);
        match outcome {
            Outcome::ResumeApplied(position_secs) => {
                self.log_state(AppStateEvent::ResumeApplied { position_secs });
            }
            Outcome::PlaylistFinished => self.log_state(AppStateEvent::PlaylistFinished),
            Outcome::Advanced(_) | Outcome::None => {}
        }
        self.apply(commands);
        outcome
    }

    fn apply(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Load { entry, token } => {
                    if let Some(index) = self.state.current_index() {
                        self.log_state(AppStateEvent::MediaLoaded {
                            index,
                            is_audio: entry.is_audio(),
                        });
                    }
                    self.element.load(&entry, token);
                }
                Command::Play => self.element.play(),
                Command::Pause => self.element.pause(),
                Command::Seek(secs) => self.element.seek(secs),
                Command::SetVolume(volume) => self.element.set_volume(volume),
            }
        }
    }

    fn log_action(&self, action: UserAction, details: Option<String>) {
        if let Some(handle) = &self.diagnostics {
            handle.log_action_with_details(action, details);
        }
    }

    fn log_state(&self, state: AppStateEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_state(state);
        }
    }

    fn log_warning(&self, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(message);
        }
    }

    fn log_error(&self, message: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log_error(message);
        }
    }
}
