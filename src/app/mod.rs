// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the host shell and the
//! playback core.
//!
//! [`Player`] wires together the playback controller, the control bar
//! visibility policy, screenshot capture, localization and the host window.
//! Hosts translate their native input into calls on the player and render
//! from its accessors.

pub mod paths;
pub mod preferences;
pub mod shortcuts;

use crate::application::port::{FileDialogs, MediaElement, PreferenceStore, WindowControl};
use crate::config::{Config, SUPPORTED_EXTENSIONS};
use crate::diagnostics::{AppStateEvent, DiagnosticsCollector, UserAction};
use crate::directory_scanner;
use crate::error::{MediaError, Result};
use crate::i18n::I18n;
use crate::media::{MediaKind, Screenshot};
use crate::ui::state::controls_visibility::{self, Effect};
use crate::video_player::{
    format_time, ElementEvent, ElementEventKind, LoadToken, Outcome, PlaybackController,
    PlaybackState,
};
use preferences::Preferences;
use shortcuts::{Key, Shortcut};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use unic_langid::LanguageIdentifier;

/// Result of an "open file" or "open folder" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    /// The dialog was dismissed.
    Cancelled,
    /// The folder held no supported media. The user was told.
    NoMedia,
    /// The folder could not be read. The user was told.
    Failed,
    /// A new playlist with this many entries is playing.
    Loaded(usize),
}

/// Root player state bridging the playback core and the host shell.
pub struct Player<E, W> {
    controller: PlaybackController<E>,
    controls: controls_visibility::State,
    screenshot: Option<Screenshot>,
    window: W,
    config: Config,
    i18n: I18n,
    diagnostics: DiagnosticsCollector,
    /// Playback activity last reported to the control bar.
    controls_playback_active: bool,
    /// Load the screenshot and error belong to.
    shown_load: LoadToken,
    last_error: Option<MediaError>,
}

impl<E: fmt::Debug, W: fmt::Debug> fmt::Debug for Player<E, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("controller", &self.controller)
            .field("controls", &self.controls)
            .field("has_screenshot", &self.screenshot.is_some())
            .field("last_error", &self.last_error)
            .field("window", &self.window)
            .field("locale", &self.i18n.current_locale().to_string())
            .finish_non_exhaustive()
    }
}

impl<E: MediaElement, W: WindowControl> Player<E, W> {
    /// Builds a player from saved preferences. A saved playlist with a valid
    /// selection starts playing right away.
    pub fn new(element: E, window: W, config: Config, i18n: I18n, prefs: &Preferences) -> Self {
        let diagnostics = DiagnosticsCollector::default();
        let mut controller = PlaybackController::new(element, prefs.initial_state());
        controller.set_diagnostics(diagnostics.handle());
        controller.restore_playlist(prefs.playlist.clone(), prefs.current_index);

        let mut player = Self {
            controller,
            controls: controls_visibility::State::new(config.controls_hide_delay()),
            screenshot: None,
            window,
            config,
            i18n,
            diagnostics,
            controls_playback_active: false,
            shown_load: LoadToken::default(),
            last_error: None,
        };
        player.sync_host();
        player
    }

    /// Reads preferences from `store` and builds the player.
    pub fn restore(
        element: E,
        window: W,
        config: Config,
        i18n: I18n,
        store: &dyn PreferenceStore,
    ) -> Self {
        let prefs = Preferences::load(store);
        Self::new(element, window, config, i18n, &prefs)
    }

    // ------------------------------------------------------------------
    // Media selection
    // ------------------------------------------------------------------

    /// Replaces the playlist with `paths` and starts the first entry.
    /// Returns false and changes nothing when `paths` is empty.
    pub fn media_selected(&mut self, paths: &[PathBuf]) -> bool {
        let entries = directory_scanner::to_entries(paths);
        if !self.controller.load_selection(entries) {
            return false;
        }
        self.screenshot = None;
        self.last_error = None;
        self.sync_host();
        true
    }

    /// Shows the file picker and plays the chosen file.
    pub fn open_file(&mut self, dialogs: &dyn FileDialogs) -> OpenOutcome {
        let title = self.i18n.tr("dialog-open-file-title");
        let filter = self.i18n.tr("dialog-media-filter");
        let Some(path) = dialogs.pick_file(&title, &filter, SUPPORTED_EXTENSIONS) else {
            return OpenOutcome::Cancelled;
        };

        let files = directory_scanner::filter_supported([path]);
        if files.is_empty() {
            dialogs.show_info(
                &self.i18n.tr("dialog-no-media-title"),
                &self.i18n.tr("dialog-no-media-message"),
            );
            return OpenOutcome::NoMedia;
        }
        self.media_selected(&files);
        OpenOutcome::Loaded(files.len())
    }

    /// Shows the folder picker and plays every supported file it contains.
    pub fn open_folder(&mut self, dialogs: &dyn FileDialogs) -> OpenOutcome {
        let title = self.i18n.tr("dialog-open-folder-title");
        let Some(dir) = dialogs.pick_folder(&title) else {
            return OpenOutcome::Cancelled;
        };

        match directory_scanner::scan_directory(&dir) {
            Ok(files) if files.is_empty() => {
                dialogs.show_info(
                    &self.i18n.tr("dialog-no-media-title"),
                    &self.i18n.tr("dialog-no-media-message"),
                );
                OpenOutcome::NoMedia
            }
            Ok(files) => {
                self.media_selected(&files);
                OpenOutcome::Loaded(files.len())
            }
            Err(err) => {
                self.diagnostics
                    .handle()
                    .log_error(format!("Failed to read {}: {err}", dir.display()));
                dialogs.show_error(
                    &self.i18n.tr("dialog-error-title"),
                    &self.i18n.tr("dialog-read-dir-error"),
                );
                OpenOutcome::Failed
            }
        }
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    pub fn play_pause(&mut self) {
        self.controller.play_pause();
        self.sync_host();
    }

    pub fn play_next(&mut self) {
        self.controller.play_next();
        self.sync_host();
    }

    pub fn play_previous(&mut self) {
        self.controller.play_previous();
        self.sync_host();
    }

    pub fn seek(&mut self, target_secs: f64) {
        self.controller.seek(target_secs);
        self.sync_host();
    }

    pub fn skip(&mut self, delta_secs: f64) {
        self.controller.skip(delta_secs);
        self.sync_host();
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.controller.set_volume(volume);
        self.sync_host();
    }

    pub fn toggle_mute(&mut self) {
        self.controller.toggle_mute();
        self.sync_host();
    }

    fn step_volume(&mut self, delta: f32) {
        self.controller.step_volume(delta);
        self.sync_host();
    }

    /// A click on the media surface toggles playback.
    pub fn surface_clicked(&mut self) {
        self.play_pause();
    }

    /// A double click on the media surface toggles full screen.
    pub fn surface_double_clicked(&mut self) -> bool {
        self.toggle_full_screen()
    }

    /// Forwards a media element notification. A rejected play from the
    /// current load is kept as [`Player::error_message`] until playback
    /// starts or another source loads.
    pub fn handle_element_event(&mut self, event: ElementEvent) -> Outcome {
        if self.controller.state().is_current(event.token) {
            match &event.kind {
                ElementEventKind::PlayRejected { error } => self.last_error = Some(error.clone()),
                ElementEventKind::Playing => self.last_error = None,
                _ => {}
            }
        }
        let outcome = self.controller.handle_event(event);
        self.sync_host();
        outcome
    }

    // ------------------------------------------------------------------
    // Keyboard and pointer
    // ------------------------------------------------------------------

    /// Handles a key press. Returns true when the key was consumed.
    ///
    /// Keys are ignored while nothing is loaded. The screenshot key is left
    /// to the host for audio entries.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.controller.state().has_media() {
            return false;
        }
        let Some(shortcut) = Shortcut::from_key(key) else {
            return false;
        };

        match shortcut {
            Shortcut::TogglePlayback => self.play_pause(),
            Shortcut::SkipBackward => self.skip(-self.config.skip_step()),
            Shortcut::SkipForward => self.skip(self.config.skip_step()),
            Shortcut::VolumeUp => self.step_volume(self.config.volume_step()),
            Shortcut::VolumeDown => self.step_volume(-self.config.volume_step()),
            Shortcut::ToggleMute => self.toggle_mute(),
            Shortcut::Screenshot => {
                if self.controller.state().current_is_audio() {
                    return false;
                }
                if let Err(err) = self.take_screenshot() {
                    self.diagnostics
                        .handle()
                        .log_error(format!("Screenshot failed: {err}"));
                    self.diagnostics.process_pending();
                }
            }
            Shortcut::Previous => self.play_previous(),
            Shortcut::Next => self.play_next(),
            Shortcut::ToggleFullScreen => {
                self.toggle_full_screen();
            }
        }
        true
    }

    pub fn pointer_moved(&mut self, y: f32, surface_height: f32, now: Instant) -> Effect {
        self.controls.handle(
            controls_visibility::Message::PointerMoved { y, surface_height },
            now,
        )
    }

    pub fn pointer_left(&mut self, now: Instant) -> Effect {
        self.controls.handle(controls_visibility::Message::PointerLeft, now)
    }

    /// Checks the hide deadline and drains pending diagnostic events. Hosts
    /// schedule this at [`Player::next_deadline`].
    pub fn tick(&mut self, now: Instant) -> Effect {
        self.diagnostics.process_pending();
        self.controls.handle(controls_visibility::Message::Tick, now)
    }

    // ------------------------------------------------------------------
    // Screenshot
    // ------------------------------------------------------------------

    /// Captures the current video frame as the preview screenshot.
    ///
    /// Returns `Ok(false)` when there is nothing to capture: no media, an
    /// audio entry, or no decoded frame yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be encoded.
    pub fn take_screenshot(&mut self) -> Result<bool> {
        let kind = match self.controller.state().current_entry() {
            Some(entry) => entry.kind(),
            None => return Ok(false),
        };
        if kind == MediaKind::Audio {
            return Ok(false);
        }

        let handle = self.diagnostics.handle();
        handle.log_action(UserAction::CaptureScreenshot);

        let frame = self.controller.element().current_frame();
        let captured = match Screenshot::capture(kind, frame.as_ref())? {
            Some(shot) => {
                self.screenshot = Some(shot);
                true
            }
            None => {
                handle.log_warning("No video frame available for screenshot");
                false
            }
        };
        self.diagnostics.process_pending();
        Ok(captured)
    }

    /// Writes the preview screenshot to the configured directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn download_screenshot(&self) -> Result<Option<PathBuf>> {
        let Some(shot) = &self.screenshot else {
            return Ok(None);
        };
        self.diagnostics
            .handle()
            .log_action(UserAction::DownloadScreenshot);
        shot.download_to(self.config.screenshot_dir()).map(Some)
    }

    /// Localized confirmation for a saved screenshot.
    #[must_use]
    pub fn screenshot_saved_message(&self, path: &std::path::Path) -> String {
        let path = path.display().to_string();
        self.i18n
            .tr_with_args("notification-screenshot-saved", &[("path", path.as_str())])
    }

    pub fn clear_screenshot(&mut self) {
        self.screenshot = None;
    }

    // ------------------------------------------------------------------
    // Errors and language
    // ------------------------------------------------------------------

    /// Localized message for the last rejected play, if it still applies.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.last_error
            .as_ref()
            .map(|error| self.i18n.tr(error.i18n_key()))
    }

    /// Switches the interface language. The choice is kept in the config so
    /// hosts can persist it. Returns false for a language without
    /// translations.
    pub fn set_language(&mut self, locale: LanguageIdentifier) -> bool {
        let language = locale.to_string();
        if !self.i18n.set_locale(locale) {
            self.diagnostics
                .handle()
                .log_warning(format!("No translations for {language}"));
            self.diagnostics.process_pending();
            return false;
        }
        self.config.language = Some(language);
        true
    }

    // ------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------

    /// Toggles full screen. Refused while nothing is loaded. Returns the
    /// resulting full-screen state.
    pub fn toggle_full_screen(&mut self) -> bool {
        if !self.controller.state().has_media() {
            self.diagnostics
                .handle()
                .log_warning("Full screen refused: no media loaded");
            self.diagnostics.process_pending();
            return self.window.is_full_screen();
        }
        self.diagnostics
            .handle()
            .log_action(UserAction::ToggleFullscreen);
        let fullscreen = self.window.toggle_full_screen();
        self.diagnostics
            .handle()
            .log_state(AppStateEvent::FullscreenChanged { fullscreen });
        self.diagnostics.process_pending();
        fullscreen
    }

    // ------------------------------------------------------------------
    // Shutdown
    // ------------------------------------------------------------------

    /// Preferences describing the current session.
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        Preferences::capture(self.controller.state())
    }

    /// Persists the session into `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be flushed.
    pub fn shutdown(&mut self, store: &mut dyn PreferenceStore) -> Result<()> {
        self.preferences().save(store)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        self.controller.state()
    }

    #[must_use]
    pub fn element(&self) -> &E {
        self.controller.element()
    }

    pub fn element_mut(&mut self) -> &mut E {
        self.controller.element_mut()
    }

    #[must_use]
    pub fn window(&self) -> &W {
        &self.window
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controls.next_deadline()
    }

    #[must_use]
    pub fn screenshot(&self) -> Option<&Screenshot> {
        self.screenshot.as_ref()
    }

    /// File name of the current entry, shown as the title.
    #[must_use]
    pub fn now_playing(&self) -> Option<&str> {
        self.controller
            .state()
            .current_entry()
            .map(|entry| entry.display_name())
    }

    /// Formatted current time and duration.
    #[must_use]
    pub fn time_labels(&self) -> (String, String) {
        let state = self.controller.state();
        (format_time(state.current_time()), format_time(state.duration()))
    }

    /// Drains pending diagnostic events and returns the collector.
    pub fn diagnostics(&mut self) -> &DiagnosticsCollector {
        self.diagnostics.process_pending();
        &self.diagnostics
    }

    /// Keeps host-facing state in line with the transport. The control bar
    /// learns about playback changes, a screenshot or error from a previous
    /// source is dropped, full screen ends once the playlist is empty, and
    /// pending diagnostic events are drained.
    fn sync_host(&mut self) {
        let token = self.controller.state().token();
        if token != self.shown_load {
            self.shown_load = token;
            self.screenshot = None;
            self.last_error = None;
        }

        let active = self.controller.state().is_playing();
        if active != self.controls_playback_active {
            self.controls_playback_active = active;
            self.controls.handle(
                controls_visibility::Message::PlaybackChanged { active },
                Instant::now(),
            );
        }

        if !self.controller.state().has_media() && self.window.is_full_screen() {
            let fullscreen = self.window.toggle_full_screen();
            self.diagnostics
                .handle()
                .log_state(AppStateEvent::FullscreenChanged { fullscreen });
        }
        self.diagnostics.process_pending();
    }
}
