// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use reel_player::app::preferences::{
    MemoryStore, Preferences, KEY_CURRENT_INDEX, KEY_LAST_PLAYED_SRC, KEY_LAST_PLAYED_TIME,
    KEY_PLAYLIST, KEY_VOLUME,
};
use reel_player::app::shortcuts::Key;
use reel_player::app::{OpenOutcome, Player};
use reel_player::application::port::{FileDialogs, MediaElement, PreferenceStore, WindowControl};
use reel_player::config::{self, Config};
use reel_player::diagnostics::{DiagnosticEventKind, UserAction};
use reel_player::error::MediaError;
use reel_player::i18n::I18n;
use reel_player::media::{PlaylistEntry, RawFrame};
use reel_player::video_player::{
    format_time, ElementEvent, ElementEventKind, LoadToken, Outcome, Volume,
};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Host fakes
// ---------------------------------------------------------------------------

/// Media element that records every command and answers queries from
/// scripted values.
#[derive(Debug, Default)]
struct ScriptedElement {
    calls: Vec<String>,
    token: LoadToken,
    time: f64,
    duration: f64,
    frame: Option<RawFrame>,
}

impl MediaElement for ScriptedElement {
    fn load(&mut self, entry: &PlaylistEntry, token: LoadToken) {
        self.token = token;
        self.time = 0.0;
        self.calls.push(format!("load {}", entry.display_name()));
    }
    fn play(&mut self) {
        self.calls.push("play".into());
    }
    fn pause(&mut self) {
        self.calls.push("pause".into());
    }
    fn seek(&mut self, secs: f64) {
        self.time = secs.clamp(0.0, self.duration.max(0.0));
        self.calls.push(format!("seek {secs}"));
    }
    fn set_volume(&mut self, volume: f32) {
        self.calls.push(format!("volume {volume}"));
    }
    fn current_time(&self) -> f64 {
        self.time
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn current_frame(&self) -> Option<RawFrame> {
        self.frame.clone()
    }
}

#[derive(Debug, Default)]
struct FakeWindow {
    fullscreen: bool,
    toggles: usize,
}

impl WindowControl for FakeWindow {
    fn toggle_full_screen(&mut self) -> bool {
        self.toggles += 1;
        self.fullscreen = !self.fullscreen;
        self.fullscreen
    }
    fn is_full_screen(&self) -> bool {
        self.fullscreen
    }
}

#[derive(Debug, Default)]
struct FakeDialogs {
    file: Option<PathBuf>,
    folder: Option<PathBuf>,
    infos: RefCell<Vec<(String, String)>>,
    errors: RefCell<Vec<(String, String)>>,
    file_filter: RefCell<Vec<String>>,
}

impl FileDialogs for FakeDialogs {
    fn pick_file(&self, _title: &str, _filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
        *self.file_filter.borrow_mut() = extensions.iter().map(|e| (*e).to_string()).collect();
        self.file.clone()
    }
    fn pick_folder(&self, _title: &str) -> Option<PathBuf> {
        self.folder.clone()
    }
    fn show_info(&self, title: &str, message: &str) {
        self.infos
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
    fn show_error(&self, title: &str, message: &str) {
        self.errors
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
    }
}

type TestPlayer = Player<ScriptedElement, FakeWindow>;

fn english() -> I18n {
    I18n::new(Some("en-US".into()), &Config::default())
}

fn player_with(prefs: &Preferences) -> TestPlayer {
    Player::new(
        ScriptedElement::default(),
        FakeWindow::default(),
        Config::default(),
        english(),
        prefs,
    )
}

fn player() -> TestPlayer {
    player_with(&Preferences::default())
}

fn select(player: &mut TestPlayer, names: &[&str]) {
    let paths: Vec<PathBuf> = names.iter().map(PathBuf::from).collect();
    assert!(player.media_selected(&paths));
    player.element_mut().calls.clear();
}

fn emit(player: &mut TestPlayer, kind: ElementEventKind) -> Outcome {
    let token = player.element().token;
    player.handle_element_event(ElementEvent::new(token, kind))
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"media").expect("failed to write test file");
}

// ---------------------------------------------------------------------------
// Testable properties
// ---------------------------------------------------------------------------

#[test]
fn mute_round_trip_restores_effective_volume() {
    for v in [0.0_f32, 0.05, 0.3, 0.5, 0.75, 1.0] {
        let mut player = player();
        select(&mut player, &["a.mp4"]);

        player.set_volume(v);
        player.toggle_mute();
        player.toggle_mute();

        assert_abs_diff_eq!(player.state().effective_volume(), v);
    }
}

#[test]
fn play_next_stops_at_last_entry_and_is_idempotent() {
    let names = ["a.mp4", "b.mp3", "c.webm"];
    let mut player = player();
    select(&mut player, &names);
    emit(&mut player, ElementEventKind::Playing);

    for _ in 1..names.len() {
        player.play_next();
        emit(&mut player, ElementEventKind::Playing);
        emit(&mut player, ElementEventKind::TimeUpdate { current_time: 4.0 });
    }
    player.play_next();

    // The last call stopped playback instead of advancing
    assert_eq!(player.state().current_index(), Some(2));
    assert!(player.element().calls.ends_with(&[String::from("pause"), String::from("seek 0")]));

    emit(&mut player, ElementEventKind::Paused);
    assert!(!player.state().is_playing());
    assert_abs_diff_eq!(player.state().current_time(), 0.0);

    player.element_mut().calls.clear();
    player.play_next();
    assert!(player.element().calls.is_empty());
    assert_eq!(player.state().current_index(), Some(2));
}

#[test]
fn time_format_reference_values() {
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(59.0), "00:59");
    assert_eq!(format_time(60.0), "01:00");
    assert_eq!(format_time(3661.0), "1:01:01");
}

#[test]
fn open_folder_filters_and_sorts_playlist() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    for name in ["b.mp4", "a.mp3", "c.wav", "d.txt"] {
        touch(temp_dir.path(), name);
    }
    let dialogs = FakeDialogs {
        folder: Some(temp_dir.path().to_path_buf()),
        ..FakeDialogs::default()
    };
    let mut player = player();

    assert_eq!(player.open_folder(&dialogs), OpenOutcome::Loaded(3));

    let names: Vec<&str> = player
        .state()
        .playlist()
        .iter()
        .map(PlaylistEntry::display_name)
        .collect();
    assert_eq!(names, vec!["a.mp3", "b.mp4", "c.wav"]);
    assert_eq!(player.state().current_index(), Some(0));
    assert_eq!(player.element().calls, vec!["load a.mp3", "volume 0.5", "play"]);
}

#[test]
fn unmute_restores_last_volume_not_default() {
    let prefs = Preferences {
        volume: Volume::new(0.3),
        last_volume: Volume::new(0.3),
        ..Preferences::default()
    };
    let mut player = player_with(&prefs);
    select(&mut player, &["a.mp4"]);

    player.toggle_mute();
    assert_abs_diff_eq!(player.state().effective_volume(), 0.0);

    player.toggle_mute();
    assert_abs_diff_eq!(player.state().effective_volume(), 0.3);
    assert_eq!(player.element().calls, vec!["volume 0", "volume 0.3"]);
}

#[test]
fn resume_bookmark_is_applied_once() {
    let mut store = MemoryStore::new();
    store.set(KEY_PLAYLIST, r#"["/media/x.mp4"]"#.to_string());
    store.set(KEY_CURRENT_INDEX, "0".to_string());
    store.set(KEY_LAST_PLAYED_SRC, "/media/x.mp4".to_string());
    store.set(KEY_LAST_PLAYED_TIME, "120".to_string());

    let mut player = Player::restore(
        ScriptedElement {
            duration: 300.0,
            ..ScriptedElement::default()
        },
        FakeWindow::default(),
        Config::default(),
        english(),
        &store,
    );
    assert_eq!(player.element().calls, vec!["load x.mp4", "volume 0.5", "play"]);

    let first = emit(&mut player, ElementEventKind::LoadedMetadata { duration: 300.0 });
    assert_eq!(first, Outcome::ResumeApplied(120.0));
    assert_eq!(player.element().calls.last().map(String::as_str), Some("seek 120"));

    player.element_mut().calls.clear();
    let second = emit(&mut player, ElementEventKind::LoadedMetadata { duration: 300.0 });
    assert_eq!(second, Outcome::None);
    assert!(player.element().calls.is_empty());
}

#[test]
fn screenshot_is_refused_for_audio() {
    let mut player = player();
    select(&mut player, &["song.flac"]);
    player.element_mut().frame = Some(RawFrame::new(Arc::new(vec![0; 16]), 2, 2));

    assert!(!player.take_screenshot().unwrap());
    assert!(player.screenshot().is_none());
}

// ---------------------------------------------------------------------------
// Playback controller
// ---------------------------------------------------------------------------

#[test]
fn stale_completion_does_not_touch_new_source() {
    let mut player = player();
    select(&mut player, &["a.mp4", "b.mp4"]);
    let stale = player.element().token;

    player.play_next();
    let outcome = player.handle_element_event(ElementEvent::new(stale, ElementEventKind::Playing));

    assert_eq!(outcome, Outcome::None);
    assert!(!player.state().is_playing());
    assert!(player.diagnostics().iter().any(|e| matches!(
        &e.kind,
        DiagnosticEventKind::Warning { message } if message.contains("stale")
    )));
}

#[test]
fn play_rejection_is_logged_and_leaves_transport_paused() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);

    emit(
        &mut player,
        ElementEventKind::PlayRejected {
            error: MediaError::from_message("NotAllowedError: autoplay blocked"),
        },
    );

    assert!(!player.state().is_playing());
    assert!(player.state().has_media());
    assert!(player
        .diagnostics()
        .iter()
        .any(|e| matches!(e.kind, DiagnosticEventKind::Error { .. })));
}

#[test]
fn next_on_last_entry_stops_before_autoplay_starts() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);

    player.play_next();
    assert_eq!(player.element().calls, vec!["pause", "seek 0"]);

    emit(&mut player, ElementEventKind::Paused);
    assert!(!player.state().is_playing());

    player.element_mut().calls.clear();
    player.play_next();
    assert!(player.element().calls.is_empty());
}

#[test]
fn play_rejection_shows_localized_message_until_playback_starts() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);
    assert_eq!(player.error_message(), None);

    emit(
        &mut player,
        ElementEventKind::PlayRejected {
            error: MediaError::UnsupportedFormat,
        },
    );
    assert_eq!(
        player.error_message().as_deref(),
        Some("This media format is not supported.")
    );

    assert!(player.set_language("fr".parse().unwrap()));
    assert_eq!(
        player.error_message().as_deref(),
        Some("Ce format de média n'est pas pris en charge.")
    );

    emit(&mut player, ElementEventKind::Playing);
    assert_eq!(player.error_message(), None);
}

#[test]
fn play_rejection_from_previous_source_is_not_shown() {
    let mut player = player();
    select(&mut player, &["a.mp4", "b.mp4"]);
    let stale = player.element().token;
    player.play_next();

    player.handle_element_event(ElementEvent::new(
        stale,
        ElementEventKind::PlayRejected {
            error: MediaError::UnsupportedFormat,
        },
    ));
    assert_eq!(player.error_message(), None);
}

#[test]
fn ended_advances_to_next_entry_with_autoplay() {
    let mut player = player();
    select(&mut player, &["a.mp4", "b.mp3"]);
    emit(&mut player, ElementEventKind::Playing);

    let outcome = emit(&mut player, ElementEventKind::Ended);

    assert_eq!(outcome, Outcome::Advanced(1));
    assert_eq!(player.element().calls, vec!["load b.mp3", "volume 0.5", "play"]);
    assert_eq!(player.now_playing(), Some("b.mp3"));
}

#[test]
fn reselecting_current_source_does_not_reload() {
    let mut player = player();
    select(&mut player, &["a.mp4", "b.mp4"]);

    assert!(player.media_selected(&[PathBuf::from("a.mp4")]));
    assert!(player.element().calls.is_empty());
    assert_eq!(player.state().playlist().len(), 1);
}

#[test]
fn empty_selection_is_a_no_op() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);

    assert!(!player.media_selected(&[]));
    assert_eq!(player.state().playlist().len(), 1);
}

#[test]
fn external_volume_change_is_adopted() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);

    emit(&mut player, ElementEventKind::VolumeChanged { volume: 0.5 });
    assert_abs_diff_eq!(player.state().volume().value(), 0.5);

    emit(&mut player, ElementEventKind::VolumeChanged { volume: 0.8 });
    assert_abs_diff_eq!(player.state().volume().value(), 0.8);
    assert!(player.element().calls.is_empty());
}

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

#[test]
fn arrow_keys_skip_from_element_time() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);
    player.element_mut().duration = 100.0;
    player.element_mut().time = 42.0;

    assert!(player.handle_key(Key::ArrowRight));
    assert!(player.handle_key(Key::ArrowLeft));
    assert!(player.handle_key(Key::ArrowLeft));

    assert_eq!(player.element().calls, vec!["seek 52", "seek 42", "seek 32"]);
}

#[test]
fn volume_keys_step_from_effective_volume() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);
    player.toggle_mute();

    assert!(player.handle_key(Key::ArrowUp));
    assert!(!player.state().is_muted());
    assert_abs_diff_eq!(player.state().effective_volume(), 0.05, epsilon = 1e-6);

    assert!(player.handle_key(Key::ArrowDown));
    assert_abs_diff_eq!(player.state().effective_volume(), 0.0, epsilon = 1e-6);
}

#[test]
fn shortcuts_need_media() {
    let mut player = player();
    for key in [Key::Space, Key::ArrowUp, Key::Char('m'), Key::Char('n')] {
        assert!(!player.handle_key(key));
    }
    assert!(player.element().calls.is_empty());
}

#[test]
fn navigation_keys_move_through_playlist() {
    let mut player = player();
    select(&mut player, &["a.mp4", "b.mp4"]);

    assert!(player.handle_key(Key::Char('N')));
    assert_eq!(player.state().current_index(), Some(1));
    assert!(player.handle_key(Key::Char('p')));
    assert_eq!(player.state().current_index(), Some(0));
    assert!(!player.handle_key(Key::Char('z')));
}

// ---------------------------------------------------------------------------
// Host shell
// ---------------------------------------------------------------------------

#[test]
fn full_screen_refused_without_media() {
    let mut player = player();
    assert!(!player.toggle_full_screen());
    assert_eq!(player.window().toggles, 0);

    select(&mut player, &["a.mp4"]);
    assert!(player.handle_key(Key::Char('f')));
    assert!(player.window().is_full_screen());
}

#[test]
fn full_screen_is_left_when_nothing_is_current() {
    let prefs = Preferences {
        playlist: vec![PlaylistEntry::new("a.mp4")],
        current_index: None,
        ..Preferences::default()
    };
    let player = Player::new(
        ScriptedElement::default(),
        FakeWindow {
            fullscreen: true,
            toggles: 0,
        },
        Config::default(),
        english(),
        &prefs,
    );

    assert!(!player.window().is_full_screen());
    assert!(!player.state().has_media());
}

#[test]
fn open_file_is_filtered_to_supported_extensions() {
    let dialogs = FakeDialogs {
        file: Some(PathBuf::from("/media/clip.webm")),
        ..FakeDialogs::default()
    };
    let mut player = player();

    assert_eq!(player.open_file(&dialogs), OpenOutcome::Loaded(1));
    assert_eq!(
        dialogs.file_filter.borrow().as_slice(),
        config::SUPPORTED_EXTENSIONS
    );
    assert_eq!(player.now_playing(), Some("clip.webm"));
}

#[test]
fn cancelled_dialogs_change_nothing() {
    let dialogs = FakeDialogs::default();
    let mut player = player();

    assert_eq!(player.open_file(&dialogs), OpenOutcome::Cancelled);
    assert_eq!(player.open_folder(&dialogs), OpenOutcome::Cancelled);
    assert!(!player.state().has_media());
    assert!(dialogs.infos.borrow().is_empty());
}

#[test]
fn folder_without_media_shows_info_and_keeps_playlist() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    touch(temp_dir.path(), "notes.txt");
    let dialogs = FakeDialogs {
        folder: Some(temp_dir.path().to_path_buf()),
        ..FakeDialogs::default()
    };
    let mut player = player();
    select(&mut player, &["a.mp4"]);

    assert_eq!(player.open_folder(&dialogs), OpenOutcome::NoMedia);
    assert_eq!(
        dialogs.infos.borrow().as_slice(),
        &[(
            "No Media Found".to_string(),
            "No supported video or audio files found in the selected folder.".to_string()
        )]
    );
    assert_eq!(player.now_playing(), Some("a.mp4"));
}

#[test]
fn unreadable_folder_shows_error_without_partial_playlist() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let dialogs = FakeDialogs {
        folder: Some(temp_dir.path().join("missing")),
        ..FakeDialogs::default()
    };
    let mut player = player();

    assert_eq!(player.open_folder(&dialogs), OpenOutcome::Failed);
    assert_eq!(dialogs.errors.borrow().len(), 1);
    assert!(player.state().playlist().is_empty());
}

#[test]
fn dialogs_follow_the_selected_language() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let dialogs = FakeDialogs {
        folder: Some(temp_dir.path().to_path_buf()),
        ..FakeDialogs::default()
    };
    let config = Config {
        language: Some("fr".into()),
        ..Config::default()
    };
    let i18n = I18n::new(None, &config);
    let mut player = Player::new(
        ScriptedElement::default(),
        FakeWindow::default(),
        config,
        i18n,
        &Preferences::default(),
    );

    assert_eq!(player.open_folder(&dialogs), OpenOutcome::NoMedia);
    assert_eq!(dialogs.infos.borrow()[0].0, "Aucun média trouvé");
}

#[test]
fn set_language_keeps_choice_in_config() {
    let mut player = player();

    assert!(!player.set_language("de".parse().unwrap()));
    assert_eq!(player.config().language, None);

    assert!(player.set_language("fr".parse().unwrap()));
    assert_eq!(player.config().language.as_deref(), Some("fr"));
    assert_eq!(player.i18n().tr("dialog-no-media-title"), "Aucun média trouvé");
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn long_volume_drag_does_not_drop_later_actions() {
    let mut player = player();
    select(&mut player, &["a.mp4"]);
    emit(&mut player, ElementEventKind::Paused);

    for step in 0..150 {
        player.set_volume(step as f32 / 150.0);
    }
    player.toggle_mute();

    let diagnostics = player.diagnostics();
    assert!(diagnostics.len() > 150);
    assert!(diagnostics.iter().any(|e| matches!(
        e.kind,
        DiagnosticEventKind::UserAction {
            action: UserAction::ToggleMute,
            ..
        }
    )));
}

#[test]
fn warnings_after_many_actions_are_kept() {
    let mut player = player();
    for _ in 0..120 {
        player.toggle_full_screen();
        player.tick(std::time::Instant::now());
    }
    player.toggle_full_screen();

    let warnings = player
        .diagnostics()
        .iter()
        .filter(|e| matches!(e.kind, DiagnosticEventKind::Warning { .. }))
        .count();
    assert_eq!(warnings, 121);
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

#[test]
fn shutdown_persists_session_for_next_start() {
    let mut player = player();
    select(&mut player, &["/m/a.mp4", "/m/b.mp4"]);
    player.play_next();
    player.set_volume(0.4);
    emit(&mut player, ElementEventKind::TimeUpdate { current_time: 33.0 });

    let mut store = MemoryStore::new();
    player.shutdown(&mut store).unwrap();

    assert_eq!(store.flush_count(), 1);
    assert_eq!(store.get(KEY_VOLUME).as_deref(), Some("0.4"));
    assert_eq!(store.get(KEY_CURRENT_INDEX).as_deref(), Some("1"));
    assert_eq!(store.get(KEY_LAST_PLAYED_SRC).as_deref(), Some("/m/b.mp4"));
    assert_eq!(store.get(KEY_LAST_PLAYED_TIME).as_deref(), Some("33"));

    let next = Player::restore(
        ScriptedElement::default(),
        FakeWindow::default(),
        Config::default(),
        english(),
        &store,
    );
    assert_eq!(next.now_playing(), Some("b.mp4"));
    assert_abs_diff_eq!(next.state().volume().value(), 0.4);
    assert_eq!(next.element().calls, vec!["load b.mp4", "volume 0.4", "play"]);
}

#[test]
fn screenshot_download_writes_png() {
    let temp_dir = tempdir().expect("failed to create temp dir");
    let config = Config {
        screenshot_dir: Some(temp_dir.path().join("shots")),
        ..Config::default()
    };
    let mut player = Player::new(
        ScriptedElement::default(),
        FakeWindow::default(),
        config,
        english(),
        &Preferences::default(),
    );
    select(&mut player, &["clip.mp4"]);
    assert_eq!(player.download_screenshot().unwrap(), None);

    player.element_mut().frame = Some(RawFrame::new(Arc::new(vec![255; 3 * 2 * 4]), 3, 2));
    assert!(player.take_screenshot().unwrap());

    let path = player
        .download_screenshot()
        .unwrap()
        .expect("screenshot written");
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("screenshot-") && name.ends_with(".png"));
    assert!(fs::read(&path).unwrap().starts_with(&[0x89, b'P', b'N', b'G']));
    assert!(player.screenshot_saved_message(&path).contains("shots"));
}
