// SPDX-License-Identifier: MPL-2.0
use reel_player::app::paths;
use reel_player::app::preferences::Preferences;
use reel_player::application::port::FileDialogs;
use reel_player::config;
use reel_player::directory_scanner;
use reel_player::i18n::I18n;
use reel_player::infrastructure::{FileStore, NativeDialogs};
use reel_player::media::{MediaKind, PlaylistEntry};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str =
    "reel_player [--lang L] [--data-dir D] [--config-dir C] [--folder DIR | FILE...]";

struct Flags {
    lang: Option<String>,
    data_dir: Option<String>,
    config_dir: Option<String>,
    folder: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    let lang = args.opt_value_from_str("--lang")?;
    let data_dir = args.opt_value_from_str("--data-dir")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let folder = args.opt_value_from_os_str("--folder", |s| {
        Ok::<_, std::convert::Infallible>(PathBuf::from(s))
    })?;
    let files = args.finish().into_iter().map(PathBuf::from).collect();

    Ok(Flags {
        lang,
        data_dir,
        config_dir,
        folder,
        files,
    })
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("usage: {USAGE}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_overrides(flags.data_dir, flags.config_dir);

    let config = config::load().unwrap_or_else(|err| {
        eprintln!("Failed to load settings: {err}");
        config::Config::default()
    });
    let i18n = I18n::new(flags.lang, &config);
    let dialogs = match dirs::video_dir() {
        Some(dir) => NativeDialogs::new().with_start_directory(dir),
        None => NativeDialogs::new(),
    };

    let selection = if let Some(dir) = flags.folder {
        scan_folder(&dir, &dialogs, &i18n)
    } else if !flags.files.is_empty() {
        let files = directory_scanner::filter_supported(flags.files);
        if files.is_empty() {
            show_no_media(&dialogs, &i18n);
            None
        } else {
            Some(files)
        }
    } else {
        dialogs
            .pick_folder(&i18n.tr("dialog-open-folder-title"))
            .and_then(|dir| scan_folder(&dir, &dialogs, &i18n))
    };

    let Some(files) = selection else {
        println!("{}", i18n.tr("cli-no-selection"));
        return ExitCode::SUCCESS;
    };
    let entries = directory_scanner::to_entries(&files);

    store_queue(&entries, &i18n);
    print_queue(&entries, &i18n);
    ExitCode::SUCCESS
}

fn scan_folder(dir: &Path, dialogs: &dyn FileDialogs, i18n: &I18n) -> Option<Vec<PathBuf>> {
    match directory_scanner::scan_directory(dir) {
        Ok(files) if files.is_empty() => {
            show_no_media(dialogs, i18n);
            None
        }
        Ok(files) => Some(files),
        Err(err) => {
            eprintln!("Failed to read {}: {err}", dir.display());
            dialogs.show_error(&i18n.tr("dialog-error-title"), &i18n.tr("dialog-read-dir-error"));
            None
        }
    }
}

fn show_no_media(dialogs: &dyn FileDialogs, i18n: &I18n) {
    dialogs.show_info(
        &i18n.tr("dialog-no-media-title"),
        &i18n.tr("dialog-no-media-message"),
    );
}

/// Replaces the persisted playlist so the next player session starts on the
/// first entry. Volume settings and the resume bookmark are kept.
fn store_queue(entries: &[PlaylistEntry], i18n: &I18n) {
    let (store, warning) = FileStore::open();
    if let Some(key) = warning {
        eprintln!("{}", i18n.tr(&key));
    }
    let Some(mut store) = store else {
        return;
    };

    let mut prefs = Preferences::load(&store);
    prefs.playlist = entries.to_vec();
    prefs.current_index = Some(0);

    match prefs.save(&mut store) {
        Ok(()) => println!("{}", i18n.tr("cli-queue-saved")),
        Err(err) => eprintln!("Failed to save {}: {err}", store.path().display()),
    }
}

fn print_queue(entries: &[PlaylistEntry], i18n: &I18n) {
    let count = entries.len().to_string();
    println!(
        "{}",
        i18n.tr_with_args("cli-queue-header", &[("count", count.as_str())])
    );
    for (position, entry) in entries.iter().enumerate() {
        let kind = match entry.kind() {
            MediaKind::Audio => i18n.tr("media-kind-audio"),
            MediaKind::Video => i18n.tr("media-kind-video"),
        };
        println!("{:>4}. {} ({kind})", position + 1, entry.display_name());
    }
}
