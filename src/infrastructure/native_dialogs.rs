// SPDX-License-Identifier: MPL-2.0
//! Native dialogs backed by `rfd`.

use crate::application::port::FileDialogs;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;

/// Blocking native dialogs, optionally starting in a given directory.
#[derive(Debug, Clone, Default)]
pub struct NativeDialogs {
    start_directory: Option<PathBuf>,
}

impl NativeDialogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens pickers in `dir` when it exists.
    #[must_use]
    pub fn with_start_directory(mut self, dir: PathBuf) -> Self {
        self.start_directory = Some(dir);
        self
    }

    fn file_dialog(&self, title: &str) -> FileDialog {
        let dialog = FileDialog::new().set_title(title);
        match &self.start_directory {
            Some(dir) if dir.is_dir() => dialog.set_directory(dir),
            _ => dialog,
        }
    }

    fn message(level: MessageLevel, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

impl FileDialogs for NativeDialogs {
    fn pick_file(&self, title: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf> {
        self.file_dialog(title)
            .add_filter(filter_name, extensions)
            .pick_file()
    }

    fn pick_folder(&self, title: &str) -> Option<PathBuf> {
        self.file_dialog(title).pick_folder()
    }

    fn show_info(&self, title: &str, message: &str) {
        Self::message(MessageLevel::Info, title, message);
    }

    fn show_error(&self, title: &str, message: &str) {
        Self::message(MessageLevel::Error, title, message);
    }
}
