// SPDX-License-Identifier: MPL-2.0
//! Host shell ports: native dialogs and window control.

use std::path::PathBuf;

/// Native file dialogs and message boxes.
pub trait FileDialogs {
    /// Asks for a single file matching `extensions`. `None` on cancel.
    fn pick_file(&self, title: &str, filter_name: &str, extensions: &[&str]) -> Option<PathBuf>;

    /// Asks for a directory. `None` on cancel.
    fn pick_folder(&self, title: &str) -> Option<PathBuf>;

    /// Shows a blocking informational message.
    fn show_info(&self, title: &str, message: &str);

    /// Shows a blocking error message.
    fn show_error(&self, title: &str, message: &str);
}

/// Full-screen control of the main window.
pub trait WindowControl {
    /// Toggles full screen and returns the new state.
    fn toggle_full_screen(&mut self) -> bool;

    fn is_full_screen(&self) -> bool;
}
